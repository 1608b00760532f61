//! Version stamps for last-request-wins fetches.
//!
//! Every request is tagged with the key it was issued for and a version.
//! A completion is applied only while its tag still matches the current
//! key and version; the check and the write happen under one lock.

use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag<K> {
    pub key: K,
    pub version: u64,
}

#[derive(Debug)]
struct Current<K> {
    key: Option<K>,
    version: u64,
}

#[derive(Debug)]
pub struct KeyedStamp<K> {
    current: Mutex<Current<K>>,
}

impl<K> Default for KeyedStamp<K> {
    fn default() -> Self {
        Self {
            current: Mutex::new(Current {
                key: None,
                version: 0,
            }),
        }
    }
}

impl<K: Clone + PartialEq> KeyedStamp<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Current<K>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make `key` current and supersede every earlier tag
    pub fn issue(&self, key: K) -> RequestTag<K> {
        let mut current = self.lock();
        current.version += 1;
        current.key = Some(key.clone());
        RequestTag {
            key,
            version: current.version,
        }
    }

    /// [`issue`](Self::issue), running `publish` before the lock is released
    /// so readers of the published key never see it disagree with the stamp.
    pub fn issue_with(&self, key: K, publish: impl FnOnce(&K)) -> RequestTag<K> {
        let mut current = self.lock();
        current.version += 1;
        current.key = Some(key.clone());
        publish(&key);
        RequestTag {
            key,
            version: current.version,
        }
    }

    /// Supersede earlier tags for whichever key is current; `None` before any issue
    pub fn reissue_current(&self) -> Option<RequestTag<K>> {
        let mut current = self.lock();
        let key = current.key.clone()?;
        current.version += 1;
        Some(RequestTag {
            key,
            version: current.version,
        })
    }

    /// Tag a request for `key` without changing the current key.
    ///
    /// When `key` is current this supersedes earlier tags like [`issue`](Self::issue).
    /// Otherwise the tag can never apply: switching to `key` later bumps the version.
    pub fn issue_for(&self, key: K) -> RequestTag<K> {
        let mut current = self.lock();
        if current.key.as_ref() == Some(&key) {
            current.version += 1;
        }
        RequestTag {
            key,
            version: current.version,
        }
    }

    pub fn current_key(&self) -> Option<K> {
        self.lock().key.clone()
    }

    pub fn is_current(&self, tag: &RequestTag<K>) -> bool {
        let current = self.lock();
        current.version == tag.version && current.key.as_ref() == Some(&tag.key)
    }

    /// Run `apply` only if `tag` is still current; returns whether it ran
    pub fn apply_if_current(&self, tag: &RequestTag<K>, apply: impl FnOnce()) -> bool {
        let current = self.lock();
        if current.version != tag.version || current.key.as_ref() != Some(&tag.key) {
            return false;
        }
        apply();
        true
    }
}
