//! Scoped background tasks.
//!
//! A [`TaskHandle`] aborts its task when dropped, so a timer or in-flight
//! request never outlives the value that owns it.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::task::JoinHandle;

/// Owned handle to a spawned task; aborts the task on drop.
#[derive(Debug)]
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

type Tasks = Mutex<Vec<TaskHandle>>;

fn lock(tasks: &Tasks) -> MutexGuard<'_, Vec<TaskHandle>> {
    tasks.lock().unwrap_or_else(|e| e.into_inner())
}

/// Group of tasks cancelled together when the scope is dropped.
#[derive(Debug, Default)]
pub struct TaskScope {
    tasks: Arc<Tasks>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.adopt(TaskHandle::spawn(future));
    }

    pub fn adopt(&self, handle: TaskHandle) {
        let mut tasks = lock(&self.tasks);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Abort every task in the scope
    pub fn cancel_all(&self) {
        let drained: Vec<TaskHandle> = lock(&self.tasks).drain(..).collect();
        drop(drained);
    }

    /// Tasks still running
    pub fn active(&self) -> usize {
        lock(&self.tasks)
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Non-owning reference for tasks that spawn further tasks into this scope
    pub fn downgrade(&self) -> ScopeRef {
        ScopeRef {
            tasks: Arc::downgrade(&self.tasks),
        }
    }
}

/// Weak reference to a [`TaskScope`]; adopting into a dropped scope aborts the task.
#[derive(Debug, Clone)]
pub struct ScopeRef {
    tasks: Weak<Tasks>,
}

impl ScopeRef {
    pub fn adopt(&self, handle: TaskHandle) {
        if let Some(tasks) = self.tasks.upgrade() {
            let mut tasks = lock(&tasks);
            tasks.retain(|task| !task.is_finished());
            tasks.push(handle);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.tasks.strong_count() > 0
    }
}
