//! Scripted in-process backend.
//!
//! Replies are scripted as JSON so every call goes through the same decoding
//! as the HTTP client. Gates hold a call open until the test releases it,
//! which is how tests force a specific completion order.

use async_trait::async_trait;
use serde_json::Value;
use smartinvo_backend::{Backend, Operation, Result, ServiceError, decode_body};
use smartinvo_types::{
    HealthStatus, ModelInfo, RecommendationRequest, RecommendationResult, ShelfLifeResult,
    TransformationStep, WasteStatEntry, WeatherReport,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

type ScriptKey = (Operation, Option<String>);

#[derive(Debug, Clone)]
enum Script {
    Reply(Value),
    Fail(ServiceError),
}

/// One call received by the stub
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: Operation,
    /// City, item or other single argument
    pub arg: Option<String>,
    /// JSON body for operations that send one
    pub body: Option<Value>,
}

/// Holds matching calls open until [`Gate::open`] is called
#[derive(Debug, Clone)]
pub struct Gate {
    tx: Arc<watch::Sender<bool>>,
}

impl Gate {
    fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn open(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // Sender lives in self, so wait_for can't fail.
        let _ = rx.wait_for(|open| *open).await;
    }
}

#[derive(Default)]
struct StubState {
    scripts: HashMap<ScriptKey, Script>,
    gates: HashMap<ScriptKey, Gate>,
    calls: Vec<RecordedCall>,
}

/// In-process [`Backend`] with scripted replies.
///
/// Lookup order for a call is `(operation, arg)` then `(operation, None)`.
/// Unscripted calls fail with [`ServiceError::Unavailable`].
#[derive(Default)]
pub struct StubBackend {
    state: Mutex<StubState>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reply to every call of `operation` with `body`
    pub fn respond(&self, operation: Operation, body: Value) -> &Self {
        self.lock()
            .scripts
            .insert((operation, None), Script::Reply(body));
        self
    }

    /// Reply to calls of `operation` whose argument is `arg`
    pub fn respond_for(&self, operation: Operation, arg: &str, body: Value) -> &Self {
        self.lock()
            .scripts
            .insert((operation, Some(arg.to_string())), Script::Reply(body));
        self
    }

    pub fn fail(&self, operation: Operation, error: ServiceError) -> &Self {
        self.lock()
            .scripts
            .insert((operation, None), Script::Fail(error));
        self
    }

    pub fn fail_for(&self, operation: Operation, arg: &str, error: ServiceError) -> &Self {
        self.lock()
            .scripts
            .insert((operation, Some(arg.to_string())), Script::Fail(error));
        self
    }

    /// Fail every call of `operation` with an HTTP status and upstream message
    pub fn fail_status(&self, operation: Operation, status: u16, message: &str) -> &Self {
        self.fail(
            operation,
            ServiceError::Status {
                operation,
                status,
                message: message.to_string(),
            },
        )
    }

    /// Hold calls of `operation` (optionally only those for `arg`) until the gate opens
    pub fn gate(&self, operation: Operation, arg: Option<&str>) -> Gate {
        let gate = Gate::new();
        self.lock()
            .gates
            .insert((operation, arg.map(str::to_string)), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn calls_for(&self, operation: Operation) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls_for(operation).len()
    }

    pub fn total_calls(&self) -> usize {
        self.lock().calls.len()
    }

    async fn call(&self, operation: Operation, arg: Option<&str>, body: Option<Value>) -> Result<Value> {
        let gate = {
            let mut state = self.lock();
            state.calls.push(RecordedCall {
                operation,
                arg: arg.map(str::to_string),
                body,
            });
            let keyed = (operation, arg.map(str::to_string));
            state
                .gates
                .get(&keyed)
                .or_else(|| state.gates.get(&(operation, None)))
                .cloned()
        };

        if let Some(gate) = gate {
            gate.wait().await;
        }

        // Resolve after the gate so a test can re-script while a call is held.
        let script = {
            let state = self.lock();
            let keyed = (operation, arg.map(str::to_string));
            state
                .scripts
                .get(&keyed)
                .or_else(|| state.scripts.get(&(operation, None)))
                .cloned()
        };

        match script {
            Some(Script::Reply(value)) => Ok(value),
            Some(Script::Fail(error)) => Err(error),
            None => Err(ServiceError::Unavailable { operation }),
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        operation: Operation,
        arg: Option<&str>,
        body: Option<Value>,
    ) -> Result<T> {
        let value = self.call(operation, arg, body).await?;
        let bytes = serde_json::to_vec(&value).map_err(|e| ServiceError::Decode {
            operation,
            message: e.to_string(),
        })?;
        decode_body(operation, &bytes)
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResult> {
        let body = serde_json::to_value(request).ok();
        self.fetch(Operation::Recommend, Some(request.item()), body)
            .await
    }

    async fn shelf_life(&self, item: &str) -> Result<ShelfLifeResult> {
        self.fetch(Operation::ShelfLife, Some(item), None).await
    }

    async fn global_waste(&self) -> Result<Vec<WasteStatEntry>> {
        self.fetch(Operation::GlobalWaste, None, None).await
    }

    async fn global_waste_steps(&self) -> Result<Vec<TransformationStep>> {
        self.fetch(Operation::GlobalWasteSteps, None, None).await
    }

    async fn store_spoiled(&self, city: &str) -> Result<Vec<WasteStatEntry>> {
        self.fetch(Operation::StoreSpoiled, Some(city), None).await
    }

    async fn delete_store_spoiled(&self, city: &str, item: &str) -> Result<()> {
        let body = serde_json::json!({"city": city, "item": item});
        self.call(Operation::DeleteStoreSpoiled, Some(city), Some(body))
            .await?;
        Ok(())
    }

    async fn model_info(&self) -> Result<ModelInfo> {
        self.fetch(Operation::ModelInfo, None, None).await
    }

    async fn weather(&self, city: &str) -> Result<WeatherReport> {
        self.fetch(Operation::Weather, Some(city), None).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.fetch(Operation::Health, None, None).await
    }
}
