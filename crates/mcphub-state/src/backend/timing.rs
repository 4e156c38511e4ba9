// Timed invoker decorator
// Wraps another Invoker and, while debug mode is on, records command name,
// duration, success flag, serialized args and error text through the debug
// relay. The inner call's result is never altered.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;

use super::{BackendResult, Invoker};
use crate::stores::debug::DebugStore;

pub struct TimedInvoker {
    inner: Arc<dyn Invoker>,
    relay: DebugStore,
}

impl TimedInvoker {
    /// `relay` must be built on the undecorated invoker, otherwise its own
    /// log writes would be timed and logged again.
    pub fn new(inner: Arc<dyn Invoker>, relay: DebugStore) -> Self {
        Self { inner, relay }
    }
}

#[async_trait]
impl Invoker for TimedInvoker {
    async fn invoke(&self, command: &str, args: Value) -> BackendResult<Value> {
        let started = Instant::now();
        let result = self.inner.invoke(command, args.clone()).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        if self.relay.is_enabled().await {
            let relay = self.relay.clone();
            let command = command.to_string();
            let logged_args = if args.is_null() { None } else { Some(args) };
            let error = result.as_ref().err().map(|e| e.to_string());
            let success = result.is_ok();

            // Detached write, the caller never waits on the log entry
            tokio::spawn(async move {
                relay
                    .log_invoke(&command, duration_ms, success, logged_args, error)
                    .await;
            });
        }

        result
    }
}
