//! Scripted backend for tests and offline runs

use super::ComputeBackend;
use crate::core::machine::ComputationRequest;
use crate::core::{CalcError, CalcResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Script {
    responses: VecDeque<Result<f64, String>>,
    requests: Vec<ComputationRequest>,
}

/// Backend that answers from a queue of scripted responses.
///
/// Clones share the same script, so a test can keep one handle and hand
/// another to the session.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    script: Arc<Mutex<Script>>,
}

impl MockBackend {
    /// Empty script. Every request fails until responses are queued
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script that answers with `values` in order
    #[must_use]
    pub fn with_results(values: impl IntoIterator<Item = f64>) -> Self {
        let backend = Self::new();
        for value in values {
            backend.push_result(value);
        }
        backend
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a successful result
    pub fn push_result(&self, value: f64) {
        self.script().responses.push_back(Ok(value));
    }

    /// Queue a failure
    pub fn push_failure(&self, message: impl Into<String>) {
        self.script().responses.push_back(Err(message.into()));
    }

    /// Requests received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<ComputationRequest> {
        self.script().requests.clone()
    }

    /// Number of responses still queued
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script().responses.len()
    }
}

#[async_trait]
impl ComputeBackend for MockBackend {
    async fn compute(&self, request: &ComputationRequest) -> CalcResult<f64> {
        let mut script = self.script();
        script.requests.push(request.clone());
        match script.responses.pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(body)) => Err(CalcError::Api { status: 503, body }),
            None => Err(CalcError::MalformedResponse(format!(
                "no scripted response for {}",
                request.operation
            ))),
        }
    }
}
