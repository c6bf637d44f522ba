//! Remote computation seam
//!
//! The state machine never does arithmetic itself. It hands a
//! [`ComputationRequest`] to a [`ComputeBackend`]; the [`Dispatcher`] turns
//! every failure into an absent result so callers only ever see
//! `Some(value)` or `None`.

#[cfg(feature = "http")]
mod http;
mod mock;

#[cfg(feature = "http")]
pub use http::{ComputeResponse, HttpBackend};
pub use mock::MockBackend;

use crate::core::machine::ComputationRequest;
use crate::core::CalcResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Something that evaluates a [`ComputationRequest`]
#[async_trait]
pub trait ComputeBackend: Send + Sync {
    /// Evaluate one request
    async fn compute(&self, request: &ComputationRequest) -> CalcResult<f64>;
}

#[async_trait]
impl<B: ComputeBackend + ?Sized> ComputeBackend for Arc<B> {
    async fn compute(&self, request: &ComputationRequest) -> CalcResult<f64> {
        (**self).compute(request).await
    }
}

#[async_trait]
impl<B: ComputeBackend + ?Sized> ComputeBackend for Box<B> {
    async fn compute(&self, request: &ComputationRequest) -> CalcResult<f64> {
        (**self).compute(request).await
    }
}

/// Issues requests and swallows failures
#[derive(Debug, Clone)]
pub struct Dispatcher<B> {
    backend: B,
}

impl<B: ComputeBackend> Dispatcher<B> {
    /// Wraps a backend
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the wrapped backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Sends one request. Transport and server failures come back as `None`
    pub async fn dispatch(&self, request: &ComputationRequest) -> Option<f64> {
        tracing::debug!(
            operation = %request.operation,
            operand_1 = %request.operand_1,
            operand_2 = ?request.operand_2,
            "dispatching computation"
        );
        match self.backend.compute(request).await {
            Ok(value) => {
                tracing::debug!(operation = %request.operation, value, "computation returned");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(operation = %request.operation, error = %e, "computation failed");
                None
            }
        }
    }
}
