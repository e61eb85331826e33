// src/deferred.rs
//! Eagerly-started deferred computations.
//!
//! Every network-issuing link operation returns a [`Deferred`]: a unit of
//! work spawned onto the tokio runtime at construction, so the request is
//! already in flight before anyone awaits the result. Awaiting suspends only
//! if the work has not finished yet. Several operations can be kicked off
//! and synchronized on independently; no ordering holds between them.

use std::future::{Future, IntoFuture};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::error::HalError;

/// A unit of work that began executing when it was created.
///
/// Must be constructed inside a tokio runtime context. Dropping a `Deferred`
/// detaches the task rather than cancelling it.
#[derive(Debug)]
pub struct Deferred<T> {
    handle: JoinHandle<Result<T, HalError>>,
}

impl<T: Send + 'static> Deferred<T> {
    /// Spawns `work` immediately and hands back the pending result.
    pub(crate) fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = Result<T, HalError>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(work),
        }
    }

    /// Forces the deferred operation, waiting for its result if necessary.
    ///
    /// A cancelled or panicked task surfaces as [`HalError::Task`]; every
    /// other error is whatever the work itself produced, unchanged.
    pub async fn value(self) -> Result<T, HalError> {
        match self.handle.await {
            Ok(result) => result,
            Err(join_err) => Err(HalError::Task(join_err.to_string())),
        }
    }
}

impl<T: Send + 'static> IntoFuture for Deferred<T> {
    type Output = Result<T, HalError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        self.value().boxed()
    }
}
