//! Service-level errors.

use studio_core::error::CoreError;
use studio_core::lifecycle::TransitionRejected;
use thiserror::Error;

use crate::ports::{GatewayError, StoreError};

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Domain rule violated (not found, invalid input, rejected transition,
    /// bad client token).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<TransitionRejected> for LifecycleError {
    fn from(err: TransitionRejected) -> Self {
        LifecycleError::Core(err.into())
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
