//! TensionObserver port - Interface for receiving context updates.
//!
//! Observers are invoked synchronously, in registration order, after every
//! recomputation of the context they subscribed to.

use crate::domain::context::TensionUpdate;

/// Error an observer may return. It is logged and never stops delivery to
/// the remaining observers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObserverError {
    #[error("Observer failed: {0}")]
    Failed(String),
}

impl ObserverError {
    pub fn failed(reason: impl Into<String>) -> Self {
        ObserverError::Failed(reason.into())
    }
}

/// Receiver of tension updates.
///
/// Implementations should be:
/// - **Quick** - Delivery is synchronous and blocks the recomputation cycle
/// - **Isolated** - Errors and panics are contained and logged
pub trait TensionObserver: Send + Sync {
    /// Handle one update.
    fn on_update(&self, update: &TensionUpdate) -> Result<(), ObserverError>;

    /// Observer name for logging.
    fn name(&self) -> &str;
}

/// Adapts a closure into a [`TensionObserver`].
pub struct FnObserver<F> {
    name: String,
    callback: F,
}

impl<F> FnObserver<F>
where
    F: Fn(&TensionUpdate) -> Result<(), ObserverError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }
}

impl<F> TensionObserver for FnObserver<F>
where
    F: Fn(&TensionUpdate) -> Result<(), ObserverError> + Send + Sync,
{
    fn on_update(&self, update: &TensionUpdate) -> Result<(), ObserverError> {
        (self.callback)(update)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
