/// Result type for the Tokio platform's setters
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Faults raised by [`TokioPlatform`](crate::TokioPlatform) setters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("no Tokio runtime is available to schedule '{0}'")]
    NoRuntime(&'static str),

    #[error("timer platform '{0}' has been shut down")]
    ShutDown(String),
}
