//! Two-phase values for data that loads after the first render.

/// State of a secondary fetch as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredState<T, E> {
    /// Not settled yet; render the fallback.
    Pending,
    /// Settled successfully.
    Resolved(T),
    /// Settled with an error; render the inline error message.
    Failed(E),
}

impl<T, E> DeferredState<T, E> {
    /// Map the resolved value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DeferredState<U, E> {
        match self {
            Self::Pending => DeferredState::Pending,
            Self::Resolved(value) => DeferredState::Resolved(f(value)),
            Self::Failed(error) => DeferredState::Failed(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for DeferredState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Resolved(value),
            Err(error) => Self::Failed(error),
        }
    }
}

impl<T, E> Default for DeferredState<T, E> {
    fn default() -> Self {
        Self::Pending
    }
}
