//! Lifecycle of a controller's data.

/// Where a controller's data stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded,
    /// The last request failed; data was reset.
    Error,
}

impl LoadState {
    /// Returns true if the last request failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}
