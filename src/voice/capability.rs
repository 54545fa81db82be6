//! Platform capability detection

/// Result of checking the platform for a speech capability
///
/// Checked once when an adapter is built and never re-queried.
#[derive(Debug)]
pub enum Capability<T> {
    /// The platform provides the capability through this handle
    Supported(T),
    /// The platform has no such capability
    Unsupported,
}

impl<T> Capability<T> {
    /// Wrap the outcome of a platform capability check
    #[must_use]
    pub fn detect(handle: Option<T>) -> Self {
        handle.map_or(Self::Unsupported, Self::Supported)
    }

    /// Check whether the capability is available
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }

    /// Borrow the handle if supported
    #[must_use]
    pub const fn handle(&self) -> Option<&T> {
        match self {
            Self::Supported(handle) => Some(handle),
            Self::Unsupported => None,
        }
    }

    /// Mutably borrow the handle if supported
    pub fn handle_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Supported(handle) => Some(handle),
            Self::Unsupported => None,
        }
    }
}
