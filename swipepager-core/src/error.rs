//! Page container errors.

use thiserror::Error;

/// Failures reported by a [`PageContainer`](crate::PageContainer).
///
/// The controller never propagates these to the host: the visual transport
/// is best effort, internal state always follows intent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The native view is gone (unmounted or not yet created).
    #[error("page container is detached")]
    Detached,

    /// The container refused the page.
    #[error("page {page} rejected: {reason}")]
    Rejected {
        /// Requested page.
        page: usize,
        /// Container-specific explanation.
        reason: String,
    },
}

/// Result alias for page container commands.
pub type Result<T> = std::result::Result<T, ContainerError>;
