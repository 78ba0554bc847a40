//! World-layer error types.

/// Errors surfaced by [`crate::World`] registration and lookup.
///
/// All of these indicate startup wiring bugs, not recoverable runtime
/// conditions: a caller that requests a specific manager or system
/// assumes it was registered before the simulation loop started.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No manager of the requested concrete type was ever registered.
    #[error("no manager of type `{0}` registered")]
    ManagerNotFound(&'static str),

    /// No system of the requested concrete type was ever registered.
    #[error("no system of type `{0}` registered")]
    SystemNotFound(&'static str),

    /// A manager of this concrete type is already registered.
    #[error("a manager of type `{0}` is already registered")]
    DuplicateManager(&'static str),

    /// A system of this concrete type is already registered.
    #[error("a system of type `{0}` is already registered")]
    DuplicateSystem(&'static str),
}
