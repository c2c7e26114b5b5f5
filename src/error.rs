/// Errors raised while binding routes.
///
/// These are setup mistakes and surface before any request is served.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// Locking is enabled but no locker was given and no process-wide
    /// default was installed.
    #[error("entity lock enabled without a locker and no default locker installed")]
    MissingDefaultLocker,
}
