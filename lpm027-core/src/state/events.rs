//! Events that trigger power state transitions

/// Events that can trigger power state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerEvent {
    // Attach sequence
    /// Control lines acquired, power-up sequence starting
    BeginInit,
    /// All-clear sent and settled
    InitComplete,
    /// A line or bus operation failed during power-up
    InitFailed,

    // Graphics layer requests
    /// Blank request (any blank level other than unblank)
    Blank,
    /// Unblank request
    Unblank,

    // Teardown
    /// Device is being detached
    Detach,
}
