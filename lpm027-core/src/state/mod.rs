//! Display power state machine
//!
//! The state is explicit, finite and deterministic. Only the display
//! controller feeds it events; the refresh path reads it but never
//! gates on it.

pub mod events;
pub mod machine;

pub use events::PowerEvent;
pub use machine::PowerState;
