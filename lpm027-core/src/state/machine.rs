//! Power state definition
//!
//! All control-line behaviour of the display controller is a function of
//! the current state and an event.

use super::events::PowerEvent;

/// Display power states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Lines not yet driven, or power-up failed
    #[default]
    Uninitialized,
    /// Power-up sequence (settle, enable, all-clear) in progress
    Initializing,
    /// Panel enabled and showing the frame buffer
    Active,
    /// Display-enable low; refreshes still run
    Blanked,
    /// Detached; display disabled, lines left in a safe state
    Off,
}

impl PowerState {
    /// Check if the panel is electrically enabled
    pub fn is_display_enabled(&self) -> bool {
        matches!(self, PowerState::Active)
    }

    /// Check if the attach sequence has completed
    pub fn is_attached(&self) -> bool {
        matches!(self, PowerState::Active | PowerState::Blanked)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: PowerEvent) -> Self {
        use PowerEvent::*;
        use PowerState::*;

        match (self, event) {
            // Teardown wins from everywhere
            (_, Detach) => Off,

            // Attach sequence
            (Uninitialized, BeginInit) => Initializing,
            (Initializing, InitComplete) => Active,
            (Initializing, InitFailed) => Uninitialized,

            // Blanking
            (Active, Blank) => Blanked,
            (Active, Unblank) => Active,
            (Blanked, Unblank) => Active,
            (Blanked, Blank) => Blanked,

            // Default: stay in current state
            _ => self,
        }
    }
}
