//! Control-line abstractions
//!
//! The panel has four discrete inputs besides the serial bus. They are
//! only ever driven, never read back.

use embedded_hal::digital::{OutputPin, PinState};

/// The panel's discrete control inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    /// SCS: frames one serial transaction (active high)
    ChipSelect,
    /// EXTCOMIN: external COM inversion clock
    ComInversionInput,
    /// DISP: display on/off
    DisplayEnable,
    /// EXTMODE: selects serial (low) or external (high) COM inversion
    ComInversionModeSelect,
}

impl ControlLine {
    /// All lines, in the order they are acquired at attach
    pub const ALL: [ControlLine; 4] = [
        ControlLine::ChipSelect,
        ControlLine::ComInversionInput,
        ControlLine::DisplayEnable,
        ControlLine::ComInversionModeSelect,
    ];
}

/// Set of named control lines
///
/// Implementations drive the physical signal. Setting a line may block
/// (e.g. lines behind an I/O expander) and may fail.
pub trait ControlLines {
    /// Error type for line operations
    type Error;

    /// Drive `line` to the given level (`true` = high)
    fn set(&mut self, line: ControlLine, high: bool) -> Result<(), Self::Error>;

    /// Drive `line` high
    fn set_high(&mut self, line: ControlLine) -> Result<(), Self::Error> {
        self.set(line, true)
    }

    /// Drive `line` low
    fn set_low(&mut self, line: ControlLine) -> Result<(), Self::Error> {
        self.set(line, false)
    }
}

/// Control lines backed by four `embedded-hal` output pins
///
/// All four pins share one type, which is what chip HALs give you for
/// type-erased outputs (`Output<'d>`, `AnyPin`, ...).
pub struct PanelPins<P> {
    /// SCS
    pub chip_select: P,
    /// EXTCOMIN
    pub com_inversion_input: P,
    /// DISP
    pub display_enable: P,
    /// EXTMODE
    pub com_inversion_mode_select: P,
}

impl<P: OutputPin> PanelPins<P> {
    /// Bundle the four pins
    pub fn new(
        chip_select: P,
        com_inversion_input: P,
        display_enable: P,
        com_inversion_mode_select: P,
    ) -> Self {
        Self {
            chip_select,
            com_inversion_input,
            display_enable,
            com_inversion_mode_select,
        }
    }

    fn pin(&mut self, line: ControlLine) -> &mut P {
        match line {
            ControlLine::ChipSelect => &mut self.chip_select,
            ControlLine::ComInversionInput => &mut self.com_inversion_input,
            ControlLine::DisplayEnable => &mut self.display_enable,
            ControlLine::ComInversionModeSelect => &mut self.com_inversion_mode_select,
        }
    }
}

impl<P: OutputPin> ControlLines for PanelPins<P> {
    type Error = P::Error;

    fn set(&mut self, line: ControlLine, high: bool) -> Result<(), Self::Error> {
        self.pin(line).set_state(PinState::from(high))
    }
}
