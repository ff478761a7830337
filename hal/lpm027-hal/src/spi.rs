//! Serial bus abstractions
//!
//! The panel only listens: every transaction is a blocking write of a
//! byte sequence. Chip-select is driven separately through
//! [`ControlLines`](crate::gpio::ControlLines) because the panel's SCS is
//! active high and must bracket several writes.

use embedded_hal::spi::SpiBus;

/// Blocking transmit-only serial channel
pub trait SerialTransport {
    /// Error type for bus operations
    type Error;

    /// Transmit all of `data`, returning once the last bit has been clocked out
    fn transmit(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// [`SerialTransport`] over an `embedded-hal` SPI bus
///
/// Writes and then flushes, so a returned `Ok` means the bytes are on the
/// wire and chip-select may be released.
pub struct SpiTransport<B> {
    bus: B,
}

impl<B: SpiBus> SpiTransport<B> {
    /// Wrap a configured SPI bus (see [`SpiConfig`] for the settings the panel needs)
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the underlying bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: SpiBus> SerialTransport for SpiTransport<B> {
    type Error = B::Error;

    fn transmit(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        self.bus.flush()
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
    /// Bits per transfer word
    pub bits_per_word: u8,
}

impl SpiConfig {
    /// Settings the LPM027M128C is driven with: 1 MHz, mode 0, 8-bit words
    pub const PANEL: SpiConfig = SpiConfig {
        frequency: 1_000_000,
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
        bits_per_word: 8,
    };

    /// SPI mode for this polarity/phase combination
    pub fn mode(&self) -> Mode {
        Mode::from((self.polarity, self.phase))
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::PANEL
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

impl From<(Polarity, Phase)> for Mode {
    fn from((polarity, phase): (Polarity, Phase)) -> Self {
        match (polarity, phase) {
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
            (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
            (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
        }
    }
}

impl From<Mode> for embedded_hal::spi::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => embedded_hal::spi::MODE_0,
            Mode::Mode1 => embedded_hal::spi::MODE_1,
            Mode::Mode2 => embedded_hal::spi::MODE_2,
            Mode::Mode3 => embedded_hal::spi::MODE_3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Mock SPI bus recording written bytes
    struct RecordingBus {
        bytes: [u8; 16],
        len: usize,
        flushes: usize,
    }

    impl RecordingBus {
        fn new() -> Self {
            Self {
                bytes: [0; 16],
                len: 0,
                flushes: 0,
            }
        }
    }

    impl embedded_hal::spi::ErrorType for RecordingBus {
        type Error = Infallible;
    }

    impl SpiBus for RecordingBus {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.bytes[self.len..self.len + words.len()].copy_from_slice(words);
            self.len += words.len();
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.write(write)
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_transmit_writes_then_flushes() {
        let mut transport = SpiTransport::new(RecordingBus::new());
        transport.transmit(&[0x08]).unwrap();
        transport.transmit(&[0x01, 0x00, 0x02]).unwrap();

        let bus = transport.release();
        assert_eq!(&bus.bytes[..bus.len], &[0x08, 0x01, 0x00, 0x02]);
        assert_eq!(bus.flushes, 2);
    }

    #[test]
    fn test_panel_config() {
        let config = SpiConfig::default();
        assert_eq!(config.frequency, 1_000_000);
        assert_eq!(config.bits_per_word, 8);
        assert_eq!(config.mode(), Mode::Mode0);
        assert_eq!(
            embedded_hal::spi::Mode::from(config.mode()),
            embedded_hal::spi::MODE_0
        );
    }

    #[test]
    fn test_mode_roundtrip() {
        for mode in [Mode::Mode0, Mode::Mode1, Mode::Mode2, Mode::Mode3] {
            let parts: (Polarity, Phase) = mode.into();
            assert_eq!(Mode::from(parts), mode);
        }
    }
}
