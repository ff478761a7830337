//! Full-frame refresh
//!
//! The panel cannot take partial updates from the frame buffer's point of
//! view, so every redraw walks all scan lines top to bottom. The caller
//! must hold the device's serialisation lock for the whole walk.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use lpm027_core::{FailurePolicy, PanelConfig};
use lpm027_fb::FrameBuffer;
use lpm027_hal::{ControlLines, SerialTransport};
use lpm027_protocol::{HEIGHT, WIDTH};

use crate::controller::Controller;
use crate::error::Error;

/// Failed line numbers kept in a [`RefreshReport`]
pub const MAX_REPORTED_FAILURES: usize = 16;

/// Outcome of one full-frame refresh
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshReport {
    /// Lines transferred successfully
    pub lines_sent: u16,
    /// Lines whose transfer failed
    pub lines_failed: u16,
    /// The first failed line numbers, in order
    pub failed_lines: Vec<u16, MAX_REPORTED_FAILURES>,
}

impl RefreshReport {
    /// Check if every line reached the panel
    pub fn is_complete(&self) -> bool {
        self.lines_failed == 0
    }
}

/// Redraw the whole panel from `fb`
///
/// Lines go out in increasing order, each followed by the configured
/// inter-line delay. Under [`FailurePolicy::FailFast`] the first failed
/// line ends the refresh with its error; under
/// [`FailurePolicy::BestEffort`] failures are counted and the walk goes on.
pub fn refresh_frame<T, L, D>(
    ctl: &mut Controller<T, L, D>,
    fb: &FrameBuffer,
    config: &PanelConfig,
) -> Result<RefreshReport, Error<T::Error, L::Error>>
where
    T: SerialTransport,
    L: ControlLines,
    D: DelayNs,
{
    let mut report = RefreshReport::default();
    let mut row = [0u32; WIDTH];

    for line in 0..HEIGHT {
        fb.load_row(line, &mut row);

        match ctl.send_line(line, &row) {
            Ok(()) => report.lines_sent += 1,
            Err(e) => {
                warn!("line {} transfer failed", line);
                if config.failure_policy == FailurePolicy::FailFast {
                    return Err(e);
                }
                report.lines_failed += 1;
                // Only the first few are kept
                let _ = report.failed_lines.push(line as u16);
            }
        }

        ctl.delay_us(config.timing.line_delay_us);
    }

    trace!(
        "refresh done: {} sent, {} failed",
        report.lines_sent,
        report.lines_failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{hardware, BusFault, Event, Log, MockDelay, MockLines, MockTransport};
    use lpm027_core::Timing;
    use lpm027_hal::ControlLine;
    use lpm027_protocol::LINE_FRAME_LEN;

    fn active(log: &Log, transport: MockTransport) -> Controller<MockTransport, MockLines, MockDelay> {
        let (_, lines, delay) = hardware(log);
        let mut ctl = Controller::new(transport, lines, delay);
        ctl.init(&Timing::default()).unwrap();
        log.clear();
        ctl
    }

    /// Fail the header of `line`
    fn fail_line(line: u8) -> impl Fn(usize, &[u8]) -> bool + Send {
        move |_, bytes| bytes.len() == 7 && bytes[6] == line
    }

    #[test]
    fn test_full_frame_traffic() {
        let log = Log::default();
        let mut ctl = active(&log, MockTransport::new(log.clone()));
        let fb = FrameBuffer::try_new().unwrap();

        let report = refresh_frame(&mut ctl, &fb, &PanelConfig::default()).unwrap();
        assert_eq!(report.lines_sent, 240);
        assert!(report.is_complete());

        // CS high, header, payload, CS low, delay; per line
        let events = log.events();
        assert_eq!(events.len(), 240 * 5);
        for (line, chunk) in events.chunks(5).enumerate() {
            assert_eq!(chunk[0], Event::Line(ControlLine::ChipSelect, true));
            assert_eq!(chunk[3], Event::Line(ControlLine::ChipSelect, false));
            assert_eq!(chunk[4], Event::DelayUs(50));

            let (Event::Transmit(header), Event::Transmit(payload)) = (&chunk[1], &chunk[2]) else {
                panic!("expected header and payload for line {line}");
            };
            assert_eq!(header[5..], [(line >> 8) as u8, line as u8]);
            assert_eq!(header.len() + payload.len(), LINE_FRAME_LEN);
        }
    }

    #[test]
    fn test_refresh_is_repeatable() {
        let log = Log::default();
        let mut ctl = active(&log, MockTransport::new(log.clone()));
        let fb = FrameBuffer::try_new().unwrap();
        fb.set_pixel(17, 42, 0x00FF_00FF);

        refresh_frame(&mut ctl, &fb, &PanelConfig::default()).unwrap();
        let first = log.events();
        log.clear();
        refresh_frame(&mut ctl, &fb, &PanelConfig::default()).unwrap();

        assert_eq!(log.events(), first);
    }

    #[test]
    fn test_refresh_while_blanked() {
        let log = Log::default();
        let mut ctl = active(&log, MockTransport::new(log.clone()));
        ctl.blank().unwrap();
        log.clear();

        let fb = FrameBuffer::try_new().unwrap();
        let report = refresh_frame(&mut ctl, &fb, &PanelConfig::default()).unwrap();
        assert_eq!(report.lines_sent, 240);
        assert_eq!(log.cs_asserts(), 240);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let log = Log::default();
        let mut ctl = active(&log, MockTransport::failing(log.clone(), fail_line(5)));
        let fb = FrameBuffer::try_new().unwrap();
        let config = PanelConfig::with_failure_policy(FailurePolicy::FailFast);

        assert_eq!(
            refresh_frame(&mut ctl, &fb, &config),
            Err(Error::Transport(BusFault))
        );
        assert_eq!(log.cs_asserts(), 6);
        assert_eq!(
            log.events().last(),
            Some(&Event::Line(ControlLine::ChipSelect, false))
        );
    }

    #[test]
    fn test_best_effort_sends_everything() {
        let log = Log::default();
        let mut ctl = active(&log, MockTransport::failing(log.clone(), fail_line(5)));
        let fb = FrameBuffer::try_new().unwrap();

        let report = refresh_frame(&mut ctl, &fb, &PanelConfig::default()).unwrap();
        assert_eq!(report.lines_sent, 239);
        assert_eq!(report.lines_failed, 1);
        assert_eq!(report.failed_lines, [5]);
        assert!(!report.is_complete());
        assert_eq!(log.cs_asserts(), 240);
    }

    #[test]
    fn test_best_effort_report_capacity() {
        let log = Log::default();
        // Every line header fails; the all-clear at init still goes out
        let mut ctl = active(
            &log,
            MockTransport::failing(log.clone(), |_, bytes| bytes.len() == 7),
        );
        let fb = FrameBuffer::try_new().unwrap();

        let report = refresh_frame(&mut ctl, &fb, &PanelConfig::default()).unwrap();
        assert_eq!(report.lines_sent, 0);
        assert_eq!(report.lines_failed, 240);
        assert_eq!(report.failed_lines.len(), MAX_REPORTED_FAILURES);
        assert_eq!(report.failed_lines[15], 15);
    }
}
