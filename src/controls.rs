//! Hardware control snapshot consumed by the effects
//!
//! The pedal hardware exposes 6 potentiometers, 3 three-position toggle
//! switches, and 2 footswitches. Control reading happens outside the audio
//! path; the controller hands each effect a `ControlFrame` snapshot once per
//! processing block.

/// Number of potentiometers on the pedal
pub const KNOB_COUNT: usize = 6;
/// Number of toggle switches
pub const TOGGLE_COUNT: usize = 3;
/// Number of footswitches
pub const FOOTSWITCH_COUNT: usize = 2;

// Named knob slots. By convention knob 1 is the primary effect amount,
// knob 4 the output level and knob 6 the dry/wet mix.
pub const KNOB_1: usize = 0;
pub const KNOB_2: usize = 1;
pub const KNOB_3: usize = 2;
pub const KNOB_4: usize = 3;
pub const KNOB_5: usize = 4;
pub const KNOB_6: usize = 5;

pub const TOGGLE_1: usize = 0;
pub const TOGGLE_2: usize = 1;
pub const TOGGLE_3: usize = 2;

pub const FOOTSWITCH_1: usize = 0;
pub const FOOTSWITCH_2: usize = 1;

/// Position of an ON-OFF-ON toggle switch
///
/// `Unknown` covers ON-ON hardware with no readable middle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TogglePosition {
    Up,
    #[default]
    Middle,
    Down,
    Unknown,
}

/// Snapshot of every hardware control, taken once per processing block
#[derive(Debug, Clone)]
pub struct ControlFrame {
    /// Potentiometer values, each normalized to 0.0-1.0
    pub knobs: [f32; KNOB_COUNT],
    /// Toggle switch positions
    pub toggles: [TogglePosition; TOGGLE_COUNT],
    /// True for one frame when the footswitch was just pressed
    pub footswitch_edge: [bool; FOOTSWITCH_COUNT],
    /// Current held state of each footswitch
    pub footswitch_held: [bool; FOOTSWITCH_COUNT],
}

impl ControlFrame {
    /// Read a knob, clamped to the normalized 0.0-1.0 range.
    ///
    /// Effects rely on this invariant when rescaling to algorithm ranges
    /// (Hz, ms, ratios), so out-of-range hardware readings are clamped
    /// here rather than rejected.
    #[inline]
    pub fn knob(&self, index: usize) -> f32 {
        self.knobs[index].clamp(0.0, 1.0)
    }

    /// Read a toggle switch position.
    #[inline]
    pub fn toggle(&self, index: usize) -> TogglePosition {
        self.toggles[index]
    }
}

impl Default for ControlFrame {
    fn default() -> Self {
        Self {
            knobs: [0.5; KNOB_COUNT],
            toggles: [TogglePosition::Middle; TOGGLE_COUNT],
            footswitch_edge: [false; FOOTSWITCH_COUNT],
            footswitch_held: [false; FOOTSWITCH_COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame() {
        let frame = ControlFrame::default();
        assert_eq!(frame.knob(KNOB_1), 0.5);
        assert_eq!(frame.toggle(TOGGLE_1), TogglePosition::Middle);
        assert!(!frame.footswitch_edge[FOOTSWITCH_1]);
    }

    #[test]
    fn test_knob_clamping() {
        let mut frame = ControlFrame::default();
        frame.knobs[KNOB_2] = 1.7;
        frame.knobs[KNOB_3] = -0.2;
        assert_eq!(frame.knob(KNOB_2), 1.0);
        assert_eq!(frame.knob(KNOB_3), 0.0);
    }
}
