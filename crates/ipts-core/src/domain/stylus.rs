//! Stylus samples decoded from payload frames.

/// Stylus state bitmask carried in every sample.
///
/// Bit layout:
/// - Bit 0: pen is in proximity of the screen
/// - Bit 1: pen tip touches the screen
/// - Bit 2: barrel button held
/// - Bit 3: eraser end in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StylusMode(pub u16);

impl StylusMode {
    pub const PROXIMITY: u16 = 1 << 0;
    pub const CONTACT: u16 = 1 << 1;
    pub const BUTTON: u16 = 1 << 2;
    pub const RUBBER: u16 = 1 << 3;

    pub fn proximity(&self) -> bool {
        self.0 & Self::PROXIMITY != 0
    }

    pub fn contact(&self) -> bool {
        self.0 & Self::CONTACT != 0
    }

    pub fn button(&self) -> bool {
        self.0 & Self::BUTTON != 0
    }

    pub fn rubber(&self) -> bool {
        self.0 & Self::RUBBER != 0
    }
}

/// One stylus position sample.
///
/// Older firmware (the v1 report layout) does not send `timestamp`,
/// `altitude` or `azimuth`; those are zero for v1 samples, and v1 pressure is
/// rescaled to the v2 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylusSample {
    pub timestamp: u16,
    pub mode: StylusMode,
    pub x: u16,
    pub y: u16,
    pub pressure: u16,
    pub altitude: u16,
    pub azimuth: u16,
}

/// All samples carried by one stylus report, tagged with the pen serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylusReport {
    /// Serial number of the pen that produced the samples.
    pub serial: u32,
    pub samples: Vec<StylusSample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags_decode_independently() {
        let mode = StylusMode(StylusMode::PROXIMITY | StylusMode::RUBBER);
        assert!(mode.proximity());
        assert!(!mode.contact());
        assert!(!mode.button());
        assert!(mode.rubber());
    }

    #[test]
    fn test_default_mode_has_no_flags() {
        let mode = StylusMode::default();
        assert!(!mode.proximity() && !mode.contact() && !mode.button() && !mode.rubber());
    }
}
