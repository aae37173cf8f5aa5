//! Single-finger contacts reported through the HID report path.

/// Largest coordinate value a single-touch report can carry on either axis.
pub const SINGLETOUCH_MAX_VALUE: u16 = 32767;

/// A single-touch contact in device coordinates (`0..=SINGLETOUCH_MAX_VALUE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleTouch {
    /// `true` while a finger is on the screen.
    pub touching: bool,
    pub x: u16,
    pub y: u16,
}
