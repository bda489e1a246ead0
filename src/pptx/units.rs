//! Length units used by PresentationML.
//!
//! All positions and sizes are expressed in EMUs (English Metric Units).

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// Default slide width (10 inches, 4:3).
pub const DEFAULT_SLIDE_WIDTH: i64 = 10 * EMU_PER_INCH;

/// Default slide height (7.5 inches, 4:3).
pub const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// Convert inches to EMUs.
pub const fn inches(value: i64) -> i64 {
    value * EMU_PER_INCH
}

/// Convert points to EMUs.
pub const fn points(value: i64) -> i64 {
    value * EMU_PER_POINT
}

/// A positioned frame on a slide, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Rect {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    pub fn right(&self) -> i64 {
        self.x + self.cx
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.cy
    }
}
