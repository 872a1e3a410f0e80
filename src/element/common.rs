// Common constants for all element types
pub const MIN_ELEMENT_SIZE: i32 = 6;
pub const HANDLE_SIZE: i32 = 8;
pub const DISPLAY_PADDING: i32 = 12;
pub const SELECTION_MARGIN: i32 = 3;
pub const ROTATE_STEP_DEGREES: i32 = 15;

/// Largest coordinate magnitude accepted from typed or pasted text. The
/// target library stores coordinates as `int16_t`.
pub const COORDINATE_LIMIT: i32 = i16::MAX as i32;

pub fn in_coordinate_range(value: i32) -> bool {
    (-COORDINATE_LIMIT..=COORDINATE_LIMIT).contains(&value)
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Works in `i64` so that adding two extreme deltas never overflows.
pub fn normalize_rotation(degrees: i64) -> i32 {
    degrees.rem_euclid(360) as i32
}

/// Integer division that truncates toward zero, matching the arithmetic the
/// target graphics library performs on `int16_t` coordinates.
pub(crate) fn half(value: i32) -> i32 {
    value / 2
}
