//! Sizing, color, and styling constants for the picker.

/// Edge length of the saturation/value plane, and height of both sliders
pub const PICKER_SIZE: u32 = 300;

/// Width of the hue and alpha sliders
pub const SLIDER_WIDTH: u32 = 15;

/// Checkerboard block size (for alpha backgrounds)
pub const CHECKER_BLOCK: u32 = 10;

/// Edge length of the new/old preview swatches
pub const PREVIEW_SIZE: u32 = 90;

/// Edge length of a recent-color swatch
pub const RECENT_SWATCH: f64 = 20.0;

/// Most recent colors remembered
pub const RECENT_CAPACITY: usize = 20;

/// Gap between picker elements
pub const MARGIN: f64 = 6.0;

/// Handle square size on the plane and sliders
pub const HANDLE_SIZE: f64 = 10.0;

/// OK / Apply / Cancel button height
pub const BUTTON_HEIGHT: f32 = 30.0;

/// Text field height
pub const FIELD_HEIGHT: f32 = 24.0;

/// Input font size
pub const INPUT_FONT: f32 = 11.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

pub const CHECKER_LIGHT: [u8; 4] = [255, 255, 255, 255];
pub const CHECKER_DARK: [u8; 4] = [217, 217, 217, 255];

/// Padding around the whole dialog
pub const PADDING: f64 = 18.0;

/// Width of a numeric channel field
pub const INPUT_WIDTH: f32 = 36.0;

/// Width of the hex field
pub const HEX_INPUT_WIDTH: f32 = 84.0;

/// Checkerboard sizes kept by the surface cache
pub const CHECKER_CACHE: usize = 4;
