//! Picker settings that a host may load from JSON.

use floem::kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Plane edge length and slider height, in pixels
    pub picker_size: u32,
    pub slider_width: u32,
    pub checker_block: u32,
    pub preview_size: u32,
    pub history_capacity: usize,
    /// Apply on every working-color change instead of waiting for OK/Apply
    pub auto_apply: bool,
    /// Compact picker without buttons; always applies immediately
    pub minimalistic: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            picker_size: constants::PICKER_SIZE,
            slider_width: constants::SLIDER_WIDTH,
            checker_block: constants::CHECKER_BLOCK,
            preview_size: constants::PREVIEW_SIZE,
            history_capacity: constants::RECENT_CAPACITY,
            auto_apply: false,
            minimalistic: false,
        }
    }
}

impl PickerConfig {
    /// Parse overrides; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn applies_immediately(&self) -> bool {
        self.auto_apply || self.minimalistic
    }

    /// Size of the dialog content: plane, two sliders, two previews.
    pub fn dialog_size(&self) -> Size {
        let picker = self.picker_size as f64;
        Size::new(
            picker
                + 3.0 * constants::MARGIN
                + 2.0 * self.slider_width as f64
                + 2.0 * self.preview_size as f64
                + 2.0 * constants::PADDING,
            picker + 2.0 * constants::PADDING,
        )
    }
}
