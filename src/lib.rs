//! # floem-hsv-dialog
//!
//! An HSV color picker dialog for [Floem](https://github.com/lapce/floem).
//!
//! A saturation/value plane, hue and alpha sliders, HSV/RGB/hex text fields,
//! new/old previews and a persistent list of recent colors. The dialog state
//! ([`ColorPicker`]) is toolkit-independent and can be driven directly; the
//! view layer only forwards input to it and paints what it holds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use floem_hsv_dialog::{color_picker, Color, ColorPicker, PickerConfig, RecentColors};
//!
//! let history = Rc::new(RefCell::new(RecentColors::in_memory()));
//! let picker = ColorPicker::new(Color::RED, PickerConfig::default(), history)
//!     .on_apply(|c| println!("picked {}", c.to_hex()));
//! // Use `color_picker(picker, || {})` in your Floem view tree.
//! ```

mod color;
mod config;
mod constants;
mod error;
mod history;
mod inputs;
mod interaction;
mod math;
mod model;
mod picker;
mod surface_view;
mod surfaces;
mod text_field;
mod view;

pub use color::Color;
pub use config::PickerConfig;
pub use error::{HistoryError, HistoryResult};
pub use history::{JsonFileStore, MemoryStore, RecentColorStore, RecentColors};
pub use interaction::{
    DragState, InteractionController, Markers, PointerButton, PointerInput, Response,
    SurfaceKind, SurfaceLayout,
};
pub use math::{hsv_to_rgb, rgb_to_hsv, rgb_to_hsv_keeping_hue};
pub use model::{ColorChange, ColorModel, Edit, EditOrigin, Hsv};
pub use picker::{ColorPicker, FieldId, SharedHistory};
pub use surfaces::{
    alpha_ramp, checkerboard, hue_ramp, saturation_value_plane, Bitmap, Regenerated, Revisions,
    Surfaces,
};
pub use text_field::{SyncOutcome, TextFieldBinding};

use std::sync::Once;

use floem::prelude::*;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the picker dialog view.
///
/// `on_close` runs after OK or Cancel; the picker's own `on_apply` callback
/// receives every applied color.
pub fn color_picker(picker: ColorPicker, on_close: impl Fn() + 'static) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    view::color_picker_view(picker, on_close)
}
