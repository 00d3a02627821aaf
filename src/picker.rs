//! A picker session: one working color, its surfaces and fields, and the
//! apply/OK/cancel lifecycle.
//!
//! Every mutation follows the same path: an [`Edit`] goes into the model, the
//! resulting [`ColorChange`] refreshes the surfaces, then the text fields are
//! resynced, then (in auto-apply mode) the color is applied.

use std::cell::RefCell;
use std::rc::Rc;

use floem::kurbo::{Point, Rect, Size};

use crate::color::Color;
use crate::config::PickerConfig;
use crate::constants;
use crate::history::RecentColors;
use crate::interaction::{DragState, InteractionController, Markers, PointerInput, SurfaceLayout};
use crate::model::{ColorChange, ColorModel, Edit};
use crate::surfaces::Surfaces;
use crate::text_field::{SyncOutcome, TextFieldBinding};

/// Recent colors shared between the host and any open pickers.
pub type SharedHistory = Rc<RefCell<RecentColors>>;

/// The nine text fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Hue,
    Saturation,
    Value,
    HsvAlpha,
    Red,
    Green,
    Blue,
    RgbAlpha,
    Hex,
}

impl FieldId {
    pub const ALL: [FieldId; 9] = [
        FieldId::Hue,
        FieldId::Saturation,
        FieldId::Value,
        FieldId::HsvAlpha,
        FieldId::Red,
        FieldId::Green,
        FieldId::Blue,
        FieldId::RgbAlpha,
        FieldId::Hex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldId::Hue => "Hue",
            FieldId::Saturation => "Saturation",
            FieldId::Value => "Value",
            FieldId::HsvAlpha => "Alpha1",
            FieldId::Red => "Red",
            FieldId::Green => "Green",
            FieldId::Blue => "Blue",
            FieldId::RgbAlpha => "Alpha2",
            FieldId::Hex => "Hex",
        }
    }

    /// The channel a numeric field shows. `None` for the hex field.
    fn channel(self, model: &ColorModel) -> Option<f64> {
        Some(match self {
            FieldId::Hue => model.h(),
            FieldId::Saturation => model.s(),
            FieldId::Value => model.v(),
            FieldId::HsvAlpha | FieldId::RgbAlpha => model.a(),
            FieldId::Red => model.r(),
            FieldId::Green => model.g(),
            FieldId::Blue => model.b(),
            FieldId::Hex => return None,
        })
    }

    fn edit(self, value: f64) -> Option<Edit> {
        Some(match self {
            FieldId::Hue => Edit::Hue(value),
            FieldId::Saturation => Edit::Saturation(value),
            FieldId::Value => Edit::Value(value),
            FieldId::HsvAlpha | FieldId::RgbAlpha => Edit::Alpha(value),
            FieldId::Red => Edit::Red(value),
            FieldId::Green => Edit::Green(value),
            FieldId::Blue => Edit::Blue(value),
            FieldId::Hex => return None,
        })
    }
}

struct Fields {
    /// Numeric fields indexed by `FieldId::index`; the hex field is separate.
    channels: Vec<TextFieldBinding<f64>>,
    hex: TextFieldBinding<String>,
}

impl Fields {
    fn new(model: &ColorModel) -> Self {
        let channels = FieldId::ALL
            .iter()
            .filter_map(|id| id.channel(model))
            .map(TextFieldBinding::unit_float)
            .collect();
        Self {
            channels,
            hex: TextFieldBinding::hex(model.hex()),
        }
    }

    fn raw(&self, id: FieldId) -> &str {
        match id {
            FieldId::Hex => self.hex.raw(),
            _ => self.channels[id.index()].raw(),
        }
    }

    fn is_valid(&self, id: FieldId) -> bool {
        match id {
            FieldId::Hex => self.hex.is_valid(),
            _ => self.channels[id.index()].is_valid(),
        }
    }

    fn sync(&mut self, id: FieldId, raw: &str) -> Option<Edit> {
        match id {
            FieldId::Hex => match self.hex.sync(raw) {
                SyncOutcome::Committed(hex) => Some(Edit::Hex(hex)),
                _ => None,
            },
            _ => match self.channels[id.index()].sync(raw) {
                SyncOutcome::Committed(v) => id.edit(v),
                _ => None,
            },
        }
    }

    /// Show the model's values in every field but `skip`.
    fn refresh(&mut self, model: &ColorModel, skip: Option<FieldId>) {
        for id in FieldId::ALL {
            if Some(id) == skip {
                continue;
            }
            match id.channel(model) {
                Some(v) => self.channels[id.index()].set_value(v),
                None => self.hex.set_value(model.hex()),
            }
        }
    }
}

/// A color picker dialog's state, independent of any toolkit.
pub struct ColorPicker {
    config: PickerConfig,
    model: ColorModel,
    surfaces: Surfaces,
    controller: InteractionController,
    layout: SurfaceLayout,
    fields: Fields,
    focus: Option<FieldId>,
    history: SharedHistory,
    on_apply: Option<Box<dyn FnMut(Color)>>,
    initial_position: Option<Point>,
    open: bool,
}

impl ColorPicker {
    /// `history` is bounded to `config.history_capacity` from here on.
    pub fn new(initial: Color, config: PickerConfig, history: SharedHistory) -> Self {
        history.borrow_mut().set_capacity(config.history_capacity);
        let model = ColorModel::new(initial);
        Self {
            surfaces: Surfaces::new(config.picker_size, config.checker_block, &model),
            layout: SurfaceLayout::standard(&config),
            fields: Fields::new(&model),
            controller: InteractionController::new(),
            focus: None,
            history,
            on_apply: None,
            initial_position: None,
            open: true,
            config,
            model,
        }
    }

    /// Called with the committed color on every apply.
    pub fn on_apply(mut self, callback: impl FnMut(Color) + 'static) -> Self {
        self.on_apply = Some(Box::new(callback));
        self
    }

    /// Top-left corner of the dialog. Defaults to the screen center.
    pub fn at(mut self, position: Point) -> Self {
        self.initial_position = Some(position);
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn model(&self) -> &ColorModel {
        &self.model
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut Surfaces {
        &mut self.surfaces
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: SurfaceLayout) {
        self.layout = layout;
    }

    pub fn drag_state(&self) -> DragState {
        self.controller.state()
    }

    pub fn markers(&self) -> Markers {
        let size = self.config.picker_size as f64;
        Markers::new(&self.model, Size::new(size, size))
    }

    pub fn field_text(&self, id: FieldId) -> &str {
        self.fields.raw(id)
    }

    pub fn field_valid(&self, id: FieldId) -> bool {
        self.fields.is_valid(id)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply one edit made by code or by a non-text control.
    pub fn edit(&mut self, edit: Edit) -> Option<ColorChange> {
        self.apply_edit_from(edit, None)
    }

    /// Feed a field's post-edit text. Invalid text stays visible and changes nothing.
    pub fn input_text(&mut self, id: FieldId, raw: &str) -> Option<ColorChange> {
        if !self.open {
            return None;
        }
        let edit = self.fields.sync(id, raw)?;
        self.apply_edit_from(edit, Some(id))
    }

    /// Route pointer input over the stored layout. Returns whether it was consumed.
    pub fn pointer(&mut self, input: PointerInput) -> bool {
        let layout = self.layout;
        self.pointer_in(input, &layout)
    }

    /// Route pointer input over an explicit layout.
    pub fn pointer_in(&mut self, input: PointerInput, layout: &SurfaceLayout) -> bool {
        if !self.open {
            return false;
        }
        let response = self.controller.handle(input, layout, &self.model);
        if let Some(edit) = response.edit {
            self.edit(edit);
        }
        response.consumed
    }

    fn apply_edit_from(&mut self, edit: Edit, source: Option<FieldId>) -> Option<ColorChange> {
        if !self.open {
            return None;
        }
        let change = self.model.apply_edit(edit)?;
        self.surfaces.refresh(&change);
        self.fields.refresh(&self.model, source);
        if self.config.applies_immediately() {
            self.apply();
        }
        Some(change)
    }

    /// Commit the working color, remember it, and report it.
    pub fn apply(&mut self) -> Option<Color> {
        if !self.open {
            return None;
        }
        let color = self.model.commit();
        self.history.borrow_mut().add(color);
        log::info!("applied color {}", color.to_hex());
        if let Some(cb) = self.on_apply.as_mut() {
            cb(color);
        }
        Some(color)
    }

    /// OK: apply then close.
    pub fn accept(&mut self) -> Option<Color> {
        let color = self.apply();
        self.close();
        color
    }

    /// Close without applying; the working color is discarded.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.open = false;
        self.focus = None;
        self.controller = InteractionController::new();
    }

    /// Set the working color from pasted hex text. Every field, the hex field
    /// included, shows the result.
    pub fn paste_hex(&mut self, text: &str) -> Option<ColorChange> {
        self.edit(Edit::Hex(text.trim().to_owned()))
    }

    /// Set the working color back to the last committed one.
    pub fn revert_to_committed(&mut self) -> Option<ColorChange> {
        self.edit(Edit::Rgba(self.model.committed()))
    }

    /// Set the working color to recent color `index`.
    pub fn pick_recent(&mut self, index: usize) -> Option<ColorChange> {
        let color = self.history.borrow().get(index)?;
        self.edit(Edit::Rgba(color))
    }

    /// `(cols, rows, shown)` for a recent-color grid of `area`.
    pub fn recent_grid(&self, area: Size) -> (usize, usize, usize) {
        let cols = (area.width / constants::RECENT_SWATCH).floor().max(0.0) as usize;
        let rows = (area.height / constants::RECENT_SWATCH).floor().max(0.0) as usize;
        let shown = (cols * rows).min(self.history.borrow().count());
        (cols, rows, shown)
    }

    pub fn focus(&self) -> Option<FieldId> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<FieldId>) {
        self.focus = focus;
    }

    /// Tab / Shift+Tab between fields, wrapping around.
    pub fn cycle_focus(&mut self, reverse: bool) -> FieldId {
        let n = FieldId::ALL.len();
        let next = match (self.focus, reverse) {
            (None, false) => 0,
            (None, true) => n - 1,
            (Some(id), false) => (id.index() + 1) % n,
            (Some(id), true) => (id.index() + n - 1) % n,
        };
        let id = FieldId::ALL[next];
        self.focus = Some(id);
        id
    }

    /// Dialog rect on a screen of `screen` size, kept fully visible.
    pub fn placement(&self, screen: Size) -> Rect {
        let wanted = self.config.dialog_size();
        let size = Size::new(wanted.width.min(screen.width), wanted.height.min(screen.height));
        let pos = self.initial_position.unwrap_or_else(|| {
            Point::new(
                (screen.width - size.width) / 2.0,
                (screen.height - size.height) / 2.0,
            )
        });
        let x = pos.x.min(screen.width - size.width).max(0.0);
        let y = pos.y.min(screen.height - size.height).max(0.0);
        Rect::from_origin_size((x, y), size)
    }
}

impl std::fmt::Debug for ColorPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorPicker")
            .field("model", &self.model)
            .field("focus", &self.focus)
            .field("drag", &self.controller.state())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::interaction::PointerButton;

    fn history() -> SharedHistory {
        Rc::new(RefCell::new(RecentColors::in_memory()))
    }

    fn counting_picker(config: PickerConfig) -> (ColorPicker, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let picker = ColorPicker::new(Color::RED, config, history())
            .on_apply(move |_| counter.set(counter.get() + 1));
        (picker, calls)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn fields_start_from_initial_color() {
        let picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        assert_eq!(picker.field_text(FieldId::Hue), "0");
        assert_eq!(picker.field_text(FieldId::Saturation), "1");
        assert_eq!(picker.field_text(FieldId::Red), "1");
        assert_eq!(picker.field_text(FieldId::Green), "0");
        assert_eq!(picker.field_text(FieldId::Hex), "#FF0000FF");
    }

    #[test]
    fn dragging_the_plane_on_red() {
        let mut picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        let consumed = picker.pointer(PointerInput::Down {
            pos: Point::new(150.0, 0.0),
            button: PointerButton::Primary,
        });
        assert!(consumed);
        assert_eq!(picker.drag_state(), DragState::DraggingPlane);
        let m = picker.model();
        assert_eq!((m.h(), m.s(), m.v()), (0.0, 0.5, 1.0));
        assert!(approx(m.r(), 1.0) && approx(m.g(), 0.5) && approx(m.b(), 0.5));
        assert_eq!(m.a(), 1.0);
        assert_eq!(picker.field_text(FieldId::Green), "0.5");
        assert_eq!(picker.field_text(FieldId::Hex), "#FF8080FF");

        picker.pointer(PointerInput::Up {
            button: PointerButton::Primary,
        });
        assert_eq!(picker.drag_state(), DragState::Idle);
    }

    #[test]
    fn hex_entry_regenerates_hue_ramp_and_plane() {
        let mut picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        let before = picker.surfaces().revisions();
        picker.input_text(FieldId::Hex, "#00FF00FF").unwrap();

        let m = picker.model();
        assert_eq!(m.color(), Color::from_rgba(0.0, 1.0, 0.0, 1.0));
        assert!(approx(m.h(), 1.0 / 3.0));
        assert_eq!((m.s(), m.v()), (1.0, 1.0));

        let after = picker.surfaces().revisions();
        assert_eq!(after.hue, before.hue + 1);
        assert_eq!(after.plane, before.plane + 1);

        // Top-right of the plane is nearly pure green.
        let size = picker.config().picker_size;
        let px = picker.surfaces().plane().pixel(size - 1, size - 1);
        assert!(matches!(px, Some([r, g, b, 255]) if g > 250 && r < 5 && b < 5));
        assert_eq!(picker.field_text(FieldId::Hue), "0.33");
        assert_eq!(picker.field_text(FieldId::Red), "0");
    }

    #[test]
    fn typing_keeps_the_edited_field_text() {
        let mut picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        picker.input_text(FieldId::Saturation, "0.").unwrap();
        assert_eq!(picker.field_text(FieldId::Saturation), "0.");
        assert!(picker.input_text(FieldId::Saturation, "0.").is_none());
        picker.input_text(FieldId::Saturation, "0.5").unwrap();
        assert_eq!(picker.model().s(), 0.5);
        assert_eq!(picker.field_text(FieldId::Blue), "0.5");
    }

    #[test]
    fn invalid_text_changes_nothing() {
        let mut picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        assert!(picker.input_text(FieldId::Red, "2").is_none());
        assert_eq!(picker.field_text(FieldId::Red), "2");
        assert!(!picker.field_valid(FieldId::Red));
        assert!(picker.input_text(FieldId::Hex, "#12").is_none());
        assert_eq!(picker.model().color(), Color::RED);
    }

    #[test]
    fn no_commit_without_apply() {
        let (mut picker, calls) = counting_picker(PickerConfig::default());
        for v in [0.1, 0.2, 0.3, 0.4, 0.5] {
            picker.edit(Edit::Value(v)).unwrap();
        }
        picker.cancel();
        assert_eq!(calls.get(), 0);
        assert!(picker.history().borrow().is_empty());
        assert_eq!(picker.model().committed(), Color::RED);
        assert!(!picker.is_open());
        assert!(picker.edit(Edit::Value(1.0)).is_none());
    }

    #[test]
    fn apply_commits_and_remembers() {
        let (mut picker, calls) = counting_picker(PickerConfig::default());
        picker.edit(Edit::Blue(1.0)).unwrap();
        let applied = picker.apply().unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(picker.model().committed(), applied);
        assert_eq!(picker.history().borrow().get(0), Some(applied));

        let accepted = picker.accept();
        assert_eq!(accepted, Some(applied));
        assert_eq!(calls.get(), 2);
        assert!(!picker.is_open());
        assert!(picker.apply().is_none());
        assert_eq!(picker.history().borrow().count(), 1);
    }

    #[test]
    fn auto_apply_commits_every_change() {
        let config = PickerConfig {
            auto_apply: true,
            ..Default::default()
        };
        let (mut picker, calls) = counting_picker(config);
        picker.edit(Edit::Hue(0.5)).unwrap();
        picker.edit(Edit::Alpha(0.5)).unwrap();
        assert!(picker.edit(Edit::Alpha(0.5)).is_none());
        assert_eq!(calls.get(), 2);
        assert_eq!(picker.model().committed(), picker.model().color());
        assert_eq!(picker.history().borrow().count(), 2);
    }

    #[test]
    fn revert_and_recent_picks() {
        let mut picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        picker.history().borrow_mut().add(Color::BLACK);
        picker.edit(Edit::Hex("#0000FFFF".into())).unwrap();

        picker.revert_to_committed().unwrap();
        assert_eq!(picker.model().color(), Color::RED);

        picker.pick_recent(0).unwrap();
        assert_eq!(picker.model().color(), Color::BLACK);
        assert!(picker.pick_recent(5).is_none());
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        assert_eq!(picker.cycle_focus(false), FieldId::Hue);
        for _ in 0..8 {
            picker.cycle_focus(false);
        }
        assert_eq!(picker.focus(), Some(FieldId::Hex));
        assert_eq!(picker.cycle_focus(false), FieldId::Hue);
        assert_eq!(picker.cycle_focus(true), FieldId::Hex);
        picker.set_focus(None);
        assert_eq!(picker.cycle_focus(true), FieldId::Hex);
    }

    #[test]
    fn placement_is_centered_and_clamped() {
        let picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        let size = picker.config().dialog_size();
        let screen = Size::new(1920.0, 1080.0);
        let rect = picker.placement(screen);
        assert_eq!(rect.x0, (1920.0 - size.width) / 2.0);
        assert_eq!(rect.size(), size);

        let picker = picker.at(Point::new(1900.0, -40.0));
        let rect = picker.placement(screen);
        assert_eq!(rect.x1, 1920.0);
        assert_eq!(rect.y0, 0.0);

        let tiny = picker.placement(Size::new(200.0, 100.0));
        assert_eq!(tiny, Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn history_follows_configured_capacity() {
        let config = PickerConfig {
            history_capacity: 3,
            ..PickerConfig::default()
        };
        let mut picker = ColorPicker::new(Color::RED, config, history());
        for i in 1..=5u8 {
            picker.edit(Edit::Green(i as f64 / 10.0));
            picker.apply();
        }
        let recent = picker.history().borrow();
        assert_eq!(recent.capacity(), 3);
        assert_eq!(recent.count(), 3);
        assert_eq!(recent.get(0), Some(picker.model().committed()));
    }

    #[test]
    fn pasted_hex_updates_every_field() {
        let mut picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        assert!(picker.paste_hex("  #00ff00\n").is_some());
        assert_eq!(picker.model().color(), Color::from_rgba(0.0, 1.0, 0.0, 1.0));
        assert_eq!(picker.field_text(FieldId::Hex), "#00FF00FF");
        assert_eq!(picker.field_text(FieldId::Green), "1");
        assert!(picker.paste_hex("not a color").is_none());
        assert_eq!(picker.field_text(FieldId::Hex), "#00FF00FF");
    }

    #[test]
    fn recent_grid_shows_what_fits() {
        let picker = ColorPicker::new(Color::RED, PickerConfig::default(), history());
        for i in 0..5u8 {
            picker.history().borrow_mut().add(Color::from_rgba8(i, 0, 0, 255));
        }
        assert_eq!(picker.recent_grid(Size::new(180.0, 40.0)), (9, 2, 5));
        assert_eq!(picker.recent_grid(Size::new(40.0, 20.0)), (2, 1, 2));
    }
}
