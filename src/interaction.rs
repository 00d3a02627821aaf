//! Pointer, drag and scroll handling over the plane and sliders.
//!
//! The controller remembers which surface is being dragged between frames and
//! turns pointer positions into [`Edit`]s. It never touches the model itself.

use floem::kurbo::{Point, Rect, Size};

use crate::config::PickerConfig;
use crate::constants;
use crate::model::{ColorModel, Edit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingPlane,
    DraggingHueSlider,
    DraggingAlphaSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Plane,
    HueSlider,
    AlphaSlider,
}

impl SurfaceKind {
    fn drag_state(self) -> DragState {
        match self {
            SurfaceKind::Plane => DragState::DraggingPlane,
            SurfaceKind::HueSlider => DragState::DraggingHueSlider,
            SurfaceKind::AlphaSlider => DragState::DraggingAlphaSlider,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// Raw input as reported by the host, in the same space as [`SurfaceLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { pos: Point, button: PointerButton },
    Move { pos: Point },
    Up { button: PointerButton },
    /// Positive `delta_y` scrolls down.
    Wheel { pos: Point, delta_y: f64 },
    /// The picker lost input focus; any drag ends.
    FocusLost,
}

/// Where each surface sits. A `None` surface is not interactive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceLayout {
    pub plane: Option<Rect>,
    pub hue: Option<Rect>,
    pub alpha: Option<Rect>,
}

impl SurfaceLayout {
    /// Plane at the origin, hue slider then alpha slider to its right.
    pub fn standard(config: &PickerConfig) -> Self {
        let size = config.picker_size as f64;
        let slider = config.slider_width as f64;
        let hue_x = size + constants::MARGIN;
        let alpha_x = hue_x + slider + constants::MARGIN;
        Self {
            plane: Some(Rect::new(0.0, 0.0, size, size)),
            hue: Some(Rect::new(hue_x, 0.0, hue_x + slider, size)),
            alpha: Some(Rect::new(alpha_x, 0.0, alpha_x + slider, size)),
        }
    }

    /// Only `kind` is present, at `rect`.
    pub fn single(kind: SurfaceKind, rect: Rect) -> Self {
        let mut layout = Self::default();
        match kind {
            SurfaceKind::Plane => layout.plane = Some(rect),
            SurfaceKind::HueSlider => layout.hue = Some(rect),
            SurfaceKind::AlphaSlider => layout.alpha = Some(rect),
        }
        layout
    }

    pub fn rect(&self, kind: SurfaceKind) -> Option<Rect> {
        match kind {
            SurfaceKind::Plane => self.plane,
            SurfaceKind::HueSlider => self.hue,
            SurfaceKind::AlphaSlider => self.alpha,
        }
    }

    /// Surface under `pos`, if any.
    pub fn hit(&self, pos: Point) -> Option<SurfaceKind> {
        [
            SurfaceKind::Plane,
            SurfaceKind::HueSlider,
            SurfaceKind::AlphaSlider,
        ]
        .into_iter()
        .find(|&kind| self.rect(kind).is_some_and(|r| r.contains(pos)))
    }
}

/// What the controller made of one input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub edit: Option<Edit>,
    /// The input was used and should not reach enclosing views.
    pub consumed: bool,
}

impl Response {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed(edit: Option<Edit>) -> Self {
        Self {
            edit,
            consumed: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn handle(
        &mut self,
        input: PointerInput,
        layout: &SurfaceLayout,
        model: &ColorModel,
    ) -> Response {
        match input {
            PointerInput::Down { pos, button } => {
                if self.state != DragState::Idle || button != PointerButton::Primary {
                    return Response::ignored();
                }
                let Some(kind) = layout.hit(pos) else {
                    return Response::ignored();
                };
                self.state = kind.drag_state();
                Response::consumed(self.sample(kind, pos, layout))
            }
            PointerInput::Move { pos } => match self.dragging() {
                Some(kind) => Response::consumed(self.sample(kind, pos, layout)),
                None => Response::ignored(),
            },
            PointerInput::Up { .. } | PointerInput::FocusLost => {
                let was_dragging = self.state != DragState::Idle;
                self.state = DragState::Idle;
                Response {
                    edit: None,
                    consumed: was_dragging,
                }
            }
            PointerInput::Wheel { pos, delta_y } => {
                let kind = match layout.hit(pos) {
                    Some(kind @ (SurfaceKind::HueSlider | SurfaceKind::AlphaSlider)) => kind,
                    _ => return Response::ignored(),
                };
                let Some(rect) = layout.rect(kind).filter(|r| r.height() > 0.0) else {
                    return Response::ignored();
                };
                let step = delta_y / rect.height();
                let edit = match kind {
                    SurfaceKind::HueSlider => Edit::Hue(model.h() - step),
                    _ => Edit::Alpha(model.a() - step),
                };
                Response::consumed(Some(edit))
            }
        }
    }

    fn dragging(&self) -> Option<SurfaceKind> {
        match self.state {
            DragState::Idle => None,
            DragState::DraggingPlane => Some(SurfaceKind::Plane),
            DragState::DraggingHueSlider => Some(SurfaceKind::HueSlider),
            DragState::DraggingAlphaSlider => Some(SurfaceKind::AlphaSlider),
        }
    }

    /// Map a position to the dragged surface's channel(s), clamped to its bounds.
    fn sample(&self, kind: SurfaceKind, pos: Point, layout: &SurfaceLayout) -> Option<Edit> {
        let rect = layout.rect(kind)?;
        let (w, h) = (rect.width(), rect.height());
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        let x = (pos.x - rect.x0).clamp(0.0, w);
        let y = (pos.y - rect.y0).clamp(0.0, h);
        Some(match kind {
            // y grows downward; value grows upward.
            SurfaceKind::Plane => Edit::SaturationValue(x / w, 1.0 - y / h),
            SurfaceKind::HueSlider => Edit::Hue(1.0 - y / h),
            SurfaceKind::AlphaSlider => Edit::Alpha(1.0 - y / h),
        })
    }
}

/// Handle offsets within each surface, for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Markers {
    pub plane: Point,
    pub hue: f64,
    pub alpha: f64,
}

impl Markers {
    /// Offsets for a plane of `size`; sliders share its height.
    pub fn new(model: &ColorModel, size: Size) -> Self {
        Self {
            plane: Point::new(model.s() * size.width, (1.0 - model.v()) * size.height),
            hue: (1.0 - model.h()) * size.height,
            alpha: (1.0 - model.a()) * size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn layout() -> SurfaceLayout {
        SurfaceLayout::standard(&PickerConfig::default())
    }

    fn down(x: f64, y: f64) -> PointerInput {
        PointerInput::Down {
            pos: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    #[test]
    fn starts_idle() {
        assert_eq!(InteractionController::new().state(), DragState::Idle);
    }

    #[test]
    fn plane_drag_maps_to_saturation_and_value() {
        let model = ColorModel::new(Color::RED);
        let mut ctl = InteractionController::new();
        let r = ctl.handle(down(150.0, 0.0), &layout(), &model);
        assert_eq!(ctl.state(), DragState::DraggingPlane);
        assert!(r.consumed);
        assert_eq!(r.edit, Some(Edit::SaturationValue(0.5, 1.0)));

        let r = ctl.handle(
            PointerInput::Move {
                pos: Point::new(75.0, 225.0),
            },
            &layout(),
            &model,
        );
        assert_eq!(r.edit, Some(Edit::SaturationValue(0.25, 0.25)));
    }

    #[test]
    fn drag_outside_is_clamped() {
        let model = ColorModel::new(Color::RED);
        let mut ctl = InteractionController::new();
        ctl.handle(down(10.0, 10.0), &layout(), &model);
        let r = ctl.handle(
            PointerInput::Move {
                pos: Point::new(-50.0, 900.0),
            },
            &layout(),
            &model,
        );
        assert_eq!(r.edit, Some(Edit::SaturationValue(0.0, 0.0)));
    }

    #[test]
    fn slider_drags() {
        let model = ColorModel::new(Color::RED);
        let l = layout();
        let hue = l.hue.unwrap();
        let alpha = l.alpha.unwrap();

        let mut ctl = InteractionController::new();
        let r = ctl.handle(down(hue.x0 + 1.0, 75.0), &l, &model);
        assert_eq!(ctl.state(), DragState::DraggingHueSlider);
        assert_eq!(r.edit, Some(Edit::Hue(0.75)));
        ctl.handle(PointerInput::Up { button: PointerButton::Primary }, &l, &model);

        let r = ctl.handle(down(alpha.x0 + 1.0, 150.0), &l, &model);
        assert_eq!(ctl.state(), DragState::DraggingAlphaSlider);
        assert_eq!(r.edit, Some(Edit::Alpha(0.5)));
        let r = ctl.handle(
            PointerInput::Move {
                pos: Point::new(alpha.x0 + 1.0, 400.0),
            },
            &l,
            &model,
        );
        assert_eq!(r.edit, Some(Edit::Alpha(0.0)));
    }

    #[test]
    fn any_button_up_ends_drag() {
        let model = ColorModel::new(Color::RED);
        let mut ctl = InteractionController::new();
        ctl.handle(down(1.0, 1.0), &layout(), &model);
        let r = ctl.handle(
            PointerInput::Up {
                button: PointerButton::Secondary,
            },
            &layout(),
            &model,
        );
        assert!(r.consumed);
        assert_eq!(ctl.state(), DragState::Idle);

        // Moves after release do nothing.
        let r = ctl.handle(
            PointerInput::Move {
                pos: Point::new(5.0, 5.0),
            },
            &layout(),
            &model,
        );
        assert_eq!(r, Response::default());
    }

    #[test]
    fn focus_lost_ends_drag() {
        let model = ColorModel::new(Color::RED);
        let mut ctl = InteractionController::new();
        ctl.handle(down(1.0, 1.0), &layout(), &model);
        ctl.handle(PointerInput::FocusLost, &layout(), &model);
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test]
    fn secondary_button_and_empty_space_do_not_start_drags() {
        let model = ColorModel::new(Color::RED);
        let mut ctl = InteractionController::new();
        let r = ctl.handle(
            PointerInput::Down {
                pos: Point::new(1.0, 1.0),
                button: PointerButton::Secondary,
            },
            &layout(),
            &model,
        );
        assert!(!r.consumed);
        let r = ctl.handle(down(1000.0, 1.0), &layout(), &model);
        assert!(!r.consumed);
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test]
    fn non_interactive_surface_is_skipped() {
        let model = ColorModel::new(Color::RED);
        let mut l = layout();
        l.alpha = None;
        let mut ctl = InteractionController::new();
        let x = layout().alpha.unwrap().x0 + 1.0;
        assert!(!ctl.handle(down(x, 10.0), &l, &model).consumed);
    }

    #[test]
    fn wheel_nudges_sliders_in_any_state() {
        let mut model = ColorModel::new(Color::RED);
        model.apply_edit(Edit::Hue(0.5)).unwrap();
        let l = layout();
        let mut ctl = InteractionController::new();
        ctl.handle(down(1.0, 1.0), &l, &model);

        let hue = l.hue.unwrap();
        let r = ctl.handle(
            PointerInput::Wheel {
                pos: Point::new(hue.x0 + 1.0, 10.0),
                delta_y: 30.0,
            },
            &l,
            &model,
        );
        assert!(r.consumed);
        assert_eq!(r.edit, Some(Edit::Hue(0.5 - 0.1)));
        assert_eq!(ctl.state(), DragState::DraggingPlane);

        let alpha = l.alpha.unwrap();
        let r = ctl.handle(
            PointerInput::Wheel {
                pos: Point::new(alpha.x0 + 1.0, 10.0),
                delta_y: -3.0,
            },
            &l,
            &model,
        );
        assert_eq!(r.edit, Some(Edit::Alpha(1.0 + 0.01)));
    }

    #[test]
    fn wheel_over_plane_passes_through() {
        let model = ColorModel::new(Color::RED);
        let mut ctl = InteractionController::new();
        let r = ctl.handle(
            PointerInput::Wheel {
                pos: Point::new(10.0, 10.0),
                delta_y: 3.0,
            },
            &layout(),
            &model,
        );
        assert_eq!(r, Response::default());
    }

    #[test]
    fn markers_track_the_model() {
        let mut model = ColorModel::new(Color::RED.with_alpha(0.25));
        model.apply_edit(Edit::SaturationValue(0.5, 0.75)).unwrap();
        let m = Markers::new(&model, Size::new(300.0, 300.0));
        assert_eq!(m.plane, Point::new(150.0, 75.0));
        assert_eq!(m.hue, 300.0);
        assert_eq!(m.alpha, 225.0);
    }
}
