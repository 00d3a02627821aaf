//! Floem view for one picker surface: the plane, the hue slider or the alpha
//! slider.
//!
//! Paints the synthesized bitmap (over a checkerboard where alpha shows) and
//! the handle, and forwards pointer input to the shared [`ColorPicker`].

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use floem::kurbo::{Rect, Size, Stroke};
use floem::peniko::{self, Blob};
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    pointer::PointerButton as FloemButton,
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Color;
use crate::constants;
use crate::interaction::{Markers, PointerButton, PointerInput, SurfaceKind, SurfaceLayout};
use crate::picker::ColorPicker;
use crate::surfaces::Bitmap;

/// Convert a picker color to a paint color.
pub(crate) fn paint_color(c: Color) -> peniko::Color {
    peniko::Color::rgba(c.r(), c.g(), c.b(), c.a())
}

fn button(b: FloemButton) -> PointerButton {
    if b.is_primary() {
        PointerButton::Primary
    } else if b.is_secondary() {
        PointerButton::Secondary
    } else {
        PointerButton::Other
    }
}

/// An uploaded bitmap and the pixel buffer it came from, so a regenerated
/// surface gets a new image and an unchanged one is reused.
struct CachedImage {
    source: Arc<Vec<u8>>,
    img: peniko::Image,
    hash: Vec<u8>,
}

fn refresh_image(slot: &mut Option<CachedImage>, bitmap: &Bitmap) {
    if slot
        .as_ref()
        .is_some_and(|c| Arc::ptr_eq(&c.source, bitmap.data()))
    {
        return;
    }
    let blob = Blob::new(bitmap.data().clone());
    let hash = blob.id().to_le_bytes().to_vec();
    *slot = Some(CachedImage {
        source: bitmap.data().clone(),
        img: peniko::Image::new(blob, peniko::Format::Rgba8, bitmap.width(), bitmap.height()),
        hash,
    });
}

fn draw_cached(cx: &mut PaintCx, slot: &Option<CachedImage>, rect: Rect) {
    if let Some(cached) = slot {
        cx.draw_img(
            floem_renderer::Img {
                img: cached.img.clone(),
                hash: &cached.hash,
            },
            rect,
        );
    }
}

struct Repaint;

pub(crate) struct SurfaceView {
    id: ViewId,
    kind: SurfaceKind,
    picker: Rc<RefCell<ColorPicker>>,
    revision: RwSignal<u64>,
    size: floem::taffy::prelude::Size<f32>,
    image: Option<CachedImage>,
    backdrop: Option<CachedImage>,
}

/// Creates a surface view sized from the picker config.
///
/// `revision` is bumped by whoever changes the picker; this view bumps it
/// after pointer input that it consumed.
pub(crate) fn surface_view(
    kind: SurfaceKind,
    picker: Rc<RefCell<ColorPicker>>,
    revision: RwSignal<u64>,
) -> SurfaceView {
    let id = ViewId::new();

    create_effect(move |_| {
        revision.get();
        id.update_state(Repaint);
    });

    let (width, height) = {
        let config = picker.borrow().config().clone();
        let size = config.picker_size as f32;
        match kind {
            SurfaceKind::Plane => (size, size),
            _ => (config.slider_width as f32, size),
        }
    };

    SurfaceView {
        id,
        kind,
        picker,
        revision,
        size: Default::default(),
        image: None,
        backdrop: None,
    }
    .style(move |s| {
        s.width(width)
            .height(height)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl SurfaceView {
    fn local_layout(&self) -> SurfaceLayout {
        let rect = Rect::new(0.0, 0.0, self.size.width as f64, self.size.height as f64);
        SurfaceLayout::single(self.kind, rect)
    }

    fn forward(&mut self, input: PointerInput) -> EventPropagation {
        let layout = self.local_layout();
        let consumed = self.picker.borrow_mut().pointer_in(input, &layout);
        if consumed {
            self.revision.update(|r| *r += 1);
            EventPropagation::Stop
        } else {
            EventPropagation::Continue
        }
    }
}

impl View for SurfaceView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if state.downcast::<Repaint>().is_ok() {
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.forward(PointerInput::Down {
                    pos: e.pos,
                    button: button(e.button),
                })
            }
            Event::PointerMove(e) => self.forward(PointerInput::Move { pos: e.pos }),
            Event::PointerUp(e) => self.forward(PointerInput::Up {
                button: button(e.button),
            }),
            Event::PointerWheel(e) => self.forward(PointerInput::Wheel {
                pos: e.pos,
                delta_y: e.delta.y,
            }),
            Event::FocusLost | Event::WindowLostFocus => self.forward(PointerInput::FocusLost),
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);

        let (color, markers) = {
            let mut picker = self.picker.borrow_mut();
            if self.kind != SurfaceKind::HueSlider {
                let checker = picker
                    .surfaces_mut()
                    .checkerboard(w.round() as u32, h.round() as u32);
                refresh_image(&mut self.backdrop, &checker);
            }
            let surfaces = picker.surfaces();
            let bitmap = match self.kind {
                SurfaceKind::Plane => surfaces.plane(),
                SurfaceKind::HueSlider => surfaces.hue(),
                SurfaceKind::AlphaSlider => surfaces.alpha(),
            };
            refresh_image(&mut self.image, bitmap);
            let model = picker.model();
            (model.color(), Markers::new(model, Size::new(w, h)))
        };

        if self.kind != SurfaceKind::HueSlider {
            draw_cached(cx, &self.backdrop, rect);
        }
        draw_cached(cx, &self.image, rect);

        let half = constants::HANDLE_SIZE / 2.0;
        let handle = match self.kind {
            SurfaceKind::Plane => Rect::from_center_size(
                markers.plane,
                (constants::HANDLE_SIZE, constants::HANDLE_SIZE),
            ),
            SurfaceKind::HueSlider => Rect::new(-3.0, markers.hue - half, w + 3.0, markers.hue + half),
            SurfaceKind::AlphaSlider => {
                Rect::new(-3.0, markers.alpha - half, w + 3.0, markers.alpha + half)
            }
        };
        cx.fill(&handle, paint_color(color), 0.0);
        cx.stroke(&handle, peniko::Color::rgb8(128, 128, 128), &Stroke::new(1.0));
    }
}
