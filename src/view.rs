//! The dialog: plane and sliders on the left; previews, recent colors,
//! fields and buttons on the right.

use std::cell::RefCell;
use std::rc::Rc;

use floem::event::EventPropagation;
use floem::kurbo::Size;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};

use crate::constants;
use crate::inputs::{
    action_button, caption, clipboard_text, copy_to_clipboard, field_input, icon_button, FocusIds,
};
use crate::interaction::SurfaceKind;
use crate::picker::{ColorPicker, FieldId};
use crate::surface_view::{paint_color, surface_view};

type Shared = Rc<RefCell<ColorPicker>>;

/// Builds the dialog for `picker`. `on_close` runs once OK or Cancel closes it.
pub fn color_picker_view(picker: ColorPicker, on_close: impl Fn() + 'static) -> impl IntoView {
    let config = picker.config().clone();
    let picker: Shared = Rc::new(RefCell::new(picker));
    let revision = RwSignal::new(0_u64);
    let on_close: Rc<dyn Fn()> = Rc::new(on_close);

    let surfaces = h_stack((
        surface_view(SurfaceKind::Plane, picker.clone(), revision),
        surface_view(SurfaceKind::HueSlider, picker.clone(), revision),
        surface_view(SurfaceKind::AlphaSlider, picker.clone(), revision),
    ))
    .style(|s| s.gap(constants::MARGIN));

    let mut side = vec![
        previews(picker.clone(), revision, config.preview_size as f32).into_any(),
        recent_grid(picker.clone(), revision, config.preview_size as f64).into_any(),
        fields(picker.clone(), revision).into_any(),
    ];
    if !config.minimalistic {
        side.push(buttons(picker.clone(), revision, on_close.clone()).into_any());
    }
    let side = v_stack_from_iter(side).style(|s| s.gap(constants::MARGIN));

    let key_picker = picker.clone();
    h_stack((surfaces, side))
        .style(|s| {
            s.padding(constants::PADDING)
                .gap(constants::MARGIN)
                .background(Color::rgb8(245, 245, 245))
        })
        .keyboard_navigable()
        .on_event(floem::event::EventListener::KeyDown, move |e| {
            if let floem::event::Event::KeyDown(ke) = e {
                if ke.key.logical_key
                    == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
                {
                    let applied = {
                        let mut p = key_picker.borrow_mut();
                        p.focus().is_none() && p.apply().is_some()
                    };
                    if applied {
                        revision.update(|r| *r += 1);
                        return EventPropagation::Stop;
                    }
                }
            }
            EventPropagation::Continue
        })
}

fn swatch(color: crate::Color, size: f32) -> impl IntoView {
    empty().style(move |s| {
        s.size(size, size)
            .background(paint_color(color))
            .border(1.0)
            .border_color(Color::rgb8(180, 180, 180))
    })
}

fn previews(picker: Shared, revision: RwSignal<u64>, size: f32) -> impl IntoView {
    let working = {
        let picker = picker.clone();
        dyn_container(
            move || {
                revision.get();
                picker.borrow().model().color()
            },
            move |c| swatch(c, size),
        )
    };
    let committed = {
        let picker = picker.clone();
        dyn_container(
            move || {
                revision.get();
                picker.borrow().model().committed()
            },
            move |c| swatch(c, size),
        )
    }
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        let changed = picker.borrow_mut().revert_to_committed().is_some();
        if changed {
            revision.update(|r| *r += 1);
        }
    });

    h_stack((
        v_stack((caption("New"), working)),
        v_stack((caption("Old"), committed)),
    ))
}

fn recent_grid(picker: Shared, revision: RwSignal<u64>, preview: f64) -> impl IntoView {
    let area = Size::new(2.0 * preview, 3.0 * constants::RECENT_SWATCH);
    let cell = constants::RECENT_SWATCH as f32;
    dyn_container(
        {
            let picker = picker.clone();
            move || {
                revision.get();
                let p = picker.borrow();
                let (cols, _rows, shown) = p.recent_grid(area);
                let colors: Vec<_> = p.history().borrow().iter().take(shown).collect();
                (cols.max(1), colors)
            }
        },
        move |(cols, colors)| {
            let rows = colors.chunks(cols).enumerate().map(|(row, chunk)| {
                let cells = chunk.iter().enumerate().map(|(col, color)| {
                    let index = row * cols + col;
                    let picker = picker.clone();
                    swatch(*color, cell).on_event_stop(
                        floem::event::EventListener::PointerUp,
                        move |_| {
                            let changed = picker.borrow_mut().pick_recent(index).is_some();
                            if changed {
                                revision.update(|r| *r += 1);
                            }
                        },
                    )
                });
                h_stack_from_iter(cells.collect::<Vec<_>>())
            });
            v_stack_from_iter(rows.collect::<Vec<_>>())
        },
    )
    .style(move |s| s.width(area.width).height(area.height))
}

fn field_row(
    picker: &Shared,
    revision: RwSignal<u64>,
    focus_ids: &FocusIds,
    ids: &[FieldId],
    names: &'static [&'static str],
) -> impl IntoView {
    let inputs = ids
        .iter()
        .map(|id| field_input(*id, picker.clone(), revision, focus_ids.clone()).into_any());
    let labels = names.iter().map(|name| caption(*name).into_any());
    v_stack((
        h_stack_from_iter(inputs.collect::<Vec<_>>()).style(|s| s.gap(2.0)),
        h_stack_from_iter(labels.collect::<Vec<_>>()).style(|s| s.gap(2.0)),
    ))
}

fn fields(picker: Shared, revision: RwSignal<u64>) -> impl IntoView {
    let focus_ids: FocusIds = Rc::new(RefCell::new([None; 9]));
    let hsv = field_row(
        &picker,
        revision,
        &focus_ids,
        &FieldId::ALL[0..4],
        &["H", "S", "V", "A"],
    );
    let rgb = field_row(
        &picker,
        revision,
        &focus_ids,
        &FieldId::ALL[4..8],
        &["R", "G", "B", "A"],
    );
    let copy = {
        let picker = picker.clone();
        icon_button(lucide_icons::Icon::Copy, move || {
            let hex = picker.borrow().model().hex();
            copy_to_clipboard(&hex);
        })
    };
    let paste = {
        let picker = picker.clone();
        icon_button(lucide_icons::Icon::ClipboardPaste, move || {
            let Some(text) = clipboard_text() else {
                return;
            };
            let changed = picker.borrow_mut().paste_hex(&text).is_some();
            if changed {
                revision.update(|r| *r += 1);
            }
        })
    };
    let hex = h_stack((
        field_input(FieldId::Hex, picker, revision, focus_ids),
        copy,
        paste,
    ))
    .style(|s| s.items_center().gap(4.0));

    v_stack((hsv, rgb, hex)).style(|s| s.gap(4.0))
}

fn buttons(picker: Shared, revision: RwSignal<u64>, on_close: Rc<dyn Fn()>) -> impl IntoView {
    let ok = {
        let picker = picker.clone();
        let on_close = on_close.clone();
        action_button("OK", move || {
            picker.borrow_mut().accept();
            revision.update(|r| *r += 1);
            on_close();
        })
    };
    let apply = {
        let picker = picker.clone();
        action_button("Apply", move || {
            let applied = picker.borrow_mut().apply().is_some();
            if applied {
                revision.update(|r| *r += 1);
            }
        })
    };
    let cancel = action_button("Cancel", move || {
        picker.borrow_mut().cancel();
        on_close();
    });
    h_stack((apply, cancel, ok)).style(|s| s.gap(4.0).width_full())
}
