//! Text fields and buttons for the picker dialog.

use std::cell::RefCell;
use std::rc::Rc;

use floem::event::EventPropagation;
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::ViewId;

use crate::constants;
use crate::picker::{ColorPicker, FieldId};

/// View ids of the nine fields, for Tab navigation.
pub(crate) type FocusIds = Rc<RefCell<[Option<ViewId>; 9]>>;

/// A text input bound to one of the picker's fields.
///
/// Every keystroke is fed to the picker; text that does not validate stays
/// on screen with a red border and changes nothing.
pub(crate) fn field_input(
    field: FieldId,
    picker: Rc<RefCell<ColorPicker>>,
    revision: RwSignal<u64>,
    focus_ids: FocusIds,
) -> impl IntoView {
    let text = RwSignal::new(picker.borrow().field_text(field).to_string());

    // Picker → text (model-side changes)
    {
        let picker = picker.clone();
        create_effect(move |_| {
            revision.get();
            let shown = picker.borrow().field_text(field).to_string();
            if text.get_untracked() != shown {
                text.set(shown);
            }
        });
    }

    // Text → picker (user edits)
    {
        let picker = picker.clone();
        create_effect(move |_| {
            let raw = text.get();
            let changed = picker.borrow_mut().input_text(field, &raw).is_some();
            if changed {
                revision.update(|r| *r += 1);
            }
        });
    }

    let input = text_input(text);
    focus_ids.borrow_mut()[field.index()] = Some(input.id());

    let width = if field == FieldId::Hex {
        constants::HEX_INPUT_WIDTH
    } else {
        constants::INPUT_WIDTH
    };

    let style_picker = picker.clone();
    let focus_picker = picker.clone();
    input
        .style(move |s| {
            text.get();
            let border = if style_picker.borrow().field_valid(field) {
                Color::rgb8(200, 200, 200)
            } else {
                Color::rgb8(220, 60, 60)
            };
            s.width(width)
                .height(constants::FIELD_HEIGHT)
                .padding(2.0)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .background(Color::WHITE)
                .border(1.0)
                .border_color(border)
                .border_radius(3.0)
        })
        .on_event_cont(floem::event::EventListener::FocusGained, {
            let picker = focus_picker.clone();
            move |_| picker.borrow_mut().set_focus(Some(field))
        })
        .on_event_cont(floem::event::EventListener::FocusLost, move |_| {
            let mut picker = focus_picker.borrow_mut();
            if picker.focus() == Some(field) {
                picker.set_focus(None);
            }
        })
        .on_event(floem::event::EventListener::KeyDown, move |e| {
            if let floem::event::Event::KeyDown(ke) = e {
                if ke.key.logical_key == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Tab)
                {
                    let reverse = ke.modifiers.shift();
                    let next = picker.borrow_mut().cycle_focus(reverse);
                    if let Some(id) = focus_ids.borrow()[next.index()] {
                        id.request_focus();
                    }
                    return EventPropagation::Stop;
                }
            }
            EventPropagation::Continue
        })
}

/// A small grey caption.
pub(crate) fn caption(text: &'static str) -> impl IntoView {
    label(move || text).style(|s| {
        s.width(constants::INPUT_WIDTH)
            .font_size(constants::LABEL_FONT)
            .color(Color::rgb8(120, 120, 120))
    })
}

/// A text button that runs `on_press` on release.
pub(crate) fn action_button(text: &'static str, on_press: impl Fn() + 'static) -> impl IntoView {
    container(label(move || text).style(|s| s.font_size(constants::INPUT_FONT)))
        .style(|s| {
            s.height(constants::BUTTON_HEIGHT)
                .flex_grow(1.0)
                .items_center()
                .justify_center()
                .border(1.0)
                .border_color(Color::rgb8(180, 180, 180))
                .border_radius(3.0)
                .background(Color::WHITE)
                .cursor(floem::style::CursorStyle::Pointer)
                .hover(|s| s.background(Color::rgb8(230, 230, 230)))
        })
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            on_press();
        })
}

/// A square button showing a lucide glyph; darkens while held.
pub(crate) fn icon_button(
    icon: lucide_icons::Icon,
    on_press: impl Fn() + 'static,
) -> impl IntoView {
    let held = RwSignal::new(false);
    let glyph = icon.unicode().to_string();
    label(move || glyph.clone())
        .style(move |s| {
            let tone = if held.get() { 80 } else { 120 };
            s.size(constants::FIELD_HEIGHT, constants::FIELD_HEIGHT)
                .items_center()
                .justify_center()
                .font_size(14.0)
                .font_family("lucide".to_string())
                .color(Color::rgb8(tone, tone, tone))
                .border_radius(3.0)
                .cursor(floem::style::CursorStyle::Pointer)
                .hover(|s| s.background(Color::rgb8(230, 230, 230)))
        })
        .on_event_stop(floem::event::EventListener::PointerDown, move |_| {
            held.set(true);
        })
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            held.set(false);
            on_press();
        })
}

pub(crate) fn copy_to_clipboard(text: &str) {
    let result = arboard::Clipboard::new().and_then(|mut c| c.set_text(text));
    match result {
        Ok(()) => log::debug!("copied {text} to clipboard"),
        Err(e) => log::warn!("Failed to copy to clipboard: {e}"),
    }
}

/// Current clipboard text, if there is any.
pub(crate) fn clipboard_text() -> Option<String> {
    arboard::Clipboard::new()
        .and_then(|mut c| c.get_text())
        .map_err(|e| log::warn!("Failed to read clipboard: {e}"))
        .ok()
}
