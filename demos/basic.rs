//! Standalone demo: opens a window with the color picker dialog.
//!
//! Recent colors persist under the user's config directory. Set
//! `RUST_LOG=debug` to trace every edit.

use std::cell::RefCell;
use std::rc::Rc;

use floem::views::Decorators;
use floem::window::WindowConfig;
use floem_hsv_dialog::{
    color_picker, Color, ColorPicker, JsonFileStore, PickerConfig, RecentColors,
};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1).map(std::fs::read_to_string) {
        Some(Ok(json)) => PickerConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring bad config: {e}");
            PickerConfig::default()
        }),
        Some(Err(e)) => {
            log::warn!("Could not read config: {e}");
            PickerConfig::default()
        }
        None => PickerConfig::default(),
    };

    let history = match JsonFileStore::default_location() {
        Ok(store) => {
            log::info!("Recent colors at {}", store.path().display());
            RecentColors::new(store)
        }
        Err(e) => {
            log::warn!("Recent colors will not persist: {e}");
            RecentColors::in_memory()
        }
    };
    let history = Rc::new(RefCell::new(history));

    let initial = Color::from_hex("#3B82F6").unwrap_or(Color::WHITE);
    let size = config.dialog_size();
    let picker = ColorPicker::new(initial, config, history)
        .on_apply(|c| log::info!("Picked {}", c.to_hex()));

    floem::Application::new()
        .window(
            move |_| {
                color_picker(picker, floem::quit_app)
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((size.width, size.height + 140.0))
                    .title("floem-hsv-dialog"),
            ),
        )
        .run();
}
