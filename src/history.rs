//! Most-recently-used colors, with pluggable persistence.
//!
//! The list is loaded once when constructed and saved after every add. Store
//! failures are logged and otherwise ignored; the in-memory list keeps working.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::constants;
use crate::error::{HistoryError, HistoryResult};

/// Durable backing for [`RecentColors`].
pub trait RecentColorStore {
    /// Previously saved colors, most recent first.
    fn load(&self) -> HistoryResult<Vec<Color>>;

    /// Replace the saved colors.
    fn save(&self, colors: &[Color]) -> HistoryResult<()>;
}

/// Stores the list as a JSON array of `[r, g, b, a]` quadruples.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/floem-hsv-dialog/recent_colors.json`
    pub fn default_location() -> HistoryResult<Self> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(HistoryError::NoLocation)?;
        Ok(Self::new(
            base.join("floem-hsv-dialog").join("recent_colors.json"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecentColorStore for JsonFileStore {
    fn load(&self) -> HistoryResult<Vec<Color>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, colors: &[Color]) -> HistoryResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(colors)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store, for hosts that do not persist and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    colors: RefCell<Vec<Color>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors: RefCell::new(colors),
            saves: Cell::new(0),
        }
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.colors.borrow().clone()
    }
}

impl RecentColorStore for MemoryStore {
    fn load(&self) -> HistoryResult<Vec<Color>> {
        Ok(self.colors.borrow().clone())
    }

    fn save(&self, colors: &[Color]) -> HistoryResult<()> {
        self.saves.set(self.saves.get() + 1);
        *self.colors.borrow_mut() = colors.to_vec();
        Ok(())
    }
}

impl<S: RecentColorStore + ?Sized> RecentColorStore for std::rc::Rc<S> {
    fn load(&self) -> HistoryResult<Vec<Color>> {
        (**self).load()
    }

    fn save(&self, colors: &[Color]) -> HistoryResult<()> {
        (**self).save(colors)
    }
}

/// Bounded, deduplicated, most-recent-first list of colors.
pub struct RecentColors {
    colors: Vec<Color>,
    capacity: usize,
    store: Option<Box<dyn RecentColorStore>>,
}

impl RecentColors {
    /// Load from `store`, holding at most 20 colors.
    pub fn new(store: impl RecentColorStore + 'static) -> Self {
        Self::with_capacity(constants::RECENT_CAPACITY, store)
    }

    pub fn with_capacity(capacity: usize, store: impl RecentColorStore + 'static) -> Self {
        let mut colors = match store.load() {
            Ok(colors) => colors,
            Err(e) => {
                log::warn!("Failed to load recent colors: {e}");
                Vec::new()
            }
        };
        colors.truncate(capacity);
        Self {
            colors,
            capacity,
            store: Some(Box::new(store)),
        }
    }

    /// A list that is never loaded or saved.
    pub fn in_memory() -> Self {
        Self {
            colors: Vec::new(),
            capacity: constants::RECENT_CAPACITY,
            store: None,
        }
    }

    /// Move `color` to the front, dropping any equal entry and the oldest
    /// entries beyond capacity, then save.
    pub fn add(&mut self, color: Color) {
        self.colors.retain(|c| *c != color);
        self.colors.insert(0, color);
        self.colors.truncate(self.capacity);

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.colors) {
                log::warn!("Failed to save recent colors: {e}");
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn count(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the bound, dropping the oldest entries if the list is now too
    /// long. The store is updated on the next add.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.colors.truncate(capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }
}

impl std::fmt::Debug for RecentColors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentColors")
            .field("colors", &self.colors)
            .field("capacity", &self.capacity)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}
