//! Two-way binding between a typed value and an editable text buffer.
//!
//! The buffer may hold text that does not validate; the typed value only
//! moves when the text both validates and parses.

use crate::color::Color;

type Validator = Box<dyn Fn(&str) -> bool>;
type Parser<T> = Box<dyn Fn(&str) -> Option<T>>;
type Formatter<T> = Box<dyn Fn(&T) -> String>;
type Callback<T> = Box<dyn FnMut(&T)>;

/// Result of feeding the host's post-edit text into a binding.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome<T> {
    /// Text is the same as last frame.
    Unchanged,
    /// Text changed but does not validate or parse. It stays visible.
    Rejected,
    /// Text produced a new value.
    Committed(T),
}

pub struct TextFieldBinding<T> {
    value: T,
    raw: String,
    validator: Option<Validator>,
    parser: Parser<T>,
    formatter: Formatter<T>,
    on_commit: Option<Callback<T>>,
}

impl<T: Clone> TextFieldBinding<T> {
    pub fn new(
        value: T,
        parser: impl Fn(&str) -> Option<T> + 'static,
        formatter: impl Fn(&T) -> String + 'static,
    ) -> Self {
        let raw = formatter(&value);
        Self {
            value,
            raw,
            validator: None,
            parser: Box::new(parser),
            formatter: Box::new(formatter),
            on_commit: None,
        }
    }

    pub fn with_validator(mut self, validator: impl Fn(&str) -> bool + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Called with each newly committed value.
    pub fn with_callback(mut self, callback: impl FnMut(&T) + 'static) -> Self {
        self.on_commit = Some(Box::new(callback));
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// The text currently shown in the field.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the shown text passes validation. Hosts tint invalid fields.
    pub fn is_valid(&self) -> bool {
        self.validator.as_ref().map_or(true, |v| v(&self.raw))
    }

    /// Overwrite from the model side. Skips validation and the callback.
    pub fn set_value(&mut self, value: T) {
        self.raw = (self.formatter)(&value);
        self.value = value;
    }

    /// Feed the text the host reports after this frame's edit.
    pub fn sync(&mut self, raw: &str) -> SyncOutcome<T> {
        if raw == self.raw {
            return SyncOutcome::Unchanged;
        }
        self.raw = raw.to_owned();
        if !self.is_valid() {
            return SyncOutcome::Rejected;
        }
        let Some(value) = (self.parser)(&self.raw) else {
            return SyncOutcome::Rejected;
        };
        self.value = value;
        if let Some(cb) = self.on_commit.as_mut() {
            cb(&self.value);
        }
        SyncOutcome::Committed(self.value.clone())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for TextFieldBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFieldBinding")
            .field("value", &self.value)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

fn parse_unit(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| (0.0..=1.0).contains(v))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl TextFieldBinding<f64> {
    /// A field for a 0.0–1.0 channel, shown with two decimals at most.
    pub fn unit_float(value: f64) -> Self {
        Self::new(value, parse_unit, |v| format!("{}", round2(*v)))
            .with_validator(|text| parse_unit(text).is_some())
    }
}

impl TextFieldBinding<String> {
    /// A field for a hex color string.
    pub fn hex(value: String) -> Self {
        Self::new(value, |text| Some(text.to_owned()), String::clone)
            .with_validator(|text| Color::from_hex(text).is_some())
    }
}
