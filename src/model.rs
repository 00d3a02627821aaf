//! The authoritative working color and its cached HSV coordinates.
//!
//! Every mutation goes through [`ColorModel::apply_edit`], which returns a
//! [`ColorChange`] describing what moved. Surfaces and text fields react to
//! that value instead of hooking into setters.

use crate::color::Color;
use crate::math;

/// Hue, saturation and value, each in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Which representation an edit was expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOrigin {
    /// H, S or V were set; they are authoritative and RGB is derived.
    Hsv,
    /// R, G, B, A or the whole color were set; HSV is derived.
    Rgb,
}

/// A single logical mutation of the working color.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Hue(f64),
    Saturation(f64),
    Value(f64),
    /// Both plane coordinates at once, as produced by a plane drag.
    SaturationValue(f64, f64),
    Alpha(f64),
    Red(f64),
    Green(f64),
    Blue(f64),
    Rgba(Color),
    /// Ignored when the string does not parse.
    Hex(String),
}

impl Edit {
    pub fn origin(&self) -> EditOrigin {
        match self {
            Edit::Hue(_) | Edit::Saturation(_) | Edit::Value(_) | Edit::SaturationValue(..) => {
                EditOrigin::Hsv
            }
            Edit::Alpha(_)
            | Edit::Red(_)
            | Edit::Green(_)
            | Edit::Blue(_)
            | Edit::Rgba(_)
            | Edit::Hex(_) => EditOrigin::Rgb,
        }
    }
}

/// Snapshot of the model after an edit, plus which parts changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorChange {
    pub origin: EditOrigin,
    pub color: Color,
    pub hsv: Hsv,
    pub hue_changed: bool,
    pub saturation_changed: bool,
    pub value_changed: bool,
    pub alpha_changed: bool,
    pub rgb_changed: bool,
}

impl ColorChange {
    pub fn hsv_changed(&self) -> bool {
        self.hue_changed || self.saturation_changed || self.value_changed
    }
}

/// Clamp to 0.0–1.0, refusing NaN and infinities.
fn unit(v: f64) -> Option<f64> {
    v.is_finite().then(|| v.clamp(0.0, 1.0))
}

/// Working color, its HSV cache, and the last committed color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorModel {
    working: Color,
    hsv: Hsv,
    committed: Color,
}

impl ColorModel {
    pub fn new(initial: Color) -> Self {
        let (h, s, v) = initial.to_hsv();
        Self {
            working: initial,
            hsv: Hsv { h, s, v },
            committed: initial,
        }
    }

    /// The live color shown while interacting.
    pub fn color(&self) -> Color {
        self.working
    }

    /// The last explicitly applied color.
    pub fn committed(&self) -> Color {
        self.committed
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn h(&self) -> f64 {
        self.hsv.h
    }
    pub fn s(&self) -> f64 {
        self.hsv.s
    }
    pub fn v(&self) -> f64 {
        self.hsv.v
    }
    pub fn r(&self) -> f64 {
        self.working.r()
    }
    pub fn g(&self) -> f64 {
        self.working.g()
    }
    pub fn b(&self) -> f64 {
        self.working.b()
    }
    pub fn a(&self) -> f64 {
        self.working.a()
    }

    /// The working color as `#RRGGBBAA`.
    pub fn hex(&self) -> String {
        self.working.to_hex()
    }

    /// Apply one edit. Returns `None` when the edit was rejected (bad hex,
    /// non-finite number) or left the model exactly as it was.
    pub fn apply_edit(&mut self, edit: Edit) -> Option<ColorChange> {
        let origin = edit.origin();
        let before_color = self.working;
        let before_hsv = self.hsv;
        let c = self.working;

        match edit {
            Edit::Hue(h) => self.set_hsv(Hsv { h: unit(h)?, ..self.hsv }),
            Edit::Saturation(s) => self.set_hsv(Hsv { s: unit(s)?, ..self.hsv }),
            Edit::Value(v) => self.set_hsv(Hsv { v: unit(v)?, ..self.hsv }),
            Edit::SaturationValue(s, v) => self.set_hsv(Hsv {
                s: unit(s)?,
                v: unit(v)?,
                ..self.hsv
            }),
            // RGB is untouched, so the HSV cache stays as it is.
            Edit::Alpha(a) => self.working = c.with_alpha(unit(a)?),
            Edit::Red(r) => self.set_rgba(Color::from_rgba(unit(r)?, c.g(), c.b(), c.a())),
            Edit::Green(g) => self.set_rgba(Color::from_rgba(c.r(), unit(g)?, c.b(), c.a())),
            Edit::Blue(b) => self.set_rgba(Color::from_rgba(c.r(), c.g(), unit(b)?, c.a())),
            Edit::Rgba(color) => self.set_rgba(color),
            Edit::Hex(hex) => {
                let parsed = Color::from_hex(&hex)?;
                log::debug!("hex updated: {hex}");
                self.set_rgba(parsed)
            }
        }

        let change = ColorChange {
            origin,
            color: self.working,
            hsv: self.hsv,
            hue_changed: before_hsv.h != self.hsv.h,
            saturation_changed: before_hsv.s != self.hsv.s,
            value_changed: before_hsv.v != self.hsv.v,
            alpha_changed: before_color.a() != self.working.a(),
            rgb_changed: before_color.r() != self.working.r()
                || before_color.g() != self.working.g()
                || before_color.b() != self.working.b(),
        };
        if !(change.hsv_changed() || change.alpha_changed || change.rgb_changed) {
            return None;
        }
        Some(change)
    }

    /// Copy the working color into the committed slot and return it.
    pub fn commit(&mut self) -> Color {
        self.committed = self.working;
        self.committed
    }

    fn set_hsv(&mut self, hsv: Hsv) {
        self.hsv = hsv;
        self.working = Color::from_hsva(hsv.h, hsv.s, hsv.v, self.working.a());
        log::debug!("HSV updated: ({}, {}, {})", hsv.h, hsv.s, hsv.v);
    }

    fn set_rgba(&mut self, color: Color) {
        self.working = color;
        let (h, s, v) =
            math::rgb_to_hsv_keeping_hue(color.r(), color.g(), color.b(), self.hsv.h);
        self.hsv = Hsv { h, s, v };
        log::debug!("RGB updated: ({}, {}, {})", color.r(), color.g(), color.b());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn red_starts_at_hue_zero() {
        let m = ColorModel::new(Color::RED);
        assert_eq!(m.hsv(), Hsv { h: 0.0, s: 1.0, v: 1.0 });
        assert_eq!(m.committed(), Color::RED);
    }

    #[test]
    fn plane_edit_on_red() {
        let mut m = ColorModel::new(Color::RED);
        let change = m.apply_edit(Edit::SaturationValue(0.5, 1.0)).unwrap();
        assert_eq!(change.origin, EditOrigin::Hsv);
        assert!(change.saturation_changed);
        assert!(!change.hue_changed);
        assert!(approx(m.r(), 1.0) && approx(m.g(), 0.5) && approx(m.b(), 0.5));
        assert_eq!(m.a(), 1.0);
    }

    #[test]
    fn hsv_edits_keep_hsv_authoritative() {
        let mut m = ColorModel::new(Color::RED);
        m.apply_edit(Edit::Saturation(0.0)).unwrap();
        m.apply_edit(Edit::Hue(0.6)).unwrap();
        // Grey color, but the hue that was set sticks.
        assert_eq!(m.h(), 0.6);
        assert!(approx(m.r(), m.g()) && approx(m.g(), m.b()));
    }

    #[test]
    fn clamping_to_current_value_is_a_no_op() {
        let mut m = ColorModel::new(Color::RED);
        assert!(m.apply_edit(Edit::Value(3.0)).is_none());
        let change = m.apply_edit(Edit::Red(-2.0)).unwrap();
        assert_eq!(m.r(), 0.0);
        assert!(change.rgb_changed);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut m = ColorModel::new(Color::RED);
        assert!(m.apply_edit(Edit::Hue(f64::NAN)).is_none());
        assert!(m.apply_edit(Edit::Alpha(f64::INFINITY)).is_none());
        assert_eq!(m.color(), Color::RED);
    }

    #[test]
    fn hsv_edits_never_touch_alpha() {
        let mut m = ColorModel::new(Color::from_rgba(0.2, 0.4, 0.6, 0.3));
        m.apply_edit(Edit::Hue(0.9)).unwrap();
        m.apply_edit(Edit::Saturation(0.1)).unwrap();
        m.apply_edit(Edit::Value(0.8)).unwrap();
        assert_eq!(m.a(), 0.3);
    }

    #[test]
    fn rgb_edits_keep_alpha_exact() {
        let alpha = 0.123456789;
        let mut m = ColorModel::new(Color::from_rgba(0.2, 0.4, 0.6, alpha));
        m.apply_edit(Edit::Red(0.9)).unwrap();
        m.apply_edit(Edit::Green(0.1)).unwrap();
        m.apply_edit(Edit::Blue(0.7)).unwrap();
        assert_eq!(m.a(), alpha);
    }

    #[test]
    fn hex_edit_sets_rgb_and_derives_hsv() {
        let mut m = ColorModel::new(Color::RED);
        let change = m.apply_edit(Edit::Hex("#00FF00FF".into())).unwrap();
        assert_eq!(change.origin, EditOrigin::Rgb);
        assert_eq!(m.color(), Color::from_rgba(0.0, 1.0, 0.0, 1.0));
        assert!(approx(m.h(), 1.0 / 3.0));
        assert_eq!((m.s(), m.v()), (1.0, 1.0));
        assert_eq!(m.hex(), "#00FF00FF");
    }

    #[test]
    fn bad_hex_is_silently_ignored() {
        let mut m = ColorModel::new(Color::RED);
        assert!(m.apply_edit(Edit::Hex("#nothex".into())).is_none());
        assert_eq!(m.color(), Color::RED);
        assert_eq!(m.hsv(), Hsv { h: 0.0, s: 1.0, v: 1.0 });
    }

    #[test]
    fn six_digit_hex_is_opaque() {
        let mut m = ColorModel::new(Color::RED.with_alpha(0.5));
        m.apply_edit(Edit::Hex("#336699".into())).unwrap();
        assert_eq!(m.a(), 1.0);
    }

    #[test]
    fn grey_rgb_edit_keeps_previous_hue() {
        let mut m = ColorModel::new(Color::from_rgba(0.2, 0.4, 0.8, 1.0));
        let hue = m.h();
        m.apply_edit(Edit::Rgba(Color::from_rgba(0.5, 0.5, 0.5, 1.0))).unwrap();
        assert_eq!(m.h(), hue);
        assert_eq!(m.s(), 0.0);
        assert!(approx(m.v(), 0.5));

        // Black also keeps it.
        m.apply_edit(Edit::Rgba(Color::BLACK)).unwrap();
        assert_eq!(m.h(), hue);
        assert_eq!(m.v(), 0.0);
    }

    #[test]
    fn alpha_edit_changes_only_alpha() {
        let mut m = ColorModel::new(Color::RED);
        m.apply_edit(Edit::Saturation(0.0)).unwrap();
        m.apply_edit(Edit::Hue(0.4)).unwrap();
        let hsv = m.hsv();
        let change = m.apply_edit(Edit::Alpha(0.25)).unwrap();
        assert_eq!(change.origin, EditOrigin::Rgb);
        assert!(change.alpha_changed);
        assert!(!change.rgb_changed && !change.hsv_changed());
        assert_eq!(m.hsv(), hsv);
        assert_eq!(m.a(), 0.25);
    }

    #[test]
    fn commit_copies_working_color() {
        let mut m = ColorModel::new(Color::RED);
        m.apply_edit(Edit::Blue(1.0)).unwrap();
        assert_eq!(m.committed(), Color::RED);
        let c = m.commit();
        assert_eq!(c, m.color());
        assert_eq!(m.committed(), c);
    }
}
