use crate::foundation::error::{BoxofficeError, BoxofficeResult};

pub use kurbo::{Point, Rect, Size};

/// Pixel dimensions of the SVG canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> BoxofficeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoxofficeError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 700,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    /// Box left for the tiles once the margin is taken off `canvas`.
    pub fn inner(&self, canvas: Canvas) -> Size {
        let outer = canvas.size();
        Size::new(
            (outer.width - self.left - self.right).max(0.0),
            (outer.height - self.top - self.bottom).max(0.0),
        )
    }
}

/// Attribute text for a coordinate or measure.
///
/// Shortest round-trip decimal, integral values without a fraction, `-0` as `0`, and exponent
/// notation outside `[1e-6, 1e21)`, i.e. the form a browser shows for a numeric attribute.
pub fn fmt_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if v == 0.0 {
        return "0".to_owned();
    }

    let abs = v.abs();
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{v}")
}
