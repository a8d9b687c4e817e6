pub use kurbo::{Point, Vec2};

/// Logical drawing surface for one scene document, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Minimal decimal formatting for serialized attribute values.
///
/// Integers print without a fractional part; everything else keeps at most
/// four decimals with trailing zeros trimmed. Keyframe fractions and screen
/// coordinates both go through here so documents stay byte-stable.
pub fn fmt_num(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e12 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_extents() {
        let c = Canvas::new(800, 600);
        assert_eq!(c.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn fmt_num_trims_trailing_zeros() {
        assert_eq!(fmt_num(24.0), "24");
        assert_eq!(fmt_num(-3.0), "-3");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.3333");
        assert_eq!(fmt_num(0.05), "0.05");
        assert_eq!(fmt_num(0.999), "0.999");
    }
}
