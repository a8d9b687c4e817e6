pub mod cityscape;
pub mod node;
pub mod orbital;

use crate::core::fmt_num;

/// `12.5` → `"12.5s"`, the clock-value form animation attributes expect.
pub(crate) fn seconds(v: f64) -> String {
    format!("{}s", fmt_num(v))
}

/// Keyframe list form: `[0.0, 0.5, 1.0]` → `"0; 0.5; 1"`.
pub(crate) fn keyframe_list(vals: &[f64]) -> String {
    vals.iter()
        .map(|v| fmt_num(*v))
        .collect::<Vec<_>>()
        .join("; ")
}
