use crate::core::{Canvas, Point, fmt_num};

/// Classic diamond-grid projection: logical grid coordinates to screen
/// coordinates, depth increasing downward. Pure and total.
#[derive(Clone, Copy, Debug)]
pub struct IsoProjection {
    /// Horizontal half-step of one grid cell, in pixels.
    pub scale: f64,
    /// Horizontal centering offset (half the canvas width).
    pub half_width: f64,
    /// Vertical offset placing the grid origin on the canvas.
    pub offset_y: f64,
}

impl IsoProjection {
    pub fn new(canvas: Canvas, scale: f64) -> Self {
        Self {
            scale,
            half_width: f64::from(canvas.width) / 2.0,
            // Slightly below center reads better for tall structures.
            offset_y: f64::from(canvas.height) / 1.8,
        }
    }

    /// `x = (gx - gy)·scale + W/2`, `y = (gx + gy)·(scale/2) - elevation + offsetY`.
    pub fn project(&self, gx: f64, gy: f64, elevation: f64) -> Point {
        Point::new(
            (gx - gy) * self.scale + self.half_width,
            (gx + gy) * (self.scale / 2.0) - elevation + self.offset_y,
        )
    }
}

/// One entity's orbit: an ellipse centered on the scene, squashed vertically
/// to simulate tilt. The timeline composer moves the entity along it; this
/// type only owns the geometry.
#[derive(Clone, Copy, Debug)]
pub struct OrbitEllipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl OrbitEllipse {
    pub fn new(center: Point, orbit_radius: f64, squash: f64) -> Self {
        Self {
            cx: center.x,
            cy: center.y,
            rx: orbit_radius,
            ry: orbit_radius * squash,
        }
    }

    /// Point at angle `theta` (radians, 0 = rightmost, increasing toward the
    /// screen-space "front" of the orbit).
    pub fn point_at(&self, theta: f64) -> Point {
        Point::new(
            self.cx + self.rx * theta.cos(),
            self.cy + self.ry * theta.sin(),
        )
    }

    /// Closed two-arc path tracing the full ellipse, starting at the
    /// rightmost point. Feeds both the visible orbit trace and the motion
    /// path the planet group animates along.
    pub fn motion_path_d(&self) -> String {
        let (cx, cy, rx, ry) = (self.cx, self.cy, self.rx, self.ry);
        format!(
            "M {} {} A {} {} 0 1 1 {} {} A {} {} 0 1 1 {} {}",
            fmt_num(cx + rx),
            fmt_num(cy),
            fmt_num(rx),
            fmt_num(ry),
            fmt_num(cx - rx),
            fmt_num(cy),
            fmt_num(rx),
            fmt_num(ry),
            fmt_num(cx + rx),
            fmt_num(cy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_projection_is_linear_in_gx() {
        let p = IsoProjection::new(Canvas::default(), 24.0);
        for (gx, gy, e) in [(0.0, 0.0, 0.0), (-2.0, 3.0, 15.0), (7.5, -1.25, 80.0)] {
            let a = p.project(gx, gy, e);
            let b = p.project(gx + 1.0, gy, e);
            assert!((b.x - a.x - 24.0).abs() < 1e-12);
            assert!((b.y - a.y - 12.0).abs() < 1e-12);
        }
    }

    #[test]
    fn iso_elevation_moves_straight_up() {
        let p = IsoProjection::new(Canvas::default(), 24.0);
        let ground = p.project(1.0, 2.0, 0.0);
        let raised = p.project(1.0, 2.0, 30.0);
        assert_eq!(raised.x, ground.x);
        assert!((ground.y - raised.y - 30.0).abs() < 1e-12);
    }

    #[test]
    fn orbit_points_satisfy_ellipse_equation() {
        let orbit = OrbitEllipse::new(Point::new(400.0, 300.0), 180.0, 0.4);
        let mut theta = 0.0;
        while theta < std::f64::consts::TAU {
            let pt = orbit.point_at(theta);
            let nx = (pt.x - orbit.cx) / orbit.rx;
            let ny = (pt.y - orbit.cy) / orbit.ry;
            assert!((nx * nx + ny * ny - 1.0).abs() < 1e-9, "theta={theta}");
            theta += 0.1;
        }
    }

    #[test]
    fn motion_path_starts_at_rightmost_point() {
        let orbit = OrbitEllipse::new(Point::new(400.0, 300.0), 150.0, 0.4);
        assert!(orbit.motion_path_d().starts_with("M 550 300 A 150 60"));
    }
}
