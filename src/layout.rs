/// Logical grid position for one cityscape entity, centered around the
/// origin so the isometric diamond sits in the middle of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSlot {
    pub row: usize,
    pub col: usize,
    pub gx: f64,
    pub gy: f64,
}

impl GridSlot {
    /// Painter's-algorithm key: smaller is farther from the viewer.
    pub fn depth_key(&self) -> f64 {
        self.gx + self.gy
    }
}

/// Side length of the square grid holding `n` entities. Zero for an empty
/// scene; callers must not divide by it without checking.
pub fn grid_size(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (n as f64).sqrt().ceil() as usize
}

/// Assign each of `n` entities a grid slot by index, row-major, shifted so
/// the grid is centered at the logical origin.
pub fn grid_slots(n: usize) -> Vec<GridSlot> {
    let size = grid_size(n);
    let half = size as f64 / 2.0;
    (0..n)
        .map(|i| {
            let row = i / size;
            let col = i % size;
            GridSlot {
                row,
                col,
                gx: col as f64 - half,
                gy: row as f64 - half,
            }
        })
        .collect()
}

/// Indices into `slots` in draw order: ascending depth key, far-from-viewer
/// first, so nearer shapes occlude farther ones. Stable for equal depths.
pub fn depth_order(slots: &[GridSlot]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by(|&a, &b| slots[a].depth_key().total_cmp(&slots[b].depth_key()));
    order
}

/// Negative animation start offset staggering `n` otherwise-identical
/// orbital paths evenly around the shared ellipse. Zero for an empty scene.
pub fn orbital_stagger(index: usize, n: usize, period_s: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    -(index as f64 * (period_s / n as f64))
}
