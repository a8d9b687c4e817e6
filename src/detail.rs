use crate::model::{Entity, Texture};

/// Injected source of cosmetic randomness. Window occupancy and beacon blink
/// rates are non-load-bearing visuals: production uses thread entropy, tests
/// substitute a scripted sequence.
pub trait DetailRng {
    /// One biased coin flip; `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform draw from `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64;
}

/// Default source backed by `rand::thread_rng`.
#[derive(Default)]
pub struct EntropyRng;

impl DetailRng for EntropyRng {
    fn chance(&mut self, p: f64) -> bool {
        rand::Rng::gen_bool(&mut rand::thread_rng(), p.clamp(0.0, 1.0))
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        rand::Rng::gen_range(&mut rand::thread_rng(), lo..hi)
    }
}

/// Deterministic source replaying a fixed sequence of uniform draws.
/// `chance(p)` succeeds when the next draw is below `p`.
pub struct FixedRng {
    draws: Vec<f64>,
    next: usize,
}

impl FixedRng {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }

    fn draw(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.5;
        }
        let v = self.draws[self.next % self.draws.len()];
        self.next += 1;
        v
    }
}

impl DetailRng for FixedRng {
    fn chance(&mut self, p: f64) -> bool {
        self.draw() < p
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.draw() * (hi - lo)
    }
}

/// Tunable thresholds and probabilities for the synthesized detail. The
/// exact values are calibrated for "visually plausible", nothing deeper.
#[derive(Clone, Copy, Debug)]
pub struct DetailTuning {
    /// Structures at or below this height get no window rows.
    pub window_min_height: f64,
    /// Vertical margin reserved above the ground line before the first row.
    pub window_margin: f64,
    /// Height of one window row.
    pub floor_height: f64,
    /// Probability that a given face on a given floor shows a lit window.
    pub window_probability: f64,
    /// Popularity above this earns a rooftop beacon.
    pub beacon_popularity_threshold: u64,
    /// Fork score above this earns a rooftop beacon.
    pub beacon_fork_threshold: u64,
    /// Fastest beacon blink period, seconds.
    pub beacon_blink_min_s: f64,
    /// Random spread added to the blink period, seconds.
    pub beacon_blink_spread_s: f64,
}

impl Default for DetailTuning {
    fn default() -> Self {
        Self {
            window_min_height: 40.0,
            window_margin: 10.0,
            floor_height: 10.0,
            window_probability: 0.7,
            beacon_popularity_threshold: 10,
            beacon_fork_threshold: 5,
            beacon_blink_min_s: 1.0,
            beacon_blink_spread_s: 2.0,
        }
    }
}

/// One window row: which of the two visible faces carry a lit mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowRow {
    pub floor: usize,
    pub left: bool,
    pub right: bool,
}

/// Rooftop beacon with its blink period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beacon {
    pub blink_s: f64,
}

/// Secondary visual features derived from an entity's attributes.
#[derive(Clone, Debug, Default)]
pub struct DetailSet {
    pub window_rows: Vec<WindowRow>,
    pub beacon: Option<Beacon>,
    pub ringed: bool,
}

/// Ring texture check: a pure tag lookup, shared by both styles. Kept
/// separate from [`synthesize`] so styles without randomized detail never
/// spend a draw on the injected source.
pub fn ringed(entity: &Entity) -> bool {
    Texture::from_tag(&entity.texture) == Texture::Ringed
}

/// Derive the detail set for one entity at its resolved structure height.
///
/// Window occupancy is intentionally non-deterministic across runs; the
/// beacon and ring are pure threshold checks.
pub fn synthesize(
    entity: &Entity,
    height: f64,
    tuning: &DetailTuning,
    rng: &mut dyn DetailRng,
) -> DetailSet {
    let mut window_rows = Vec::new();
    if height > tuning.window_min_height {
        let floors = ((height - tuning.window_margin) / tuning.floor_height).floor() as usize;
        for floor in 0..floors {
            let right = rng.chance(tuning.window_probability);
            let left = rng.chance(tuning.window_probability);
            if left || right {
                window_rows.push(WindowRow { floor, left, right });
            }
        }
    }

    let beacon = if entity.popularity_score > tuning.beacon_popularity_threshold
        || entity.fork_score > tuning.beacon_fork_threshold
    {
        Some(Beacon {
            blink_s: rng.range(
                tuning.beacon_blink_min_s,
                tuning.beacon_blink_min_s + tuning.beacon_blink_spread_s,
            ),
        })
    } else {
        None
    };

    DetailSet {
        window_rows,
        beacon,
        ringed: ringed(entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(popularity: u64, forks: u64, texture: &str) -> Entity {
        Entity {
            name: "e".to_string(),
            link_url: "https://example.com/e".to_string(),
            primary_language: None,
            popularity_score: popularity,
            fork_score: forks,
            size_metric: 100.0,
            mood: "calm".to_string(),
            texture: texture.to_string(),
            orbit_radius: 100.0,
            orbit_speed: 1.0,
            visual_radius: 8.0,
            color_hex: "#fff".to_string(),
        }
    }

    fn always() -> FixedRng {
        FixedRng::new(vec![0.0])
    }

    fn never() -> FixedRng {
        FixedRng::new(vec![0.999])
    }

    #[test]
    fn short_structures_have_no_windows() {
        let d = synthesize(
            &entity(0, 0, "plain"),
            40.0,
            &DetailTuning::default(),
            &mut always(),
        );
        assert!(d.window_rows.is_empty());
    }

    #[test]
    fn floor_count_follows_height() {
        // (100 - 10) / 10 = 9 floors, all occupied under an always-hit rng.
        let d = synthesize(
            &entity(0, 0, "plain"),
            100.0,
            &DetailTuning::default(),
            &mut always(),
        );
        assert_eq!(d.window_rows.len(), 9);
        assert!(d.window_rows.iter().all(|w| w.left && w.right));
    }

    #[test]
    fn unoccupied_floors_are_skipped() {
        let d = synthesize(
            &entity(0, 0, "plain"),
            100.0,
            &DetailTuning::default(),
            &mut never(),
        );
        assert!(d.window_rows.is_empty());
    }

    #[test]
    fn faces_draw_independently() {
        // right hits, left misses, then the reverse on the next floor.
        let mut rng = FixedRng::new(vec![0.1, 0.9, 0.9, 0.1]);
        let d = synthesize(
            &entity(0, 0, "plain"),
            30.0,
            &DetailTuning {
                window_min_height: 20.0,
                ..DetailTuning::default()
            },
            &mut rng,
        );
        assert_eq!(
            d.window_rows,
            vec![
                WindowRow {
                    floor: 0,
                    left: false,
                    right: true
                },
                WindowRow {
                    floor: 1,
                    left: true,
                    right: false
                },
            ]
        );
    }

    #[test]
    fn beacon_requires_threshold_crossing() {
        let tuning = DetailTuning::default();
        let none = synthesize(&entity(0, 0, "plain"), 10.0, &tuning, &mut always());
        assert!(none.beacon.is_none());

        let popular = synthesize(&entity(11, 0, "plain"), 10.0, &tuning, &mut always());
        assert!(popular.beacon.is_some());

        let forked = synthesize(&entity(0, 6, "plain"), 10.0, &tuning, &mut always());
        assert!(forked.beacon.is_some());

        // Exactly at threshold is not enough.
        let edge = synthesize(&entity(10, 5, "plain"), 10.0, &tuning, &mut always());
        assert!(edge.beacon.is_none());
    }

    #[test]
    fn ring_follows_texture_tag() {
        let tuning = DetailTuning::default();
        assert!(synthesize(&entity(0, 0, "ringed"), 0.0, &tuning, &mut never()).ringed);
        assert!(!synthesize(&entity(0, 0, "plain"), 0.0, &tuning, &mut never()).ringed);
        // Unknown texture tags degrade to plain.
        assert!(!synthesize(&entity(0, 0, "striped"), 0.0, &tuning, &mut never()).ringed);
    }

    #[test]
    fn ring_check_needs_no_entropy() {
        assert!(ringed(&entity(0, 0, "ringed")));
        assert!(!ringed(&entity(0, 0, "plain")));
        assert!(!ringed(&entity(0, 0, "striped")));
    }
}
