//! Keyframe and time-offset schedules shared by both scene styles.
//!
//! Everything here is arithmetic over already-validated attributes; the only
//! operation that could fail (division by a zero orbit speed) is rejected at
//! ingestion and never reaches this module.

/// Fraction of the normalized cycle inserted at each highlight boundary so
/// opacity cuts are sharp instead of interpolated ramps.
pub const HIGHLIGHT_EPSILON: f64 = 0.001;

/// One-shot entry fade for an entity's visual group: fully transparent at
/// document start, opaque after `dur_s`, staggered by draw-order index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeIn {
    pub begin_s: f64,
    pub dur_s: f64,
}

pub fn fade_in(sorted_index: usize, step_s: f64, dur_s: f64) -> FadeIn {
    FadeIn {
        begin_s: sorted_index as f64 * step_s,
        dur_s,
    }
}

/// Motion-path duration for one orbit, inversely proportional to speed.
/// Speed is validated > 0 before any entity reaches the timeline.
pub fn orbit_duration(speed_constant: f64, speed: f64) -> f64 {
    speed_constant / speed
}

/// Depth-simulating scale cycle layered on an orbit: scaled up at the front
/// quarter-phase, down at the back, neutral at the sides.
#[derive(Clone, Copy, Debug)]
pub struct ScaleOscillation {
    pub values: [f64; 5],
    pub key_times: [f64; 5],
}

pub fn scale_oscillation() -> ScaleOscillation {
    ScaleOscillation {
        values: [1.0, 1.3, 1.0, 0.7, 1.0],
        key_times: [0.0, 0.25, 0.5, 0.75, 1.0],
    }
}

/// Opacity track for one entity's HUD panel over the shared cycle.
///
/// `window` is the entity's owned slice of the normalized cycle; `values`
/// and `key_times` are the explicit keyframe lists realizing it. The first
/// entity's track starts on (no leading off segment) and the last ends on
/// (no trailing off segment); interior tracks go off, on, off.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightTrack {
    pub window: (f64, f64),
    pub values: Vec<f64>,
    pub key_times: Vec<f64>,
}

impl HighlightTrack {
    /// Sample the track at normalized time `t` with linear interpolation
    /// between keyframes, holding the end values outside the key range.
    pub fn value_at(&self, t: f64) -> f64 {
        let keys = &self.key_times;
        if keys.is_empty() {
            return 0.0;
        }
        if t <= keys[0] {
            return self.values[0];
        }
        if t >= keys[keys.len() - 1] {
            return self.values[keys.len() - 1];
        }
        let idx = keys.partition_point(|&k| k <= t);
        let (k0, k1) = (keys[idx - 1], keys[idx]);
        let (v0, v1) = (self.values[idx - 1], self.values[idx]);
        if k1 <= k0 {
            return v0;
        }
        v0 + (v1 - v0) * ((t - k0) / (k1 - k0))
    }
}

/// Mutually exclusive cyclic highlight: exactly one entity's panel is
/// visible at a time, cycling through all of them once per `total_s`.
#[derive(Clone, Debug)]
pub struct HighlightSchedule {
    pub total_s: f64,
    pub tracks: Vec<HighlightTrack>,
}

/// Partition one shared cycle across `n` entities. Entity `i` owns
/// `[i/n, (i+1)/n]` of the normalized cycle, boundaries separated by
/// [`HIGHLIGHT_EPSILON`]. Zero entities yield an empty schedule with the
/// floor duration.
pub fn highlight_schedule(n: usize, slot_s: f64, min_total_s: f64) -> HighlightSchedule {
    let total_s = (n as f64 * slot_s).max(min_total_s);
    let e = HIGHLIGHT_EPSILON;

    let tracks = (0..n)
        .map(|i| {
            let start = i as f64 / n as f64;
            let end = (i + 1) as f64 / n as f64;
            let (values, key_times) = if i == 0 {
                (vec![1.0, 1.0, 0.0, 0.0], vec![0.0, end - e, end, 1.0])
            } else if i == n - 1 {
                (vec![0.0, 0.0, 1.0, 1.0], vec![0.0, start, start + e, 1.0])
            } else {
                (
                    vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
                    vec![0.0, start, start + e, end - e, end, 1.0],
                )
            };
            HighlightTrack {
                window: (start, end),
                values,
                key_times,
            }
        })
        .collect();

    HighlightSchedule { total_s, tracks }
}

/// Start time of entity `i`'s frozen HUD progress bar, in seconds.
pub fn progress_begin(index: usize, slot_s: f64) -> f64 {
    index as f64 * slot_s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_in_staggers_by_index() {
        assert_eq!(fade_in(0, 0.05, 0.8).begin_s, 0.0);
        assert_eq!(fade_in(4, 0.05, 0.8).begin_s, 0.2);
        assert_eq!(fade_in(4, 0.05, 0.8).dur_s, 0.8);
    }

    #[test]
    fn orbit_duration_is_inverse_to_speed() {
        assert_eq!(orbit_duration(1000.0, 2.0), 500.0);
        assert_eq!(orbit_duration(1000.0, 0.5), 2000.0);
    }

    #[test]
    fn scale_oscillation_peaks_at_quarter_phases() {
        let osc = scale_oscillation();
        assert_eq!(osc.values[1], 1.3);
        assert_eq!(osc.values[3], 0.7);
        assert_eq!(osc.key_times, [0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(osc.values[0], osc.values[4]);
    }

    #[test]
    fn schedule_respects_minimum_floor() {
        assert_eq!(highlight_schedule(1, 4.0, 10.0).total_s, 10.0);
        assert_eq!(highlight_schedule(3, 4.0, 10.0).total_s, 12.0);
        assert_eq!(highlight_schedule(0, 4.0, 10.0).total_s, 10.0);
        assert!(highlight_schedule(0, 4.0, 10.0).tracks.is_empty());
    }

    #[test]
    fn three_entities_partition_at_thirds() {
        let s = highlight_schedule(3, 4.0, 10.0);
        let bounds: Vec<f64> = s
            .tracks
            .iter()
            .map(|t| t.window.0)
            .chain(std::iter::once(1.0))
            .collect();
        for (got, want) in bounds.iter().zip([0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn first_and_last_tracks_skip_the_noop_segment() {
        let s = highlight_schedule(4, 4.0, 10.0);
        // First starts on, last ends on.
        assert_eq!(s.tracks[0].values[0], 1.0);
        assert_eq!(*s.tracks[3].values.last().unwrap(), 1.0);
        // Interior tracks are off, on, off.
        assert_eq!(s.tracks[1].values, vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(s.tracks[1].key_times.len(), 6);
    }

    #[test]
    fn windows_cover_the_cycle_without_overlap() {
        for n in 1..12 {
            let s = highlight_schedule(n, 4.0, 10.0);
            assert_eq!(s.tracks.len(), n);
            assert_eq!(s.tracks[0].window.0, 0.0);
            assert_eq!(s.tracks[n - 1].window.1, 1.0);
            for pair in s.tracks.windows(2) {
                assert!((pair[0].window.1 - pair[1].window.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn exactly_one_entity_is_highlighted_inside_its_window() {
        for n in 1..10 {
            let s = highlight_schedule(n, 4.0, 10.0);
            for (i, track) in s.tracks.iter().enumerate() {
                let (start, end) = track.window;
                // Sample strictly inside the window, clear of the epsilon ramps.
                let margin = HIGHLIGHT_EPSILON * 2.0;
                for frac in [0.25, 0.5, 0.75] {
                    let t = (start + margin) + (end - start - 2.0 * margin) * frac;
                    assert_eq!(track.value_at(t), 1.0, "n={n} i={i} t={t}");
                    for (j, other) in s.tracks.iter().enumerate() {
                        if j != i {
                            assert_eq!(other.value_at(t), 0.0, "n={n} i={i} j={j} t={t}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn key_times_are_sorted_within_unit_interval() {
        for n in 1..10 {
            for track in highlight_schedule(n, 4.0, 10.0).tracks {
                assert_eq!(track.values.len(), track.key_times.len());
                assert!(track.key_times.windows(2).all(|w| w[0] <= w[1]));
                assert_eq!(track.key_times[0], 0.0);
                assert_eq!(*track.key_times.last().unwrap(), 1.0);
            }
        }
    }
}
