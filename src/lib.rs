//! Repoverse turns a profile's ranked repositories into self-contained,
//! animated SVG scenes: an orbital universe or an isometric cityscape.
//!
//! The core is a pure, single-pass composition pipeline:
//!
//! - Resolve a [`theme::Palette`] from each entity's mood
//! - Project logical positions to screen space ([`projection`])
//! - Assign grid slots or orbit staggers and a draw order ([`layout`])
//! - Synthesize per-entity visual detail ([`detail`])
//! - Compute fade-in, motion, and HUD highlight schedules ([`timeline`])
//! - Assemble and serialize one document per style ([`scene`])
//!
//! No I/O happens inside the library; the caller fetches and ranks entities
//! and persists the returned document strings.
#![forbid(unsafe_code)]

mod foundation;

pub mod detail;
pub mod layout;
pub mod model;
pub mod projection;
pub mod scene;
pub mod theme;
pub mod timeline;

pub use foundation::core;
pub use foundation::error;

pub use crate::core::{Canvas, Point, Vec2};
pub use crate::error::{RepoverseError, RepoverseResult};

pub use crate::detail::{DetailRng, DetailTuning, EntropyRng, FixedRng};
pub use crate::model::{Entity, Mood, ProfileSnapshot, Texture, Viewer};
pub use crate::scene::cityscape::{CityscapeOpts, cityscape_scene};
pub use crate::scene::orbital::{OrbitalOpts, orbital_scene};
pub use crate::theme::{Palette, resolve_palette};
