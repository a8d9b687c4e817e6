use crate::error::{RepoverseError, RepoverseResult};

/// One ranked source item, rendered as a planet (orbital style) or a
/// building (cityscape style).
///
/// The caller hands the core an already-fetched, already-ranked list; the
/// core never mutates it. Orbital-only attributes are carried for every
/// entity but only validated when the orbital style is built.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    pub link_url: String,
    #[serde(default)]
    pub primary_language: Option<String>,
    pub popularity_score: u64,
    pub fork_score: u64,
    pub size_metric: f64,
    pub mood: String,
    #[serde(default = "default_texture")]
    pub texture: String,
    pub orbit_radius: f64,
    pub orbit_speed: f64,
    pub visual_radius: f64,
    pub color_hex: String,
}

fn default_texture() -> String {
    "plain".to_string()
}

/// The profile a scene is built for. Read-only context, injected once.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub display_name: String,
    pub avatar_image_url: String,
    pub follower_count: u64,
    pub public_item_count: u64,
}

/// The deserialized input document: one viewer plus their ranked entities.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ProfileSnapshot {
    pub viewer: Viewer,
    pub entities: Vec<Entity>,
}

/// Closed mood vocabulary. Unknown tags are not an error; they resolve to
/// the calm palette downstream (see [`crate::theme::resolve_palette`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mood {
    Happy,
    Focused,
    Calm,
    Stressed,
    Energetic,
}

impl Mood {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "happy" => Some(Self::Happy),
            "focused" => Some(Self::Focused),
            "calm" => Some(Self::Calm),
            "stressed" => Some(Self::Stressed),
            "energetic" => Some(Self::Energetic),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Focused => "focused",
            Self::Calm => "calm",
            Self::Stressed => "stressed",
            Self::Energetic => "energetic",
        }
    }
}

/// Surface texture, only meaningful to the orbital style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Texture {
    Plain,
    Ringed,
}

impl Texture {
    /// Unknown tags degrade to `Plain` rather than failing the build.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ringed" => Self::Ringed,
            _ => Self::Plain,
        }
    }
}

impl Entity {
    /// Identity and size checks shared by both scene styles. Must pass
    /// before any projection or timeline math sees the entity.
    pub fn validate(&self) -> RepoverseResult<()> {
        if self.name.trim().is_empty() {
            return Err(RepoverseError::validation("entity name must be non-empty"));
        }
        if self.link_url.trim().is_empty() {
            return Err(RepoverseError::validation(format!(
                "entity '{}' link url must be non-empty",
                self.name
            )));
        }
        if !self.size_metric.is_finite() || self.size_metric < 0.0 {
            return Err(RepoverseError::validation(format!(
                "entity '{}' size metric must be finite and >= 0",
                self.name
            )));
        }
        Ok(())
    }

    /// Additional checks for the orbital style. A non-positive speed would
    /// otherwise surface as an infinite motion duration.
    pub fn validate_orbital(&self) -> RepoverseResult<()> {
        self.validate()?;
        if !self.orbit_speed.is_finite() || self.orbit_speed <= 0.0 {
            return Err(RepoverseError::validation(format!(
                "entity '{}' orbit speed must be finite and > 0",
                self.name
            )));
        }
        if !self.orbit_radius.is_finite() || self.orbit_radius < 0.0 {
            return Err(RepoverseError::validation(format!(
                "entity '{}' orbit radius must be finite and >= 0",
                self.name
            )));
        }
        if !self.visual_radius.is_finite() || self.visual_radius < 0.0 {
            return Err(RepoverseError::validation(format!(
                "entity '{}' visual radius must be finite and >= 0",
                self.name
            )));
        }
        Ok(())
    }
}

impl Viewer {
    pub fn validate(&self) -> RepoverseResult<()> {
        if self.display_name.trim().is_empty() {
            return Err(RepoverseError::validation(
                "viewer display name must be non-empty",
            ));
        }
        Ok(())
    }
}
