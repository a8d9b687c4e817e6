use crate::model::Mood;

/// Three-color paint set resolved from an entity mood: `base` for fills and
/// glows, `highlight` for lit faces and windows, `shadow` for dark edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub base: &'static str,
    pub highlight: &'static str,
    pub shadow: &'static str,
}

const HAPPY: Palette = Palette {
    base: "#FFD700",
    highlight: "#FFFACD",
    shadow: "#B8860B",
};
const FOCUSED: Palette = Palette {
    base: "#00FF94",
    highlight: "#E0FFF1",
    shadow: "#008F53",
};
const CALM: Palette = Palette {
    base: "#00C2FF",
    highlight: "#D1F4FF",
    shadow: "#005F7F",
};
const STRESSED: Palette = Palette {
    base: "#FF2A6D",
    highlight: "#FFD1E0",
    shadow: "#990033",
};
const ENERGETIC: Palette = Palette {
    base: "#D300C5",
    highlight: "#FAD7FA",
    shadow: "#66005E",
};

pub fn palette_for(mood: Mood) -> Palette {
    match mood {
        Mood::Happy => HAPPY,
        Mood::Focused => FOCUSED,
        Mood::Calm => CALM,
        Mood::Stressed => STRESSED,
        Mood::Energetic => ENERGETIC,
    }
}

/// Resolve a raw mood tag to a palette. Unmatched tags silently resolve to
/// the calm palette: a washed-out building beats a failed build.
pub fn resolve_palette(tag: &str) -> Palette {
    palette_for(Mood::from_tag(tag).unwrap_or(Mood::Calm))
}

/// The mood a raw tag resolves to, used to deduplicate paint definitions.
pub fn resolve_mood(tag: &str) -> Mood {
    Mood::from_tag(tag).unwrap_or(Mood::Calm)
}
