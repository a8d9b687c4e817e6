//! Orbital universe scene: entities as planets on staggered elliptical
//! orbits around the viewer's avatar, with a cycling HUD readout.

use crate::{
    core::{Canvas, Point, fmt_num},
    detail,
    error::RepoverseResult,
    layout,
    model::{Entity, Viewer},
    projection::OrbitEllipse,
    scene::{
        keyframe_list,
        node::{Element, Node},
        seconds,
    },
    theme, timeline,
};

/// Scene-wide constants for the orbital style.
#[derive(Clone, Debug)]
pub struct OrbitalOpts {
    pub canvas: Canvas,
    /// Vertical squash simulating the orbital plane's tilt. Must be < 1.
    pub squash: f64,
    /// Seconds each entity owns the HUD.
    pub hud_slot_s: f64,
    /// Lower bound on the HUD cycle so tiny scenes still animate.
    pub hud_min_total_s: f64,
    /// Numerator of `duration = K / orbit_speed`.
    pub speed_constant: f64,
}

impl Default for OrbitalOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            squash: 0.4,
            hud_slot_s: 4.0,
            hud_min_total_s: 10.0,
            speed_constant: 1000.0,
        }
    }
}

/// Assemble the full orbital document for one viewer and their entities.
///
/// Rejects non-positive orbit speeds and negative radii up front; a zero
/// speed must never reach the duration math as an infinity.
#[tracing::instrument(skip_all, fields(entities = entities.len()))]
pub fn orbital_scene(
    viewer: &Viewer,
    entities: &[Entity],
    opts: &OrbitalOpts,
) -> RepoverseResult<String> {
    viewer.validate()?;
    for entity in entities {
        entity.validate_orbital()?;
    }

    let width = f64::from(opts.canvas.width);
    let height = f64::from(opts.canvas.height);
    let center = opts.canvas.center();
    let n = entities.len();

    let schedule = timeline::highlight_schedule(n, opts.hud_slot_s, opts.hud_min_total_s);
    tracing::debug!(total_s = schedule.total_s, "computed HUD cycle");

    let mut defs = Element::new("defs")
        .child(
            Element::new("radialGradient")
                .attr("id", "sunGradient")
                .child(stop("0%", "#FDB813"))
                .child(stop("80%", "#F5821F"))
                .child(stop("100%", "rgba(245, 130, 31, 0)")),
        )
        .child(
            Element::new("filter")
                .attr("id", "sunGlow")
                .child(
                    Element::new("feGaussianBlur")
                        .attr("stdDeviation", "2.5")
                        .attr("result", "coloredBlur"),
                )
                .child(
                    Element::new("feMerge")
                        .child(Element::new("feMergeNode").attr("in", "coloredBlur"))
                        .child(Element::new("feMergeNode").attr("in", "SourceGraphic")),
                ),
        )
        .child(
            Element::new("linearGradient")
                .attr("id", "hudGradient")
                .attr("x1", "0%")
                .attr("y1", "0%")
                .attr("x2", "100%")
                .attr("y2", "0%")
                .child(stop("0%", "rgba(0,0,0,0)"))
                .child(stop("10%", "rgba(0,20,40,0.8)"))
                .child(stop("90%", "rgba(0,20,40,0.8)"))
                .child(stop("100%", "rgba(0,0,0,0)")),
        )
        .child(
            Element::new("clipPath").attr("id", "sunClip").child(
                Element::new("circle")
                    .attr_num("cx", center.x)
                    .attr_num("cy", center.y)
                    .attr("r", "40"),
            ),
        );

    // One radial gradient per planet; the fill color is per-entity data.
    for (i, entity) in entities.iter().enumerate() {
        defs = defs.child(
            Element::new("radialGradient")
                .attr("id", format!("planetGrad-{i}"))
                .attr("cx", "30%")
                .attr("cy", "30%")
                .attr("r", "70%")
                .child(stop_opacity("0%", &entity.color_hex, "1"))
                .child(stop_opacity("50%", &entity.color_hex, "0.8"))
                .child(stop_opacity("100%", "#000", "1")),
        );
    }

    let mut planets: Vec<Node> = Vec::with_capacity(n);
    for (i, entity) in entities.iter().enumerate() {
        planets.push(Node::comment(format!("Planet: {}", entity.name)));
        planets.push(planet_group(entity, i, n, center.x, center.y, opts).into());
    }

    let mut hud: Vec<Node> = vec![
        Element::new("rect")
            .attr("x", "10")
            .attr_num("y", height - 90.0)
            .attr("width", "300")
            .attr("height", "80")
            .attr("fill", "url(#hudGradient)")
            .attr("stroke", "rgba(0,255,255,0.2)")
            .attr("stroke-width", "1")
            .attr("rx", "5")
            .into(),
    ];
    for (i, entity) in entities.iter().enumerate() {
        hud.push(hud_panel(entity, i, &schedule, height, opts).into());
    }

    let root = Element::new("svg")
        .attr_num("width", width)
        .attr_num("height", height)
        .attr("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)))
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .child(defs)
        .child(
            Element::new("rect")
                .attr("width", "100%")
                .attr("height", "100%")
                .attr("fill", "#030014"),
        )
        .children(fixed_stars())
        .child(sun(viewer, center.x, center.y))
        .child(
            Element::new("text")
                .attr_num("x", center.x)
                .attr_num("y", center.y + 70.0)
                .attr("text-anchor", "middle")
                .attr("fill", "white")
                .attr("font-family", "Arial, sans-serif")
                .attr("font-size", "14")
                .attr("font-weight", "bold")
                .attr("opacity", "0.8")
                .text(viewer.display_name.clone()),
        )
        .children(planets)
        .children(hud)
        .child(
            Element::new("text")
                .attr_num("x", width - 10.0)
                .attr_num("y", height - 10.0)
                .attr("text-anchor", "end")
                .attr("fill", "#333")
                .attr("font-family", "Arial, sans-serif")
                .attr("font-size", "10")
                .text("RepoVerse 3D"),
        );

    Ok(Node::from(root).to_svg())
}

fn stop(offset: &str, color: &str) -> Element {
    Element::new("stop")
        .attr("offset", offset)
        .attr("stop-color", color)
}

fn stop_opacity(offset: &str, color: &str, opacity: &str) -> Element {
    stop(offset, color).attr("stop-opacity", opacity)
}

fn fixed_stars() -> Vec<Node> {
    [
        (100.0, 100.0, 1.0, 0.5),
        (600.0, 200.0, 1.5, 0.7),
        (300.0, 500.0, 1.0, 0.4),
        (700.0, 400.0, 2.0, 0.6),
    ]
    .into_iter()
    .map(|(cx, cy, r, opacity)| {
        Element::new("circle")
            .attr_num("cx", cx)
            .attr_num("cy", cy)
            .attr_num("r", r)
            .attr("fill", "white")
            .attr_num("opacity", opacity)
            .into()
    })
    .collect()
}

fn sun(viewer: &Viewer, cx: f64, cy: f64) -> Element {
    Element::new("g")
        .attr("filter", "url(#sunGlow)")
        .child(
            Element::new("circle")
                .attr_num("cx", cx)
                .attr_num("cy", cy)
                .attr("r", "40")
                .attr("fill", "url(#sunGradient)")
                .child(
                    Element::new("animate")
                        .attr("attributeName", "r")
                        .attr("values", "40;42;40")
                        .attr("dur", "4s")
                        .attr("repeatCount", "indefinite"),
                ),
        )
        .child(
            Element::new("image")
                .attr("href", viewer.avatar_image_url.clone())
                .attr("xlink:href", viewer.avatar_image_url.clone())
                .attr_num("x", cx - 40.0)
                .attr_num("y", cy - 40.0)
                .attr("width", "80")
                .attr("height", "80")
                .attr("clip-path", "url(#sunClip)")
                .attr("opacity", "0.8"),
        )
}

fn planet_group(
    entity: &Entity,
    index: usize,
    n: usize,
    cx: f64,
    cy: f64,
    opts: &OrbitalOpts,
) -> Element {
    let palette = theme::resolve_palette(&entity.mood);
    let orbit = OrbitEllipse::new(Point::new(cx, cy), entity.orbit_radius, opts.squash);
    let duration = timeline::orbit_duration(opts.speed_constant, entity.orbit_speed);
    let offset = layout::orbital_stagger(index, n, duration);
    let osc = timeline::scale_oscillation();
    let r = entity.visual_radius;

    let mut link = Element::new("a")
        .attr("href", entity.link_url.clone())
        .attr("target", "_blank")
        .child(
            Element::new("circle")
                .attr_num("r", r)
                .attr("fill", format!("url(#planetGrad-{index})"))
                .child(Element::new("title").text(format!(
                    "{} ({})",
                    entity.name,
                    entity.primary_language.as_deref().unwrap_or("N/A")
                ))),
        )
        .child(
            Element::new("circle")
                .attr_num("r", r)
                .attr("fill", "none")
                .attr("stroke", palette.base)
                .attr("stroke-width", "2")
                .attr("opacity", "0.3"),
        );

    if detail::ringed(entity) {
        link = link.child(
            Element::new("ellipse")
                .attr_num("rx", r * 1.8)
                .attr_num("ry", r * 0.5)
                .attr("fill", "none")
                .attr("stroke", "rgba(255,255,255,0.6)")
                .attr("stroke-width", "2")
                .attr("transform", "rotate(-15)"),
        );
    }

    // The body group carries the depth-simulating scale; the outer group
    // rides the motion path.
    let body = Element::new("g")
        .child(
            Element::new("animateTransform")
                .attr("attributeName", "transform")
                .attr("type", "scale")
                .attr("values", keyframe_list(&osc.values))
                .attr("keyTimes", keyframe_list(&osc.key_times))
                .attr("dur", seconds(duration))
                .attr("repeatCount", "indefinite")
                .attr("begin", seconds(offset))
                .attr("additive", "sum"),
        )
        .child(link);

    Element::new("g")
        .child(
            Element::new("ellipse")
                .attr_num("cx", orbit.cx)
                .attr_num("cy", orbit.cy)
                .attr_num("rx", orbit.rx)
                .attr_num("ry", orbit.ry)
                .attr("fill", "none")
                .attr("stroke", "rgba(255,255,255,0.1)")
                .attr("stroke-width", "1"),
        )
        .child(
            Element::new("g")
                .child(
                    Element::new("animateMotion")
                        .attr("dur", seconds(duration))
                        .attr("repeatCount", "indefinite")
                        .attr("begin", seconds(offset))
                        .attr("path", orbit.motion_path_d()),
                )
                .child(body),
        )
}

fn hud_panel(
    entity: &Entity,
    index: usize,
    schedule: &timeline::HighlightSchedule,
    height: f64,
    opts: &OrbitalOpts,
) -> Element {
    let palette = theme::resolve_palette(&entity.mood);
    let track = &schedule.tracks[index];
    let lang = entity.primary_language.as_deref().unwrap_or("N/A");

    Element::new("g")
        .attr("opacity", "0")
        .child(
            Element::new("animate")
                .attr("attributeName", "opacity")
                .attr("values", keyframe_list(&track.values))
                .attr("keyTimes", keyframe_list(&track.key_times))
                .attr("dur", seconds(schedule.total_s))
                .attr("repeatCount", "indefinite"),
        )
        .child(
            Element::new("text")
                .attr("x", "20")
                .attr_num("y", height - 80.0)
                .attr("fill", palette.base)
                .attr("font-family", "Courier New, monospace")
                .attr("font-size", "16")
                .attr("font-weight", "bold")
                .text(format!("> {}", entity.name)),
        )
        .child(
            Element::new("text")
                .attr("x", "20")
                .attr_num("y", height - 60.0)
                .attr("fill", "#ccc")
                .attr("font-family", "Courier New, monospace")
                .attr("font-size", "12")
                .text(format!(
                    "LANG: {lang} | STARS: {}",
                    entity.popularity_score
                )),
        )
        .child(
            Element::new("text")
                .attr("x", "20")
                .attr_num("y", height - 45.0)
                .attr("fill", "#ccc")
                .attr("font-family", "Courier New, monospace")
                .attr("font-size", "12")
                .text(format!(
                    "MOOD: {} | SIZE: {}kb",
                    entity.mood.to_uppercase(),
                    fmt_num(entity.size_metric)
                )),
        )
        .child(
            Element::new("rect")
                .attr("x", "20")
                .attr_num("y", height - 35.0)
                .attr("width", "0")
                .attr("height", "2")
                .attr("fill", palette.base)
                .child(
                    Element::new("animate")
                        .attr("attributeName", "width")
                        .attr("values", "0;200")
                        .attr(
                            "begin",
                            seconds(timeline::progress_begin(index, opts.hud_slot_s)),
                        )
                        .attr("dur", seconds(opts.hud_slot_s))
                        .attr("fill", "freeze"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> Viewer {
        Viewer {
            display_name: "octocat".to_string(),
            avatar_image_url: "https://example.com/a.png".to_string(),
            follower_count: 99,
            public_item_count: 42,
        }
    }

    fn entity(name: &str, speed: f64, texture: &str) -> Entity {
        Entity {
            name: name.to_string(),
            link_url: format!("https://example.com/{name}"),
            primary_language: Some("Rust".to_string()),
            popularity_score: 7,
            fork_score: 1,
            size_metric: 128.0,
            mood: "energetic".to_string(),
            texture: texture.to_string(),
            orbit_radius: 150.0,
            orbit_speed: speed,
            visual_radius: 9.0,
            color_hex: "#8be9fd".to_string(),
        }
    }

    #[test]
    fn speed_two_yields_half_the_constant() {
        let svg = orbital_scene(
            &viewer(),
            &[entity("a", 2.0, "plain")],
            &OrbitalOpts::default(),
        )
        .unwrap();
        assert!(svg.contains("dur=\"500s\""));
        // A zero or negative speed can never sneak through to the math.
        assert!(!svg.contains("infs"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn zero_speed_is_a_validation_error() {
        let err = orbital_scene(
            &viewer(),
            &[entity("a", 0.0, "plain")],
            &OrbitalOpts::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("orbit speed"));
    }

    #[test]
    fn ringed_texture_adds_a_ring() {
        let opts = OrbitalOpts::default();
        let ringed = orbital_scene(&viewer(), &[entity("a", 1.0, "ringed")], &opts).unwrap();
        assert!(ringed.contains("rotate(-15)"));

        let plain = orbital_scene(&viewer(), &[entity("a", 1.0, "plain")], &opts).unwrap();
        assert!(!plain.contains("rotate(-15)"));
    }

    #[test]
    fn orbital_documents_are_fully_deterministic() {
        // Nothing in this style is randomized, so repeated builds are
        // byte-identical with no injected source at all.
        let entities = vec![entity("a", 1.5, "ringed"), entity("b", 0.5, "plain")];
        let opts = OrbitalOpts::default();
        let first = orbital_scene(&viewer(), &entities, &opts).unwrap();
        let second = orbital_scene(&viewer(), &entities, &opts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn stagger_offsets_spread_entities_around_the_orbit() {
        let entities = vec![
            entity("a", 2.0, "plain"),
            entity("b", 2.0, "plain"),
            entity("c", 2.0, "plain"),
            entity("d", 2.0, "plain"),
        ];
        let svg = orbital_scene(&viewer(), &entities, &OrbitalOpts::default()).unwrap();
        // duration 500s over four entities: offsets 0, -125, -250, -375.
        assert!(svg.contains("begin=\"0s\""));
        assert!(svg.contains("begin=\"-125s\""));
        assert!(svg.contains("begin=\"-375s\""));
    }

    #[test]
    fn hud_tracks_share_one_cycle_duration() {
        let entities = vec![
            entity("a", 1.0, "plain"),
            entity("b", 1.0, "plain"),
            entity("c", 1.0, "plain"),
        ];
        let svg = orbital_scene(&viewer(), &entities, &OrbitalOpts::default()).unwrap();
        // 3 entities * 4s = 12s shared by every HUD opacity track.
        assert_eq!(svg.matches("dur=\"12s\"").count(), 3);
        assert!(svg.contains("keyTimes=\"0; 0.3323; 0.3333; 1\""));
    }

    #[test]
    fn empty_scene_keeps_sun_and_frame() {
        let svg = orbital_scene(&viewer(), &[], &OrbitalOpts::default()).unwrap();
        assert!(svg.contains("sunGradient"));
        assert!(svg.contains("RepoVerse 3D"));
        assert!(!svg.contains("animateMotion"));
    }

    #[test]
    fn planet_gradients_are_one_per_entity() {
        let entities = vec![entity("a", 1.0, "plain"), entity("b", 1.0, "plain")];
        let svg = orbital_scene(&viewer(), &entities, &OrbitalOpts::default()).unwrap();
        assert!(svg.contains("id=\"planetGrad-0\""));
        assert!(svg.contains("id=\"planetGrad-1\""));
        assert!(!svg.contains("id=\"planetGrad-2\""));
    }
}
