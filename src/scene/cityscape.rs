//! Isometric cityscape scene: one building per entity on a centered diamond
//! grid, drawn back to front, windows lit at random, beacons on the popular.

use std::collections::BTreeSet;

use crate::{
    core::{Canvas, Point, fmt_num},
    detail::{self, DetailRng, DetailSet, DetailTuning},
    error::RepoverseResult,
    layout,
    model::{Entity, Mood, Viewer},
    projection::IsoProjection,
    scene::{
        node::{Element, Node},
        seconds,
    },
    theme, timeline,
};

/// Scene-wide constants for the cityscape style.
#[derive(Clone, Debug)]
pub struct CityscapeOpts {
    pub canvas: Canvas,
    pub iso_scale: f64,
    pub fade_step_s: f64,
    pub fade_dur_s: f64,
    pub star_count: usize,
    pub tuning: DetailTuning,
}

impl Default for CityscapeOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            iso_scale: 24.0,
            fade_step_s: 0.05,
            fade_dur_s: 0.8,
            star_count: 30,
            tuning: DetailTuning::default(),
        }
    }
}

/// Resolved screen-space footprint of one building.
#[derive(Clone, Copy, Debug)]
struct BuildingGeom {
    /// Half-width of the diamond footprint.
    w: f64,
    /// Structure height above ground.
    h: f64,
    /// Ground-line anchor in screen space.
    base: Point,
}

fn building_geometry(entity: &Entity, proj: &IsoProjection, gx: f64, gy: f64) -> BuildingGeom {
    let size_factor = (entity.size_metric / 500.0).min(1.0) * 0.5 + 0.5;
    let height_scale =
        (entity.size_metric / 50.0).min(200.0) + entity.popularity_score as f64 * 5.0;
    BuildingGeom {
        w: 15.0 * size_factor,
        h: height_scale.clamp(20.0, 300.0),
        base: proj.project(gx, gy, 0.0),
    }
}

/// Assemble the full cityscape document for one viewer and their entities.
///
/// Fails only on validation (empty identity fields, negative sizes); zero
/// entities produce a valid background-only document.
#[tracing::instrument(skip_all, fields(entities = entities.len()))]
pub fn cityscape_scene(
    viewer: &Viewer,
    entities: &[Entity],
    opts: &CityscapeOpts,
    rng: &mut dyn DetailRng,
) -> RepoverseResult<String> {
    viewer.validate()?;
    for entity in entities {
        entity.validate()?;
    }

    let width = f64::from(opts.canvas.width);
    let height = f64::from(opts.canvas.height);
    let proj = IsoProjection::new(opts.canvas, opts.iso_scale);

    let slots = layout::grid_slots(entities.len());
    let order = layout::depth_order(&slots);

    let moods: BTreeSet<Mood> = entities
        .iter()
        .map(|e| theme::resolve_mood(&e.mood))
        .collect();

    tracing::debug!(grid = layout::grid_size(entities.len()), "laid out grid");

    let mut buildings = Element::new("g").attr("transform", "translate(0, 50)");
    for (draw_index, &entity_index) in order.iter().enumerate() {
        let entity = &entities[entity_index];
        let slot = slots[entity_index];
        let geom = building_geometry(entity, &proj, slot.gx, slot.gy);
        let details = detail::synthesize(entity, geom.h, &opts.tuning, rng);
        buildings = buildings.child(building_group(
            entity,
            geom,
            &details,
            draw_index,
            opts,
        ));
    }

    let root = Element::new("svg")
        .attr_num("width", width)
        .attr_num("height", height)
        .attr("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)))
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .child(defs(&moods))
        .child(Node::comment("Background"))
        .children(background(width, height, opts.star_count, rng))
        .child(Node::comment("City label"))
        .child(city_label(viewer))
        .child(Node::comment("Buildings, far to near"))
        .child(buildings)
        .child(
            Element::new("text")
                .attr_num("x", width - 30.0)
                .attr_num("y", height - 20.0)
                .attr("text-anchor", "end")
                .attr("fill", "rgba(255,255,255,0.4)")
                .attr("font-family", "Courier New, monospace")
                .attr("font-size", "10")
                .text("GENERATED BY REPOVERSE"),
        );

    Ok(Node::from(root).to_svg())
}

fn defs(moods: &BTreeSet<Mood>) -> Element {
    let mut defs = Element::new("defs")
        .child(
            Element::new("linearGradient")
                .attr("id", "skyGradient")
                .attr("x1", "0%")
                .attr("y1", "0%")
                .attr("x2", "0%")
                .attr("y2", "100%")
                .child(stop("0%", "#0f0c29"))
                .child(stop("50%", "#302b63"))
                .child(stop("100%", "#24243e")),
        )
        .child(
            Element::new("pattern")
                .attr("id", "gridPattern")
                .attr("width", "40")
                .attr("height", "20")
                .attr("patternUnits", "userSpaceOnUse")
                .child(
                    Element::new("path")
                        .attr("d", "M 40 0 L 0 0 0 20")
                        .attr("fill", "none")
                        .attr("stroke", "magenta")
                        .attr("stroke-width", "0.5")
                        .attr("opacity", "0.2"),
                ),
        )
        .child(
            Element::new("radialGradient")
                .attr("id", "floorGlow")
                .attr("cx", "50%")
                .attr("cy", "100%")
                .attr("r", "80%")
                .child(stop_opacity("0%", "#ff00cc", "0.15"))
                .child(stop("100%", "transparent")),
        );

    // One left/right face gradient pair per mood actually present.
    for mood in moods {
        let palette = theme::palette_for(*mood);
        defs = defs
            .child(
                Element::new("linearGradient")
                    .attr("id", format!("gradLeft-{}", mood.tag()))
                    .attr("x1", "0%")
                    .attr("y1", "0%")
                    .attr("x2", "100%")
                    .attr("y2", "100%")
                    .child(stop_opacity("0%", palette.base, "0.8"))
                    .child(stop_opacity("100%", "#050510", "0.9")),
            )
            .child(
                Element::new("linearGradient")
                    .attr("id", format!("gradRight-{}", mood.tag()))
                    .attr("x1", "0%")
                    .attr("y1", "0%")
                    .attr("x2", "0%")
                    .attr("y2", "100%")
                    .child(stop_opacity("0%", palette.base, "0.6"))
                    .child(stop_opacity("100%", "#0b0b1a", "0.8")),
            );
    }
    defs
}

fn stop(offset: &str, color: &str) -> Element {
    Element::new("stop")
        .attr("offset", offset)
        .attr("stop-color", color)
}

fn stop_opacity(offset: &str, color: &str, opacity: &str) -> Element {
    stop(offset, color).attr("stop-opacity", opacity)
}

fn background(width: f64, height: f64, star_count: usize, rng: &mut dyn DetailRng) -> Vec<Node> {
    let mut nodes: Vec<Node> = vec![
        Element::new("rect")
            .attr("width", "100%")
            .attr("height", "100%")
            .attr("fill", "url(#skyGradient)")
            .into(),
    ];

    for _ in 0..star_count {
        nodes.push(
            Element::new("circle")
                .attr_num("cx", rng.range(0.0, width))
                .attr_num("cy", rng.range(0.0, height * 0.6))
                .attr_num("r", rng.range(0.0, 1.5))
                .attr("fill", "white")
                .attr_num("opacity", rng.range(0.0, 1.0))
                .into(),
        );
    }

    // Perspective floor: a rotated grid rect squashed onto the ground plane.
    nodes.push(
        Element::new("g")
            .attr(
                "transform",
                format!("translate(0, {}) scale(1, 0.5)", fmt_num(height / 2.0)),
            )
            .child(
                Element::new("rect")
                    .attr_num("x", -width)
                    .attr("y", "0")
                    .attr_num("width", width * 3.0)
                    .attr_num("height", height * 2.0)
                    .attr("fill", "url(#gridPattern)")
                    .attr("opacity", "0.3")
                    .attr(
                        "transform",
                        format!("rotate(45, {}, 0)", fmt_num(width / 2.0)),
                    ),
            )
            .into(),
    );

    nodes.push(
        Element::new("rect")
            .attr("x", "0")
            .attr_num("y", height / 2.0)
            .attr_num("width", width)
            .attr_num("height", height / 2.0)
            .attr("fill", "url(#floorGlow)")
            .into(),
    );

    nodes
}

fn city_label(viewer: &Viewer) -> Element {
    Element::new("g")
        .attr("transform", "translate(40, 60)")
        .child(
            Element::new("text")
                .attr("fill", "cyan")
                .attr("font-family", "Verdana, sans-serif")
                .attr("font-size", "28")
                .attr("font-weight", "900")
                .text(format!("{} CITY", viewer.display_name.to_uppercase())),
        )
        .child(
            Element::new("text")
                .attr("y", "25")
                .attr("fill", "#ff00cc")
                .attr("font-family", "Courier New, monospace")
                .attr("font-size", "14")
                .attr("font-weight", "bold")
                .attr("letter-spacing", "2")
                .text(format!(
                    "POP: {} // BLOCKS: {}",
                    viewer.follower_count, viewer.public_item_count
                )),
        )
}

fn building_group(
    entity: &Entity,
    geom: BuildingGeom,
    details: &DetailSet,
    draw_index: usize,
    opts: &CityscapeOpts,
) -> Element {
    let palette = theme::resolve_palette(&entity.mood);
    let mood_tag = theme::resolve_mood(&entity.mood).tag();
    let (cx, cy) = (geom.base.x, geom.base.y);
    let (w, h) = (geom.w, geom.h);

    let left_face = format!(
        "M {} {} l 0 {} l {} {} l 0 {} z",
        fmt_num(cx - w),
        fmt_num(cy - h + w / 2.0),
        fmt_num(h),
        fmt_num(w),
        fmt_num(w / 2.0),
        fmt_num(-h),
    );
    let right_face = format!(
        "M {} {} l 0 {} l {} {} l 0 {} z",
        fmt_num(cx + w),
        fmt_num(cy - h + w / 2.0),
        fmt_num(h),
        fmt_num(-w),
        fmt_num(w / 2.0),
        fmt_num(-h),
    );
    let top_face = format!(
        "M {} {} l {} {} l {} {} l {} {} z",
        fmt_num(cx),
        fmt_num(cy - h),
        fmt_num(w),
        fmt_num(w / 2.0),
        fmt_num(-w),
        fmt_num(w / 2.0),
        fmt_num(-w),
        fmt_num(-w / 2.0),
    );

    let fade = timeline::fade_in(draw_index, opts.fade_step_s, opts.fade_dur_s);
    let mut group = Element::new("g")
        .attr("opacity", "0")
        .child(
            Element::new("animate")
                .attr("attributeName", "opacity")
                .attr("values", "0;1")
                .attr("dur", seconds(fade.dur_s))
                .attr("begin", seconds(fade.begin_s))
                .attr("fill", "freeze"),
        )
        .child(
            Element::new("ellipse")
                .attr_num("cx", cx)
                .attr_num("cy", cy + w / 2.0)
                .attr_num("rx", w * 1.5)
                .attr_num("ry", w * 0.8)
                .attr("fill", "black")
                .attr("opacity", "0.4"),
        )
        .child(
            Element::new("path")
                .attr("d", left_face.clone())
                .attr("fill", format!("url(#gradLeft-{mood_tag})")),
        )
        .child(
            Element::new("path")
                .attr("d", right_face.clone())
                .attr("fill", format!("url(#gradRight-{mood_tag})")),
        )
        .child(
            Element::new("path")
                .attr("d", top_face)
                .attr("fill", palette.highlight)
                .attr("fill-opacity", "0.9"),
        )
        .child(glow_edge(&left_face, palette.base))
        .child(glow_edge(&right_face, palette.base));

    for row in &details.window_rows {
        let wy = cy - opts.tuning.window_margin - row.floor as f64 * opts.tuning.floor_height;
        if row.right {
            group = group.child(
                Element::new("path")
                    .attr(
                        "d",
                        format!(
                            "M {} {} l {} 4",
                            fmt_num(cx + 4.0),
                            fmt_num(wy + 2.0),
                            fmt_num(w - 8.0)
                        ),
                    )
                    .attr("stroke", palette.highlight)
                    .attr("stroke-width", "2")
                    .attr("stroke-opacity", "0.6"),
            );
        }
        if row.left {
            group = group.child(
                Element::new("path")
                    .attr(
                        "d",
                        format!(
                            "M {} {} l {} -4",
                            fmt_num(cx - w + 4.0),
                            fmt_num(wy + 4.0),
                            fmt_num(w - 8.0)
                        ),
                    )
                    .attr("stroke", palette.highlight)
                    .attr("stroke-width", "2")
                    .attr("stroke-opacity", "0.4"),
            );
        }
    }

    if let Some(beacon) = details.beacon {
        group = group
            .child(
                Element::new("line")
                    .attr_num("x1", cx)
                    .attr_num("y1", cy - h)
                    .attr_num("x2", cx)
                    .attr_num("y2", cy - h - 20.0)
                    .attr("stroke", palette.highlight)
                    .attr("stroke-width", "1.5"),
            )
            .child(
                Element::new("circle")
                    .attr_num("cx", cx)
                    .attr_num("cy", cy - h - 20.0)
                    .attr("r", "1.5")
                    .attr("fill", "white")
                    .child(
                        Element::new("animate")
                            .attr("attributeName", "opacity")
                            .attr("values", "0.2;1;0.2")
                            .attr("dur", seconds(beacon.blink_s))
                            .attr("repeatCount", "indefinite"),
                    ),
            );
    }

    let lang = entity.primary_language.as_deref().unwrap_or("N/A");
    group = group.child(Element::new("title").text(format!(
        "{} ({}) | Stars: {}",
        entity.name, lang, entity.popularity_score
    )));

    Element::new("a")
        .attr("href", entity.link_url.clone())
        .attr("target", "_blank")
        .child(group)
}

fn glow_edge(d: &str, color: &str) -> Element {
    Element::new("path")
        .attr("d", d)
        .attr("fill", "none")
        .attr("stroke", color)
        .attr("stroke-width", "0.5")
        .attr("opacity", "0.5")
}
