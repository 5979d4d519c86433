use std::fs;
use std::path::{Path, PathBuf};

use ccg_core::errors::{CcgError, ErrorInfo};
use ccg_core::{EntityInstance, Scene};
use ccg_var::geometry::footprint;
use serde::{Deserialize, Serialize};

use crate::serde::with_suffix;
use crate::taxonomy::{EntityClass, Taxonomy};

fn render_error(code: &str, message: impl Into<String>) -> CcgError {
    CcgError::Render(ErrorInfo::new(code, message))
}

/// Display options for [`render_scene_svg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Fill colour of the ego footprint.
    #[serde(default = "RenderOptions::default_ego_color")]
    pub ego_color: String,
    /// Fill colour of other vehicles.
    #[serde(default = "RenderOptions::default_vehicle_color")]
    pub vehicle_color: String,
    /// Fill colour of pedestrians.
    #[serde(default = "RenderOptions::default_pedestrian_color")]
    pub pedestrian_color: String,
    /// Half extent of the square viewport in scene units.
    #[serde(default = "RenderOptions::default_unit_len")]
    pub unit_len: f64,
    /// Output width in pixels.
    #[serde(default = "RenderOptions::default_pixels")]
    pub width: u32,
    /// Output height in pixels.
    #[serde(default = "RenderOptions::default_pixels")]
    pub height: u32,
}

impl RenderOptions {
    fn default_ego_color() -> String {
        "lightblue".to_string()
    }
    fn default_vehicle_color() -> String {
        "lightgreen".to_string()
    }
    fn default_pedestrian_color() -> String {
        "red".to_string()
    }
    fn default_unit_len() -> f64 {
        15.0
    }
    fn default_pixels() -> u32 {
        480
    }

    fn color_for(&self, class: EntityClass) -> &str {
        if class.is_a(EntityClass::EgoCar) {
            &self.ego_color
        } else if class.is_a(EntityClass::Car) {
            &self.vehicle_color
        } else if class.is_a(EntityClass::Pedestrian) {
            &self.pedestrian_color
        } else {
            "black"
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ego_color: Self::default_ego_color(),
            vehicle_color: Self::default_vehicle_color(),
            pedestrian_color: Self::default_pedestrian_color(),
            unit_len: Self::default_unit_len(),
            width: Self::default_pixels(),
            height: Self::default_pixels(),
        }
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn draw_entity(
    entity: &EntityInstance,
    origin: (f64, f64),
    color: &str,
    parts: &mut Vec<String>,
) {
    let points: Vec<String> = footprint(&entity.values)
        .iter()
        .map(|(x, y)| format!("{:.3},{:.3}", x + origin.0, y + origin.1))
        .collect();
    parts.push(format!(
        "<polygon points='{}' fill='{}' stroke='none'><title>{}</title></polygon>",
        points.join(" "),
        escape_xml(color),
        escape_xml(&entity.name)
    ));
    let (hx, hy) = entity.values.orientation.heading();
    let cx = entity.values.lateral_offset + origin.0;
    let cy = entity.values.longitudinal_offset + origin.1;
    let reach = 0.2 * entity.values.velocity;
    parts.push(format!(
        "<line x1='{:.3}' y1='{:.3}' x2='{:.3}' y2='{:.3}' stroke='gray' stroke-width='0.15' />",
        cx,
        cy,
        cx + hx * reach,
        cy + hy * reach
    ));
}

/// Renders an accepted scene as an SVG document.
///
/// Entities are placed relative to the ego offsets; the scene y axis points up.
pub fn render_scene_svg(scene: &Scene, options: &RenderOptions) -> Result<String, CcgError> {
    if !(options.unit_len.is_finite() && options.unit_len > 0.0) {
        return Err(render_error("bad_unit_len", "unit_len must be positive"));
    }
    let ego = scene
        .single_ego()
        .ok_or_else(|| render_error("ego_cardinality", "rendering needs exactly one ego"))?;
    let origin = (ego.values.lateral_offset, ego.values.longitudinal_offset);
    let taxonomy = Taxonomy::default();
    let u = options.unit_len;
    let mut parts = vec![format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='{x} {x} {s} {s}'>",
        w = options.width,
        h = options.height,
        x = -u,
        s = 2.0 * u
    )];
    parts.push("<g transform='scale(1,-1)'>".to_string());
    for entity in scene {
        let color = options.color_for(taxonomy.class_of(entity.kind));
        draw_entity(entity, origin, color, &mut parts);
    }
    parts.push("</g>".to_string());
    parts.push("</svg>".to_string());
    Ok(parts.join(""))
}

/// Writes an SVG document, appending `.svg` when the path lacks it.
pub fn save_svg(path: &Path, svg: &str) -> Result<PathBuf, CcgError> {
    let path = with_suffix(path, ".svg");
    fs::write(&path, svg).map_err(|err| {
        CcgError::Render(
            ErrorInfo::new("svg_write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(path)
}
