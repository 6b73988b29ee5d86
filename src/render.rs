use crate::cue::ThumbnailRegion;
use serde::Serialize;
use std::collections::BTreeMap;

/// Display surface owned by the host player
pub trait RenderPort {
    /// Apply the visual properties of `region` and move the box to `x_offset_px`.
    fn apply_region(&mut self, region: &ThumbnailRegion, x_offset_px: f64);

    /// Move the box without touching its visual properties.
    fn apply_offset(&mut self, x_offset_px: f64);

    fn show(&mut self);

    fn hide(&mut self);

    /// Whether the host's own time tooltip stays visible next to the thumbnail.
    fn set_time_tooltip_visible(&mut self, _visible: bool) {}
}

/// Inline style properties for a region
pub fn region_style(region: &ThumbnailRegion) -> Vec<(&'static str, String)> {
    match region {
        ThumbnailRegion::FullImage { image_url } => {
            vec![("background", format!("url(\"{}\")", image_url))]
        }
        ThumbnailRegion::SpriteCrop {
            image_url,
            x,
            y,
            width,
            height,
        } => vec![
            (
                "background",
                format!("url(\"{}\") no-repeat -{}px -{}px", image_url, x, y),
            ),
            ("width", format!("{}px", width)),
            ("height", format!("{}px", height)),
        ],
    }
}

pub fn translate_x(x_offset_px: f64) -> String {
    format!("translateX({}px)", x_offset_px)
}

/// A display element that keeps its state as inline style directives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineStyleElement {
    style: BTreeMap<String, String>,
    time_tooltip_visible: bool,
    region_updates: usize,
}

impl InlineStyleElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.style
    }

    pub fn is_visible(&self) -> bool {
        self.style("opacity") == Some("1")
    }

    pub fn time_tooltip_visible(&self) -> bool {
        self.time_tooltip_visible
    }

    /// How many times region properties were (re)applied
    pub fn region_updates(&self) -> usize {
        self.region_updates
    }

    fn set(&mut self, property: &str, value: String) {
        self.style.insert(property.to_string(), value);
    }
}

impl RenderPort for InlineStyleElement {
    fn apply_region(&mut self, region: &ThumbnailRegion, x_offset_px: f64) {
        // A full image after a sprite must not inherit the sprite's box size.
        self.style.remove("width");
        self.style.remove("height");
        for (property, value) in region_style(region) {
            self.set(property, value);
        }
        self.region_updates += 1;
        self.apply_offset(x_offset_px);
    }

    fn apply_offset(&mut self, x_offset_px: f64) {
        self.set("transform", translate_x(x_offset_px));
    }

    fn show(&mut self) {
        self.set("opacity", "1".to_string());
    }

    fn hide(&mut self) {
        self.set("opacity", "0".to_string());
    }

    fn set_time_tooltip_visible(&mut self, visible: bool) {
        self.time_tooltip_visible = visible;
    }
}
