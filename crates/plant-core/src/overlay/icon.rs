//! Icon Resolution and Sizing

use serde::{Deserialize, Serialize};

use super::info::escape_html;
use crate::domain::SpeciesDefault;

/// Fractional point inside the icon box pinned to the coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRatio {
    pub x: f64,
    pub y: f64,
}

impl AnchorRatio {
    /// Bottom-center, slightly above the edge
    pub const DEFAULT: AnchorRatio = AnchorRatio { x: 0.5, y: 0.95 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pixel offset placing the anchor on the coordinate for a `size` box
    pub fn offset(&self, size: u32) -> PixelOffset {
        let size = f64::from(size);
        PixelOffset {
            x: js_round(-self.x * size),
            y: -js_round(self.y * size),
        }
    }
}

impl Default for AnchorRatio {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelOffset {
    pub x: i32,
    pub y: i32,
}

/// Round half toward positive infinity, matching the map SDK's pixel math
fn js_round(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Icon edge length in pixels for a zoom level
pub fn icon_size_for_zoom(zoom: f64) -> u32 {
    if zoom <= 14.0 {
        14
    } else if zoom <= 16.0 {
        20
    } else if zoom <= 18.0 {
        28
    } else {
        36
    }
}

/// Record icon, else species icon, else the fallback
pub fn resolve_icon<'a>(
    explicit: Option<&'a str>,
    species: Option<&'a SpeciesDefault>,
    fallback: &'a str,
) -> &'a str {
    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| species.and_then(|s| s.icon()))
        .unwrap_or(fallback)
}

/// Species anchor when it defines either ratio, else `default`.
///
/// A species giving only one ratio gets 0.5 horizontally and 1.0 vertically
/// for the missing one.
pub fn resolve_anchor(species: Option<&SpeciesDefault>, default: AnchorRatio) -> AnchorRatio {
    match species {
        Some(s) if s.anchor_x.is_some() || s.anchor_y.is_some() => {
            AnchorRatio::new(s.anchor_x.unwrap_or(0.5), s.anchor_y.unwrap_or(1.0))
        }
        _ => default,
    }
}

/// A resolved marker icon, re-rendered on every zoom change
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub url: String,
    pub anchor: AnchorRatio,
    /// Draft markers get a distinct CSS class
    pub draft: bool,
}

impl MarkerIcon {
    pub fn new(url: impl Into<String>, anchor: AnchorRatio) -> Self {
        Self { url: url.into(), anchor, draft: false }
    }

    pub fn draft(mut self) -> Self {
        self.draft = true;
        self
    }

    pub fn render(&self, size: u32) -> IconStyle {
        let class = if self.draft { "cp-marker temp" } else { "cp-marker" };
        IconStyle {
            html: format!(
                r#"<div class="{}"><img src="{}" style="width:{}px;height:{}px"/></div>"#,
                class,
                escape_html(&self.url),
                size,
                size
            ),
            size,
            offset: self.anchor.offset(size),
        }
    }
}

/// Marker content and offset handed to the map surface
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub html: String,
    pub size: u32,
    pub offset: PixelOffset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_steps() {
        assert_eq!(icon_size_for_zoom(3.0), 14);
        assert_eq!(icon_size_for_zoom(14.0), 14);
        assert_eq!(icon_size_for_zoom(14.5), 20);
        assert_eq!(icon_size_for_zoom(16.0), 20);
        assert_eq!(icon_size_for_zoom(17.0), 28);
        assert_eq!(icon_size_for_zoom(18.0), 28);
        assert_eq!(icon_size_for_zoom(18.2), 36);
        assert_eq!(icon_size_for_zoom(20.0), 36);
    }

    #[test]
    fn test_default_anchor_offset() {
        assert_eq!(AnchorRatio::DEFAULT.offset(14), PixelOffset { x: -7, y: -13 });
        assert_eq!(AnchorRatio::DEFAULT.offset(28), PixelOffset { x: -14, y: -27 });
        assert_eq!(AnchorRatio::DEFAULT.offset(36), PixelOffset { x: -18, y: -34 });
    }

    #[test]
    fn test_offset_rounds_half_up() {
        assert_eq!(AnchorRatio::new(0.25, 0.25).offset(10), PixelOffset { x: -2, y: -3 });
    }

    #[test]
    fn test_icon_precedence() {
        let species = SpeciesDefault {
            name: "Cherry".to_string(),
            icon: Some("images/cherry.png".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_icon(Some("mine.png"), Some(&species), "tree.png"), "mine.png");
        assert_eq!(resolve_icon(None, Some(&species), "tree.png"), "images/cherry.png");
        assert_eq!(resolve_icon(Some(""), Some(&species), "tree.png"), "images/cherry.png");
        assert_eq!(resolve_icon(None, None, "tree.png"), "tree.png");

        let bare = SpeciesDefault { name: "Maple".to_string(), ..Default::default() };
        assert_eq!(resolve_icon(None, Some(&bare), "tree.png"), "tree.png");
    }

    #[test]
    fn test_anchor_precedence() {
        let custom = SpeciesDefault {
            name: "Palm".to_string(),
            anchor_x: Some(0.3),
            anchor_y: Some(0.8),
            ..Default::default()
        };
        assert_eq!(resolve_anchor(Some(&custom), AnchorRatio::DEFAULT), AnchorRatio::new(0.3, 0.8));

        let only_x = SpeciesDefault { anchor_x: Some(0.2), ..Default::default() };
        assert_eq!(resolve_anchor(Some(&only_x), AnchorRatio::DEFAULT), AnchorRatio::new(0.2, 1.0));

        let plain = SpeciesDefault::default();
        assert_eq!(resolve_anchor(Some(&plain), AnchorRatio::DEFAULT), AnchorRatio::DEFAULT);
        assert_eq!(resolve_anchor(None, AnchorRatio::DEFAULT), AnchorRatio::DEFAULT);
    }

    #[test]
    fn test_render_is_stable() {
        let icon = MarkerIcon::new("images/tree.png", AnchorRatio::DEFAULT);
        let a = icon.render(28);
        let b = icon.render(28);
        assert_eq!(a, b);
        assert!(a.html.contains("width:28px;height:28px"));
        assert!(icon.clone().draft().render(28).html.contains("cp-marker temp"));
    }
}
