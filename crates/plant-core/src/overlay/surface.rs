//! Map Surface Trait
//!
//! The slice of the map SDK the core relies on. Objects are created
//! detached; `attach` puts them on the map and `detach` removes them without
//! destroying them.

use super::icon::IconStyle;
use super::info::InfoContent;
use crate::domain::{LngLat, PlantId};

pub trait MapSurface {
    /// SDK object handle (marker or polygon)
    type Handle: Clone;

    fn add_marker(&self, marker: &MarkerSpec) -> Self::Handle;

    fn add_polygon(&self, polygon: &PolygonSpec) -> Self::Handle;

    /// Replace a marker's content and reapply its pixel offset
    fn set_icon(&self, handle: &Self::Handle, icon: &IconStyle);

    fn set_position(&self, handle: &Self::Handle, position: LngLat);

    /// Current marker position; `None` for polygons
    fn position(&self, handle: &Self::Handle) -> Option<LngLat>;

    fn attach(&self, handle: &Self::Handle);

    fn detach(&self, handle: &Self::Handle);

    fn zoom(&self) -> f64;

    fn center(&self) -> LngLat;

    /// Move the viewport
    fn focus(&self, center: LngLat, zoom: f64);

    /// Toggle the crosshair cursor used while drawing areas
    fn set_crosshair(&self, enabled: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Record this marker mirrors; `None` for the placement preview
    pub record_id: Option<PlantId>,
    pub position: LngLat,
    pub title: String,
    pub icon: IconStyle,
    pub draggable: bool,
    /// Shown by the single click handler
    pub info: Option<InfoContent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSpec {
    /// Record this polygon mirrors; `None` for the drawing preview
    pub record_id: Option<PlantId>,
    pub path: Vec<LngLat>,
    pub style: PolygonStyle,
    pub info: Option<InfoContent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub fill_color: &'static str,
    pub stroke_color: &'static str,
    pub fill_opacity: f64,
}

impl PolygonStyle {
    pub const PLANTED: PolygonStyle = PolygonStyle {
        fill_color: "#80d8ff",
        stroke_color: "#0091ea",
        fill_opacity: 0.4,
    };

    pub const DRAFT: PolygonStyle = PolygonStyle {
        fill_color: "#ffcdd2",
        stroke_color: "#e57373",
        fill_opacity: 0.35,
    };
}
