//! Overlay Synchronizer
//!
//! Keeps one live map object per record (two for areas: the polygon plus a
//! center icon) and reapplies icon sizing on zoom changes. Always rebuilt
//! from the record list after a store mutation, so it never outlives a
//! deleted record.

use super::icon::{icon_size_for_zoom, AnchorRatio, MarkerIcon};
use super::info::InfoContent;
use super::surface::{MapSurface, MarkerSpec, PolygonSpec, PolygonStyle};
use crate::domain::{Geometry, PlantId, PlantRecord, SpeciesCatalog};

/// Identifier of a live overlay, unique within one synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Icon for a point record
    Marker,
    /// Outline of an area record
    Polygon,
    /// Icon at an area's centroid
    CenterMarker,
}

#[derive(Debug, Clone)]
pub struct Overlay<H> {
    pub id: OverlayId,
    /// Lookup-only back reference; the store owns the record
    pub record_id: PlantId,
    pub kind: OverlayKind,
    pub handle: H,
    pub visible: bool,
    icon: Option<MarkerIcon>,
}

impl<H> Overlay<H> {
    pub fn icon(&self) -> Option<&MarkerIcon> {
        self.icon.as_ref()
    }
}

pub struct OverlaySynchronizer<H> {
    overlays: Vec<Overlay<H>>,
    next_id: u32,
    /// Set by hide-all; new overlays start detached while it holds
    hidden: bool,
    icon_size: u32,
    fallback_icon: String,
    default_anchor: AnchorRatio,
}

impl<H: Clone> OverlaySynchronizer<H> {
    pub fn new(fallback_icon: impl Into<String>, default_anchor: AnchorRatio) -> Self {
        Self {
            overlays: Vec::new(),
            next_id: 0,
            hidden: false,
            icon_size: icon_size_for_zoom(0.0),
            fallback_icon: fallback_icon.into(),
            default_anchor,
        }
    }

    pub fn overlays(&self) -> &[Overlay<H>] {
        &self.overlays
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn all_hidden(&self) -> bool {
        self.hidden
    }

    pub fn icon_size(&self) -> u32 {
        self.icon_size
    }

    /// Detach and forget every overlay
    pub fn clear<M: MapSurface<Handle = H>>(&mut self, surface: &M) {
        for overlay in self.overlays.drain(..) {
            surface.detach(&overlay.handle);
        }
    }

    /// Drop all overlays and recreate them from `records`
    pub fn rebuild_all<'a, M, I>(&mut self, surface: &M, records: I, species: &SpeciesCatalog)
    where
        M: MapSurface<Handle = H>,
        I: IntoIterator<Item = &'a PlantRecord>,
    {
        self.clear(surface);
        self.icon_size = icon_size_for_zoom(surface.zoom());
        for record in records {
            self.add_record(surface, record, species);
        }
        log::debug!("rebuilt {} overlays", self.overlays.len());
    }

    fn add_record<M: MapSurface<Handle = H>>(
        &mut self,
        surface: &M,
        record: &PlantRecord,
        species: &SpeciesCatalog,
    ) {
        let defaults = species.get(&record.name);
        let info = InfoContent::for_record(record, defaults);
        let icon = MarkerIcon::new(
            species.icon_for(&record.name, record.icon(), &self.fallback_icon),
            species.anchor_for(&record.name, self.default_anchor),
        );

        match &record.geometry {
            Geometry::Point { position } => {
                let handle = surface.add_marker(&MarkerSpec {
                    record_id: Some(record.id.clone()),
                    position: *position,
                    title: record.name.clone(),
                    icon: icon.render(self.icon_size),
                    draggable: false,
                    info: Some(info),
                });
                self.push(surface, record, OverlayKind::Marker, handle, Some(icon));
            }
            Geometry::Area { path } => {
                let handle = surface.add_polygon(&PolygonSpec {
                    record_id: Some(record.id.clone()),
                    path: path.clone(),
                    style: PolygonStyle::PLANTED,
                    info: Some(info.clone()),
                });
                self.push(surface, record, OverlayKind::Polygon, handle, None);

                if let Some(center) = record.geometry.centroid() {
                    let handle = surface.add_marker(&MarkerSpec {
                        record_id: Some(record.id.clone()),
                        position: center,
                        title: record.name.clone(),
                        icon: icon.render(self.icon_size),
                        draggable: false,
                        info: Some(info),
                    });
                    self.push(surface, record, OverlayKind::CenterMarker, handle, Some(icon));
                }
            }
        }
    }

    fn push<M: MapSurface<Handle = H>>(
        &mut self,
        surface: &M,
        record: &PlantRecord,
        kind: OverlayKind,
        handle: H,
        icon: Option<MarkerIcon>,
    ) {
        let visible = !self.hidden;
        if visible {
            surface.attach(&handle);
        }
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.overlays.push(Overlay {
            id,
            record_id: record.id.clone(),
            kind,
            handle,
            visible,
            icon,
        });
    }

    /// Attach or detach one overlay, keeping it in the bookkeeping.
    /// Returns false when the id is unknown.
    pub fn set_visibility<M: MapSurface<Handle = H>>(
        &mut self,
        surface: &M,
        id: OverlayId,
        visible: bool,
    ) -> bool {
        match self.overlays.iter_mut().find(|o| o.id == id) {
            Some(overlay) => {
                apply_visibility(surface, overlay, visible);
                true
            }
            None => false,
        }
    }

    pub fn hide_all<M: MapSurface<Handle = H>>(&mut self, surface: &M) {
        self.hidden = true;
        for overlay in &mut self.overlays {
            apply_visibility(surface, overlay, false);
        }
    }

    pub fn show_all<M: MapSurface<Handle = H>>(&mut self, surface: &M) {
        self.hidden = false;
        for overlay in &mut self.overlays {
            apply_visibility(surface, overlay, true);
        }
    }

    /// Re-render every icon for `zoom`. Idempotent.
    pub fn resize_for_zoom<M: MapSurface<Handle = H>>(&mut self, surface: &M, zoom: f64) {
        self.icon_size = icon_size_for_zoom(zoom);
        for overlay in &self.overlays {
            if let Some(icon) = &overlay.icon {
                surface.set_icon(&overlay.handle, &icon.render(self.icon_size));
            }
        }
    }

    /// First overlay mirroring `id` (the marker or the polygon)
    pub fn find_by_record_id(&self, id: &PlantId) -> Option<&Overlay<H>> {
        self.overlays.iter().find(|o| &o.record_id == id)
    }
}

fn apply_visibility<M: MapSurface>(surface: &M, overlay: &mut Overlay<M::Handle>, visible: bool) {
    if overlay.visible == visible {
        return;
    }
    if visible {
        surface.attach(&overlay.handle);
    } else {
        surface.detach(&overlay.handle);
    }
    overlay.visible = visible;
}
