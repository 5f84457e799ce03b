//! Interaction Modes
//!
//! `Idle`, `PlacingPoint` and `DrawingArea` are mutually exclusive. Every
//! transition either completes fully or returns a validation error without
//! touching any state.

use super::AnnotationSession;
use crate::domain::{LngLat, PlantId, PlantRecord};
use crate::error::{PlantResult, ValidationError};
use crate::overlay::{icon_size_for_zoom, MapSurface, MarkerIcon, MarkerSpec, PolygonSpec, PolygonStyle};
use crate::repository::KvStore;

/// Current interaction mode and the unpersisted preview objects it owns
#[derive(Debug, Clone)]
pub enum Mode<H> {
    Idle,
    PlacingPoint {
        /// Draggable marker showing where the plant will go
        preview: H,
        icon: MarkerIcon,
    },
    DrawingArea {
        path: Vec<LngLat>,
        /// Polygon preview, absent until the first vertex
        draft: Option<H>,
    },
}

impl<H> Mode<H> {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Idle => ModeKind::Idle,
            Mode::PlacingPoint { .. } => ModeKind::PlacingPoint,
            Mode::DrawingArea { .. } => ModeKind::DrawingArea,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeKind {
    #[default]
    Idle,
    PlacingPoint,
    DrawingArea,
}

/// Enablement of the mode controls, derived from mode and species selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub mode: ModeKind,
    /// The place button starts placing, or confirms while placing
    pub place_enabled: bool,
    pub place_confirms: bool,
    pub area_enabled: bool,
    pub finish_enabled: bool,
    pub cancel_enabled: bool,
    /// Hide/show all is off while drawing an area
    pub toggle_enabled: bool,
    pub vertex_count: usize,
}

impl<S: KvStore, M: MapSurface> AnnotationSession<S, M> {
    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Vertices drawn so far in `DrawingArea`, else empty
    pub fn draft_path(&self) -> &[LngLat] {
        match &self.mode {
            Mode::DrawingArea { path, .. } => path,
            _ => &[],
        }
    }

    pub fn controls(&self) -> ControlState {
        let species_ok = self.selected_species.is_some();
        match &self.mode {
            Mode::Idle => ControlState {
                mode: ModeKind::Idle,
                place_enabled: species_ok,
                area_enabled: species_ok,
                toggle_enabled: true,
                ..Default::default()
            },
            Mode::PlacingPoint { .. } => ControlState {
                mode: ModeKind::PlacingPoint,
                place_enabled: true,
                place_confirms: true,
                cancel_enabled: true,
                toggle_enabled: true,
                ..Default::default()
            },
            Mode::DrawingArea { path, .. } => ControlState {
                mode: ModeKind::DrawingArea,
                finish_enabled: true,
                cancel_enabled: true,
                vertex_count: path.len(),
                ..Default::default()
            },
        }
    }

    /// Put a draggable preview marker at the viewport center
    pub fn start_placing(&mut self) -> PlantResult<()> {
        if !matches!(self.mode, Mode::Idle) {
            return Err(ValidationError::Busy.into());
        }
        let name = self.selected_species.clone().unwrap_or_default();
        let icon = MarkerIcon::new(
            self.species.icon_for(&name, None, &self.config.fallback_icon),
            self.species.anchor_for(&name, self.config.default_anchor),
        )
        .draft();

        let preview = self.surface.add_marker(&MarkerSpec {
            record_id: None,
            position: self.surface.center(),
            title: name,
            icon: icon.render(icon_size_for_zoom(self.surface.zoom())),
            draggable: true,
            info: None,
        });
        self.surface.attach(&preview);
        self.mode = Mode::PlacingPoint { preview, icon };
        log::debug!("placing point");
        Ok(())
    }

    /// Store a point record where the preview marker sits
    pub fn confirm_placement(&mut self) -> PlantResult<PlantId> {
        let Mode::PlacingPoint { preview, icon } = &self.mode else {
            return Err(ValidationError::NotInMode.into());
        };
        let name = self
            .selected_species
            .clone()
            .ok_or(ValidationError::NoSpeciesSelected)?;
        let position = self
            .surface
            .position(preview)
            .unwrap_or_else(|| self.surface.center());

        let resolved = self.species.resolve(&name, &self.config.fallback_icon);
        let mut record = PlantRecord::point(PlantId::generate(), name, position);
        record.description = resolved.description;
        record.season = resolved.season;
        record.icon = Some(icon.url.clone());
        let id = record.id.clone();

        self.surface.detach(preview);
        self.mode = Mode::Idle;
        self.store.append_plant(record);
        self.rebuild();
        log::info!("added point plant {}", id);
        Ok(id)
    }

    /// Begin collecting polygon vertices; existing overlays are hidden
    pub fn start_area(&mut self) -> PlantResult<()> {
        if !matches!(self.mode, Mode::Idle) {
            return Err(ValidationError::Busy.into());
        }
        self.overlays.hide_all(&self.surface);
        self.surface.set_crosshair(true);
        self.mode = Mode::DrawingArea { path: Vec::new(), draft: None };
        log::debug!("drawing area");
        Ok(())
    }

    /// Map click: move the preview, or add a vertex. Ignored while idle.
    pub fn map_click(&mut self, position: LngLat) {
        match &mut self.mode {
            Mode::Idle => {}
            Mode::PlacingPoint { preview, .. } => {
                self.surface.set_position(preview, position);
            }
            Mode::DrawingArea { path, draft } => {
                path.push(position);
                if let Some(old) = draft.take() {
                    self.surface.detach(&old);
                }
                let polygon = self.surface.add_polygon(&PolygonSpec {
                    record_id: None,
                    path: path.clone(),
                    style: PolygonStyle::DRAFT,
                    info: None,
                });
                self.surface.attach(&polygon);
                *draft = Some(polygon);
            }
        }
    }

    /// Store the drawn polygon as an area record
    pub fn finish_area(&mut self) -> PlantResult<PlantId> {
        let Mode::DrawingArea { path, .. } = &self.mode else {
            return Err(ValidationError::NotInMode.into());
        };
        if path.len() < 3 {
            return Err(ValidationError::TooFewVertices { got: path.len() }.into());
        }
        let name = self
            .selected_species
            .clone()
            .ok_or(ValidationError::NoSpeciesSelected)?;

        let Mode::DrawingArea { path, draft } = std::mem::replace(&mut self.mode, Mode::Idle) else {
            return Err(ValidationError::NotInMode.into());
        };
        if let Some(draft) = draft {
            self.surface.detach(&draft);
        }
        self.surface.set_crosshair(false);
        self.overlays.show_all(&self.surface);

        let resolved = self.species.resolve(&name, &self.config.fallback_icon);
        let mut record = PlantRecord::area(PlantId::generate(), name, path);
        record.description = resolved.description;
        record.season = resolved.season;
        record.icon = Some(resolved.icon);
        let id = record.id.clone();

        self.store.append_plant(record);
        self.rebuild();
        log::info!("added area plant {}", id);
        Ok(id)
    }

    /// Abandon the current mode, discarding previews
    pub fn cancel(&mut self) {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Idle => {}
            Mode::PlacingPoint { preview, .. } => {
                self.surface.detach(&preview);
                self.overlays.show_all(&self.surface);
            }
            Mode::DrawingArea { draft, .. } => {
                if let Some(draft) = draft {
                    self.surface.detach(&draft);
                }
                self.surface.set_crosshair(false);
                self.overlays.show_all(&self.surface);
            }
        }
    }

    /// Resize every icon for the surface's current zoom, preview included
    pub fn zoom_changed(&mut self) {
        let zoom = self.surface.zoom();
        self.overlays.resize_for_zoom(&self.surface, zoom);
        if let Mode::PlacingPoint { preview, icon } = &self.mode {
            self.surface.set_icon(preview, &icon.render(icon_size_for_zoom(zoom)));
        }
    }

    /// Hide every overlay, or show them again. Returns whether they are
    /// now hidden. Ignored while drawing an area.
    pub fn toggle_all_overlays(&mut self) -> bool {
        if matches!(self.mode, Mode::DrawingArea { .. }) {
            return self.overlays.all_hidden();
        }
        if self.overlays.all_hidden() {
            self.overlays.show_all(&self.surface);
        } else {
            self.overlays.hide_all(&self.surface);
        }
        self.overlays.all_hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{Geometry, SpeciesDraft};
    use crate::error::PlantError;
    use crate::repository::MemoryKvStore;
    use crate::testing::FakeSurface;

    fn session(kv: &MemoryKvStore) -> AnnotationSession<&MemoryKvStore, FakeSurface> {
        let mut session = AnnotationSession::new(AppConfig::default(), kv, FakeSurface::new(17.0));
        session
            .add_species(SpeciesDraft {
                name: "Cherry".to_string(),
                ..Default::default()
            })
            .unwrap();
        session
    }

    fn validation(err: PlantError) -> ValidationError {
        match err {
            PlantError::Validation(v) => v,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_controls_follow_species_selection() {
        let kv = MemoryKvStore::new();
        let mut session = session(&kv);
        assert!(session.controls().place_enabled && session.controls().area_enabled);

        session.select_species("__add_new__");
        let controls = session.controls();
        assert!(!controls.place_enabled && !controls.area_enabled);
        assert!(!controls.cancel_enabled);
    }

    #[test]
    fn test_place_confirm_delete_restores_counts() {
        let kv = MemoryKvStore::new();
        let mut session = session(&kv);
        let before = session.local_plants().len();
        let overlays_before = session.overlays().len();

        session.start_placing().unwrap();
        assert_eq!(session.mode(), ModeKind::PlacingPoint);
        assert!(session.controls().place_confirms);
        assert!(!session.controls().area_enabled);

        session.map_click(LngLat::new(118.91, 32.1));
        let id = session.confirm_placement().unwrap();
        assert_eq!(session.mode(), ModeKind::Idle);
        assert_eq!(session.local_plants().len(), before + 1);
        assert_eq!(session.surface().attached_for(&id), 1);

        let record = session.find_plant(&id).unwrap();
        assert_eq!(record.geometry, Geometry::Point { position: LngLat::new(118.91, 32.1) });
        assert_eq!(record.icon(), Some("images/tree.png"));

        session.delete_plant(&id).unwrap();
        assert_eq!(session.local_plants().len(), before);
        assert_eq!(session.overlays().len(), overlays_before);
        assert!(session.overlays().find_by_record_id(&id).is_none());
        assert_eq!(session.surface().attached_for(&id), 0);
        // the preview is gone as well
        assert_eq!(session.surface().attached_count(), overlays_before);
    }

    #[test]
    fn test_click_while_placing_moves_preview() {
        let kv = MemoryKvStore::new();
        let mut session = session(&kv);
        session.start_placing().unwrap();
        let target = LngLat::new(1.0, 2.0);
        session.map_click(target);

        let previews: Vec<_> = session
            .surface()
            .attached()
            .into_iter()
            .filter(|o| o.record_id.is_none())
            .collect();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].position, Some(target));
        assert!(previews[0].draggable);
    }

    #[test]
    fn test_confirm_without_species_is_rejected() {
        let kv = MemoryKvStore::new();
        let mut session = session(&kv);
        session.start_placing().unwrap();
        session.select_species("");

        let err = validation(session.confirm_placement().unwrap_err());
        assert_eq!(err, ValidationError::NoSpeciesSelected);
        assert_eq!(session.mode(), ModeKind::PlacingPoint);
        assert!(session.local_plants().is_empty());
    }

    #[test]
    fn test_two_vertex_area_fails_and_keeps_path() {
        let kv = MemoryKvStore::new();
        let mut session = session(&kv);
        session.start_area().unwrap();
        assert!(session.surface().crosshair());
        session.map_click(LngLat::new(0.0, 0.0));
        session.map_click(LngLat::new(1.0, 0.0));

        let err = validation(session.finish_area().unwrap_err());
        assert_eq!(err, ValidationError::TooFewVertices { got: 2 });
        assert_eq!(session.mode(), ModeKind::DrawingArea);
        assert_eq!(session.draft_path().len(), 2);
        assert!(session.local_plants().is_empty());
        assert!(kv.raw("campus_plant_local").is_none());
    }

    #[test]
    fn test_finish_area_stores_record_and_restores_overlays() {
        let kv = MemoryKvStore::new()
            .with_value(
                "campus_plant_local",
                r#"[{"id": "old", "type": "point", "name": "Maple", "position": [5, 5]}]"#,
            );
        let mut session = session(&kv);
        assert_eq!(session.surface().attached_count(), 1);

        session.start_area().unwrap();
        assert_eq!(session.surface().attached_count(), 0);
        for (x, y) in [(0.0, 0.0), (3.0, 0.0), (3.0, 3.0)] {
            session.map_click(LngLat::new(x, y));
        }
        // only the latest draft polygon is attached
        assert_eq!(session.surface().attached_count(), 1);
        assert_eq!(session.controls().vertex_count, 3);

        let id = session.finish_area().unwrap();
        assert_eq!(session.mode(), ModeKind::Idle);
        assert!(!session.surface().crosshair());
        assert!(session.draft_path().is_empty());
        assert!(!session.overlays().all_hidden());
        // maple marker + area polygon + area center icon
        assert_eq!(session.surface().attached_count(), 3);
        assert_eq!(session.surface().attached_for(&id), 2);
        assert_eq!(session.store().load_plants().len(), 2);
    }

    #[test]
    fn test_cancel_restores_idle_state() {
        let kv = MemoryKvStore::new().with_value(
            "campus_plant_local",
            r#"[{"id": "old", "type": "point", "name": "Maple", "position": [5, 5]}]"#,
        );
        let mut session = session(&kv);

        session.start_area().unwrap();
        session.map_click(LngLat::new(0.0, 0.0));
        session.cancel();
        assert_eq!(session.mode(), ModeKind::Idle);
        assert!(!session.surface().crosshair());
        assert_eq!(session.surface().attached_count(), 1);
        assert!(session.controls().area_enabled);

        session.start_placing().unwrap();
        session.cancel();
        assert_eq!(session.surface().attached_count(), 1);
        assert_eq!(session.local_plants().len(), 1);
    }

    #[test]
    fn test_modes_are_exclusive() {
        let kv = MemoryKvStore::new();
        let mut session = session(&kv);
        session.start_placing().unwrap();
        assert_eq!(validation(session.start_area().unwrap_err()), ValidationError::Busy);
        assert_eq!(
            validation(session.finish_area().unwrap_err()),
            ValidationError::NotInMode
        );
    }

    #[test]
    fn test_zoom_resizes_preview() {
        let kv = MemoryKvStore::new();
        let mut session = session(&kv);
        session.start_placing().unwrap();
        let preview = session
            .surface()
            .attached()
            .into_iter()
            .find(|o| o.record_id.is_none())
            .unwrap();
        assert_eq!(preview.icon.unwrap().size, 28);

        session.surface().set_zoom(13.0);
        session.zoom_changed();
        let preview = session
            .surface()
            .attached()
            .into_iter()
            .find(|o| o.record_id.is_none())
            .unwrap();
        let icon = preview.icon.unwrap();
        assert_eq!(icon.size, 14);
        assert!(icon.html.contains("cp-marker temp"));
    }

    #[test]
    fn test_toggle_all_overlays() {
        let kv = MemoryKvStore::new().with_value(
            "campus_plant_local",
            r#"[{"id": "old", "type": "point", "name": "Maple", "position": [5, 5]}]"#,
        );
        let mut session = session(&kv);
        assert!(session.toggle_all_overlays());
        assert_eq!(session.surface().attached_count(), 0);
        assert!(!session.toggle_all_overlays());
        assert_eq!(session.surface().attached_count(), 1);
    }

    #[test]
    fn test_cancel_placing_shows_hidden_overlays() {
        let kv = MemoryKvStore::new().with_value(
            "campus_plant_local",
            r#"[{"id": "old", "type": "point", "name": "Maple", "position": [5, 5]}]"#,
        );
        let mut session = session(&kv);
        assert!(session.toggle_all_overlays());
        session.start_placing().unwrap();
        assert_eq!(session.surface().attached_count(), 1);

        session.cancel();
        assert!(!session.overlays().all_hidden());
        assert_eq!(session.surface().attached_count(), 1);
        assert_eq!(session.surface().attached_for(&PlantId::from("old")), 1);
    }

    #[test]
    fn test_toggle_is_ignored_while_drawing() {
        let kv = MemoryKvStore::new().with_value(
            "campus_plant_local",
            r#"[{"id": "old", "type": "point", "name": "Maple", "position": [5, 5]}]"#,
        );
        let mut session = session(&kv);
        assert!(session.controls().toggle_enabled);

        session.start_area().unwrap();
        assert!(!session.controls().toggle_enabled);
        assert!(session.toggle_all_overlays());
        assert_eq!(session.surface().attached_count(), 0);

        session.cancel();
        assert!(session.controls().toggle_enabled);
        assert_eq!(session.surface().attached_count(), 1);
    }
}
