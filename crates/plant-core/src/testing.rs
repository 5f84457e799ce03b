//! Recording map surface for tests

use std::cell::{Cell, RefCell};

use crate::domain::{LngLat, PlantId};
use crate::overlay::{IconStyle, MapSurface, MarkerSpec, PolygonSpec, PolygonStyle};

#[derive(Debug, Clone)]
pub struct FakeObject {
    pub record_id: Option<PlantId>,
    pub position: Option<LngLat>,
    pub path: Vec<LngLat>,
    pub icon: Option<IconStyle>,
    pub style: Option<PolygonStyle>,
    pub draggable: bool,
    pub attached: bool,
}

pub struct FakeSurface {
    objects: RefCell<Vec<FakeObject>>,
    zoom: Cell<f64>,
    center: Cell<LngLat>,
    crosshair: Cell<bool>,
    focused: Cell<Option<(LngLat, f64)>>,
}

impl FakeSurface {
    pub fn new(zoom: f64) -> Self {
        Self {
            objects: RefCell::new(Vec::new()),
            zoom: Cell::new(zoom),
            center: Cell::new(LngLat::new(118.9067, 32.1014)),
            crosshair: Cell::new(false),
            focused: Cell::new(None),
        }
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.zoom.set(zoom);
    }

    pub fn icon(&self, handle: usize) -> Option<IconStyle> {
        self.objects.borrow()[handle].icon.clone()
    }

    pub fn attached(&self) -> Vec<FakeObject> {
        self.objects.borrow().iter().filter(|o| o.attached).cloned().collect()
    }

    pub fn attached_count(&self) -> usize {
        self.objects.borrow().iter().filter(|o| o.attached).count()
    }

    /// Attached objects mirroring `id`
    pub fn attached_for(&self, id: &PlantId) -> usize {
        self.objects
            .borrow()
            .iter()
            .filter(|o| o.attached && o.record_id.as_ref() == Some(id))
            .count()
    }

    pub fn crosshair(&self) -> bool {
        self.crosshair.get()
    }

    pub fn focused(&self) -> Option<(LngLat, f64)> {
        self.focused.get()
    }

    fn push(&self, object: FakeObject) -> usize {
        let mut objects = self.objects.borrow_mut();
        objects.push(object);
        objects.len() - 1
    }
}

impl MapSurface for FakeSurface {
    type Handle = usize;

    fn add_marker(&self, marker: &MarkerSpec) -> usize {
        self.push(FakeObject {
            record_id: marker.record_id.clone(),
            position: Some(marker.position),
            path: Vec::new(),
            icon: Some(marker.icon.clone()),
            style: None,
            draggable: marker.draggable,
            attached: false,
        })
    }

    fn add_polygon(&self, polygon: &PolygonSpec) -> usize {
        self.push(FakeObject {
            record_id: polygon.record_id.clone(),
            position: None,
            path: polygon.path.clone(),
            icon: None,
            style: Some(polygon.style),
            draggable: false,
            attached: false,
        })
    }

    fn set_icon(&self, handle: &usize, icon: &IconStyle) {
        self.objects.borrow_mut()[*handle].icon = Some(icon.clone());
    }

    fn set_position(&self, handle: &usize, position: LngLat) {
        self.objects.borrow_mut()[*handle].position = Some(position);
    }

    fn position(&self, handle: &usize) -> Option<LngLat> {
        self.objects.borrow()[*handle].position
    }

    fn attach(&self, handle: &usize) {
        self.objects.borrow_mut()[*handle].attached = true;
    }

    fn detach(&self, handle: &usize) {
        self.objects.borrow_mut()[*handle].attached = false;
    }

    fn zoom(&self) -> f64 {
        self.zoom.get()
    }

    fn center(&self) -> LngLat {
        self.center.get()
    }

    fn focus(&self, center: LngLat, zoom: f64) {
        self.center.set(center);
        self.zoom.set(zoom);
        self.focused.set(Some((center, zoom)));
    }

    fn set_crosshair(&self, enabled: bool) {
        self.crosshair.set(enabled);
    }
}
