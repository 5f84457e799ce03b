//! AMap SDK Bindings
//!
//! Thin `wasm_bindgen` imports of the AMap 2.x classes the app uses, and the
//! `MapSurface` implementation on top of them. Overlay click listeners live
//! as long as their handle.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use plant_core::config::MapConfig;
use plant_core::domain::{LngLat, PlantId};
use plant_core::overlay::{IconStyle, InfoContent, MapSurface, MarkerSpec, PolygonSpec};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = AMap, js_name = Map)]
    #[derive(Clone)]
    type JsMap;

    #[wasm_bindgen(constructor, js_namespace = AMap, js_class = "Map", catch)]
    fn new(container: &str, options: &Object) -> Result<JsMap, JsValue>;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &JsMap) -> f64;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &JsMap) -> JsLngLat;

    #[wasm_bindgen(method, js_name = setZoomAndCenter)]
    fn set_zoom_and_center(this: &JsMap, zoom: f64, center: &JsValue);

    #[wasm_bindgen(method, js_name = setDefaultCursor)]
    fn set_default_cursor(this: &JsMap, cursor: &str);

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &JsMap, event: &str, handler: &Function);

    #[wasm_bindgen(js_namespace = AMap, js_name = LngLat)]
    type JsLngLat;

    #[wasm_bindgen(method, js_name = getLng)]
    fn get_lng(this: &JsLngLat) -> f64;

    #[wasm_bindgen(method, js_name = getLat)]
    fn get_lat(this: &JsLngLat) -> f64;

    #[wasm_bindgen(js_namespace = AMap, js_name = Pixel)]
    type JsPixel;

    #[wasm_bindgen(constructor, js_namespace = AMap, js_class = "Pixel")]
    fn new(x: i32, y: i32) -> JsPixel;

    #[wasm_bindgen(js_namespace = AMap, js_name = Marker)]
    type JsMarker;

    #[wasm_bindgen(constructor, js_namespace = AMap, js_class = "Marker")]
    fn new(options: &Object) -> JsMarker;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &JsMarker, map: &JsValue);

    #[wasm_bindgen(method, js_name = setContent)]
    fn set_content(this: &JsMarker, html: &str);

    #[wasm_bindgen(method, js_name = setOffset)]
    fn set_offset(this: &JsMarker, offset: &JsPixel);

    #[wasm_bindgen(method, js_name = setPosition)]
    fn set_position(this: &JsMarker, position: &JsValue);

    #[wasm_bindgen(method, js_name = getPosition)]
    fn get_position(this: &JsMarker) -> Option<JsLngLat>;

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &JsMarker, event: &str, handler: &Function);

    #[wasm_bindgen(js_namespace = AMap, js_name = Polygon)]
    type JsPolygon;

    #[wasm_bindgen(constructor, js_namespace = AMap, js_class = "Polygon")]
    fn new(options: &Object) -> JsPolygon;

    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &JsPolygon, map: &JsValue);

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &JsPolygon, event: &str, handler: &Function);

    #[wasm_bindgen(js_namespace = AMap, js_name = InfoWindow)]
    type JsInfoWindow;

    #[wasm_bindgen(constructor, js_namespace = AMap, js_class = "InfoWindow")]
    fn new(options: &Object) -> JsInfoWindow;

    #[wasm_bindgen(method, js_name = setContent)]
    fn set_content(this: &JsInfoWindow, html: &str);

    #[wasm_bindgen(method, js_name = open)]
    fn open(this: &JsInfoWindow, map: &JsMap, position: &JsValue);
}

type Listener = Closure<dyn FnMut(JsValue)>;

/// Called with the record behind a clicked overlay
pub type SelectHandler = Rc<dyn Fn(PlantId)>;

enum MapObject {
    Marker(JsMarker),
    Polygon(JsPolygon),
}

struct ObjectEntry {
    object: MapObject,
    _on_click: Option<Listener>,
}

/// Marker or polygon owned by the overlay list or an interaction preview
#[derive(Clone)]
pub struct AMapHandle(Rc<ObjectEntry>);

pub struct AMapSurface {
    map: JsMap,
    info_window: Rc<JsInfoWindow>,
    on_select: Rc<RefCell<Option<SelectHandler>>>,
    map_listeners: RefCell<Vec<Listener>>,
}

impl AMapSurface {
    /// Create the map inside the element with id `container`
    pub fn new(container: &str, config: &MapConfig) -> Result<Self, JsValue> {
        let options = object(&[
            ("center", to_js(config.center)),
            ("zoom", JsValue::from_f64(config.zoom)),
        ])?;
        let map = JsMap::new(container, &options)?;
        let info_window = JsInfoWindow::new(&object(&[(
            "offset",
            JsPixel::new(0, -30).into(),
        )])?);
        Ok(Self {
            map,
            info_window: Rc::new(info_window),
            on_select: Rc::new(RefCell::new(None)),
            map_listeners: RefCell::new(Vec::new()),
        })
    }

    /// Receive the record id whenever an overlay is clicked
    pub fn set_on_select(&self, handler: impl Fn(PlantId) + 'static) {
        *self.on_select.borrow_mut() = Some(Rc::new(handler));
    }

    /// Map background clicks, with the clicked coordinate
    pub fn on_click(&self, handler: impl Fn(LngLat) + 'static) {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            if let Some(position) = event_position(&event) {
                handler(position);
            }
        });
        self.map.on("click", listener.as_ref().unchecked_ref());
        self.map_listeners.borrow_mut().push(listener);
    }

    pub fn on_zoom_change(&self, handler: impl Fn() + 'static) {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| handler());
        self.map.on("zoomchange", listener.as_ref().unchecked_ref());
        self.map_listeners.borrow_mut().push(listener);
    }

    /// One listener per overlay: open its info window, then report the record
    fn click_listener(&self, info: Option<&InfoContent>, anchor: Option<LngLat>) -> Option<Listener> {
        let info = info?.clone();
        let map = self.map.clone();
        let info_window = Rc::clone(&self.info_window);
        let on_select = Rc::clone(&self.on_select);
        Some(Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let position = anchor.or_else(|| event_position(&event));
            if let Some(position) = position {
                info_window.set_content(&info.to_html());
                info_window.open(&map, &to_js(position));
            }
            let handler = on_select.borrow().clone();
            if let Some(handler) = handler {
                handler(info.record_id.clone());
            }
        }))
    }
}

impl MapSurface for AMapSurface {
    type Handle = AMapHandle;

    fn add_marker(&self, spec: &MarkerSpec) -> AMapHandle {
        let options = object(&[
            ("position", to_js(spec.position)),
            ("title", JsValue::from_str(&spec.title)),
            ("content", JsValue::from_str(&spec.icon.html)),
            ("offset", offset(&spec.icon).into()),
            ("draggable", JsValue::from_bool(spec.draggable)),
        ])
        .unwrap_or_else(|e| {
            log::error!("marker options rejected: {:?}", e);
            Object::new()
        });
        let marker = JsMarker::new(&options);
        let on_click = self.click_listener(spec.info.as_ref(), Some(spec.position));
        if let Some(listener) = &on_click {
            marker.on("click", listener.as_ref().unchecked_ref());
        }
        AMapHandle(Rc::new(ObjectEntry { object: MapObject::Marker(marker), _on_click: on_click }))
    }

    fn add_polygon(&self, spec: &PolygonSpec) -> AMapHandle {
        let path = serde_wasm_bindgen::to_value(&spec.path).unwrap_or(JsValue::NULL);
        let options = object(&[
            ("path", path),
            ("fillColor", JsValue::from_str(spec.style.fill_color)),
            ("strokeColor", JsValue::from_str(spec.style.stroke_color)),
            ("fillOpacity", JsValue::from_f64(spec.style.fill_opacity)),
        ])
        .unwrap_or_else(|e| {
            log::error!("polygon options rejected: {:?}", e);
            Object::new()
        });
        let polygon = JsPolygon::new(&options);
        let on_click = self.click_listener(spec.info.as_ref(), None);
        if let Some(listener) = &on_click {
            polygon.on("click", listener.as_ref().unchecked_ref());
        }
        AMapHandle(Rc::new(ObjectEntry { object: MapObject::Polygon(polygon), _on_click: on_click }))
    }

    fn set_icon(&self, handle: &AMapHandle, icon: &IconStyle) {
        if let MapObject::Marker(marker) = &handle.0.object {
            marker.set_content(&icon.html);
            marker.set_offset(&offset(icon));
        }
    }

    fn set_position(&self, handle: &AMapHandle, position: LngLat) {
        if let MapObject::Marker(marker) = &handle.0.object {
            marker.set_position(&to_js(position));
        }
    }

    fn position(&self, handle: &AMapHandle) -> Option<LngLat> {
        match &handle.0.object {
            MapObject::Marker(marker) => marker
                .get_position()
                .map(|p| LngLat::new(p.get_lng(), p.get_lat())),
            MapObject::Polygon(_) => None,
        }
    }

    fn attach(&self, handle: &AMapHandle) {
        match &handle.0.object {
            MapObject::Marker(marker) => marker.set_map(&self.map),
            MapObject::Polygon(polygon) => polygon.set_map(&self.map),
        }
    }

    fn detach(&self, handle: &AMapHandle) {
        match &handle.0.object {
            MapObject::Marker(marker) => marker.set_map(&JsValue::NULL),
            MapObject::Polygon(polygon) => polygon.set_map(&JsValue::NULL),
        }
    }

    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    fn center(&self) -> LngLat {
        let center = self.map.get_center();
        LngLat::new(center.get_lng(), center.get_lat())
    }

    fn focus(&self, center: LngLat, zoom: f64) {
        self.map.set_zoom_and_center(zoom, &to_js(center));
    }

    fn set_crosshair(&self, enabled: bool) {
        self.map
            .set_default_cursor(if enabled { "crosshair" } else { "default" });
    }
}

fn to_js(position: LngLat) -> JsValue {
    let pair: [f64; 2] = position.into();
    js_sys::Array::of2(&JsValue::from_f64(pair[0]), &JsValue::from_f64(pair[1])).into()
}

fn offset(icon: &IconStyle) -> JsPixel {
    JsPixel::new(icon.offset.x, icon.offset.y)
}

/// `lnglat` of a map event
fn event_position(event: &JsValue) -> Option<LngLat> {
    let lnglat = Reflect::get(event, &JsValue::from_str("lnglat")).ok()?;
    if lnglat.is_undefined() || lnglat.is_null() {
        return None;
    }
    let lnglat: JsLngLat = lnglat.unchecked_into();
    Some(LngLat::new(lnglat.get_lng(), lnglat.get_lat()))
}

fn object(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object)
}
