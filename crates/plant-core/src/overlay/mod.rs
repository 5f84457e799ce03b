//! Overlay Layer
//!
//! Transient map objects mirroring the stored records, plus the icon and
//! anchor rules shared by every marker.

mod icon;
mod info;
mod surface;
mod sync;

pub use icon::{icon_size_for_zoom, resolve_anchor, resolve_icon, AnchorRatio, IconStyle, MarkerIcon, PixelOffset};
pub use info::InfoContent;
pub(crate) use info::escape_html;
pub use surface::{MapSurface, MarkerSpec, PolygonSpec, PolygonStyle};
pub use sync::{Overlay, OverlayId, OverlayKind, OverlaySynchronizer};
