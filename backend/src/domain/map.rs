//! Map view models for the Naver map SDK.
//!
//! The browser SDK consumes markers, a centre and a zoom level; everything
//! here is derived from tour records without further provider calls.

use serde::Serialize;
use tracing::debug;

use super::coordinates::{Bounds, Coordinates, DEFAULT_CENTER, DEFAULT_ZOOM};
use super::{ContentType, TourItem};

/// Zoom used when showing one attraction.
pub const DETAIL_ZOOM: u8 = 16;

/// Naver map script endpoint; the client id is appended as `ncpKeyId`.
pub const NAVER_MAP_SCRIPT_URL: &str = "https://oapi.map.naver.com/openapi/v3/maps.js";

/// Shown when no map client id is configured.
pub const MAP_KEY_MISSING_MESSAGE: &str =
    "네이버 지도 API 키가 설정되지 않았습니다. 관리자에게 문의해주세요.";

/// One marker on the list map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Provider content identifier.
    pub content_id: String,
    /// Attraction name shown in the info window.
    pub title: String,
    /// Street address shown in the info window.
    pub address: Option<String>,
    /// Content type label.
    pub content_type: Option<&'static str>,
    /// Thumbnail for the info window.
    pub image: Option<String>,
    /// Marker position.
    pub position: Coordinates,
}

impl MapMarker {
    /// Build a marker, returning `None` when the record has no usable
    /// coordinates.
    pub fn from_item(item: &TourItem) -> Option<Self> {
        match item.coordinates() {
            Ok(position) => Some(Self {
                content_id: item.content_id.clone(),
                title: item.title.clone(),
                address: item.address(),
                content_type: item.content_type().map(ContentType::label),
                image: item.thumbnail().map(str::to_owned),
                position,
            }),
            Err(err) => {
                debug!(content_id = %item.content_id, error = %err, "skipping marker");
                None
            }
        }
    }
}

/// Markers plus the viewport that fits them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Markers for records with valid coordinates.
    pub markers: Vec<MapMarker>,
    /// Viewport centre.
    pub center: Coordinates,
    /// Viewport zoom.
    pub zoom: u8,
}

impl MapView {
    /// Build the view for a list of records.
    ///
    /// Records without valid coordinates are skipped. With no markers the
    /// view falls back to central Seoul.
    ///
    /// # Examples
    /// ```
    /// use mytrip::domain::{MapView, TourItem};
    ///
    /// let view = MapView::from_items(&[TourItem::default()]);
    /// assert!(view.markers.is_empty());
    /// assert_eq!(view.zoom, 10);
    /// ```
    pub fn from_items(items: &[TourItem]) -> Self {
        let markers: Vec<MapMarker> = items.iter().filter_map(MapMarker::from_item).collect();
        let bounds = Bounds::from_points(markers.iter().map(|marker| marker.position));
        let (center, zoom) = bounds.map_or((DEFAULT_CENTER, DEFAULT_ZOOM), |bounds| {
            (bounds.center(), bounds.estimate_zoom())
        });
        Self {
            markers,
            center,
            zoom,
        }
    }
}

/// Single-attraction map with a directions link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailMapView {
    /// Attraction position.
    pub position: Coordinates,
    /// Viewport zoom.
    pub zoom: u8,
    /// Naver map directions URL targeting the attraction.
    pub directions_url: String,
}

impl DetailMapView {
    /// Build the detail map for `item`; `None` without usable coordinates.
    pub fn from_item(item: &TourItem) -> Option<Self> {
        let position = item.coordinates().ok()?;
        Some(Self {
            position,
            zoom: DETAIL_ZOOM,
            directions_url: directions_url(position),
        })
    }
}

/// Naver map directions URL with `position` as the destination.
pub fn directions_url(position: Coordinates) -> String {
    format!(
        "https://map.naver.com/v5/directions/{},{},,PLACE_POI",
        position.lat, position.lng
    )
}

/// Browser map SDK configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapClientConfig {
    /// Naver Cloud Platform map client id.
    pub client_id: String,
    /// Script URL with the client id applied.
    pub script_url: String,
}

impl MapClientConfig {
    /// Build the configuration; `None` when the client id is blank.
    pub fn new(client_id: &str) -> Option<Self> {
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return None;
        }
        Some(Self {
            client_id: client_id.to_owned(),
            script_url: format!("{NAVER_MAP_SCRIPT_URL}?ncpKeyId={client_id}"),
        })
    }
}
