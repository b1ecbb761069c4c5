//! Practice location map.
//!
//! The map itself is drawn by an external tile library. This widget only
//! swaps the placeholder for the map container and describes the view the
//! library should draw.

use crate::{Element, ElementId, Page, PawfectError};
use serde::{Deserialize, Serialize};

/// Practice coordinates (Soweto, Johannesburg).
pub const PRACTICE_LAT: f64 = -26.2485;
pub const PRACTICE_LON: f64 = 27.854;

/// Initial zoom level.
pub const DEFAULT_ZOOM: u8 = 15;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "\u{00a9} OpenStreetMap contributors";

/// What the tile library should draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// The element the library draws into.
    pub container: ElementId,
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub marker: (f64, f64),
    /// Popup lines, opened on load.
    pub popup: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractiveMap;

impl InteractiveMap {
    /// Replace the `.map-placeholder` content with `div#map`.
    ///
    /// Returns `None` (page untouched) when the tile library is unavailable
    /// or the page has no placeholder.
    pub fn attach(&self, page: &mut Page, library_available: bool) -> Result<Option<MapView>, PawfectError> {
        if !library_available {
            return Ok(None);
        }
        let Some(placeholder) = page.first_by_class(page.root(), "map-placeholder") else {
            return Ok(None);
        };
        page.clear_children(placeholder)?;
        page.set_text(placeholder, "")?;
        let container = page.append(
            placeholder,
            Element::new("div")
                .with_id("map")
                .with_style("height", "200px")
                .with_style("width", "57%")
                .with_style("border-radius", "10px"),
        )?;

        Ok(Some(MapView {
            container,
            center: (PRACTICE_LAT, PRACTICE_LON),
            zoom: DEFAULT_ZOOM,
            tile_url: TILE_URL.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
            marker: (PRACTICE_LAT, PRACTICE_LON),
            popup: vec![
                "PAWfect Animals Veterinary Practice".to_string(),
                "123 Animal Street, Soweto".to_string(),
                "Johannesburg, South Africa".to_string(),
            ],
        }))
    }
}
