use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

pub mod kpi;
pub use kpi::{KpiSummary, LocalidadKpi};

/// View used when the whole city is shown.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 4.55,
    lon: -74.10,
};
pub const DEFAULT_ZOOM: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A point of interest shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub localidad: String,
    #[serde(rename = "type")]
    pub point_type: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    /// Average price in thousands of COP, when known
    #[serde(default)]
    pub price: Option<f64>,
}

impl PointOfInterest {
    /// Hover text used by the map renderer.
    pub fn hover_text(&self) -> String {
        format!("{}: {}", self.point_type, self.name)
    }
}

/// Map framing for a single localidad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalidadProperties {
    pub name: String,
    pub zoom: f64,
    #[serde(rename = "center_coordinates", deserialize_with = "deserialize_center")]
    pub center: Coordinates,
}

/// Parse a `"[lat, lon]"` list as written in the properties file.
pub fn parse_center(text: &str) -> Option<Coordinates> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (lat, lon) = inner.split(',').map(str::trim).collect_tuple()?;
    Some(Coordinates {
        lat: lat.parse().ok()?,
        lon: lon.parse().ok()?,
    })
}

fn deserialize_center<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Coordinates, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse_center(&text).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid center coordinates '{}'", text))
    })
}

/// Which districts the visitor wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DistrictSelection {
    /// The "all localidades" checkbox
    pub show_all: bool,
    pub chosen: Option<String>,
}

impl DistrictSelection {
    pub fn all() -> Self {
        Self {
            show_all: true,
            chosen: None,
        }
    }

    pub fn one(name: &str) -> Self {
        Self {
            show_all: false,
            chosen: Some(name.to_string()),
        }
    }

    /// The district dropdown is only offered while "all" is unchecked.
    pub fn picker_visible(&self) -> bool {
        !self.show_all
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Filtered points and framing handed to the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapQuery<'a> {
    pub view: MapView,
    pub localidades: Vec<String>,
    pub points: Vec<&'a PointOfInterest>,
}

/// Sorted, de-duplicated list of districts that have points.
pub fn all_localidades(points: &[PointOfInterest]) -> Vec<String> {
    points
        .iter()
        .map(|p| p.localidad.clone())
        .sorted()
        .dedup()
        .collect()
}

/// Sorted, de-duplicated list of point types.
pub fn all_types(points: &[PointOfInterest]) -> Vec<String> {
    points
        .iter()
        .map(|p| p.point_type.clone())
        .sorted()
        .dedup()
        .collect()
}

/// Select the points of the chosen districts and types, and frame the map.
///
/// With "all" checked every district is shown from the default view. A
/// single chosen district is framed with its own zoom and center. Nothing
/// chosen shows nothing.
pub fn query_map<'a>(
    points: &'a [PointOfInterest],
    properties: &[LocalidadProperties],
    selection: &DistrictSelection,
    types: &[String],
) -> MapQuery<'a> {
    let mut view = MapView::default();
    let localidades = if selection.show_all {
        all_localidades(points)
    } else if let Some(chosen) = &selection.chosen {
        match properties.iter().find(|p| &p.name == chosen) {
            Some(props) => {
                view = MapView {
                    center: props.center,
                    zoom: props.zoom,
                };
            }
            None => warn!("No map properties for localidad {}", chosen),
        }
        vec![chosen.clone()]
    } else {
        Vec::new()
    };

    let points = points
        .iter()
        .filter(|p| localidades.contains(&p.localidad) && types.contains(&p.point_type))
        .collect();

    MapQuery {
        view,
        localidades,
        points,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::read_csv_rows;
    use std::path::Path;

    pub(crate) fn point(
        localidad: &str,
        point_type: &str,
        name: &str,
        price: Option<f64>,
    ) -> PointOfInterest {
        PointOfInterest {
            localidad: localidad.to_string(),
            point_type: point_type.to_string(),
            name: name.to_string(),
            latitude: 4.6,
            longitude: -74.07,
            color: "red".to_string(),
            price,
        }
    }

    fn sample_points() -> Vec<PointOfInterest> {
        vec![
            point("La Candelaria", "Museo", "Museo del Oro", Some(5.0)),
            point("Chapinero", "Restaurante", "Andrés DC", Some(120.0)),
            point("La Candelaria", "Hotel", "Hotel de la Ópera", Some(450.0)),
            point("Usaquén", "Museo", "Museo de Usaquén", None),
        ]
    }

    fn sample_properties() -> Vec<LocalidadProperties> {
        vec![LocalidadProperties {
            name: "La Candelaria".to_string(),
            zoom: 14.0,
            center: Coordinates {
                lat: 4.597,
                lon: -74.072,
            },
        }]
    }

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_parse_center() {
        assert_eq!(
            parse_center("[4.6, -74.08]"),
            Some(Coordinates {
                lat: 4.6,
                lon: -74.08
            })
        );
        assert_eq!(parse_center("4.6, -74.08"), None);
        assert_eq!(parse_center("[4.6]"), None);
        assert_eq!(parse_center("[4.6, -74.08, 1]"), None);
    }

    #[test]
    fn test_properties_csv_parses_center_list() {
        let csv = "name,zoom,center_coordinates\nLa Candelaria,14,\"[4.597, -74.072]\"\n";
        let rows: Vec<(u64, LocalidadProperties)> =
            read_csv_rows(csv.as_bytes(), Path::new("props.csv")).unwrap();
        assert_eq!(rows[0].1.center.lat, 4.597);
        assert_eq!(rows[0].1.zoom, 14.0);
    }

    #[test]
    fn test_points_csv_price_is_optional() {
        let csv = "localidad,type,name,latitude,longitude,color,price\n\
                   Chapinero,Bar,Theatron,4.65,-74.06,purple,\n";
        let rows: Vec<(u64, PointOfInterest)> =
            read_csv_rows(csv.as_bytes(), Path::new("points.csv")).unwrap();
        assert_eq!(rows[0].1.price, None);
        assert_eq!(rows[0].1.hover_text(), "Bar: Theatron");
    }

    #[test]
    fn test_show_all_uses_default_view() {
        let points = sample_points();
        let query = query_map(
            &points,
            &sample_properties(),
            &DistrictSelection::all(),
            &types(&["Museo"]),
        );
        assert_eq!(query.view, MapView::default());
        assert_eq!(query.localidades, vec!["Chapinero", "La Candelaria", "Usaquén"]);
        assert_eq!(query.points.len(), 2);
    }

    #[test]
    fn test_single_localidad_uses_its_view() {
        let points = sample_points();
        let query = query_map(
            &points,
            &sample_properties(),
            &DistrictSelection::one("La Candelaria"),
            &types(&["Museo", "Hotel"]),
        );
        assert_eq!(query.view.zoom, 14.0);
        assert_eq!(query.view.center.lat, 4.597);
        let names: Vec<_> = query.points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Museo del Oro", "Hotel de la Ópera"]);
    }

    #[test]
    fn test_localidad_without_properties_keeps_default_view() {
        let points = sample_points();
        let query = query_map(
            &points,
            &sample_properties(),
            &DistrictSelection::one("Usaquén"),
            &types(&["Museo"]),
        );
        assert_eq!(query.view, MapView::default());
        assert_eq!(query.points.len(), 1);
    }

    #[test]
    fn test_nothing_chosen_shows_nothing() {
        let points = sample_points();
        let query = query_map(
            &points,
            &sample_properties(),
            &DistrictSelection::default(),
            &types(&["Museo"]),
        );
        assert!(query.points.is_empty());
        assert!(DistrictSelection::default().picker_visible());
        assert!(!DistrictSelection::all().picker_visible());
    }

    #[test]
    fn test_all_types_sorted_unique() {
        assert_eq!(
            all_types(&sample_points()),
            vec!["Hotel", "Museo", "Restaurante"]
        );
    }
}
