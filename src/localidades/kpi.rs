use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::PointOfInterest;

/// One row of the crime table: reported cases of one crime type in a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeRecord {
    pub localidad: String,
    pub delito: String,
    pub cantidad: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionCount {
    pub localidad: String,
    pub attractions: u64,
}

/// KPIs of a single district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalidadKpi {
    pub localidad: String,
    pub crimes: u64,
    pub attractions: u64,
    pub average_price: Option<f64>,
}

/// City-wide KPIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_crimes: u64,
    /// Highest first, ties by name
    pub crimes_by_localidad: Vec<(String, u64)>,
    /// Highest first, ties by name
    pub crimes_by_type: Vec<(String, u64)>,
    pub total_attractions: u64,
    pub attractions_by_localidad: Vec<(String, u64)>,
    pub average_price: Option<f64>,
    prices_by_localidad: Vec<(String, f64)>,
}

fn ranked(totals: impl IntoIterator<Item = (String, u64)>) -> Vec<(String, u64)> {
    totals
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

impl KpiSummary {
    pub fn compute(
        crime: &[CrimeRecord],
        attractions: &[AttractionCount],
        points: &[PointOfInterest],
    ) -> Self {
        let crimes_by_localidad = ranked(
            crime
                .iter()
                .map(|r| (r.localidad.clone(), r.cantidad))
                .into_grouping_map()
                .sum(),
        );
        let crimes_by_type = ranked(
            crime
                .iter()
                .map(|r| (r.delito.clone(), r.cantidad))
                .into_grouping_map()
                .sum(),
        );
        let attractions_by_localidad = ranked(
            attractions
                .iter()
                .map(|a| (a.localidad.clone(), a.attractions))
                .into_grouping_map()
                .sum(),
        );
        let prices_by_localidad = points
            .iter()
            .filter_map(|p| p.price.map(|price| (p.localidad.clone(), price)))
            .into_group_map()
            .into_iter()
            .filter_map(|(localidad, prices)| {
                average(prices.into_iter()).map(|avg| (localidad, avg))
            })
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect();

        Self {
            total_crimes: crime.iter().map(|r| r.cantidad).sum(),
            crimes_by_localidad,
            crimes_by_type,
            total_attractions: attractions.iter().map(|a| a.attractions).sum(),
            attractions_by_localidad,
            average_price: average(points.iter().filter_map(|p| p.price)),
            prices_by_localidad,
        }
    }

    /// KPIs of one district; zero counts when the district is absent from a table.
    pub fn for_localidad(&self, localidad: &str) -> LocalidadKpi {
        let lookup = |rows: &[(String, u64)]| {
            rows.iter()
                .find(|(name, _)| name == localidad)
                .map(|(_, v)| *v)
                .unwrap_or(0)
        };
        LocalidadKpi {
            localidad: localidad.to_string(),
            crimes: lookup(&self.crimes_by_localidad),
            attractions: lookup(&self.attractions_by_localidad),
            average_price: self
                .prices_by_localidad
                .iter()
                .find(|(name, _)| name == localidad)
                .map(|(_, v)| *v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localidades::tests::point;

    fn crime(localidad: &str, delito: &str, cantidad: u64) -> CrimeRecord {
        CrimeRecord {
            localidad: localidad.to_string(),
            delito: delito.to_string(),
            cantidad,
        }
    }

    fn summary() -> KpiSummary {
        let crimes = vec![
            crime("Chapinero", "Hurto a personas", 120),
            crime("La Candelaria", "Hurto a personas", 80),
            crime("Chapinero", "Lesiones", 30),
            crime("Usaquén", "Hurto a personas", 150),
        ];
        let attractions = vec![
            AttractionCount {
                localidad: "La Candelaria".to_string(),
                attractions: 42,
            },
            AttractionCount {
                localidad: "Chapinero".to_string(),
                attractions: 17,
            },
        ];
        let points = vec![
            point("Chapinero", "Restaurante", "A", Some(100.0)),
            point("Chapinero", "Restaurante", "B", Some(200.0)),
            point("La Candelaria", "Museo", "C", None),
            point("La Candelaria", "Hotel", "D", Some(300.0)),
        ];
        KpiSummary::compute(&crimes, &attractions, &points)
    }

    #[test]
    fn test_crime_totals_are_ranked() {
        let summary = summary();
        assert_eq!(summary.total_crimes, 380);
        assert_eq!(
            summary.crimes_by_localidad,
            vec![
                ("Chapinero".to_string(), 150),
                ("Usaquén".to_string(), 150),
                ("La Candelaria".to_string(), 80),
            ]
        );
        assert_eq!(summary.crimes_by_type[0], ("Hurto a personas".to_string(), 350));
    }

    #[test]
    fn test_attractions_and_prices() {
        let summary = summary();
        assert_eq!(summary.total_attractions, 59);
        assert_eq!(summary.average_price, Some(200.0));
    }

    #[test]
    fn test_for_localidad() {
        let summary = summary();
        let chapinero = summary.for_localidad("Chapinero");
        assert_eq!(chapinero.crimes, 150);
        assert_eq!(chapinero.attractions, 17);
        assert_eq!(chapinero.average_price, Some(150.0));

        let usaquen = summary.for_localidad("Usaquén");
        assert_eq!(usaquen.attractions, 0);
        assert_eq!(usaquen.average_price, None);
    }

    #[test]
    fn test_empty_tables() {
        let summary = KpiSummary::compute(&[], &[], &[]);
        assert_eq!(summary.total_crimes, 0);
        assert!(summary.crimes_by_localidad.is_empty());
        assert_eq!(summary.average_price, None);
    }
}
