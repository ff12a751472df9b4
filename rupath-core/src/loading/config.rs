use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::index::names::{DEFAULT_BUILDING_CUTOFF, DEFAULT_STOP_CUTOFF, MatchThresholds};

const YARD_NAME: &str = "The Yard @ College Avenue";

/// Building added on top of the buildings dataset
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtraBuilding {
    pub name: String,
    pub campus: String,
    #[serde(default)]
    pub bus_stops: Vec<String>,
}

/// Where the datasets live and how names are matched against them
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CampusModelConfig {
    pub buildings_path: PathBuf,
    pub bus_routes_path: PathBuf,
    pub parking_path: PathBuf,
    pub building_match_cutoff: f64,
    pub stop_match_cutoff: f64,
    /// Alias -> canonical building name
    pub aliases: BTreeMap<String, String>,
    /// Applied after the dataset, replacing buildings of the same name
    pub extra_buildings: Vec<ExtraBuilding>,
}

impl Default for CampusModelConfig {
    fn default() -> Self {
        let yard_aliases = [
            "the yard",
            "yard",
            "yard at college ave",
            "yard at college avenue",
            "yard college ave",
            "yard college avenue",
        ]
        .map(|alias| (alias, YARD_NAME));
        let spelling_aliases = [
            ("hill centre", "Hill Center"),
            ("hill cntr", "Hill Center"),
            ("hillcenter", "Hill Center"),
            ("hill center bus stop", "Hill Center"),
            ("busch student centre", "Busch Student Center"),
        ];

        Self {
            buildings_path: PathBuf::from("data/Buildings.json"),
            bus_routes_path: PathBuf::from("data/rutgers_bus_routes.json"),
            parking_path: PathBuf::from("data/rupath_parking_base.json"),
            building_match_cutoff: DEFAULT_BUILDING_CUTOFF,
            stop_match_cutoff: DEFAULT_STOP_CUTOFF,
            aliases: yard_aliases
                .into_iter()
                .chain(spelling_aliases)
                .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
                .collect(),
            extra_buildings: vec![ExtraBuilding {
                name: YARD_NAME.to_string(),
                campus: "College Avenue".to_string(),
                bus_stops: vec![
                    "The Yard".to_string(),
                    "College Avenue Student Center".to_string(),
                ],
            }],
        }
    }
}

impl CampusModelConfig {
    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            building: self.building_match_cutoff,
            stop: self.stop_match_cutoff,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] when a cutoff is outside `(0, 1]`
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("building_match_cutoff", self.building_match_cutoff),
            ("stop_match_cutoff", self.stop_match_cutoff),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::InvalidData(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_yard() {
        let config = CampusModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extra_buildings[0].name, YARD_NAME);
        assert_eq!(config.aliases["yard"], YARD_NAME);
        assert_eq!(config.aliases["hillcenter"], "Hill Center");
        assert_eq!(config.aliases.len(), 11);
    }

    #[test]
    fn test_validate_rejects_out_of_range_cutoff() {
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let config = CampusModelConfig {
                stop_match_cutoff: bad,
                ..CampusModelConfig::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidData(_))));
        }
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: CampusModelConfig =
            serde_json::from_str(r#"{"building_match_cutoff": 0.8}"#).unwrap();
        assert!((config.building_match_cutoff - 0.8).abs() < f64::EPSILON);
        assert!((config.stop_match_cutoff - DEFAULT_STOP_CUTOFF).abs() < f64::EPSILON);
        assert_eq!(config.extra_buildings.len(), 1);
    }
}
