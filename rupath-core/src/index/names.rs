//! Free-text matching of building and stop names

use std::collections::BTreeMap;

use hashbrown::HashMap;
use itertools::Itertools;
use log::warn;

use crate::{Building, BuildingId, StopName};

pub const DEFAULT_BUILDING_CUTOFF: f64 = 0.6;
pub const DEFAULT_STOP_CUTOFF: f64 = 0.5;

/// Minimum similarity accepted by approximate matching.
///
/// Stops get the looser cutoff: their labels are short and noisy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    pub building: f64,
    pub stop: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            building: DEFAULT_BUILDING_CUTOFF,
            stop: DEFAULT_STOP_CUTOFF,
        }
    }
}

/// Identity key of a building name: lowercase letters, digits and single spaces
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

/// Case-insensitive stop key. Punctuation is kept, stop labels use it
/// to tell platforms apart.
fn fold_case(text: &str) -> String {
    text.split_whitespace().join(" ").to_lowercase()
}

/// Best candidate by normalized edit similarity, if it reaches `cutoff`.
/// On equal scores the earliest candidate wins.
fn closest_match<'a, T>(
    query: &str,
    candidates: impl IntoIterator<Item = (&'a str, T)>,
    cutoff: f64,
) -> Option<T> {
    let mut best: Option<(f64, T)> = None;
    for (candidate, value) in candidates {
        let score = strsim::normalized_levenshtein(query, candidate);
        if score < cutoff {
            continue;
        }
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, value));
        }
    }
    best.map(|(_, value)| value)
}

/// Resolves user text to known buildings and canonical stops.
///
/// Lookup order: exact key, alias table (buildings only), then approximate
/// match. Approximate candidates are scanned in sorted key order so that
/// ties always resolve the same way.
#[derive(Debug, Clone)]
pub struct NameResolver {
    buildings: Vec<Building>,
    /// Normalized building name -> building
    building_keys: BTreeMap<String, BuildingId>,
    /// Normalized alias -> normalized building name
    aliases: HashMap<String, String>,
    /// Canonical stops, sorted and unique
    stops: Vec<StopName>,
    /// Case-folded `stops`, same order
    stop_keys: Vec<String>,
    thresholds: MatchThresholds,
}

impl NameResolver {
    /// Buildings sharing a normalized name are merged, the later record wins.
    /// Aliases pointing at unknown buildings are dropped.
    pub fn new<A, C>(
        buildings: impl IntoIterator<Item = Building>,
        stops: impl IntoIterator<Item = StopName>,
        aliases: impl IntoIterator<Item = (A, C)>,
        thresholds: MatchThresholds,
    ) -> Self
    where
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let mut building_list: Vec<Building> = Vec::new();
        let mut building_keys = BTreeMap::new();
        for building in buildings {
            let key = normalize(&building.name);
            if key.is_empty() {
                continue;
            }
            match building_keys.get(&key) {
                Some(&id) => {
                    log::debug!("Building '{}' replaces an earlier record", building.name);
                    building_list[id] = building;
                }
                None => {
                    building_keys.insert(key, building_list.len());
                    building_list.push(building);
                }
            }
        }

        let mut alias_map = HashMap::new();
        for (alias, canonical) in aliases {
            let alias_key = normalize(alias.as_ref());
            let canonical_key = normalize(canonical.as_ref());
            if !building_keys.contains_key(&canonical_key) {
                warn!(
                    "Alias '{}' points at unknown building '{}', ignoring it",
                    alias.as_ref(),
                    canonical.as_ref()
                );
                continue;
            }
            alias_map.insert(alias_key, canonical_key);
        }

        let stops: Vec<StopName> = stops
            .into_iter()
            .map(|stop| stop.trim().to_string())
            .filter(|stop| !stop.is_empty())
            .sorted()
            .dedup()
            .collect();
        let stop_keys = stops.iter().map(|stop| fold_case(stop)).collect();

        Self {
            buildings: building_list,
            building_keys,
            aliases: alias_map,
            stops,
            stop_keys,
            thresholds,
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id)
    }

    /// All canonical stop names, sorted
    pub fn stops(&self) -> &[StopName] {
        &self.stops
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    pub fn resolve_building_id(&self, text: &str) -> Option<BuildingId> {
        let key = normalize(text);
        if key.is_empty() {
            return None;
        }

        if let Some(&id) = self.building_keys.get(&key) {
            return Some(id);
        }

        if let Some(canonical) = self.aliases.get(&key) {
            return self.building_keys.get(canonical).copied();
        }

        closest_match(
            &key,
            self.building_keys
                .iter()
                .map(|(name, &id)| (name.as_str(), id)),
            self.thresholds.building,
        )
    }

    pub fn resolve_building(&self, text: &str) -> Option<&Building> {
        self.resolve_building_id(text)
            .and_then(|id| self.buildings.get(id))
    }

    /// Map a free-text or dataset stop label to a canonical stop name
    pub fn resolve_stop(&self, label: &str) -> Option<&str> {
        let key = fold_case(label);
        if key.is_empty() {
            return None;
        }

        if let Some(idx) = self.stop_keys.iter().position(|stop| *stop == key) {
            return Some(&self.stops[idx]);
        }

        closest_match(
            &key,
            self.stop_keys
                .iter()
                .zip(&self.stops)
                .map(|(stop_key, stop)| (stop_key.as_str(), stop.as_str())),
            self.thresholds.stop,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NameResolver {
        NameResolver::new(
            [
                Building::new("Hill Center", "Busch", ["Hill Center"]),
                Building::new("Busch Student Center", "Busch", ["Busch Student Center"]),
                Building::new("The Yard @ College Avenue", "College Avenue", ["The Yard"]),
            ],
            [
                "The Yard".to_string(),
                "Hill Center".to_string(),
                "Livingston Student Center".to_string(),
                "Hill Center".to_string(),
            ],
            [("yard", "The Yard @ College Avenue"), ("ghost", "Nowhere Hall")],
            MatchThresholds::default(),
        )
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  The Yard @ College   Ave. "), "the yard college ave");
        assert_eq!(normalize("Hill-Center!"), "hillcenter");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_exact_building_match_ignores_case_and_punctuation() {
        let resolver = resolver();
        let building = resolver.resolve_building("hill   center.").unwrap();
        assert_eq!(building.name, "Hill Center");
    }

    #[test]
    fn test_alias_match() {
        let resolver = resolver();
        let building = resolver.resolve_building("Yard").unwrap();
        assert_eq!(building.name, "The Yard @ College Avenue");
    }

    #[test]
    fn test_dangling_alias_is_ignored() {
        assert!(resolver().resolve_building("ghost").is_none());
    }

    #[test]
    fn test_fuzzy_building_match() {
        let resolver = resolver();
        let building = resolver.resolve_building("Hill Centre").unwrap();
        assert_eq!(building.name, "Hill Center");
    }

    #[test]
    fn test_building_below_threshold_is_not_found() {
        assert!(resolver().resolve_building("Nonexistent Hall").is_none());
        assert!(resolver().resolve_building("").is_none());
    }

    #[test]
    fn test_fuzzy_tie_resolves_to_first_sorted_key() {
        let resolver = NameResolver::new(
            [
                Building::new("abce", "x", Vec::<String>::new()),
                Building::new("abcd", "x", Vec::<String>::new()),
            ],
            Vec::new(),
            Vec::<(String, String)>::new(),
            MatchThresholds::default(),
        );
        for _ in 0..5 {
            assert_eq!(resolver.resolve_building("abcx").unwrap().name, "abcd");
        }
    }

    #[test]
    fn test_later_duplicate_building_wins() {
        let resolver = NameResolver::new(
            [
                Building::new("Hill Center", "Busch", ["Old Stop"]),
                Building::new("HILL CENTER", "Busch", ["New Stop"]),
            ],
            Vec::new(),
            Vec::<(String, String)>::new(),
            MatchThresholds::default(),
        );
        assert_eq!(resolver.buildings().len(), 1);
        assert_eq!(resolver.buildings()[0].stop_labels, vec!["New Stop"]);
    }

    #[test]
    fn test_stops_are_sorted_and_unique() {
        assert_eq!(
            resolver().stops(),
            &["Hill Center", "Livingston Student Center", "The Yard"]
        );
    }

    #[test]
    fn test_exact_stop_match_is_case_insensitive() {
        assert_eq!(resolver().resolve_stop(" the YARD "), Some("The Yard"));
    }

    #[test]
    fn test_fuzzy_stop_match() {
        assert_eq!(
            resolver().resolve_stop("Livingston Student Ctr"),
            Some("Livingston Student Center")
        );
    }

    #[test]
    fn test_unknown_stop() {
        assert_eq!(resolver().resolve_stop("Zzzzqqq Depot"), None);
        assert_eq!(resolver().resolve_stop("   "), None);
    }

    #[test]
    fn test_stop_resolution_is_stable() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_stop("hill cntr"), resolver.resolve_stop("hill cntr"));
    }
}
