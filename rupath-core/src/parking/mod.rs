//! Parking permit rules lookup

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// One access rule of a permit on one campus
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PermitRule {
    #[serde(rename = "Type")]
    pub access_type: Option<String>,
    #[serde(rename = "Lots")]
    pub lots: Vec<String>,
    /// Day range -> hours, e.g. `"Mon-Fri": "6am-5pm"`
    #[serde(rename = "Hours")]
    pub hours: BTreeMap<String, JsonValue>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
}

/// Permit -> campus -> rules
pub type PermitTable = BTreeMap<String, BTreeMap<String, Vec<PermitRule>>>;

/// Permits and lots from the parking dataset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParkingCatalog {
    #[serde(rename = "Permits")]
    permits: PermitTable,
    #[serde(rename = "Lots")]
    lots: BTreeMap<String, JsonValue>,
}

/// A rule that applies to the asked permit, with the campus it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingEntry {
    pub campus: String,
    pub rule: PermitRule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingAnswer {
    /// Permit name as spelled in the dataset
    pub permit: String,
    pub entries: Vec<ParkingEntry>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkingError {
    #[error("I need a permit name to look up parking rules.")]
    MissingPermit,
    #[error("I couldn't find a permit called '{0}' in rupath_parking_base.json.")]
    UnknownPermit(String),
    #[error("'{permit}' doesn't seem to allow parking on {campus} in the current JSON.")]
    NotAllowedOnCampus { permit: String, campus: String },
    #[error("I couldn't find any lots for the permit '{0}' in the JSON.")]
    NoLots(String),
}

impl ParkingCatalog {
    pub fn new(permits: PermitTable, lots: BTreeMap<String, JsonValue>) -> Self {
        Self { permits, lots }
    }

    /// Permit names in sorted order
    pub fn permit_names(&self) -> impl Iterator<Item = &str> {
        self.permits.keys().map(String::as_str)
    }

    pub fn permit_count(&self) -> usize {
        self.permits.len()
    }

    pub fn lot_count(&self) -> usize {
        self.lots.len()
    }

    /// Rules for `permit` (case-insensitive), limited to campuses whose name
    /// contains `campus` when given
    pub fn find_parking(
        &self,
        permit: &str,
        campus: Option<&str>,
    ) -> Result<ParkingAnswer, ParkingError> {
        let permit = permit.trim();
        if permit.is_empty() {
            return Err(ParkingError::MissingPermit);
        }

        let wanted = permit.to_lowercase();
        let (permit_name, campuses) = self
            .permits
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .ok_or_else(|| ParkingError::UnknownPermit(permit.to_string()))?;

        let campus_filter = campus.map(str::to_lowercase);
        let entries: Vec<ParkingEntry> = campuses
            .iter()
            .filter(|(campus_name, _)| {
                campus_filter
                    .as_deref()
                    .is_none_or(|wanted| campus_name.to_lowercase().contains(wanted))
            })
            .flat_map(|(campus_name, rules)| {
                rules.iter().map(move |rule| ParkingEntry {
                    campus: campus_name.clone(),
                    rule: rule.clone(),
                })
            })
            .collect();

        if entries.is_empty() {
            return Err(match campus {
                Some(campus) => ParkingError::NotAllowedOnCampus {
                    permit: permit_name.clone(),
                    campus: campus.to_string(),
                },
                None => ParkingError::NoLots(permit_name.clone()),
            });
        }

        Ok(ParkingAnswer {
            permit: permit_name.clone(),
            entries,
        })
    }
}

fn hours_text(hours: &BTreeMap<String, JsonValue>) -> String {
    if hours.is_empty() {
        return "see Rutgers parking website".to_string();
    }
    hours
        .iter()
        .map(|(days, value)| match value {
            JsonValue::String(text) => format!("{days}: {text}"),
            other => format!("{days}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One header line, then one line per rule
pub fn describe_parking(answer: &ParkingAnswer) -> String {
    let mut lines = vec![format!("Parking options for **{}**:", answer.permit)];

    for entry in &answer.entries {
        let rule = &entry.rule;
        let lots = if rule.lots.is_empty() {
            "no specific lots listed".to_string()
        } else {
            rule.lots.join(", ")
        };
        let access = rule.access_type.as_deref().unwrap_or("unspecified");
        let notes = rule
            .notes
            .as_deref()
            .filter(|notes| !notes.is_empty())
            .map(|notes| format!(" Notes: {notes}"))
            .unwrap_or_default();

        lines.push(format!(
            "- **{}** ({access}): {lots}. Hours: {}.{notes}",
            entry.campus,
            hours_text(&rule.hours)
        ));
    }

    lines.join("\n")
}
