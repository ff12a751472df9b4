//! Keyword-level understanding of chat messages

use hashbrown::HashSet;

use crate::ParkingCatalog;

const PARKING_WORDS: [&str; 6] = ["park", "parking", "lot", "permit", "commuter", "resident"];
const BUS_WORDS: [&str; 8] = [
    "bus", "buses", "route", "routes", "shuttle", "shuttles", "stop", "stops",
];
const CAMPUS_KEYWORDS: [&str; 7] = [
    "busch",
    "livingston",
    "college ave",
    "college avenue",
    "cook",
    "douglass",
    "cook/douglass",
];
const PLACE_TRIM: &[char] = &[' ', ',', '.', ';', ':', '"', '\''];

/// Word tokens of an already lowercased message
pub fn tokens(lower: &str) -> HashSet<&str> {
    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect()
}

pub fn mentions_parking(tokens: &HashSet<&str>) -> bool {
    PARKING_WORDS.iter().any(|word| tokens.contains(word))
}

pub fn mentions_bus(tokens: &HashSet<&str>) -> bool {
    BUS_WORDS.iter().any(|word| tokens.contains(word))
}

/// True for "from .. to .." and "starting building .. destination .." phrasing
pub fn has_trip_phrase(lower: &str) -> bool {
    (lower.contains("from ") && lower.contains(" to "))
        || (lower.contains("starting building") && lower.contains("destination"))
}

/// Split `text` once at `marker`, matched without regard to ASCII case
fn split_once_ignore_case<'a>(text: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    // ASCII lowercasing keeps byte offsets valid for `text`
    let pos = text.to_ascii_lowercase().find(marker)?;
    Some((&text[..pos], &text[pos + marker.len()..]))
}

fn clean_place(text: &str) -> Option<String> {
    let place = text.trim_matches(PLACE_TRIM);
    (!place.is_empty()).then(|| place.to_string())
}

/// Drop leading "is" words and colons, as in "starting building is: Hill Center"
fn strip_lead_in(text: &str) -> &str {
    let mut rest = text.trim_start_matches(PLACE_TRIM);
    loop {
        let lower = rest.to_ascii_lowercase();
        if lower.starts_with("is") && !lower[2..].starts_with(char::is_alphanumeric) {
            rest = rest[2..].trim_start_matches(PLACE_TRIM);
        } else {
            return rest;
        }
    }
}

/// Origin and destination named in a message, when present
pub fn extract_origin_dest(text: &str) -> (Option<String>, Option<String>) {
    if let Some((_, after_from)) = split_once_ignore_case(text, "from ") {
        if let Some((origin, dest)) = split_once_ignore_case(after_from, " to ") {
            let origin = clean_place(origin);
            if origin.is_some() {
                return (origin, clean_place(dest));
            }
        }
    }

    if let Some((_, after_start)) = split_once_ignore_case(text, "starting building") {
        if let Some((origin, dest)) = split_once_ignore_case(after_start, "destination") {
            return (
                clean_place(strip_lead_in(origin)),
                clean_place(strip_lead_in(dest)),
            );
        }
    }

    (None, None)
}

/// Known permit and campus keyword mentioned in a message.
///
/// The permit name itself is skipped when looking for the campus, so
/// "Livingston Commuter on Busch" asks about Busch.
pub fn extract_permit_and_campus<'a>(
    lower: &str,
    parking: &'a ParkingCatalog,
) -> (Option<&'a str>, Option<&'static str>) {
    let mut rest = lower.to_string();
    let permit = parking.permit_names().find(|permit| {
        let permit_lower = permit.to_lowercase();
        if lower.contains(&permit_lower) {
            rest = lower.replacen(&permit_lower, " ", 1);
            true
        } else {
            false
        }
    });
    let campus = CAMPUS_KEYWORDS
        .into_iter()
        .find(|campus| rest.contains(campus));
    (permit, campus)
}

/// Permit whose first word appears in a message that also says "commuter"
pub fn guess_permit_name<'a>(lower: &str, parking: &'a ParkingCatalog) -> Option<&'a str> {
    if !lower.contains("commuter") {
        return None;
    }
    parking.permit_names().find(|permit| {
        permit
            .split_whitespace()
            .next()
            .is_some_and(|first| lower.contains(&first.to_lowercase()))
    })
}
