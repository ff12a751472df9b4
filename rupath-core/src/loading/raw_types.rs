use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Campus name -> buildings on that campus
pub type FeedCampuses = BTreeMap<String, Vec<FeedBuilding>>;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedBuilding {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bus_stops: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedRoutes {
    #[serde(deserialize_with = "null_as_default")]
    pub routes: Vec<FeedRoute>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedRoute {
    #[serde(deserialize_with = "null_as_default")]
    pub route_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stops: Vec<FeedStop>,
}

/// A null name becomes a blank gap in the stop sequence
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeedStop {
    #[serde(deserialize_with = "null_as_default")]
    pub stop_name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
