//! Geographic reference hierarchy: province > health zone > health area.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Province {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    pub id: i32,
    pub province_id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Aire {
    pub id: i32,
    pub zone_id: i32,
    pub name: String,
}

/// Hierarchy payload accepted by the reference-data sync endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeoHierarchy {
    pub provinces: Vec<ProvinceNode>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvinceNode {
    pub name: String,
    #[serde(default)]
    pub zones: Vec<ZoneNode>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoneNode {
    pub name: String,
    #[serde(default)]
    pub aires: Vec<String>,
}
