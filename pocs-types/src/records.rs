use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// One row of the `namur-arbres` dataset.
/// Fields the dashboard does not interpret are kept in `extra` so they survive re-serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreeRecord {
    #[serde(default)]
    pub nom_simplifie: Option<String>, // vernacular name
    #[serde(default)]
    pub acom_nom_m: Option<String>, // locality
    #[serde(default)]
    pub hauteur: Option<f64>, // height in metres
    #[serde(default)]
    pub geo_point_2d: Option<GeoPoint>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One row of the `communes_s3` dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommuneRecord {
    pub nom: String,
    #[serde(default)]
    pub nom_court: Option<String>,
    #[serde(default)]
    pub geom: Option<Value>, // GeoJSON geometry
    #[serde(default)]
    pub geopoint_administration: Option<GeoPoint>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreeOptions {
    pub names: Vec<String>,
    pub localities: Vec<String>,
    pub max_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HeightBin {
    pub height: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocalityHeight {
    pub locality: String,
    pub height: f64,
}
