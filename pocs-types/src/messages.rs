use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::{GeoPoint, HangmanView, HeightBin, SessionId, TreeRecord};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRequest {
    /// A single letter; anything else is rejected as not a letter
    pub letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionCreated {
    pub session_id: SessionId,
    pub view: HangmanView,
}

/// Query string of the tree selection page. Unset or blank fields mean "all".
///
/// Values are kept as raw strings since HTML forms submit empty fields as `min_height=`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreeQuery {
    pub name: Option<String>,
    pub locality: Option<String>,
    pub min_height: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSelection {
    pub count: usize,
    pub trees: Vec<TreeRecord>,
    pub points: Vec<GeoPoint>,
    pub heights: Vec<HeightBin>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommuneList {
    pub names: Vec<String>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommuneQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuneDetail {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub feature: Value, // GeoJSON FeatureCollection
}
