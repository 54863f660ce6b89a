use std::collections::BTreeMap;

use pocs_types::CommuneRecord;
use serde_json::{Value, json};

pub const DEFAULT_COMMUNE: &str = "Namur";

pub fn sorted_names(communes: &[CommuneRecord]) -> Vec<String> {
    let mut names: Vec<String> = communes.iter().map(|c| c.nom.clone()).collect();
    names.sort();
    names
}

/// Namur when it is listed, otherwise the first name
pub fn default_selection(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| *name == DEFAULT_COMMUNE)
        .or_else(|| names.first())
        .map(String::as_str)
}

pub fn find<'a>(communes: &'a [CommuneRecord], name: &str) -> Option<&'a CommuneRecord> {
    communes.iter().find(|c| c.nom == name)
}

fn label(commune: &CommuneRecord) -> &str {
    commune.nom_court.as_deref().unwrap_or(&commune.nom)
}

/// Every attribute of the commune as display text
pub fn attributes(commune: &CommuneRecord) -> BTreeMap<String, String> {
    let mut attributes: BTreeMap<String, String> = commune
        .extra
        .iter()
        .map(|(key, value)| (key.clone(), display_value(value)))
        .collect();

    attributes.insert("nom".to_string(), commune.nom.clone());
    if let Some(nom_court) = &commune.nom_court {
        attributes.insert("nom_court".to_string(), nom_court.clone());
    }
    if let Some(point) = commune.geopoint_administration {
        attributes.insert(
            "geopoint_administration".to_string(),
            format!("{}, {}", point.lat, point.lon),
        );
    }
    if let Some(geom) = &commune.geom {
        attributes.insert("geom".to_string(), display_value(geom));
    }
    attributes
}

/// GeoJSON with the commune outline and its administration point
pub fn feature_collection(commune: &CommuneRecord) -> Value {
    let label = label(commune);
    let mut features = Vec::new();

    if let Some(geom) = &commune.geom {
        features.push(json!({
            "type": "Feature",
            "geometry": geometry_of(geom),
            "properties": {
                "name": label,
                "style": {
                    "fillColor": "lightblue",
                    "color": "blue",
                    "weight": 2,
                    "fillOpacity": 0.3,
                },
            },
        }));
    }

    if let Some(point) = commune.geopoint_administration {
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [point.lon, point.lat],
            },
            "properties": {
                "name": "Administration",
                "icon": "home",
                "color": "blue",
            },
        }));
    }

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

// ODWB wraps shapes as a Feature; unwrap down to the bare geometry.
fn geometry_of(geom: &Value) -> Value {
    match geom.get("type").and_then(Value::as_str) {
        Some("Feature") => geom.get("geometry").cloned().unwrap_or(Value::Null),
        _ => geom.clone(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
