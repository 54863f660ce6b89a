use std::collections::{BTreeMap, BTreeSet};

use pocs_types::{GeoPoint, HeightBin, LocalityHeight, TreeOptions, TreeQuery, TreeRecord};

/// ODWB `where` clause restricting the dataset to named trees with a height
pub const TREES_WHERE: &str = "nom_simplifie IS NOT NULL and hauteur IS NOT NULL";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeFilter {
    pub name: Option<String>,
    pub locality: Option<String>,
    pub min_height: f64,
}

impl TreeFilter {
    pub fn matches(&self, tree: &TreeRecord) -> bool {
        if let Some(name) = &self.name {
            if tree.nom_simplifie.as_ref() != Some(name) {
                return false;
            }
        }
        if let Some(locality) = &self.locality {
            if tree.acom_nom_m.as_ref() != Some(locality) {
                return false;
            }
        }
        if self.min_height > 0.0 {
            return tree.hauteur.is_some_and(|h| h >= self.min_height);
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeQueryError {
    #[error("min_height must be a number, got '{0}'")]
    InvalidMinHeight(String),
}

impl TryFrom<TreeQuery> for TreeFilter {
    type Error = TreeQueryError;

    fn try_from(query: TreeQuery) -> Result<Self, Self::Error> {
        let min_height = match query.min_height.as_deref().map(str::trim) {
            None | Some("") => 0.0,
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|h| h.is_finite())
                .ok_or_else(|| TreeQueryError::InvalidMinHeight(raw.to_string()))?,
        };

        Ok(Self {
            name: query.name.filter(|name| !name.is_empty()),
            locality: query.locality.filter(|locality| !locality.is_empty()),
            min_height,
        })
    }
}

pub fn filter(trees: &[TreeRecord], filter: &TreeFilter) -> Vec<TreeRecord> {
    trees.iter().filter(|tree| filter.matches(tree)).cloned().collect()
}

/// Choices offered by the selection widgets
pub fn options(trees: &[TreeRecord]) -> TreeOptions {
    let names: BTreeSet<&String> = trees.iter().filter_map(|t| t.nom_simplifie.as_ref()).collect();
    let localities: BTreeSet<&String> =
        trees.iter().filter_map(|t| t.acom_nom_m.as_ref()).collect();
    let max_height = trees
        .iter()
        .filter_map(|t| t.hauteur)
        .fold(0.0_f64, f64::max);

    TreeOptions {
        names: names.into_iter().cloned().collect(),
        localities: localities.into_iter().cloned().collect(),
        max_height: max_height as u32,
    }
}

/// Tree count per whole metre of height, ascending. Trees without a positive height are left out.
pub fn height_histogram(trees: &[TreeRecord]) -> Vec<HeightBin> {
    let mut bins: BTreeMap<u32, usize> = BTreeMap::new();
    for height in positive_heights(trees) {
        *bins.entry(height as u32).or_default() += 1;
    }
    bins.into_iter()
        .map(|(height, count)| HeightBin { height, count })
        .collect()
}

pub fn locality_heights(trees: &[TreeRecord]) -> Vec<LocalityHeight> {
    trees
        .iter()
        .filter_map(|tree| match (&tree.acom_nom_m, tree.hauteur) {
            (Some(locality), Some(height)) if height > 0.0 => Some(LocalityHeight {
                locality: locality.clone(),
                height,
            }),
            _ => None,
        })
        .collect()
}

pub fn map_points(trees: &[TreeRecord]) -> Vec<GeoPoint> {
    trees.iter().filter_map(|tree| tree.geo_point_2d).collect()
}

fn positive_heights(trees: &[TreeRecord]) -> impl Iterator<Item = f64> + '_ {
    trees.iter().filter_map(|t| t.hauteur).filter(|h| *h > 0.0)
}
