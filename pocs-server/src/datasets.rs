use std::sync::Arc;
use std::time::Duration;

use pocs_core::trees::TREES_WHERE;
use pocs_types::{CommuneRecord, TreeRecord};
use tracing::info;

use crate::cache::MemoCache;
use crate::config::Config;
use crate::fetcher::{FetchError, PageSource, fetch_all};
use crate::odwb::{OdwbClient, OdwbDataset};

/// Loaded ODWB datasets, memoized for the cache lifetime
pub struct Datasets {
    trees: Arc<OdwbDataset<TreeRecord>>,
    communes: Arc<OdwbDataset<CommuneRecord>>,
    counts: MemoCache<String, u64>,
    tree_records: MemoCache<String, Arc<Vec<TreeRecord>>>,
    commune_records: MemoCache<String, Arc<Vec<CommuneRecord>>>,
}

impl Datasets {
    pub fn new(
        client: OdwbClient,
        trees_dataset: &str,
        communes_dataset: &str,
        ttl: Duration,
    ) -> Self {
        Self {
            trees: Arc::new(client.dataset(trees_dataset, Some(TREES_WHERE))),
            communes: Arc::new(client.dataset(communes_dataset, None)),
            counts: MemoCache::new(ttl),
            tree_records: MemoCache::new(ttl),
            commune_records: MemoCache::new(ttl),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            OdwbClient::new(config.odwb_base_url.clone()),
            &config.trees_dataset,
            &config.communes_dataset,
            config.cache_ttl(),
        )
    }

    pub async fn trees(&self) -> Result<Arc<Vec<TreeRecord>>, FetchError> {
        let source = self.trees.clone();
        self.tree_records
            .get_or_try_insert_with(source.query_key(), || async {
                info!("Loading trees from dataset {}", source.name());
                Ok::<_, FetchError>(Arc::new(fetch_all(source.clone(), &self.counts).await?))
            })
            .await
    }

    pub async fn communes(&self) -> Result<Arc<Vec<CommuneRecord>>, FetchError> {
        let source = self.communes.clone();
        self.commune_records
            .get_or_try_insert_with(source.query_key(), || async {
                info!("Loading communes from dataset {}", source.name());
                Ok::<_, FetchError>(Arc::new(fetch_all(source.clone(), &self.counts).await?))
            })
            .await
    }
}
