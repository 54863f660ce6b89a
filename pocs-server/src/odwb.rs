//! Client for the ODWB (Open Data Wallonie-Bruxelles) explore v2.1 API.
//!
//! Endpoint: `{base}/catalog/datasets/{dataset}/records?limit=L&offset=O&where=F`

use std::marker::PhantomData;

use async_trait::async_trait;
use pocs_core::PageRequest;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::fetcher::{FetchError, PageSource};

#[derive(Debug, Deserialize)]
pub struct RecordsResponse<R> {
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub results: Vec<R>,
}

#[derive(Clone)]
pub struct OdwbClient {
    client: Client,
    base_url: String,
}

impl OdwbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dataset<R>(&self, dataset: &str, filter: Option<&str>) -> OdwbDataset<R> {
        OdwbDataset {
            client: self.clone(),
            dataset: dataset.to_string(),
            filter: filter.map(str::to_string),
            _record: PhantomData,
        }
    }

    fn records_url(&self, dataset: &str) -> String {
        format!("{}/catalog/datasets/{}/records", self.base_url, dataset)
    }

    #[instrument(skip(self, filter))]
    pub async fn records<R: DeserializeOwned>(
        &self,
        dataset: &str,
        filter: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<RecordsResponse<R>, FetchError> {
        let url = self.records_url(dataset);
        let mut params = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(filter) = filter {
            params.push(("where", filter.to_string()));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                url,
            });
        }

        let body: RecordsResponse<R> = response.json().await?;
        debug!(count = body.results.len(), total = body.total_count, "ODWB page received");
        Ok(body)
    }
}

/// One ODWB dataset, optionally narrowed by a `where` clause, viewed as pages of `R`.
pub struct OdwbDataset<R> {
    client: OdwbClient,
    dataset: String,
    filter: Option<String>,
    _record: PhantomData<fn() -> R>,
}

impl<R> OdwbDataset<R> {
    pub fn name(&self) -> &str {
        &self.dataset
    }
}

#[async_trait]
impl<R> PageSource for OdwbDataset<R>
where
    R: DeserializeOwned + Send + 'static,
{
    type Record = R;

    fn query_key(&self) -> String {
        match &self.filter {
            Some(filter) => format!("{}?where={}", self.dataset, filter),
            None => self.dataset.clone(),
        }
    }

    async fn total_count(&self) -> Result<u64, FetchError> {
        let response: RecordsResponse<serde_json::Value> = self
            .client
            .records(&self.dataset, self.filter.as_deref(), 0, 0)
            .await?;
        Ok(response.total_count)
    }

    async fn fetch_page(&self, page: PageRequest) -> Result<Vec<R>, FetchError> {
        let response: RecordsResponse<R> = self
            .client
            .records(&self.dataset, self.filter.as_deref(), page.limit, page.offset)
            .await?;
        Ok(response.results)
    }
}
