//! Elasticsearch persistence for plugin results.

use avg_core::PluginDocument;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{ClientError, Result};

/// Index Malice keeps its samples in
pub const DEFAULT_INDEX: &str = "malice";

/// Writes plugin results into the Malice Elasticsearch index
#[derive(Clone)]
pub struct ElasticsearchStore {
    http: HttpClient,
    base_url: Url,
    index: String,
}

impl ElasticsearchStore {
    /// Connect to the Elasticsearch node at `url` (e.g. `http://elasticsearch:9200`)
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(url, &HttpConfig::default())
    }

    /// Connect with custom HTTP settings
    pub fn with_config(url: &str, config: &HttpConfig) -> Result<Self> {
        let base_url = Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self {
            http: config.build_client()?,
            base_url,
            index: DEFAULT_INDEX.to_string(),
        })
    }

    /// Write into a different index
    #[must_use]
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Upsert the document under `plugins.<category>.<name>` of its sample
    pub async fn write(&self, document: &PluginDocument) -> Result<()> {
        let url = self.document_url(&document.id)?;
        let body = json!({
            "doc": {
                "id": document.id,
                "plugins": {
                    document.category.as_str(): {
                        document.name.as_str(): document.data,
                    },
                },
            },
            "doc_as_upsert": true,
        });
        debug!(url = %url, "POST plugin results");

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            info!(id = %document.id, index = %self.index, "stored plugin results");
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                code: status.as_u16(),
                message,
            })
        }
    }

    fn document_url(&self, id: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{}/_update/{id}", self.index))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }
}
