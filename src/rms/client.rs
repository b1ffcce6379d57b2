// src/rms/client.rs
use reqwest::blocking::Client;
use reqwest::StatusCode;
use url::Url;

use crate::error::Error;
use crate::types::{KubeconfigResponse, RmsCluster, RmsClusterResponse};

pub const CLUSTER_LIST_PATH: &str = "/v3/clusters/";
pub const GENERATE_KUBECONFIG_ACTION: &str = "generateKubeconfig";

/// Blocking client for the RMS cluster-management API.
pub struct RmsClient {
    http: Client,
    base_url: String,
    api_token: String,
}

impl RmsClient {
    pub fn new(base_url: &str, api_token: &str) -> Self {
        RmsClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        }
    }

    /// Retrieves the list of all clusters known to RMS.
    pub fn list_clusters(&self) -> Result<Vec<RmsCluster>, Error> {
        let url = Url::parse(&format!("{}{}", self.base_url, CLUSTER_LIST_PATH))
            .map_err(|e| Error::request(format!("error creating cluster list request: {}", e)))?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .map_err(|e| Error::request(format!("error fetching clusters: {}", e)))?;

        if response.status() != StatusCode::OK {
            return Err(Error::request(format!(
                "unexpected response status fetching clusters: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| Error::request(format!("error reading cluster response: {}", e)))?;
        let cluster_response: RmsClusterResponse = serde_json::from_str(&body)
            .map_err(|e| Error::request(format!("error decoding cluster response: {}", e)))?;

        Ok(cluster_response.data)
    }

    /// Asks RMS to generate a kubeconfig for one cluster and returns the raw
    /// YAML document from the response.
    pub fn generate_kubeconfig(&self, cluster_id: &str) -> Result<String, Error> {
        let url = Url::parse(&format!(
            "{}{}{}?action={}",
            self.base_url, CLUSTER_LIST_PATH, cluster_id, GENERATE_KUBECONFIG_ACTION
        ))
        .map_err(|e| {
            Error::request(format!("error creating generate kubeconfig request: {}", e))
        })?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_token)
            .send()
            .map_err(|e| {
                Error::request(format!(
                    "error requesting kubeconfig for cluster {}: {}",
                    cluster_id, e
                ))
            })?;

        if response.status() != StatusCode::OK {
            return Err(Error::request(format!(
                "unexpected response status generating kubeconfig for cluster {}: {}",
                cluster_id,
                response.status()
            )));
        }

        let body = response.text().map_err(|e| {
            Error::request(format!(
                "error reading kubeconfig response for cluster {}: {}",
                cluster_id, e
            ))
        })?;
        let kubeconfig_response: KubeconfigResponse =
            serde_json::from_str(&body).map_err(|e| {
                Error::request(format!(
                    "error decoding kubeconfig response for cluster {}: {}",
                    cluster_id, e
                ))
            })?;

        Ok(kubeconfig_response.config)
    }
}
