// src/types.rs
use serde::{Deserialize, Serialize};

/// One cluster as reported by the RMS cluster list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RmsCluster {
    pub id: String,
    pub name: String,
}

/// Body of the list-clusters response.
#[derive(Debug, Deserialize)]
pub struct RmsClusterResponse {
    pub data: Vec<RmsCluster>,
}

/// Body of the generate-kubeconfig response; `config` is a YAML document.
#[derive(Debug, Deserialize)]
pub struct KubeconfigResponse {
    pub config: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeconfigClusterDetails {
    #[serde(default)]
    pub server: String,
    #[serde(rename = "certificate-authority-data", default)]
    pub certificate_authority_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeconfigCluster {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster: KubeconfigClusterDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeconfigUserDetails {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeconfigUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user: KubeconfigUserDetails,
}

/// Context entries reference cluster and user entries by name only; dangling
/// names are left to downstream kubeconfig consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeconfigContextDetails {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub cluster: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeconfigContext {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub context: KubeconfigContextDetails,
}

/// A kubeconfig document. Doubles as the model for per-cluster fragments
/// (which often omit `apiVersion` and `kind`, hence the defaults) and for
/// the combined output file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kubeconfig {
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub clusters: Vec<KubeconfigCluster>,
    #[serde(default)]
    pub users: Vec<KubeconfigUser>,
    #[serde(default)]
    pub contexts: Vec<KubeconfigContext>,
}

impl Kubeconfig {
    /// An empty combined document with the fixed kubeconfig header fields.
    pub fn new_combined() -> Self {
        Kubeconfig {
            api_version: "v1".to_string(),
            kind: "Config".to_string(),
            ..Default::default()
        }
    }
}
