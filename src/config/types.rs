// src/config/types.rs
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;
use crate::kubeconfig::{combine_kubeconfigs, write_config_file};
use crate::rms::RmsClient;
use crate::utils::logging::{Logger, StderrLogger};

const RMS_URL_PATTERN: &str = r"^(https?://)?([\w-]+(\.[\w-]+)+)(:[0-9]{1,5})?(/\S*)?$";
// Anchored at the start only: trailing content after a valid prefix passes
const API_TOKEN_PATTERN: &str = r"^token-\w+:\w+";

fn rms_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RMS_URL_PATTERN).expect("URL pattern must compile"))
}

fn api_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(API_TOKEN_PATTERN).expect("token pattern must compile"))
}

/// Holds the values for one combined-kubeconfig run.
///
/// Inputs go through validating setters before `run` fetches every cluster's
/// kubeconfig from RMS and writes the merged file.
pub struct Config {
    rms_url: String,
    api_token: String,
    output_path: PathBuf,
    cluster_id: Option<String>,
    logger: Box<dyn Logger>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            rms_url: String::new(),
            api_token: String::new(),
            output_path: PathBuf::new(),
            cluster_id: None,
            logger: Box::new(StderrLogger::new(false)),
        }
    }

    /// Sets the RMS API URL. Accepts `http(s)://host.domain[:port][/path]`
    /// or a bare dotted host.
    pub fn set_rms_url(&mut self, url: &str) -> Result<(), Error> {
        if !rms_url_regex().is_match(url) {
            return Err(Error::validation(format!("invalid RMS URL format: {}", url)));
        }
        self.rms_url = url.to_string();
        Ok(())
    }

    /// Sets the RMS API token. The token must start with
    /// `token-<word>:<word>`.
    pub fn set_api_token(&mut self, token: &str) -> Result<(), Error> {
        if !api_token_regex().is_match(token) {
            return Err(Error::validation(format!(
                "invalid API token format, must match pattern: {}",
                API_TOKEN_PATTERN
            )));
        }
        self.api_token = token.to_string();
        Ok(())
    }

    /// Sets the directory the config file is written to. The path must exist
    /// and be a directory; it is stored as an absolute path.
    pub fn set_output_path(&mut self, path: &str) -> Result<(), Error> {
        let expanded = shellexpand::tilde(path).to_string();
        let metadata = fs::metadata(&expanded).map_err(|_| {
            Error::validation(format!("output path must be an existing directory: {}", path))
        })?;
        if !metadata.is_dir() {
            return Err(Error::validation(format!(
                "output path must be an existing directory: {}",
                path
            )));
        }
        self.output_path = std::path::absolute(&expanded).map_err(|_| {
            Error::validation(format!("failed to resolve absolute path: {}", path))
        })?;
        Ok(())
    }

    /// Restricts the run to a single cluster, skipping the cluster list call.
    /// Needed for API tokens scoped to one cluster, which cannot enumerate
    /// the cluster list.
    pub fn set_cluster_id(&mut self, cluster_id: &str) -> Result<(), Error> {
        if cluster_id.is_empty() {
            return Err(Error::validation("cluster ID must not be empty"));
        }
        self.cluster_id = Some(cluster_id.to_string());
        Ok(())
    }

    /// Replaces the default stderr logger.
    pub fn set_logger(&mut self, logger: Box<dyn Logger>) {
        self.logger = logger;
    }

    pub fn rms_url(&self) -> &str {
        &self.rms_url
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn cluster_id(&self) -> Option<&str> {
        self.cluster_id.as_deref()
    }

    /// Generates the combined kubeconfig file.
    ///
    /// Resolves the output directory (current working directory if none was
    /// set), determines the cluster IDs to process, fetches and merges their
    /// kubeconfig fragments, and writes `{output_path}/config`. The first
    /// error at any step aborts the run.
    pub fn run(&mut self) -> Result<(), Error> {
        if self.output_path.as_os_str().is_empty() {
            self.output_path = env::current_dir().map_err(|e| {
                Error::filesystem("failed to get current working directory", e)
            })?;
        }
        self.output_path = std::path::absolute(&self.output_path).map_err(|e| {
            Error::filesystem(
                format!("failed to resolve absolute path: {}", self.output_path.display()),
                e,
            )
        })?;

        let client = RmsClient::new(&self.rms_url, &self.api_token);

        let cluster_ids: Vec<String> = match &self.cluster_id {
            Some(cluster_id) => {
                self.logger
                    .log(&format!("using cluster ID override: {}", cluster_id));
                vec![cluster_id.clone()]
            }
            None => {
                self.logger.log("fetching cluster list from RMS");
                client
                    .list_clusters()?
                    .into_iter()
                    .map(|cluster| cluster.id)
                    .collect()
            }
        };

        self.logger
            .debug_log(&format!("processing {} cluster(s)", cluster_ids.len()));

        let combined = combine_kubeconfigs(&client, &cluster_ids, self.logger.as_mut())?;

        let file_path = write_config_file(&combined, &self.output_path)?;
        self.logger
            .log(&format!("wrote combined kubeconfig to {}", file_path.display()));

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
