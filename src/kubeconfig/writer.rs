// src/kubeconfig/writer.rs
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::Kubeconfig;

pub const CONFIG_FILE_NAME: &str = "config";

/// Serializes the combined document and writes it to `{output_path}/config`,
/// replacing any existing file. The file is created owner read/write only,
/// matching kubeconfig conventions.
pub fn write_config_file(kubeconfig: &Kubeconfig, output_path: &Path) -> Result<PathBuf, Error> {
    let yaml = serde_yaml::to_string(kubeconfig)
        .map_err(|e| Error::parse(format!("error serializing combined kubeconfig: {}", e)))?;

    let file_path = output_path.join(CONFIG_FILE_NAME);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(&file_path).map_err(|e| {
        Error::filesystem(format!("error creating config file {}", file_path.display()), e)
    })?;

    file.write_all(yaml.as_bytes()).map_err(|e| {
        Error::filesystem(format!("error writing config file {}", file_path.display()), e)
    })?;
    file.flush().map_err(|e| {
        Error::filesystem(format!("error flushing config file {}", file_path.display()), e)
    })?;

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::types::{KubeconfigCluster, KubeconfigClusterDetails};

    fn single_cluster_document() -> Kubeconfig {
        let mut kubeconfig = Kubeconfig::new_combined();
        kubeconfig.clusters.push(KubeconfigCluster {
            name: "test-cluster".to_string(),
            cluster: KubeconfigClusterDetails {
                server: "https://test.local".to_string(),
                certificate_authority_data: String::new(),
            },
        });
        kubeconfig
    }

    #[test]
    fn write_produces_a_loadable_kubeconfig() {
        let dir = tempfile::tempdir().unwrap();

        let file_path = write_config_file(&single_cluster_document(), dir.path()).unwrap();
        assert_eq!(file_path, dir.path().join(CONFIG_FILE_NAME));

        let contents = fs::read_to_string(&file_path).unwrap();
        assert!(contents.starts_with("apiVersion: v1\nkind: Config\n"));

        let reloaded: Kubeconfig = serde_yaml::from_str(&contents).unwrap();
        assert_eq!(reloaded.api_version, "v1");
        assert_eq!(reloaded.kind, "Config");
        assert_eq!(reloaded.clusters.len(), 1);
        assert_eq!(reloaded.clusters[0].name, "test-cluster");
        assert_eq!(reloaded.clusters[0].cluster.server, "https://test.local");
        assert!(reloaded.users.is_empty());
        assert!(reloaded.contexts.is_empty());
    }

    #[test]
    fn write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let kubeconfig = single_cluster_document();

        let file_path = write_config_file(&kubeconfig, dir.path()).unwrap();
        let first = fs::read_to_string(&file_path).unwrap();

        write_config_file(&kubeconfig, dir.path()).unwrap();
        let second = fs::read_to_string(&file_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn write_replaces_longer_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&file_path, "x".repeat(10_000)).unwrap();

        write_config_file(&single_cluster_document(), dir.path()).unwrap();

        let contents = fs::read_to_string(&file_path).unwrap();
        assert!(contents.starts_with("apiVersion: v1\n"));
        assert!(!contents.contains("xxxx"));
    }

    #[test]
    fn write_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("invalid/path");

        let err = write_config_file(&single_cluster_document(), &missing).unwrap_err();

        assert!(err.is_filesystem());
        assert!(err
            .to_string()
            .to_lowercase()
            .contains("no such file or directory"));
    }

    #[cfg(unix)]
    #[test]
    fn write_restricts_permissions_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file_path = write_config_file(&single_cluster_document(), dir.path()).unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
