// src/kubeconfig/combine.rs
use crate::error::Error;
use crate::rms::RmsClient;
use crate::types::Kubeconfig;
use crate::utils::logging::Logger;

/// Fetches the kubeconfig fragment for every cluster ID, in the given order,
/// and merges the fragments into one combined document.
///
/// The first failed fetch or parse aborts the whole run; no partial document
/// is returned. Entries keep their fragment-internal order and are never
/// deduplicated, so the output order is fully determined by `cluster_ids`.
pub fn combine_kubeconfigs(
    client: &RmsClient,
    cluster_ids: &[String],
    logger: &mut dyn Logger,
) -> Result<Kubeconfig, Error> {
    let mut combined = Kubeconfig::new_combined();

    for cluster_id in cluster_ids {
        logger.log(&format!("fetching kubeconfig for cluster {}", cluster_id));

        let fragment = client.generate_kubeconfig(cluster_id)?;
        let kubeconfig: Kubeconfig = serde_yaml::from_str(&fragment).map_err(|e| {
            Error::parse(format!(
                "error parsing kubeconfig for cluster {}: {}",
                cluster_id, e
            ))
        })?;

        logger.debug_log(&format!(
            "cluster {}: {} cluster(s), {} user(s), {} context(s)",
            cluster_id,
            kubeconfig.clusters.len(),
            kubeconfig.users.len(),
            kubeconfig.contexts.len()
        ));

        combined.clusters.extend(kubeconfig.clusters);
        combined.users.extend(kubeconfig.users);
        combined.contexts.extend(kubeconfig.contexts);
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rms::CLUSTER_LIST_PATH;
    use crate::testutil::{MockRequest, MockResponse, MockServer, RecordingLogger};

    fn fragment_for(name: &str) -> String {
        format!(
            "
clusters:
- name: {name}
  cluster:
    server: https://{name}.test
users:
- name: {name}-user
  user:
    token: {name}-token
contexts:
- name: {name}-context
  context:
    cluster: {name}
    user: {name}-user"
        )
    }

    fn fragment_server() -> MockServer {
        MockServer::start(|request: &MockRequest| {
            let cluster_id = request.path.trim_start_matches(CLUSTER_LIST_PATH);
            match cluster_id {
                "c1" | "c2" => {
                    MockResponse::ok(json!({ "config": fragment_for(cluster_id) }).to_string())
                }
                _ => MockResponse::status(404, "Not Found"),
            }
        })
    }

    #[test]
    fn combine_preserves_cluster_order() {
        let server = fragment_server();
        let client = RmsClient::new(&server.url(), "token-test:test");
        let mut logger = RecordingLogger::new();

        let ids = vec!["c1".to_string(), "c2".to_string()];
        let combined = combine_kubeconfigs(&client, &ids, &mut logger).unwrap();

        assert_eq!(combined.api_version, "v1");
        assert_eq!(combined.kind, "Config");
        assert_eq!(combined.clusters.len(), 2);
        assert_eq!(combined.users.len(), 2);
        assert_eq!(combined.contexts.len(), 2);
        assert_eq!(combined.clusters[0].name, "c1");
        assert_eq!(combined.clusters[1].name, "c2");
        assert_eq!(combined.users[0].name, "c1-user");
        assert_eq!(combined.users[1].name, "c2-user");
        assert_eq!(combined.contexts[0].name, "c1-context");
        assert_eq!(combined.contexts[1].name, "c2-context");
    }

    #[test]
    fn combine_keeps_duplicate_names() {
        let server = MockServer::start(|_| {
            MockResponse::ok(json!({ "config": fragment_for("same") }).to_string())
        });
        let client = RmsClient::new(&server.url(), "token-test:test");
        let mut logger = RecordingLogger::new();

        let ids = vec!["a".to_string(), "b".to_string()];
        let combined = combine_kubeconfigs(&client, &ids, &mut logger).unwrap();

        assert_eq!(combined.clusters.len(), 2);
        assert_eq!(combined.clusters[0].name, "same");
        assert_eq!(combined.clusters[1].name, "same");
    }

    #[test]
    fn combine_fails_fast_on_second_cluster() {
        let server = fragment_server();
        let client = RmsClient::new(&server.url(), "token-test:test");
        let mut logger = RecordingLogger::new();

        let ids = vec!["c1".to_string(), "does-not-exist".to_string()];
        let err = combine_kubeconfigs(&client, &ids, &mut logger).unwrap_err();

        assert!(err.is_request());
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn combine_reports_malformed_fragment_with_cluster_id() {
        let server = MockServer::start(|_| {
            MockResponse::ok(
                json!({ "config": "invalid_yaml: [this, is, not, valid, yaml" }).to_string(),
            )
        });
        let client = RmsClient::new(&server.url(), "token-test:test");
        let mut logger = RecordingLogger::new();

        let ids = vec!["test-cluster".to_string()];
        let err = combine_kubeconfigs(&client, &ids, &mut logger).unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(err.code(), Some(crate::error::ERR_REQUEST_CODE));
        assert!(err.to_string().contains("test-cluster"));
    }

    #[test]
    fn combine_with_no_ids_returns_empty_document() {
        let server = fragment_server();
        let client = RmsClient::new(&server.url(), "token-test:test");
        let mut logger = RecordingLogger::new();

        let combined = combine_kubeconfigs(&client, &[], &mut logger).unwrap();

        assert_eq!(combined.api_version, "v1");
        assert_eq!(combined.kind, "Config");
        assert!(combined.clusters.is_empty());
        assert!(combined.users.is_empty());
        assert!(combined.contexts.is_empty());
        assert!(logger.messages.is_empty());
    }
}
