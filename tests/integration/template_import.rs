//! Template import retry behaviour over HTTP

use serde_json::{json, Map, Value};
use v7go::config::ClientConfig;
use v7go::template_import::{is_duplicate_name_conflict, ImportOptions};
use v7go::types::Template;
use v7go::V7Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IMPORT: &str = "/api/workspaces/ws/projects/import_from_template";

fn template() -> Template {
    Template {
        projects: vec![
            json!({"id": "t1", "name": "A", "properties": []}),
            json!({"id": "t2", "name": "B", "properties": []}),
        ],
        external_objects: Map::new(),
    }
}

fn duplicate_response() -> ResponseTemplate {
    ResponseTemplate::new(422).set_body_json(json!({
        "error": {"message": "Validation failed", "details": {"name": ["duplicate_name"]}}
    }))
}

async fn submitted_names(server: &MockServer) -> Vec<Vec<String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == IMPORT)
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["projects"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["name"].as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_renames_from_original_after_repeated_conflicts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMPORT))
        .respond_with(duplicate_response())
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMPORT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instantiated_objects": {"t1": "p1"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/workspaces/ws/projects/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "name": "A (2)"})))
        .mount(&server)
        .await;

    let client =
        V7Client::from_config(ClientConfig::new("k", server.uri()).with_workspace("ws")).unwrap();
    let projects = client
        .templates()
        .import_template(&template(), &ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(projects[0].name, "A (2)");
    let names = submitted_names(&server).await;
    assert_eq!(names.len(), 3);
    assert_eq!(names[2], vec!["A (2)", "B (2)"]);
}

#[tokio::test]
async fn test_retry_ceiling_propagates_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMPORT))
        .respond_with(duplicate_response())
        .expect(3)
        .mount(&server)
        .await;

    let client =
        V7Client::from_config(ClientConfig::new("k", server.uri()).with_workspace("ws")).unwrap();
    let err = client
        .templates()
        .import_template(&template(), &ImportOptions::default().max_retries(2))
        .await
        .unwrap_err();

    assert!(is_duplicate_name_conflict(&err));
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn test_non_duplicate_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMPORT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid template"})))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        V7Client::from_config(ClientConfig::new("k", server.uri()).with_workspace("ws")).unwrap();
    let err = client
        .templates()
        .import_template(&template(), &ImportOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid template");
}
