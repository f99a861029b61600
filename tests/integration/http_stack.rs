//! Full-stack tests: domain operations over HttpTransport against a mock server

use serde_json::json;
use v7go::config::ClientConfig;
use v7go::waiter::WaitPolicy;
use v7go::{V7Client, V7Error};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> V7Client {
    V7Client::from_config(ClientConfig::new("test-key", server.uri()).with_workspace("ws")).unwrap()
}

#[tokio::test]
async fn test_list_all_projects_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workspaces/ws/projects"))
        .and(query_param("offset", "0"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "p1", "name": "Invoices"}, {"id": "p2", "name": "Receipts", "type": "collection"}],
            "metadata": {"total_count": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/workspaces/ws/projects"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "p3", "name": "Contracts"}],
            "metadata": {"total_count": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client_for(&server).projects().list_all().await.unwrap();

    let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    assert_eq!(projects[1].project_type, "collection");
}

#[tokio::test]
async fn test_export_wait_returns_ready_export() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/workspaces/ws/projects/p1/exports"))
        .and(body_partial_json(json!({"format": "csv", "name": "q3"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "x1", "status": "pending", "format": "csv"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/workspaces/ws/projects/p1/exports/x1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "x1", "status": "completed", "format": "csv", "url": "https://files/x1.csv"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let exports = client.exports();
    let created = exports.create("p1", "csv", Some("q3"), None).await.unwrap();
    let ready = exports
        .wait_for_completion("p1", &created.id, WaitPolicy::EXPORT)
        .await
        .unwrap();

    assert!(ready.is_ready());
    assert_eq!(ready.download_url.as_deref(), Some("https://files/x1.csv"));
}

#[tokio::test]
async fn test_agent_builder_error_carries_status_and_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workspaces/ws/agent_builder/r1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid API key", "code": "unauthorized"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).agent().status("r1").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid API key");
    assert_eq!(err.to_json()["details"]["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_missing_workspace_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = V7Client::from_config(ClientConfig::new("test-key", server.uri())).unwrap();
    let err = client.hubs().list().await.unwrap_err();

    assert!(matches!(err, V7Error::Api { status: 0, .. }));
    assert!(err.to_json().get("status").is_none());
}

#[tokio::test]
async fn test_hub_files_from_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/workspaces/ws/hubs/h1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "h1",
            "index": {"tool_value": {"value": "[{\"slug\": \"f1\", \"path\": \"/contracts/a.pdf\"}]"}}
        })))
        .mount(&server)
        .await;

    let files = client_for(&server).hubs().list_files("h1").await.unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "contracts/a.pdf");
}
