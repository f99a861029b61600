//! Agent builder and agent fixer sessions.

use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::types::{AgentBuilderSession, AgentFixerSession};
use crate::waiter::{OperationState, WaitPolicy, Waiter};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Failure message when a session errors without saying why.
pub const AGENT_FAILED: &str = "Agent builder failed";

/// Plan generation is done once the plan awaits confirmation or the session ended.
pub fn classify_plan(session: &AgentBuilderSession) -> OperationState {
    match session.status.as_str() {
        "error" => OperationState::Failed,
        "awaiting_confirmation" | "completed" => OperationState::Succeeded,
        _ => OperationState::Pending,
    }
}

pub fn classify_execution(session: &AgentBuilderSession) -> OperationState {
    match session.status.as_str() {
        "completed" => OperationState::Succeeded,
        "error" => OperationState::Failed,
        _ => OperationState::Pending,
    }
}

pub struct AgentOperations<'a> {
    client: &'a ApiClient,
    cancel: Option<CancellationToken>,
}

impl<'a> AgentOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            cancel: None,
        }
    }

    /// Abort waits when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Start an agent builder session from a natural-language prompt.
    pub async fn create(&self, prompt: &str) -> Result<AgentBuilderSession, V7Error> {
        let response = self
            .client
            .workspace_post("/agent_builder", Some(json!({ "user_prompt": prompt })))
            .await?;
        let session = AgentBuilderSession::from_record(response)?;
        info!(request_id = %session.request_id, status = %session.status, "Agent builder started");
        Ok(session)
    }

    pub async fn status(&self, request_id: &str) -> Result<AgentBuilderSession, V7Error> {
        let response = self
            .client
            .workspace_get(&format!("/agent_builder/{}", request_id))
            .await?;
        AgentBuilderSession::from_record(response)
    }

    /// Refine the plan. Resends the session's current plan with the message.
    pub async fn followup(
        &self,
        request_id: &str,
        message: &str,
    ) -> Result<AgentBuilderSession, V7Error> {
        let session = self.status(request_id).await?;
        let body = json!({
            "message": message,
            "structured_plan": serde_json::to_value(&session.structured_plan)?,
        });
        let response = self
            .client
            .workspace_post(&format!("/agent_builder/{}/followup", request_id), Some(body))
            .await?;
        AgentBuilderSession::from_record(fill_request_id(response, request_id))
    }

    /// Execute the current plan, creating the project.
    pub async fn execute(&self, request_id: &str) -> Result<AgentBuilderSession, V7Error> {
        let session = self.status(request_id).await?;
        let body = json!({
            "structured_plan": serde_json::to_value(&session.structured_plan)?,
        });
        let response = self
            .client
            .workspace_post(&format!("/agent_builder/{}/execute", request_id), Some(body))
            .await?;
        AgentBuilderSession::from_record(fill_request_id(response, request_id))
    }

    pub async fn wait_for_plan(
        &self,
        request_id: &str,
        policy: WaitPolicy,
    ) -> Result<AgentBuilderSession, V7Error> {
        self.waiter(policy, "plan")
            .wait(|| self.status(request_id), classify_plan)
            .await
    }

    pub async fn wait_for_completion(
        &self,
        request_id: &str,
        policy: WaitPolicy,
    ) -> Result<AgentBuilderSession, V7Error> {
        self.waiter(policy, "completion")
            .wait(|| self.status(request_id), classify_execution)
            .await
    }

    /// Start an agent fixer session against an existing project.
    pub async fn fix(&self, project_id: &str, prompt: &str) -> Result<AgentFixerSession, V7Error> {
        let response = self
            .client
            .workspace_post(
                &format!("/projects/{}/agent-fixer", project_id),
                Some(json!({ "prompt": prompt })),
            )
            .await?;
        AgentFixerSession::from_record(response)
    }

    fn waiter(&self, policy: WaitPolicy, subject: &str) -> Waiter {
        let waiter = Waiter::new(policy)
            .subject(subject)
            .failure_message(AGENT_FAILED);
        match &self.cancel {
            Some(token) => waiter.with_cancellation(token.clone()),
            None => waiter,
        }
    }
}

// The followup and execute endpoints may omit the request id.
fn fill_request_id(mut response: Value, request_id: &str) -> Value {
    if let Value::Object(map) = &mut response {
        let present = map
            .get("request_id")
            .and_then(Value::as_str)
            .map(|id| !id.is_empty())
            .unwrap_or(false);
        if !present {
            map.insert("request_id".to_string(), json!(request_id));
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use reqwest::Method;
    use std::sync::Arc;

    fn client(responses: Vec<Result<Value, V7Error>>) -> (ApiClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        (ApiClient::new(transport.clone(), Some("ws".to_string())), transport)
    }

    #[tokio::test]
    async fn create_posts_user_prompt() {
        let (client, transport) = client(vec![Ok(json!({"request_id": "r1", "status": "pending"}))]);

        let session = AgentOperations::new(&client)
            .create("Extract invoices")
            .await
            .unwrap();

        assert_eq!(session.id, "r1");
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/workspaces/ws/agent_builder");
        assert_eq!(request.body, Some(json!({"user_prompt": "Extract invoices"})));
    }

    #[tokio::test]
    async fn execute_resends_plan_and_fills_request_id() {
        let (client, transport) = client(vec![
            Ok(json!({
                "id": "r1",
                "status": "awaiting_confirmation",
                "structured_plan": [{"property_id": "p1", "title": "Vendor", "description": "d", "dependencies": []}]
            })),
            Ok(json!({"status": "executing"})),
        ]);

        let session = AgentOperations::new(&client).execute("r1").await.unwrap();

        assert_eq!(session.request_id, "r1");
        assert_eq!(session.id, "r1");
        let requests = transport.requests();
        assert_eq!(requests[1].path, "/api/workspaces/ws/agent_builder/r1/execute");
        let body = requests[1].body.as_ref().unwrap();
        assert_eq!(body["structured_plan"][0]["property_id"], "p1");
    }

    #[tokio::test]
    async fn followup_sends_message_with_plan() {
        let (client, transport) = client(vec![
            Ok(json!({"id": "r1", "status": "awaiting_confirmation", "structured_plan": []})),
            Ok(json!({"request_id": "r1", "status": "planning"})),
        ]);

        AgentOperations::new(&client)
            .followup("r1", "add due date")
            .await
            .unwrap();

        let body = transport.requests()[1].body.clone().unwrap();
        assert_eq!(body, json!({"message": "add due date", "structured_plan": []}));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_plan_accepts_awaiting_confirmation() {
        let (client, transport) = client(vec![
            Ok(json!({"id": "r1", "status": "planning"})),
            Ok(json!({"id": "r1", "status": "awaiting_confirmation"})),
        ]);

        let session = AgentOperations::new(&client)
            .wait_for_plan("r1", WaitPolicy::PLAN)
            .await
            .unwrap();

        assert!(session.is_awaiting_confirmation());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_for_completion_fails_with_default_message() {
        let (client, _) = client(vec![Ok(json!({"id": "r1", "status": "error"}))]);

        let err = AgentOperations::new(&client)
            .wait_for_completion("r1", WaitPolicy::EXECUTION)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), AGENT_FAILED);
        assert_eq!(err.to_json()["details"]["resource"]["status"], "error");
    }

    #[test]
    fn classifiers_differ_on_awaiting_confirmation() {
        let session =
            AgentBuilderSession::from_record(json!({"id": "r", "status": "awaiting_confirmation"}))
                .unwrap();
        assert_eq!(classify_plan(&session), OperationState::Succeeded);
        assert_eq!(classify_execution(&session), OperationState::Pending);
    }

    #[tokio::test]
    async fn fix_targets_project() {
        let (client, transport) = client(vec![Ok(json!({"request_id": "f1", "status": "pending"}))]);

        let session = AgentOperations::new(&client)
            .fix("p1", "use ISO dates")
            .await
            .unwrap();

        assert_eq!(session.request_id, "f1");
        assert_eq!(
            transport.requests()[0].path,
            "/api/workspaces/ws/projects/p1/agent-fixer"
        );
    }
}
