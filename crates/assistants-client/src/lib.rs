//! Client for the remote conversational-assistant service.
//!
//! Speaks the Assistants v2 HTTP surface the shopping bot consumes: threads,
//! messages, runs, and tool-output submission, plus one-time assistant
//! registration. Conversation state, model inference, and tool-call
//! generation all live on the service side; this crate only observes runs and
//! feeds them inputs.

mod client;
mod error;
mod types;

pub use client::AssistantsClient;
pub use error::AssistantsError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(mock_server: &MockServer) -> AssistantsClient {
        AssistantsClient::new("test-api-key", mock_server.uri(), Duration::from_secs(30)).unwrap()
    }

    #[tokio::test]
    async fn test_create_thread_sends_beta_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(header("OpenAI-Beta", "assistants=v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "thread_abc",
                "object": "thread",
                "created_at": 1700000000
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let thread = client.create_thread().await.unwrap();
        assert_eq!(thread.id, "thread_abc");
    }

    #[tokio::test]
    async fn test_retrieve_run_parses_required_action() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/threads/thread_abc/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "run_1",
                "object": "thread.run",
                "thread_id": "thread_abc",
                "assistant_id": "asst_1",
                "status": "requires_action",
                "required_action": {
                    "type": "submit_tool_outputs",
                    "submit_tool_outputs": {
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {
                                "name": "check_stock",
                                "arguments": "{\"productName\": \"Smart Fitness Watch\"}"
                            }
                        }]
                    }
                }
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let run = client.retrieve_run("thread_abc", "run_1").await.unwrap();

        assert_eq!(run.status, RunStatus::RequiresAction);
        let calls = run.pending_tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].function.name, "check_stock");
    }

    #[tokio::test]
    async fn test_retrieve_run_without_action_has_no_pending_calls() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/threads/thread_abc/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "run_1",
                "object": "thread.run",
                "thread_id": "thread_abc",
                "assistant_id": "asst_1",
                "status": "in_progress"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let run = client.retrieve_run("thread_abc", "run_1").await.unwrap();

        assert_eq!(run.status, RunStatus::InProgress);
        assert!(run.pending_tool_calls().is_empty());
        assert!(!run.status.is_terminal());
    }

    #[tokio::test]
    async fn test_submit_tool_outputs_posts_batch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads/thread_abc/runs/run_1/submit_tool_outputs"))
            .and(body_json(serde_json::json!({
                "tool_outputs": [{
                    "tool_call_id": "call_1",
                    "output": "true"
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "run_1",
                "object": "thread.run",
                "thread_id": "thread_abc",
                "assistant_id": "asst_1",
                "status": "in_progress"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let outputs = vec![ToolOutput {
            tool_call_id: "call_1".into(),
            output: "true".into(),
        }];

        let run = client
            .submit_tool_outputs("thread_abc", "run_1", outputs)
            .await
            .unwrap();
        assert_eq!(run.status, RunStatus::InProgress);
    }

    #[tokio::test]
    async fn test_list_messages_newest_first_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/threads/thread_abc/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "data": [
                    {
                        "id": "msg_2",
                        "object": "thread.message",
                        "created_at": 1700000100,
                        "role": "assistant",
                        "content": [{
                            "type": "text",
                            "text": { "value": "Yes, it is in stock.", "annotations": [] }
                        }]
                    },
                    {
                        "id": "msg_1",
                        "object": "thread.message",
                        "created_at": 1700000000,
                        "role": "user",
                        "content": [{
                            "type": "text",
                            "text": { "value": "Is it in stock?", "annotations": [] }
                        }]
                    }
                ],
                "has_more": false
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let messages = client.list_messages("thread_abc").await.unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "assistant");
        assert_eq!(messages[0].text(), Some("Yes, it is in stock."));
    }

    #[tokio::test]
    async fn test_create_assistant_advertises_tools() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assistants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "asst_new",
                "object": "assistant",
                "name": "ShopBot",
                "model": "gpt-4o"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let request = CreateAssistantRequest {
            model: "gpt-4o".into(),
            name: "ShopBot".into(),
            instructions: "You help shoppers.".into(),
            tools: vec![ToolDefinition {
                tool_type: "function".into(),
                function: FunctionDefinitionApi {
                    name: "check_stock".into(),
                    description: "Checks stock".into(),
                    parameters: serde_json::json!({"type": "object", "properties": {}}),
                },
            }],
        };

        let assistant = client.create_assistant(&request).await.unwrap();
        assert_eq!(assistant.id, "asst_new");
        assert_eq!(assistant.model, "gpt-4o");
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_dedicated_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let result = client.create_thread().await;
        assert!(matches!(result, Err(AssistantsError::RateLimit)));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_dedicated_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let result = client.create_thread().await;
        assert!(matches!(result, Err(AssistantsError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_stale_thread_maps_to_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/threads/thread_gone"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("No thread found with id 'thread_gone'"),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let result = client.retrieve_thread("thread_gone").await;
        assert!(matches!(result, Err(AssistantsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_server_error_carries_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        match client.create_thread().await {
            Err(AssistantsError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {:?}", other.map(|t| t.id)),
        }
    }
}
