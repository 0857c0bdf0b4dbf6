//! HTTP client for the remote assistant service.

use crate::error::AssistantsError;
use crate::types::*;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Beta opt-in header required by the Assistants API.
const BETA_HEADER_NAME: &str = "OpenAI-Beta";
const BETA_HEADER_VALUE: &str = "assistants=v2";

/// Assistant service client.
///
/// The API key is stored using `SecretString` to prevent accidental exposure
/// in logs or debug output.
#[derive(Clone)]
pub struct AssistantsClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl AssistantsClient {
    /// Create a new client against `base_url` (e.g. `https://api.openai.com/v1`).
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantsError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
        })
    }

    /// Register an assistant with the advertised function set.
    #[instrument(skip(self, request), fields(tool_count = request.tools.len()))]
    pub async fn create_assistant(
        &self,
        request: &CreateAssistantRequest,
    ) -> Result<Assistant, AssistantsError> {
        let response = self.post("/assistants").json(request).send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self))]
    pub async fn retrieve_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<Assistant, AssistantsError> {
        let response = self
            .get(&format!("/assistants/{}", assistant_id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a fresh conversation thread.
    #[instrument(skip(self))]
    pub async fn create_thread(&self) -> Result<Thread, AssistantsError> {
        let response = self
            .post("/threads")
            .json(&serde_json::json!({}))
            .send()
            .await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self))]
    pub async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread, AssistantsError> {
        let response = self.get(&format!("/threads/{}", thread_id)).send().await?;
        self.handle_response(response).await
    }

    /// Append one user message to a thread.
    #[instrument(skip(self, text))]
    pub async fn create_user_message(
        &self,
        thread_id: &str,
        text: &str,
    ) -> Result<MessageObject, AssistantsError> {
        let request = CreateMessageRequest {
            role: "user".into(),
            content: text.into(),
        };
        let response = self
            .post(&format!("/threads/{}/messages", thread_id))
            .json(&request)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// List a thread's messages, newest first.
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        thread_id: &str,
    ) -> Result<Vec<MessageObject>, AssistantsError> {
        let response = self
            .get(&format!("/threads/{}/messages", thread_id))
            .send()
            .await?;
        self.handle_response::<MessageList>(response)
            .await
            .map(|list| list.data)
    }

    /// Start a run of `assistant_id` over a thread.
    #[instrument(skip(self))]
    pub async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<Run, AssistantsError> {
        let request = CreateRunRequest {
            assistant_id: assistant_id.into(),
        };
        let response = self
            .post(&format!("/threads/{}/runs", thread_id))
            .json(&request)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Fetch a run's current status and any required action.
    #[instrument(skip(self))]
    pub async fn retrieve_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<Run, AssistantsError> {
        let response = self
            .get(&format!("/threads/{}/runs/{}", thread_id, run_id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Submit the complete tool output batch for a requires-action run.
    #[instrument(skip(self, outputs), fields(output_count = outputs.len()))]
    pub async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> Result<Run, AssistantsError> {
        let request = SubmitToolOutputsRequest {
            tool_outputs: outputs,
        };
        let response = self
            .post(&format!(
                "/threads/{}/runs/{}/submit_tool_outputs",
                thread_id, run_id
            ))
            .json(&request)
            .send()
            .await?;
        self.handle_response(response).await
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.request(self.client.post(format!("{}{}", self.base_url, path)))
            .header("Content-Type", "application/json")
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header(BETA_HEADER_NAME, BETA_HEADER_VALUE)
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AssistantsError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!("Response body: {}", body.chars().take(200).collect::<String>());
            serde_json::from_str(&body).map_err(AssistantsError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract error information from failed response.
    async fn extract_error(&self, response: reqwest::Response) -> AssistantsError {
        let status = response.status();

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Rate limit exceeded");
                AssistantsError::RateLimit
            }
            StatusCode::UNAUTHORIZED => {
                warn!("Authentication failed");
                AssistantsError::Unauthorized
            }
            StatusCode::NOT_FOUND => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown resource".into());
                AssistantsError::NotFound(message)
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                AssistantsError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
