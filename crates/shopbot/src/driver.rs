//! Run driver: executes one conversational turn against the remote service.
//!
//! Submits the user message, starts a run, then polls its status. When the
//! run requires local function execution, the pending calls are dispatched
//! through the registry and the complete output batch is submitted in one
//! request before polling resumes. The loop is bounded by an overall deadline
//! and an exponential poll backoff, and can be interrupted through a
//! cancellation signal.

use crate::config::RunConfig;
use assistants_client::{AssistantsClient, AssistantsError, RunStatus, ToolCall, ToolOutput};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};
use tools::{FunctionCall as LocalFunctionCall, ToolCall as LocalToolCall, ToolExecutor};
use tracing::{info, instrument, warn};

/// Errors ending a turn without an assistant reply.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Assistant service error: {0}")]
    Client(#[from] AssistantsError),

    /// The run reached a terminal non-success state.
    #[error("Run ended in terminal state '{0}'")]
    RunFailed(RunStatus),

    /// The overall deadline elapsed before the run finished.
    #[error("Run did not complete within {0:?}")]
    Timeout(Duration),

    /// The caller raised the cancellation signal mid-run.
    #[error("Run cancelled before completion")]
    Cancelled,

    /// The run signalled requires_action without any tool calls.
    #[error("Run requires action but carried no tool calls")]
    EmptyRequiredAction,

    /// The dispatched batch does not cover every requested call. Submitting
    /// such a batch would leave the run blocked on the service side.
    #[error("Tool output batch is missing an output for call '{0}'")]
    IncompleteOutputs(String),

    /// The run completed but the thread holds no assistant reply.
    #[error("Run completed without an assistant reply")]
    MissingReply,
}

/// Drives runs to completion for one conversation.
pub struct RunDriver {
    client: Arc<AssistantsClient>,
    executor: Arc<ToolExecutor>,
    poll_interval: Duration,
    max_poll_interval: Duration,
    max_wait: Duration,
    max_transient_failures: u32,
}

impl RunDriver {
    pub fn new(client: Arc<AssistantsClient>, executor: Arc<ToolExecutor>, run: &RunConfig) -> Self {
        Self {
            client,
            executor,
            poll_interval: run.poll_interval,
            max_poll_interval: run.max_poll_interval,
            max_wait: run.max_wait,
            max_transient_failures: run.max_transient_failures,
        }
    }

    /// Run one turn: append `user_text`, start a run, and drive it until the
    /// assistant replies or the run ends otherwise.
    #[instrument(skip(self, user_text, cancel))]
    pub async fn run_turn(
        &self,
        thread_id: &str,
        assistant_id: &str,
        user_text: &str,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<String, DriverError> {
        self.client
            .create_user_message(thread_id, user_text)
            .await?;
        let run = self.client.create_run(thread_id, assistant_id).await?;
        info!(run_id = %run.id, status = %run.status, "Run started");

        self.drive_to_completion(thread_id, &run.id, cancel).await
    }

    async fn drive_to_completion(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<String, DriverError> {
        let started = Instant::now();
        let mut interval = self.poll_interval;
        let mut transient_failures = 0u32;
        let mut last_status = None;

        loop {
            if *cancel.borrow() {
                info!(run_id = %run_id, "Cancellation requested; polling stopped");
                return Err(DriverError::Cancelled);
            }
            if started.elapsed() >= self.max_wait {
                return Err(DriverError::Timeout(self.max_wait));
            }

            let run = match self.client.retrieve_run(thread_id, run_id).await {
                Ok(run) => {
                    transient_failures = 0;
                    run
                }
                Err(e @ AssistantsError::Unauthorized) => return Err(e.into()),
                Err(e) => {
                    transient_failures += 1;
                    if transient_failures > self.max_transient_failures {
                        return Err(e.into());
                    }
                    warn!(error = %e, attempt = transient_failures, "Run status poll failed; retrying");
                    self.wait_or_cancel(interval, cancel).await?;
                    interval = (interval * 2).min(self.max_poll_interval);
                    continue;
                }
            };

            if last_status != Some(run.status) {
                info!(run_id = %run_id, status = %run.status, "Run status");
                last_status = Some(run.status);
            }

            match run.status {
                RunStatus::RequiresAction => {
                    let calls = run.pending_tool_calls();
                    if calls.is_empty() {
                        return Err(DriverError::EmptyRequiredAction);
                    }
                    let outputs = self.dispatch_batch(calls).await?;
                    self.client
                        .submit_tool_outputs(thread_id, run_id, outputs)
                        .await?;
                    // Generation resumes immediately after submission, so
                    // poll again without waiting and restart the backoff.
                    interval = self.poll_interval;
                }
                RunStatus::Completed => return self.latest_reply(thread_id).await,
                RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired => {
                    if let Some(last_error) = &run.last_error {
                        warn!(code = %last_error.code, message = %last_error.message, "Run reported an error");
                    }
                    return Err(DriverError::RunFailed(run.status));
                }
                RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling => {
                    self.wait_or_cancel(interval, cancel).await?;
                    interval = (interval * 2).min(self.max_poll_interval);
                }
            }
        }
    }

    /// Dispatch every pending call and assemble the output batch. The service
    /// blocks the run indefinitely if any call's output is missing, so the
    /// batch is verified complete before it is handed back for submission.
    async fn dispatch_batch(&self, calls: &[ToolCall]) -> Result<Vec<ToolOutput>, DriverError> {
        info!(count = calls.len(), "Run requires local function execution");

        let local_calls: Vec<LocalToolCall> = calls
            .iter()
            .map(|call| LocalToolCall {
                id: call.id.clone(),
                call_type: call.call_type.clone(),
                function: LocalFunctionCall {
                    name: call.function.name.clone(),
                    arguments: call.function.arguments.clone(),
                },
            })
            .collect();

        let results = self.executor.execute_batch(&local_calls).await;
        let outputs: Vec<ToolOutput> = results
            .into_iter()
            .map(|result| ToolOutput {
                tool_call_id: result.tool_call_id,
                output: result.content,
            })
            .collect();

        for call in calls {
            if !outputs.iter().any(|output| output.tool_call_id == call.id) {
                return Err(DriverError::IncompleteOutputs(call.id.clone()));
            }
        }

        Ok(outputs)
    }

    /// Newest assistant message in the thread, once the run has completed.
    async fn latest_reply(&self, thread_id: &str) -> Result<String, DriverError> {
        let messages = self.client.list_messages(thread_id).await?;
        messages
            .iter()
            .find(|message| message.role == "assistant")
            .and_then(|message| message.text())
            .map(str::to_string)
            .ok_or(DriverError::MissingReply)
    }

    /// Sleep between polls, waking early if cancellation is raised.
    async fn wait_or_cancel(
        &self,
        delay: Duration,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<(), DriverError> {
        tokio::select! {
            _ = sleep(delay) => Ok(()),
            changed = cancel.changed() => match changed {
                Ok(()) if *cancel.borrow() => Err(DriverError::Cancelled),
                // Sender gone or value reset; finish the wait normally.
                _ => {
                    sleep(delay).await;
                    Ok(())
                }
            },
        }
    }
}
