//! Conversation-thread persistence.
//!
//! The thread id is the only state this program keeps on disk: a plain text
//! value in a well-known file. On startup the id is read and validated
//! against the service if the file exists, otherwise a fresh thread is
//! created and written back.

use crate::error::AppResult;
use assistants_client::{AssistantsClient, AssistantsError};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Resolve the conversation thread for this session.
pub async fn resolve_thread(client: &AssistantsClient, path: &Path) -> AppResult<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let id = contents.trim();
            if !id.is_empty() {
                match client.retrieve_thread(id).await {
                    Ok(thread) => {
                        info!(thread_id = %thread.id, "Resuming persisted conversation thread");
                        return Ok(thread.id);
                    }
                    Err(AssistantsError::NotFound(_)) => {
                        warn!(thread_id = %id, "Persisted thread no longer exists; creating a new one");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let thread = client.create_thread().await?;
    tokio::fs::write(path, &thread.id).await?;
    info!(thread_id = %thread.id, "Created conversation thread");
    Ok(thread.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> AssistantsClient {
        AssistantsClient::new("test-api-key", server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shopbot-session-{}-{}.txt", std::process::id(), name))
    }

    fn thread_json(id: &str) -> serde_json::Value {
        serde_json::json!({ "id": id, "object": "thread", "created_at": 1700000000 })
    }

    #[tokio::test]
    async fn test_creates_and_persists_thread_when_file_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thread_new")))
            .expect(1)
            .mount(&server)
            .await;

        let file = scratch_file("fresh");
        let _ = std::fs::remove_file(&file);

        let id = resolve_thread(&test_client(&server), &file).await.unwrap();

        assert_eq!(id, "thread_new");
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "thread_new");
        let _ = std::fs::remove_file(&file);
    }

    #[tokio::test]
    async fn test_reuses_persisted_thread() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/threads/thread_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thread_abc")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(url_path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thread_other")))
            .expect(0)
            .mount(&server)
            .await;

        let file = scratch_file("reuse");
        std::fs::write(&file, "thread_abc\n").unwrap();

        let id = resolve_thread(&test_client(&server), &file).await.unwrap();

        assert_eq!(id, "thread_abc");
        let _ = std::fs::remove_file(&file);
    }

    #[tokio::test]
    async fn test_replaces_stale_thread_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/threads/thread_gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such thread"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(url_path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thread_new")))
            .expect(1)
            .mount(&server)
            .await;

        let file = scratch_file("stale");
        std::fs::write(&file, "thread_gone").unwrap();

        let id = resolve_thread(&test_client(&server), &file).await.unwrap();

        assert_eq!(id, "thread_new");
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "thread_new");
        let _ = std::fs::remove_file(&file);
    }
}
