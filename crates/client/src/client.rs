//! reqwest-backed implementation of [`NotesApi`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use notebridge_core::{NewNote, Note, NoteFormat, NoteUpdate, NotesConfig, SearchResponse, SearchResult};

use crate::api::NotesApi;
use crate::error::{NotesError, TransportError};

/// Header carrying the credential on every request.
pub const API_KEY_HEADER: &str = "Api-Key";

/// HTTP client for the remote note service.
///
/// Holds only immutable configuration, so one instance can be shared across
/// any number of in-flight calls.
#[derive(Clone)]
pub struct NotesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NotesClient {
    pub fn new(config: &NotesConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Join path segments onto the base URL. Each segment is percent-encoded
    /// as a whole, so ids can never introduce extra path components.
    fn url(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| TransportError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Perform one request and decode the JSON response.
    async fn execute<T, F>(&self, method: Method, segments: &[&str], customize: F) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        debug!(method = %method, path = %path, "Remote request");

        let request = self
            .client
            .request(method.clone(), url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json");

        let result = Self::send(customize(request)).await;
        if let Err(ref e) = result {
            warn!(method = %method, path = %path, error = %e, "Remote request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl NotesApi for NotesClient {
    async fn get_note(&self, id: &str, format: NoteFormat) -> Result<Note, NotesError> {
        self.execute(Method::GET, &["notes", id], |r| {
            r.query(&[("format", format.as_str())])
        })
        .await
        .map_err(|e| NotesError::Fetch {
            id: id.to_string(),
            cause: e.to_string(),
        })
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, NotesError> {
        self.execute(Method::POST, &["notes"], |r| r.json(note))
            .await
            .map_err(|e| NotesError::Create {
                title: note.title.clone(),
                cause: e.to_string(),
            })
    }

    async fn update_note(&self, id: &str, update: &NoteUpdate) -> Result<Note, NotesError> {
        self.execute(Method::PUT, &["notes", id], |r| r.json(update))
            .await
            .map_err(|e| NotesError::Update {
                id: id.to_string(),
                cause: e.to_string(),
            })
    }

    async fn search_notes(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>, NotesError> {
        let params = [("q", query.to_string()), ("limit", limit.to_string())];
        let response: SearchResponse = self
            .execute(Method::GET, &["search-notes"], |r| r.query(&params))
            .await
            .map_err(|e| NotesError::Search {
                query: query.to_string(),
                cause: e.to_string(),
            })?;
        Ok(response.results)
    }

    async fn get_ask_info(&self) -> Result<Value, NotesError> {
        self.execute(Method::GET, &["ask"], |r| r)
            .await
            .map_err(|e| NotesError::AskInfo { cause: e.to_string() })
    }

    async fn get_ask_index(&self) -> Result<Value, NotesError> {
        self.execute(Method::GET, &["ask", "index"], |r| r)
            .await
            .map_err(|e| NotesError::AskIndex { cause: e.to_string() })
    }

    async fn get_automation_assistant(&self, assistant_id: &str) -> Result<Value, NotesError> {
        self.execute(Method::GET, &["super", "automation", assistant_id], |r| r)
            .await
            .map_err(|e| NotesError::AutomationAssistant {
                id: assistant_id.to_string(),
                cause: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, Method as HttpMethod, StatusCode, Uri};
    use axum::Router;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// One request as seen by the stand-in remote service.
    #[derive(Debug, Clone)]
    struct Recorded {
        method: String,
        path: String,
        query: Option<String>,
        api_key: Option<String>,
        accept: Option<String>,
        body: String,
    }

    type RequestLog = Arc<Mutex<Vec<Recorded>>>;

    /// Serve `reply` with `status` for every request on an ephemeral port.
    async fn spawn_remote(status: StatusCode, reply: Value) -> (NotesClient, RequestLog) {
        let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&log);

        let app = Router::new().fallback(
            move |method: HttpMethod, uri: Uri, headers: HeaderMap, body: String| {
                let captured = Arc::clone(&captured);
                let reply = reply.clone();
                async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    captured.lock().unwrap().push(Recorded {
                        method: method.to_string(),
                        path: uri.path().to_string(),
                        query: uri.query().map(str::to_string),
                        api_key: header("api-key"),
                        accept: header("accept"),
                        body,
                    });
                    (status, axum::Json(reply))
                }
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = NotesConfig::new("test-key", format!("http://{addr}/api")).unwrap();
        (NotesClient::new(&config), log)
    }

    fn single(log: &RequestLog) -> Recorded {
        let requests = log.lock().unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one remote call");
        requests[0].clone()
    }

    fn note_json() -> Value {
        json!({"id": "abc123", "title": "Hello", "markdown": "Hello body"})
    }

    #[tokio::test]
    async fn test_get_note_sends_format_and_headers() {
        let (client, log) = spawn_remote(StatusCode::OK, note_json()).await;

        let note = client.get_note("abc123", NoteFormat::Html).await.unwrap();
        assert_eq!(note.id, "abc123");

        let req = single(&log);
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/api/notes/abc123");
        assert_eq!(req.query.as_deref(), Some("format=html"));
        assert_eq!(req.api_key.as_deref(), Some("test-key"));
        assert_eq!(req.accept.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_note_id_is_a_single_path_segment() {
        let (client, log) = spawn_remote(StatusCode::OK, note_json()).await;

        client.get_note("a/b c", NoteFormat::Markdown).await.unwrap();

        assert_eq!(single(&log).path, "/api/notes/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_create_note_omits_absent_optionals() {
        let (client, log) = spawn_remote(StatusCode::OK, note_json()).await;

        client.create_note(&NewNote::new("T", "M")).await.unwrap();

        let req = single(&log);
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/api/notes");
        let body: Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body, json!({"title": "T", "markdown": "M"}));
    }

    #[tokio::test]
    async fn test_update_note_sends_partial_body() {
        let (client, log) = spawn_remote(StatusCode::OK, note_json()).await;

        let update = NoteUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        client.update_note("abc123", &update).await.unwrap();

        let req = single(&log);
        assert_eq!(req.method, "PUT");
        assert_eq!(req.path, "/api/notes/abc123");
        let body: Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body, json!({"title": "Renamed"}));
    }

    #[tokio::test]
    async fn test_search_passes_query_and_limit_and_keeps_order() {
        let (client, log) = spawn_remote(
            StatusCode::OK,
            json!({"results": [
                {"id": "2", "title": "Second", "type": "note"},
                {"id": "1", "title": "First", "snippet": "x", "type": "note"}
            ]}),
        )
        .await;

        let results = client.search_notes("milk & eggs", 10).await.unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);

        let req = single(&log);
        assert_eq!(req.path, "/api/search-notes");
        assert_eq!(req.query.as_deref(), Some("q=milk+%26+eggs&limit=10"));
    }

    #[tokio::test]
    async fn test_search_without_results_field_is_empty() {
        let (client, _log) = spawn_remote(StatusCode::OK, json!({})).await;
        let results = client.search_notes("nothing", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error_carries_query_and_status() {
        let (client, _log) =
            spawn_remote(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;

        let err = client.search_notes("groceries", 10).await.unwrap_err();
        assert!(matches!(err, NotesError::Search { .. }));
        let msg = err.to_string();
        assert!(msg.contains("groceries"));
        assert!(msg.contains("HTTP 500"));
        assert!(msg.contains("boom"));
    }

    #[tokio::test]
    async fn test_malformed_note_is_a_fetch_error() {
        let (client, _log) = spawn_remote(StatusCode::OK, json!({"unexpected": true})).await;

        let err = client.get_note("abc123", NoteFormat::Markdown).await.unwrap_err();
        match err {
            NotesError::Fetch { id, cause } => {
                assert_eq!(id, "abc123");
                assert!(cause.contains("invalid response body"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_informational_endpoints_pass_payload_through() {
        let payload = json!({"anything": [1, 2, {"nested": null}]});
        let (client, log) = spawn_remote(StatusCode::OK, payload.clone()).await;

        assert_eq!(client.get_ask_info().await.unwrap(), payload);
        assert_eq!(client.get_ask_index().await.unwrap(), payload);
        assert_eq!(client.get_automation_assistant("asst-9").await.unwrap(), payload);

        let paths: Vec<_> = log.lock().unwrap().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec!["/api/ask", "/api/ask/index", "/api/super/automation/asst-9"]);
    }

    #[tokio::test]
    async fn test_unreachable_remote_is_an_operation_error() {
        // Port 1 on loopback refuses connections.
        let config = NotesConfig::new("k", "http://127.0.0.1:1").unwrap();
        let client = NotesClient::new(&config);

        let err = client.get_automation_assistant("asst-1").await.unwrap_err();
        assert!(matches!(err, NotesError::AutomationAssistant { ref id, .. } if id == "asst-1"));
        assert!(err.to_string().contains("request failed"));
    }
}
