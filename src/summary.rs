use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::ChapterId;
use crate::error::SummaryError;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Shown when generation fails for any reason.
pub const FALLBACK_TEXT: &str = "تعذر جلب المعلومات، يرجى التحقق من اتصالك بالإنترنت.";

/// Shown when generation succeeds with no text.
pub const EMPTY_TEXT: &str = "لم يتم العثور على معلومات حالياً.";

/// Prompt asking for at most three lines on a chapter's virtue and core aims.
pub fn prompt_for(chapter_name: &str) -> String {
    format!(
        "أعطني نبذة مختصرة جداً (3 أسطر كحد أقصى) عن فضل سورة {chapter_name} ومقاصدها الأساسية."
    )
}

/// External text-generation collaborator.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn generate_summary(&self, prompt: &str) -> Result<String, SummaryError>;
}

/// Generate a summary for `chapter_name`, folding every failure into display text.
pub async fn fetch_summary(provider: &dyn SummaryProvider, chapter_name: &str) -> String {
    match provider.generate_summary(&prompt_for(chapter_name)).await {
        Ok(text) if text.trim().is_empty() => EMPTY_TEXT.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(SummaryError::MissingApiKey) => {
            log::info!("No Gemini API key, skipping summary for {chapter_name}");
            FALLBACK_TEXT.to_string()
        }
        Err(e) => {
            log::error!("Gemini error: {e}");
            FALLBACK_TEXT.to_string()
        }
    }
}

/// Gemini request types
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Gemini response types
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(endpoint: &str, model: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl SummaryProvider for GeminiClient {
    async fn generate_summary(&self, prompt: &str) -> Result<String, SummaryError> {
        if self.api_key.is_empty() {
            return Err(SummaryError::MissingApiKey);
        }

        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.4,
                max_output_tokens: 512,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let resp = self.http.post(self.url()).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SummaryError::Api { status, body });
        }

        let gemini_resp: GeminiResponse = resp.json().await?;

        let text = gemini_resp
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text.trim().to_string())
    }
}

/// Summary panel state for one chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub chapter: ChapterId,
    pub text: Option<String>,
    pub loading: bool,
}

/// Handle for one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTicket {
    pub chapter: ChapterId,
    token: u64,
}

/// Tracks the single visible summary request and drops late results.
#[derive(Debug, Default)]
pub struct SummaryTracker {
    visible: Option<SummaryView>,
    token: u64,
}

impl SummaryTracker {
    /// Make `chapter` the visible request in the loading state.
    pub fn begin(&mut self, chapter: ChapterId) -> SummaryTicket {
        self.token += 1;
        self.visible = Some(SummaryView {
            chapter,
            text: None,
            loading: true,
        });
        SummaryTicket {
            chapter,
            token: self.token,
        }
    }

    /// Apply a finished result. Returns `false` if a newer request superseded it.
    pub fn complete(&mut self, ticket: SummaryTicket, text: String) -> bool {
        if ticket.token != self.token {
            log::debug!("Dropping stale summary for chapter {}", ticket.chapter);
            return false;
        }
        self.visible = Some(SummaryView {
            chapter: ticket.chapter,
            text: Some(text),
            loading: false,
        });
        true
    }

    pub fn visible(&self) -> Option<&SummaryView> {
        self.visible.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Failing;

    #[async_trait]
    impl SummaryProvider for Failing {
        async fn generate_summary(&self, _prompt: &str) -> Result<String, SummaryError> {
            Err(SummaryError::Api {
                status: 429,
                body: "quota".into(),
            })
        }
    }

    struct Echo(&'static str);

    #[async_trait]
    impl SummaryProvider for Echo {
        async fn generate_summary(&self, _prompt: &str) -> Result<String, SummaryError> {
            Ok(self.0.to_string())
        }
    }

    fn id(raw: u16) -> ChapterId {
        ChapterId::new(raw).unwrap()
    }

    #[test]
    fn prompt_names_the_chapter() {
        let prompt = prompt_for("الكهف");
        assert!(prompt.contains("سورة الكهف"));
        assert!(prompt.contains("3 أسطر"));
    }

    #[tokio::test]
    async fn failure_becomes_fallback_text() {
        assert_eq!(fetch_summary(&Failing, "الفاتحة").await, FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn missing_key_becomes_fallback_text() {
        let client = GeminiClient::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, "");
        assert_eq!(fetch_summary(&client, "الفاتحة").await, FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn empty_text_becomes_placeholder() {
        assert_eq!(fetch_summary(&Echo("  \n"), "الفاتحة").await, EMPTY_TEXT);
        assert_eq!(fetch_summary(&Echo(" نص "), "الفاتحة").await, "نص");
    }

    #[tokio::test]
    async fn gemini_client_posts_prompt_and_joins_parts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt_for("الفاتحة") }] }],
                "generation_config": { "thinking_config": { "thinking_budget": 0 } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "أم الكتاب، " }, { "text": "تقرأ في كل صلاة." }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&server.uri(), DEFAULT_MODEL, "test-key");
        let text = client
            .generate_summary(&prompt_for("الفاتحة"))
            .await
            .unwrap();
        assert_eq!(text, "أم الكتاب، تقرأ في كل صلاة.");
    }

    #[tokio::test]
    async fn gemini_client_reports_api_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key invalid"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&server.uri(), DEFAULT_MODEL, "bad-key");
        match client.generate_summary("x").await {
            Err(SummaryError::Api { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key invalid");
            }
            other => panic!("expected API error, got {other:?}"),
        }
        assert_eq!(fetch_summary(&client, "الفاتحة").await, FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn gemini_client_tolerates_missing_candidates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&server.uri(), DEFAULT_MODEL, "k");
        assert_eq!(fetch_summary(&client, "الفاتحة").await, EMPTY_TEXT);
    }

    #[test]
    fn tracker_shows_loading_then_text() {
        let mut tracker = SummaryTracker::default();
        let ticket = tracker.begin(id(1));
        assert_eq!(
            tracker.visible(),
            Some(&SummaryView {
                chapter: id(1),
                text: None,
                loading: true
            })
        );

        assert!(tracker.complete(ticket, "نبذة".into()));
        let view = tracker.visible().unwrap();
        assert!(!view.loading);
        assert_eq!(view.text.as_deref(), Some("نبذة"));
    }

    #[test]
    fn late_result_for_replaced_request_is_dropped() {
        let mut tracker = SummaryTracker::default();
        let first = tracker.begin(id(1));
        let second = tracker.begin(id(2));

        assert!(!tracker.complete(first, "old".into()));
        assert_eq!(tracker.visible().unwrap().chapter, id(2));
        assert!(tracker.visible().unwrap().loading);

        assert!(tracker.complete(second, "new".into()));
        assert_eq!(tracker.visible().unwrap().text.as_deref(), Some("new"));
    }

    #[test]
    fn repeated_request_for_same_chapter_reissues() {
        let mut tracker = SummaryTracker::default();
        let first = tracker.begin(id(3));
        let second = tracker.begin(id(3));
        assert_ne!(first, second);
        assert!(!tracker.complete(first, "old".into()));
        assert!(tracker.complete(second, "new".into()));
    }
}
