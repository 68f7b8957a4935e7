//! Two-line article summaries.
//!
//! The article body is cut to [`MAX_CONTENT_CHARS`], wrapped in a fixed
//! prompt that asks for exactly two `ㆍ`-prefixed lines, and sent to the
//! model. Failures never propagate: the caller always gets a [`Summary`],
//! and [`SUMMARY_FAILED`] is the text recorded when the call could not
//! complete.

use crate::api::AskAsync;
use crate::utils::{char_len, take_chars, truncate_for_log};
use std::borrow::Cow;
use tracing::{info, instrument, warn};

/// Longest body (in characters) embedded in a prompt.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Appended to a body that was cut short.
pub const TRUNCATION_MARKER: &str = "...";

/// Placeholder summary written when the model call fails.
pub const SUMMARY_FAILED: &str = "요약 실패";

const INSTRUCTION: &str = "다음 기사를 2줄로 요약해주세요.

형식: 각 줄은 \"ㆍ\"로 시작하는 불릿 포인트 형태
예시:
ㆍ중대재해법 시행과 정부 특별감독 영향으로 협력업체 선정 기준에서 '안전 역량' 비중 강화
ㆍ포스코이앤씨는 상생기금·안전관리비 지원, 현대건설은 협력사 안전평가 배점 확대 등 안전 경쟁";

/// Cap `content` at [`MAX_CONTENT_CHARS`] characters, marking the cut.
pub fn truncate_content(content: &str) -> Cow<'_, str> {
    let head = take_chars(content, MAX_CONTENT_CHARS);
    if head.len() == content.len() {
        Cow::Borrowed(content)
    } else {
        Cow::Owned(format!("{head}{TRUNCATION_MARKER}"))
    }
}

/// The full prompt for one article.
pub fn build_prompt(title: &str, content: &str) -> String {
    format!(
        "{INSTRUCTION}\n\n제목: {title}\n\n본문:\n{}\n\n요약:",
        truncate_content(content)
    )
}

/// Outcome of one summarization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Trimmed model output.
    Completed(String),
    /// The model call failed.
    Failed,
}

impl Summary {
    /// Text for the output table; [`SUMMARY_FAILED`] for a failed call.
    pub fn into_text(self) -> String {
        match self {
            Self::Completed(text) => text,
            Self::Failed => SUMMARY_FAILED.to_string(),
        }
    }
}

/// Produces summaries through any [`AskAsync`] backend.
#[derive(Debug)]
pub struct Summarizer<A> {
    model: A,
}

impl<A: AskAsync> Summarizer<A> {
    pub fn new(model: A) -> Self {
        Self { model }
    }

    /// Summarize one article.
    ///
    /// Any model fault yields [`Summary::Failed`].
    #[instrument(level = "info", skip_all, fields(content_chars = char_len(content)))]
    pub async fn summarize(&self, title: &str, content: &str) -> Summary {
        let prompt = build_prompt(title, content);
        match self.model.ask(&prompt).await {
            Ok(summary) => {
                let summary = summary.trim().to_string();
                info!(summary = %truncate_for_log(&summary, 50), "Summary complete");
                Summary::Completed(summary)
            }
            Err(e) => {
                warn!(error = %e, "Summarization failed");
                Summary::Failed
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::error::Error;
    use std::sync::Mutex;

    /// Records every prompt and answers with a fixed reply.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedModel {
        pub reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::default(),
            }
        }

        pub fn failing() -> Self {
            Self::default()
        }
    }

    impl AskAsync for ScriptedModel {
        async fn ask(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .ok_or_else(|| "simulated authentication failure".into())
        }
    }

    #[test]
    fn test_truncate_content_short_is_borrowed() {
        let content = "짧은 본문";
        assert!(matches!(truncate_content(content), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_content_long_is_cut_by_characters() {
        let content = "가".repeat(MAX_CONTENT_CHARS + 10);
        let truncated = truncate_content(&content);
        assert_eq!(char_len(&truncated), MAX_CONTENT_CHARS + TRUNCATION_MARKER.len());
        assert!(truncated.ends_with("가..."));

        let exact = "a".repeat(MAX_CONTENT_CHARS);
        assert_eq!(truncate_content(&exact), exact.as_str());
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("Transit budget approved", "Body text here.");
        assert!(prompt.starts_with("다음 기사를 2줄로 요약해주세요."));
        assert!(prompt.contains("\"ㆍ\"로 시작하는"));
        assert!(prompt.contains("\n\n제목: Transit budget approved\n\n본문:\nBody text here.\n\n요약:"));
        assert!(prompt.ends_with("요약:"));
    }

    #[tokio::test]
    async fn test_summarize_trims_model_output() {
        let summarizer = Summarizer::new(ScriptedModel::replying("\n ㆍ하나\nㆍ둘 \n"));
        let summary = summarizer.summarize("Transit budget approved", "Body").await;
        assert_eq!(summary, Summary::Completed("ㆍ하나\nㆍ둘".to_string()));
    }

    #[tokio::test]
    async fn test_summarize_embeds_truncated_content() {
        let model = ScriptedModel::replying("ㆍ하나\nㆍ둘");
        let summarizer = Summarizer::new(model);
        let content = "x".repeat(MAX_CONTENT_CHARS * 2);
        summarizer.summarize("Long article", &content).await;

        let prompts = summarizer.model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(&format!("{}...\n\n요약:", "x".repeat(MAX_CONTENT_CHARS))));
        assert!(!prompts[0].contains(&"x".repeat(MAX_CONTENT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_summarize_degrades_to_marker_on_failure() {
        let summarizer = Summarizer::new(ScriptedModel::failing());
        let summary = summarizer.summarize("Transit budget approved", "Body").await;
        assert_eq!(summary, Summary::Failed);
        assert_eq!(summary.into_text(), SUMMARY_FAILED);
    }

    #[tokio::test]
    async fn test_model_reply_matching_placeholder_is_not_a_failure() {
        let summarizer = Summarizer::new(ScriptedModel::replying(SUMMARY_FAILED));
        let summary = summarizer.summarize("Transit budget approved", "Body").await;
        assert_eq!(summary, Summary::Completed(SUMMARY_FAILED.to_string()));
    }
}
