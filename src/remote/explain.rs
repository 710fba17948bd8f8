use std::time::Duration;

use color_eyre::{eyre::OptionExt, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Question, WrongAnswer};

/// Pause before the single automatic retry of a failed completion call.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Outcome of an explanation fetch. `Unavailable` is the terminal
/// degraded state after the retry is spent; callers show "explanation
/// unavailable" and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    Note(String),
    Unavailable,
}

/// What the model is asked about: the question as the user saw it, the
/// option they picked, and the one they should have picked.
#[derive(Debug, Clone)]
pub struct ExplanationRequest {
    pub question: String,
    pub options: Vec<String>,
    pub selected_index: usize,
    pub correct_index: usize,
}

impl ExplanationRequest {
    pub fn for_wrong_answer(wrong: &WrongAnswer) -> Self {
        Self {
            question: wrong.prompt.clone(),
            options: wrong.options.clone(),
            selected_index: wrong.selected_index,
            correct_index: wrong.correct_index,
        }
    }

    fn prompt(&self) -> String {
        let mut lines = vec![format!("Soru: {}", self.question)];
        for (index, option) in self.options.iter().enumerate() {
            lines.push(format!("{}) {}", Question::option_label(index), option));
        }
        lines.push(format!(
            "Kullanıcı {} seçeneğini işaretledi, doğru cevap {} seçeneği. \
             Doğru cevabın neden doğru olduğunu iki üç cümleyle açıkla.",
            Question::option_label(self.selected_index),
            Question::option_label(self.correct_index),
        ));
        lines.join("\n")
    }
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Client for the chat-completion endpoint that writes wrong-answer
/// explanations.
#[derive(Debug, Clone)]
pub struct ExplanationClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ExplanationClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Ask for a short explanation of why the correct option is correct.
    ///
    /// A failed call is retried once after a short delay; a second
    /// failure becomes `Unavailable`. Network trouble never escapes this
    /// method as an error.
    pub async fn explain(&self, request: &ExplanationRequest) -> Explanation {
        match self.complete(request).await {
            Ok(note) => return Explanation::Note(note),
            Err(e) => {
                tracing::warn!("explanation fetch failed, retrying once: {e}");
            }
        }

        tokio::time::sleep(RETRY_DELAY).await;

        match self.complete(request).await {
            Ok(note) => Explanation::Note(note),
            Err(e) => {
                tracing::warn!("explanation retry failed, giving up: {e}");
                Explanation::Unavailable
            }
        }
    }

    async fn complete(&self, request: &ExplanationRequest) -> Result<String> {
        let body = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt(),
            }],
        };

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            color_eyre::eyre::bail!("completion endpoint returned {}", resp.status());
        }

        let completion: CompletionResponse = resp.json().await?;
        let note = completion
            .choices
            .into_iter()
            .next()
            .ok_or_eyre("completion response had no choices")?
            .message
            .content;

        Ok(note.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_labels_options_and_both_answers() {
        let request = ExplanationRequest {
            question: "Aks nedir?".to_string(),
            options: vec![
                "Tekerlek".to_string(),
                "Mil".to_string(),
                "Fren".to_string(),
            ],
            selected_index: 0,
            correct_index: 1,
        };

        let prompt = request.prompt();
        assert!(prompt.contains("Soru: Aks nedir?"));
        assert!(prompt.contains("A) Tekerlek"));
        assert!(prompt.contains("B) Mil"));
        assert!(prompt.contains("C) Fren"));
        assert!(prompt.contains("A seçeneğini işaretledi"));
        assert!(prompt.contains("doğru cevap B seçeneği"));
    }
}
