use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::credentials::TokenFetcher;

/// GitHub Models inference endpoint used for summarization.
pub const AI_ENDPOINT: &str = "https://models.inference.ai.azure.com/chat/completions";

const SYSTEM_PROMPT: &str = "You are an expert engineering manager assistant designed to \
summarize the bodies of GitHub issues and pull requests. Your goal is to extract key \
details, provide concise summaries, and ignore irrelevant sections or headers such as \
'Mitigation and Rollback Strategies', 'Testing', 'Deployment Plan', and 'Approval \
Responsibility'. Ensure the summaries are actionable and easy to understand. Your \
responses should be in Markdown format without wrapping Markdown in a code fence and \
geared for a technical audience with an emphasis on readability.

Format entries as follows:
## <descriptive title>
<summary of the entry>
### Links
- [Link to Artifact 1](<URL>)
- [Link to Artifact 2](<URL>)

<br /><br />

For each distinct entry, provide a summary that captures the essence of the content, \
while ensuring that any links to artifacts are included. Do not include any headers or \
irrelevant sections in your summaries.";

const USER_PROMPT: &str = "Summarize the following text while ignoring sections with \
headers like (e.g., 'Mitigation and Rollback Strategies', 'Testing', 'Deployment Plan', \
'Approval Responsibility'), include links to all artifacts:";

/// Text-in/text-out summarization backend, injected so the summarize command
/// can be tested without network access.
pub trait Summarizer {
    fn summarize(&self, text: &str) -> impl std::future::Future<Output = Result<String>>;
}

/// Summarizer backed by the Azure-hosted GitHub Models chat endpoint,
/// authenticated with the user's gh token.
pub struct AzureAiSummarizer<T: TokenFetcher> {
    http: reqwest::Client,
    tokens: T,
    endpoint: String,
    model: String,
}

impl<T: TokenFetcher> AzureAiSummarizer<T> {
    pub fn new(http: reqwest::Client, tokens: T, model: String) -> Self {
        Self {
            http,
            tokens,
            endpoint: AI_ENDPOINT.to_string(),
            model,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl<T: TokenFetcher> Summarizer for AzureAiSummarizer<T> {
    async fn summarize(&self, text: &str) -> Result<String> {
        let payload = serde_json::json!({
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("{USER_PROMPT} {text}") },
            ],
            "temperature": 1.0,
            "top_p": 1.0,
            "max_tokens": 1000,
            "model": self.model,
        });

        let token = self
            .tokens
            .fetch_token()
            .context("error retrieving GitHub token")?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .context("error sending summarization request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("AI API request failed with status {status}: {body}");
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("error parsing AI response JSON")?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| anyhow!("no summary content available in the AI response"))
    }
}

/// Split raw input into entries on the entry delimiter, dropping blanks.
pub fn split_entries(input: &str) -> Vec<&str> {
    input
        .split(crate::output::ENTRY_DELIMITER)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
