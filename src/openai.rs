//! Minimal OpenAI client for the tutor: chat.completions and audio transcription.
//!
//! Calls are instrumented and log model names, latencies and token usage (not contents).
//! NOTE: We never log the API key.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const UA: &str = "fluentusa-backend/0.1";

/// One turn of a conversation, in OpenAI's role/content shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
  pub role: ChatRole,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self { role: ChatRole::System, content: content.into() }
  }
  pub fn user(content: impl Into<String>) -> Self {
    Self { role: ChatRole::User, content: content.into() }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
  System,
  User,
  Assistant,
}

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub chat_model: String,
  pub transcribe_model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let chat_model = std::env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let transcribe_model = std::env::var("OPENAI_TRANSCRIBE_MODEL").unwrap_or_else(|_| "whisper-1".into());

    let client = reqwest::Client::builder().timeout(Duration::from_secs(30)).build().ok()?;

    Some(Self { client, api_key, base_url, chat_model, transcribe_model })
  }

  /// Plain-text chat completion over a full message list.
  #[instrument(level = "info", skip(self, messages), fields(model = %self.chat_model, turns = messages.len()))]
  pub async fn chat_complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest { model: &self.chat_model, messages, temperature };

    let start = Instant::now();
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, UA)
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or(body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(target: "ai", elapsed = ?start.elapsed(), prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body
      .choices
      .first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default()
      .trim()
      .to_string();
    if text.is_empty() {
      return Err("OpenAI returned an empty completion".into());
    }
    Ok(text)
  }

  /// Speech-to-text for one recorded clip (English).
  #[instrument(level = "info", skip(self, audio), fields(model = %self.transcribe_model, bytes = audio.len()))]
  pub async fn transcribe(&self, audio: Vec<u8>, mime: &str) -> Result<String, String> {
    let url = format!("{}/audio/transcriptions", self.base_url);
    let part = reqwest::multipart::Part::bytes(audio)
      .file_name(format!("audio.{}", extension_for(mime)))
      .mime_str(mime)
      .map_err(|e| e.to_string())?;
    let form = reqwest::multipart::Form::new()
      .part("file", part)
      .text("model", self.transcribe_model.clone())
      .text("language", "en");

    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, UA)
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .multipart(form)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or(body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    #[derive(Deserialize)]
    struct Transcription {
      #[serde(default)]
      text: String,
    }
    let t: Transcription = res.json().await.map_err(|e| e.to_string())?;
    Ok(t.text.trim().to_string())
  }
}

fn extension_for(mime: &str) -> &'static str {
  match mime.split(';').next().unwrap_or_default().trim() {
    "audio/webm" => "webm",
    "audio/wav" | "audio/x-wav" => "wav",
    "audio/ogg" => "ogg",
    "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
    _ => "mp3",
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
  model: &'a str,
  messages: &'a [ChatMessage],
  temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)]
  usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice {
  message: ChatMessageResp,
}
#[derive(Deserialize)]
struct ChatMessageResp {
  content: Option<String>,
}
#[derive(Deserialize)]
struct Usage {
  #[serde(default)]
  prompt_tokens: Option<u32>,
  #[serde(default)]
  completion_tokens: Option<u32>,
  #[serde(default)]
  total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
