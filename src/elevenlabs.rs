//! ElevenLabs text-to-speech. Audio comes back as an inline
//! `data:audio/mpeg;base64,...` URL; results are cached per (text, voice).

use std::{collections::HashMap, sync::Arc, time::Duration};

use base64::Engine;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Returned when no ElevenLabs key is configured or synthesis fails.
pub const MOCK_AUDIO_URL: &str = "https://example.com/audio-mock.mp3";

#[derive(Clone)]
pub struct ElevenLabs {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub voice_id: String,
  pub model_id: String,
  cache: Arc<RwLock<HashMap<String, String>>>,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
  text: &'a str,
  model_id: &'a str,
  voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
  stability: f32,
  similarity_boost: f32,
  style: f32,
  use_speaker_boost: bool,
}

impl ElevenLabs {
  /// Construct the client if we find ELEVENLABS_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("ELEVENLABS_API_KEY").ok()?;
    let base_url = std::env::var("ELEVENLABS_BASE_URL").unwrap_or_else(|_| "https://api.elevenlabs.io/v1".into());
    // "Rachel"
    let voice_id = std::env::var("ELEVENLABS_VOICE_ID").unwrap_or_else(|_| "21m00Tcm4TlvDq8ikWAM".into());
    let model_id = std::env::var("ELEVENLABS_MODEL_ID").unwrap_or_else(|_| "eleven_monolingual_v1".into());
    let client = reqwest::Client::builder().timeout(Duration::from_secs(30)).build().ok()?;
    Some(Self { client, api_key, base_url, voice_id, model_id, cache: Arc::default() })
  }

  /// Synthesize `text`, reusing a cached clip for the same text and voice.
  #[instrument(level = "info", skip(self, text), fields(text_len = text.len()))]
  pub async fn generate_speech(&self, text: &str, voice_id: Option<&str>) -> Result<String, String> {
    let voice = voice_id.unwrap_or(&self.voice_id);
    let key = cache_key(text, voice);
    if let Some(url) = self.cache.read().await.get(&key).cloned() {
      debug!(target: "ai", "TTS cache hit");
      return Ok(url);
    }

    let url = format!("{}/text-to-speech/{}", self.base_url, voice);
    let req = SpeechRequest {
      text,
      model_id: &self.model_id,
      voice_settings: VoiceSettings { stability: 0.5, similarity_boost: 0.75, style: 0.5, use_speaker_boost: true },
    };
    let res = self
      .client
      .post(&url)
      .header(USER_AGENT, "fluentusa-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(ACCEPT, "audio/mpeg")
      .header("xi-api-key", &self.api_key)
      .json(&req)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      return Err(format!("ElevenLabs HTTP {}: {}", status, crate::util::trunc_for_log(&body, 200)));
    }

    let bytes = res.bytes().await.map_err(|e| e.to_string())?;
    info!(target: "ai", bytes = bytes.len(), "TTS audio received");
    let data_url = audio_data_url(&bytes);
    self.cache.write().await.insert(key, data_url.clone());
    Ok(data_url)
  }
}

fn cache_key(text: &str, voice: &str) -> String {
  format!("{}-{}", text.to_lowercase(), voice)
}

pub fn audio_data_url(mp3: &[u8]) -> String {
  format!("data:audio/mpeg;base64,{}", base64::engine::general_purpose::STANDARD.encode(mp3))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cache_key_ignores_text_case() {
    assert_eq!(cache_key("Hello", "v1"), cache_key("hello", "v1"));
    assert_ne!(cache_key("hello", "v1"), cache_key("hello", "v2"));
  }

  #[test]
  fn data_url_is_base64_mpeg() {
    assert_eq!(audio_data_url(b"abc"), "data:audio/mpeg;base64,YWJj");
  }
}
