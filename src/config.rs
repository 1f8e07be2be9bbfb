//! Loading app configuration (tutor prompts + optional placement bank) from TOML.
//!
//! See `AppConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Question;
use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  /// Replaces the built-in placement bank when non-empty.
  #[serde(default)]
  pub questions: Vec<Question>,
}

/// Prompts used by the chat tutor. Defaults target Brazilian Portuguese
/// speakers learning American English.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub lesson_start_system: String,
  pub lesson_start_user: String,
  pub tutor_system: String,
  pub fallback_greeting: String,
  pub fallback_reply: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      lesson_start_system: "You are a friendly American English teacher. Start a conversation for module '{module}', lesson '{lesson}' (learner level {level}). Be warm, encouraging, and use simple language. Keep it short (2-3 sentences).".into(),
      lesson_start_user: "Start the lesson".into(),
      tutor_system: "You are a friendly American English teacher helping a Brazilian Portuguese speaker learn English. Correct pronunciation and grammar gently, explain differences between Portuguese and English, use humor and encouragement. Keep responses short and conversational (2-4 sentences).".into(),
      fallback_greeting: "Hi! Let's start today's lesson!".into(),
      fallback_reply: "Great! Let's continue.".into(),
    }
  }
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_app_config(&s) {
      Ok(cfg) => {
        info!(target: "fluentusa", %path, questions = cfg.questions.len(), "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "fluentusa", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "fluentusa", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_app_config(s: &str) -> Result<AppConfig> {
  toml::from_str::<AppConfig>(s).map_err(|e| Error::Config(e.to_string()))
}
