//! Application state: record store, static catalogs, prompts, and optional AI clients.
//!
//! This module owns:
//!   - the in-memory record store
//!   - the placement question bank (built-in or from TOML)
//!   - the badge and module catalogs
//!   - the prompts struct (from TOML or defaults)
//!   - optional OpenAI (chat + transcription) and ElevenLabs (speech) clients

use tracing::{error, info, instrument};

use crate::badges::BadgeCatalog;
use crate::config::{load_app_config_from_env, AppConfig, Prompts};
use crate::elevenlabs::ElevenLabs;
use crate::error::Result;
use crate::modules::ModuleCatalog;
use crate::openai::OpenAI;
use crate::placement::QuestionBank;
use crate::seeds::seed_questions;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub questions: QuestionBank,
    pub badges: BadgeCatalog,
    pub modules: ModuleCatalog,
    pub openai: Option<OpenAI>,
    pub tts: Option<ElevenLabs>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, validate catalogs, init AI clients.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Result<Self> {
        let cfg = load_app_config_from_env();

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "fluentusa", base_url = %oa.base_url, chat_model = %oa.chat_model, transcribe_model = %oa.transcribe_model, "OpenAI enabled.");
        } else {
            info!(target: "fluentusa", "OpenAI disabled (no OPENAI_API_KEY). Using stub tutor replies.");
        }

        let tts = ElevenLabs::from_env();
        if let Some(el) = &tts {
            info!(target: "fluentusa", voice_id = %el.voice_id, model_id = %el.model_id, "ElevenLabs enabled.");
        } else {
            info!(target: "fluentusa", "ElevenLabs disabled (no ELEVENLABS_API_KEY). Serving mock audio URLs.");
        }

        Self::from_parts(cfg, openai, tts)
    }

    /// Assemble state from already-loaded pieces. The badge catalog is
    /// validated here; an invalid TOML question bank falls back to the seeds.
    pub fn from_parts(cfg: Option<AppConfig>, openai: Option<OpenAI>, tts: Option<ElevenLabs>) -> Result<Self> {
        let cfg = cfg.unwrap_or_default();

        let questions = if cfg.questions.is_empty() {
            QuestionBank::new(seed_questions())?
        } else {
            match QuestionBank::new(cfg.questions) {
                Ok(bank) => {
                    info!(target: "fluentusa", questions = bank.len(), "Using question bank from config");
                    bank
                }
                Err(e) => {
                    error!(target: "fluentusa", error = %e, "Configured question bank is invalid; using built-in bank");
                    QuestionBank::new(seed_questions())?
                }
            }
        };

        let badges = BadgeCatalog::builtin()?;
        let modules = ModuleCatalog::builtin();
        info!(
            target: "progress",
            questions = questions.len(),
            badges = badges.len(),
            modules = modules.all().len(),
            "Startup content inventory"
        );

        Ok(Self {
            store: Store::new(),
            questions,
            badges,
            modules,
            openai,
            tts,
            prompts: cfg.prompts,
        })
    }

    /// Offline state with built-in content and no AI clients.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_parts(None, None, None).expect("built-in content is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_app_config;

    #[test]
    fn invalid_configured_bank_falls_back_to_seeds() {
        let cfg = parse_app_config(
            r#"
[[questions]]
id = "x1"
prompt = "Pick"
type = "multiple_choice"
options = ["a", "b"]
correct_answer = "c"
cefr_level = "A1"
"#,
        )
        .unwrap();
        let state = AppState::from_parts(Some(cfg), None, None).unwrap();
        assert_eq!(state.questions.len(), 30);
    }

    #[test]
    fn valid_configured_bank_replaces_seeds() {
        let cfg = parse_app_config(
            r#"
[[questions]]
id = "x1"
prompt = "Complete: 'I ___ happy.'"
type = "fill_blank"
correct_answer = "am"
cefr_level = "A1"
"#,
        )
        .unwrap();
        let state = AppState::from_parts(Some(cfg), None, None).unwrap();
        assert_eq!(state.questions.len(), 1);
        assert!(state.questions.get("x1").is_some());
    }
}
