//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  response::IntoResponse,
  Json,
};
use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, instrument};

use crate::domain::{CefrLevel, ModuleProgress, OnboardingResult, PronunciationAttempt, ScheduleSettings, UserProfile};
use crate::error::{Error, Result};
use crate::logic;
use crate::modules::{LearningModule, Lesson};
use crate::phrases::{self, DailyPhrase, PhraseCategory};
use crate::tasks::{self, CompletedTaskOut, OffDayTask};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(State(state): State<Arc<AppState>>) -> Json<Vec<QuestionOut>> {
  Json(state.questions.iter().map(to_out).collect())
}

#[instrument(level = "info", skip(state, body), fields(answered = body.answers.len()))]
pub async fn http_post_onboarding(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
  Json(body): Json<OnboardingIn>,
) -> Result<Json<OnboardingOut>> {
  let out = logic::submit_onboarding(&state, &user, body.answers).await?;
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_onboarding(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
) -> Result<Json<OnboardingResult>> {
  Ok(Json(logic::onboarding_result(&state, &user).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_profile(State(state): State<Arc<AppState>>, Path(user): Path<String>) -> Result<Json<UserProfile>> {
  Ok(Json(logic::profile(&state, &user).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_stats(State(state): State<Arc<AppState>>, Path(user): Path<String>) -> Json<StatsOut> {
  Json(logic::stats(&state, &user, Utc::now().date_naive()).await)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_patch_voice(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
  Json(body): Json<VoiceSettingsIn>,
) -> Result<Json<UserProfile>> {
  Ok(Json(logic::update_voice_settings(&state, &user, body).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_modules(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ModulesQuery>,
) -> Result<Json<Vec<LearningModule>>> {
  let modules = match q.level.as_deref() {
    Some(level) => state.modules.by_level(level.parse::<CefrLevel>()?),
    None => state.modules.all().to_vec(),
  };
  Ok(Json(modules))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_lesson(
  State(state): State<Arc<AppState>>,
  Path((module, lesson)): Path<(u32, u32)>,
) -> Result<Json<Lesson>> {
  let found = state
    .modules
    .get(module)
    .ok_or_else(|| Error::NotFound(format!("module {}", module)))?
    .lesson(lesson)
    .ok_or_else(|| Error::NotFound(format!("lesson {} in module {}", lesson, module)))?;
  Ok(Json(found.clone()))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_module_progress(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
) -> Json<Vec<ModuleProgress>> {
  Json(logic::module_progress(&state, &user).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_start_module(
  State(state): State<Arc<AppState>>,
  Path((user, module)): Path<(String, u32)>,
) -> Result<Json<ModuleProgress>> {
  Ok(Json(logic::start_module(&state, &user, module).await?))
}

#[instrument(level = "info", skip(state, body), fields(lesson = body.lesson_number, points = body.points_earned))]
pub async fn http_post_complete_lesson(
  State(state): State<Arc<AppState>>,
  Path((user, module)): Path<(String, u32)>,
  Json(body): Json<CompleteLessonIn>,
) -> Result<Json<ModuleProgress>> {
  Ok(Json(logic::complete_lesson(&state, &user, module, body, Utc::now()).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_badges(State(state): State<Arc<AppState>>) -> Json<Vec<BadgeOut>> {
  Json(logic::badge_catalog(&state))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_user_badges(State(state): State<Arc<AppState>>, Path(user): Path<String>) -> Json<UserBadgesOut> {
  Json(logic::user_badges(&state, &user, Utc::now().date_naive()).await)
}

#[instrument(level = "info", skip(state, body), fields(score = body.score))]
pub async fn http_post_attempt(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
  Json(body): Json<AttemptIn>,
) -> Result<Json<AttemptOut>> {
  let mut rng = StdRng::from_entropy();
  let out = logic::record_attempt(&state, &user, &body.word, body.score, Utc::now(), &mut rng).await?;
  info!(target: "progress", %user, new_badges = out.new_badges.len(), points = out.points_awarded, "HTTP attempt recorded");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_attempts(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
  Query(q): Query<AttemptHistoryQuery>,
) -> Json<Vec<PronunciationAttempt>> {
  Json(logic::attempt_history(&state, &user, q.word.as_deref()).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_schedule(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
) -> Result<Json<ScheduleSettings>> {
  Ok(Json(logic::schedule(&state, &user).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_patch_schedule(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
  Json(body): Json<ScheduleIn>,
) -> Json<ScheduleSettings> {
  Json(logic::update_schedule(&state, &user, body).await)
}

#[instrument(level = "info")]
pub async fn http_get_tasks() -> Json<&'static [OffDayTask]> {
  Json(&tasks::TASKS[..])
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_completed_tasks(
  State(state): State<Arc<AppState>>,
  Path(user): Path<String>,
) -> Json<Vec<CompletedTaskOut>> {
  Json(logic::completed_tasks(&state, &user).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_complete_task(
  State(state): State<Arc<AppState>>,
  Path((user, task)): Path<(String, u32)>,
) -> Result<Json<CompletedTaskOut>> {
  Ok(Json(logic::complete_task(&state, &user, task, Utc::now()).await?))
}

#[instrument(level = "info")]
pub async fn http_get_daily_phrase(Query(q): Query<DailyPhraseQuery>) -> Json<&'static DailyPhrase> {
  Json(phrases::daily_phrase(q.date.unwrap_or_else(|| Utc::now().date_naive())))
}

#[instrument(level = "info")]
pub async fn http_get_random_phrase() -> Json<&'static DailyPhrase> {
  let mut rng = StdRng::from_entropy();
  Json(phrases::random_phrase(&mut rng))
}

#[instrument(level = "info")]
pub async fn http_get_phrases(Query(q): Query<PhrasesQuery>) -> Result<Json<Vec<&'static DailyPhrase>>> {
  let level = q.level.as_deref().map(str::parse::<CefrLevel>).transpose()?;
  let category = q.category.as_deref().map(str::parse::<PhraseCategory>).transpose()?;
  let found = match (level, category) {
    (Some(l), Some(c)) => phrases::by_difficulty(l).filter(|p| p.category == c).collect(),
    (Some(l), None) => phrases::by_difficulty(l).collect(),
    (None, Some(c)) => phrases::by_category(c).collect(),
    (None, None) => phrases::PHRASES.iter().collect(),
  };
  Ok(Json(found))
}

#[instrument(level = "info", skip(state, body), fields(module = body.module_id, lesson = body.lesson_number))]
pub async fn http_post_chat_start(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatStartIn>,
) -> Result<Json<ChatStartOut>> {
  let level = match body.user_id.as_deref() {
    Some(user) => logic::level_for(&state, user).await,
    None => CefrLevel::A1,
  };
  let greeting = logic::start_lesson_chat(&state, body.module_id, body.lesson_number, level).await?;
  Ok(Json(ChatStartOut { greeting }))
}

#[instrument(level = "info", skip(state, body), fields(message_len = body.user_message.len(), turns = body.conversation_history.len()))]
pub async fn http_post_chat_reply(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatReplyIn>,
) -> Json<ChatReplyOut> {
  let teacher_response = logic::tutor_reply(&state, &body.user_message, &body.conversation_history).await;
  Json(ChatReplyOut { teacher_response })
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_tts(State(state): State<Arc<AppState>>, Json(body): Json<TtsIn>) -> Result<Json<TtsOut>> {
  let audio_url = logic::speech_url(&state, &body.text, body.voice_id.as_deref()).await?;
  Ok(Json(TtsOut { audio_url }))
}

#[instrument(level = "info", skip(state, body), fields(b64_len = body.audio_base64.len()))]
pub async fn http_post_transcribe(
  State(state): State<Arc<AppState>>,
  Json(body): Json<TranscribeIn>,
) -> Result<Json<TranscribeOut>> {
  let text = logic::transcribe(&state, &body.audio_base64, &body.mime).await?;
  Ok(Json(TranscribeOut { text }))
}
