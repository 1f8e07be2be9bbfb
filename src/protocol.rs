//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::badges::{badge_points, Badge};
use crate::domain::{AnswerSet, CefrLevel, MilestoneProgress, Question, QuestionType};
use crate::openai::ChatMessage;

/// Messages the client can send over WebSocket (chat practice screen).
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  StartLesson {
    #[serde(rename = "moduleId")]
    module_id: u32,
    #[serde(rename = "lessonNumber")]
    lesson_number: u32,
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
  },
  ChatMessage {
    text: String,
    #[serde(default)]
    history: Vec<ChatMessage>,
  },
  SpeechToText {
    #[serde(rename = "audioBase64")]
    audio_base64: String,
    #[serde(default = "default_mime")]
    mime: String,
  },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  Greeting { text: String },
  TeacherReply { text: String },
  SpeechToText { text: String },
  Error { message: String },
}

/// Placement item as shown to the learner: no answer, no explanation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
  pub id: String,
  pub prompt: String,
  #[serde(rename = "type")]
  pub kind: QuestionType,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
  pub cefr_level: CefrLevel,
}

pub fn to_out(q: &Question) -> QuestionOut {
  QuestionOut {
    id: q.id.clone(),
    prompt: q.prompt.clone(),
    kind: q.kind,
    options: q.options.clone(),
    cefr_level: q.cefr_level,
  }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct OnboardingIn {
  pub answers: AnswerSet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingOut {
  pub score: u8,
  pub cefr_level: CefrLevel,
  pub correct: usize,
  pub total: usize,
  pub review: Vec<ReviewItem>,
}

/// Per-question feedback returned after submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
  pub id: String,
  pub submitted: Option<String>,
  pub correct: bool,
  pub correct_answer: String,
  pub explanation: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettingsIn {
  pub preferred_voice: Option<String>,
  pub voice_speed: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOut {
  pub cefr_level: CefrLevel,
  pub total_points: u32,
  pub current_streak: u32,
  pub longest_streak: u32,
  pub total_sessions: usize,
  /// Seconds across all lessons.
  pub total_duration: u64,
  pub completed_modules: usize,
  pub badges_count: usize,
  pub milestones: MilestoneProgress,
}

#[derive(Debug, Deserialize)]
pub struct ModulesQuery {
  pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteLessonIn {
  pub lesson_number: u32,
  #[serde(default)]
  pub duration: u32,
  #[serde(default)]
  pub points_earned: u32,
}

#[derive(Debug, Deserialize)]
pub struct AttemptHistoryQuery {
  pub word: Option<String>,
}

/// Every field is optional; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleIn {
  pub monday: Option<bool>,
  pub tuesday: Option<bool>,
  pub wednesday: Option<bool>,
  pub thursday: Option<bool>,
  pub friday: Option<bool>,
  pub saturday: Option<bool>,
  pub sunday: Option<bool>,
  pub email_reminders: Option<bool>,
  pub push_reminders: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DailyPhraseQuery {
  /// `YYYY-MM-DD`, today (UTC) when absent.
  pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct PhrasesQuery {
  pub level: Option<String>,
  pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttemptIn {
  pub word: String,
  pub score: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOut {
  pub progress: MilestoneProgress,
  pub new_badges: Vec<NewBadgeOut>,
  pub next_badges: Vec<Badge>,
  pub points_awarded: u32,
}

#[derive(Debug, Serialize)]
pub struct NewBadgeOut {
  pub badge: Badge,
  pub message: String,
  pub points: u32,
}

/// Catalog entry with its point value; reserved entries are never unlocked.
#[derive(Debug, Serialize)]
pub struct BadgeOut {
  #[serde(flatten)]
  pub badge: Badge,
  pub points: u32,
  pub reserved: bool,
}

impl From<&Badge> for BadgeOut {
  fn from(b: &Badge) -> Self {
    BadgeOut { badge: b.clone(), points: badge_points(b.kind), reserved: b.is_reserved() }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBadgeOut {
  pub badge: Badge,
  pub unlocked_at: DateTime<Utc>,
  pub personal_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserBadgesOut {
  pub unlocked: Vec<UserBadgeOut>,
  pub next: Vec<Badge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStartIn {
  pub module_id: u32,
  pub lesson_number: u32,
  /// Pitches the greeting at this learner's placement level (A1 otherwise).
  #[serde(default)]
  pub user_id: Option<String>,
}
#[derive(Serialize)]
pub struct ChatStartOut {
  pub greeting: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyIn {
  pub user_message: String,
  #[serde(default)]
  pub conversation_history: Vec<ChatMessage>,
}
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyOut {
  pub teacher_response: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsIn {
  pub text: String,
  pub voice_id: Option<String>,
}
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsOut {
  pub audio_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeIn {
  pub audio_base64: String,
  #[serde(default = "default_mime")]
  pub mime: String,
}
#[derive(Serialize)]
pub struct TranscribeOut {
  pub text: String,
}

fn default_mime() -> String {
  "audio/webm".into()
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
