//! Domain models: CEFR levels, placement questions and results, practice
//! attempts, the milestone rollup, and the per-user records kept by the store.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Six-tier proficiency scale, lowest first.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CefrLevel {
  A1,
  A2,
  B1,
  B2,
  C1,
  C2,
}

impl CefrLevel {
  pub const ALL: [CefrLevel; 6] = [
    CefrLevel::A1,
    CefrLevel::A2,
    CefrLevel::B1,
    CefrLevel::B2,
    CefrLevel::C1,
    CefrLevel::C2,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      CefrLevel::A1 => "A1",
      CefrLevel::A2 => "A2",
      CefrLevel::B1 => "B1",
      CefrLevel::B2 => "B2",
      CefrLevel::C1 => "C1",
      CefrLevel::C2 => "C2",
    }
  }
}

impl fmt::Display for CefrLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for CefrLevel {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    CefrLevel::ALL
      .into_iter()
      .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| Error::InvalidInput(format!("unknown CEFR level '{}'", s)))
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
  MultipleChoice,
  FillBlank,
  Translation,
  Listening,
}

/// One placement-test item. `cefr_level` is informational; scoring ignores it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
  pub id: String,
  pub prompt: String,
  #[serde(rename = "type")]
  pub kind: QuestionType,
  #[serde(default)]
  pub options: Option<Vec<String>>,
  pub correct_answer: String,
  #[serde(default)]
  pub explanation: String,
  pub cefr_level: CefrLevel,
}

/// Question id -> submitted answer. Unanswered questions are absent.
pub type AnswerSet = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementResult {
  pub score: u8,
  pub cefr_level: CefrLevel,
}

/// Persisted onboarding outcome; one per user, a retake overwrites it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResult {
  pub user_id: String,
  pub answers: AnswerSet,
  pub score: u8,
  pub cefr_level: CefrLevel,
  pub completed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub user_id: String,
  pub cefr_level: CefrLevel,
  pub total_points: u32,
  pub current_streak: u32,
  pub longest_streak: u32,
  pub last_session_date: Option<DateTime<Utc>>,
  pub preferred_voice: String,
  pub voice_speed: f32,
}

impl UserProfile {
  /// Fresh profile seeded from a placement result.
  pub fn seed(user_id: &str, cefr_level: CefrLevel) -> Self {
    Self {
      user_id: user_id.to_string(),
      cefr_level,
      total_points: 0,
      current_streak: 0,
      longest_streak: 0,
      last_session_date: None,
      preferred_voice: "Rachel".into(),
      voice_speed: 1.0,
    }
  }
}

/// One scored pronunciation attempt. Score is clamped into [0, 100] on creation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationAttempt {
  pub word: String,
  pub score: f64,
  pub at: DateTime<Utc>,
}

impl PronunciationAttempt {
  pub fn new(word: impl Into<String>, score: f64, at: DateTime<Utc>) -> Self {
    let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };
    Self { word: word.into(), score, at }
  }
}

/// Lifetime rollup of a user's practice, derived from the full attempt history.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
  pub total_attempts: u32,
  pub average_score: f64,
  pub best_score: f64,
  pub current_streak: u32,
  pub longest_streak: u32,
  pub unique_words: u32,
  /// Attempts scoring >= 95.
  pub perfect_scores: u32,
  /// Attempts scoring >= 85.
  pub excellent_scores: u32,
  #[serde(rename = "wordsAbove90")]
  pub words_above_90: Vec<String>,
  pub days_active: u32,
  pub last_practice_date: Option<NaiveDate>,
}

/// Append-only unlock record. At most one per badge id per user.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedBadgeEvent {
  pub badge_id: String,
  pub unlocked_at: DateTime<Utc>,
  pub personal_message: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSession {
  pub module_id: u32,
  pub lesson_number: u32,
  /// Seconds.
  pub duration: u32,
  pub points_earned: u32,
  pub completed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
  pub module_id: u32,
  pub current_lesson: u32,
  pub completed: bool,
  pub completed_at: Option<DateTime<Utc>>,
}

/// Weekly study days and reminder switches. New records start with no
/// study days and both reminders on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSettings {
  pub monday: bool,
  pub tuesday: bool,
  pub wednesday: bool,
  pub thursday: bool,
  pub friday: bool,
  pub saturday: bool,
  pub sunday: bool,
  pub email_reminders: bool,
  pub push_reminders: bool,
}

impl Default for ScheduleSettings {
  fn default() -> Self {
    Self {
      monday: false,
      tuesday: false,
      wednesday: false,
      thursday: false,
      friday: false,
      saturday: false,
      sunday: false,
      email_reminders: true,
      push_reminders: true,
    }
  }
}

impl ScheduleSettings {
  /// Monday, Wednesday and Friday, set when onboarding first completes.
  pub fn onboarding_default() -> Self {
    Self { monday: true, wednesday: true, friday: true, ..Self::default() }
  }

  pub fn is_study_day(&self, day: chrono::Weekday) -> bool {
    use chrono::Weekday::*;
    match day {
      Mon => self.monday,
      Tue => self.tuesday,
      Wed => self.wednesday,
      Thu => self.thursday,
      Fri => self.friday,
      Sat => self.saturday,
      Sun => self.sunday,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cefr_level_parses_case_insensitively() {
    assert_eq!("b2".parse::<CefrLevel>().unwrap(), CefrLevel::B2);
    assert_eq!(" C1 ".parse::<CefrLevel>().unwrap(), CefrLevel::C1);
    assert!("D1".parse::<CefrLevel>().is_err());
  }

  #[test]
  fn attempt_score_is_clamped() {
    let at = Utc::now();
    assert_eq!(PronunciationAttempt::new("hello", 140.0, at).score, 100.0);
    assert_eq!(PronunciationAttempt::new("hello", -3.0, at).score, 0.0);
    assert_eq!(PronunciationAttempt::new("hello", f64::NAN, at).score, 0.0);
  }

  #[test]
  fn onboarding_schedule_is_mon_wed_fri() {
    let s = ScheduleSettings::onboarding_default();
    let days: Vec<_> = [chrono::Weekday::Mon, chrono::Weekday::Tue, chrono::Weekday::Wed, chrono::Weekday::Fri]
      .into_iter()
      .map(|d| s.is_study_day(d))
      .collect();
    assert_eq!(days, vec![true, false, true, true]);
    assert!(s.email_reminders && s.push_reminders);
    assert!(!ScheduleSettings::default().is_study_day(chrono::Weekday::Mon));
  }
}
