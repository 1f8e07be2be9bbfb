//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Onboarding submission (placement scoring + profile seeding)
//!   - Pronunciation attempts feeding the milestone/badge engine
//!   - Module progress and lesson completion
//!   - Profile stats
//!   - Tutor chat, speech and transcription via the optional AI clients

use base64::Engine;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, error, info, instrument, warn};

use crate::badges::{badge_points, newly_unlocked, unlock_message, Badge};
use crate::domain::{
  AnswerSet, CefrLevel, LearningSession, MilestoneProgress, ModuleProgress, OnboardingResult, PlacementResult,
  PronunciationAttempt, ScheduleSettings, UnlockedBadgeEvent, UserProfile,
};
use crate::elevenlabs::MOCK_AUDIO_URL;
use crate::error::{Error, Result};
use crate::openai::{ChatMessage, ChatRole};
use crate::placement;
use crate::protocol::*;
use crate::state::AppState;
use crate::tasks::{self, CompletedTaskOut, TaskCompletion};
use crate::util::{fill_template, word_key};

/// Placement answers larger than this are rejected before scoring.
const MAX_ANSWER_LEN: usize = 1_000;

#[instrument(level = "info", skip(state, answers), fields(answered = answers.len()))]
pub async fn submit_onboarding(state: &AppState, user_id: &str, answers: AnswerSet) -> Result<OnboardingOut> {
  if let Some((id, _)) = answers.iter().find(|(_, a)| a.len() > MAX_ANSWER_LEN) {
    return Err(Error::InvalidInput(format!("answer to {} is too long", id)));
  }

  let PlacementResult { score, cefr_level } = placement::evaluate(&answers, &state.questions)?;
  let review: Vec<ReviewItem> = state
    .questions
    .iter()
    .map(|q| {
      let submitted = answers.get(&q.id).cloned();
      let correct = submitted.as_deref().map_or(false, |s| placement::answers_match(s, &q.correct_answer));
      ReviewItem {
        id: q.id.clone(),
        submitted,
        correct,
        correct_answer: q.correct_answer.clone(),
        explanation: q.explanation.clone(),
      }
    })
    .collect();
  let correct = review.iter().filter(|r| r.correct).count();

  let result = OnboardingResult { user_id: user_id.to_string(), answers, score, cefr_level, completed_at: Utc::now() };
  // Result, profile and schedule are written under one lock.
  state
    .store
    .update(user_id, |r| {
      r.record_onboarding(result);
    })
    .await;

  info!(target: "progress", %user_id, score, level = %cefr_level, correct, "Onboarding scored");
  Ok(OnboardingOut { score, cefr_level, correct, total: state.questions.len(), review })
}

pub async fn onboarding_result(state: &AppState, user_id: &str) -> Result<OnboardingResult> {
  state
    .store
    .onboarding(user_id)
    .await
    .ok_or_else(|| Error::NotFound(format!("no onboarding result for user {}", user_id)))
}

pub async fn profile(state: &AppState, user_id: &str) -> Result<UserProfile> {
  state
    .store
    .profile(user_id)
    .await
    .ok_or_else(|| Error::NotFound(format!("no profile for user {}", user_id)))
}

/// Placement level of the user, A1 before onboarding.
pub async fn level_for(state: &AppState, user_id: &str) -> CefrLevel {
  state.store.profile(user_id).await.map_or(CefrLevel::A1, |p| p.cefr_level)
}

#[instrument(level = "info", skip(state, input))]
pub async fn update_voice_settings(state: &AppState, user_id: &str, input: VoiceSettingsIn) -> Result<UserProfile> {
  if let Some(speed) = input.voice_speed {
    if !(0.5..=2.0).contains(&speed) {
      return Err(Error::InvalidInput(format!("voiceSpeed {} outside 0.5-2.0", speed)));
    }
  }
  state
    .store
    .update(user_id, |r| {
      let p = r.profile.as_mut().ok_or_else(|| Error::NotFound(format!("no profile for user {}", user_id)))?;
      if let Some(v) = input.preferred_voice {
        p.preferred_voice = v;
      }
      if let Some(s) = input.voice_speed {
        p.voice_speed = s;
      }
      Ok(p.clone())
    })
    .await
}

#[instrument(level = "info", skip(state))]
pub async fn stats(state: &AppState, user_id: &str, today: chrono::NaiveDate) -> StatsOut {
  let record = state.store.snapshot(user_id).await;
  let milestones = MilestoneProgress::from_attempts(&record.attempts, today);
  let (cefr_level, total_points, longest) = record
    .profile
    .as_ref()
    .map(|p| (p.cefr_level, p.total_points, p.longest_streak))
    .unwrap_or((CefrLevel::A1, 0, 0));

  StatsOut {
    cefr_level,
    total_points,
    current_streak: milestones.current_streak,
    longest_streak: longest.max(milestones.longest_streak),
    total_sessions: record.sessions.len(),
    total_duration: record.sessions.iter().map(|s| u64::from(s.duration)).sum(),
    completed_modules: record.modules.values().filter(|m| m.completed).count(),
    badges_count: record.badges.len(),
    milestones,
  }
}

pub async fn module_progress(state: &AppState, user_id: &str) -> Vec<ModuleProgress> {
  state.store.snapshot(user_id).await.modules.into_values().collect()
}

/// Creates progress at lesson 1; a second start leaves it untouched.
#[instrument(level = "info", skip(state))]
pub async fn start_module(state: &AppState, user_id: &str, module_id: u32) -> Result<ModuleProgress> {
  if state.modules.get(module_id).is_none() {
    return Err(Error::NotFound(format!("module {}", module_id)));
  }
  let progress = state
    .store
    .update(user_id, |r| {
      r.modules
        .entry(module_id)
        .or_insert(ModuleProgress { module_id, current_lesson: 1, completed: false, completed_at: None })
        .clone()
    })
    .await;
  Ok(progress)
}

#[instrument(level = "info", skip(state, input), fields(lesson = input.lesson_number))]
pub async fn complete_lesson(
  state: &AppState,
  user_id: &str,
  module_id: u32,
  input: CompleteLessonIn,
  at: DateTime<Utc>,
) -> Result<ModuleProgress> {
  let module = state.modules.get(module_id).ok_or_else(|| Error::NotFound(format!("module {}", module_id)))?;
  let total = module.total_lessons();
  if input.lesson_number == 0 || input.lesson_number > total {
    return Err(Error::InvalidInput(format!(
      "lesson {} outside 1-{} for module {}",
      input.lesson_number, total, module_id
    )));
  }

  let progress = state
    .store
    .update(user_id, |r| {
      r.sessions.push(LearningSession {
        module_id,
        lesson_number: input.lesson_number,
        duration: input.duration,
        points_earned: input.points_earned,
        completed_at: at,
      });

      let entry = r
        .modules
        .entry(module_id)
        .or_insert(ModuleProgress { module_id, current_lesson: 1, completed: false, completed_at: None });
      entry.current_lesson = entry.current_lesson.max((input.lesson_number + 1).min(total));
      if input.lesson_number == total && !entry.completed {
        entry.completed = true;
        entry.completed_at = Some(at);
      }
      let progress = entry.clone();

      let profile = r.profile_mut(user_id);
      profile.total_points = profile.total_points.saturating_add(input.points_earned);
      profile.last_session_date = Some(at);
      progress
    })
    .await;

  info!(target: "progress", %user_id, module_id, completed = progress.completed, points = input.points_earned, "Lesson completed");
  Ok(progress)
}

/// Record one attempt and run the badge engine over the refreshed rollup.
/// New unlocks are appended once, with their points added to the profile.
#[instrument(level = "info", skip(state, word, rng), fields(word_len = word.len()))]
pub async fn record_attempt<R: Rng + Send>(
  state: &AppState,
  user_id: &str,
  word: &str,
  score: f64,
  at: DateTime<Utc>,
  rng: &mut R,
) -> Result<AttemptOut> {
  let word = word.trim();
  if word.is_empty() {
    return Err(Error::InvalidInput("word must not be empty".into()));
  }
  if !score.is_finite() {
    return Err(Error::InvalidInput("score must be a finite number".into()));
  }

  let catalog = &state.badges;
  let today = at.date_naive();
  let out = state
    .store
    .update(user_id, |r| {
      r.attempts.push(PronunciationAttempt::new(word, score, at));
      let progress = MilestoneProgress::from_attempts(&r.attempts, today);

      let previous: Vec<Badge> = r.badges.iter().filter_map(|e| catalog.get(&e.badge_id).cloned()).collect();
      let current = catalog.unlocked_badges(&progress);
      let fresh = newly_unlocked(&previous, &current);

      let mut new_badges = Vec::with_capacity(fresh.len());
      let mut awarded = 0u32;
      for badge in fresh {
        let message = unlock_message(&badge, rng);
        let points = badge_points(badge.kind);
        let added = r.append_badge(UnlockedBadgeEvent {
          badge_id: badge.id.to_string(),
          unlocked_at: at,
          personal_message: Some(message.clone()),
        });
        if added {
          awarded += points;
          new_badges.push(NewBadgeOut { badge, message, points });
        }
      }

      let profile = r.profile_mut(user_id);
      profile.total_points = profile.total_points.saturating_add(awarded);
      profile.current_streak = progress.current_streak;
      profile.longest_streak = profile.longest_streak.max(progress.longest_streak);
      profile.last_session_date = Some(at);

      let next_badges = catalog.next_badges(&progress);
      AttemptOut { progress, new_badges, next_badges, points_awarded: awarded }
    })
    .await;

  for b in &out.new_badges {
    info!(target: "progress", %user_id, badge = b.badge.id, points = b.points, "Badge unlocked");
  }
  debug!(target: "progress", %user_id, total_attempts = out.progress.total_attempts, "Attempt recorded");
  Ok(out)
}

/// Persisted unlocks (including ones the current rollup would no longer
/// grant) plus the next suggestions.
pub async fn user_badges(state: &AppState, user_id: &str, today: chrono::NaiveDate) -> UserBadgesOut {
  let record = state.store.snapshot(user_id).await;
  let unlocked = record
    .badges
    .iter()
    .filter_map(|e| {
      state.badges.get(&e.badge_id).map(|b| UserBadgeOut {
        badge: b.clone(),
        unlocked_at: e.unlocked_at,
        personal_message: e.personal_message.clone(),
      })
    })
    .collect();
  let progress = MilestoneProgress::from_attempts(&record.attempts, today);
  UserBadgesOut { unlocked, next: state.badges.next_badges(&progress) }
}

pub fn badge_catalog(state: &AppState) -> Vec<BadgeOut> {
  state.badges.iter().map(BadgeOut::from).collect()
}

/// Newest first, optionally narrowed to one word (trimmed, case-insensitive).
pub async fn attempt_history(state: &AppState, user_id: &str, word: Option<&str>) -> Vec<PronunciationAttempt> {
  let key = word.map(word_key).filter(|k| !k.is_empty());
  let mut attempts: Vec<_> = state
    .store
    .snapshot(user_id)
    .await
    .attempts
    .into_iter()
    .filter(|a| key.as_ref().map_or(true, |k| word_key(&a.word) == *k))
    .collect();
  attempts.reverse();
  attempts
}

pub async fn schedule(state: &AppState, user_id: &str) -> Result<ScheduleSettings> {
  state
    .store
    .snapshot(user_id)
    .await
    .schedule
    .ok_or_else(|| Error::NotFound(format!("no schedule for user {}", user_id)))
}

/// Partial update; a user without a schedule starts from the defaults.
#[instrument(level = "info", skip(state, input))]
pub async fn update_schedule(state: &AppState, user_id: &str, input: ScheduleIn) -> ScheduleSettings {
  let updated = state
    .store
    .update(user_id, |r| {
      let s = r.schedule.get_or_insert_with(ScheduleSettings::default);
      let fields = [
        (&mut s.monday, input.monday),
        (&mut s.tuesday, input.tuesday),
        (&mut s.wednesday, input.wednesday),
        (&mut s.thursday, input.thursday),
        (&mut s.friday, input.friday),
        (&mut s.saturday, input.saturday),
        (&mut s.sunday, input.sunday),
        (&mut s.email_reminders, input.email_reminders),
        (&mut s.push_reminders, input.push_reminders),
      ];
      for (field, value) in fields {
        if let Some(v) = value {
          *field = v;
        }
      }
      s.clone()
    })
    .await;
  debug!(target: "progress", %user_id, "Schedule updated");
  updated
}

/// Completions joined with their task, newest first.
pub async fn completed_tasks(state: &AppState, user_id: &str) -> Vec<CompletedTaskOut> {
  let mut done: Vec<CompletedTaskOut> = state
    .store
    .snapshot(user_id)
    .await
    .completed_tasks
    .iter()
    .rev()
    .filter_map(|c| tasks::get(c.task_id).map(|t| CompletedTaskOut { task: *t, completed_at: c.completed_at }))
    .collect();
  done.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
  done
}

#[instrument(level = "info", skip(state))]
pub async fn complete_task(state: &AppState, user_id: &str, task_id: u32, at: DateTime<Utc>) -> Result<CompletedTaskOut> {
  let task = tasks::get(task_id).ok_or_else(|| Error::NotFound(format!("off-day task {}", task_id)))?;
  state
    .store
    .update(user_id, |r| r.completed_tasks.push(TaskCompletion { task_id, completed_at: at }))
    .await;
  info!(target: "progress", %user_id, task_id, "Off-day task completed");
  Ok(CompletedTaskOut { task: *task, completed_at: at })
}

#[instrument(level = "info", skip(state))]
pub async fn start_lesson_chat(state: &AppState, module_id: u32, lesson_number: u32, level: CefrLevel) -> Result<String> {
  let module = state.modules.get(module_id).ok_or_else(|| Error::NotFound(format!("module {}", module_id)))?;
  let lesson = module
    .lesson(lesson_number)
    .map(|l| l.title)
    .ok_or_else(|| Error::InvalidInput(format!("lesson {} not in module {}", lesson_number, module_id)))?;

  let Some(oa) = &state.openai else {
    debug!(target: "ai", module_id, "Lesson greeting via stub.");
    return Ok(state.prompts.fallback_greeting.clone());
  };
  let system = fill_template(
    &state.prompts.lesson_start_system,
    &[("module", module.title), ("lesson", lesson), ("level", level.as_str())],
  );
  let messages = [ChatMessage::system(system), ChatMessage::user(state.prompts.lesson_start_user.clone())];
  match oa.chat_complete(&messages, 0.7).await {
    Ok(t) => Ok(t),
    Err(e) => {
      error!(target: "ai", module_id, error = %e, "OpenAI lesson greeting failed; using stub.");
      Ok(state.prompts.fallback_greeting.clone())
    }
  }
}

/// Tutor reply to the latest learner message. The caller's history never
/// carries its own system turns; the tutor prompt always leads.
#[instrument(level = "info", skip(state, message, history), fields(message_len = message.len(), turns = history.len()))]
pub async fn tutor_reply(state: &AppState, message: &str, history: &[ChatMessage]) -> String {
  let Some(oa) = &state.openai else {
    debug!(target: "ai", "Tutor reply via stub.");
    return state.prompts.fallback_reply.clone();
  };

  let mut messages = Vec::with_capacity(history.len() + 2);
  messages.push(ChatMessage::system(state.prompts.tutor_system.clone()));
  messages.extend(history.iter().filter(|m| m.role != ChatRole::System).cloned());
  messages.push(ChatMessage::user(message));

  match oa.chat_complete(&messages, 0.7).await {
    Ok(t) => t,
    Err(e) => {
      error!(target: "ai", error = %e, "OpenAI tutor reply failed; using stub.");
      state.prompts.fallback_reply.clone()
    }
  }
}

#[instrument(level = "info", skip(state, text), fields(text_len = text.len()))]
pub async fn speech_url(state: &AppState, text: &str, voice_id: Option<&str>) -> Result<String> {
  if text.trim().is_empty() {
    return Err(Error::InvalidInput("text must not be empty".into()));
  }
  let Some(tts) = &state.tts else {
    return Ok(MOCK_AUDIO_URL.to_string());
  };
  match tts.generate_speech(text.trim(), voice_id).await {
    Ok(url) => Ok(url),
    Err(e) => {
      warn!(target: "ai", error = %e, "ElevenLabs synthesis failed; serving mock audio.");
      Ok(MOCK_AUDIO_URL.to_string())
    }
  }
}

#[instrument(level = "info", skip(state, audio_base64), fields(b64_len = audio_base64.len()))]
pub async fn transcribe(state: &AppState, audio_base64: &str, mime: &str) -> Result<String> {
  let audio = base64::engine::general_purpose::STANDARD
    .decode(audio_base64.trim())
    .map_err(|e| Error::InvalidInput(format!("audio is not valid base64: {}", e)))?;
  if audio.is_empty() {
    return Err(Error::InvalidInput("audio is empty".into()));
  }
  let oa = state
    .openai
    .as_ref()
    .ok_or_else(|| Error::Upstream("speech-to-text is not configured".into()))?;
  oa.transcribe(audio, mime).await.map_err(Error::Upstream)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, day, 20, 0, 0).unwrap()
  }

  fn ids(out: &AttemptOut) -> Vec<&'static str> {
    out.new_badges.iter().map(|b| b.badge.id).collect()
  }

  #[tokio::test]
  async fn onboarding_scores_and_seeds_profile() {
    let state = AppState::for_tests();
    let answers: AnswerSet = [("q1".to_string(), "all of the above".to_string())].into_iter().collect();
    let out = submit_onboarding(&state, "ana", answers).await.unwrap();
    assert_eq!((out.score, out.cefr_level, out.correct, out.total), (3, CefrLevel::A1, 1, 30));
    assert!(out.review[0].correct && !out.review[1].correct);

    let p = profile(&state, "ana").await.unwrap();
    assert_eq!(p.cefr_level, CefrLevel::A1);
    assert_eq!(onboarding_result(&state, "ana").await.unwrap().score, 3);
  }

  #[tokio::test]
  async fn onboarding_record_is_complete_in_one_write() {
    let state = AppState::for_tests();
    submit_onboarding(&state, "ana", AnswerSet::new()).await.unwrap();
    let r = state.store.snapshot("ana").await;
    assert!(r.onboarding.is_some() && r.profile.is_some());
    assert_eq!(r.schedule, Some(ScheduleSettings::onboarding_default()));
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn overlapping_retakes_keep_result_and_profile_in_step() {
    let state = std::sync::Arc::new(AppState::for_tests());
    let all: AnswerSet = state.questions.iter().map(|q| (q.id.clone(), q.correct_answer.clone())).collect();
    let mut handles = Vec::new();
    for i in 0..40 {
      let (state, answers) = (state.clone(), if i % 2 == 0 { all.clone() } else { AnswerSet::new() });
      handles.push(tokio::spawn(async move { submit_onboarding(&state, "ana", answers).await.unwrap() }));
    }
    for h in handles {
      h.await.unwrap();
    }
    let r = state.store.snapshot("ana").await;
    assert_eq!(r.onboarding.map(|o| o.cefr_level), r.profile.map(|p| p.cefr_level));
  }

  #[tokio::test]
  async fn schedule_patch_without_onboarding_starts_from_defaults() {
    let state = AppState::for_tests();
    assert!(matches!(schedule(&state, "u").await, Err(Error::NotFound(_))));
    let s = update_schedule(&state, "u", ScheduleIn { saturday: Some(true), ..Default::default() }).await;
    assert_eq!(s, ScheduleSettings { saturday: true, ..ScheduleSettings::default() });
    assert_eq!(schedule(&state, "u").await.unwrap(), s);
  }

  #[tokio::test]
  async fn tasks_can_repeat_and_unknown_ids_fail() {
    let state = AppState::for_tests();
    assert!(matches!(complete_task(&state, "u", 404, at(1)).await, Err(Error::NotFound(_))));
    complete_task(&state, "u", 2, at(1)).await.unwrap();
    complete_task(&state, "u", 4, at(3)).await.unwrap();
    complete_task(&state, "u", 2, at(2)).await.unwrap();
    let done: Vec<_> = completed_tasks(&state, "u").await.iter().map(|c| (c.task.id, c.completed_at)).collect();
    assert_eq!(done, vec![(4, at(3)), (2, at(2)), (2, at(1))]);
  }

  #[tokio::test]
  async fn attempt_history_filters_by_word() {
    let state = AppState::for_tests();
    let mut rng = StdRng::seed_from_u64(5);
    for (w, s) in [("Love", 50.0), ("hello", 60.0), ("love", 70.0)] {
      record_attempt(&state, "u", w, s, at(1), &mut rng).await.unwrap();
    }
    let love: Vec<_> = attempt_history(&state, "u", Some(" LOVE ")).await.iter().map(|a| a.score).collect();
    assert_eq!(love, vec![70.0, 50.0]);
    assert_eq!(attempt_history(&state, "u", Some("")).await.len(), 3);
    assert!(attempt_history(&state, "ghost", None).await.is_empty());
  }

  #[tokio::test]
  async fn retaking_onboarding_overwrites_result() {
    let state = AppState::for_tests();
    submit_onboarding(&state, "ana", AnswerSet::new()).await.unwrap();
    let all: AnswerSet = state.questions.iter().map(|q| (q.id.clone(), q.correct_answer.clone())).collect();
    submit_onboarding(&state, "ana", all).await.unwrap();
    let r = onboarding_result(&state, "ana").await.unwrap();
    assert_eq!((r.score, r.cefr_level), (100, CefrLevel::C2));
    assert_eq!(profile(&state, "ana").await.unwrap().cefr_level, CefrLevel::C2);
  }

  #[tokio::test]
  async fn first_attempt_unlocks_once_and_awards_points() {
    let state = AppState::for_tests();
    let mut rng = StdRng::seed_from_u64(1);
    let first = record_attempt(&state, "u", "hello", 70.0, at(1), &mut rng).await.unwrap();
    assert_eq!(ids(&first), vec!["first_attempt"]);
    assert_eq!(first.points_awarded, 10);
    assert!(first.new_badges[0].message.contains("Primeiro Passo"));

    let second = record_attempt(&state, "u", "hello", 75.0, at(1), &mut rng).await.unwrap();
    assert!(second.new_badges.is_empty());
    assert_eq!(profile(&state, "u").await.unwrap().total_points, 10);
  }

  #[tokio::test]
  async fn streak_and_attempt_tiers_unlock_over_days() {
    let state = AppState::for_tests();
    let mut rng = StdRng::seed_from_u64(2);
    let mut unlocked = Vec::new();
    for i in 0..12u32 {
      let day = 1 + i / 3;
      let out = record_attempt(&state, "u", &format!("word{i}"), 82.0, at(day), &mut rng).await.unwrap();
      unlocked.extend(ids(&out));
    }
    assert_eq!(unlocked, vec!["first_attempt", "three_day_streak", "ten_attempts"]);

    let p = profile(&state, "u").await.unwrap();
    assert_eq!(p.total_points, 10 + 25 + 10);
    assert_eq!(p.current_streak, 4);

    let badges = user_badges(&state, "u", at(4).date_naive()).await;
    assert_eq!(badges.unlocked.len(), 3);
    let next: Vec<_> = badges.next.iter().map(|b| b.id).collect();
    assert_eq!(next, vec!["fifty_attempts", "seven_day_streak"]);
  }

  #[tokio::test]
  async fn unlocks_survive_a_broken_streak() {
    let state = AppState::for_tests();
    let mut rng = StdRng::seed_from_u64(3);
    for d in 1..=3 {
      record_attempt(&state, "u", "love", 90.0, at(d), &mut rng).await.unwrap();
    }
    let later = at(3) + Duration::days(10);
    let out = record_attempt(&state, "u", "love", 90.0, later, &mut rng).await.unwrap();
    assert_eq!(out.progress.current_streak, 1);
    let badges = user_badges(&state, "u", later.date_naive()).await;
    assert!(badges.unlocked.iter().any(|b| b.badge.id == "three_day_streak"));
  }

  #[tokio::test]
  async fn attempt_validation() {
    let state = AppState::for_tests();
    let mut rng = StdRng::seed_from_u64(4);
    assert!(matches!(
      record_attempt(&state, "u", "  ", 50.0, at(1), &mut rng).await,
      Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
      record_attempt(&state, "u", "hi", f64::INFINITY, at(1), &mut rng).await,
      Err(Error::InvalidInput(_))
    ));
  }

  #[tokio::test]
  async fn lessons_complete_modules_and_add_points() {
    let state = AppState::for_tests();
    let started = start_module(&state, "u", 3).await.unwrap();
    assert_eq!((started.current_lesson, started.completed), (1, false));

    let done = complete_lesson(
      &state,
      "u",
      3,
      CompleteLessonIn { lesson_number: 1, duration: 600, points_earned: 40 },
      at(2),
    )
    .await
    .unwrap();
    assert!(done.completed);

    let again = start_module(&state, "u", 3).await.unwrap();
    assert!(again.completed, "start is idempotent");

    let s = stats(&state, "u", at(2).date_naive()).await;
    assert_eq!((s.total_sessions, s.total_duration, s.completed_modules, s.total_points), (1, 600, 1, 40));
  }

  #[tokio::test]
  async fn lesson_errors() {
    let state = AppState::for_tests();
    assert!(matches!(start_module(&state, "u", 99).await, Err(Error::NotFound(_))));
    let bad = CompleteLessonIn { lesson_number: 2, duration: 0, points_earned: 0 };
    assert!(matches!(complete_lesson(&state, "u", 1, bad, at(1)).await, Err(Error::InvalidInput(_))));
  }

  #[tokio::test]
  async fn voice_settings_need_a_profile_and_a_sane_speed() {
    let state = AppState::for_tests();
    let input = || VoiceSettingsIn { preferred_voice: Some("Adam".into()), voice_speed: Some(1.25) };
    assert!(matches!(update_voice_settings(&state, "u", input()).await, Err(Error::NotFound(_))));

    submit_onboarding(&state, "u", AnswerSet::new()).await.unwrap();
    let p = update_voice_settings(&state, "u", input()).await.unwrap();
    assert_eq!((p.preferred_voice.as_str(), p.voice_speed), ("Adam", 1.25));

    let too_fast = VoiceSettingsIn { preferred_voice: None, voice_speed: Some(3.0) };
    assert!(matches!(update_voice_settings(&state, "u", too_fast).await, Err(Error::InvalidInput(_))));
  }

  #[tokio::test]
  async fn offline_collaborators_fall_back() {
    let state = AppState::for_tests();
    assert_eq!(start_lesson_chat(&state, 1, 1, CefrLevel::A1).await.unwrap(), state.prompts.fallback_greeting);
    assert!(start_lesson_chat(&state, 1, 2, CefrLevel::A1).await.is_err());
    assert_eq!(tutor_reply(&state, "hi", &[]).await, state.prompts.fallback_reply);
    assert_eq!(speech_url(&state, "Hello", None).await.unwrap(), MOCK_AUDIO_URL);
    assert!(matches!(transcribe(&state, "aGVsbG8=", "audio/webm").await, Err(Error::Upstream(_))));
    assert!(matches!(transcribe(&state, "***", "audio/webm").await, Err(Error::InvalidInput(_))));
  }
}
