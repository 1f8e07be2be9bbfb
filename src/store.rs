//! In-memory record store keyed by user id.
//!
//! Each user's records live in one [`UserRecord`]. Multi-step updates go
//! through [`Store::update`], which holds the write lock for the whole
//! closure, so point and streak counters see every completed event once.

use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::instrument;

use crate::domain::{
  CefrLevel, LearningSession, ModuleProgress, OnboardingResult, PronunciationAttempt, ScheduleSettings,
  UnlockedBadgeEvent, UserProfile,
};
use crate::tasks::TaskCompletion;

#[derive(Clone, Debug, Default)]
pub struct UserRecord {
  pub onboarding: Option<OnboardingResult>,
  pub profile: Option<UserProfile>,
  pub attempts: Vec<PronunciationAttempt>,
  pub sessions: Vec<LearningSession>,
  pub modules: BTreeMap<u32, ModuleProgress>,
  pub badges: Vec<UnlockedBadgeEvent>,
  pub schedule: Option<ScheduleSettings>,
  pub completed_tasks: Vec<TaskCompletion>,
}

impl UserRecord {
  pub fn has_badge(&self, badge_id: &str) -> bool {
    self.badges.iter().any(|e| e.badge_id == badge_id)
  }

  /// Append-only and at most once per badge id. Returns false when the
  /// badge was already recorded.
  pub fn append_badge(&mut self, event: UnlockedBadgeEvent) -> bool {
    if self.has_badge(&event.badge_id) {
      return false;
    }
    self.badges.push(event);
    true
  }

  /// Store the placement outcome, overwriting any earlier one. The first
  /// onboarding seeds the profile and the Mon/Wed/Fri schedule; a retake
  /// only moves the level and keeps points, streaks and schedule.
  pub fn record_onboarding(&mut self, result: OnboardingResult) -> &UserProfile {
    let level = result.cefr_level;
    let profile = match self.profile.take() {
      Some(mut p) => {
        p.cefr_level = level;
        p
      }
      None => UserProfile::seed(&result.user_id, level),
    };
    self.schedule.get_or_insert_with(ScheduleSettings::onboarding_default);
    self.onboarding = Some(result);
    self.profile.insert(profile)
  }

  /// Profile for this user, seeding one at A1 if onboarding was skipped.
  pub fn profile_mut(&mut self, user_id: &str) -> &mut UserProfile {
    self.profile.get_or_insert_with(|| UserProfile::seed(user_id, CefrLevel::A1))
  }
}

#[derive(Clone, Default)]
pub struct Store {
  users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl Store {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run `f` against the user's record under the write lock.
  #[instrument(level = "debug", skip(self, f))]
  pub async fn update<T>(&self, user_id: &str, f: impl FnOnce(&mut UserRecord) -> T) -> T {
    let mut users = self.users.write().await;
    let record = users.entry(user_id.to_string()).or_default();
    f(record)
  }

  /// Snapshot of the user's record; empty if the user is unknown.
  pub async fn snapshot(&self, user_id: &str) -> UserRecord {
    self.users.read().await.get(user_id).cloned().unwrap_or_default()
  }

  pub async fn onboarding(&self, user_id: &str) -> Option<OnboardingResult> {
    self.users.read().await.get(user_id).and_then(|r| r.onboarding.clone())
  }

  pub async fn profile(&self, user_id: &str) -> Option<UserProfile> {
    self.users.read().await.get(user_id).and_then(|r| r.profile.clone())
  }
}
