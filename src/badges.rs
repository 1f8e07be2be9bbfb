//! Milestone badges: the static catalog, unlock rules, "next" suggestions,
//! points and celebration messages.
//!
//! Rules are data on each catalog entry, evaluated against a
//! [`MilestoneProgress`] snapshot. Every rule is a lower bound on
//! non-decreasing counters, so a snapshot that dominates another unlocks a
//! superset of its badges.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::MilestoneProgress;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeType {
  Pronunciation,
  Consistency,
  Progress,
  Streak,
  Achievement,
  Special,
}

impl BadgeType {
  pub fn as_str(&self) -> &'static str {
    match self {
      BadgeType::Pronunciation => "pronunciation",
      BadgeType::Consistency => "consistency",
      BadgeType::Progress => "progress",
      BadgeType::Streak => "streak",
      BadgeType::Achievement => "achievement",
      BadgeType::Special => "special",
    }
  }
}

impl fmt::Display for BadgeType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BadgeType {
  type Err = Error;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "pronunciation" => Ok(BadgeType::Pronunciation),
      "consistency" => Ok(BadgeType::Consistency),
      "progress" => Ok(BadgeType::Progress),
      "streak" => Ok(BadgeType::Streak),
      "achievement" => Ok(BadgeType::Achievement),
      "special" => Ok(BadgeType::Special),
      other => Err(Error::UnknownBadgeType(other.to_string())),
    }
  }
}

/// Unlock condition over a progress snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnlockRule {
  AttemptsAtLeast(u32),
  PerfectScoresAtLeast(u32),
  ExcellentScoresAtLeast(u32),
  /// Minimum attempts AND minimum average score.
  AverageAtLeast { attempts: u32, average: f64 },
  CurrentStreakAtLeast(u32),
  LongestStreakAtLeast(u32),
  UniqueWordsAtLeast(u32),
  /// Described in the catalog but never evaluated; stays locked.
  Reserved,
}

impl UnlockRule {
  pub fn is_met(&self, p: &MilestoneProgress) -> bool {
    match *self {
      UnlockRule::AttemptsAtLeast(n) => p.total_attempts >= n,
      UnlockRule::PerfectScoresAtLeast(n) => p.perfect_scores >= n,
      UnlockRule::ExcellentScoresAtLeast(n) => p.excellent_scores >= n,
      UnlockRule::AverageAtLeast { attempts, average } => {
        p.total_attempts >= attempts && p.average_score >= average
      }
      UnlockRule::CurrentStreakAtLeast(n) => p.current_streak >= n,
      UnlockRule::LongestStreakAtLeast(n) => p.longest_streak >= n,
      UnlockRule::UniqueWordsAtLeast(n) => p.unique_words >= n,
      UnlockRule::Reserved => false,
    }
  }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub icon: &'static str,
  #[serde(rename = "type")]
  pub kind: BadgeType,
  pub color: &'static str,
  pub requirement: &'static str,
  #[serde(skip)]
  pub rule: UnlockRule,
  /// 0-100, only filled on "next" suggestions.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub progress: Option<f64>,
}

impl Badge {
  pub fn is_reserved(&self) -> bool {
    self.rule == UnlockRule::Reserved
  }
}

/// Ordered, read-only badge table. Declared order is evaluation order.
#[derive(Clone, Debug)]
pub struct BadgeCatalog {
  badges: Vec<Badge>,
}

impl BadgeCatalog {
  pub fn new(badges: Vec<Badge>) -> Result<Self> {
    let mut seen = HashSet::new();
    for b in &badges {
      if !seen.insert(b.id) {
        return Err(Error::DuplicateBadge(b.id.to_string()));
      }
    }
    Ok(Self { badges })
  }

  pub fn builtin() -> Result<Self> {
    Self::new(builtin_badges())
  }

  pub fn get(&self, id: &str) -> Option<&Badge> {
    self.badges.iter().find(|b| b.id == id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Badge> {
    self.badges.iter()
  }

  pub fn len(&self) -> usize {
    self.badges.len()
  }

  /// Badges whose rule holds for `progress`, in catalog order.
  #[instrument(level = "debug", skip_all, fields(total_attempts = progress.total_attempts))]
  pub fn unlocked_badges(&self, progress: &MilestoneProgress) -> Vec<Badge> {
    let out: Vec<Badge> = self.badges.iter().filter(|b| b.rule.is_met(progress)).cloned().collect();
    debug!(target: "progress", unlocked = out.len(), "Badges evaluated");
    out
  }

  /// Smallest locked tier of the attempt ladder (10 -> 50) and the streak
  /// ladder (3 -> 7), with completion percentages. At most three entries.
  pub fn next_badges(&self, progress: &MilestoneProgress) -> Vec<Badge> {
    let unlocked: HashSet<&str> = self.unlocked_badges(progress).iter().map(|b| b.id).collect();
    let mut next = Vec::new();

    let attempt_tier = if progress.total_attempts < 10 {
      Some(("ten_attempts", 10))
    } else if progress.total_attempts < 50 {
      Some(("fifty_attempts", 50))
    } else {
      None
    };
    if let Some((id, threshold)) = attempt_tier {
      next.extend(self.with_progress(id, progress.total_attempts, threshold));
    }

    let streak_tier = if progress.current_streak < 3 {
      Some(("three_day_streak", 3))
    } else if progress.current_streak < 7 {
      Some(("seven_day_streak", 7))
    } else {
      None
    };
    if let Some((id, threshold)) = streak_tier {
      next.extend(self.with_progress(id, progress.current_streak, threshold));
    }

    next.retain(|b| !unlocked.contains(b.id));
    next.truncate(3);
    next
  }

  fn with_progress(&self, id: &str, current: u32, threshold: u32) -> Option<Badge> {
    let mut badge = self.get(id)?.clone();
    badge.progress = Some((f64::from(current) * 100.0 / f64::from(threshold)).min(100.0));
    Some(badge)
  }
}

/// Badges in `current` whose id is absent from `previous`.
pub fn newly_unlocked(previous: &[Badge], current: &[Badge]) -> Vec<Badge> {
  let before: HashSet<&str> = previous.iter().map(|b| b.id).collect();
  current.iter().filter(|b| !before.contains(b.id)).cloned().collect()
}

pub fn badge_points(kind: BadgeType) -> u32 {
  match kind {
    BadgeType::Pronunciation => 10,
    BadgeType::Consistency => 15,
    BadgeType::Progress => 20,
    BadgeType::Streak => 25,
    BadgeType::Achievement => 50,
    BadgeType::Special => 100,
  }
}

/// The two celebration templates for a badge type. `{name}` is the badge name.
pub fn unlock_templates(kind: BadgeType) -> [&'static str; 2] {
  match kind {
    BadgeType::Pronunciation => [
      "Parabéns! Você desbloqueou \"{name}\"! 🎉",
      "Incrível! Você conquistou \"{name}\"! 🌟",
    ],
    BadgeType::Consistency => [
      "Fantástico! Você é consistente! \"{name}\" desbloqueado! 💪",
      "Que dedicação! \"{name}\" é seu! ✨",
    ],
    BadgeType::Progress => [
      "Que progresso! \"{name}\" desbloqueado! 🚀",
      "Você está melhorando muito! \"{name}\" conquistado! 📈",
    ],
    BadgeType::Streak => [
      "Que ritmo! \"{name}\" desbloqueado! 🔥",
      "Você é apaixonado por aprender! \"{name}\" é seu! ❤️",
    ],
    BadgeType::Achievement => [
      "Que conquista! \"{name}\" desbloqueado! 👑",
      "Você é um campeão! \"{name}\" conquistado! 🏆",
    ],
    BadgeType::Special => [
      "Que especial! \"{name}\" desbloqueado! 🎊",
      "Você descobriu um badge secreto! \"{name}\"! 🎁",
    ],
  }
}

/// Pick one template uniformly with the caller's randomness source.
pub fn unlock_message<R: Rng + ?Sized>(badge: &Badge, rng: &mut R) -> String {
  let templates = unlock_templates(badge.kind);
  let tpl = templates[rng.gen_range(0..templates.len())];
  crate::util::fill_template(tpl, &[("name", badge.name)])
}

fn badge(
  id: &'static str,
  name: &'static str,
  description: &'static str,
  icon: &'static str,
  kind: BadgeType,
  requirement: &'static str,
  rule: UnlockRule,
) -> Badge {
  let color = match kind {
    BadgeType::Pronunciation => "bg-blue-100",
    BadgeType::Consistency => "bg-yellow-100",
    BadgeType::Progress => "bg-green-100",
    BadgeType::Streak => "bg-red-100",
    BadgeType::Achievement => "bg-purple-100",
    BadgeType::Special => "bg-orange-100",
  };
  Badge { id, name, description, icon, kind, color, requirement, rule, progress: None }
}

pub fn builtin_badges() -> Vec<Badge> {
  use BadgeType::*;
  use UnlockRule::*;

  vec![
    badge("first_attempt", "Primeiro Passo", "Complete sua primeira tentativa de pronúncia", "🎤",
      Pronunciation, "1 tentativa", AttemptsAtLeast(1)),
    badge("ten_attempts", "Praticante", "Complete 10 tentativas de pronúncia", "🎯",
      Pronunciation, "10 tentativas", AttemptsAtLeast(10)),
    badge("fifty_attempts", "Dedicado", "Complete 50 tentativas de pronúncia", "💪",
      Pronunciation, "50 tentativas", AttemptsAtLeast(50)),
    badge("hundred_attempts", "Mestre da Pronúncia", "Complete 100 tentativas de pronúncia", "👑",
      Pronunciation, "100 tentativas", AttemptsAtLeast(100)),
    badge("perfect_five", "Perfeição", "Obtenha 95% ou mais em 5 tentativas", "⭐",
      Consistency, "5 scores >= 95%", PerfectScoresAtLeast(5)),
    badge("excellent_ten", "Excelência", "Obtenha 85% ou mais em 10 tentativas", "✨",
      Consistency, "10 scores >= 85%", ExcellentScoresAtLeast(10)),
    badge("consistent_performer", "Consistente", "Mantenha uma média de 80% ou mais em 20 tentativas", "📈",
      Consistency, "Média >= 80% em 20 tentativas", AverageAtLeast { attempts: 20, average: 80.0 }),
    badge("improvement_jump", "Salto de Progresso", "Melhore 20 pontos em relação à tentativa anterior", "🚀",
      Progress, "Melhoria de 20 pontos", Reserved),
    badge("steady_improvement", "Melhoria Constante", "Melhore progressivamente por 5 dias seguidos", "📊",
      Progress, "5 dias de melhoria", Reserved),
    badge("doubled_score", "Dobro", "Dobre seu score em uma palavra", "2️⃣",
      Progress, "Score dobrado", Reserved),
    badge("three_day_streak", "Streak Romântico 3 Dias", "Pratique 3 dias seguidos", "🔥",
      Streak, "3 dias consecutivos", CurrentStreakAtLeast(3)),
    badge("seven_day_streak", "Streak Romântico 7 Dias", "Pratique 7 dias seguidos", "❤️",
      Streak, "7 dias consecutivos", CurrentStreakAtLeast(7)),
    badge("thirty_day_streak", "Mês Apaixonado", "Pratique 30 dias seguidos", "💕",
      Streak, "30 dias consecutivos", LongestStreakAtLeast(30)),
    badge("vocabulary_master", "Mestre do Vocabulário", "Pratique 50 palavras diferentes", "📚",
      Achievement, "50 palavras únicas", UniqueWordsAtLeast(50)),
    badge("date_night_fluent", "Fluência no Date Night", "Obtenha 90% em todas as palavras do módulo Dating", "💑",
      Achievement, "90% em Dating module", Reserved),
    badge("conversation_ready", "Pronto para Conversar", "Complete todos os módulos com 80% ou mais", "💬",
      Achievement, "80% em todos os módulos", Reserved),
    badge("early_bird", "Madrugador", "Pratique entre 5h e 7h da manhã", "🌅",
      Special, "Praticar de manhã cedo", Reserved),
    badge("night_owl", "Coruja Noturna", "Pratique entre 22h e 23h59", "🌙",
      Special, "Praticar à noite", Reserved),
    badge("weekend_warrior", "Guerreiro de Fim de Semana", "Pratique sábado e domingo", "⚔️",
      Special, "Praticar no fim de semana", Reserved),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn catalog() -> BadgeCatalog {
    BadgeCatalog::builtin().expect("builtin catalog is valid")
  }

  fn ids(badges: &[Badge]) -> Vec<&'static str> {
    badges.iter().map(|b| b.id).collect()
  }

  fn progress(total_attempts: u32, average_score: f64, current_streak: u32) -> MilestoneProgress {
    MilestoneProgress { total_attempts, average_score, current_streak, longest_streak: current_streak, ..Default::default() }
  }

  #[test]
  fn empty_progress_unlocks_nothing() {
    assert!(catalog().unlocked_badges(&MilestoneProgress::default()).is_empty());
  }

  #[test]
  fn twelve_attempts_four_day_streak() {
    let p = MilestoneProgress {
      total_attempts: 12,
      average_score: 82.0,
      current_streak: 4,
      longest_streak: 4,
      unique_words: 8,
      ..Default::default()
    };
    assert_eq!(ids(&catalog().unlocked_badges(&p)), vec!["first_attempt", "ten_attempts", "three_day_streak"]);
  }

  #[test]
  fn consistent_performer_needs_twenty_attempts() {
    let c = catalog();
    assert!(ids(&c.unlocked_badges(&progress(25, 85.0, 0))).contains(&"consistent_performer"));
    assert!(!ids(&c.unlocked_badges(&progress(19, 99.0, 0))).contains(&"consistent_performer"));
    assert!(!ids(&c.unlocked_badges(&progress(40, 79.9, 0))).contains(&"consistent_performer"));
  }

  #[test]
  fn every_evaluated_rule_fires_at_its_threshold() {
    let p = MilestoneProgress {
      total_attempts: 100,
      average_score: 80.0,
      perfect_scores: 5,
      excellent_scores: 10,
      current_streak: 7,
      longest_streak: 30,
      unique_words: 50,
      ..Default::default()
    };
    assert_eq!(
      ids(&catalog().unlocked_badges(&p)),
      vec![
        "first_attempt",
        "ten_attempts",
        "fifty_attempts",
        "hundred_attempts",
        "perfect_five",
        "excellent_ten",
        "consistent_performer",
        "three_day_streak",
        "seven_day_streak",
        "thirty_day_streak",
        "vocabulary_master",
      ]
    );
  }

  #[test]
  fn reserved_badges_never_unlock() {
    let maxed = MilestoneProgress {
      total_attempts: u32::MAX,
      average_score: 100.0,
      best_score: 100.0,
      current_streak: u32::MAX,
      longest_streak: u32::MAX,
      unique_words: u32::MAX,
      perfect_scores: u32::MAX,
      excellent_scores: u32::MAX,
      days_active: u32::MAX,
      ..Default::default()
    };
    let c = catalog();
    let unlocked = ids(&c.unlocked_badges(&maxed));
    for b in c.iter().filter(|b| b.is_reserved()) {
      assert!(!unlocked.contains(&b.id), "{} is reserved", b.id);
    }
    assert_eq!(unlocked.len(), 11);
  }

  #[test]
  fn evaluation_is_repeatable() {
    let c = catalog();
    let p = progress(55, 90.0, 8);
    assert_eq!(ids(&c.unlocked_badges(&p)), ids(&c.unlocked_badges(&p)));
  }

  #[test]
  fn dominating_progress_unlocks_a_superset() {
    let c = catalog();
    let samples = [0u32, 1, 3, 7, 10, 20, 30, 50, 100];
    for &a in &samples {
      for &b in &samples {
        let low = MilestoneProgress {
          total_attempts: a,
          average_score: f64::from(b.min(100)),
          current_streak: b,
          longest_streak: b,
          perfect_scores: a / 10,
          excellent_scores: a / 5,
          unique_words: a / 2,
          ..Default::default()
        };
        let high = MilestoneProgress {
          total_attempts: a * 2,
          average_score: (low.average_score + 5.0).min(100.0),
          current_streak: b + 1,
          longest_streak: b + 1,
          perfect_scores: low.perfect_scores + 1,
          excellent_scores: low.excellent_scores + 1,
          unique_words: low.unique_words + 3,
          ..Default::default()
        };
        let before: HashSet<_> = ids(&c.unlocked_badges(&low)).into_iter().collect();
        let after: HashSet<_> = ids(&c.unlocked_badges(&high)).into_iter().collect();
        assert!(before.is_subset(&after), "a={a} b={b}");
      }
    }
  }

  #[test]
  fn next_badges_start_at_the_first_tiers() {
    let next = catalog().next_badges(&progress(3, 0.0, 1));
    assert_eq!(ids(&next), vec!["ten_attempts", "three_day_streak"]);
    assert_eq!(next[0].progress, Some(30.0));
    let streak = next[1].progress.unwrap();
    assert!((streak - 100.0 / 3.0).abs() < 1e-9);
  }

  #[test]
  fn next_badges_move_up_a_tier() {
    let next = catalog().next_badges(&progress(12, 82.0, 4));
    assert_eq!(ids(&next), vec!["fifty_attempts", "seven_day_streak"]);
    assert_eq!(next[0].progress, Some(24.0));
  }

  #[test]
  fn next_badges_drop_exhausted_ladders() {
    let c = catalog();
    assert_eq!(ids(&c.next_badges(&progress(50, 0.0, 2))), vec!["three_day_streak"]);
    assert_eq!(ids(&c.next_badges(&progress(5, 0.0, 7))), vec!["ten_attempts"]);
    assert!(c.next_badges(&progress(80, 0.0, 9)).is_empty());
  }

  #[test]
  fn next_badges_are_never_already_unlocked() {
    let c = catalog();
    for attempts in 0..60 {
      for streak in 0..10 {
        let p = progress(attempts, 0.0, streak);
        let unlocked: HashSet<_> = ids(&c.unlocked_badges(&p)).into_iter().collect();
        let next = c.next_badges(&p);
        assert!(next.len() <= 3);
        assert!(next.iter().all(|b| !unlocked.contains(b.id)));
        assert!(next.iter().all(|b| b.progress.map_or(false, |v| (0.0..=100.0).contains(&v))));
      }
    }
  }

  #[test]
  fn newly_unlocked_is_a_difference_by_id() {
    let c = catalog();
    let before = c.unlocked_badges(&progress(9, 0.0, 2));
    let after = c.unlocked_badges(&progress(10, 0.0, 3));
    assert_eq!(ids(&newly_unlocked(&before, &after)), vec!["ten_attempts", "three_day_streak"]);
    assert!(newly_unlocked(&after, &after).is_empty());
    assert!(newly_unlocked(&after, &before).is_empty());
  }

  #[test]
  fn points_follow_badge_type() {
    assert_eq!(badge_points(BadgeType::Pronunciation), 10);
    assert_eq!(badge_points(BadgeType::Consistency), 15);
    assert_eq!(badge_points(BadgeType::Progress), 20);
    assert_eq!(badge_points(BadgeType::Streak), 25);
    assert_eq!(badge_points(BadgeType::Achievement), 50);
    assert_eq!(badge_points(BadgeType::Special), 100);
  }

  #[test]
  fn unlock_message_comes_from_the_type_templates() {
    let c = catalog();
    let mut rng = StdRng::seed_from_u64(7);
    for b in c.iter() {
      let expected: Vec<String> = unlock_templates(b.kind)
        .iter()
        .map(|t| t.replace("{name}", b.name))
        .collect();
      for _ in 0..8 {
        let msg = unlock_message(b, &mut rng);
        assert!(expected.contains(&msg), "unexpected message {msg}");
      }
    }
  }

  #[test]
  fn catalog_rejects_duplicate_ids_and_unknown_types() {
    let mut list = builtin_badges();
    list.push(list[0].clone());
    assert!(matches!(BadgeCatalog::new(list), Err(Error::DuplicateBadge(_))));
    assert!(matches!("legendary".parse::<BadgeType>(), Err(Error::UnknownBadgeType(_))));
    assert_eq!("streak".parse::<BadgeType>().unwrap(), BadgeType::Streak);
    assert_eq!(catalog().len(), 19);
  }
}
