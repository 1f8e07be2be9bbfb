//! Rollup of a user's pronunciation history into a [`MilestoneProgress`].
//!
//! Always recomputed from the full attempt list; nothing is patched in place.
//! Days are UTC calendar days.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::domain::{MilestoneProgress, PronunciationAttempt};
use crate::util::word_key;

const PERFECT_SCORE: f64 = 95.0;
const EXCELLENT_SCORE: f64 = 85.0;
const MASTERED_SCORE: f64 = 90.0;

impl MilestoneProgress {
  /// `today` anchors the current streak: it survives only if the last
  /// practice day is today or yesterday.
  pub fn from_attempts(attempts: &[PronunciationAttempt], today: NaiveDate) -> Self {
    if attempts.is_empty() {
      return Self::default();
    }

    let total = attempts.len();
    let sum: f64 = attempts.iter().map(|a| a.score).sum();
    let best = attempts.iter().map(|a| a.score).fold(0.0_f64, f64::max);

    let mut seen_words = HashSet::new();
    let mut mastered_keys = HashSet::new();
    let mut words_above_90 = Vec::new();
    for a in attempts {
      let key = word_key(&a.word);
      if a.score >= MASTERED_SCORE && mastered_keys.insert(key.clone()) {
        words_above_90.push(a.word.trim().to_string());
      }
      seen_words.insert(key);
    }

    let days: BTreeSet<NaiveDate> = attempts.iter().map(|a| a.at.date_naive()).collect();
    let (current_streak, longest_streak) = streaks(&days, today);

    Self {
      total_attempts: total as u32,
      average_score: sum / total as f64,
      best_score: best,
      current_streak,
      longest_streak,
      unique_words: seen_words.len() as u32,
      perfect_scores: attempts.iter().filter(|a| a.score >= PERFECT_SCORE).count() as u32,
      excellent_scores: attempts.iter().filter(|a| a.score >= EXCELLENT_SCORE).count() as u32,
      words_above_90,
      days_active: days.len() as u32,
      last_practice_date: days.iter().next_back().copied(),
    }
  }
}

/// (current, longest) runs of consecutive days over a sorted day set.
fn streaks(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> (u32, u32) {
  let mut longest = 0u32;
  let mut run = 0u32;
  let mut prev: Option<NaiveDate> = None;
  for &day in days {
    run = match prev {
      Some(p) if p.succ_opt() == Some(day) => run + 1,
      _ => 1,
    };
    longest = longest.max(run);
    prev = Some(day);
  }

  let current = match prev {
    Some(last) if last == today || last.succ_opt() == Some(today) => run,
    _ => 0,
  };
  (current, longest)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
  }

  fn attempt(word: &str, score: f64, d: u32) -> PronunciationAttempt {
    PronunciationAttempt::new(word, score, Utc.with_ymd_and_hms(2026, 3, d, 18, 30, 0).unwrap())
  }

  #[test]
  fn empty_history_is_all_zero() {
    let p = MilestoneProgress::from_attempts(&[], day(1));
    assert_eq!(p, MilestoneProgress::default());
  }

  #[test]
  fn counts_and_averages() {
    let history = vec![
      attempt("Hello", 96.0, 1),
      attempt("hello", 88.0, 1),
      attempt("Coffee", 70.0, 2),
      attempt("water", 91.0, 2),
    ];
    let p = MilestoneProgress::from_attempts(&history, day(2));
    assert_eq!(p.total_attempts, 4);
    assert!((p.average_score - 86.25).abs() < 1e-9);
    assert_eq!(p.best_score, 96.0);
    assert_eq!(p.perfect_scores, 1);
    assert_eq!(p.excellent_scores, 3);
    assert_eq!(p.unique_words, 3);
    assert_eq!(p.words_above_90, vec!["Hello".to_string(), "water".to_string()]);
    assert_eq!(p.days_active, 2);
    assert_eq!(p.last_practice_date, Some(day(2)));
  }

  #[test]
  fn words_are_set_like() {
    let history = vec![attempt("love", 95.0, 1), attempt(" LOVE ", 99.0, 1), attempt("Love", 91.0, 2)];
    let p = MilestoneProgress::from_attempts(&history, day(2));
    assert_eq!(p.unique_words, 1);
    assert_eq!(p.words_above_90.len(), 1);
  }

  #[test]
  fn streaks_track_consecutive_days() {
    let history: Vec<_> = [1, 2, 3, 4, 8, 9, 10]
      .iter()
      .map(|&d| attempt("hi", 50.0, d))
      .collect();
    let p = MilestoneProgress::from_attempts(&history, day(10));
    assert_eq!(p.longest_streak, 4);
    assert_eq!(p.current_streak, 3);

    let p = MilestoneProgress::from_attempts(&history, day(11));
    assert_eq!(p.current_streak, 3, "yesterday keeps the streak alive");

    let p = MilestoneProgress::from_attempts(&history, day(12));
    assert_eq!(p.current_streak, 0);
    assert_eq!(p.longest_streak, 4);
  }

  #[test]
  fn unordered_history_gives_the_same_rollup() {
    let a = vec![attempt("a", 80.0, 3), attempt("b", 90.0, 1), attempt("c", 70.0, 2)];
    let mut b = a.clone();
    b.reverse();
    let pa = MilestoneProgress::from_attempts(&a, day(3));
    let pb = MilestoneProgress::from_attempts(&b, day(3));
    assert_eq!(pa.current_streak, 3);
    assert_eq!(pa.current_streak, pb.current_streak);
    assert_eq!(pa.longest_streak, pb.longest_streak);
    assert_eq!(pa.total_attempts, pb.total_attempts);
  }
}
