//! Placement scoring: answers -> percentage -> CEFR level.
//!
//! Everything here is pure. The bank is validated once when it is built, so
//! scoring itself never fails for a non-empty bank.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::{AnswerSet, CefrLevel, PlacementResult, Question, QuestionType};
use crate::error::{Error, Result};

/// Upper bound (inclusive) of each band, lowest level first.
const CEFR_BANDS: [(u8, CefrLevel); 6] = [
  (16, CefrLevel::A1),
  (33, CefrLevel::A2),
  (50, CefrLevel::B1),
  (66, CefrLevel::B2),
  (83, CefrLevel::C1),
  (100, CefrLevel::C2),
];

/// Read-only, ordered question table with an id index.
#[derive(Clone, Debug)]
pub struct QuestionBank {
  questions: Vec<Question>,
  by_id: HashMap<String, usize>,
}

impl QuestionBank {
  pub fn new(questions: Vec<Question>) -> Result<Self> {
    if questions.is_empty() {
      return Err(Error::InvalidInput("question bank is empty".into()));
    }
    let mut by_id = HashMap::with_capacity(questions.len());
    for (idx, q) in questions.iter().enumerate() {
      validate_question(q)?;
      if by_id.insert(q.id.clone(), idx).is_some() {
        return Err(Error::InvalidQuestion { id: q.id.clone(), reason: "duplicate id".into() });
      }
    }
    Ok(Self { questions, by_id })
  }

  pub fn get(&self, id: &str) -> Option<&Question> {
    self.by_id.get(id).map(|&idx| &self.questions[idx])
  }

  pub fn len(&self) -> usize {
    self.questions.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Question> {
    self.questions.iter()
  }
}

fn validate_question(q: &Question) -> Result<()> {
  let invalid = |reason: &str| Error::InvalidQuestion { id: q.id.clone(), reason: reason.into() };
  if q.id.trim().is_empty() {
    return Err(invalid("empty id"));
  }
  if q.correct_answer.trim().is_empty() {
    return Err(invalid("empty correct answer"));
  }
  match (q.kind, &q.options) {
    (QuestionType::MultipleChoice, Some(opts)) => {
      let unique: HashSet<&String> = opts.iter().collect();
      if opts.len() < 2 || unique.len() != opts.len() {
        return Err(invalid("multiple choice needs at least two distinct options"));
      }
      if !opts.iter().any(|o| answers_match(o, &q.correct_answer)) {
        return Err(invalid("correct answer is not among the options"));
      }
    }
    (QuestionType::MultipleChoice, None) => return Err(invalid("multiple choice without options")),
    (_, Some(_)) => return Err(invalid("options are only allowed on multiple choice")),
    (_, None) => {}
  }
  Ok(())
}

/// Case-insensitive equality of both sides after trimming.
pub fn answers_match(submitted: &str, expected: &str) -> bool {
  submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Count answers equal to the bank's correct answer. Unknown ids never count.
pub fn correct_count(answers: &AnswerSet, bank: &QuestionBank) -> usize {
  answers
    .iter()
    .filter(|(id, given)| bank.get(id).map_or(false, |q| answers_match(given, &q.correct_answer)))
    .count()
}

/// `round(correct / total * 100)`, half rounded up, in exact integer arithmetic.
pub fn score(correct: usize, total: usize) -> Result<u8> {
  if total == 0 {
    return Err(Error::InvalidInput("totalQuestions must be greater than zero".into()));
  }
  if correct > total {
    return Err(Error::InvalidInput(format!("correct count {} exceeds total {}", correct, total)));
  }
  let pct = (200 * correct + total) / (2 * total);
  Ok(pct as u8)
}

/// Total over u8; anything above 100 lands in the top band.
pub fn cefr_level(score: u8) -> CefrLevel {
  CEFR_BANDS
    .iter()
    .find(|(upper, _)| score <= *upper)
    .map(|(_, level)| *level)
    .unwrap_or(CefrLevel::C2)
}

#[instrument(level = "debug", skip_all, fields(answered = answers.len(), total = bank.len()))]
pub fn evaluate(answers: &AnswerSet, bank: &QuestionBank) -> Result<PlacementResult> {
  let correct = correct_count(answers, bank);
  let score = score(correct, bank.len())?;
  let cefr_level = cefr_level(score);
  debug!(target: "progress", correct, score, %cefr_level, "Placement scored");
  Ok(PlacementResult { score, cefr_level })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seeds::seed_questions;

  fn bank() -> QuestionBank {
    QuestionBank::new(seed_questions()).expect("seed bank is valid")
  }

  fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn band_boundaries_are_exact() {
    let cases = [
      (0, CefrLevel::A1),
      (16, CefrLevel::A1),
      (17, CefrLevel::A2),
      (33, CefrLevel::A2),
      (34, CefrLevel::B1),
      (50, CefrLevel::B1),
      (51, CefrLevel::B2),
      (66, CefrLevel::B2),
      (67, CefrLevel::C1),
      (83, CefrLevel::C1),
      (84, CefrLevel::C2),
      (100, CefrLevel::C2),
    ];
    for (s, level) in cases {
      assert_eq!(cefr_level(s), level, "score {s}");
    }
  }

  #[test]
  fn bands_partition_the_whole_range() {
    let mut prev = CefrLevel::A1;
    for s in 0..=100u8 {
      let level = cefr_level(s);
      assert!(level >= prev, "levels must not go down at {s}");
      prev = level;
    }
    assert_eq!(prev, CefrLevel::C2);
  }

  #[test]
  fn score_stays_in_range_and_rounds_half_up() {
    for total in 1..=40 {
      for correct in 0..=total {
        let s = score(correct, total).unwrap();
        assert!(s <= 100);
      }
    }
    assert_eq!(score(1, 30).unwrap(), 3);
    assert_eq!(score(1, 6).unwrap(), 17);
    assert_eq!(score(33, 200).unwrap(), 17);
    assert_eq!(score(1, 8).unwrap(), 13);
    assert_eq!(score(30, 30).unwrap(), 100);
  }

  #[test]
  fn score_rejects_bad_totals() {
    assert!(matches!(score(0, 0), Err(Error::InvalidInput(_))));
    assert!(matches!(score(5, 4), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn matching_ignores_case() {
    assert!(answers_match("HELLO", "hello"));
    assert!(answers_match("  Were ", "were"));
    assert!(!answers_match("wer", "were"));
  }

  #[test]
  fn unanswered_and_unknown_ids_never_count() {
    let b = bank();
    let a = answers(&[("q2", "IS"), ("q5", "are"), ("nope", "is")]);
    assert_eq!(correct_count(&a, &b), 1);
    assert_eq!(correct_count(&AnswerSet::new(), &b), 0);
  }

  #[test]
  fn single_correct_answer_places_at_a1() {
    let b = bank();
    let a = answers(&[("q1", "All of the above")]);
    assert_eq!(correct_count(&a, &b), 1);
    let r = evaluate(&a, &b).unwrap();
    assert_eq!(r, PlacementResult { score: 3, cefr_level: CefrLevel::A1 });
  }

  #[test]
  fn perfect_test_places_at_c2() {
    let b = bank();
    let a: AnswerSet = b.iter().map(|q| (q.id.clone(), q.correct_answer.to_uppercase())).collect();
    let r = evaluate(&a, &b).unwrap();
    assert_eq!(r.score, 100);
    assert_eq!(r.cefr_level, CefrLevel::C2);
  }

  #[test]
  fn bank_validation_rejects_bad_items() {
    let mut qs = seed_questions();
    qs.push(qs[0].clone());
    assert!(matches!(QuestionBank::new(qs), Err(Error::InvalidQuestion { .. })));

    let mut qs = seed_questions();
    qs[0].correct_answer = "Not an option".into();
    assert!(QuestionBank::new(qs).is_err());

    let mut qs = seed_questions();
    qs[1].options = Some(vec!["is".into(), "are".into()]);
    assert!(QuestionBank::new(qs).is_err());

    assert!(matches!(QuestionBank::new(vec![]), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn padded_bank_answers_still_validate_and_match() {
    assert!(answers_match("am", "am "));
    let mut qs = seed_questions();
    qs[0].correct_answer = format!(" {} ", qs[0].correct_answer);
    qs[1].correct_answer = format!("{} ", qs[1].correct_answer);
    let padded = QuestionBank::new(qs).expect("surrounding whitespace is not a different answer");
    assert_eq!(correct_count(&answers(&[("q1", "all of the above"), ("q2", "is")]), &padded), 2);
  }
}
