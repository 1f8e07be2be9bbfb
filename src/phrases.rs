//! Motivational phrase of the day (static catalog).

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::Serialize;

use crate::domain::CefrLevel;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhraseCategory {
  Motivation,
  Love,
  Learning,
  Success,
  Friendship,
}

impl std::str::FromStr for PhraseCategory {
  type Err = crate::error::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "motivation" => Ok(Self::Motivation),
      "love" => Ok(Self::Love),
      "learning" => Ok(Self::Learning),
      "success" => Ok(Self::Success),
      "friendship" => Ok(Self::Friendship),
      other => Err(crate::error::Error::InvalidInput(format!("unknown phrase category '{}'", other))),
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct DailyPhrase {
  pub id: &'static str,
  pub english: &'static str,
  pub portuguese: &'static str,
  pub pronunciation: &'static str,
  pub meaning: &'static str,
  pub example: &'static str,
  pub difficulty: CefrLevel,
  pub category: PhraseCategory,
}

const fn phrase(
  id: &'static str,
  english: &'static str,
  portuguese: &'static str,
  pronunciation: &'static str,
  meaning: &'static str,
  example: &'static str,
  difficulty: CefrLevel,
  category: PhraseCategory,
) -> DailyPhrase {
  DailyPhrase { id, english, portuguese, pronunciation, meaning, example, difficulty, category }
}

use CefrLevel::{A1, A2, B1, B2};
use PhraseCategory::{Learning, Love, Motivation, Success};

pub static PHRASES: [DailyPhrase; 15] = [
  phrase("phrase_1", "You are doing amazing!", "Você está indo incrivelmente bem!", "You are doing amazing",
    "Elogio para alguém que está tendo um bom desempenho",
    "José, you are doing amazing in your English studies!", A1, Motivation),
  phrase("phrase_2", "Keep up the good work!", "Continue com o bom trabalho!", "Keep up the good work",
    "Encorajamento para continuar fazendo algo bem",
    "Your pronunciation is getting better. Keep up the good work!", A1, Motivation),
  phrase("phrase_3", "Every day is a new opportunity to learn.", "Cada dia é uma nova oportunidade para aprender.",
    "Every day is a new opportunity to learn", "Motivação para aproveitar cada dia para crescer",
    "Every day is a new opportunity to learn something amazing about English.", A2, Learning),
  phrase("phrase_4", "You've got this!", "Você consegue!", "You've got this", "Encorajamento simples e direto",
    "The test looks hard, but you've got this!", A1, Motivation),
  phrase("phrase_5", "Practice makes perfect.", "A prática leva à perfeição.", "Practice makes perfect",
    "Quanto mais você pratica, melhor fica",
    "Your English is improving because practice makes perfect!", A2, Learning),
  phrase("phrase_6", "Love what you do, and you'll never work a day in your life.",
    "Ame o que você faz, e nunca trabalhará um dia em sua vida.",
    "Love what you do, and you'll never work a day in your life", "Quando você ama algo, não parece trabalho",
    "I love learning English with you, so it never feels like work!", B1, Love),
  phrase("phrase_7", "Your effort today will be your success tomorrow.", "Seu esforço hoje será seu sucesso amanhã.",
    "Your effort today will be your success tomorrow", "O trabalho árduo agora resulta em sucesso futuro",
    "Your effort today will be your success tomorrow in speaking English!", B1, Success),
  phrase("phrase_8", "Don't be afraid to make mistakes. They are stepping stones to success.",
    "Não tenha medo de cometer erros. Eles são degraus para o sucesso.", "Don't be afraid to make mistakes",
    "Os erros são parte importante do aprendizado",
    "Don't be afraid to make mistakes when speaking English!", B2, Learning),
  phrase("phrase_9", "You are capable of amazing things.", "Você é capaz de coisas incríveis.",
    "You are capable of amazing things", "Reconhecimento do potencial de alguém",
    "José, you are capable of amazing things in English!", A2, Motivation),
  phrase("phrase_10", "Success is not final, failure is not fatal.", "O sucesso não é final, o fracasso não é fatal.",
    "Success is not final, failure is not fatal", "Nem o sucesso nem o fracasso definem você",
    "In learning English, success is not final, failure is not fatal.", B2, Success),
  phrase("phrase_11", "You are stronger than you think.", "Você é mais forte do que pensa.",
    "You are stronger than you think", "Você tem mais força/capacidade do que acredita",
    "When learning English, you are stronger than you think!", A2, Motivation),
  phrase("phrase_12", "The only way to do great work is to love what you do.",
    "A única forma de fazer um grande trabalho é amar o que você faz.",
    "The only way to do great work is to love what you do", "Paixão é essencial para excelência",
    "The only way to master English is to love what you do.", B2, Love),
  phrase("phrase_13", "You are braver than you believe, stronger than you seem, and smarter than you think.",
    "Você é mais corajoso do que acredita, mais forte do que parece, e mais inteligente do que pensa.",
    "You are braver than you believe", "Reconhecimento das qualidades ocultas de alguém",
    "José, you are braver than you believe when speaking English!", B2, Motivation),
  phrase("phrase_14", "Every expert was once a beginner.", "Todo especialista foi uma vez um iniciante.",
    "Every expert was once a beginner", "Todos começam do zero",
    "Every English speaker was once a beginner. Keep learning!", A2, Learning),
  phrase("phrase_15", "Your passion is your power.", "Sua paixão é seu poder.", "Your passion is your power",
    "A paixão é a fonte de força", "Your passion for learning English is your power!", B1, Love),
];

/// Same phrase all day: indexed by day of year (Jan 1 is day 1).
pub fn daily_phrase(date: NaiveDate) -> &'static DailyPhrase {
  &PHRASES[date.ordinal() as usize % PHRASES.len()]
}

pub fn random_phrase<R: Rng + ?Sized>(rng: &mut R) -> &'static DailyPhrase {
  &PHRASES[rng.gen_range(0..PHRASES.len())]
}

pub fn by_difficulty(level: CefrLevel) -> impl Iterator<Item = &'static DailyPhrase> {
  PHRASES.iter().filter(move |p| p.difficulty == level)
}

pub fn by_category(category: PhraseCategory) -> impl Iterator<Item = &'static DailyPhrase> {
  PHRASES.iter().filter(move |p| p.category == category)
}
