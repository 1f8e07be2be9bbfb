//! Light off-day tasks for days without a scheduled session.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
  Music,
  Video,
  Podcast,
  Reading,
  Other,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct OffDayTask {
  pub id: u32,
  pub title: &'static str,
  pub description: &'static str,
  #[serde(rename = "type")]
  pub kind: TaskKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<&'static str>,
}

pub static TASKS: [OffDayTask; 6] = [
  OffDayTask {
    id: 1,
    title: "Sing along to an American classic",
    description: "Ouça uma música em inglês e cante o refrão junto",
    kind: TaskKind::Music,
    url: Some("https://www.youtube.com/results?search_query=american+classic+songs+lyrics"),
  },
  OffDayTask {
    id: 2,
    title: "Watch a short video with subtitles",
    description: "Assista a um vídeo curto com legendas em inglês",
    kind: TaskKind::Video,
    url: Some("https://www.youtube.com/results?search_query=easy+english+street+interviews"),
  },
  OffDayTask {
    id: 3,
    title: "Listen to a beginner podcast episode",
    description: "Escute um episódio de podcast para iniciantes",
    kind: TaskKind::Podcast,
    url: Some("https://www.podcastsinenglish.com/"),
  },
  OffDayTask {
    id: 4,
    title: "Read a short news story",
    description: "Leia uma notícia curta e anote três palavras novas",
    kind: TaskKind::Reading,
    url: Some("https://www.newsinlevels.com/"),
  },
  OffDayTask {
    id: 5,
    title: "Write a message to someone you love",
    description: "Escreva uma mensagem curta em inglês para alguém especial",
    kind: TaskKind::Other,
    url: None,
  },
  OffDayTask {
    id: 6,
    title: "Review your favorite phrases",
    description: "Repita em voz alta as frases que você mais gosta",
    kind: TaskKind::Other,
    url: None,
  },
];

pub fn get(id: u32) -> Option<&'static OffDayTask> {
  TASKS.iter().find(|t| t.id == id)
}

/// A task may be completed more than once; each completion is kept.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
  pub task_id: u32,
  pub completed_at: DateTime<Utc>,
}

/// Completion joined with its task, as listed for the user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTaskOut {
  #[serde(flatten)]
  pub task: OffDayTask,
  pub completed_at: DateTime<Utc>,
}
