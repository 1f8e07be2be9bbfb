//! WebSocket upgrade + message loop for the chat practice screen. Each client
//! message is parsed as JSON and forwarded to core logic. We reply with a
//! single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::domain::CefrLevel;
use crate::logic;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "fluentusa", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state), fields(conn = %Uuid::new_v4()))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "fluentusa", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "fluentusa", kind = kind_of(&incoming), "WS received");
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "fluentusa", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "fluentusa", "WebSocket disconnected");
}

fn kind_of(msg: &ClientWsMessage) -> &'static str {
  match msg {
    ClientWsMessage::Ping => "ping",
    ClientWsMessage::StartLesson { .. } => "start_lesson",
    ClientWsMessage::ChatMessage { .. } => "chat_message",
    ClientWsMessage::SpeechToText { .. } => "speech_to_text",
  }
}

/// One request, one reply. Failures become `error` frames; the socket stays open.
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartLesson { module_id, lesson_number, user_id } => {
      let level = match user_id.as_deref() {
        Some(user) => logic::level_for(state, user).await,
        None => CefrLevel::A1,
      };
      match logic::start_lesson_chat(state, module_id, lesson_number, level).await {
        Ok(text) => {
          info!(target: "fluentusa", module_id, lesson_number, level = %level, "WS lesson greeting served");
          ServerWsMessage::Greeting { text }
        }
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::ChatMessage { text, history } => {
      let text = logic::tutor_reply(state, &text, &history).await;
      ServerWsMessage::TeacherReply { text }
    }

    ClientWsMessage::SpeechToText { audio_base64, mime } => {
      match logic::transcribe(state, &audio_base64, &mime).await {
        Ok(text) => ServerWsMessage::SpeechToText { text },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn ping_and_offline_chat() {
    let state = AppState::for_tests();
    let pong = serde_json::to_value(handle_client_ws(ClientWsMessage::Ping, &state).await).unwrap();
    assert_eq!(pong, serde_json::json!({ "type": "pong" }));

    let msg: ClientWsMessage = serde_json::from_str(
      r#"{"type":"chat_message","text":"I go to beach yesterday","history":[{"role":"assistant","content":"Hi!"}]}"#,
    )
    .unwrap();
    match handle_client_ws(msg, &state).await {
      ServerWsMessage::TeacherReply { text } => assert_eq!(text, state.prompts.fallback_reply),
      other => panic!("unexpected reply: {:?}", other),
    }
  }

  #[tokio::test]
  async fn bad_lesson_becomes_error_frame() {
    let state = AppState::for_tests();
    let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"start_lesson","moduleId":42,"lessonNumber":1}"#).unwrap();
    let reply = serde_json::to_value(handle_client_ws(msg, &state).await).unwrap();
    assert_eq!(reply["type"], "error");
  }

  #[tokio::test]
  async fn start_lesson_accepts_a_user_id() {
    let state = AppState::for_tests();
    let all = state.questions.iter().map(|q| (q.id.clone(), q.correct_answer.clone())).collect();
    logic::submit_onboarding(&state, "ana", all).await.unwrap();
    assert_eq!(logic::level_for(&state, "ana").await, CefrLevel::C2);

    let msg: ClientWsMessage =
      serde_json::from_str(r#"{"type":"start_lesson","moduleId":1,"lessonNumber":1,"userId":"ana"}"#).unwrap();
    assert!(matches!(&msg, ClientWsMessage::StartLesson { user_id: Some(u), .. } if u == "ana"));
    match handle_client_ws(msg, &state).await {
      ServerWsMessage::Greeting { text } => assert_eq!(text, state.prompts.fallback_greeting),
      other => panic!("unexpected reply: {:?}", other),
    }

    let anonymous: ClientWsMessage = serde_json::from_str(r#"{"type":"start_lesson","moduleId":1,"lessonNumber":1}"#).unwrap();
    assert!(matches!(anonymous, ClientWsMessage::StartLesson { user_id: None, .. }));
  }
}
