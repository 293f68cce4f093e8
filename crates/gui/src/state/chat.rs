use std::sync::mpsc::{channel, Receiver};

use shared::patch::{GenerationRequest, GenerationResponse, RoomPatch};
use shared::RoomData;

use super::room::{PatchSummary, RoomState};
use crate::remote::RemoteClient;

/// Role of a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub is_error: bool,
}

/// Design chat: free-text instructions turned into room patches
#[derive(Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub is_loading: bool,
    pub last_failed_input: Option<String>,
    rx: Option<Receiver<Result<GenerationResponse, String>>>,
}

impl ChatState {
    /// Send the current input together with the room snapshot
    pub fn send_message(&mut self, remote: &RemoteClient, room: &RoomData) {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_loading {
            return;
        }
        self.input.clear();
        self.dispatch(remote, room, text);
    }

    /// Re-send the last failed instruction
    pub fn retry(&mut self, remote: &RemoteClient, room: &RoomData) {
        if self.is_loading {
            return;
        }
        if let Some(text) = self.last_failed_input.take() {
            self.dispatch(remote, room, text);
        }
    }

    fn dispatch(&mut self, remote: &RemoteClient, room: &RoomData, text: String) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.clone(),
            is_error: false,
        });

        let (tx, rx) = channel();
        remote.post(
            "/api/openrouter",
            GenerationRequest::Decorate {
                room: room.clone(),
                instruction: text.clone(),
            },
            tx,
        );
        self.rx = Some(rx);
        self.is_loading = true;
        self.last_failed_input = Some(text);
    }

    /// Drain a finished decorate call, applying its patch to the room.
    /// A failed call leaves the room untouched and keeps the input
    /// available for retry.
    pub fn poll(&mut self, room: &mut RoomState) -> Option<PatchSummary> {
        let result = self.rx.as_ref()?.try_recv().ok()?;
        self.rx = None;
        self.is_loading = false;

        match result {
            Ok(GenerationResponse::Decorate { patch }) => {
                self.last_failed_input = None;
                let message = if patch.assistant_message.is_empty() {
                    "I've updated your room based on your request!".to_string()
                } else {
                    patch.assistant_message.clone()
                };
                let summary = room.apply_patch(patch);
                self.messages.push(ChatMessage {
                    role: ChatRole::Assistant,
                    text: message,
                    is_error: false,
                });
                Some(summary)
            }
            Ok(_) => {
                // A reply of the wrong shape counts as a failed call
                self.push_error();
                None
            }
            Err(e) => {
                tracing::warn!("decorate failed: {e}");
                self.push_error();
                None
            }
        }
    }

    fn push_error(&mut self) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: "Sorry, I had trouble processing that request.".to_string(),
            is_error: true,
        });
    }

    pub fn can_retry(&self) -> bool {
        !self.is_loading && self.last_failed_input.is_some()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.input.clear();
        self.last_failed_input = None;
    }

    /// Test hook: inject a finished decorate result without a server
    #[doc(hidden)]
    pub fn inject_result(&mut self, result: Result<RoomPatch, String>) {
        let (tx, rx) = channel();
        let _ = tx.send(result.map(|patch| GenerationResponse::Decorate { patch }));
        self.rx = Some(rx);
        self.is_loading = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_poll_applies_patch_and_records_reply() {
        let mut room = RoomState::default();
        room.add_object(fixtures::chair("chair"), 12.0);

        let mut chat = ChatState::default();
        chat.inject_result(Ok(RoomPatch {
            remove: vec!["chair".to_string()],
            assistant_message: "Removed the chair".to_string(),
            ..Default::default()
        }));

        let summary = chat.poll(&mut room).unwrap();
        assert_eq!(summary.removed, 1);
        assert!(room.object_ids().is_empty());
        assert!(!chat.is_loading);

        let last = chat.messages.last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.text, "Removed the chair");
        assert!(!last.is_error);
    }

    #[test]
    fn test_poll_failure_keeps_room_and_offers_retry() {
        let mut room = RoomState::default();
        room.add_object(fixtures::chair("chair"), 12.0);
        let version = room.version();

        let mut chat = ChatState::default();
        chat.last_failed_input = Some("add a rug".to_string());
        chat.inject_result(Err("502".to_string()));

        assert!(chat.poll(&mut room).is_none());
        assert_eq!(room.version(), version);
        assert!(chat.messages.last().unwrap().is_error);
        assert!(chat.can_retry());
    }

    #[test]
    fn test_default_assistant_message() {
        let mut room = RoomState::default();
        room.add_object(fixtures::chair("chair"), 12.0);

        let mut chat = ChatState::default();
        chat.inject_result(Ok(RoomPatch::default()));
        chat.poll(&mut room);

        assert_eq!(
            chat.messages.last().unwrap().text,
            "I've updated your room based on your request!"
        );
    }

    #[test]
    fn test_poll_without_pending_call() {
        let mut room = RoomState::default();
        let mut chat = ChatState::default();
        assert!(chat.poll(&mut room).is_none());
    }
}
