//! Chat messages and the snapshot published by the sequencer.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::content::Step;

/// Id of the single user message.
pub const USER_MESSAGE_ID: &str = "user-prompt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Agent,
}

/// Lifecycle of a message. Variants are declared in lifecycle order, so the
/// derived `Ord` is the order transitions must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Thinking,
    Processing,
    Streaming,
    Done,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Thinking => "thinking",
            Self::Processing => "processing",
            Self::Streaming => "streaming",
            Self::Done => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Arc<[String]>>,
    pub status: MessageStatus,
    pub show_bullets: bool,
    pub visible_bullets: usize,
}

impl ChatMessage {
    pub fn user(prompt: &str) -> Self {
        Self {
            id: USER_MESSAGE_ID.to_string(),
            kind: MessageKind::User,
            title: None,
            content: Some(prompt.to_string()),
            bullets: None,
            status: MessageStatus::Done,
            show_bullets: false,
            visible_bullets: 0,
        }
    }

    /// A fresh agent message for `step`, already in `thinking`.
    pub fn agent(index: usize, step: &Step) -> Self {
        Self {
            id: Self::agent_id(index),
            kind: MessageKind::Agent,
            title: Some(step.title.clone()),
            content: None,
            bullets: Some(Arc::clone(&step.bullets)),
            status: MessageStatus::Thinking,
            show_bullets: false,
            visible_bullets: 0,
        }
    }

    pub fn agent_id(index: usize) -> String {
        format!("agent-{}", index)
    }

    pub fn is_user(&self) -> bool {
        self.kind == MessageKind::User
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.as_ref().map_or(0, |b| b.len())
    }

    /// Bullets revealed so far.
    pub fn revealed(&self) -> &[String] {
        match &self.bullets {
            Some(bullets) if self.show_bullets => &bullets[..self.visible_bullets.min(bullets.len())],
            _ => &[],
        }
    }

    /// Move to `next`. Only forward moves are applied; returns whether the
    /// status changed.
    pub fn advance(&mut self, next: MessageStatus) -> bool {
        if next <= self.status {
            return false;
        }
        self.status = next;
        if next == MessageStatus::Streaming {
            self.show_bullets = true;
        }
        true
    }

    /// Reveal bullets up to `count`. Applied only while streaming, never
    /// shrinks and never exceeds the bullet count.
    pub fn reveal(&mut self, count: usize) -> bool {
        if self.status != MessageStatus::Streaming {
            return false;
        }
        let count = count.min(self.bullet_count());
        if count <= self.visible_bullets {
            return false;
        }
        self.visible_bullets = count;
        true
    }
}

/// Immutable view of the timeline at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunnerState {
    pub messages: Vec<ChatMessage>,
    pub is_running: bool,
    /// Step currently animating; `None` when idle.
    #[serde(serialize_with = "index_or_minus_one")]
    pub current_message_index: Option<usize>,
}

impl RunnerState {
    pub fn agent_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| !m.is_user())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Replace the message with `id` by a modified copy. Absent ids are a
    /// no-op. Returns the outcome of `update`.
    pub(crate) fn update_message<F>(&mut self, id: &str, update: F) -> bool
    where
        F: FnOnce(&mut ChatMessage) -> bool,
    {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(message) => update(message),
            None => false,
        }
    }
}

fn index_or_minus_one<S: Serializer>(index: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
    match index {
        Some(i) => s.serialize_i64(*i as i64),
        None => s.serialize_i64(-1),
    }
}
