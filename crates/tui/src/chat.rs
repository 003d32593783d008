//! The assistant chat panel.
//!
//! The assistant is simulated: every message the user sends is answered,
//! after a configurable delay, with one of a handful of canned replies. The
//! delay runs on the tokio runtime and the reply comes back over a channel
//! that the app loop drains each tick.

use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// First message shown in every session.
pub const WELCOME_MESSAGE: &str = "Hi! I'm your AI assistant. I can help you plan tasks, \
suggest priorities, and answer questions about your projects. What can I help you with?";

/// Replies the assistant picks from.
pub const CANNED_REPLIES: [&str; 5] = [
    "That's a great task! I'd suggest breaking it down into smaller subtasks to make it \
more manageable. Would you like me to help with that?",
    "Based on your current workload, I'd recommend setting this as medium priority. You \
have several high-priority items already in progress.",
    "For this type of task, I'd suggest starting with research and planning before moving \
to implementation. This usually saves time in the long run.",
    "I notice you have quite a few tasks in the 'To Do' column. Would you like me to help \
prioritize them based on deadlines and importance?",
    "Great question! I'd be happy to help you think through this. Could you provide a bit \
more context about what you're trying to achieve?",
];

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// Typed by the user.
    User,
    /// Produced by the assistant.
    Assistant,
}

/// One entry of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
}

impl ChatMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Handle for a reply that has been requested but not yet delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket(u64);

impl ReplyTicket {
    /// Sequence number of the request within the session.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A delivered assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    /// The request this reply answers.
    pub ticket: ReplyTicket,
    /// Reply text.
    pub text: String,
}

/// Conversation state of the chat panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPanel {
    messages: Vec<ChatMessage>,
    input: String,
    pending: usize,
    next_ticket: u64,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanel {
    /// Creates a panel holding only the welcome message.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskflow_tui::chat::{ChatPanel, ChatRole};
    ///
    /// let chat = ChatPanel::new();
    /// assert_eq!(chat.messages().len(), 1);
    /// assert_eq!(chat.messages()[0].role, ChatRole::Assistant);
    /// assert!(!chat.is_composing());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            input: String::new(),
            pending: 0,
            next_ticket: 0,
        }
    }

    /// The conversation, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Text typed into the input line.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Number of replies still on their way.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Returns `true` while at least one reply is outstanding.
    #[must_use]
    pub const fn is_composing(&self) -> bool {
        self.pending > 0
    }

    /// Appends a character to the input line.
    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Removes the last character of the input line.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Sends the input line as a user message.
    ///
    /// Blank input is ignored. Otherwise the trimmed text is appended, the
    /// input is cleared, and a ticket for the expected reply is returned.
    pub fn send(&mut self) -> Option<ReplyTicket> {
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.pending += 1;

        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket += 1;
        debug!(ticket = ticket.id(), pending = self.pending, "chat message sent");
        Some(ticket)
    }

    /// Appends a delivered reply.
    pub fn receive_reply(&mut self, reply: AssistantReply) {
        self.messages.push(ChatMessage::assistant(reply.text));
        self.pending = self.pending.saturating_sub(1);
        debug!(ticket = reply.ticket.id(), pending = self.pending, "assistant replied");
    }
}

/// Picks a canned reply uniformly at random.
pub fn pick_reply<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CANNED_REPLIES.choose(rng).copied().unwrap_or(CANNED_REPLIES[0])
}

/// Delivers assistant replies after a delay.
#[derive(Debug)]
pub struct ReplyScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<AssistantReply>,
    rx: mpsc::UnboundedReceiver<AssistantReply>,
}

impl ReplyScheduler {
    /// Creates a scheduler that answers after `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { delay, tx, rx }
    }

    /// Delay before each reply.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules the reply for `ticket`.
    ///
    /// Outside a tokio runtime the reply is queued immediately.
    pub fn schedule(&self, ticket: ReplyTicket) {
        let reply = AssistantReply {
            ticket,
            text: pick_reply(&mut rand::rng()).to_string(),
        };
        let tx = self.tx.clone();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(ticket = ticket.id(), "no async runtime, replying without delay");
            if tx.send(reply).is_err() {
                debug!("reply channel closed");
            }
            return;
        };

        let delay = self.delay;
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(reply).is_err() {
                debug!("reply channel closed");
            }
        });
    }

    /// Returns the next delivered reply, if any, without waiting.
    pub fn try_next(&mut self) -> Option<AssistantReply> {
        self.rx.try_recv().ok()
    }
}
