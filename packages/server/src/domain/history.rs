//! Bounded message history.

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// Default number of messages kept in history
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Ring buffer holding the most recent messages in arrival order.
///
/// `len() <= capacity()` always holds. When an append exceeds the bound the
/// oldest entry is evicted.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl MessageHistory {
    /// Create an empty history with the default capacity (100)
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history bounded to `capacity` messages
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message as the newest entry, evicting the oldest one if the
    /// bound is exceeded. Returns the evicted message, if any.
    pub fn append(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        self.messages.push_back(message);
        if self.messages.len() > self.capacity {
            self.messages.pop_front()
        } else {
            None
        }
    }

    /// Copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}
