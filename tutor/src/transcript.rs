//! Append-only question/answer history of one session.

use serde::{Deserialize, Serialize};

/// One exchange. Created once an answer (or error text) exists; never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

/// Chronological list of turns; insertion order is display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The only mutator.
    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) -> &ChatTurn {
        self.turns.push(ChatTurn {
            question: question.into(),
            answer: answer.into(),
        });
        &self.turns[self.turns.len() - 1]
    }

    pub fn all(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
