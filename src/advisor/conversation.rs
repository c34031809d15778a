use crate::advisor::{Advisor, FaqEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn now(role: Speaker, content: String) -> Self {
        Message {
            role,
            content,
            timestamp: Utc::now(),
        }
    }
}

/// Transcript of a chat session, opened with the advisor's greeting.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn start(advisor: &Advisor) -> Self {
        Conversation {
            messages: vec![Message::now(Speaker::Bot, advisor.greeting().to_string())],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Records the question and the advisor's answer. Blank questions are
    /// dropped and return `None`.
    pub fn ask(&mut self, advisor: &Advisor, question: &str) -> Option<&Message> {
        let response = advisor.respond(question)?;
        self.messages
            .push(Message::now(Speaker::User, question.trim().to_string()));
        self.messages.push(Message::now(Speaker::Bot, response.text));
        self.messages.last()
    }

    /// Suggested questions are only offered before the user has asked anything.
    pub fn suggestions<'a>(&self, advisor: &'a Advisor) -> &'a [FaqEntry] {
        if self.messages.len() <= 1 {
            advisor.suggested_questions()
        } else {
            &[]
        }
    }
}
