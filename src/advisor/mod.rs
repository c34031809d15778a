//! Answers typed questions from the FAQ catalogue and a keyword rule table.
//!
//! A question is resolved by the first source that has an answer:
//! the remote FAQ search, the loaded FAQ list, the keyword rules and
//! finally the configured fallback.

mod config;
mod conversation;

pub use crate::advisor::config::{
    AdvisorConfig, AdvisorConfigError, KeywordRule, DEFAULT_FAQ_PREFIX_LENGTH,
    MAX_SUGGESTED_QUESTIONS,
};
pub use crate::advisor::conversation::{Conversation, Message, Speaker};

use crate::stats::record_advisor_response;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{AsRefStr, Display};
use thiserror::Error;
use tracing::debug;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FaqEntry {
    pub id: u64,
    pub pregunta: String,
    pub respuesta: String,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum FaqSearchError {
    #[error("The FAQ service is unavailable: {0}")]
    Unavailable(String),
}

/// Full-text FAQ search offered by the backend.
pub trait FaqSearch: Send + Sync {
    fn search(&self, text: &str) -> Result<Vec<FaqEntry>, FaqSearchError>;
}

/// Case-insensitive substring search over a fixed list.
pub struct StaticFaqs(pub Vec<FaqEntry>);

impl FaqSearch for StaticFaqs {
    fn search(&self, text: &str) -> Result<Vec<FaqEntry>, FaqSearchError> {
        let needle = text.to_lowercase();
        Ok(self
            .0
            .iter()
            .filter(|faq| faq.pregunta.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResponseSource {
    FaqSearch,
    LoadedFaq,
    KeywordRule,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub source: ResponseSource,
}

struct CompiledRule {
    keywords: Vec<String>,
    response: String,
}

pub struct Advisor {
    config: AdvisorConfig,
    rules: Vec<CompiledRule>,
    search: Arc<dyn FaqSearch>,
    faqs: Vec<FaqEntry>,
}

impl Advisor {
    pub fn new(
        config: AdvisorConfig,
        search: Arc<dyn FaqSearch>,
    ) -> Result<Self, AdvisorConfigError> {
        config.validate()?;
        let rules = config
            .rules
            .iter()
            .map(|rule| CompiledRule {
                keywords: rule.keywords.iter().map(|k| k.trim().to_lowercase()).collect(),
                response: rule.response.clone(),
            })
            .collect();
        Ok(Advisor {
            config,
            rules,
            search,
            faqs: vec![],
        })
    }

    pub fn greeting(&self) -> &str {
        &self.config.greeting
    }

    /// Replaces the active FAQ list used for local matching and suggestions.
    pub fn load_faqs(&mut self, faqs: Vec<FaqEntry>) {
        self.faqs = faqs;
    }

    pub fn suggested_questions(&self) -> &[FaqEntry] {
        let count = self.faqs.len().min(MAX_SUGGESTED_QUESTIONS);
        &self.faqs[..count]
    }

    /// Returns `None` for blank questions.
    pub fn respond(&self, question: &str) -> Option<Response> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        let response = self
            .search_remote(question)
            .or_else(|| self.match_loaded_faq(question))
            .or_else(|| self.match_keyword_rule(question))
            .unwrap_or_else(|| Response {
                text: self.config.fallback.clone(),
                source: ResponseSource::Fallback,
            });

        debug!(source = response.source.as_ref(), "advisor answered");
        record_advisor_response(response.source.as_ref(), &self.config.labels);
        Some(response)
    }

    fn search_remote(&self, question: &str) -> Option<Response> {
        match self.search.search(question) {
            Ok(hits) => hits.into_iter().next().map(|faq| Response {
                text: faq.respuesta,
                source: ResponseSource::FaqSearch,
            }),
            Err(err) => {
                debug!(%err, "FAQ search failed, falling back to local answers");
                None
            }
        }
    }

    fn match_loaded_faq(&self, question: &str) -> Option<Response> {
        let text = question.to_lowercase();
        self.faqs
            .iter()
            .find(|faq| {
                let asked = faq.pregunta.to_lowercase();
                let prefix: String = asked.chars().take(self.config.faq_prefix_length).collect();
                asked.contains(&text) || (!prefix.is_empty() && text.contains(&prefix))
            })
            .map(|faq| Response {
                text: faq.respuesta.clone(),
                source: ResponseSource::LoadedFaq,
            })
    }

    fn match_keyword_rule(&self, question: &str) -> Option<Response> {
        let text = question.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| text.contains(keyword)))
            .map(|rule| Response {
                text: rule.response.clone(),
                source: ResponseSource::KeywordRule,
            })
    }
}
