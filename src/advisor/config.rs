use crate::Labels;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;
use thiserror::Error;

pub const DEFAULT_FAQ_PREFIX_LENGTH: usize = 20;
pub const MAX_SUGGESTED_QUESTIONS: usize = 8;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum AdvisorConfigError {
    #[error("Keyword rule {0} has no keywords")]
    NoKeywords(usize),

    #[error("Keyword rule {0} contains an empty keyword")]
    EmptyKeyword(usize),

    #[error("Keyword rule {0} has an empty response")]
    EmptyResponse(usize),

    #[error("The fallback response must not be empty")]
    EmptyFallback,
}

/// A canned answer given when the question contains any of `keywords`.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KeywordRule {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub keywords: Vec<String>,
    pub response: String,
}

impl KeywordRule {
    pub fn new(keywords: &[&str], response: &str) -> Self {
        KeywordRule {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            response: response.to_string(),
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdvisorConfig {
    pub greeting: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub rules: Vec<KeywordRule>,

    pub fallback: String,

    /// Leading characters of a FAQ question that, when found in the user's
    /// text, select that FAQ.
    #[serde(default = "default_faq_prefix_length")]
    pub faq_prefix_length: usize,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub labels: Labels,
}

fn default_faq_prefix_length() -> usize {
    DEFAULT_FAQ_PREFIX_LENGTH
}

impl AdvisorConfig {
    pub fn new(greeting: &str, fallback: &str) -> Self {
        AdvisorConfig {
            greeting: greeting.to_string(),
            rules: vec![],
            fallback: fallback.to_string(),
            faq_prefix_length: DEFAULT_FAQ_PREFIX_LENGTH,
            labels: Labels::empty(),
        }
    }

    pub fn rule(&self, rule: KeywordRule) -> Self {
        self.mutate_clone(|x| x.rules.push(rule))
    }

    pub fn faq_prefix_length(&self, faq_prefix_length: usize) -> Self {
        self.mutate_clone(|x| x.faq_prefix_length = faq_prefix_length)
    }

    pub fn labels(&self, labels: Labels) -> Self {
        self.mutate_clone(|x| x.labels = labels)
    }

    pub fn validate(&self) -> Result<(), AdvisorConfigError> {
        if self.fallback.trim().is_empty() {
            return Err(AdvisorConfigError::EmptyFallback);
        }
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(AdvisorConfigError::NoKeywords(idx));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(AdvisorConfigError::EmptyKeyword(idx));
            }
            if rule.response.trim().is_empty() {
                return Err(AdvisorConfigError::EmptyResponse(idx));
            }
        }
        Ok(())
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}
