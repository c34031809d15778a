use crate::identity::{format_identity, validate_identity, ValidationStatus};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("The identity number is empty")]
    Empty,

    #[error("The identity number is malformed: {0}")]
    InvalidFormat(String),

    #[error("The identity number check digit does not match")]
    InvalidChecksum,
}

/// A validated Chilean RUN.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    body: String,
    check_digit: char,
}

impl Run {
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let result = validate_identity(raw);
        match result.status {
            ValidationStatus::Valid => {}
            ValidationStatus::Empty => return Err(IdentityError::Empty),
            ValidationStatus::InvalidChecksum => return Err(IdentityError::InvalidChecksum),
            ValidationStatus::InvalidFormat => {
                return Err(IdentityError::InvalidFormat(
                    result.reason.unwrap_or_default(),
                ))
            }
        }

        let mut body = result.normalized.unwrap_or_default();
        match body.pop() {
            Some(check_digit) => Ok(Run { body, check_digit }),
            None => Err(IdentityError::Empty),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn check_digit(&self) -> char {
        self.check_digit
    }

    /// Body digits followed by the check character, as sent to the backend.
    pub fn normalized(&self) -> String {
        let mut normalized = self.body.clone();
        normalized.push(self.check_digit);
        normalized
    }
}

impl FromStr for Run {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Run::parse(s)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match format_identity(&self.normalized()) {
            Some(formatted) => f.write_str(&formatted),
            None => write!(f, "{}-{}", self.body, self.check_digit),
        }
    }
}

impl Serialize for Run {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized())
    }
}

impl<'de> Deserialize<'de> for Run {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Run::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn parses_and_exposes_parts() {
        let run: Run = "12.345.678-5".parse().unwrap();
        assert_eq!(run.body(), "12345678");
        assert_eq!(run.check_digit(), '5');
        assert_eq!(run.normalized(), "123456785");
        assert_eq!(run.to_string(), "12.345.678-5");
    }

    #[test]
    fn parse_errors_follow_the_status() {
        assert_eq!(Run::parse(" "), Err(IdentityError::Empty));
        assert_eq!(
            Run::parse("12345678-6"),
            Err(IdentityError::InvalidChecksum)
        );
        assert_eq!(
            Run::parse("1234567"),
            Err(IdentityError::InvalidFormat(
                "must total 8-9 characters".to_string()
            ))
        );
    }

    #[test]
    fn serializes_as_normalized_string() {
        let run = Run::parse("11.111.112-k").unwrap();
        assert_tokens(&run, &[Token::Str("11111112K")]);
    }

    #[test]
    fn deserialization_validates() {
        assert_de_tokens_error::<Run>(
            &[Token::Str("12345678-6")],
            "The identity number check digit does not match",
        );
    }
}
