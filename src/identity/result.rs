use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Valid,
    InvalidFormat,
    InvalidChecksum,
    Empty,
}

/// Outcome of validating a raw identity number.
///
/// `normalized` is only present for [`ValidationStatus::Valid`], `reason` only
/// for the other statuses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub normalized: Option<String>,
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn valid(normalized: String) -> Self {
        Self {
            status: ValidationStatus::Valid,
            normalized: Some(normalized),
            reason: None,
        }
    }

    pub fn empty() -> Self {
        Self::rejected(ValidationStatus::Empty, "this field is required")
    }

    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::rejected(ValidationStatus::InvalidFormat, reason)
    }

    pub fn invalid_checksum() -> Self {
        Self::rejected(
            ValidationStatus::InvalidChecksum,
            "the check digit does not match",
        )
    }

    fn rejected(status: ValidationStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            normalized: None,
            reason: Some(reason.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }
}
