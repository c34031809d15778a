use crate::forms::{char_len, is_blank, Field, FieldErrors, FormConfig};
use crate::stats::FormMetrics;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRecoveryForm {
    pub email: String,
    pub confirm_email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PasswordRecoveryPayload {
    pub email: String,
}

impl PasswordRecoveryForm {
    pub fn validate(&self, config: &FormConfig) -> Result<PasswordRecoveryPayload, FieldErrors> {
        let metrics = FormMetrics::new("password_recovery", &config.labels);
        let domains = &config.recovery_domains;
        let max = config.limits.email_max;
        let mut errors = FieldErrors::new();

        if is_blank(&self.email) {
            errors.add(Field::Email, "Email is required");
        } else if char_len(&self.email) > max {
            errors.add(Field::Email, format!("Email cannot exceed {max} characters"));
        } else if !domains.allows(&self.email) {
            errors.add(
                Field::Email,
                format!("Only {} addresses are allowed", domains.describe()),
            );
        }

        if is_blank(&self.confirm_email) {
            errors.add(Field::ConfirmEmail, "Email confirmation is required");
        } else if !self.email.is_empty() && self.email != self.confirm_email {
            errors.add(Field::ConfirmEmail, "Emails do not match");
        }

        metrics.record_outcome(errors.is_empty());
        errors.into_result(|| PasswordRecoveryPayload {
            email: self.email.trim().to_string(),
        })
    }
}
