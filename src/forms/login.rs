use crate::contact::is_valid_email;
use crate::forms::{is_blank, Field, FieldErrors, FormConfig};
use crate::stats::FormMetrics;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoginPayload {
    pub correo: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self, config: &FormConfig) -> Result<LoginPayload, FieldErrors> {
        let metrics = FormMetrics::new("login", &config.labels);
        let mut errors = FieldErrors::new();

        if is_blank(&self.email) {
            errors.add(Field::Email, "Email is required");
        } else if !is_valid_email(self.email.trim()) {
            errors.add(Field::Email, "Enter a valid email address");
        }

        if is_blank(&self.password) {
            errors.add(Field::Password, "Password is required");
        }

        metrics.record_outcome(errors.is_empty());
        errors.into_result(|| LoginPayload {
            correo: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
