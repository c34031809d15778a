use crate::contact::is_valid_email;
use crate::forms::{
    char_len, check_run, check_selected, check_text, is_blank, optional_text, Field, FieldErrors,
    FormConfig,
};
use crate::stats::FormMetrics;
use serde::{Deserialize, Serialize};

/// Self-service sign-up.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub run: String,
    pub correo: String,
    pub password: String,
    pub confirm_password: String,
    pub nombres: String,
    pub apellidos: String,
    pub direccion: String,
    pub region_id: Option<u32>,
    pub comuna_id: Option<u32>,
    pub telefono: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub run: String,
    pub correo: String,
    pub password: String,
    pub nombres: String,
    pub apellidos: String,
    pub direccion: String,
    pub region_id: u32,
    pub comuna_id: u32,
    pub telefono: Option<String>,
}

impl RegistrationForm {
    pub fn validate(&self, config: &FormConfig) -> Result<RegistrationPayload, FieldErrors> {
        let metrics = FormMetrics::new("registration", &config.labels);
        let limits = &config.limits;
        let mut errors = FieldErrors::new();

        let run = check_run(&mut errors, &self.run, &metrics);

        if is_blank(&self.correo) {
            errors.add(Field::Email, "Email is required");
        } else if !is_valid_email(self.correo.trim()) {
            errors.add(Field::Email, "Enter a valid email address");
        }

        if is_blank(&self.password) {
            errors.add(Field::Password, "Password is required");
        } else {
            let length = char_len(&self.password);
            if length < limits.password_min || length > limits.password_max {
                errors.add(
                    Field::Password,
                    format!(
                        "Password must be between {} and {} characters",
                        limits.password_min, limits.password_max
                    ),
                );
            }
        }

        if self.password != self.confirm_password {
            errors.add(Field::ConfirmPassword, "Passwords do not match");
        }

        check_text(&mut errors, Field::FirstNames, &self.nombres, "Names", None);
        check_text(&mut errors, Field::LastNames, &self.apellidos, "Surnames", None);
        check_text(&mut errors, Field::Address, &self.direccion, "Address", None);
        let region_id = check_selected(&mut errors, Field::Region, self.region_id, "region");
        let comuna_id = check_selected(&mut errors, Field::Commune, self.comuna_id, "commune");

        metrics.record_outcome(errors.is_empty());
        match run {
            Some(run) if errors.is_empty() => Ok(RegistrationPayload {
                run,
                correo: self.correo.trim().to_string(),
                password: self.password.clone(),
                nombres: self.nombres.trim().to_string(),
                apellidos: self.apellidos.trim().to_string(),
                direccion: self.direccion.trim().to_string(),
                region_id,
                comuna_id,
                telefono: optional_text(&self.telefono),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            run: "12.345.678-5".to_string(),
            correo: "pyme@gmail.com".to_string(),
            password: "clave1".to_string(),
            confirm_password: "clave1".to_string(),
            nombres: "Ana María".to_string(),
            apellidos: "Rojas".to_string(),
            direccion: "Av. Siempre Viva 123".to_string(),
            region_id: Some(13),
            comuna_id: Some(101),
            telefono: String::new(),
        }
    }

    #[test]
    fn produces_normalized_payload() {
        let payload = valid_form().validate(&FormConfig::default()).unwrap();
        assert_eq!(payload.run, "123456785");
        assert_eq!(payload.region_id, 13);
        assert_eq!(payload.telefono, None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap()["regionId"],
            serde_json::json!(13)
        );
    }

    #[test]
    fn uses_the_checksum_validator() {
        // well shaped, wrong check digit
        let form = RegistrationForm {
            run: "12345678-9".to_string(),
            ..valid_form()
        };
        let errors = form.validate(&FormConfig::default()).unwrap_err();
        assert_eq!(
            errors.first(),
            Some((Field::Run, "invalid RUN: the check digit does not match"))
        );
    }

    #[test]
    fn password_bounds() {
        for password in ["abc", "abcdefghijk"] {
            let form = RegistrationForm {
                password: password.to_string(),
                confirm_password: password.to_string(),
                ..valid_form()
            };
            let errors = form.validate(&FormConfig::default()).unwrap_err();
            assert_eq!(
                errors.get(Field::Password),
                Some("Password must be between 4 and 10 characters")
            );
        }

        let form = RegistrationForm {
            confirm_password: "other".to_string(),
            ..valid_form()
        };
        let errors = form.validate(&FormConfig::default()).unwrap_err();
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn first_error_is_reported_in_field_order() {
        let errors = RegistrationForm::default()
            .validate(&FormConfig::default())
            .unwrap_err();
        assert_eq!(errors.first(), Some((Field::Run, "RUN is required")));
        assert_eq!(errors.get(Field::Region), Some("select a region"));
        assert_eq!(errors.get(Field::Commune), Some("select a commune"));
        // empty password and confirmation match each other
        assert_eq!(errors.get(Field::ConfirmPassword), None);
    }
}
