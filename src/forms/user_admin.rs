use crate::forms::{
    char_len, check_run, check_selected, check_text, is_blank, optional_text, Field, FieldErrors,
    FormConfig, Role,
};
use crate::stats::FormMetrics;
use serde::{Deserialize, Serialize};

/// Password assigned to users an administrator creates without one.
pub const DEFAULT_NEW_USER_PASSWORD: &str = "1234";

/// Back-office user create/edit form. `id` is set when editing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub id: Option<u64>,
    pub run: String,
    pub correo: String,
    pub nombres: String,
    pub apellidos: String,
    pub rol: String,
    pub direccion: String,
    pub region_id: Option<u32>,
    pub comuna_id: Option<u32>,
    pub telefono: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub run: String,
    pub correo: String,
    pub nombres: String,
    pub apellidos: String,
    pub rol: Role,
    pub direccion: String,
    pub region_id: u32,
    pub comuna_id: u32,
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserForm {
    pub fn validate(&self, config: &FormConfig) -> Result<UserPayload, FieldErrors> {
        let metrics = FormMetrics::new("user_administration", &config.labels);
        let limits = &config.limits;
        let domains = &config.user_admin_domains;
        let mut errors = FieldErrors::new();

        let run = check_run(&mut errors, &self.run, &metrics);

        check_text(
            &mut errors,
            Field::FirstNames,
            &self.nombres,
            "Names",
            Some(limits.name_max),
        );
        check_text(
            &mut errors,
            Field::LastNames,
            &self.apellidos,
            "Surnames",
            Some(limits.name_max),
        );

        if is_blank(&self.correo) {
            errors.add(Field::Email, "Email is required");
        } else if char_len(&self.correo) > limits.email_max {
            errors.add(
                Field::Email,
                format!("Email cannot exceed {} characters", limits.email_max),
            );
        } else if !domains.allows(self.correo.trim()) {
            errors.add(
                Field::Email,
                format!("Only {} addresses are allowed", domains.describe()),
            );
        }

        let role = match self.rol.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                errors.add(Field::Role, "Select a valid user type");
                None
            }
        };

        check_text(
            &mut errors,
            Field::Address,
            &self.direccion,
            "Address",
            Some(limits.address_max),
        );
        let region_id = check_selected(&mut errors, Field::Region, self.region_id, "region");
        let comuna_id = check_selected(&mut errors, Field::Commune, self.comuna_id, "commune");

        metrics.record_outcome(errors.is_empty());
        match (run, role) {
            (Some(run), Some(rol)) if errors.is_empty() => Ok(UserPayload {
                run,
                correo: self.correo.trim().to_string(),
                nombres: self.nombres.trim().to_string(),
                apellidos: self.apellidos.trim().to_string(),
                rol,
                direccion: self.direccion.trim().to_string(),
                region_id,
                comuna_id,
                telefono: optional_text(&self.telefono),
                password: self.password_for_request(),
            }),
            _ => Err(errors),
        }
    }

    /// New users always get a password; edits only send one when it was typed.
    fn password_for_request(&self) -> Option<String> {
        if !self.password.is_empty() {
            Some(self.password.clone())
        } else if self.id.is_none() {
            Some(DEFAULT_NEW_USER_PASSWORD.to_string())
        } else {
            None
        }
    }
}
