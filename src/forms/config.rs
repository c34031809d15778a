use crate::contact::AllowedDomains;
use crate::forms::FormLimits;
use crate::Labels;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;

/// Settings shared by every form validation.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FormConfig {
    #[serde(default)]
    pub limits: FormLimits,

    #[serde(default = "AllowedDomains::password_recovery")]
    pub recovery_domains: AllowedDomains,

    #[serde(default = "AllowedDomains::user_administration")]
    pub user_admin_domains: AllowedDomains,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub labels: Labels,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            limits: FormLimits::default(),
            recovery_domains: AllowedDomains::password_recovery(),
            user_admin_domains: AllowedDomains::user_administration(),
            labels: Labels::empty(),
        }
    }
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(&self, limits: FormLimits) -> Self {
        self.mutate_clone(|x| x.limits = limits)
    }

    pub fn recovery_domains(&self, domains: AllowedDomains) -> Self {
        self.mutate_clone(|x| x.recovery_domains = domains)
    }

    pub fn user_admin_domains(&self, domains: AllowedDomains) -> Self {
        self.mutate_clone(|x| x.user_admin_domains = domains)
    }

    pub fn labels(&self, labels: Labels) -> Self {
        self.mutate_clone(|x| x.labels = labels)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_have_default() {
        let config: FormConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn null_labels_use_default() {
        let config: FormConfig = serde_json::from_str(r#"{"labels": null}"#).unwrap();
        assert_eq!(config.labels, Labels::empty());
    }

    #[test]
    fn should_override_domains() {
        let domains = AllowedDomains::new(&["example.cl"]).unwrap();
        let config = FormConfig::new().recovery_domains(domains.clone());
        assert_eq!(config.recovery_domains, domains);
        assert_eq!(
            config.user_admin_domains,
            AllowedDomains::user_administration()
        );
    }

    #[test]
    fn invalid_domain_list_fails_to_load() {
        let result = serde_json::from_str::<FormConfig>(r#"{"recovery_domains": []}"#);
        assert!(result.is_err());
    }
}
