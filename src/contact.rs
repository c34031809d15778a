use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Checks the `local@domain.tld` shape. It does not check that the domain exists.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum DomainListError {
    #[error("The allowed domain list must not be empty")]
    NoDomains,

    #[error("Allowed domains must not be empty strings")]
    EmptyDomain,

    #[error("Allowed domains must not contain '@': {0}")]
    InvalidDomain(String),
}

/// Email domains accepted by a form, compared case-insensitively against the
/// text after the last `@`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AllowedDomains {
    domains: Vec<String>,
}

impl AllowedDomains {
    pub fn new(domains: &[&str]) -> Result<Self, DomainListError> {
        Self::try_from(domains.iter().map(|d| d.to_string()).collect::<Vec<_>>())
    }

    /// Domains accepted when requesting a password reset.
    pub fn password_recovery() -> Self {
        Self::from_static(&["duoc.cl", "profesor.duoc.cl", "gmail.com"])
    }

    /// Domains accepted when an administrator creates or edits a user.
    // Broader than the recovery list; the two have not been reconciled.
    pub fn user_administration() -> Self {
        Self::from_static(&[
            "duocuc.cl",
            "duoc.cl",
            "profesor.duoc.cl",
            "gmail.com",
            "hotmail.com",
        ])
    }

    fn from_static(domains: &[&str]) -> Self {
        AllowedDomains {
            domains: domains.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn allows(&self, email: &str) -> bool {
        match email.rfind('@') {
            Some(at) => {
                let domain = email[at + 1..].to_lowercase();
                self.domains.iter().any(|allowed| *allowed == domain)
            }
            None => false,
        }
    }

    /// Human readable list, e.g. `@duoc.cl, @profesor.duoc.cl or @gmail.com`.
    pub fn describe(&self) -> String {
        let mut names: Vec<String> = self.domains.iter().map(|d| format!("@{d}")).collect();
        match names.pop() {
            Some(last) if names.is_empty() => last,
            Some(last) => format!("{} or {}", names.join(", "), last),
            None => String::new(),
        }
    }
}

impl TryFrom<Vec<String>> for AllowedDomains {
    type Error = DomainListError;

    fn try_from(domains: Vec<String>) -> Result<Self, Self::Error> {
        if domains.is_empty() {
            return Err(DomainListError::NoDomains);
        }
        let mut normalized = Vec::with_capacity(domains.len());
        for domain in domains {
            let domain = domain.trim().to_lowercase();
            if domain.is_empty() {
                return Err(DomainListError::EmptyDomain);
            }
            if domain.contains('@') {
                return Err(DomainListError::InvalidDomain(domain));
            }
            normalized.push(domain);
        }
        Ok(AllowedDomains {
            domains: normalized,
        })
    }
}

impl From<AllowedDomains> for Vec<String> {
    fn from(value: AllowedDomains) -> Self {
        value.domains
    }
}
