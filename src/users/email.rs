// src/users/email.rs
//
// Email validation pipeline. A structural pre-check runs first; when it
// fails its single violation is returned and the finer-grained rules are
// skipped, since they depend on the address splitting cleanly into
// `<name>@<domain name>.<domain address>`.

use regex::Regex;

use super::constants::{
    EMAIL_SPECIAL_CHARACTERS, MAX_DOMAIN_ADDRESS_LENGTH, MIN_DOMAIN_ADDRESS_LENGTH,
};
use crate::common::{Rule, ValidationResult};

/// An address split into the parts the rules inspect.
///
/// For `user@mail.example.com`: local part `user`, domain
/// `mail.example.com`, domain name `mailexample`, domain address `com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmail {
    pub address: String,
    pub local_part: String,
    pub domain: String,
    pub domain_name: String,
    pub domain_address: String,
}

impl ParsedEmail {
    /// Splits an address whose structure already passed the pre-check.
    fn split(email: &str) -> Option<Self> {
        let (local_part, domain) = email.split_once('@')?;
        let (domain_name_raw, domain_address) = domain.rsplit_once('.')?;
        Some(Self {
            address: email.to_string(),
            local_part: local_part.to_string(),
            domain: domain.to_string(),
            domain_name: domain_name_raw.replace('.', ""),
            domain_address: domain_address.to_string(),
        })
    }
}

/// Composes the email rule battery and runs it against one address.
pub struct EmailValidator {
    structure: StructureCheck,
    rules: Vec<Box<dyn Rule<ParsedEmail>>>,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self {
            structure: StructureCheck::new(),
            rules: default_rules(),
        }
    }

    /// Runs the structural pre-check, then all remaining rules.
    ///
    /// A missing email is reported as a single violation. A structural
    /// failure is returned alone; nothing else runs on a broken address.
    pub fn validate(&self, email: Option<&str>) -> ValidationResult {
        let mut result = ValidationResult::new();
        let Some(email) = email else {
            result.add_violation("Email is required.");
            return result;
        };
        if let Some(message) = self.structure.check(email) {
            result.add_violation(message);
            return result;
        }
        let Some(parsed) = ParsedEmail::split(email) else {
            // unreachable once the structure check passed
            result.add_violation("Email structure could not be parsed.");
            return result;
        };
        for rule in &self.rules {
            if let Some(message) = rule.check(&parsed) {
                result.add_violation(message);
            }
        }
        result
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn default_rules() -> Vec<Box<dyn Rule<ParsedEmail>>> {
    vec![
        Box::new(PartCharactersRule::new(EmailPart::LocalPart)),
        Box::new(PartCharactersRule::new(EmailPart::Domain)),
        Box::new(DomainAddressRule),
        Box::new(DomainNameRule),
        Box::new(WhitelistRule::new()),
    ]
}

/// Structural pre-check: '@' count, domain dot, special-character runs.
/// Reports the first failure only.
struct StructureCheck {
    special_run: Regex,
}

impl StructureCheck {
    fn new() -> Self {
        Self {
            // two or more of - _ . in a row, between two letters
            special_run: Regex::new(r"[a-zA-Z][._-]{2,}[a-zA-Z]")
                .expect("special character run pattern compiles"),
        }
    }

    fn check(&self, email: &str) -> Option<String> {
        let at_count = email.matches('@').count();
        if at_count == 0 {
            return Some("Your email doesn't have any '@' symbol.".to_string());
        }
        if at_count > 1 {
            return Some(format!(
                "Your email has {} '@' symbols, only 1 allowed.",
                at_count
            ));
        }
        let (local_part, domain) = email.split_once('@')?;
        if domain.split('.').count() < 2 {
            return Some(
                "Domain must contain a domain name and a domain address separated by a dot."
                    .to_string(),
            );
        }
        if self.special_run.is_match(local_part) {
            return Some("Your email name contains too many special characters in a row.".to_string());
        }
        if self.special_run.is_match(domain) {
            return Some(
                "Your email domain contains too many special characters in a row.".to_string(),
            );
        }
        None
    }
}

/// Which slice of the address a character rule applies to.
#[derive(Debug, Clone, Copy)]
pub enum EmailPart {
    LocalPart,
    Domain,
}

impl EmailPart {
    fn value<'a>(&self, email: &'a ParsedEmail) -> &'a str {
        match self {
            EmailPart::LocalPart => &email.local_part,
            EmailPart::Domain => &email.domain,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            EmailPart::LocalPart => "Email name",
            EmailPart::Domain => "Email domain",
        }
    }
}

/// The part must hold at least one letter and must not start or end with a
/// special character. First failing check wins.
pub struct PartCharactersRule {
    part: EmailPart,
}

impl PartCharactersRule {
    pub fn new(part: EmailPart) -> Self {
        Self { part }
    }
}

impl Rule<ParsedEmail> for PartCharactersRule {
    fn check(&self, email: &ParsedEmail) -> Option<String> {
        character_checks(self.part.value(email), self.part.display_name())
    }
}

fn character_checks(value: &str, object_name: &str) -> Option<String> {
    if !value.chars().any(|c| c.is_alphabetic()) {
        return Some(format!(
            "{} should have at least one non-digit character.",
            object_name
        ));
    }
    let first = value.chars().next()?;
    let last = value.chars().last()?;
    if EMAIL_SPECIAL_CHARACTERS.contains(&first) || EMAIL_SPECIAL_CHARACTERS.contains(&last) {
        return Some(format!(
            "{} can't start or end with '-', '_' or '.' symbols.",
            object_name
        ));
    }
    None
}

/// Checks the last dot-segment: no digits, length in [2, 6], no specials.
pub struct DomainAddressRule;

impl Rule<ParsedEmail> for DomainAddressRule {
    fn check(&self, email: &ParsedEmail) -> Option<String> {
        let address = &email.domain_address;
        if address.chars().any(|c| c.is_ascii_digit()) {
            return Some("Domain address should not contain any digits.".to_string());
        }
        let len = address.chars().count();
        if len < MIN_DOMAIN_ADDRESS_LENGTH {
            return Some(format!(
                "Domain address should contain at least {} characters.",
                MIN_DOMAIN_ADDRESS_LENGTH
            ));
        }
        if len > MAX_DOMAIN_ADDRESS_LENGTH {
            return Some(format!(
                "Domain address should contain maximum {} characters.",
                MAX_DOMAIN_ADDRESS_LENGTH
            ));
        }
        if address.chars().any(|c| EMAIL_SPECIAL_CHARACTERS.contains(&c)) {
            return Some("Domain address should not contain any special characters.".to_string());
        }
        None
    }
}

/// Checks the domain minus its last dot-segment: the character rules above
/// plus a ban on underscores.
pub struct DomainNameRule;

impl Rule<ParsedEmail> for DomainNameRule {
    fn check(&self, email: &ParsedEmail) -> Option<String> {
        if let Some(message) = character_checks(&email.domain_name, "Email domain name") {
            return Some(message);
        }
        if email.domain_name.contains('_') {
            return Some("Domain should not contain an underscore.".to_string());
        }
        None
    }
}

/// Whole-address character whitelist.
pub struct WhitelistRule {
    allowed: Regex,
}

impl WhitelistRule {
    pub fn new() -> Self {
        Self {
            allowed: Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9._-]+$")
                .expect("email whitelist pattern compiles"),
        }
    }
}

impl Default for WhitelistRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule<ParsedEmail> for WhitelistRule {
    fn check(&self, email: &ParsedEmail) -> Option<String> {
        if !self.allowed.is_match(&email.address) {
            return Some("Email contains some unallowed special characters.".to_string());
        }
        None
    }
}
