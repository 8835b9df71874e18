// src/users/password.rs
//
// Password validation pipeline. Every rule runs against the candidate
// password (no short-circuiting) and the violations are collected in
// declaration order.

use regex::Regex;

use super::constants::{MAX_PASSWORD_LENGTH, MAX_SIMILARITY, MIN_DIGITS, MIN_PASSWORD_LENGTH};
use super::models::UserProfile;
use super::similarity::sequence_ratio;
use crate::common::{Rule, ValidationResult};

/// Composes the password rule battery and runs it against one candidate.
pub struct PasswordValidator {
    rules: Vec<Box<dyn Rule<str>>>,
}

impl PasswordValidator {
    /// Builds the default battery. The user context, when present, feeds the
    /// attribute similarity rule; without it that rule is skipped.
    pub fn new(user: Option<&UserProfile>) -> Self {
        Self {
            rules: default_rules(user),
        }
    }

    /// Replaces the default battery with a custom ordered rule list.
    pub fn with_rules(rules: Vec<Box<dyn Rule<str>>>) -> Self {
        Self { rules }
    }

    pub fn add_rule(&mut self, rule: Box<dyn Rule<str>>) {
        self.rules.push(rule);
    }

    /// Runs all rules and returns every violation found.
    ///
    /// A missing password is reported as a single violation; no rules run.
    pub fn validate(&self, password: Option<&str>) -> ValidationResult {
        let mut result = ValidationResult::new();
        let Some(password) = password else {
            result.add_violation("Password is required.");
            return result;
        };
        for rule in &self.rules {
            if let Some(message) = rule.check(password) {
                result.add_violation(message);
            }
        }
        result
    }
}

fn default_rules(user: Option<&UserProfile>) -> Vec<Box<dyn Rule<str>>> {
    vec![
        Box::new(LengthRule::new(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH)),
        Box::new(NoSpacesRule),
        Box::new(LatinRule::new()),
        Box::new(DigitRule::new(MIN_DIGITS)),
        Box::new(CaseRule::new(1, 1)),
        Box::new(CommonPasswordRule),
        Box::new(UserSimilarityRule::new(user.cloned(), MAX_SIMILARITY)),
    ]
}

pub struct LengthRule {
    min: usize,
    max: usize,
}

impl LengthRule {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Rule<str> for LengthRule {
    fn check(&self, password: &str) -> Option<String> {
        let len = password.chars().count();
        if len < self.min {
            return Some(format!(
                "Password must be at least {} characters long. Got {} instead.",
                self.min, len
            ));
        }
        if len > self.max {
            return Some(format!(
                "Password must be shorter than {} characters. Got {} instead.",
                self.max, len
            ));
        }
        None
    }
}

pub struct NoSpacesRule;

impl Rule<str> for NoSpacesRule {
    fn check(&self, password: &str) -> Option<String> {
        if password.contains(' ') {
            return Some("Password should not contain any spaces.".to_string());
        }
        None
    }
}

/// Rejects passwords containing Cyrillic characters.
///
/// The character class is a fixed business rule, not a generic ASCII check:
/// other non-latin scripts pass through untouched.
pub struct LatinRule {
    cyrillic: Regex,
}

impl LatinRule {
    pub fn new() -> Self {
        Self {
            cyrillic: Regex::new(r"[А-Яа-яІЇЁёЄєҐґ]").expect("cyrillic character class compiles"),
        }
    }
}

impl Default for LatinRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule<str> for LatinRule {
    fn check(&self, password: &str) -> Option<String> {
        if self.cyrillic.is_match(password) {
            return Some("Only latin characters allowed in password.".to_string());
        }
        None
    }
}

pub struct DigitRule {
    min_digits: usize,
}

impl DigitRule {
    pub fn new(min_digits: usize) -> Self {
        Self { min_digits }
    }
}

impl Rule<str> for DigitRule {
    fn check(&self, password: &str) -> Option<String> {
        let digits = password.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < self.min_digits {
            return Some(format!(
                "Password should contain at least {} digit.",
                self.min_digits
            ));
        }
        None
    }
}

pub struct CaseRule {
    min_upper: usize,
    min_lower: usize,
}

impl CaseRule {
    pub fn new(min_upper: usize, min_lower: usize) -> Self {
        Self {
            min_upper,
            min_lower,
        }
    }
}

impl Rule<str> for CaseRule {
    fn check(&self, password: &str) -> Option<String> {
        let upper = password.chars().filter(|c| c.is_ascii_uppercase()).count();
        let lower = password.chars().filter(|c| c.is_ascii_lowercase()).count();
        if upper < self.min_upper || lower < self.min_lower {
            return Some(format!(
                "Password must contain at least {} uppercase letter and {} lowercase letter.",
                self.min_upper, self.min_lower
            ));
        }
        None
    }
}

/// Rejects passwords found in the common-passwords reference data.
///
/// Delegates to zxcvbn: a score of 0 means the password (or a trivial
/// variation of one) sits in the ranked common-passwords dictionary.
pub struct CommonPasswordRule;

impl Rule<str> for CommonPasswordRule {
    fn check(&self, password: &str) -> Option<String> {
        match zxcvbn::zxcvbn(password, &[]) {
            Ok(estimate) if estimate.score() == 0 => Some("Password is too common.".to_string()),
            _ => None,
        }
    }
}

/// Rejects passwords too similar to the user's own profile attributes.
pub struct UserSimilarityRule {
    user: Option<UserProfile>,
    max_similarity: f64,
}

impl UserSimilarityRule {
    pub fn new(user: Option<UserProfile>, max_similarity: f64) -> Self {
        Self {
            user,
            // a threshold under 0.1 would reject nearly everything
            max_similarity: max_similarity.max(0.1),
        }
    }
}

impl Rule<str> for UserSimilarityRule {
    fn check(&self, password: &str) -> Option<String> {
        let user = self.user.as_ref()?;
        let password = password.to_lowercase();
        for (name, value) in user.attribute_values() {
            let mut parts: Vec<&str> = value
                .split(|c: char| !c.is_alphanumeric())
                .filter(|part| !part.is_empty())
                .collect();
            parts.push(value);
            for part in parts {
                if sequence_ratio(&password, &part.to_lowercase()) >= self.max_similarity {
                    return Some(format!("The password is too similar to the {}.", name));
                }
            }
        }
        None
    }
}
