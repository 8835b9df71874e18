// Common validation types and traits

/// Ordered list of violation messages produced by one validation run.
///
/// An empty list means the input was accepted. Messages keep the order the
/// rules were declared in, so callers and tests see deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn add_violation(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<String> {
        self.violations
    }
}

/// A single stateless validation rule.
///
/// Each rule checks one condition and reports at most one violation.
/// Rules hold their configuration (limits, thresholds) but no per-call
/// state, so one instance can serve any number of validation runs.
pub trait Rule<T: ?Sized>: Send + Sync {
    fn check(&self, input: &T) -> Option<String>;
}
