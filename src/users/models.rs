// User context consumed by the password similarity rule

use serde::{Deserialize, Serialize};

/// Profile fields a candidate password is compared against.
///
/// Only the fields relevant to the similarity rule are carried here; the
/// account-management layer owns the full user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Non-empty attribute values paired with their user-facing names.
    pub(crate) fn attribute_values(&self) -> Vec<(&'static str, &str)> {
        let mut values: Vec<(&'static str, &str)> = vec![("email", self.email.as_str())];
        if let Some(username) = &self.username {
            values.push(("username", username));
        }
        if let Some(first_name) = &self.first_name {
            values.push(("first name", first_name));
        }
        if let Some(last_name) = &self.last_name {
            values.push(("last name", last_name));
        }
        values.retain(|(_, value)| !value.is_empty());
        values
    }
}
