// Business constants for user input validation

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 40;
pub const MIN_DIGITS: usize = 1;
pub const MAX_SIMILARITY: f64 = 0.55;

/// Characters the email rules treat as "special" (run, start/end checks).
pub const EMAIL_SPECIAL_CHARACTERS: [char; 3] = ['-', '_', '.'];

pub const MIN_DOMAIN_ADDRESS_LENGTH: usize = 2;
pub const MAX_DOMAIN_ADDRESS_LENGTH: usize = 6;
