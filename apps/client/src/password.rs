//! Password policy: the five rules a password must satisfy before the client
//! submits it on signup, reset, or profile edit. The server re-checks; this is
//! only the pre-check that drives the requirement checklist.

use std::fmt;

use serde::Serialize;

pub const MIN_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PasswordPolicyResult {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_special_char: bool,
    pub all_satisfied: bool,
}

/// One line of the requirement checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub label: &'static str,
    pub satisfied: bool,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.satisfied { '✓' } else { '✗' };
        write!(f, "{mark} {}", self.label)
    }
}

/// Evaluates `password` against every rule. Length counts characters, not bytes.
pub fn evaluate(password: &str) -> PasswordPolicyResult {
    let has_min_length = password.chars().count() >= MIN_LENGTH;
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special_char = password.chars().any(|c| SPECIAL_CHARS.contains(c));

    PasswordPolicyResult {
        has_min_length,
        has_uppercase,
        has_lowercase,
        has_digit,
        has_special_char,
        all_satisfied: has_min_length
            && has_uppercase
            && has_lowercase
            && has_digit
            && has_special_char,
    }
}

/// Profile edits treat an empty password as "keep the current one".
/// Returns `None` in that case, otherwise the evaluation.
pub fn evaluate_optional(password: &str) -> Option<PasswordPolicyResult> {
    if password.is_empty() {
        None
    } else {
        Some(evaluate(password))
    }
}

impl PasswordPolicyResult {
    pub fn requirements(&self) -> [Requirement; 5] {
        [
            Requirement {
                label: "At least 8 characters",
                satisfied: self.has_min_length,
            },
            Requirement {
                label: "One uppercase letter",
                satisfied: self.has_uppercase,
            },
            Requirement {
                label: "One lowercase letter",
                satisfied: self.has_lowercase,
            },
            Requirement {
                label: "One number",
                satisfied: self.has_digit,
            },
            Requirement {
                label: "One special character (e.g. @, %)",
                satisfied: self.has_special_char,
            },
        ]
    }

    /// First unmet rule, checked in the same order the server checks them.
    pub fn first_violation(&self) -> Option<&'static str> {
        if !self.has_min_length {
            Some("Password must be at least 8 characters")
        } else if !self.has_uppercase {
            Some("Password must contain at least one uppercase letter")
        } else if !self.has_lowercase {
            Some("Password must contain at least one lowercase letter")
        } else if !self.has_digit {
            Some("Password must contain at least one number")
        } else if !self.has_special_char {
            Some("Password must contain at least one special character (e.g. @, %)")
        } else {
            None
        }
    }
}
