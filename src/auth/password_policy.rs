use serde::Serialize;

/// Special characters accepted by the strength policy. Fixed set, matching
/// what the frontend shows users.
const SPECIAL_CHARS: &[char] = &['!', '@', '#', '$', '%', '&', '*'];

const MIN_LENGTH: usize = 8;

/// Minimum score for a password to be accepted (at most one missing class).
pub const MIN_ACCEPTABLE_SCORE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordRequirements {
    pub length: bool,
    pub upper: bool,
    pub lower: bool,
    pub number: bool,
    pub special: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub requirements: PasswordRequirements,
    pub score: u8,
}

impl PasswordStrength {
    pub fn is_acceptable(&self) -> bool {
        self.score >= MIN_ACCEPTABLE_SCORE
    }
}

/// Scores a candidate password against the five character-class rules.
/// All rules are evaluated independently; the score is the count satisfied.
pub fn evaluate(password: &str) -> PasswordStrength {
    let requirements = PasswordRequirements {
        length: password.chars().count() >= MIN_LENGTH,
        upper: password.chars().any(|c| c.is_ascii_uppercase()),
        lower: password.chars().any(|c| c.is_ascii_lowercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| SPECIAL_CHARS.contains(&c)),
    };

    let score = [
        requirements.length,
        requirements.upper,
        requirements.lower,
        requirements.number,
        requirements.special,
    ]
    .iter()
    .filter(|satisfied| **satisfied)
    .count() as u8;

    PasswordStrength { requirements, score }
}
