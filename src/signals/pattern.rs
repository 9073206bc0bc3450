use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::canonical::base_local;

/// How suspicious a local part looks, from nothing to a throwaway test value.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternSeverity {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl PatternSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for PatternSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static TEST_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(test|testing|tester|example|sample|demo|fake|dummy|asdf|foo|bar|foobar|null|user|email)[._-]?\d*$")
        .expect("test-value pattern")
});

static KEYBOARD_WALK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"qwert|asdfg|zxcvb|yxcvb|azert|qazwsx|12345|54321|abcdef")
        .expect("keyboard-walk pattern")
});

static GIBBERISH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[bcdfghjklmnpqrstvwxz]{5,}|^\d{8,}$").expect("gibberish pattern")
});

/// Classifies the (lower-cased) local part.
pub fn pattern_severity(local: &str) -> PatternSeverity {
    let local = base_local(local);
    if TEST_VALUE.is_match(local) {
        PatternSeverity::High
    } else if KEYBOARD_WALK.is_match(local) || has_run(local, 4) {
        PatternSeverity::Medium
    } else if GIBBERISH.is_match(local) {
        PatternSeverity::Low
    } else {
        PatternSeverity::None
    }
}

/// `true` when some character repeats at least `len` times in a row.
fn has_run(input: &str, len: usize) -> bool {
    let mut previous = None;
    let mut count = 0;
    for c in input.chars() {
        if Some(c) == previous {
            count += 1;
        } else {
            previous = Some(c);
            count = 1;
        }
        if count >= len {
            return true;
        }
    }
    false
}
