use crate::error::{PkgupError, Result};
use regex::Regex;

/// Matches package specs that may contain shell globs (`*`, `?`, `[...]`).
///
/// Matching is anchored and case-sensitive; a spec without glob characters
/// only matches itself.
#[derive(Debug, Clone)]
pub struct SpecMatcher {
    regex: Regex,
}

impl SpecMatcher {
    pub fn new(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(PkgupError::InvalidTarget(
                "Package spec cannot be empty".to_string(),
            ));
        }

        let regex = Self::compile_glob(trimmed)?;
        Ok(Self { regex })
    }

    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// True if any of the candidate forms matches.
    pub fn matches_any<S: AsRef<str>>(&self, forms: &[S]) -> bool {
        forms.iter().any(|form| self.matches(form.as_ref()))
    }

    fn compile_glob(pattern: &str) -> Result<Regex> {
        let mut regex = String::from("^");
        let mut in_class = false;

        for ch in pattern.chars() {
            match ch {
                '[' if !in_class => {
                    in_class = true;
                    regex.push('[');
                }
                ']' if in_class => {
                    in_class = false;
                    regex.push(']');
                }
                '!' if in_class && regex.ends_with('[') => regex.push('^'),
                _ if in_class => {
                    if matches!(ch, '\\' | '[' | '&' | '~') {
                        regex.push('\\');
                    }
                    regex.push(ch);
                }
                '*' => regex.push_str(".*"),
                '?' => regex.push('.'),
                '.' | '+' | '(' | ')' | '|' | '^' | '$' | '{' | '}' | ']' | '\\' => {
                    regex.push('\\');
                    regex.push(ch);
                }
                _ => regex.push(ch),
            }
        }

        if in_class {
            return Err(PkgupError::InvalidTarget(format!(
                "Unterminated character class in spec '{}'",
                pattern
            )));
        }
        regex.push('$');

        Regex::new(&regex).map_err(|e| {
            PkgupError::InvalidTarget(format!("Invalid package spec '{}': {}", pattern, e))
        })
    }
}
