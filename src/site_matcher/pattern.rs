//! User-supplied site patterns for the `Regex` strategy.

use regex::{Regex, RegexBuilder};

use crate::error::{MatcherError, MatcherResult};

/// A saved identifier compiled as a case-insensitive, whole-target pattern.
///
/// Compiling is the only non-trivial cost of matching, so callers that test
/// many targets against the same record can compile once and keep this around.
#[derive(Debug, Clone)]
pub struct SitePattern {
    source: String,
    anchored: Regex,
}

impl SitePattern {
    /// Compile a saved identifier.
    ///
    /// Patterns use the `regex` crate syntax. Patterns saved for Java-style engines
    /// that rely on lookaround (`(?=...)`, `(?<!...)`) or backreferences are
    /// rejected and therefore never match.
    ///
    /// The pattern is validated on its own first, so wrapping it in anchors can
    /// never turn an invalid pattern (e.g. `)(`) into a valid one.
    pub fn compile(pattern: &str) -> MatcherResult<Self> {
        build(pattern).map_err(|err| invalid(pattern, &err))?;

        // A trailing verbose-mode comment (`(?x)foo # note`) swallows the closing
        // anchor; only then is the line ended before closing the group
        let anchored = build(&format!(r"\A(?:{})\z", pattern))
            .or_else(|_| build(&format!("\\A(?:{}\n)\\z", pattern)))
            .map_err(|err| invalid(pattern, &err))?;

        Ok(Self {
            source: pattern.to_string(),
            anchored,
        })
    }

    /// True only if the pattern matches the entire target, not a substring of it.
    pub fn is_full_match(&self, target: &str) -> bool {
        self.anchored.is_match(target)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn build(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn invalid(pattern: &str, err: &regex::Error) -> MatcherError {
    MatcherError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_only() {
        let pattern = SitePattern::compile(r"example\.com").unwrap();
        assert!(pattern.is_full_match("example.com"));
        assert!(!pattern.is_full_match("login.example.com"));
        assert!(!pattern.is_full_match("example.com/login"));
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = SitePattern::compile(r"https://(www\.)?example\.com/.*").unwrap();
        assert!(pattern.is_full_match("HTTPS://WWW.EXAMPLE.COM/Login"));
        assert!(pattern.is_full_match("https://example.com/"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        // Without grouping, `\A a|ab \z` would accept any target starting with "a"
        let pattern = SitePattern::compile("a|ab").unwrap();
        assert!(pattern.is_full_match("ab"));
        assert!(pattern.is_full_match("a"));
        assert!(!pattern.is_full_match("abc"));
    }

    #[test]
    fn test_verbose_pattern_with_trailing_comment() {
        let pattern = SitePattern::compile("(?x) foo \\. com  # saved from the login page").unwrap();
        assert!(pattern.is_full_match("FOO.com"));
        assert!(!pattern.is_full_match("foo.com.evil"));
    }

    #[test]
    fn test_plain_pattern_does_not_accept_trailing_newline() {
        let pattern = SitePattern::compile("foo").unwrap();
        assert!(pattern.is_full_match("foo"));
        assert!(!pattern.is_full_match("foo\n"));
    }

    #[test]
    fn test_lookaround_is_unsupported() {
        assert!(matches!(
            SitePattern::compile("(?=.*x).*"),
            Err(MatcherError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_patterns_are_errors() {
        for source in ["[", "(unclosed", ")(", "*"] {
            match SitePattern::compile(source) {
                Err(MatcherError::InvalidPattern { pattern, message }) => {
                    assert_eq!(pattern, source);
                    assert!(!message.is_empty());
                }
                other => panic!("expected InvalidPattern for {source:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_keeps_source() {
        let pattern = SitePattern::compile(r".*\.example\.com").unwrap();
        assert_eq!(pattern.as_str(), r".*\.example\.com");
    }
}
