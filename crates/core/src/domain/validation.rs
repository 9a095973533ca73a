//! Input checks run by callers before handing user input to the engine.
//!
//! The engine and the state container never call these; they accept
//! whatever they are given.

use regex::Regex;
use std::sync::OnceLock;

const DOMAIN_PATTERN: &str = r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$";
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DOMAIN_PATTERN).expect("domain pattern is valid"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Single-label name plus alphabetic TLD, e.g. `example.com`.
pub fn is_valid_domain(domain: &str) -> bool {
    domain_regex().is_match(domain)
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domains() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("mytechstartup.ai"));
        assert!(is_valid_domain("My-Brand.IO"));
        assert!(is_valid_domain("abc.co"));
    }

    #[test]
    fn rejects_malformed_domains() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("ab.com"));
        assert!(!is_valid_domain("-abc.com"));
        assert!(!is_valid_domain("abc-.com"));
        assert!(!is_valid_domain("example"));
        assert!(!is_valid_domain("example.c"));
        assert!(!is_valid_domain("example.c0m"));
        assert!(!is_valid_domain("sub.example.com"));
        assert!(!is_valid_domain("exa mple.com"));
    }

    #[test]
    fn label_length_is_bounded() {
        let ok = format!("{}.com", "a".repeat(63));
        let too_long = format!("{}.com", "a".repeat(64));
        assert!(is_valid_domain(&ok));
        assert!(!is_valid_domain(&too_long));
    }

    #[test]
    fn email_check_matches_roster_addresses() {
        assert!(is_valid_email("info@technova.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("info@technova"));
        assert!(!is_valid_email("technova.com"));
    }
}
