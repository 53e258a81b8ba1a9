//! Contact Extractor: pulls structured contact fields out of raw resume
//! text via pattern rules. First match wins for every field; no validation
//! beyond the pattern itself. The heuristics (and their documented
//! false-positive behavior) are preserved as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

/// Generic phone pattern: optional leading `+`/`(`, a nonzero digit, then
/// at least 8 more digits/separators, ending in a digit.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\+\(]?[1-9][0-9 .\-\(\)]{8,}[0-9]").expect("phone pattern"));

static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").expect("linkedin pattern"));

static GITHUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)github\.com/[\w-]+").expect("github pattern"));

/// Placeholder name when the document has no non-blank line.
const FALLBACK_NAME: &str = "Candidate";

/// Structured contact fields. Every field is an empty string when not
/// found. Derived once per document, never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
}

/// Extracts contact fields from raw document text. Never fails: missing
/// patterns yield empty strings.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        name: first_non_blank_line(text).unwrap_or_else(|| FALLBACK_NAME.to_string()),
        email: first_match(&EMAIL_RE, text),
        phone: first_match(&PHONE_RE, text),
        linkedin: first_match(&LINKEDIN_RE, text),
        github: first_match(&GITHUB_RE, text),
    }
}

/// First non-blank line of the text, trimmed.
pub fn first_non_blank_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\n  Jane Doe\nSenior Backend Engineer\n\
        jane.doe@example.com | +41 79 555 12 34\n\
        linkedin.com/in/jane-doe | github.com/janedoe\n";

    #[test]
    fn test_extracts_all_fields() {
        let contact = extract_contact_info(RESUME);
        assert_eq!(contact.name, "Jane Doe");
        assert_eq!(contact.email, "jane.doe@example.com");
        assert_eq!(contact.phone, "+41 79 555 12 34");
        assert_eq!(contact.linkedin, "linkedin.com/in/jane-doe");
        assert_eq!(contact.github, "github.com/janedoe");
    }

    #[test]
    fn test_no_email_returns_empty_string() {
        let contact = extract_contact_info("John Smith\nno contact details here");
        assert_eq!(contact.email, "");
    }

    #[test]
    fn test_first_email_wins() {
        let contact = extract_contact_info("a@example.com then b@example.org");
        assert_eq!(contact.email, "a@example.com");
    }

    #[test]
    fn test_linkedin_is_case_insensitive() {
        let contact = extract_contact_info("see LinkedIn.com/in/Jane-Doe for details");
        assert_eq!(contact.linkedin, "LinkedIn.com/in/Jane-Doe");
    }

    #[test]
    fn test_empty_text_uses_fallback_name() {
        let contact = extract_contact_info("");
        assert_eq!(contact.name, "Candidate");
        assert_eq!(contact, ContactInfo {
            name: "Candidate".to_string(),
            ..ContactInfo::default()
        });
    }

    #[test]
    fn test_blank_lines_only_uses_fallback_name() {
        let contact = extract_contact_info("\n   \n\t\n");
        assert_eq!(contact.name, "Candidate");
    }

    #[test]
    fn test_name_is_first_non_blank_line_trimmed() {
        assert_eq!(
            first_non_blank_line("\n\n   Ada Lovelace  \nmath"),
            Some("Ada Lovelace".to_string())
        );
    }

    #[test]
    fn test_phone_requires_nine_digits() {
        let contact = extract_contact_info("call 12345 maybe");
        assert_eq!(contact.phone, "");
    }
}
