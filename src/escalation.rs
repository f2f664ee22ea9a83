/// Canned reply returned when a message trips the escalation check.
pub const ESCALATION_RESPONSE: &str = "I understand you'd like to speak with a human agent. \
I'm connecting you with our support team now. Please hold on while I transfer your conversation.";

/// Case-insensitive substring test of the message against each keyword,
/// true on the first match. Deliberately no stemming or scoring; the canned
/// response is tied to exactly this trigger.
pub fn is_escalation(message: &str, keywords: &[String]) -> bool {
    let message = message.to_lowercase();
    keywords
        .iter()
        .any(|kw| message.contains(&kw.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        ["human", "manager", "supervisor", "escalate"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_matches_are_case_insensitive() {
        assert!(is_escalation("I want to talk to a MANAGER", &keywords()));
        assert!(is_escalation("please EsCaLaTe this", &keywords()));
    }

    #[test]
    fn test_substring_match() {
        // "humans" contains "human"; substring semantics are intentional.
        assert!(is_escalation("do humans work here?", &keywords()));
    }

    #[test]
    fn test_no_match() {
        assert!(!is_escalation("my order never arrived", &keywords()));
        assert!(!is_escalation("", &keywords()));
    }

    #[test]
    fn test_empty_keyword_set_never_matches() {
        assert!(!is_escalation("I demand a manager", &[]));
    }
}
