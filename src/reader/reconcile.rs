//! Answer reconciliation between a page's suggested answer and its community vote

use crate::question::{NO_ANSWER, VoteTally};

/// Separator between the individual notes
pub const NOTE_SEPARATOR: &str = " | ";

/// The authoritative answer for a question and how it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub answer: String,
    pub notes: String,
    pub is_multi_answer: bool,
}

/// Decide the final answer for a question.
///
/// A most-voted community entry with at least one vote overrides the
/// suggested answer. Without one the suggested answer stands, and without
/// either the answer is [`NO_ANSWER`]. An empty suggestion counts as absent.
pub fn reconcile(suggested: Option<&str>, tally: Option<&VoteTally>) -> Reconciliation {
    let suggested = suggested.filter(|s| !s.is_empty() && *s != NO_ANSWER);
    let community = tally
        .and_then(VoteTally::most_voted)
        .filter(|entry| entry.vote_count > 0 && !entry.voted_answers.is_empty());

    let answer = match (community, suggested) {
        (Some(entry), _) => entry.voted_answers.clone(),
        (None, Some(s)) => s.to_string(),
        (None, None) => NO_ANSWER.to_string(),
    };

    let mut notes = Vec::new();
    if let Some(s) = suggested {
        notes.push(format!("Suggested Answer: {}", s));
    }
    if let Some(entry) = community {
        notes.push(format!(
            "Community Voted: {} ({} votes)",
            entry.voted_answers, entry.vote_count
        ));
    }

    let is_multi_answer = is_multi_answer(&answer);
    Reconciliation {
        answer,
        notes: notes.join(NOTE_SEPARATOR),
        is_multi_answer,
    }
}

/// Length heuristic: concatenated letters such as "AC" mean multiple answers.
pub fn is_multi_answer(answer: &str) -> bool {
    answer != NO_ANSWER && answer.chars().count() > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::VoteEntry;

    fn tally(voted_answers: &str, vote_count: u64, is_most_voted: bool) -> VoteTally {
        VoteTally {
            entries: vec![VoteEntry {
                voted_answers: voted_answers.to_string(),
                vote_count,
                is_most_voted,
            }],
        }
    }

    #[test]
    fn test_community_vote_overrides_suggestion() {
        let result = reconcile(Some("A"), Some(&tally("B", 5, true)));
        assert_eq!(result.answer, "B");
        assert_eq!(
            result.notes,
            "Suggested Answer: A | Community Voted: B (5 votes)"
        );
        assert!(!result.is_multi_answer);
    }

    #[test]
    fn test_suggestion_without_tally() {
        let result = reconcile(Some("C"), None);
        assert_eq!(result.answer, "C");
        assert_eq!(result.notes, "Suggested Answer: C");
    }

    #[test]
    fn test_zero_votes_do_not_qualify() {
        let result = reconcile(Some(NO_ANSWER), Some(&tally("D", 0, true)));
        assert_eq!(result.answer, NO_ANSWER);
        assert_eq!(result.notes, "");
        assert!(!result.is_multi_answer);
    }

    #[test]
    fn test_no_signal_at_all() {
        let result = reconcile(None, None);
        assert_eq!(result.answer, NO_ANSWER);
        assert!(result.notes.is_empty());

        let result = reconcile(Some(""), Some(&tally("B", 3, false)));
        assert_eq!(result.answer, NO_ANSWER);
    }

    #[test]
    fn test_community_vote_without_suggestion() {
        let result = reconcile(None, Some(&tally("AC", 12, true)));
        assert_eq!(result.answer, "AC");
        assert_eq!(result.notes, "Community Voted: AC (12 votes)");
        assert!(result.is_multi_answer);
    }

    #[test]
    fn test_first_most_voted_entry_wins() {
        let tally = VoteTally {
            entries: vec![
                VoteEntry {
                    voted_answers: "A".to_string(),
                    vote_count: 9,
                    is_most_voted: false,
                },
                VoteEntry {
                    voted_answers: "B".to_string(),
                    vote_count: 4,
                    is_most_voted: true,
                },
                VoteEntry {
                    voted_answers: "C".to_string(),
                    vote_count: 7,
                    is_most_voted: true,
                },
            ],
        };
        assert_eq!(reconcile(Some("A"), Some(&tally)).answer, "B");
    }

    #[test]
    fn test_multi_answer_heuristic() {
        assert!(is_multi_answer("AC"));
        assert!(!is_multi_answer("A"));
        assert!(!is_multi_answer(NO_ANSWER));
        assert!(!is_multi_answer(""));
    }
}
