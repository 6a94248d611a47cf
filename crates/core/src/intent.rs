//! The closed intent taxonomy driving message routing.
//!
//! Every user message is classified into exactly one of these eight intents.
//! Classifier output is normalized (trim + lowercase) and matched against a
//! fixed alias table; a label outside the table is a hard classification
//! failure, never a silent default.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// One of the eight fixed classification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// The user is providing a LeetCode question to store/acknowledge.
    LeetCodeQuestion,
    /// The user wants the problem statement explained.
    QuestionExplanation,
    /// The user wants the solution strategy explained (brute-force + optimized).
    SolutionExplanation,
    /// The user wants their own explanation validated/corrected.
    UserExplanationCorrection,
    /// The user wants their stated approach/logic validated/corrected.
    UserSolutionCorrection,
    /// The user wants code written or modified for the problem.
    CodeSolution,
    /// The assistant must confirm the programming language first.
    AskingLanguage,
    /// The user wants broken code fixed so it runs.
    UserCodeCorrection,
}

impl Intent {
    /// All eight intents, in taxonomy order.
    pub const ALL: [Intent; 8] = [
        Intent::LeetCodeQuestion,
        Intent::QuestionExplanation,
        Intent::SolutionExplanation,
        Intent::UserExplanationCorrection,
        Intent::UserSolutionCorrection,
        Intent::CodeSolution,
        Intent::AskingLanguage,
        Intent::UserCodeCorrection,
    ];

    /// The canonical label string for this intent.
    pub fn as_label(&self) -> &'static str {
        match self {
            Intent::LeetCodeQuestion => "LeetCode Question",
            Intent::QuestionExplanation => "Question explanation",
            Intent::SolutionExplanation => "Solution explanation",
            Intent::UserExplanationCorrection => "User explanation correction",
            Intent::UserSolutionCorrection => "User solution correction",
            Intent::CodeSolution => "Code the solution as per user req/code correction",
            Intent::AskingLanguage => "Asking user for programming language",
            Intent::UserCodeCorrection => "User code correction",
        }
    }

    /// Normalize a raw classifier label into a canonical intent.
    ///
    /// Trims whitespace, strips a wrapping quote pair and a trailing period
    /// (minor drift models produce), lowercases, and looks the result up in
    /// the fixed alias table. Anything else is `UnrecognizedIntent`.
    pub fn parse(raw: &str) -> Result<Intent, PipelineError> {
        let mut normalized = raw.trim();
        if normalized.len() >= 2
            && (normalized.starts_with('"') && normalized.ends_with('"')
                || normalized.starts_with('\'') && normalized.ends_with('\''))
        {
            normalized = &normalized[1..normalized.len() - 1];
        }
        let normalized = normalized.trim().trim_end_matches('.').to_lowercase();

        match normalized.as_str() {
            "leetcode question" => Ok(Intent::LeetCodeQuestion),
            "question explanation" => Ok(Intent::QuestionExplanation),
            "solution explanation" => Ok(Intent::SolutionExplanation),
            "user explanation correction" => Ok(Intent::UserExplanationCorrection),
            "user solution correction" => Ok(Intent::UserSolutionCorrection),
            "code the solution as per user req/code correction" => Ok(Intent::CodeSolution),
            "asking user for programming language" => Ok(Intent::AskingLanguage),
            "user code correction" => Ok(Intent::UserCodeCorrection),
            _ => Err(PipelineError::UnrecognizedIntent {
                raw: raw.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_labels_parse_to_themselves() {
        for intent in Intent::ALL {
            assert_eq!(Intent::parse(intent.as_label()).unwrap(), intent);
        }
    }

    #[test]
    fn parse_tolerates_padding_and_case() {
        assert_eq!(
            Intent::parse("  LEETCODE QUESTION ").unwrap(),
            Intent::LeetCodeQuestion
        );
        assert_eq!(
            Intent::parse("solution Explanation.").unwrap(),
            Intent::SolutionExplanation
        );
        assert_eq!(
            Intent::parse("\"User code correction\"").unwrap(),
            Intent::UserCodeCorrection
        );
    }

    #[test]
    fn parse_rejects_out_of_taxonomy_labels() {
        let err = Intent::parse("banana").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnrecognizedIntent {
                raw: "banana".into()
            }
        );
        assert!(Intent::parse("").is_err());
        assert!(Intent::parse("question").is_err());
    }

    #[test]
    fn labels_are_distinct() {
        for a in Intent::ALL {
            for b in Intent::ALL {
                if a != b {
                    assert_ne!(a.as_label(), b.as_label());
                }
            }
        }
    }
}
