//! Answers recorded for the active department.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Answer {
    #[default]
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

impl Answer {
    /// Options in display order; the first one is the default.
    pub const ALL: [Answer; 2] = [Answer::Yes, Answer::No];

    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "YES",
            Answer::No => "NO",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answers keyed by question text, scoped to one department's question list.
///
/// Questions the user has not touched report the default answer. Keys outside the
/// question list are rejected, so a fresh set is built on every department switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    questions: Vec<String>,
    answers: HashMap<String, Answer>,
    default: Answer,
}

impl AnswerSet {
    pub fn new(questions: Vec<String>, default: Answer) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            default,
        }
    }

    /// Record an answer for one of this department's questions.
    pub fn set(&mut self, question: &str, answer: Answer) -> Result<()> {
        if !self.questions.iter().any(|q| q == question) {
            return Err(AppError::validation(format!(
                "'{question}' is not a question of the active department"
            )));
        }
        self.answers.insert(question.to_string(), answer);
        Ok(())
    }

    /// Recorded answer, or the default for untouched questions.
    ///
    /// Returns `None` for questions outside this department.
    pub fn get(&self, question: &str) -> Option<Answer> {
        if let Some(answer) = self.answers.get(question) {
            return Some(*answer);
        }
        self.questions
            .iter()
            .any(|q| q == question)
            .then_some(self.default)
    }

    /// `(question, answer)` pairs in question-list order, defaults filled in.
    pub fn to_ordered_pairs(&self) -> Vec<(String, Answer)> {
        self.questions
            .iter()
            .map(|q| (q.clone(), self.answers.get(q).copied().unwrap_or(self.default)))
            .collect()
    }

    /// Questions without an explicit answer, in order.
    pub fn unanswered(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|q| !self.answers.contains_key(q.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Number of explicitly answered questions.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn default_answer(&self) -> Answer {
        self.default
    }
}
