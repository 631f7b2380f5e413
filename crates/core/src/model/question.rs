use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank must contain at least one question")]
    Empty,

    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error("question {0} has an empty prompt")]
    EmptyPrompt(QuestionId),

    #[error("question {0} has an empty correct answer")]
    EmptyAnswer(QuestionId),

    #[error("multiple-choice question {0} has no options")]
    MissingOptions(QuestionId),

    #[error("correct answer of question {0} is not one of its options")]
    AnswerNotInOptions(QuestionId),

    #[error("unknown question kind: {0}")]
    UnknownKind(String),
}

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// How a learner answers a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Pick one of the listed options.
    MultipleChoice,
    /// Type a short answer into a blank.
    FillBlank,
    /// Read a short story problem and type the result.
    WordProblem,
}

impl QuestionKind {
    /// Parses the kind labels used by question authors.
    ///
    /// `input` is an alias of `fill-blank` and `drag-drop` of `word-problem`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::UnknownKind` for any other label.
    pub fn parse(label: &str) -> Result<Self, QuestionBankError> {
        match label.trim() {
            "multiple-choice" => Ok(Self::MultipleChoice),
            "fill-blank" | "input" => Ok(Self::FillBlank),
            "word-problem" | "drag-drop" => Ok(Self::WordProblem),
            other => Err(QuestionBankError::UnknownKind(other.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::FillBlank => "fill-blank",
            Self::WordProblem => "word-problem",
        }
    }

    /// True when the answer is typed rather than picked.
    #[must_use]
    pub fn takes_text_input(self) -> bool {
        !matches!(self, Self::MultipleChoice)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub hint: Option<String>,
    pub topic: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: QuestionKind,
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            kind,
            prompt: prompt.into(),
            options: Vec::new(),
            correct_answer: correct_answer.into(),
            explanation: explanation.into(),
            hint: None,
            topic: None,
        }
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    #[must_use]
    pub fn has_hint(&self) -> bool {
        self.hint.as_deref().is_some_and(|h| !h.trim().is_empty())
    }

    /// Judges an answer against this question's correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answers_match(answer, &self.correct_answer)
    }

    fn validate(&self) -> Result<(), QuestionBankError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionBankError::EmptyPrompt(self.id.clone()));
        }
        if self.correct_answer.trim().is_empty() {
            return Err(QuestionBankError::EmptyAnswer(self.id.clone()));
        }
        if self.kind == QuestionKind::MultipleChoice {
            if self.options.is_empty() {
                return Err(QuestionBankError::MissingOptions(self.id.clone()));
            }
            if !self.options.iter().any(|o| self.is_correct(o)) {
                return Err(QuestionBankError::AnswerNotInOptions(self.id.clone()));
            }
        }
        Ok(())
    }
}

/// Case-insensitive comparison after trimming surrounding whitespace.
#[must_use]
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Fixed, ordered, non-empty sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    title: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Builds a bank after checking every question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` if the bank is empty, ids repeat, or a
    /// question is malformed.
    pub fn new(
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id.clone()) {
                return Err(QuestionBankError::DuplicateId(question.id.clone()));
            }
            question.validate()?;
        }
        Ok(Self {
            title: title.into(),
            questions,
        })
    }

    /// Builds a bank from content that is checked by unit tests instead of at runtime.
    pub(crate) fn from_trusted(title: &str, questions: Vec<Question>) -> Self {
        debug_assert!(!questions.is_empty());
        Self {
            title: title.to_string(),
            questions,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(id: &str) -> Question {
        Question::new(id, QuestionKind::MultipleChoice, "Pick one", "B", "Because B")
            .with_options(["A", "B", "C"])
    }

    #[test]
    fn kind_aliases_parse() {
        assert_eq!(QuestionKind::parse("input").unwrap(), QuestionKind::FillBlank);
        assert_eq!(QuestionKind::parse("drag-drop").unwrap(), QuestionKind::WordProblem);
        assert!(matches!(
            QuestionKind::parse("essay"),
            Err(QuestionBankError::UnknownKind(_))
        ));
    }

    #[test]
    fn matching_ignores_case_and_surrounding_space() {
        assert!(answers_match("  SAT ", "sat"));
        assert!(answers_match("3/4", " 3/4"));
        assert!(!answers_match("sit", "sat"));
        assert!(!answers_match("s a t", "sat"));
    }

    #[test]
    fn empty_bank_is_rejected() {
        assert_eq!(
            QuestionBank::new("Empty", Vec::new()).unwrap_err(),
            QuestionBankError::Empty
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = QuestionBank::new("Dup", vec![choice("1"), choice("1")]).unwrap_err();
        assert_eq!(err, QuestionBankError::DuplicateId(QuestionId::new("1")));
    }

    #[test]
    fn multiple_choice_must_list_the_answer() {
        let q = Question::new("1", QuestionKind::MultipleChoice, "Pick", "Z", "")
            .with_options(["A", "B"]);
        assert!(matches!(
            QuestionBank::new("Bad", vec![q]),
            Err(QuestionBankError::AnswerNotInOptions(_))
        ));
    }

    #[test]
    fn text_questions_need_no_options() {
        let q = Question::new("1", QuestionKind::FillBlank, "The cat ___", "sat", "")
            .with_hint("past tense");
        let bank = QuestionBank::new("Ok", vec![q]).unwrap();
        assert_eq!(bank.len(), 1);
        assert!(bank.get(0).unwrap().has_hint());
        assert!(bank.get(1).is_none());
    }
}
