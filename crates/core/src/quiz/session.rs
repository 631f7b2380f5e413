use std::sync::Arc;

use thiserror::Error;

use crate::model::{Question, QuestionBank};
use crate::progress::rounded_percent;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A quiz operation that is not available in the current state.
///
/// The session is left untouched whenever one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no answer entered")]
    EmptyAnswer,

    #[error("the result for this question is already shown")]
    AlreadyRevealed,

    #[error("submit an answer before moving on")]
    NotRevealed,

    #[error("already on the last question")]
    LastQuestion,

    #[error("this question has no hint")]
    NoHint,

    #[error("option {index} is out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the learner to pick or type an answer.
    Answering,
    /// Result and explanation are shown; the learner may advance.
    Revealed,
    /// Result of the last question is shown. Only `reset` applies.
    Complete,
}

/// Outcome of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerVerdict {
    pub correct: bool,
    /// True when this submission raised the score.
    pub credited: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Linear walk through a question bank with per-question credit tracking.
///
/// Invariant: `score <= index + 1 <= len`, and each question adds at most one
/// point, on its first correct submission.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    index: usize,
    pending_answer: String,
    revealed: bool,
    hint_visible: bool,
    score: usize,
    credited: Vec<bool>,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        let credited = vec![false; bank.len()];
        Self {
            bank,
            index: 0,
            pending_answer: String::new(),
            revealed: false,
            hint_visible: false,
            score: 0,
            credited,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        // The bank is non-empty and `index` never passes the last question.
        &self.bank.questions()[self.index]
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bank.len()
    }

    /// Always false: banks cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn pending_answer(&self) -> &str {
        &self.pending_answer
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_hint_visible(&self) -> bool {
        self.hint_visible
    }

    #[must_use]
    pub fn is_credited(&self, index: usize) -> bool {
        self.credited.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.bank.len()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match (self.revealed, self.is_last()) {
            (false, _) => QuizPhase::Answering,
            (true, false) => QuizPhase::Revealed,
            (true, true) => QuizPhase::Complete,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == QuizPhase::Complete
    }

    /// Whether the pending answer matches the current question.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.current_question().is_correct(&self.pending_answer)
    }

    /// Position through the bank, counting the current question as reached.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        rounded_percent(self.index + 1, self.bank.len())
    }

    /// Score as a rounded percentage of the bank size.
    #[must_use]
    pub fn percent_score(&self) -> u8 {
        rounded_percent(self.score, self.bank.len())
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Replaces the pending answer with typed text.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyRevealed` once the result is shown.
    pub fn set_answer(&mut self, answer: impl Into<String>) -> Result<(), QuizError> {
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }
        self.pending_answer = answer.into();
        Ok(())
    }

    /// Uses the option at `index` of the current question as the pending answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyRevealed` once the result is shown, or
    /// `QuizError::OptionOutOfRange` for an unknown option.
    pub fn select_option(&mut self, index: usize) -> Result<(), QuizError> {
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }
        let options = &self.current_question().options;
        let option = options.get(index).ok_or(QuizError::OptionOutOfRange {
            index,
            len: options.len(),
        })?;
        self.pending_answer = option.clone();
        Ok(())
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.revealed && !self.pending_answer.is_empty()
    }

    /// Judges the pending answer and reveals the result.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyRevealed` if the result is already shown, or
    /// `QuizError::EmptyAnswer` if nothing was entered.
    pub fn submit_answer(&mut self) -> Result<AnswerVerdict, QuizError> {
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }
        if self.pending_answer.is_empty() {
            return Err(QuizError::EmptyAnswer);
        }

        let correct = self.is_correct();
        self.revealed = true;

        let credited = correct && !self.credited[self.index];
        if credited {
            self.score += 1;
            self.credited[self.index] = true;
        }

        Ok(AnswerVerdict { correct, credited })
    }

    #[must_use]
    pub fn can_toggle_hint(&self) -> bool {
        !self.revealed && self.current_question().has_hint()
    }

    /// Flips hint visibility and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyRevealed` after submission, or
    /// `QuizError::NoHint` when the question defines none.
    pub fn toggle_hint(&mut self) -> Result<bool, QuizError> {
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }
        if !self.current_question().has_hint() {
            return Err(QuizError::NoHint);
        }
        self.hint_visible = !self.hint_visible;
        Ok(self.hint_visible)
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.revealed && !self.is_last()
    }

    /// Moves to the next question and clears per-question state.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRevealed` before submission, or
    /// `QuizError::LastQuestion` on the final question.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        if !self.revealed {
            return Err(QuizError::NotRevealed);
        }
        if self.is_last() {
            return Err(QuizError::LastQuestion);
        }
        self.index += 1;
        self.pending_answer.clear();
        self.revealed = false;
        self.hint_visible = false;
        Ok(())
    }

    /// Returns to the first question with a zero score.
    pub fn reset(&mut self) {
        self.index = 0;
        self.pending_answer.clear();
        self.revealed = false;
        self.hint_visible = false;
        self.score = 0;
        self.credited.iter_mut().for_each(|flag| *flag = false);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
