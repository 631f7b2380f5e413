use learniverse_core::model::SubjectKind;
use learniverse_core::quiz::{QuizError, QuizSession};

/// Per-subject wording of the exercise page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubjectCopy {
    pub title: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,
}

impl SubjectCopy {
    #[must_use]
    pub fn for_subject(subject: SubjectKind) -> Self {
        match subject {
            SubjectKind::English => Self {
                title: "English Practice",
                correct: "Correct!",
                incorrect: "Not quite right",
            },
            SubjectKind::Math => Self {
                title: "Math Practice",
                correct: "Excellent work!",
                incorrect: "Keep trying!",
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectOption(usize),
    Type(String),
    Submit,
    ToggleHint,
    Next,
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub correct: bool,
    pub headline: &'static str,
    /// Shown only for a wrong answer.
    pub correct_answer: Option<String>,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub final_score: String,
    pub topic_line: Option<String>,
}

/// Everything the exercise page renders for the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub title: &'static str,
    pub position_label: String,
    pub score_label: String,
    pub progress_percent: u8,
    pub prompt: String,
    pub topic: Option<String>,
    pub text_input: bool,
    pub pending_answer: String,
    pub options: Vec<OptionVm>,
    pub input_locked: bool,
    pub can_submit: bool,
    pub show_hint_toggle: bool,
    pub hint_label: &'static str,
    pub hint: Option<String>,
    pub result: Option<ResultVm>,
    pub show_next: bool,
    pub can_advance: bool,
    pub completion: Option<CompletionVm>,
}

/// Owns one subject's quiz and tracks whether its completion was stored.
#[derive(Clone, Debug)]
pub struct QuizVm {
    subject: SubjectKind,
    session: QuizSession,
    persisted: bool,
    run: u64,
}

impl QuizVm {
    #[must_use]
    pub fn new(subject: SubjectKind, session: QuizSession) -> Self {
        Self {
            subject,
            session,
            persisted: false,
            run: 0,
        }
    }

    #[must_use]
    pub fn subject(&self) -> SubjectKind {
        self.subject
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Bumped on every restart; async saves tag their result with it.
    #[must_use]
    pub fn run(&self) -> u64 {
        self.run
    }

    #[must_use]
    pub fn is_current_run(&self, run: u64) -> bool {
        self.run == run
    }

    /// # Errors
    ///
    /// Returns the session's `QuizError` when the intent is not allowed in
    /// the current phase; the state is left unchanged.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<(), QuizError> {
        match intent {
            QuizIntent::SelectOption(index) => self.session.select_option(index),
            QuizIntent::Type(text) => self.session.set_answer(text),
            QuizIntent::Submit => self.session.submit_answer().map(|_| ()),
            QuizIntent::ToggleHint => self.session.toggle_hint().map(|_| ()),
            QuizIntent::Next => self.session.advance(),
            QuizIntent::Restart => {
                self.session.reset();
                self.persisted = false;
                self.run = self.run.wrapping_add(1);
                Ok(())
            }
        }
    }

    /// True once per run, when the quiz has just been completed.
    #[must_use]
    pub fn needs_persist(&self) -> bool {
        self.session.is_complete() && !self.persisted
    }

    pub fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreenVm {
        let copy = SubjectCopy::for_subject(self.subject);
        let session = &self.session;
        let question = session.current_question();
        let revealed = session.is_revealed();

        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(index, text)| OptionVm {
                index,
                letter: option_letter(index),
                text: text.clone(),
                selected: session.pending_answer() == text,
            })
            .collect();

        let result = revealed.then(|| {
            let correct = session.is_correct();
            ResultVm {
                correct,
                headline: if correct { copy.correct } else { copy.incorrect },
                correct_answer: (!correct).then(|| question.correct_answer.clone()),
                explanation: question.explanation.clone(),
            }
        });

        let completion = session.is_complete().then(|| CompletionVm {
            final_score: format!("Final Score: {}/{}", session.score(), session.len()),
            topic_line: question
                .topic
                .as_ref()
                .map(|topic| format!("Great job practicing {topic}!")),
        });

        QuizScreenVm {
            title: copy.title,
            position_label: format!("Question {} of {}", session.index() + 1, session.len()),
            score_label: format!("Score: {}/{}", session.score(), session.len()),
            progress_percent: session.progress_percent(),
            prompt: question.prompt.clone(),
            topic: question.topic.clone(),
            text_input: question.kind.takes_text_input(),
            pending_answer: session.pending_answer().to_string(),
            options,
            input_locked: revealed,
            can_submit: session.can_submit(),
            show_hint_toggle: session.can_toggle_hint(),
            hint_label: if session.is_hint_visible() {
                "Hide Hint"
            } else {
                "Show Hint"
            },
            hint: session
                .is_hint_visible()
                .then(|| question.hint.clone())
                .flatten(),
            result,
            show_next: !session.is_last(),
            can_advance: session.can_advance(),
            completion,
        }
    }
}

/// `A`, `B`, ... for option buttons.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learniverse_core::quiz::bank_for;
    use std::sync::Arc;

    fn english() -> QuizVm {
        QuizVm::new(
            SubjectKind::English,
            QuizSession::new(Arc::new(bank_for(SubjectKind::English))),
        )
    }

    #[test]
    fn fresh_screen_has_labels_and_letters() {
        let screen = english().screen();
        assert_eq!(screen.title, "English Practice");
        assert_eq!(screen.position_label, "Question 1 of 3");
        assert_eq!(screen.score_label, "Score: 0/3");
        assert_eq!(screen.progress_percent, 33);
        let letters: Vec<char> = screen.options.iter().map(|o| o.letter).collect();
        assert_eq!(letters, vec!['A', 'B', 'C', 'D']);
        assert!(!screen.can_submit);
        assert!(screen.show_hint_toggle);
        assert_eq!(screen.hint_label, "Show Hint");
    }

    #[test]
    fn wrong_answer_reveals_correct_one() {
        let mut vm = english();
        vm.apply(QuizIntent::SelectOption(0)).unwrap();
        assert!(vm.screen().options[0].selected);
        vm.apply(QuizIntent::Submit).unwrap();

        let screen = vm.screen();
        let result = screen.result.expect("result shown");
        assert!(!result.correct);
        assert_eq!(result.headline, "Not quite right");
        assert_eq!(result.correct_answer.as_deref(), Some("Joyful"));
        assert!(screen.input_locked);
        assert!(!screen.show_hint_toggle);
        assert!(screen.can_advance);
    }

    #[test]
    fn completion_needs_persist_once() {
        let mut vm = english();
        for step in 0..3 {
            let answer = vm.session().current_question().correct_answer.clone();
            vm.apply(QuizIntent::Type(answer)).unwrap();
            vm.apply(QuizIntent::Submit).unwrap();
            if step < 2 {
                assert!(!vm.needs_persist());
                vm.apply(QuizIntent::Next).unwrap();
            }
        }
        assert!(vm.needs_persist());
        let screen = vm.screen();
        assert_eq!(
            screen.completion.map(|c| c.final_score),
            Some("Final Score: 3/3".to_string())
        );
        assert!(!screen.show_next);

        vm.mark_persisted();
        assert!(!vm.needs_persist());
        assert_eq!(vm.apply(QuizIntent::Next), Err(QuizError::LastQuestion));

        vm.apply(QuizIntent::Restart).unwrap();
        assert_eq!(vm.session().score(), 0);
        assert!(!vm.needs_persist());
    }

    #[test]
    fn letters_run_past_the_alphabet_safely() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(25), 'Z');
        assert_eq!(option_letter(26), '?');
    }

    #[test]
    fn restart_retires_the_previous_run() {
        let mut vm = english();
        let first = vm.run();
        assert!(vm.is_current_run(first));

        vm.apply(QuizIntent::Restart).unwrap();
        assert!(!vm.is_current_run(first));
        assert!(vm.is_current_run(vm.run()));
    }
}
