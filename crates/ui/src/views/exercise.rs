use dioxus::prelude::*;

use learniverse_core::model::SubjectKind;

use crate::context::{AppContext, AuthSession};
use crate::vm::{QuizIntent, QuizScreenVm, QuizVm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    SignedOut,
    Failed,
}

impl SaveState {
    fn message(self) -> Option<&'static str> {
        match self {
            SaveState::Idle => None,
            SaveState::Saving => Some("Saving your progress..."),
            SaveState::Saved => Some("Progress saved!"),
            SaveState::SignedOut => Some("Sign in to save your progress."),
            SaveState::Failed => Some("We couldn't save your progress this time."),
        }
    }
}

#[component]
pub fn EnglishView() -> Element {
    rsx! { ExerciseView { subject: SubjectKind::English } }
}

#[component]
pub fn MathView() -> Element {
    rsx! { ExerciseView { subject: SubjectKind::Math } }
}

#[component]
pub fn ExerciseView(subject: SubjectKind) -> Element {
    let ctx = use_context::<AppContext>();
    let auth = use_context::<AuthSession>();
    let mut vm = {
        let exercises = ctx.exercises();
        use_signal(move || QuizVm::new(subject, exercises.start_quiz(subject)))
    };
    let mut save_state = use_signal(|| SaveState::Idle);

    let dispatch = use_callback(move |intent: QuizIntent| {
        let restarting = intent == QuizIntent::Restart;
        if let Err(err) = vm.write().apply(intent) {
            tracing::debug!(error = %err, "quiz intent rejected");
            return;
        }
        if restarting {
            save_state.set(SaveState::Idle);
        }
        if !vm.read().needs_persist() {
            return;
        }
        vm.write().mark_persisted();

        let Some(user) = auth.user() else {
            save_state.set(SaveState::SignedOut);
            return;
        };
        let (session, run) = {
            let current = vm.read();
            (current.session().clone(), current.run())
        };
        let exercises = ctx.exercises();
        save_state.set(SaveState::Saving);
        spawn(async move {
            let result = exercises
                .complete_subject_quiz(user, subject, &session)
                .await;
            if let Err(err) = &result {
                tracing::warn!(error = %err, subject = subject.name(), "quiz result not saved");
            }
            if !vm.peek().is_current_run(run) {
                return;
            }
            save_state.set(if result.is_ok() {
                SaveState::Saved
            } else {
                SaveState::Failed
            });
        });
    });

    let screen = vm.read().screen();
    let save_message = save_state().message();
    let page_class = format!("page exercise exercise-{}", subject.slug());

    rsx! {
        div { class: "{page_class}",
            QuizHeader { screen: screen.clone(), glyph: subject.icon().glyph() }
            QuizCard { screen: screen.clone(), dispatch }
            div { class: "quiz-footer",
                button {
                    class: "btn btn-outline",
                    onclick: move |_| dispatch.call(QuizIntent::Restart),
                    "Restart Quiz"
                }
                if screen.show_next {
                    button {
                        class: "btn btn-primary",
                        disabled: !screen.can_advance,
                        onclick: move |_| dispatch.call(QuizIntent::Next),
                        "Next Question"
                    }
                } else if let Some(done) = screen.completion.as_ref() {
                    div { class: "quiz-complete",
                        div { class: "quiz-complete-title", "Quiz Complete! 🎉" }
                        div { class: "quiz-complete-score", "{done.final_score}" }
                        if let Some(line) = done.topic_line.as_ref() {
                            div { class: "muted", "{line}" }
                        }
                    }
                }
            }
            if let Some(message) = save_message {
                p { class: "save-note", "{message}" }
            }
        }
    }
}

#[component]
fn QuizHeader(screen: QuizScreenVm, glyph: &'static str) -> Element {
    rsx! {
        header { class: "quiz-header",
            div { class: "quiz-title",
                span { class: "subject-icon", "{glyph}" }
                div {
                    h1 { "{screen.title}" }
                    p { class: "muted", "{screen.position_label}" }
                }
            }
            span { class: "badge badge-outline", "{screen.score_label}" }
        }
        div { class: "progress",
            div { class: "progress-fill", style: "width: {screen.progress_percent}%" }
        }
    }
}

#[component]
fn QuizCard(screen: QuizScreenVm, dispatch: Callback<QuizIntent>) -> Element {
    rsx! {
        div { class: "card quiz-card",
            div { class: "quiz-prompt",
                h2 { "{screen.prompt}" }
                if let Some(topic) = screen.topic.as_ref() {
                    span { class: "badge badge-secondary", "{topic}" }
                }
            }

            if screen.text_input {
                p { class: "muted", "Type your answer in the box below" }
                input {
                    class: "answer-input",
                    r#type: "text",
                    value: "{screen.pending_answer}",
                    placeholder: "Type your answer here...",
                    disabled: screen.input_locked,
                    oninput: move |evt| dispatch.call(QuizIntent::Type(evt.value())),
                }
            } else {
                div { class: "options",
                    for option in screen.options.iter().cloned() {
                        button {
                            key: "{option.index}",
                            class: if option.selected { "btn option selected" } else { "btn option" },
                            disabled: screen.input_locked,
                            onclick: move |_| dispatch.call(QuizIntent::SelectOption(option.index)),
                            span { class: "option-letter", "{option.letter}" }
                            "{option.text}"
                        }
                    }
                }
            }

            div { class: "quiz-actions",
                button {
                    class: "btn btn-primary",
                    disabled: !screen.can_submit,
                    onclick: move |_| dispatch.call(QuizIntent::Submit),
                    "Submit Answer"
                }
                if screen.show_hint_toggle {
                    button {
                        class: "btn btn-hint",
                        onclick: move |_| dispatch.call(QuizIntent::ToggleHint),
                        "💡 {screen.hint_label}"
                    }
                }
            }

            if let Some(hint) = screen.hint.as_ref() {
                div { class: "hint", "💡 {hint}" }
            }

            if let Some(result) = screen.result.as_ref() {
                div { class: if result.correct { "result correct" } else { "result incorrect" },
                    div { class: "result-headline",
                        if result.correct { "✅ " } else { "❌ " }
                        "{result.headline}"
                    }
                    if let Some(answer) = result.correct_answer.as_ref() {
                        div { class: "result-answer",
                            "The correct answer is: "
                            strong { "{answer}" }
                        }
                    }
                    div { class: "muted", "{result.explanation}" }
                }
            }
        }
    }
}
