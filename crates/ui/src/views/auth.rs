use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::{AppContext, AuthSession};
use crate::routes::Route;
use crate::vm::{AuthMode, AuthNext, AuthNotice, auth_error_notice, sign_up_next};

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<AuthSession>();
    let navigator = use_navigator();

    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut display_name = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut notice = use_signal(|| None::<AuthNotice>);

    use_effect(move || {
        if session.user().is_some() {
            navigator.replace(Route::Dashboard {});
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        let auth = ctx.auth();
        let current_mode = mode();
        let email_value = email.read().clone();
        let password_value = password.read().clone();
        let name_value = display_name.read().clone();
        loading.set(true);
        notice.set(None);

        spawn(async move {
            let next = match current_mode {
                AuthMode::SignIn => auth
                    .sign_in(&email_value, &password_value)
                    .await
                    .map(|_| AuthNext::GoToDashboard),
                AuthMode::SignUp => auth
                    .sign_up(&email_value, &password_value, &name_value)
                    .await
                    .map(|outcome| sign_up_next(&outcome)),
            };
            loading.set(false);
            match next {
                Ok(AuthNext::GoToDashboard) => {
                    session.set_user(auth.current_user().map(|user| user.user_id));
                    navigator.push(Route::Dashboard {});
                }
                Ok(AuthNext::Stay(info)) => notice.set(Some(info)),
                Err(err) => notice.set(Some(auth_error_notice(&err))),
            }
        });
    };

    let on_toggle = move |_| {
        mode.set(mode().toggled());
        notice.set(None);
    };

    let current = mode();
    let submit_label = current.submit_label(loading());
    let title = current.title();
    let description = current.description();
    let toggle_prompt = current.toggle_prompt();
    let toggle_label = current.toggle_label();
    let notice_view = notice.read().as_ref().map(|n| {
        let class = if n.is_error() { "alert alert-error" } else { "alert" };
        (class, n.text().to_string())
    });

    rsx! {
        div { class: "page auth",
            div { class: "auth-hero",
                div { class: "auth-icons",
                    span { class: "subject-icon", "📖" }
                    span { class: "subject-icon", "🧮" }
                    span { class: "subject-icon", "⭐" }
                }
                h1 { class: "gradient-title", "Welcome to Learniverse" }
                p { class: "muted", "Your personalized learning adventure awaits!" }
            }

            div { class: "card auth-card",
                h2 { "{title}" }
                p { class: "muted", "{description}" }

                form { class: "auth-form", onsubmit: on_submit,
                    if current == AuthMode::SignUp {
                        label { r#for: "displayName", "Display Name" }
                        input {
                            id: "displayName",
                            r#type: "text",
                            placeholder: "Enter your name",
                            value: "{display_name}",
                            required: true,
                            oninput: move |evt| display_name.set(evt.value()),
                        }
                    }

                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        placeholder: "Enter your email",
                        value: "{email}",
                        required: true,
                        oninput: move |evt| email.set(evt.value()),
                    }

                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        placeholder: "Enter your password",
                        value: "{password}",
                        required: true,
                        oninput: move |evt| password.set(evt.value()),
                    }

                    if let Some((class, text)) = notice_view {
                        div { class: "{class}", "{text}" }
                    }

                    button {
                        class: "btn btn-hero btn-block",
                        r#type: "submit",
                        disabled: loading(),
                        "{submit_label}"
                    }
                }

                div { class: "auth-toggle",
                    p { class: "muted", "{toggle_prompt}" }
                    button { class: "btn btn-link", onclick: on_toggle, "{toggle_label}" }
                }
            }

            div { class: "auth-features",
                div { span { "📖" } p { class: "muted", "Interactive Lessons" } }
                div { span { "⭐" } p { class: "muted", "Earn Achievements" } }
                div { span { "🧮" } p { class: "muted", "Track Progress" } }
            }
        }
    }
}
