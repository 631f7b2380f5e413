use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use learniverse_core::model::SubjectKind;

use crate::context::{AppContext, AuthSession};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AchievementVm, ActivityVm, DashboardVm, SubjectCardVm, map_dashboard};

fn subject_route(kind: SubjectKind) -> Route {
    match kind {
        SubjectKind::English => Route::English {},
        SubjectKind::Math => Route::Math {},
    }
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<AuthSession>();
    let navigator = use_navigator();
    let dashboard = ctx.dashboard();

    use_effect(move || {
        if session.user().is_none() {
            navigator.replace(Route::Auth {});
        }
    });

    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        let user = session.user();
        async move {
            let user = user.ok_or(ViewError::SignedOut)?;
            let snapshot = dashboard.load_dashboard(user).await;
            Ok::<_, ViewError>(map_dashboard(&snapshot))
        }
    });

    let state = view_state_from_resource(&resource);
    let signed_out_message = ViewError::SignedOut.message();

    rsx! {
        div { class: "page dashboard",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    DashboardBody { vm }
                },
                ViewState::Error(ViewError::SignedOut) => rsx! {
                    p { "{signed_out_message}" }
                    Link { class: "btn btn-primary", to: Route::Auth {}, "Sign In" }
                },
                ViewState::Error(err) => {
                    let message = err.message();
                    rsx! {
                        p { class: "error", "{message}" }
                    }
                }
            }
        }
    }
}

#[component]
fn DashboardBody(vm: DashboardVm) -> Element {
    rsx! {
        section { class: "hero",
            h2 { class: "welcome", "{vm.welcome}" }
            p { class: "muted",
                "Ready to continue your learning adventure? Let's explore new topics and earn some badges today!"
            }
            div { class: "hero-actions",
                Link { class: "btn btn-hero", to: Route::English {}, "Continue Learning" }
                span { class: "btn btn-secondary", "{vm.completed_cta}" }
            }
        }

        section { class: "stats",
            for tile in vm.stats.iter() {
                div { class: "card stat", key: "{tile.label}",
                    div { class: "stat-value", "{tile.value}" }
                    div { class: "stat-label", "{tile.label}" }
                }
            }
        }

        section {
            h2 { class: "section-title", "Choose Your Learning Path" }
            div { class: "subject-grid",
                for card in vm.subjects {
                    SubjectCardItem { key: "{card.name}", card }
                }
            }
        }

        section {
            h2 { class: "section-title", "Your Achievements" }
            if vm.achievements.is_empty() {
                div { class: "empty",
                    p { "Complete your first exercise to start earning achievements!" }
                }
            } else {
                div { class: "achievement-grid",
                    for achievement in vm.achievements {
                        AchievementItem { key: "{achievement.id}", achievement }
                    }
                }
            }
        }

        section {
            h2 { class: "section-title", "Recent Activity" }
            div { class: "card activity",
                if vm.activity.is_empty() {
                    div { class: "empty",
                        p { "No activity yet. Start learning to see your progress here!" }
                    }
                } else {
                    for item in vm.activity {
                        ActivityItem { key: "{item.id}", item }
                    }
                }
            }
        }
    }
}

#[component]
fn SubjectCardItem(card: SubjectCardVm) -> Element {
    let body = rsx! {
        div { class: "subject-header",
            span { class: "subject-icon", style: "background: {card.color}", "{card.glyph}" }
            h3 { "{card.name}" }
        }
        if let Some(description) = card.description.as_ref() {
            p { class: "muted", "{description}" }
        }
        p { class: "subject-count", "{card.completed_label}" }
        div { class: "progress-row",
            span { "Progress" }
            span { "{card.percent}%" }
        }
        div { class: "progress",
            div { class: "progress-fill", style: "width: {card.percent}%" }
        }
    };

    match card.kind {
        Some(kind) => rsx! {
            Link { class: "card subject", to: subject_route(kind), {body} }
        },
        None => rsx! {
            div { class: "card subject", {body} }
        },
    }
}

#[component]
fn AchievementItem(achievement: AchievementVm) -> Element {
    rsx! {
        div { class: "card achievement",
            div { class: "achievement-icon", "{achievement.glyph}" }
            h3 { "{achievement.name}" }
            p { class: "muted", "{achievement.description}" }
            span { class: "badge", "Earned! 🎉" }
        }
    }
}

#[component]
fn ActivityItem(item: ActivityVm) -> Element {
    let badge_class = if item.completed {
        "badge"
    } else {
        "badge badge-outline"
    };
    rsx! {
        div { class: "activity-row",
            span { class: "activity-icon", "{item.glyph}" }
            div { class: "activity-text",
                div { class: "activity-title", "{item.title}" }
                div { class: "muted", "{item.date}" }
            }
            span { class: "{badge_class}", "{item.badge}" }
        }
    }
}
