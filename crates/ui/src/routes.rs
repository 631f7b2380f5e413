use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::{AppContext, AuthSession};
use crate::views::{AuthView, DashboardView, EnglishView, MathView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/english", EnglishView)] English {},
        #[route("/math", MathView)] Math {},
        #[route("/auth", AuthView)] Auth {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Navigation {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Navigation() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<AuthSession>();
    let navigator = use_navigator();
    let signed_in = session.user().is_some();

    let on_sign_out = move |_| {
        let auth = ctx.auth();
        spawn(async move {
            if let Err(err) = auth.sign_out().await {
                tracing::warn!(error = %err, "sign-out failed");
            }
            session.set_user(None);
            navigator.push(Route::Auth {});
        });
    };

    rsx! {
        nav { class: "navbar",
            Link { class: "brand", to: Route::Dashboard {}, "Learniverse" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::English {}, "English" } }
                li { Link { to: Route::Math {}, "Math" } }
            }
            if signed_in {
                button { class: "btn btn-ghost", onclick: on_sign_out, "Sign Out" }
            }
        }
    }
}
