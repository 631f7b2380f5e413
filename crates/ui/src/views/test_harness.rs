use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use learniverse_core::model::UserId;
use learniverse_core::time::fixed_now;
use services::{AppServices, AuthService, Clock, DashboardService, ExerciseService};
use storage::repository::Storage;
use storage::seed::{seed_catalog, seed_demo_user};

use crate::context::{AuthSession, UiApp, build_app_context, use_auth_session_provider};
use crate::routes::Route;
use crate::views::{AuthView, DashboardView, EnglishView, MathView};

pub fn demo_user() -> UserId {
    UserId::new(1)
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }

    fn exercises(&self) -> Arc<ExerciseService> {
        self.services.exercises()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    English,
    Math,
    Auth,
    /// The real route table with its layout, starting at `/`.
    Shell,
}

/// What the harness puts in storage before the view mounts.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// Catalog plus a demo user with history, signed in.
    SeededUser,
    /// Catalog plus a signed-in user with no history.
    FreshUser,
    /// Nothing seeded and nobody signed in.
    SignedOut,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session_slot: Rc<RefCell<Option<AuthSession>>>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    let session = use_auth_session_provider(ctx.current_user());
    props.session_slot.borrow_mut().replace(session);
    use_context_provider(|| props.view);
    match props.view {
        ViewKind::Shell => rsx! { Router::<Route> {} },
        _ => rsx! { Router::<TestRoute> {} },
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::English => rsx! { EnglishView {} },
        ViewKind::Math => rsx! { MathView {} },
        ViewKind::Auth | ViewKind::Shell => rsx! { AuthView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
    session_slot: Rc<RefCell<Option<AuthSession>>>,
}

impl ViewHarness {
    /// Push the services' signed-in user into the UI session, as the auth
    /// view does after a successful sign-in.
    pub fn sync_session(&mut self) {
        let user = self.services.auth().current_user().map(|user| user.user_id);
        let session = (*self.session_slot.borrow()).expect("session provided on first render");
        self.dom.in_runtime(|| session.set_user(user));
        drive_dom(&mut self.dom);
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, fixture: Fixture) -> ViewHarness {
    let storage = Storage::in_memory();
    let clock = Clock::fixed(fixed_now());

    let signed_in = match fixture {
        Fixture::SeededUser => {
            seed_catalog(&storage).await.expect("seed catalog");
            seed_demo_user(&storage, demo_user(), fixed_now())
                .await
                .expect("seed demo user");
            Some(demo_user())
        }
        Fixture::FreshUser => {
            seed_catalog(&storage).await.expect("seed catalog");
            Some(demo_user())
        }
        Fixture::SignedOut => None,
    };

    let services =
        AppServices::from_storage(&storage, clock, signed_in).expect("wire services");
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let session_slot = Rc::new(RefCell::new(None));
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            session_slot: Rc::clone(&session_slot),
        },
    );

    ViewHarness {
        dom,
        storage,
        services,
        session_slot,
    }
}
