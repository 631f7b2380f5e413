use learniverse_core::model::{ExerciseId, ProgressUpsert};
use learniverse_core::time::fixed_now;
use storage::repository::ProgressRepository;

use super::test_harness::{Fixture, ViewKind, demo_user, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_seeded_user() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Fixture::SeededUser).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome back, Alex! 🌟"), "missing welcome in {html}");
    assert!(html.contains("Total Points"), "missing stats in {html}");
    assert!(html.contains("175"), "missing points in {html}");
    assert!(html.contains("Choose Your Learning Path"), "missing subjects in {html}");
    assert!(html.contains("English"), "missing english card in {html}");
    assert!(html.contains("Math"), "missing math card in {html}");
    assert!(html.contains("First Steps"), "missing achievement in {html}");
    assert!(html.contains("Earned! 🎉"), "missing earned badge in {html}");
    assert!(html.contains("In Progress"), "missing in-progress badge in {html}");
    assert!(html.contains("75%"), "missing score badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_empty_states() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Fixture::FreshUser).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome back, Learner!"), "missing fallback name in {html}");
    assert!(
        html.contains("Complete your first exercise to start earning achievements!"),
        "missing achievements empty state in {html}"
    );
    assert!(
        html.contains("No activity yet. Start learning to see your progress here!"),
        "missing activity empty state in {html}"
    );
    assert!(html.contains("0 of 0 exercises completed"), "missing counts in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_picks_up_new_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, Fixture::FreshUser).await;
    harness
        .storage
        .progress
        .upsert_progress(&ProgressUpsert::new(
            demo_user(),
            ExerciseId::new(210),
            true,
            90,
            fixed_now(),
        ))
        .await
        .expect("record progress");

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Math - Multiplication"), "missing activity row in {html}");
    assert!(html.contains("90%"), "missing score in {html}");
    assert!(html.contains("1 of 1 exercises completed"), "missing math count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn english_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::English, Fixture::SeededUser).await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("English Practice"), "missing title in {html}");
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("Score: 0/3"), "missing score in {html}");
    assert!(html.contains("Submit Answer"), "missing submit in {html}");
    assert!(html.contains("Show Hint"), "missing hint toggle in {html}");
    assert!(html.contains("Next Question"), "missing next in {html}");
    assert!(!html.contains("Quiz Complete!"), "completed too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn math_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Math, Fixture::SeededUser).await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Math Practice"), "missing title in {html}");
    assert!(html.contains("Question 1 of 4"), "missing position in {html}");
    assert!(html.contains("Restart Quiz"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_renders_sign_in_form() {
    let mut harness = setup_view_harness(ViewKind::Auth, Fixture::SignedOut).await;
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Welcome to Learniverse"), "missing hero in {html}");
    assert!(html.contains("Sign In"), "missing title in {html}");
    assert!(html.contains("Enter your email"), "missing email field in {html}");
    assert!(html.contains("Create one here"), "missing toggle in {html}");
    assert!(!html.contains("Display Name"), "sign-up field shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn navigation_sign_out_follows_the_session() {
    let mut harness = setup_view_harness(ViewKind::Shell, Fixture::SignedOut).await;
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Learniverse"), "missing navbar in {html}");
    assert!(!html.contains("Sign Out"), "sign-out shown while signed out in {html}");

    harness
        .services
        .auth()
        .sign_up("kid@example.com", "secret1", "Mia")
        .await
        .expect("sign up");
    harness.sync_session();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Sign Out"), "sign-out missing after sign-in in {html}");

    harness.services.auth().sign_out().await.expect("sign out");
    harness.sync_session();
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("Sign Out"), "sign-out still shown in {html}");
}
