use dioxus::prelude::*;
use tracker_core::filter::{Difficulty, DifficultyFilter};
use tracker_core::model::{ProblemKey, UserId};

use super::TrackerIntent;
use super::test_harness::{default_config, setup_view_harness};
use services::TrackerConfig;

#[tokio::test(flavor = "current_thread")]
async fn signed_out_view_lists_problems_without_stats() {
    let mut harness = setup_view_harness(default_config());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("SIGN IN"), "missing sign-in in {html}");
    assert!(html.contains("Two Sum"), "missing problem in {html}");
    assert!(html.contains("Number of Islands"), "missing problem in {html}");
    assert!(!html.contains("Total Problems"), "stats shown signed out: {html}");
    assert!(!html.contains("toggle-0_0"), "toggle shown signed out: {html}");
    assert!(html.contains("Master your coding journey • 2024"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sign_in_shows_stats_and_toggles_persist() {
    let mut harness = setup_view_harness(default_config());
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(TrackerIntent::SignIn);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Welcome, Ada"), "missing welcome in {html}");
    assert!(html.contains("Total Problems"), "missing stats in {html}");
    assert!(html.contains("toggle-0_1"), "missing toggle in {html}");

    harness.dispatch(TrackerIntent::Toggle {
        key: ProblemKey::new(0, 1),
        completed: true,
    });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1/3"), "missing step progress in {html}");
    assert!(html.contains("problem problem--done"), "missing done row in {html}");

    let progress = harness.app.progress();
    progress.writer().idle().await;
    let stored = progress.load(&UserId::new("u1").unwrap()).await.unwrap();
    assert!(stored.is_completed(ProblemKey::new(0, 1)));
}

#[tokio::test(flavor = "current_thread")]
async fn sign_out_clears_completion_but_keeps_filters() {
    let mut harness = setup_view_harness(default_config());
    harness.rebuild();
    harness.settle().await;
    harness.dispatch(TrackerIntent::SignIn);
    harness.settle().await;
    harness.dispatch(TrackerIntent::Toggle {
        key: ProblemKey::new(0, 0),
        completed: true,
    });
    harness.dispatch(TrackerIntent::Search("sum".into()));
    harness.settle().await;

    harness.dispatch(TrackerIntent::SignOut);
    harness.settle().await;

    let session = harness.handles.session();
    harness.dom.in_runtime(|| {
        let session = session.read();
        assert!(session.identity().is_none());
        assert!(session.completion().is_empty());
        assert_eq!(session.search_term(), "sum");
    });
    let html = harness.render();
    assert!(html.contains("SIGN IN"), "missing sign-in in {html}");
    assert!(!html.contains("Trapping Rain Water"), "filter lost in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn no_match_shows_empty_state_and_reset_restores() {
    let mut harness = setup_view_harness(default_config());
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(TrackerIntent::Difficulty(DifficultyFilter::Only(
        Difficulty::Hard,
    )));
    harness.dispatch(TrackerIntent::Search("islands".into()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No problems found"), "missing empty state in {html}");
    assert!(html.contains("Reset Filters"), "missing reset in {html}");

    harness.dispatch(TrackerIntent::ResetFilters);
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("No problems found"), "empty state stuck in {html}");
    assert!(html.contains("Number of Islands"), "missing problem in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn collapse_all_hides_problem_rows() {
    let mut harness = setup_view_harness(default_config());
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(TrackerIntent::ToggleAll);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Expand All"), "missing expand label in {html}");
    assert!(!html.contains("Two Sum"), "rows still visible in {html}");
    assert!(html.contains("Arrays"), "step header missing in {html}");

    harness.dispatch(TrackerIntent::ToggleSection(0));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Two Sum"), "step 0 not expanded in {html}");
    assert!(!html.contains("Number of Islands"), "step 1 expanded in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn curriculum_failure_shows_retry() {
    let config = TrackerConfig {
        curriculum: Some("/nonexistent/tracker/curriculum.json".into()),
        ..default_config()
    };
    let mut harness = setup_view_harness(config);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Failed to load problems data. Please try again."),
        "missing error in {html}"
    );
    assert!(html.contains("RETRY"), "missing retry in {html}");

    harness.dispatch(TrackerIntent::Retry);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("RETRY"), "retry should fail again in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sign_in_without_profile_stays_signed_out() {
    let config = TrackerConfig {
        user_id: "  ".into(),
        ..default_config()
    };
    let mut harness = setup_view_harness(config);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(TrackerIntent::SignIn);
    harness.settle().await;

    let session = harness.handles.session();
    harness.dom.in_runtime(|| {
        assert!(session.read().identity().is_none());
    });
    let html = harness.render();
    assert!(html.contains("SIGN IN"), "missing sign-in in {html}");
    assert!(!html.contains("Total Problems"), "stats shown without profile: {html}");
    assert!(!html.contains("toggle-0_0"), "toggle shown without profile: {html}");
}
