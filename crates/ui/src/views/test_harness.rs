use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Clock, TrackerConfig};
use storage::repository::Storage;
use tokio::runtime::Handle;
use tracker_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::TrackerView;
use crate::views::tracker::TrackerTestHandles;

pub const CURRICULUM: &str = r#"[
    {"title": "Arrays", "problems": [
        {
            "title": "Two Sum",
            "difficulty": "Easy",
            "url": "https://example.com/two-sum",
            "revision": "https://leetcode.com/problems/two-sum"
        },
        {"title": "3Sum", "difficulty": "Medium", "resource": "Striver"},
        {"title": "Trapping Rain Water", "difficulty": "Hard"}
    ]},
    {"title": "Graphs", "problems": [
        {
            "title": "Number of Islands",
            "difficulty": "medium",
            "note": "https://notes.example.com/islands"
        }
    ]}
]"#;

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    handles: TrackerTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { TrackerView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<AppServices>,
    pub handles: TrackerTestHandles,
}

impl ViewHarness {
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

    /// Drives enough rounds for chained tasks (sign-in, then load) to finish.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn dispatch(&mut self, intent: crate::views::TrackerIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
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

pub fn setup_view_harness(config: TrackerConfig) -> ViewHarness {
    let app = Arc::new(AppServices::new(
        &config,
        Storage::in_memory(),
        CURRICULUM,
        Clock::fixed(fixed_now()),
        Handle::current(),
    ));
    let handles = TrackerTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, app, handles }
}

pub fn default_config() -> TrackerConfig {
    TrackerConfig {
        user_id: "u1".into(),
        user_name: Some("Ada".into()),
        ..TrackerConfig::default()
    }
}
