use dioxus::prelude::*;
use tracing::{debug, warn};

use tracker_core::model::{Curriculum, UserIdentity};
use tracker_core::session::SessionState;

use super::components::{ErrorScreen, LoadingScreen, TrackerBody};
use super::intent::{TrackerIntent, apply_local};
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::build_tracker_vm;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn TrackerView() -> Element {
    let ctx = use_context::<AppContext>();
    let year = ctx.clock().current_year();
    let curriculum_service = ctx.curriculum();
    let progress = ctx.progress();
    let identity = ctx.identity();

    let session = use_signal(SessionState::new);

    let resource = use_resource(move || {
        let curriculum_service = curriculum_service.clone();
        async move {
            curriculum_service.load().await.map_err(|err| {
                warn!(error = %err, "failed to load curriculum");
                ViewError::CurriculumUnavailable
            })
        }
    });

    // Identity changes drive the session: each sign-in starts a ticketed load,
    // a late result from an earlier sign-in is dropped by the session.
    {
        let identity = identity.clone();
        let progress = progress.clone();
        use_future(move || {
            let identity = identity.clone();
            let progress = progress.clone();
            async move {
                let mut subscription = identity.subscribe();
                let mut next = Some(subscription.current());
                while let Some(current) = next {
                    on_identity_changed(session, &progress, current);
                    next = subscription.changed().await;
                }
                debug!("identity subscription closed");
            }
        });
    }

    let dispatch_intent = {
        let identity = identity.clone();
        let progress = progress.clone();
        use_callback(move |intent: TrackerIntent| {
            let mut session = session;
            let mut resource = resource;
            let step_count = resource
                .value()
                .read()
                .as_ref()
                .and_then(|value| value.as_ref().ok())
                .map_or(0, Curriculum::len);

            if apply_local(&mut session.write(), &intent, step_count) {
                return;
            }

            match intent {
                TrackerIntent::SignIn => {
                    let identity = identity.clone();
                    spawn(async move {
                        if let Err(err) = identity.sign_in().await {
                            warn!(error = %err, "sign-in failed");
                        }
                    });
                }
                TrackerIntent::SignOut => {
                    let identity = identity.clone();
                    spawn(async move {
                        if let Err(err) = identity.sign_out().await {
                            warn!(error = %err, "sign-out failed");
                        }
                    });
                }
                TrackerIntent::Toggle { key, completed } => {
                    if let Err(err) = progress.toggle(&mut session.write(), key, completed) {
                        warn!(key = %key, error = %err, "toggle rejected");
                    }
                }
                TrackerIntent::Retry => resource.restart(),
                TrackerIntent::Search(_)
                | TrackerIntent::Difficulty(_)
                | TrackerIntent::ToggleSection(_)
                | TrackerIntent::ToggleAll
                | TrackerIntent::ResetFilters => {}
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<TrackerTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    let state = view_state_from_resource(&resource);

    match state {
        ViewState::Idle | ViewState::Loading => rsx! { LoadingScreen {} },
        ViewState::Error(err) => rsx! {
            ErrorScreen { message: err.message(), on_intent: dispatch_intent }
        },
        ViewState::Ready(curriculum) => {
            let vm = build_tracker_vm(&curriculum, &session.read());
            rsx! {
                TrackerBody { vm, year, on_intent: dispatch_intent }
            }
        }
    }
}

fn on_identity_changed(
    mut session: Signal<SessionState>,
    progress: &std::sync::Arc<services::ProgressService>,
    identity: Option<UserIdentity>,
) {
    let Some(identity) = identity else {
        session.write().sign_out();
        return;
    };
    let user = identity.id().clone();
    let ticket = session.write().sign_in(identity);
    let progress = std::sync::Arc::clone(progress);
    spawn(async move {
        progress
            .load_into(&user, ticket, |ticket, map| {
                session.write().apply_loaded(ticket, map)
            })
            .await;
    });
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct TrackerTestHandles {
    dispatch: Rc<RefCell<Option<Callback<TrackerIntent>>>>,
    session: Rc<RefCell<Option<Signal<SessionState>>>>,
}

#[cfg(test)]
impl TrackerTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<TrackerIntent>,
        session: Signal<SessionState>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<TrackerIntent> {
        (*self.dispatch.borrow()).expect("tracker dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<SessionState> {
        (*self.session.borrow()).expect("tracker session registered")
    }
}
