use dioxus::prelude::*;

use tracker_core::filter::DifficultyFilter;

use super::intent::TrackerIntent;
use crate::vm::{AuthVm, ProblemVm, StatsVm, StepVm, TrackerVm};

#[component]
pub(super) fn LoadingScreen() -> Element {
    rsx! {
        div { class: "screen screen--loading",
            div { class: "screen__icon", "⚡" }
            h2 { "LOADING..." }
            p { "Preparing your coding journey" }
        }
    }
}

#[component]
pub(super) fn ErrorScreen(
    message: &'static str,
    on_intent: EventHandler<TrackerIntent>,
) -> Element {
    rsx! {
        div { class: "screen screen--error",
            div { class: "screen__icon", "💥" }
            h2 { "Error Loading Data" }
            p { "{message}" }
            button {
                class: "primary",
                id: "tracker-retry",
                r#type: "button",
                onclick: move |_| on_intent.call(TrackerIntent::Retry),
                "RETRY"
            }
        }
    }
}

#[component]
pub(super) fn AuthPanel(auth: Option<AuthVm>, on_intent: EventHandler<TrackerIntent>) -> Element {
    match auth {
        None => rsx! {
            div { class: "auth",
                button {
                    class: "primary",
                    id: "tracker-sign-in",
                    r#type: "button",
                    onclick: move |_| on_intent.call(TrackerIntent::SignIn),
                    "SIGN IN"
                }
            }
        },
        Some(auth) => rsx! {
            div { class: "auth auth--signed-in",
                span { class: "auth__avatar", "{auth.initial}" }
                div {
                    div { class: "auth__welcome", "Welcome, {auth.name}" }
                    div { class: "auth__status", "Signed In" }
                }
                button {
                    class: "secondary",
                    id: "tracker-sign-out",
                    r#type: "button",
                    onclick: move |_| on_intent.call(TrackerIntent::SignOut),
                    "Sign Out"
                }
            }
        },
    }
}

#[component]
pub(super) fn StatsPanel(stats: StatsVm) -> Element {
    rsx! {
        section { class: "stats",
            div { class: "stats__grid",
                StatTile { label: "Total Problems", value: stats.total.to_string(), icon: "📚" }
                StatTile { label: "Completed", value: stats.completed.to_string(), icon: "✅" }
                StatTile { label: "Progress", value: format!("{}%", stats.rate), icon: "🎯" }
                StatTile { label: "Level", value: stats.level.to_string(), icon: "⚡" }
            }
            div { class: "stats__overall",
                div { class: "stats__overall-head",
                    span { "Overall Progress" }
                    span { "{stats.completed}/{stats.total}" }
                }
                div { class: "bar bar--wide",
                    div { class: "bar__fill", style: "width: {stats.rate}%" }
                }
            }
        }
    }
}

#[component]
fn StatTile(label: &'static str, value: String, icon: &'static str) -> Element {
    rsx! {
        div { class: "stats__tile",
            div {
                p { class: "stats__label", "{label}" }
                p { class: "stats__value", "{value}" }
            }
            div { class: "stats__icon", "{icon}" }
        }
    }
}

#[component]
pub(super) fn Controls(
    search_term: String,
    difficulty: DifficultyFilter,
    collapse_label: &'static str,
    all_collapsed: bool,
    on_intent: EventHandler<TrackerIntent>,
) -> Element {
    let collapse_icon = if all_collapsed { "📖" } else { "📕" };
    rsx! {
        div { class: "controls",
            input {
                class: "controls__search",
                id: "tracker-search",
                r#type: "text",
                placeholder: "Search problems...",
                value: "{search_term}",
                oninput: move |evt: FormEvent| on_intent.call(TrackerIntent::Search(evt.value())),
            }
            select {
                class: "controls__difficulty",
                id: "tracker-difficulty",
                onchange: move |evt: FormEvent| {
                    if let Ok(filter) = evt.value().parse::<DifficultyFilter>() {
                        on_intent.call(TrackerIntent::Difficulty(filter));
                    }
                },
                for choice in DifficultyFilter::OPTIONS {
                    option {
                        value: "{choice.label()}",
                        selected: choice == difficulty,
                        "{choice.label()}"
                    }
                }
            }
            button {
                class: "secondary",
                id: "tracker-toggle-all",
                r#type: "button",
                onclick: move |_| on_intent.call(TrackerIntent::ToggleAll),
                span { class: "controls__icon", "{collapse_icon}" }
                "{collapse_label}"
            }
        }
    }
}

#[component]
pub(super) fn StepSection(
    step: StepVm,
    can_toggle: bool,
    on_intent: EventHandler<TrackerIntent>,
) -> Element {
    let index = step.index;
    let chevron = if step.collapsed { "▶️" } else { "🔽" };
    let bar_style = step.bar_style();
    rsx! {
        section { class: "step",
            div {
                class: "step__header",
                onclick: move |_| on_intent.call(TrackerIntent::ToggleSection(index)),
                span { class: "step__chevron", "{chevron}" }
                h2 { class: "step__title", "{step.title}" }
                span { class: "step__count", "{step.completed}/{step.total}" }
                div { class: "bar",
                    div { class: "bar__fill", style: "{bar_style}" }
                }
                span { class: "step__percent", "{step.rounded_percentage}%" }
            }
            if !step.collapsed {
                div { class: "step__problems",
                    for (row_key, problem) in step.problems.into_iter().map(|row| (row.key, row)) {
                        ProblemRow { key: "{row_key}", problem, can_toggle, on_intent }
                    }
                }
            }
        }
    }
}

#[component]
fn ProblemRow(
    problem: ProblemVm,
    can_toggle: bool,
    on_intent: EventHandler<TrackerIntent>,
) -> Element {
    let key = problem.key;
    let completed = problem.completed;
    let check_class = if completed { "check check--on" } else { "check" };
    rsx! {
        div { class: "{problem.row_class()}",
            if can_toggle {
                button {
                    class: "{check_class}",
                    id: "toggle-{key}",
                    r#type: "button",
                    onclick: move |_| on_intent.call(TrackerIntent::Toggle {
                        key,
                        completed: !completed,
                    }),
                    if completed { "✓" }
                }
            }
            div { class: "problem__info",
                div { class: "problem__head",
                    h3 { class: "problem__title", "{problem.title}" }
                    if let Some((label, tone)) = problem.difficulty.as_ref() {
                        span { class: "{tone.class()}", "{label}" }
                    }
                }
                if let Some(resource) = problem.resource.as_ref() {
                    span { class: "problem__resource", "Resource: {resource}" }
                }
            }
            div { class: "problem__links",
                for link in problem.links.iter() {
                    a {
                        class: "problem__link",
                        href: "{link.href}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        span { class: "problem__link-icon", "{link.kind.icon()}" }
                        span { "{link.kind.label()}" }
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn EmptyState(on_intent: EventHandler<TrackerIntent>) -> Element {
    rsx! {
        div { class: "empty",
            div { class: "empty__icon", "🤔" }
            h3 { "No problems found" }
            p { "Try adjusting your search or filter criteria" }
            button {
                class: "primary",
                id: "tracker-reset-filters",
                r#type: "button",
                onclick: move |_| on_intent.call(TrackerIntent::ResetFilters),
                "Reset Filters"
            }
        }
    }
}

#[component]
pub(super) fn Footer(year: i32) -> Element {
    rsx! {
        footer { class: "footer",
            p { "Master your coding journey • {year}" }
        }
    }
}

#[component]
pub(super) fn TrackerBody(
    vm: TrackerVm,
    year: i32,
    on_intent: EventHandler<TrackerIntent>,
) -> Element {
    let can_toggle = vm.can_toggle();
    let collapse_label = vm.collapse_label();
    let empty = vm.is_empty();
    let TrackerVm {
        auth,
        stats,
        search_term,
        difficulty,
        all_collapsed,
        steps,
    } = vm;
    rsx! {
        div { class: "tracker",
            header { class: "tracker__header",
                h1 { class: "tracker__title", "GOONIE TRACKER" }
                AuthPanel { auth, on_intent }
                if let Some(stats) = stats {
                    StatsPanel { stats }
                }
                Controls {
                    search_term,
                    difficulty,
                    collapse_label,
                    all_collapsed,
                    on_intent,
                }
            }
            main { class: "tracker__steps",
                for (step_key, step) in steps.into_iter().map(|step| (step.index, step)) {
                    StepSection { key: "{step_key}", step, can_toggle, on_intent }
                }
                if empty {
                    EmptyState { on_intent }
                }
            }
            Footer { year }
        }
    }
}
