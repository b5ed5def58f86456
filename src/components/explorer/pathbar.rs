//! Breadcrumb bar.
//!
//! Shows the navigation path of the active view. Only the hierarchical view
//! has more than one crumb, and only there are crumbs clickable.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::actions;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/explorer/pathbar.module.css");

#[component]
pub fn PathBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    let crumbs = Signal::derive(move || {
        drive.with(|state| {
            let hierarchical = state.view().view().is_hierarchical();
            let crumbs = state.view().path().crumbs();
            crumbs
                .iter()
                .enumerate()
                .map(|(idx, crumb)| {
                    let clickable = hierarchical && idx + 1 < crumbs.len();
                    (idx, crumb.label.clone(), clickable)
                })
                .collect::<Vec<_>>()
        })
    });

    view! {
        <nav class=css::pathbar aria-label="Breadcrumbs">
            {move || {
                crumbs
                    .get()
                    .into_iter()
                    .map(|(idx, label, clickable)| {
                        view! {
                            <>
                                {(idx > 0).then(|| view! {
                                    <span class=css::separator>
                                        <Icon icon=ic::CHEVRON_RIGHT />
                                    </span>
                                })}
                                {if clickable {
                                    view! {
                                        <SegmentLink
                                            label=label
                                            on_click=move || actions::open_breadcrumb(ctx, idx)
                                        />
                                    }.into_any()
                                } else {
                                    view! { <SegmentCurrent label=label /> }.into_any()
                                }}
                            </>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

/// Clickable path segment.
#[component]
fn SegmentLink<F>(label: String, on_click: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button class=css::segment on:click=move |_| on_click()>
            <span class=css::label>{label}</span>
        </button>
    }
}

/// Current (disabled) path segment.
#[component]
fn SegmentCurrent(label: String) -> impl IntoView {
    view! {
        <button class=format!("{} {}", css::segment, css::segmentCurrent) disabled=true>
            <span class=css::label>{label}</span>
        </button>
    }
}
