//! File grid for the active scope.
//!
//! Folders first, then files, in server order. Single click selects,
//! double click opens, right click opens the context menu.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::actions;
use crate::components::icons::{self as ic, entry_icon};
use crate::models::Entry;
use crate::utils::{format_date, format_size};

stylance::import_crate_style!(css, "src/components/explorer/file_grid.module.css");

#[component]
pub fn FileGrid() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    let folders = Signal::derive(move || {
        drive.with(|state| {
            state
                .view()
                .listing()
                .folders
                .iter()
                .cloned()
                .map(Entry::from)
                .collect::<Vec<_>>()
        })
    });
    let files = Signal::derive(move || {
        drive.with(|state| {
            state
                .view()
                .listing()
                .files
                .iter()
                .cloned()
                .map(Entry::from)
                .collect::<Vec<_>>()
        })
    });

    let is_empty = Signal::derive(move || drive.with(|state| state.view().listing().is_empty()));
    let is_pending = Signal::derive(move || drive.with(|state| state.view().is_pending()));
    let failed = Signal::derive(move || {
        drive.with(|state| state.view().last_error().is_some() && state.view().listing().is_empty())
    });

    // Clicking empty space drops the selection
    let on_background_click = move |_: leptos::ev::MouseEvent| {
        drive.update(|state| state.clear_selection());
    };

    view! {
        <div class=css::grid on:click=on_background_click>
            {move || {
                if failed.get() {
                    view! { <LoadFailed /> }.into_any()
                } else if is_empty.get() && !is_pending.get() {
                    view! { <EmptyState /> }.into_any()
                } else {
                    view! {
                        <Show when=move || !folders.with(Vec::is_empty)>
                            <Section title="Folders" entries=folders />
                        </Show>
                        <Show when=move || !files.with(Vec::is_empty)>
                            <Section title="Files" entries=files />
                        </Show>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn Section(title: &'static str, entries: Signal<Vec<Entry>>) -> impl IntoView {
    view! {
        <section class=css::section>
            <h2 class=css::sectionTitle>{title}</h2>
            <div class=css::items role="grid" aria-label=title>
                <For
                    each=move || entries.get()
                    key=|entry| (entry.key(), entry.name().to_string(), entry.is_starred())
                    children=move |entry| view! { <GridItem entry=entry /> }
                />
            </div>
        </section>
    }
}

#[component]
fn GridItem(entry: Entry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    let key = entry.key();
    let is_selected = Signal::derive(move || drive.with(|state| state.selection().is_selected(key)));

    let meta = match &entry {
        Entry::File(file) => format!("{} · {}", format_size(file.size), format_date(&file.created_at)),
        Entry::Folder(folder) => format_date(&folder.created_at),
    };
    let starred = entry.is_starred();
    let can_star = entry.is_live();

    let entry_for_click = entry.clone();
    let handle_click = move |event: leptos::ev::MouseEvent| {
        event.stop_propagation();
        let entry = entry_for_click.clone();
        drive.update(|state| {
            let selection = state.selection_mut();
            selection.dismiss_context_menu();
            selection.select(entry);
        });
    };

    let entry_for_open = entry.clone();
    let handle_dblclick = move |event: leptos::ev::MouseEvent| {
        event.stop_propagation();
        actions::open_entry(ctx, entry_for_open.clone());
    };

    let entry_for_menu = entry.clone();
    let handle_contextmenu = move |event: leptos::ev::MouseEvent| {
        event.prevent_default();
        event.stop_propagation();
        let entry = entry_for_menu.clone();
        drive.update(|state| {
            state
                .selection_mut()
                .open_context_menu_at(event.client_x(), event.client_y(), entry)
        });
    };

    let handle_star = move |event: leptos::ev::MouseEvent| {
        event.stop_propagation();
        actions::toggle_star(ctx, key);
    };

    view! {
        <div
            class=move || {
                if is_selected.get() {
                    format!("{} {}", css::item, css::itemSelected)
                } else {
                    css::item.to_string()
                }
            }
            role="gridcell"
            aria-selected=move || is_selected.get().to_string()
            title=entry.name().to_string()
            on:click=handle_click
            on:dblclick=handle_dblclick
            on:contextmenu=handle_contextmenu
        >
            <span class=css::icon>
                <Icon icon=entry_icon(&entry) />
            </span>
            <span class=css::name>{entry.name().to_string()}</span>
            <span class=css::meta>{meta}</span>
            {can_star.then(|| view! {
                <button
                    class=if starred {
                        format!("{} {}", css::star, css::starOn)
                    } else {
                        css::star.to_string()
                    }
                    aria-label=if starred { "Remove from starred" } else { "Add to starred" }
                    on:click=handle_star
                >
                    <Icon icon=if starred { ic::STAR_FILL } else { ic::STAR } />
                </button>
            })}
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let message = Signal::derive(move || ctx.drive.with(|state| state.view().view().empty_state()));

    view! {
        <div class=css::empty>
            <div class=css::emptyTitle>{move || message.get().0}</div>
            <div class=css::emptyHint>{move || message.get().1}</div>
        </div>
    }
}

#[component]
fn LoadFailed() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let reason = Signal::derive(move || {
        ctx.drive.with(|state| {
            state
                .view()
                .last_error()
                .map(ToString::to_string)
                .unwrap_or_default()
        })
    });

    view! {
        <div class=css::empty>
            <div class=css::emptyTitle>"Could not load files"</div>
            <div class=css::emptyHint>{move || reason.get()}</div>
            <button
                class=css::retry
                on:click=move |event| {
                    event.stop_propagation();
                    actions::reload_listing(ctx);
                }
            >
                "Try again"
            </button>
        </div>
    }
}
