//! Details panel for the selected entry.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::actions;
use crate::components::icons::{self as ic, entry_icon};
use crate::core::ContentIntent;
use crate::models::{Entry, View, type_label};
use crate::utils::{format_date, format_size};

use super::AuthImage;

stylance::import_crate_style!(css, "src/components/explorer/details.module.css");

#[component]
pub fn DetailsPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    let selected = Memo::new(move |_| {
        drive.with(|state| state.selection().selection().map(|s| s.entry.clone()))
    });
    let in_trash = Signal::derive(move || drive.with(|state| state.view().view() == View::Trash));

    let close = move |_: leptos::ev::MouseEvent| drive.update(|state| state.clear_selection());

    view! {
        <aside class=css::panel>
            {move || selected.get().map(|entry| view! {
                <div class=css::header>
                    <span class=css::title title=entry.name().to_string()>
                        {entry.name().to_string()}
                    </span>
                    <button class=css::close aria-label="Close details" on:click=close>
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>

                <Thumbnail entry=entry.clone() />

                <dl class=css::facts>
                    <dt>"Type"</dt>
                    <dd>{type_label(&entry)}</dd>
                    {entry.as_file().map(|file| view! {
                        <dt>"Size"</dt>
                        <dd>{format_size(file.size)}</dd>
                    })}
                    <dt>"Created"</dt>
                    <dd>{format_date(entry.created_at())}</dd>
                </dl>

                {if in_trash.get() {
                    view! { <TrashActions entry=entry /> }.into_any()
                } else {
                    view! { <LiveActions entry=entry /> }.into_any()
                }}
            })}
        </aside>
    }
}

#[component]
fn Thumbnail(entry: Entry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    match entry.as_file().filter(|file| file.is_image()) {
        Some(file) => {
            let id = file.id;
            let name = file.name.clone();
            let src = Signal::derive(move || {
                ctx.request_context()
                    .map(|cx| cx.content_url(id, ContentIntent::Inline))
                    .unwrap_or_default()
            });
            view! { <AuthImage src=src alt=name class=css::thumbnail /> }.into_any()
        }
        None => view! {
            <div class=css::thumbnail>
                <span class=css::bigIcon><Icon icon=entry_icon(&entry) /></span>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn LiveActions(entry: Entry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let key = entry.key();
    let starred = entry.is_starred();
    let file = entry.as_file().cloned();
    let entry_for_rename = entry.clone();

    view! {
        <div class=css::actions>
            {file.map(|file| view! {
                <button class=css::action on:click=move |_| actions::download(ctx, file.clone())>
                    <Icon icon=ic::DOWNLOAD />
                    <span>"Download"</span>
                </button>
            })}
            <button
                class=css::action
                on:click=move |_| actions::rename(ctx, entry_for_rename.clone())
            >
                <Icon icon=ic::EDIT />
                <span>"Rename"</span>
            </button>
            <button class=css::action on:click=move |_| actions::toggle_star(ctx, key)>
                <Icon icon=if starred { ic::STAR_FILL } else { ic::STAR } />
                <span>{if starred { "Unstar" } else { "Star" }}</span>
            </button>
            <button
                class=format!("{} {}", css::action, css::danger)
                on:click=move |_| actions::set_trashed(ctx, key, false)
            >
                <Icon icon=ic::TRASH />
                <span>"Move to trash"</span>
            </button>
        </div>
    }
}

#[component]
fn TrashActions(entry: Entry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let key = entry.key();

    view! {
        <div class=css::actions>
            <button class=css::action on:click=move |_| actions::set_trashed(ctx, key, true)>
                <Icon icon=ic::RESTORE />
                <span>"Restore"</span>
            </button>
            <button
                class=format!("{} {}", css::action, css::danger)
                on:click=move |_| actions::delete_forever(ctx, entry.clone())
            >
                <Icon icon=ic::TRASH />
                <span>"Delete forever"</span>
            </button>
        </div>
    }
}
