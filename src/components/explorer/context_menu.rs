//! Right-click menu for a single entry.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::actions;
use crate::components::icons as ic;
use crate::models::{Entry, View};

stylance::import_crate_style!(css, "src/components/explorer/context_menu.module.css");

#[component]
pub fn ContextMenu() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    let menu = Memo::new(move |_| drive.with(|state| state.selection().context_menu().cloned()));
    let in_trash = Signal::derive(move || drive.with(|state| state.view().view() == View::Trash));

    view! {
        {move || menu.get().map(|menu| {
            let items = if in_trash.get() {
                trash_items(ctx, &menu.target)
            } else {
                live_items(ctx, &menu.target)
            };
            view! {
                <div
                    class=css::menu
                    role="menu"
                    style=format!("left: {}px; top: {}px;", menu.x, menu.y)
                    on:click=|event| event.stop_propagation()
                    on:contextmenu=|event| event.prevent_default()
                >
                    {items}
                </div>
            }
        })}
    }
}

/// One menu row. Runs `action` and closes the menu.
fn item<F>(ctx: AppContext, icon: icondata::Icon, label: &'static str, danger: bool, action: F) -> AnyView
where
    F: Fn() + 'static,
{
    let class = if danger {
        format!("{} {}", css::item, css::danger)
    } else {
        css::item.to_string()
    };
    view! {
        <button
            class=class
            role="menuitem"
            on:click=move |_| {
                ctx.drive.update(|state| state.selection_mut().dismiss_context_menu());
                action();
            }
        >
            <Icon icon=icon />
            <span>{label}</span>
        </button>
    }
    .into_any()
}

fn live_items(ctx: AppContext, target: &Entry) -> Vec<AnyView> {
    let key = target.key();
    let mut items = Vec::new();

    let open_target = target.clone();
    items.push(item(ctx, ic::EXTERNAL_LINK, "Open", false, move || {
        actions::open_entry(ctx, open_target.clone())
    }));

    if let Some(file) = target.as_file().cloned() {
        items.push(item(ctx, ic::DOWNLOAD, "Download", false, move || {
            actions::download(ctx, file.clone())
        }));
    }

    let rename_target = target.clone();
    items.push(item(ctx, ic::EDIT, "Rename", false, move || {
        actions::rename(ctx, rename_target.clone())
    }));

    let (star_icon, star_label) = if target.is_starred() {
        (ic::STAR_FILL, "Remove from starred")
    } else {
        (ic::STAR, "Add to starred")
    };
    items.push(item(ctx, star_icon, star_label, false, move || {
        actions::toggle_star(ctx, key)
    }));

    items.push(item(ctx, ic::TRASH, "Move to trash", true, move || {
        actions::set_trashed(ctx, key, false)
    }));

    items
}

fn trash_items(ctx: AppContext, target: &Entry) -> Vec<AnyView> {
    let key = target.key();
    let delete_target = target.clone();
    vec![
        item(ctx, ic::RESTORE, "Restore", false, move || {
            actions::set_trashed(ctx, key, true)
        }),
        item(ctx, ic::TRASH, "Delete forever", true, move || {
            actions::delete_forever(ctx, delete_target.clone())
        }),
    ]
}
