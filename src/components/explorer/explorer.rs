//! Main explorer component.
//!
//! ## Layout
//!
//! Sidebar on the left; header, path bar and the file grid on the right,
//! with the details panel docked next to the grid while something is
//! selected. Context menu, dialog and carousel float above everything.

use leptos::ev;
use leptos::prelude::*;

use super::{Carousel, ContextMenu, DetailsPanel, FileGrid, Header, NewFolderDialog, PathBar, Sidebar};
use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// File explorer view component.
#[component]
pub fn Explorer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    // Carousel keys are global while the preview is open
    let keydown = window_event_listener(ev::keydown, move |event: ev::KeyboardEvent| {
        if !drive.with_untracked(|state| state.carousel().is_open()) {
            return;
        }
        let key = event.key();
        if drive.try_update(|state| state.handle_preview_key(&key)) == Some(true) {
            event.prevent_default();
        }
    });

    // Any click outside the menu closes it
    let click = window_event_listener(ev::click, move |_| {
        if drive.with_untracked(|state| state.selection().context_menu().is_some()) {
            drive.update(|state| state.selection_mut().dismiss_context_menu());
        }
    });

    on_cleanup(move || {
        keydown.remove();
        click.remove();
    });

    let has_selection =
        Signal::derive(move || drive.with(|state| state.selection().selection().is_some()));

    view! {
        <div class=css::explorer>
            <Sidebar />

            <main class=css::main>
                <Header />
                <PathBar />

                <div class=css::body>
                    <div class=move || {
                        if has_selection.get() {
                            format!("{} {}", css::gridPane, css::gridPaneWithDetails)
                        } else {
                            css::gridPane.to_string()
                        }
                    }>
                        <FileGrid />
                    </div>

                    <Show when=move || has_selection.get()>
                        <DetailsPanel />
                    </Show>
                </div>
            </main>

            <ContextMenu />
            <NewFolderDialog />
            <Carousel />
        </div>
    }
}
