//! Modal for naming a new folder.
//!
//! The folder is created in the active folder of My Files, or at the root
//! from the flat views.

use leptos::ev;
use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::actions;

stylance::import_crate_style!(css, "src/components/explorer/new_folder.module.css");

#[component]
pub fn NewFolderDialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let open = ctx.new_folder_open;

    view! {
        <Show when=move || open.get()>
            <Dialog />
        </Show>
    }
}

#[component]
fn Dialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let name = RwSignal::new(String::from("Untitled folder"));
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let uploading = Signal::derive(move || ctx.drive.with(|state| state.is_uploading()));

    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    let close = move || ctx.new_folder_open.set(false);
    let submit = move || actions::create_folder(ctx, name.get_untracked());

    let on_keydown = move |event: ev::KeyboardEvent| match event.key().as_str() {
        "Enter" => {
            event.prevent_default();
            submit();
        }
        "Escape" => {
            event.prevent_default();
            close();
        }
        _ => {}
    };

    view! {
        <div class=css::backdrop on:click=move |_| close()>
            <div
                class=css::dialog
                role="dialog"
                aria-modal="true"
                aria-label="New folder"
                on:click=|event| event.stop_propagation()
            >
                <h3 class=css::title>"New folder"</h3>
                <input
                    node_ref=input_ref
                    class=css::input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |event| name.set(event_target_value(&event))
                    on:keydown=on_keydown
                />
                <div class=css::buttons>
                    <button class=css::cancel on:click=move |_| close()>"Cancel"</button>
                    <button
                        class=css::create
                        disabled=move || uploading.get() || name.with(|n| n.trim().is_empty())
                        on:click=move |_| submit()
                    >
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}
