//! Sidebar: create and upload actions, view switcher, storage meter, logout.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::actions;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::models::View;
use crate::utils::format_usage;

stylance::import_crate_style!(css, "src/components/explorer/sidebar.module.css");

fn view_icon(view: View) -> icondata::Icon {
    match view {
        View::MyFiles => ic::DRIVE,
        View::Recent => ic::CLOCK,
        View::Starred => ic::STAR,
        View::Trash => ic::TRASH,
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    let uploading = Signal::derive(move || drive.with(|state| state.is_uploading()));
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_file_chosen = move |_: leptos::ev::Event| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            actions::upload(ctx, file);
        }
        input.set_value("");
    };

    view! {
        <aside class=css::sidebar>
            <div class=css::brand>
                <span class=css::brandIcon><Icon icon=ic::CLOUD /></span>
                <span>{APP_NAME}</span>
            </div>

            <div class=css::actions>
                <button
                    class=css::primary
                    disabled=move || uploading.get()
                    on:click=move |_| ctx.new_folder_open.set(true)
                >
                    <Icon icon=ic::FOLDER_PLUS />
                    <span>"New folder"</span>
                </button>

                <label class=move || {
                    if uploading.get() {
                        format!("{} {}", css::secondary, css::disabled)
                    } else {
                        css::secondary.to_string()
                    }
                }>
                    <input
                        node_ref=input_ref
                        type="file"
                        class=css::hiddenInput
                        disabled=move || uploading.get()
                        on:change=on_file_chosen
                    />
                    {move || if uploading.get() {
                        view! {
                            <span class=css::spinner><Icon icon=ic::SPINNER /></span>
                            <span>"Uploading..."</span>
                        }.into_any()
                    } else {
                        view! {
                            <Icon icon=ic::UPLOAD />
                            <span>"Upload file"</span>
                        }.into_any()
                    }}
                </label>
            </div>

            <nav class=css::views>
                {View::ALL
                    .into_iter()
                    .map(|view| {
                        let is_active = Signal::derive(move || {
                            drive.with(|state| state.view().view() == view)
                        });
                        view! {
                            <button
                                class=move || {
                                    if is_active.get() {
                                        format!("{} {}", css::viewItem, css::viewItemActive)
                                    } else {
                                        css::viewItem.to_string()
                                    }
                                }
                                on:click=move |_| actions::switch_view(ctx, view)
                            >
                                <Icon icon=view_icon(view) />
                                <span>{view.root_label()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <StorageMeter />

            <button
                class=css::logout
                disabled=move || uploading.get()
                on:click=move |_| actions::sign_out(ctx)
            >
                <Icon icon=ic::LOGOUT />
                <span>"Logout"</span>
            </button>
        </aside>
    }
}

#[component]
fn StorageMeter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let storage = Signal::derive(move || ctx.drive.with(|state| state.storage()));

    view! {
        <div class=css::storage>
            <div class=css::storageLabel>"Storage"</div>
            <div class=css::meter>
                <div
                    class=css::meterFill
                    style=move || format!("width: {:.1}%;", storage.get().percent_used())
                ></div>
            </div>
            <div class=css::storageCaption>
                {move || {
                    let usage = storage.get();
                    format_usage(usage.used, usage.limit)
                }}
            </div>
        </div>
    }
}
