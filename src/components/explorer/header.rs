//! Explorer header: search box and account badge.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::AuthState;

stylance::import_crate_style!(css, "src/components/explorer/header.module.css");

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    // Kept in state only; listings are not filtered by it.
    let query = Signal::derive(move || drive.with(|state| state.search_query().to_string()));
    let on_input = move |event: leptos::ev::Event| {
        let value = event_target_value(&event);
        drive.update(|state| state.set_search_query(value));
    };

    let initial = Signal::derive(move || ctx.auth.with(|auth| auth.initial()));
    let user_name = Signal::derive(move || {
        ctx.auth.with(|auth| match auth {
            AuthState::Authenticated { user, .. } => user.clone().unwrap_or_default(),
            _ => String::new(),
        })
    });

    view! {
        <header class=css::header>
            <div class=css::search>
                <span class=css::searchIcon><Icon icon=ic::SEARCH /></span>
                <input
                    class=css::searchInput
                    type="search"
                    placeholder="Search in Drive"
                    prop:value=move || query.get()
                    on:input=on_input
                />
            </div>
            <div class=css::account title=move || user_name.get()>
                <span class=css::avatar>{move || initial.get().to_string()}</span>
            </div>
        </header>
    }
}
