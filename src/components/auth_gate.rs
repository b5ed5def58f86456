//! Full-screen states shown before the explorer: start-up, configuration
//! and session failures, and the sign-in page.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::actions;
use crate::components::explorer::Explorer;
use crate::components::icons as ic;
use crate::config::{APP_NAME, APP_TAGLINE, ConfigState};
use crate::models::AuthState;

stylance::import_crate_style!(css, "src/components/auth_gate.module.css");

/// Which full-screen state to render.
#[derive(Clone, PartialEq)]
enum Gate {
    Loading(&'static str),
    ConfigError(String),
    AuthError(String),
    SignIn,
    Ready,
}

/// Switches between the start-up screens and the explorer.
///
/// Configuration and session failures replace the whole application view;
/// nothing else is allowed to.
#[component]
pub fn AuthGate() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let gate = Memo::new(move |_| match ctx.config.get() {
        ConfigState::Loading => Gate::Loading("Initializing application..."),
        ConfigState::Failed(message) => Gate::ConfigError(message),
        ConfigState::Ready(_) => match ctx.auth.get() {
            AuthState::Loading => Gate::Loading("Loading session..."),
            AuthState::Error(message) => Gate::AuthError(message),
            AuthState::Unauthenticated => Gate::SignIn,
            AuthState::Authenticated { .. } => Gate::Ready,
        },
    });

    move || match gate.get() {
        Gate::Loading(message) => view! {
            <div class=css::screen>
                <span class=css::spinner><Icon icon=ic::SPINNER /></span>
                <p class=css::muted>{message}</p>
            </div>
        }
        .into_any(),
        Gate::ConfigError(message) => view! {
            <div class=format!("{} {}", css::screen, css::error)>
                <h2 class=css::title>"Configuration Error"</h2>
                <p>{message}</p>
                <button class=css::button on:click=move |_| ctx.start()>"Retry"</button>
            </div>
        }
        .into_any(),
        Gate::AuthError(message) => view! {
            <div class=format!("{} {}", css::screen, css::error)>
                <h2 class=css::title>"Authentication Error"</h2>
                <pre class=css::details>{message}</pre>
                <button class=css::button on:click=move |_| actions::sign_in(ctx)>
                    "Retry Login"
                </button>
            </div>
        }
        .into_any(),
        Gate::SignIn => view! { <SignIn /> }.into_any(),
        Gate::Ready => view! { <Explorer /> }.into_any(),
    }
}

#[component]
fn SignIn() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::screen>
            <div class=css::card>
                <span class=css::logo><Icon icon=ic::CLOUD /></span>
                <h1 class=css::title>{APP_NAME}</h1>
                <p class=css::muted>{APP_TAGLINE}</p>
                <button class=css::button on:click=move |_| actions::sign_in(ctx)>
                    "Sign in"
                </button>
            </div>
        </div>
    }
}
