//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::AuthGate;
use crate::config::{ClientConfig, ConfigState};
use crate::core::auth::{load_config, resolve_session};
use crate::core::drive::{refresh, refresh_storage};
use crate::core::{DriveCell, DriveState, HttpDriveApi, MutationDispatcher, RequestContext};
use crate::models::AuthState;
use crate::utils::dom::{log_failure, log_info, reload};

// ============================================================================
// DriveCell for signals
// ============================================================================

impl DriveCell for RwSignal<DriveState> {
    fn with_state<R>(&self, f: impl FnOnce(&DriveState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut DriveState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals, which are
/// cheap to copy (they're just pointers to the underlying reactive state).
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Runtime configuration loading state.
    pub config: RwSignal<ConfigState>,

    /// Session reported by the sign-in provider.
    pub auth: RwSignal<AuthState>,

    /// Browsing engine state.
    pub drive: RwSignal<DriveState>,

    /// Whether the "New folder" dialog is open.
    pub new_folder_open: RwSignal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            config: RwSignal::new(ConfigState::default()),
            auth: RwSignal::new(AuthState::default()),
            drive: RwSignal::new(DriveState::new()),
            new_folder_open: RwSignal::new(false),
        }
    }

    pub fn client_config(&self) -> Option<ClientConfig> {
        match self.config.get_untracked() {
            ConfigState::Ready(config) => Some(config),
            _ => None,
        }
    }

    /// Credentials for the next request; `None` while signed out.
    pub fn request_context(&self) -> Option<RequestContext> {
        let config = self.client_config()?;
        self.auth
            .with_untracked(|auth| RequestContext::for_session(auth, &config.api_base()))
    }

    pub fn dispatcher(&self) -> Option<MutationDispatcher<HttpDriveApi, RwSignal<DriveState>>> {
        let cx = self.request_context()?;
        Some(MutationDispatcher::new(HttpDriveApi, cx, self.drive))
    }

    /// Load config, resolve the session and, once signed in, fetch the
    /// first listing.
    pub fn start(&self) {
        let ctx = *self;
        ctx.config.set(ConfigState::Loading);
        ctx.auth.set(AuthState::Loading);
        spawn_local(async move {
            match load_config().await {
                Ok(config) => {
                    ctx.config.set(ConfigState::Ready(config.clone()));
                    let session = resolve_session(&config).await;
                    ctx.auth.set(session);
                    ctx.load_initial();
                }
                Err(e) => {
                    log_failure(e.class(), "Configuration error", &e);
                    ctx.config.set(ConfigState::Failed(e.to_string()));
                }
            }
        });
    }

    fn load_initial(&self) {
        let Some(cx) = self.request_context() else {
            log_info("Not signed in");
            return;
        };
        let drive = self.drive;
        spawn_local(async move {
            refresh(&HttpDriveApi, &cx, &drive).await;
            let _ = refresh_storage(&HttpDriveApi, &cx, &drive).await;
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Starts config and session resolution
/// - Wraps the app in an ErrorBoundary for graceful error handling
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);
    ctx.start();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #fef2f2;
                    color: #7f1d1d;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="
                        max-width: 600px;
                        text-align: center;
                    ">
                        <h1 style="margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <ul style="
                            text-align: left;
                            background: white;
                            padding: 1rem 1rem 1rem 2rem;
                            border: 1px solid #fecaca;
                            border-radius: 4px;
                            font-size: 0.9rem;
                        ">
                            {move || errors.get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                            }
                        </ul>
                        <button
                            on:click=move |_| reload()
                            style="
                                margin-top: 1.5rem;
                                background: #dc2626;
                                color: white;
                                border: none;
                                padding: 0.5rem 1.5rem;
                                border-radius: 4px;
                                cursor: pointer;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <AuthGate />
        </ErrorBoundary>
    }
}
