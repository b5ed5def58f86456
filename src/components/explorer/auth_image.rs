//! Image behind bearer-token auth.
//!
//! Fetches the bytes with the session token and renders them through an
//! object URL owned by this component. Switching `src` releases the old URL;
//! an empty `src` shows nothing; unmounting releases the current one. A
//! failed image can be retried by clicking its placeholder.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::error::{ErrorClass, FetchError};
use crate::core::{AcquireTicket, BlobUrls, DriveApi, HttpDriveApi, ResourceSlot, ResourceView};
use crate::utils::dom::log_failure;

stylance::import_crate_style!(css, "src/components/explorer/auth_image.module.css");

#[component]
pub fn AuthImage(
    #[prop(into)] src: Signal<String>,
    #[prop(into)] alt: Signal<String>,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let slot = StoredValue::new(ResourceSlot::new(BlobUrls));
    let state = RwSignal::new(ResourceView::Idle);

    let load = move |ticket: AcquireTicket| {
        state.set(ResourceView::Loading);

        let Some(cx) = ctx.request_context() else {
            slot.try_update_value(|slot| slot.resolve(&ticket, Err(FetchError::HttpError(401))));
            state.set(ResourceView::Failed);
            return;
        };

        spawn_local(async move {
            let result = HttpDriveApi.fetch_content(&cx, ticket.url()).await;
            if let Err(e) = &result {
                log_failure(ErrorClass::Resource, &format!("Could not load {}", ticket.url()), e);
            }
            // Outdated or disposed slots drop the result
            let landed = slot
                .try_update_value(|slot| slot.resolve(&ticket, result).then(|| slot.view()))
                .flatten();
            if let Some(next) = landed {
                state.try_set(next);
            }
        });
    };

    Effect::new(move |_| {
        let url = src.get();
        match slot.try_update_value(|slot| slot.acquire(&url)).flatten() {
            Some(ticket) => load(ticket),
            None if url.is_empty() => state.set(ResourceView::Idle),
            None => {}
        }
    });

    let retry = move |event: leptos::ev::MouseEvent| {
        event.stop_propagation();
        let url = src.get_untracked();
        if url.is_empty() {
            return;
        }
        if let Some(ticket) = slot.try_update_value(|slot| slot.reload(&url)) {
            load(ticket);
        }
    };

    on_cleanup(move || {
        slot.try_update_value(|slot| slot.release());
    });

    view! {
        <div class=format!("{} {}", css::frame, class)>
            {move || match state.get() {
                ResourceView::Idle | ResourceView::Loading => view! {
                    <span class=css::spinner><Icon icon=ic::SPINNER /></span>
                }.into_any(),
                ResourceView::Ready(object_url) => view! {
                    <img class=css::image src=object_url alt=move || alt.get() />
                }.into_any(),
                ResourceView::Failed => view! {
                    <button class=css::fallback title="Could not load image. Click to retry" on:click=retry>
                        <Icon icon=ic::FILE_IMAGE />
                    </button>
                }.into_any(),
            }}
        </div>
    }
}
