//! Full-screen image preview.
//!
//! Steps through the images of the current listing. Keyboard handling lives
//! in the explorer's window listener.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::{ContentIntent, Direction};

use super::AuthImage;

stylance::import_crate_style!(css, "src/components/explorer/carousel.module.css");

#[component]
pub fn Carousel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let drive = ctx.drive;

    let target = Memo::new(move |_| drive.with(|state| state.carousel().target().cloned()));
    let is_open = Signal::derive(move || target.with(Option::is_some));

    let src = Signal::derive(move || {
        let Some(id) = target.with(|t| t.as_ref().map(|file| file.id)) else {
            return String::new();
        };
        ctx.request_context()
            .map(|cx| cx.content_url(id, ContentIntent::Inline))
            .unwrap_or_default()
    });
    let name = Signal::derive(move || {
        target.with(|t| t.as_ref().map(|file| file.name.clone()).unwrap_or_default())
    });
    let caption = Signal::derive(move || {
        let name = name.get();
        match drive.with(|state| state.preview_position()) {
            Some((position, total)) => format!("{} ({} / {})", name, position, total),
            None => name,
        }
    });
    let has_siblings = Signal::derive(move || {
        drive.with(|state| state.preview_position().is_some_and(|(_, total)| total > 1))
    });

    let step = move |direction: Direction| {
        move |event: leptos::ev::MouseEvent| {
            event.stop_propagation();
            drive.update(|state| state.step_preview(direction));
        }
    };
    let close = move |_: leptos::ev::MouseEvent| drive.update(|state| state.close_preview());

    view! {
        <Show when=move || is_open.get()>
            <div class=css::overlay on:click=close>
                <div class=css::toolbar on:click=|event| event.stop_propagation()>
                    <span class=css::caption>{move || caption.get()}</span>
                    <button class=css::close aria-label="Close preview" on:click=close>
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>

                <Show when=move || has_siblings.get()>
                    <button
                        class=format!("{} {}", css::nav, css::prev)
                        aria-label="Previous image"
                        on:click=step(Direction::Previous)
                    >
                        <Icon icon=ic::CHEVRON_LEFT />
                    </button>
                </Show>

                <div class=css::stage on:click=|event| event.stop_propagation()>
                    <AuthImage src=src alt=name class=css::image />
                </div>

                <Show when=move || has_siblings.get()>
                    <button
                        class=format!("{} {}", css::nav, css::next)
                        aria-label="Next image"
                        on:click=step(Direction::Next)
                    >
                        <Icon icon=ic::CHEVRON_RIGHT />
                    </button>
                </Show>
            </div>
        </Show>
    }
}
