use gloo_events::EventListener;
use shared::shared_draw_modes::DrawOutcome;
use wasm_bindgen::JsCast;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ResultOverlayProps {
    pub outcome: DrawOutcome,
    pub on_close: Callback<()>,
    pub on_again: Callback<()>,
}

#[function_component(ResultOverlay)]
pub fn result_overlay(props: &ResultOverlayProps) -> Html {
    let info = props.outcome.mode.info();

    {
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let listener = window().and_then(|w| w.document()).map(|document| {
                EventListener::new(&document, "keydown", move |event| {
                    let escape = event
                        .dyn_ref::<KeyboardEvent>()
                        .map(|e| e.key() == "Escape")
                        .unwrap_or(false);
                    if escape {
                        on_close.emit(());
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_again = {
        let on_again = props.on_again.clone();
        Callback::from(move |_: MouseEvent| on_again.emit(()))
    };

    html! {
        <div class={styles::OVERLAY} onclick={on_backdrop} role="dialog" aria-modal="true" aria-labelledby="draw-result">
            <div class={styles::OVERLAY_CARD} onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="text-5xl">{info.icon}</div>
                <p class={classes!(styles::TEXT_SMALL, "mt-2")}>{info.name}</p>
                <div id="draw-result" class={styles::OVERLAY_ITEM}>{props.outcome.item.clone()}</div>
                <div class="flex justify-center gap-4">
                    <button class={styles::BUTTON_SECONDARY} onclick={on_close}>{"Close"}</button>
                    <button class={styles::BUTTON_PRIMARY} onclick={on_again}>{"Draw again"}</button>
                </div>
            </div>
        </div>
    }
}
