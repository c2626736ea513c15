use shared::constants::{MAX_ITEMS, TOO_FEW_ITEMS_ERROR, TRUNCATED_ITEMS_WARNING};
use shared::validation::item_list_status;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct InputPanelProps {
    pub value: String,
    pub on_change: Callback<String>,
}

#[function_component(InputPanel)]
pub fn input_panel(props: &InputPanelProps) -> Html {
    let status = item_list_status(&props.value);

    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class={styles::CARD}>
            <label for="draw-items" class={styles::TEXT_LABEL}>{"Items"}</label>
            <textarea
                id="draw-items"
                rows="8"
                class={if status.too_few { styles::INPUT_ERROR } else { styles::INPUT }}
                placeholder="One per line, or separated by commas"
                value={props.value.clone()}
                {oninput}
            />
            <p class={styles::TEXT_HINT}>{format!("{} / {} items", status.count, MAX_ITEMS)}</p>
            if status.too_few {
                <p class={styles::TEXT_ERROR}>{TOO_FEW_ITEMS_ERROR}</p>
            }
            if status.truncated {
                <p class={classes!(styles::ALERT_WARNING, "mt-2")}>{TRUNCATED_ITEMS_WARNING}</p>
            }
        </div>
    }
}
