use chrono::{DateTime, Local, Utc};
use shared::history::HistoryEntry;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct HistoryPanelProps {
    pub entries: Vec<HistoryEntry>,
    pub on_clear: Callback<()>,
}

fn format_time(timestamp_ms: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64)
        .map(|time| time.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[function_component(HistoryPanel)]
pub fn history_panel(props: &HistoryPanelProps) -> Html {
    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    html! {
        <div class={styles::CARD}>
            <div class="flex items-center justify-between mb-4">
                <h3 class={styles::TEXT_H3}>{"History"}</h3>
                if !props.entries.is_empty() {
                    <button class={classes!(styles::BUTTON_SECONDARY, "text-sm")} onclick={on_clear}>{"Clear"}</button>
                }
            </div>
            if props.entries.is_empty() {
                <p class={styles::TEXT_SMALL}>{"No draws yet"}</p>
            } else {
                <ul class="space-y-2 max-h-80 overflow-y-auto">
                    { for props.entries.iter().map(|entry| {
                        let info = entry.mode.info();
                        html! {
                            <li key={entry.id.clone()} class="flex items-center justify-between gap-2">
                                <span class={classes!(styles::TEXT_BODY, "truncate")} title={info.name}>
                                    <span class="mr-2">{info.icon}</span>
                                    {entry.item.clone()}
                                </span>
                                <span class={styles::TEXT_SMALL}>{format_time(entry.timestamp)}</span>
                            </li>
                        }
                    })}
                </ul>
            }
        </div>
    }
}
