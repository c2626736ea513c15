mod frontend_quick_draw;
pub(crate) mod frontend_wheel_game;

use log::warn;
use shared::history::HistoryEntry;
use shared::settings::Settings;
use shared::shared_draw_modes::{DrawMode, DrawOutcome, RoundStage};
use shared::validation::parse_items;
use yew::prelude::*;

use crate::components::{HistoryPanel, InputPanel, ModeSelector, ResultOverlay, SettingsPanel};
use crate::config;
use crate::feedback::BrowserFeedback;
use crate::hooks::{use_draw_round, use_wheel_spin};
use crate::styles;
use frontend_quick_draw::FrontendQuickDraw;
use frontend_wheel_game::FrontendWheelGame;

fn new_entry_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

#[function_component]
pub fn Games() -> Html {
    let settings = use_state(config::load_settings);
    let history = use_state(config::load_history);
    let result = use_state(|| None::<DrawOutcome>);
    let platform_reduced_motion = use_state(config::prefers_reduced_motion);

    let items = use_memo(settings.items_text.clone(), |text| parse_items(text));
    let feedback = BrowserFeedback { muted: settings.muted };
    let reduced_motion = settings.prefers_reduced_motion(*platform_reduced_motion);

    let on_result = {
        let history = history.clone();
        let result = result.clone();
        Callback::from(move |outcome: DrawOutcome| {
            let mut next = (*history).clone();
            next.record(HistoryEntry {
                id: new_entry_id(),
                item: outcome.item.clone(),
                mode: outcome.mode,
                timestamp: js_sys::Date::now(),
            });
            if let Err(e) = config::save_history(&next) {
                warn!("{}", e);
            }
            history.set(next);
            result.set(Some(outcome));
        })
    };

    let wheel = use_wheel_spin(
        items.clone(),
        settings.spin.clone(),
        reduced_motion,
        feedback,
        on_result.clone(),
    );
    let round = use_draw_round(settings.mode, items.clone(), feedback, on_result);

    let round_active = matches!(
        round.stage,
        RoundStage::Preparing { .. } | RoundStage::Picking | RoundStage::Revealing { .. }
    );
    let busy = wheel.is_spinning || round_active;

    let update_settings = {
        let settings = settings.clone();
        Callback::from(move |next: Settings| {
            if let Err(e) = config::save_settings(&next) {
                warn!("{}", e);
            }
            settings.set(next);
        })
    };

    let on_items = {
        let settings = settings.clone();
        let update_settings = update_settings.clone();
        Callback::from(move |items_text: String| {
            update_settings.emit(Settings { items_text, ..(*settings).clone() });
        })
    };

    let on_mode = {
        let settings = settings.clone();
        let update_settings = update_settings.clone();
        Callback::from(move |mode: DrawMode| {
            if mode != settings.mode {
                update_settings.emit(Settings { mode, ..(*settings).clone() });
            }
        })
    };

    let on_clear_history = {
        let history = history.clone();
        Callback::from(move |_: ()| {
            let mut next = (*history).clone();
            next.clear();
            if let Err(e) = config::save_history(&next) {
                warn!("{}", e);
            }
            history.set(next);
        })
    };

    let on_close = {
        let result = result.clone();
        Callback::from(move |_: ()| result.set(None))
    };

    let on_again = {
        let result = result.clone();
        let spin = wheel.spin.clone();
        let start = round.start.clone();
        let mode = settings.mode;
        Callback::from(move |_: ()| {
            result.set(None);
            if mode == DrawMode::Wheel {
                spin.emit(());
            } else {
                start.emit(());
            }
        })
    };

    html! {
        <div class={styles::CONTAINER_LG}>
            <div class="space-y-8">
                <h1 class={classes!(styles::TEXT_H2, "text-center")}>{"Lucky Draw"}</h1>
                <ModeSelector active={settings.mode} disabled={busy} on_select={on_mode} />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                    <div class={classes!(styles::CARD, "lg:col-span-2", "flex", "justify-center")}>
                        {match settings.mode {
                            DrawMode::Wheel => html! {
                                <FrontendWheelGame items={items.clone()} wheel={wheel.clone()} />
                            },
                            mode => html! {
                                <FrontendQuickDraw key={mode.id()} {mode} items={items.clone()} round={round.clone()} />
                            },
                        }}
                    </div>
                    <div class="space-y-6">
                        <InputPanel value={settings.items_text.clone()} on_change={on_items} />
                        <SettingsPanel settings={(*settings).clone()} disabled={busy} on_change={update_settings} />
                        <HistoryPanel entries={history.entries().to_vec()} on_clear={on_clear_history} />
                    </div>
                </div>
            </div>

            if let Some(outcome) = (*result).clone() {
                <ResultOverlay {outcome} {on_close} {on_again} />
            }
        </div>
    }
}
