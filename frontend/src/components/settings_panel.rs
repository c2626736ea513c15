use shared::easing::EasingPreset;
use shared::settings::Settings;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::styles;

const EASING_CHOICES: [(EasingPreset, &str); 3] = [
    (EasingPreset::SmoothStop, "Smooth stop"),
    (EasingPreset::SoftStop, "Soft stop"),
    (EasingPreset::ElasticSettle, "Elastic settle"),
];

#[derive(Properties, PartialEq)]
pub struct SettingsPanelProps {
    pub settings: Settings,
    pub disabled: bool,
    pub on_change: Callback<Settings>,
}

#[function_component(SettingsPanel)]
pub fn settings_panel(props: &SettingsPanelProps) -> Html {
    let settings = &props.settings;

    let toggle_mute = {
        let settings = settings.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_change.emit(Settings { muted: !settings.muted, ..settings.clone() });
        })
    };

    let on_motion = {
        let settings = settings.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let reduced_motion = match select.value().as_str() {
                "on" => Some(true),
                "off" => Some(false),
                _ => None,
            };
            on_change.emit(Settings { reduced_motion, ..settings.clone() });
        })
    };

    let on_easing = {
        let settings = settings.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let Ok(index) = select.value().parse::<usize>() else {
                return;
            };
            let Some(&(easing, _)) = EASING_CHOICES.get(index) else {
                return;
            };
            let mut next = settings.clone();
            next.spin.easing = easing;
            on_change.emit(next);
        })
    };

    let motion_value = match settings.reduced_motion {
        Some(true) => "on",
        Some(false) => "off",
        None => "system",
    };

    html! {
        <div class={classes!(styles::CARD, "space-y-4")}>
            <h3 class={styles::TEXT_H3}>{"Settings"}</h3>
            <button class={styles::BUTTON_SECONDARY} onclick={toggle_mute}>
                { if settings.muted { "🔇 Sound off" } else { "🔊 Sound on" } }
            </button>
            <div>
                <label for="reduced-motion" class={styles::TEXT_LABEL}>{"Reduced motion"}</label>
                <select id="reduced-motion" class={styles::INPUT} onchange={on_motion} disabled={props.disabled}>
                    <option value="system" selected={motion_value == "system"}>{"Follow system"}</option>
                    <option value="on" selected={motion_value == "on"}>{"On"}</option>
                    <option value="off" selected={motion_value == "off"}>{"Off"}</option>
                </select>
            </div>
            <div>
                <label for="spin-easing" class={styles::TEXT_LABEL}>{"Wheel stop"}</label>
                <select id="spin-easing" class={styles::INPUT} onchange={on_easing} disabled={props.disabled}>
                    { for EASING_CHOICES.iter().enumerate().map(|(index, (easing, label))| html! {
                        <option value={index.to_string()} selected={*easing == settings.spin.easing}>{*label}</option>
                    })}
                </select>
            </div>
        </div>
    }
}
