use shared::shared_draw_modes::DrawMode;
use yew::prelude::*;

use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ModeSelectorProps {
    pub active: DrawMode,
    pub disabled: bool,
    pub on_select: Callback<DrawMode>,
}

#[function_component(ModeSelector)]
pub fn mode_selector(props: &ModeSelectorProps) -> Html {
    html! {
        <div class="flex justify-center">
            <div class="overflow-x-auto pb-2 [&::-webkit-scrollbar]:h-1.5 [&::-webkit-scrollbar-thumb]:rounded-full [&::-webkit-scrollbar-thumb]:bg-gray-300 dark:[&::-webkit-scrollbar-thumb]:bg-gray-600">
                <div class="flex space-x-4 min-w-max px-4" role="tablist">
                    { for DrawMode::ALL.into_iter().map(|mode| {
                        let info = mode.info();
                        let selected = mode == props.active;
                        let on_select = props.on_select.clone();
                        html! {
                            <button
                                role="tab"
                                aria-selected={selected.to_string()}
                                title={info.description}
                                disabled={props.disabled && !selected}
                                onclick={Callback::from(move |_: MouseEvent| on_select.emit(mode))}
                                class={classes!(
                                    styles::TAB,
                                    if selected { styles::TAB_ACTIVE } else { styles::TAB_INACTIVE },
                                    props.disabled.then_some("opacity-60 cursor-not-allowed"),
                                )}
                            >
                                <span class="mr-2">{info.icon}</span>
                                {info.name}
                            </button>
                        }
                    })}
                </div>
            </div>
        </div>
    }
}
