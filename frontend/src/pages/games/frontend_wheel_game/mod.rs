mod spin_driver;
mod wheel_canvas;

use std::rc::Rc;

use shared::constants::MIN_ITEMS;
use yew::prelude::*;

use crate::hooks::WheelSpinHandle;
use crate::styles;
pub use spin_driver::SpinDriver;
use wheel_canvas::WheelCanvas;

#[derive(Properties, PartialEq)]
pub struct FrontendWheelGameProps {
    pub items: Rc<Vec<String>>,
    pub wheel: WheelSpinHandle,
}

#[function_component(FrontendWheelGame)]
pub fn frontend_wheel_game(props: &FrontendWheelGameProps) -> Html {
    let wheel = &props.wheel;
    let can_spin = !wheel.is_spinning && props.items.len() >= MIN_ITEMS;

    let onclick = {
        let spin = wheel.spin.clone();
        Callback::from(move |_: MouseEvent| spin.emit(()))
    };

    html! {
        <div class="flex flex-col items-center space-y-6">
            <WheelCanvas
                items={props.items.clone()}
                rotation={wheel.angle}
                is_spinning={wheel.is_spinning}
            />
            <button class={styles::BUTTON_SPIN} {onclick} disabled={!can_spin}>
                { if wheel.is_spinning { "Spinning..." } else { "Spin" } }
            </button>
        </div>
    }
}
