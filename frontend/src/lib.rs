pub mod audio;
pub mod config;
pub mod feedback;
pub mod styles;
pub mod hooks;
pub mod components;
pub mod pages;

use yew::prelude::*;
use crate::pages::games::Games;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class={styles::PAGE}>
            <div class="mx-auto">
                <Games />
            </div>
        </div>
    }
}
