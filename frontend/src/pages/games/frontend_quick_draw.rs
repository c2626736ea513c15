use std::rc::Rc;

use shared::constants::MIN_ITEMS;
use shared::shared_draw_modes::{DrawMode, RoundStage};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::hooks::DrawRoundHandle;
use crate::styles;

const SCRATCH_WIDTH: u32 = 300;
const SCRATCH_HEIGHT: u32 = 160;
const SCRATCH_BRUSH: f64 = 18.0;
// Coverage is estimated from every Nth pixel.
const COVERAGE_STRIDE: usize = 8;

#[derive(Properties, PartialEq)]
pub struct FrontendQuickDrawProps {
    pub mode: DrawMode,
    pub items: Rc<Vec<String>>,
    pub round: DrawRoundHandle,
}

fn start_label(mode: DrawMode) -> &'static str {
    match mode {
        DrawMode::Gachapon => "Turn the crank",
        DrawMode::Scratch => "Get a card",
        DrawMode::Omikuji => "Shake the box",
        DrawMode::Card => "Shuffle the deck",
        DrawMode::RedEnvelope => "Lay out envelopes",
        DrawMode::Wheel => "Spin",
    }
}

fn slot_face(mode: DrawMode) -> &'static str {
    match mode {
        DrawMode::RedEnvelope => "🧧",
        _ => "🂠",
    }
}

#[function_component(FrontendQuickDraw)]
pub fn frontend_quick_draw(props: &FrontendQuickDrawProps) -> Html {
    let mode = props.mode;
    let round = &props.round;
    let info = mode.info();
    let busy = matches!(
        round.stage,
        RoundStage::Preparing { .. } | RoundStage::Picking | RoundStage::Revealing { .. }
    );
    let can_start = !busy && props.items.len() >= MIN_ITEMS;
    let slot_style = format!("background-color: {}", info.color);

    let on_start = {
        let start = round.start.clone();
        Callback::from(move |_: MouseEvent| start.emit(()))
    };

    let table = match round.stage {
        RoundStage::Idle => html! {
            <div class="text-8xl">{info.icon}</div>
        },
        RoundStage::Preparing { .. } if mode.uses_layout() => html! {
            <div class={styles::DRAW_GRID}>
                { for round.layout.iter().map(|_| html! {
                    <div class={classes!(styles::DRAW_SLOT, styles::SHAKE)} style={slot_style.clone()}>{slot_face(mode)}</div>
                })}
            </div>
        },
        RoundStage::Preparing { .. } => html! {
            <div class={classes!("text-8xl", styles::SHAKE)}>{info.icon}</div>
        },
        RoundStage::Picking => match mode {
            DrawMode::Card | DrawMode::RedEnvelope => html! {
                <div class={styles::DRAW_GRID}>
                    { for round.layout.iter().enumerate().map(|(slot, _)| {
                        let pick = round.pick.clone();
                        html! {
                            <button
                                class={classes!(styles::DRAW_SLOT, styles::DRAW_SLOT_PICKABLE)}
                                style={slot_style.clone()}
                                onclick={Callback::from(move |_: MouseEvent| pick.emit(slot))}
                                aria-label={format!("Pick {}", slot + 1)}
                            >
                                {slot_face(mode)}
                            </button>
                        }
                    })}
                </div>
            },
            DrawMode::Gachapon => {
                let pick = round.pick.clone();
                html! {
                    <button
                        class={classes!("text-8xl", "cursor-pointer", "hover:scale-110", "transition-transform")}
                        onclick={Callback::from(move |_: MouseEvent| pick.emit(0))}
                        aria-label="Open the capsule"
                    >
                        {"🔮"}
                    </button>
                }
            }
            DrawMode::Scratch => html! {
                <ScratchCard
                    item={round.chosen.clone().unwrap_or_default()}
                    on_scratch={round.scratch.clone()}
                />
            },
            _ => html! {},
        },
        RoundStage::Revealing { .. } | RoundStage::Finished => {
            let chosen = round.chosen.clone().unwrap_or_default();
            if mode.uses_layout() {
                html! {
                    <div class={styles::DRAW_GRID}>
                        { for round.layout.iter().enumerate().map(|(slot, item)| {
                            let revealed = round.chosen_slot == Some(slot);
                            html! {
                                <div class={classes!(
                                    styles::DRAW_SLOT,
                                    "text-sm", "p-2", "text-center", "break-words",
                                    if revealed { "bg-white dark:bg-gray-700 ring-4 ring-yellow-400 text-gray-900 dark:text-white" } else { "opacity-40" }
                                )} style={(!revealed).then(|| slot_style.clone())}>
                                    { if revealed { html! { {item.clone()} } } else { html! { {slot_face(mode)} } } }
                                </div>
                            }
                        })}
                    </div>
                }
            } else {
                html! {
                    <div class={classes!(styles::CARD, "text-center", "min-w-[16rem]")}>
                        <div class="text-5xl mb-4">{info.icon}</div>
                        <div class={styles::TEXT_H2}>{chosen}</div>
                    </div>
                }
            }
        }
    };

    html! {
        <div class={styles::DRAW_STAGE}>
            <div class="text-center">
                <h2 class={styles::TEXT_H2}>{info.name}</h2>
                <p class={styles::TEXT_SMALL}>{info.description}</p>
            </div>
            {table}
            <button class={styles::BUTTON_SPIN} onclick={on_start} disabled={!can_start}>
                {start_label(mode)}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ScratchCardProps {
    item: String,
    on_scratch: Callback<f64>,
}

fn canvas_context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Share of fully cleared pixels, sampled.
fn cleared_fraction(alpha_channel: &[u8]) -> f64 {
    let samples = alpha_channel.len() / 4 / COVERAGE_STRIDE;
    if samples == 0 {
        return 0.0;
    }
    let cleared = (0..samples)
        .filter(|i| alpha_channel[i * COVERAGE_STRIDE * 4 + 3] == 0)
        .count();
    cleared as f64 / samples as f64
}

#[function_component(ScratchCard)]
fn scratch_card(props: &ScratchCardProps) -> Html {
    let canvas_ref = use_node_ref();
    let scratching = use_mut_ref(|| false);

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            if let Some(context) = canvas_ref.cast::<HtmlCanvasElement>().as_ref().and_then(canvas_context) {
                context.set_fill_style_str("#9ca3af");
                context.fill_rect(0.0, 0.0, SCRATCH_WIDTH as f64, SCRATCH_HEIGHT as f64);
                context.set_fill_style_str("#6b7280");
                context.set_font("bold 20px 'Segoe UI', Roboto, system-ui, sans-serif");
                context.set_text_align("center");
                context.set_text_baseline("middle");
                let _ = context.fill_text("Scratch here", SCRATCH_WIDTH as f64 / 2.0, SCRATCH_HEIGHT as f64 / 2.0);
            }
            || ()
        });
    }

    let scratch_at = {
        let canvas_ref = canvas_ref.clone();
        let on_scratch = props.on_scratch.clone();
        move |x: f64, y: f64| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let Some(context) = canvas_context(&canvas) else {
                return;
            };
            let _ = context.set_global_composite_operation("destination-out");
            context.begin_path();
            let _ = context.arc(x, y, SCRATCH_BRUSH, 0.0, 2.0 * std::f64::consts::PI);
            context.fill();
            if let Ok(image) = context.get_image_data(0.0, 0.0, SCRATCH_WIDTH as f64, SCRATCH_HEIGHT as f64) {
                on_scratch.emit(cleared_fraction(&image.data()));
            }
        }
    };

    let onpointerdown = {
        let scratching = scratching.clone();
        let scratch_at = scratch_at.clone();
        Callback::from(move |e: PointerEvent| {
            *scratching.borrow_mut() = true;
            scratch_at(e.offset_x() as f64, e.offset_y() as f64);
        })
    };
    let onpointermove = {
        let scratching = scratching.clone();
        Callback::from(move |e: PointerEvent| {
            if *scratching.borrow() {
                scratch_at(e.offset_x() as f64, e.offset_y() as f64);
            }
        })
    };
    let onpointerup = {
        let scratching = scratching.clone();
        Callback::from(move |_: PointerEvent| *scratching.borrow_mut() = false)
    };
    let onpointerleave = Callback::from(move |_: PointerEvent| *scratching.borrow_mut() = false);

    html! {
        <div class="relative rounded-lg overflow-hidden shadow-lg" style={format!("width: {}px; height: {}px", SCRATCH_WIDTH, SCRATCH_HEIGHT)}>
            <div class={classes!("absolute", "inset-0", "flex", "items-center", "justify-center", "bg-white", "dark:bg-gray-700", "p-4", "text-center", styles::TEXT_H3)}>
                {&props.item}
            </div>
            <canvas
                ref={canvas_ref}
                width={SCRATCH_WIDTH.to_string()}
                height={SCRATCH_HEIGHT.to_string()}
                class="absolute inset-0 touch-none cursor-crosshair"
                {onpointerdown}
                {onpointermove}
                {onpointerup}
                {onpointerleave}
            />
        </div>
    }
}
