use std::f64::consts::PI;
use std::rc::Rc;

use shared::colors::generate_colors;
use shared::shared_wheel_game::{slice_angle, slice_span, POINTER_OFFSET_DEG};
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

const CANVAS_SIZE: u32 = 420;
const MAX_LABEL_CHARS: usize = 14;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub items: Rc<Vec<String>>,
    pub rotation: f64,
    pub is_spinning: bool,
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn short_label(item: &str) -> String {
    if item.chars().count() <= MAX_LABEL_CHARS {
        return item.to_string();
    }
    let mut label: String = item.chars().take(MAX_LABEL_CHARS - 1).collect();
    label.push('…');
    label
}

fn draw_wheel(context: &CanvasRenderingContext2d, width: f64, height: f64, items: &[String], rotation: f64, is_spinning: bool) {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 20.0;
    let dark = is_dark_mode();

    context.clear_rect(0.0, 0.0, width, height);

    // Outer glow
    context.begin_path();
    let glow = if is_spinning { 0.25 } else { 0.15 };
    context.set_fill_style_str(&if dark {
        format!("rgba(130, 100, 255, {})", glow)
    } else {
        format!("rgba(100, 130, 255, {})", glow)
    });
    let _ = context.arc(center_x, center_y, radius + 15.0, 0.0, 2.0 * PI);
    context.fill();

    let count = items.len();
    if count < 2 {
        context.begin_path();
        context.set_fill_style_str(if dark { "#1a1c2e" } else { "#f0f2ff" });
        let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
        context.fill();
        context.set_text_align("center");
        context.set_text_baseline("middle");
        context.set_font("600 18px 'Segoe UI', Roboto, system-ui, sans-serif");
        context.set_fill_style_str(if dark { "#9ca3af" } else { "#6b7280" });
        let _ = context.fill_text("Add at least two items", center_x, center_y);
        return;
    }

    let colors = generate_colors(count);
    let half_slice = slice_angle(count) / 2.0;
    let font_px = if count > 24 { 11 } else if count > 12 { 14 } else { 18 };

    for (index, item) in items.iter().enumerate() {
        let (start, end) = slice_span(index, count, rotation);
        let color = &colors[index];

        context.begin_path();
        context.set_fill_style_str(&color.background());
        context.move_to(center_x, center_y);
        let _ = context.arc(center_x, center_y, radius, to_radians(start), to_radians(end));
        context.close_path();
        context.fill();

        context.set_stroke_style_str(if dark { "rgba(255, 255, 255, 0.3)" } else { "rgba(255, 255, 255, 0.8)" });
        context.set_line_width(2.0);
        context.stroke();

        context.save();
        let _ = context.translate(center_x, center_y);
        let _ = context.rotate(to_radians(start + half_slice));
        context.set_text_align("right");
        context.set_text_baseline("middle");
        context.set_font(&format!("bold {}px 'Segoe UI', Roboto, system-ui, sans-serif", font_px));
        context.set_fill_style_str(color.text());
        let _ = context.fill_text(&short_label(item), radius - 16.0, 0.0);
        context.restore();
    }

    // Hub
    let hub_radius = radius * 0.14;
    context.begin_path();
    context.set_fill_style_str(if dark { "#2d3142" } else { "#8b5cf6" });
    let _ = context.arc(center_x, center_y, hub_radius, 0.0, 2.0 * PI);
    context.fill();
    context.begin_path();
    context.set_fill_style_str(if dark { "#d8b4fe" } else { "#ffffff" });
    let _ = context.arc(center_x, center_y, hub_radius * 0.3, 0.0, 2.0 * PI);
    context.fill();

    // Rim
    context.begin_path();
    context.set_stroke_style_str(if dark { "rgba(180, 130, 255, 0.5)" } else { "rgba(130, 100, 255, 0.5)" });
    context.set_line_width(if is_spinning { 5.0 } else { 4.0 });
    let _ = context.arc(center_x, center_y, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    // Pointer at 12 o'clock, pointing into the wheel.
    let tip = to_radians(-POINTER_OFFSET_DEG);
    let tip_x = center_x + (radius - 6.0) * tip.cos();
    let tip_y = center_y + (radius - 6.0) * tip.sin();
    context.set_shadow_color(if is_spinning { "rgba(255, 215, 130, 0.8)" } else { "rgba(255, 215, 0, 0.6)" });
    context.set_shadow_blur(if is_spinning { 10.0 } else { 4.0 });
    context.begin_path();
    context.move_to(tip_x, tip_y);
    context.line_to(tip_x - 14.0, tip_y - 30.0);
    context.line_to(tip_x + 14.0, tip_y - 30.0);
    context.close_path();
    context.set_fill_style_str("#fbbf24");
    context.fill();
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.items.clone(), props.rotation, props.is_spinning),
            move |(items, rotation, is_spinning)| {
                let context = canvas_ref.cast::<HtmlCanvasElement>().and_then(|canvas| {
                    let context = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()?
                        .dyn_into::<CanvasRenderingContext2d>()
                        .ok()?;
                    Some((canvas, context))
                });
                if let Some((canvas, context)) = context {
                    draw_wheel(
                        &context,
                        canvas.width() as f64,
                        canvas.height() as f64,
                        items,
                        *rotation,
                        *is_spinning,
                    );
                }
                || ()
            },
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={CANVAS_SIZE.to_string()}
            height={CANVAS_SIZE.to_string()}
            class="w-full max-w-[420px] h-auto"
            role="img"
            aria-label="Prize wheel"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Pizza"), "Pizza");
        assert_eq!(short_label("A very long option name"), "A very long o…");
        assert_eq!(short_label("A very long option name").chars().count(), MAX_LABEL_CHARS);
    }
}
