use macroquad::prelude::*;

use crate::theme::Theme;

/// Everything a click or menu keypress can do. Buttons carry one of these
/// instead of a callback; the app dispatches them through a single `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Start,
    Quit,
    CycleTheme(i32),
    Restart,
    ToMenu,
}

pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub action: UiAction,
}

impl Button {
    /// Button of the given size centered on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32, label: &'static str, action: UiAction) -> Self {
        Button {
            rect: Rect::new(cx - w / 2.0, cy - h / 2.0, w, h),
            label,
            action,
        }
    }

    pub fn hovered(&self) -> bool {
        let (mx, my) = mouse_position();
        self.rect.contains(vec2(mx, my))
    }

    pub fn draw(&self, theme: &Theme, font_size: f32) {
        let hovered = self.hovered();
        let fill = lerp_color(theme.accent, WHITE, if hovered { 0.35 } else { 0.2 });
        draw_rectangle(
            self.rect.x,
            self.rect.y,
            self.rect.w,
            self.rect.h,
            with_alpha(fill, if hovered { 0.82 } else { 0.71 }),
        );
        draw_rectangle_lines(
            self.rect.x,
            self.rect.y,
            self.rect.w,
            self.rect.h,
            2.0,
            with_alpha(theme.text_secondary, 0.9),
        );
        draw_text_centered(
            self.label,
            self.rect.x + self.rect.w / 2.0,
            self.rect.y + self.rect.h / 2.0,
            font_size,
            theme.text_primary,
        );
    }
}

/// Action of the topmost button under the cursor on a fresh left click.
pub fn clicked(buttons: &[Button]) -> Option<UiAction> {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return None;
    }
    let (mx, my) = mouse_position();
    buttons
        .iter()
        .find(|b| b.rect.contains(vec2(mx, my)))
        .map(|b| b.action)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        lerp(a.r, b.r, t),
        lerp(a.g, b.g, t),
        lerp(a.b, b.b, t),
        lerp(a.a, b.a, t),
    )
}

pub fn with_alpha(c: Color, a: f32) -> Color {
    Color::new(c.r, c.g, c.b, a)
}

/// Draws `text` centered on `(cx, cy)`; `draw_text` itself anchors at the
/// baseline.
pub fn draw_text_centered(text: &str, cx: f32, cy: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(
        text,
        cx - dims.width / 2.0,
        cy - dims.height / 2.0 + dims.offset_y,
        font_size,
        color,
    );
}
