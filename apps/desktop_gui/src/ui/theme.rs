use egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui};

pub const ERROR_TEXT: Color32 = Color32::from_rgb(220, 90, 90);
pub const HINT_TEXT: Color32 = Color32::from_rgb(200, 160, 60);
pub const BADGE_FILL: Color32 = Color32::from_rgb(88, 101, 242);

pub fn lighten_color(c: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn pack_badge(ui: &mut Ui, size: u64) {
    Frame::new()
        .fill(BADGE_FILL)
        .stroke(Stroke::new(1.0, lighten_color(BADGE_FILL, 0.35)))
        .corner_radius(CornerRadius::same(4))
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(size.to_string()).color(Color32::WHITE));
        });
}

pub fn error_label(ui: &mut Ui, message: &str) {
    ui.colored_label(ERROR_TEXT, message);
}
