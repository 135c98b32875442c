use egui::{Color32, FontFamily, FontId, Margin, Rounding, Style, TextStyle, Vec2, Visuals};

const LINE: Color32 = Color32::from_rgb(0x3a, 0x3f, 0x4b);
const BG: Color32 = Color32::from_rgb(0x14, 0x16, 0x1b);
const PANEL: Color32 = Color32::from_rgb(0x1b, 0x1e, 0x25);
const TEXT: Color32 = Color32::from_rgb(0xe6, 0xe8, 0xee);
const PRIMARY: Color32 = Color32::from_rgb(0x4f, 0x8c, 0xff);
const DANGER: Color32 = Color32::from_rgb(0xe0, 0x5c, 0x5c);
const HOVER: Color32 = Color32::from_rgb(0x26, 0x2b, 0x36);

pub fn base_style() -> Style {
    let mut style = Style::default();
    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(10.0, 6.0);
    style.spacing.window_margin = Margin::same(8.0);
    style.spacing.interact_size = Vec2::new(28.0, 28.0);
    style.visuals = base_visuals();
    style.text_styles = [
        (
            TextStyle::Heading,
            FontId::new(16.0, FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
        (
            TextStyle::Button,
            FontId::new(13.0, FontFamily::Proportional),
        ),
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
    ]
    .into();
    style
}

pub fn base_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT);
    visuals.window_fill = BG;
    visuals.panel_fill = PANEL;
    visuals.extreme_bg_color = BG;
    visuals.widgets.noninteractive.bg_fill = PANEL;
    visuals.widgets.noninteractive.bg_stroke.color = LINE;
    visuals.widgets.inactive.bg_fill = PANEL;
    visuals.widgets.inactive.bg_stroke.color = LINE;
    visuals.widgets.hovered.bg_fill = HOVER;
    visuals.widgets.hovered.bg_stroke.color = PRIMARY;
    visuals.widgets.active.bg_fill = HOVER;
    visuals.widgets.active.bg_stroke.color = PRIMARY;
    visuals.selection.bg_fill = PRIMARY;
    visuals.selection.stroke.color = Color32::WHITE;
    visuals.window_stroke.color = LINE;
    visuals.window_rounding = Rounding::same(4.0);
    visuals.error_fg_color = DANGER;
    visuals.warn_fg_color = DANGER;
    visuals
}

pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_style(base_style());
}
