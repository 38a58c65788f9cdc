use blockworld_input::{Button, Rect, Screen, Session};
use egui::{Align2, Color32, FontId, LayerId, Pos2};

/// Paint the UI for the active screen. Title buttons are drawn only; clicks
/// are hit-tested by the session, not by egui.
pub fn draw(ctx: &egui::Context, session: &mut Session, title: &str) {
    match session.screen() {
        Screen::Title => draw_title(ctx, session, title),
        Screen::SettingsOverlay => {
            draw_title(ctx, session, title);
            draw_settings(ctx, session);
        }
        Screen::InGame => draw_hud(ctx, session),
    }
}

fn label(button: Button) -> &'static str {
    match button {
        Button::Start => "Start",
        Button::Settings => "Settings",
        Button::Exit => "Exit",
    }
}

/// Window pixels to egui points.
fn to_points(rect: Rect, pixels_per_point: f32) -> egui::Rect {
    egui::Rect::from_min_max(
        Pos2::new(rect.min.x / pixels_per_point, rect.min.y / pixels_per_point),
        Pos2::new(rect.max.x / pixels_per_point, rect.max.y / pixels_per_point),
    )
}

fn draw_title(ctx: &egui::Context, session: &Session, title: &str) {
    let ppp = ctx.pixels_per_point();
    let painter = ctx.layer_painter(LayerId::background());
    let screen = ctx.screen_rect();

    painter.rect_filled(screen, 0.0, Color32::from_black_alpha(150));
    painter.text(
        Pos2::new(screen.center().x, screen.height() * 0.25),
        Align2::CENTER_CENTER,
        title,
        FontId::proportional(56.0),
        Color32::WHITE,
    );

    let cursor = session.cursor();
    for (button, rect) in session.layout().buttons() {
        let fill = if rect.contains(cursor) {
            Color32::from_rgb(96, 150, 72)
        } else {
            Color32::from_rgb(64, 100, 48)
        };
        let r = to_points(rect, ppp);
        painter.rect_filled(r, 6.0, fill);
        painter.text(
            r.center(),
            Align2::CENTER_CENTER,
            label(button),
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

fn draw_settings(ctx: &egui::Context, session: &mut Session) {
    egui::Window::new("Settings")
        .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            let mut sensitivity = session.camera().mouse_sensitivity;
            let mut speed = session.camera().movement_speed;
            let changed = ui
                .add(
                    egui::Slider::new(&mut sensitivity, 0.01..=1.0).text("Mouse sensitivity"),
                )
                .changed()
                | ui.add(egui::Slider::new(&mut speed, 1.0..=50.0).text("Movement speed"))
                    .changed();
            if changed {
                session.set_tuning(speed, sensitivity);
            }
            ui.label("Click Settings again to close.");
        });
}

fn draw_hud(ctx: &egui::Context, session: &Session) {
    let camera = session.camera();
    let p = camera.position;
    egui::Area::new(egui::Id::new("hud"))
        .anchor(Align2::LEFT_TOP, [8.0, 8.0])
        .show(ctx, |ui| {
            ui.colored_label(
                Color32::WHITE,
                format!(
                    "pos ({:.1}, {:.1}, {:.1})  yaw {:.0}  pitch {:.0}",
                    p.x,
                    p.y,
                    p.z,
                    camera.yaw(),
                    camera.pitch()
                ),
            );
        });
}
