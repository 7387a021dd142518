// Reusable UI components
// Bubble launcher, message entries, typing indicator, panel controls

use crate::state::{Author, Message};
use crate::ui::ids;
use eframe::egui;

/// Render the round launcher button
pub fn bubble_button(ui: &mut egui::Ui, open: bool) -> egui::Response {
    let glyph = if open { "✕" } else { "💬" };
    let button = egui::Button::new(egui::RichText::new(glyph).size(22.0))
        .rounding(egui::Rounding::same(28.0))
        .min_size(egui::vec2(56.0, 56.0));
    ui.push_id(ids::BUBBLE, |ui| ui.add(button))
        .inner
        .on_hover_text(if open { "Close chat" } else { "Open chat" })
}

/// Render one log entry
/// User entries are right-aligned and use the selection color, bot entries
/// are left-aligned on the faint background
pub fn message_entry(ui: &mut egui::Ui, index: usize, message: &Message) {
    let is_user = message.author == Author::User;
    let fill = if is_user {
        ui.visuals().selection.bg_fill
    } else {
        ui.visuals().faint_bg_color
    };
    let layout = if is_user {
        egui::Layout::right_to_left(egui::Align::TOP)
    } else {
        egui::Layout::left_to_right(egui::Align::TOP)
    };
    let max_width = ui.available_width() * 0.8;

    ui.push_id((ids::role_class(message.author), index), |ui| {
        ui.with_layout(layout, |ui| {
            egui::Frame::none()
                .fill(fill)
                .rounding(egui::Rounding::same(10.0))
                .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.add(egui::Label::new(&message.text).wrap(true));
                });
        });
    });
}

/// Render the typing indicator
pub fn typing_indicator(ui: &mut egui::Ui) {
    ui.push_id(ids::TYPING, |ui| {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new("Assistant is typing…").italics().weak());
        });
    });
}

/// Render the send button
pub fn send_button(ui: &mut egui::Ui, enabled: bool) -> egui::Response {
    ui.push_id(ids::SEND, |ui| {
        ui.add_enabled(enabled, egui::Button::new(egui::RichText::new("Send").strong()))
    })
    .inner
}

/// Render the close button of the panel header
pub fn close_button(ui: &mut egui::Ui) -> egui::Response {
    ui.push_id(ids::CLOSE, |ui| ui.small_button("✕"))
        .inner
        .on_hover_text("Close chat")
}
