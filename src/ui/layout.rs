// Widget layout
// Places the bubble in the bottom-right corner and the panel above it, and
// turns clicks and key presses into widget operations

use crate::state::EnterAction;
use crate::ui::components::*;
use crate::ui::ids;
use crate::widget::ChatWidget;
use eframe::egui;

/// Margin between the widget and the window edge
const EDGE_MARGIN: f32 = 24.0;
/// Panel size
const PANEL_SIZE: egui::Vec2 = egui::vec2(340.0, 440.0);
/// Vertical room reserved for the bubble below the panel
const BUBBLE_CLEARANCE: f32 = 72.0;

/// Render the widget over whatever the host has drawn
///
/// Commits any replies that arrived since the last frame. Does nothing while
/// the widget is uninitialized.
pub fn render_widget(ctx: &egui::Context, widget: &mut ChatWidget) {
    if !widget.is_initialized() {
        return;
    }
    widget.poll_replies();

    render_bubble(ctx, widget);
    if widget.is_open() {
        render_panel(ctx, widget);
    }
}

/// Render the floating launcher
fn render_bubble(ctx: &egui::Context, widget: &mut ChatWidget) {
    egui::Area::new(egui::Id::new(ids::BUBBLE))
        .anchor(
            egui::Align2::RIGHT_BOTTOM,
            egui::vec2(-EDGE_MARGIN, -EDGE_MARGIN),
        )
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            if bubble_button(ui, widget.is_open()).clicked() {
                widget.toggle();
            }
        });
}

/// Render the message panel
fn render_panel(ctx: &egui::Context, widget: &mut ChatWidget) {
    let mut close_requested = false;
    let mut submit_requested = false;

    egui::Window::new("Fly Me Assistant")
        .id(egui::Id::new(ids::PANEL))
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .fixed_size(PANEL_SIZE)
        .anchor(
            egui::Align2::RIGHT_BOTTOM,
            egui::vec2(-EDGE_MARGIN, -(EDGE_MARGIN + BUBBLE_CLEARANCE)),
        )
        .show(ctx, |ui| {
            // Header
            ui.horizontal(|ui| {
                ui.heading("Fly Me Assistant");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if close_button(ui).clicked() {
                        close_requested = true;
                    }
                });
            });
            ui.separator();

            // Log, leaving room for the typing indicator and the composer
            if let Some(conversation) = widget.conversation_mut() {
                let scroll_to_latest = conversation.take_scroll_request();
                let log_height = ui.available_height() - 96.0;
                egui::ScrollArea::vertical()
                    .id_source(ids::MESSAGES)
                    .max_height(log_height.max(0.0))
                    .auto_shrink([false; 2])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for (index, message) in conversation.messages().iter().enumerate() {
                            message_entry(ui, index, message);
                            ui.add_space(6.0);
                        }
                        if scroll_to_latest {
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        }
                    });

                if conversation.is_typing() {
                    typing_indicator(ui);
                    // Keep the spinner moving while we wait
                    ui.ctx().request_repaint();
                }
            }
            ui.separator();

            // Composer
            let input_id = egui::Id::new(ids::INPUT);
            let focused = ui.memory(|m| m.has_focus(input_id));
            // Enter must be taken before the text field sees it, Shift+Enter is
            // left to the field as a line break
            if focused {
                let action = ui.input(|i| {
                    i.key_pressed(egui::Key::Enter)
                        .then(|| EnterAction::for_shift(i.modifiers.shift))
                });
                if action == Some(EnterAction::Submit) {
                    ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));
                    submit_requested = true;
                }
            }

            if let Some(composer) = widget.composer_mut() {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::multiline(composer.buffer_mut())
                            .id(input_id)
                            .desired_rows(2)
                            .desired_width(ui.available_width() - 64.0)
                            .hint_text("Type your message…"),
                    );
                    let can_send = composer.can_submit();
                    if send_button(ui, can_send).clicked() {
                        submit_requested = true;
                    }
                });
            }
        });

    if submit_requested {
        widget.submit_composer();
        ctx.memory_mut(|m| m.request_focus(egui::Id::new(ids::INPUT)));
    }
    if close_requested {
        widget.close();
    }
}
