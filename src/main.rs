// Fly Me chat widget - demo host
// A minimal host window with the chat widget attached to it

use eframe::egui;
use flyme_chat_widget::transport::{ChatTransport, HttpTransport};
use flyme_chat_widget::ui::render_widget;
use flyme_chat_widget::{ChatWidget, TransportConfig, WidgetConfig};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;

/// Welcome text used when the host does not configure one
const DEFAULT_WELCOME: &str =
    "Hi! I'm the Fly Me assistant. Tell me your departure city, destination, dates, and max budget.";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let transport_config = TransportConfig::from_env();
    info!(
        backend = %transport_config.base_url,
        timeout_secs = transport_config.request_timeout.as_secs(),
        "Transport configured"
    );
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpTransport::new(transport_config)?);
    let runtime = Runtime::new()?;

    let mut widget_config = WidgetConfig::from_env();
    if widget_config.welcome_message.is_none() {
        widget_config.welcome_message = Some(DEFAULT_WELCOME.to_string());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Fly Me")
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([480.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Fly Me",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let wake = Arc::new(move || ctx.request_repaint());
            Box::new(HostPage::new(runtime, transport, widget_config, Some(wake)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))
}

/// Host window owning one widget instance
struct HostPage {
    /// Declared before the runtime so outstanding exchanges are aborted first
    widget: ChatWidget,
    /// Options re-used when the widget is re-initialized from the menu
    widget_config: WidgetConfig,
    _runtime: Runtime,
}

impl HostPage {
    /// Create the host and initialize its widget
    fn new(
        runtime: Runtime,
        transport: Arc<dyn ChatTransport>,
        widget_config: WidgetConfig,
        wake: Option<flyme_chat_widget::widget::WakeFn>,
    ) -> Self {
        let mut widget = ChatWidget::new(transport, runtime.handle().clone());
        if let Some(wake) = wake {
            widget = widget.with_wake(wake);
        }
        widget.init(widget_config.clone());
        Self {
            widget,
            widget_config,
            _runtime: runtime,
        }
    }

    /// Render the host's own content
    fn render_page(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Widget", |ui| {
                    if ui.button("Init").clicked() {
                        self.widget.init(self.widget_config.clone());
                        ui.close_menu();
                    }
                    if ui.button("Destroy").clicked() {
                        self.widget.destroy();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Open").clicked() {
                        self.widget.open();
                        ui.close_menu();
                    }
                    if ui.button("Close").clicked() {
                        self.widget.close();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let mut dark_mode = ctx.style().visuals.dark_mode;
                    if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                        ctx.style_mut(|style| {
                            style.visuals.dark_mode = dark_mode;
                        });
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading(egui::RichText::new("Fly Me").size(28.0));
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new("Book your next flight with our assistant")
                        .size(15.0),
                );
                ui.add_space(40.0);
                let session = self.widget.session_id().unwrap_or("not initialized");
                ui.label(
                    egui::RichText::new(format!("Session: {}", session))
                        .monospace()
                        .weak()
                        .small(),
                );
            });
        });
    }
}

impl eframe::App for HostPage {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_page(ctx);
        render_widget(ctx, &mut self.widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_page(config: WidgetConfig) -> HostPage {
        let runtime = Runtime::new().unwrap();
        let transport: Arc<dyn ChatTransport> =
            Arc::new(HttpTransport::new(TransportConfig::default()).unwrap());
        HostPage::new(runtime, transport, config, None)
    }

    #[test]
    fn test_host_page_initializes_widget() {
        let page = test_page(WidgetConfig::new().with_welcome_message("Hi"));
        assert!(page.widget.is_initialized());
        assert!(!page.widget.is_open());
        assert_eq!(page.widget.conversation().unwrap().len(), 1);
    }

    #[test]
    fn test_host_page_keeps_supplied_session() {
        let page = test_page(WidgetConfig::new().with_session_id("host-session"));
        assert_eq!(page.widget.session_id(), Some("host-session"));
    }
}
