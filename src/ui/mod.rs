// UI module
// egui rendering of the widget: floating bubble, panel, message list, composer

pub mod components;
pub mod ids;
pub mod layout;

pub use layout::render_widget;
