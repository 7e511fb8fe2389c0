//! UI views for Sales Scout.
//!
//! Views are stateful GPUI components that manage focus and emit events.

mod scout_panel;
mod text_field;
mod widgets;

pub use scout_panel::{next_field_index, search_button_label, ScoutPanel};
pub use text_field::{TextField, TextFieldEvent};
