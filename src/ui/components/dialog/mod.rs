//! Modal dialogs drawn over the current view

mod base;
mod error_dialog;

pub use error_dialog::render_error_dialog;
