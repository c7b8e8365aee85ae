//! Application state module

mod app_state;
mod collaborator;
pub mod forms;
mod progress_animation;

pub use app_state::*;
pub use collaborator::*;
pub use progress_animation::*;
