//! Form rendering module
//!
//! - `field_renderer`: field rendering utilities
//! - `wizard`: the collaborator registration wizard

mod field_renderer;
mod wizard;

pub use wizard::draw_create_collaborator;
