//! Web server module
//!
//! Serves the console screens as HTML and the lookup options as JSON.

mod handlers;
mod routes;
mod screens;
mod state;
mod templates;

pub use routes::create_router;
pub use screens::{Screen, TextInput};
pub use state::AppState;
pub use templates::Templates;
