pub mod cli;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod notice;
pub mod render;
pub mod shell;
pub mod state;

pub use controller::{Controller, ListView};
pub use error::AppError;
pub use shell::Shell;
pub use state::AppState;
