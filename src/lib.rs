// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds the CLI and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod color;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod gesture;
pub mod logging;
pub mod runtime;
pub mod score;
pub mod session;
pub mod timer;
pub mod ui;

pub use error::GameError;
pub use session::{SessionController, SessionPhase};
