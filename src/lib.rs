// Public API for hosts embedding the wheel and for integration tests

pub mod audio;
pub mod config;
pub mod error;
pub mod events;
pub mod palette;
pub mod render;
pub mod session;
pub mod state;
pub mod store;
pub mod targeting;
pub mod types;
