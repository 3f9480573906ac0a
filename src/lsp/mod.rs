//! LSP Protocol Implementation
//!
//! Clean LSP backend focused only on protocol handling.

pub mod backend;
pub mod debounce;
pub mod document;
pub mod handlers;
pub mod server;
pub mod state;

pub use backend::Backend;
pub use debounce::Debouncer;
pub use state::ServerState;
