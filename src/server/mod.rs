// Server module entry point
// Provides listener creation, connection handling, and the accept loop

pub mod connection;
pub mod listener;
pub mod run;
pub mod signal;

// Re-export commonly used entry points
pub use listener::create_reusable_listener;
pub use run::run_server_loop;
