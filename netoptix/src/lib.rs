// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{format_check, format_logs, format_show, init_topology, load_topology, verbosity_level};
