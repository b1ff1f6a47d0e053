pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod prompt;
pub mod request;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use error::*;
pub use generation::*;
pub use history::*;
pub use prompt::*;
pub use request::*;
pub use types::*;
