pub mod client;
pub mod session;
pub mod traits;

pub use client::{GenerationClient, SCRIPT_SAMPLING};
pub use session::{ScriptOutcome, ScriptSession, ScriptSettings, SessionError};
pub use traits::TextGenerator;
