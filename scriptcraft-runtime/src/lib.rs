pub mod atomic;
pub mod config_store;
pub mod export;
pub mod llm;
pub mod runtime_engine;
pub mod secrets;
