pub mod browser;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
