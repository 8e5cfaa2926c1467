pub mod analyzer;
pub mod assembler;
pub mod handlers;
pub mod ingest;
pub mod prompts;
pub mod relay;
pub mod skills;
