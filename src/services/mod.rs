pub mod explore_service;
pub mod llm;
pub mod prompts;
pub mod quiz_service;
