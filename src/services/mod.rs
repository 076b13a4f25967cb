pub mod assistant;
pub mod fallback;
pub mod llm_client;
pub mod prompt_store;
pub mod session_manager;
