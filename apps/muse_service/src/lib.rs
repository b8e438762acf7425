pub mod app_module;
pub mod app_router;
pub mod core;
pub mod generation;
pub mod health;
pub mod history;
pub mod prompts;
