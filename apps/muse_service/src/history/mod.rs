pub mod content_record;
pub mod history_analytics;
pub mod history_controller;
pub mod history_export;
pub mod history_store;
