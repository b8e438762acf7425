pub mod content_prompt;
