pub mod generation_controller;
pub mod generation_service;
