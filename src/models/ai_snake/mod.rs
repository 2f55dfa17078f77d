pub mod ai_controller;
pub mod config;
pub mod direction;
pub mod grid;
pub mod surface;
