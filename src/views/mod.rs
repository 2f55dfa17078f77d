pub mod ai_snake;
