pub mod arena_screen;
