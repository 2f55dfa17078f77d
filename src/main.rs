use aisnake::{
    app::State,
    models::ai_snake::{config::AiSnakeConfig, grid::MapConfig},
};
use log::{debug, error};

/// Pixel size of the demo map.
const MAP_WIDTH: u32 = 800;
const MAP_HEIGHT: u32 = 600;
/// Pixels per grid cell.
const GRID_SIZE: u32 = 20;

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "aisnake=debug");
    }
    env_logger::init();
    debug!("Debug on");

    let map = match MapConfig::new(MAP_WIDTH, MAP_HEIGHT, GRID_SIZE) {
        Ok(map) => map,
        Err(e) => {
            error!("Bad map configuration: {e}");
            return;
        }
    };
    let result = iced::application("AI Snake Arena", State::update, State::view)
        .window_size(iced::Size::new(840.0, 720.0))
        .subscription(State::subscription)
        .run_with(move || (State::new(map, AiSnakeConfig::default()), iced::Task::none()));
    if let Err(e) = result {
        error!("Application exited with error: {e}");
    }
}
