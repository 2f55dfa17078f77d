use iced::{Element, Subscription};

use crate::{
    models::ai_snake::{config::AiSnakeConfig, grid::MapConfig},
    view::View,
    views::ai_snake::arena_screen::{ArenaMessage, ArenaScreen},
};

pub struct State {
    screen: ArenaScreen,
}

#[derive(Clone, Debug)]
pub enum Message {
    Arena(ArenaMessage),
}

impl State {
    #[must_use]
    pub fn new(map: MapConfig, config: AiSnakeConfig) -> Self {
        Self {
            screen: ArenaScreen::new(map, config),
        }
    }

    pub fn update(state: &mut State, message: Message) {
        state.screen.update(message);
    }

    #[must_use]
    pub fn view(state: &State) -> Element<Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }
}
