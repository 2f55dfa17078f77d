use std::time::{Duration, Instant};

use iced::{
    keyboard::{self, key::Named, Key},
    mouse, time,
    widget::{
        canvas::{self, Canvas, Frame, Path},
        column, container, text,
    },
    Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Theme,
};
use log::{debug, info, warn};
use rand::Rng;

use crate::{
    app::Message,
    models::ai_snake::{
        ai_controller::AiController,
        config::AiSnakeConfig,
        grid::{GridBounds, MapConfig, Obstacle},
        surface::{DrawSurface, Rgb},
    },
    view::View,
};

/// Time between two AI snake moves.
pub const MILLIS_BETWEEN_TICKS: u64 = 150;
/// Gap left around each snake cell, in pixels.
pub const CELL_PADDING: f32 = 2.0;
/// Number of obstacles scattered over the map on reset.
pub const NUM_OF_OBSTACLES: usize = 12;
/// Largest obstacle side, in cells.
pub const MAX_OBSTACLE_SIDE: i32 = 4;
/// Cells around the spawn point kept free of obstacles.
pub const SPAWN_CLEARANCE: i32 = 4;

const MAP_COLOR: Color = Color::from_rgb(0.13, 0.13, 0.13);
const OFF_MAP_COLOR: Color = Color::from_rgb(0.05, 0.05, 0.05);
const OBSTACLE_COLOR: Color = Color::from_rgb(0.45, 0.45, 0.5);

#[derive(Clone, Debug)]
pub enum ArenaMessage {
    Tick(Instant),
    Key(Key),
}

/// Screen that lets the AI snake wander around a map of random obstacles.
#[derive(Debug)]
pub struct ArenaScreen {
    ai: AiController,
    map: MapConfig,
    obstacles: Vec<Obstacle>,
    view_offset: (f32, f32),
    paused: bool,
    ticks: u64,
}

impl ArenaScreen {
    #[must_use]
    pub fn new(map: MapConfig, config: AiSnakeConfig) -> Self {
        let mut screen = Self {
            ai: AiController::new(config),
            map,
            obstacles: Vec::new(),
            view_offset: (0.0, 0.0),
            paused: false,
            ticks: 0,
        };
        screen.reset();
        screen
    }

    fn reset(&mut self) {
        self.obstacles = place_random_obstacles(self.map.bounds(), NUM_OF_OBSTACLES);
        self.ai.initialize(None, &self.map);
        self.ticks = 0;
        info!(
            "Arena reset with {} obstacles on a {:?} grid",
            self.obstacles.len(),
            self.map.bounds()
        );
    }

    fn tick(&mut self) {
        if self.paused {
            return;
        }
        self.ai.sync_state(None);
        self.ai.step(&self.obstacles, self.map.bounds());
        self.ticks += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn cell_size(&self) -> f32 {
        self.map.grid_size() as f32
    }

    fn handle_key(&mut self, key: &Key) {
        let step = self.cell_size();
        match key {
            Key::Named(Named::Space) => {
                self.paused = !self.paused;
                debug!("Paused: {}", self.paused);
            }
            Key::Named(Named::ArrowLeft) => self.view_offset.0 -= step,
            Key::Named(Named::ArrowRight) => self.view_offset.0 += step,
            Key::Named(Named::ArrowUp) => self.view_offset.1 -= step,
            Key::Named(Named::ArrowDown) => self.view_offset.1 += step,
            Key::Character(c) if c.as_str().eq_ignore_ascii_case("r") => self.reset(),
            _ => {}
        }
    }

    fn status_line(&self) -> String {
        let state = self.ai.debug_state();
        let head = match state.body.first() {
            Some((x, y)) => format!("({x}, {y})"),
            None => String::from("none"),
        };
        format!(
            "Tick {} | head {} | length {} | heading {}{}",
            self.ticks,
            head,
            state.body.len(),
            state.direction,
            if self.paused { " | PAUSED" } else { "" }
        )
    }
}

impl View for ArenaScreen {
    fn update(&mut self, message: Message) {
        match message {
            Message::Arena(ArenaMessage::Tick(_)) => self.tick(),
            Message::Arena(ArenaMessage::Key(key)) => self.handle_key(&key),
        }
    }

    fn view(&self) -> Element<Message> {
        let arena = Canvas::new(ArenaCanvas { screen: self })
            .width(Length::Fill)
            .height(Length::Fill);
        container(
            column![
                text(self.status_line()),
                text("Space: pause   R: reset   Arrows: pan view"),
                arena,
            ]
            .spacing(10),
        )
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let timer = time::every(Duration::from_millis(MILLIS_BETWEEN_TICKS))
            .map(ArenaMessage::Tick)
            .map(Message::Arena);
        let keyboard = keyboard::on_key_press(|key, _| Some(Message::Arena(ArenaMessage::Key(key))));
        Subscription::batch(vec![timer, keyboard])
    }
}

/// Scatters obstacles over the grid, away from the middle where the AI snake spawns.
fn place_random_obstacles(bounds: GridBounds, n: usize) -> Vec<Obstacle> {
    let (center_x, center_y) = (bounds.width / 2, bounds.height / 2);
    let spawn_area = Obstacle::new(
        center_x - SPAWN_CLEARANCE,
        center_y - SPAWN_CLEARANCE,
        2 * SPAWN_CLEARANCE + 1,
        2 * SPAWN_CLEARANCE + 1,
    );
    let overlaps_spawn = |obs: &Obstacle| {
        obs.x < spawn_area.x + spawn_area.width
            && obs.x + obs.width > spawn_area.x
            && obs.y < spawn_area.y + spawn_area.height
            && obs.y + obs.height > spawn_area.y
    };

    let mut rng = rand::thread_rng();
    let mut obstacles = Vec::with_capacity(n);
    if bounds.width <= MAX_OBSTACLE_SIDE || bounds.height <= MAX_OBSTACLE_SIDE {
        warn!("Grid {bounds:?} too small for obstacles");
        return obstacles;
    }
    // give up eventually on tiny maps rather than spinning forever
    for _ in 0..n * 20 {
        if obstacles.len() == n {
            break;
        }
        let width = rng.gen_range(1..=MAX_OBSTACLE_SIDE);
        let height = rng.gen_range(1..=MAX_OBSTACLE_SIDE);
        let obs = Obstacle::new(
            rng.gen_range(0..=bounds.width - width),
            rng.gen_range(0..=bounds.height - height),
            width,
            height,
        );
        if !overlaps_spawn(&obs) {
            obstacles.push(obs);
        }
    }
    if obstacles.len() < n {
        debug!("{n} obstacles requested but only {} placed", obstacles.len());
    }
    obstacles
}

impl DrawSurface for Frame {
    fn width(&self) -> f32 {
        Frame::width(self)
    }

    fn height(&self) -> f32 {
        Frame::height(self)
    }

    fn fill_rounded_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32, color: Rgb) {
        let path = Path::rounded_rectangle(Point::new(x, y), Size::new(width, height), radius.into());
        self.fill(&path, Color::from_rgb8(color.r, color.g, color.b));
    }
}

struct ArenaCanvas<'a> {
    screen: &'a ArenaScreen,
}

impl canvas::Program<Message> for ArenaCanvas<'_> {
    type State = ();

    #[allow(clippy::cast_precision_loss)]
    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let screen = self.screen;
        let mut frame = Frame::new(renderer, bounds.size());
        let cell = screen.cell_size();
        let (off_x, off_y) = screen.view_offset;
        let grid = screen.map.bounds();

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), OFF_MAP_COLOR);
        frame.fill_rectangle(
            Point::new(-off_x, -off_y),
            Size::new(grid.width as f32 * cell, grid.height as f32 * cell),
            MAP_COLOR,
        );
        for obs in &screen.obstacles {
            frame.fill_rectangle(
                Point::new(obs.x as f32 * cell - off_x, obs.y as f32 * cell - off_y),
                Size::new(obs.width as f32 * cell, obs.height as f32 * cell),
                OBSTACLE_COLOR,
            );
        }

        screen.ai.render(&mut frame, off_x, off_y, cell, CELL_PADDING);
        vec![frame.into_geometry()]
    }
}
