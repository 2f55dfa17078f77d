//! Module for the computer controlled snake.
use std::collections::VecDeque;

use log::{debug, trace, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::{
    config::{AiSnakeConfig, DEFAULT_BODY_LENGTH},
    direction::SnakeDirection,
    grid::{Cell, GridBounds, MapConfig, Obstacle},
    surface::DrawSurface,
};

/// Copy of the AI snake state, for debugging and status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSnakeSnapshot {
    pub body: Vec<Cell>,
    pub direction: SnakeDirection,
}

/// Random walking snake that steers around walls, obstacles and itself.
///
/// The host owns the controller and calls [`AiController::sync_state`] followed by
/// [`AiController::step`] once per tick.
#[derive(Debug)]
pub struct AiController<R: Rng = StdRng> {
    body: VecDeque<Cell>,
    direction: SnakeDirection,
    config: AiSnakeConfig,
    rng: R,
}

impl AiController<StdRng> {
    /// Creates a controller seeded from the OS. The body stays empty until
    /// [`AiController::initialize`] is called.
    #[must_use]
    pub fn new(config: AiSnakeConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for AiController<StdRng> {
    fn default() -> Self {
        Self::new(AiSnakeConfig::default())
    }
}

impl<R: Rng> AiController<R> {
    #[must_use]
    pub fn with_rng(config: AiSnakeConfig, rng: R) -> Self {
        Self {
            body: VecDeque::new(),
            direction: SnakeDirection::Left,
            config,
            rng,
        }
    }

    /// Places the snake and points it left.
    ///
    /// Without a `start_body` the snake is spawned horizontally in the middle of the map,
    /// head first.
    pub fn initialize(&mut self, start_body: Option<Vec<Cell>>, map: &MapConfig) {
        self.body = match start_body {
            Some(body) => body.into(),
            None => {
                let bounds = map.bounds();
                let (center_x, center_y) = (bounds.width / 2, bounds.height / 2);
                (0..DEFAULT_BODY_LENGTH)
                    .map(|i| (center_x - i, center_y))
                    .collect()
            }
        };
        self.direction = SnakeDirection::Left;
        debug!("AI snake initialized at {:?}", self.body);
    }

    /// Optionally replaces the body with an externally owned copy, then maybe turns.
    ///
    /// A turn never reverses the current direction.
    pub fn sync_state(&mut self, external_body: Option<Vec<Cell>>) -> SnakeDirection {
        if let Some(body) = external_body {
            self.body = body.into();
        }
        trace!("AI snake synced at {:?}", self.body);

        if self
            .rng
            .gen_bool(self.config.change_direction_probability())
        {
            let current = self.direction;
            let next = loop {
                let candidate = SnakeDirection::random(&mut self.rng);
                if !candidate.is_opposite_of(current) {
                    break candidate;
                }
            };
            if next != current {
                debug!("AI snake turning from {current} to {next}");
            }
            self.direction = next;
        }
        self.direction
    }

    /// Moves the snake one cell.
    ///
    /// If the cell ahead is blocked a random free neighbour of the head is taken instead and
    /// becomes the new direction. With no free neighbour the snake stays put.
    pub fn step(&mut self, obstacles: &[Obstacle], bounds: GridBounds) -> &VecDeque<Cell> {
        let Some(&(head_x, head_y)) = self.body.front() else {
            return &self.body;
        };

        let mut next = self.direction.advance(head_x, head_y);
        if self.collides(next.0, next.1, obstacles, bounds) {
            let valid = self.valid_directions(head_x, head_y, obstacles, bounds);
            let Some(&escape) = valid.choose(&mut self.rng) else {
                warn!("AI snake is boxed in at ({head_x}, {head_y}). Staying in place");
                return &self.body;
            };
            debug!(
                "AI snake blocked going {} from ({head_x}, {head_y}). Turning {escape}",
                self.direction
            );
            self.direction = escape;
            next = escape.advance(head_x, head_y);
        }

        self.body.push_front(next);
        self.body.pop_back();
        &self.body
    }

    /// Whether the cell `(x, y)` is off the grid, inside an obstacle or on the snake's
    /// own body. The current head does not count, the tail does.
    #[must_use]
    pub fn collides(&self, x: i32, y: i32, obstacles: &[Obstacle], bounds: GridBounds) -> bool {
        if !bounds.contains(x, y) {
            return true;
        }
        if self.body.iter().skip(1).any(|&cell| cell == (x, y)) {
            return true;
        }
        obstacles.iter().any(|obs| obs.overlaps_cell(x, y))
    }

    /// Directions whose neighbouring cell of `(head_x, head_y)` is free, in
    /// [`SnakeDirection::VARIANTS`] order.
    #[must_use]
    pub fn valid_directions(
        &self,
        head_x: i32,
        head_y: i32,
        obstacles: &[Obstacle],
        bounds: GridBounds,
    ) -> Vec<SnakeDirection> {
        SnakeDirection::VARIANTS
            .into_iter()
            .filter(|dir| {
                let (x, y) = dir.advance(head_x, head_y);
                !self.collides(x, y, obstacles, bounds)
            })
            .collect()
    }

    /// Draws every visible cell as a padded rounded square, the head in its own colour.
    ///
    /// Cells more than one cell outside the surface are skipped.
    #[allow(clippy::cast_precision_loss)]
    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        view_offset_x: f32,
        view_offset_y: f32,
        cell_size: f32,
        padding: f32,
    ) {
        for (index, &(x, y)) in self.body.iter().enumerate() {
            let draw_x = x as f32 * cell_size - view_offset_x;
            let draw_y = y as f32 * cell_size - view_offset_y;

            let visible = draw_x > -cell_size
                && draw_x < surface.width() + cell_size
                && draw_y > -cell_size
                && draw_y < surface.height() + cell_size;
            if !visible {
                continue;
            }

            let color = if index == 0 {
                self.config.head_color
            } else {
                self.config.body_color
            };
            surface.fill_rounded_rect(
                draw_x + padding / 2.0,
                draw_y + padding / 2.0,
                cell_size - padding,
                cell_size - padding,
                self.config.corner_radius,
                color,
            );
        }
    }

    #[must_use]
    pub fn debug_state(&self) -> AiSnakeSnapshot {
        AiSnakeSnapshot {
            body: self.body.iter().copied().collect(),
            direction: self.direction,
        }
    }

    #[must_use]
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    #[must_use]
    pub fn direction(&self) -> SnakeDirection {
        self.direction
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &AiSnakeConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::models::ai_snake::{
        config::{DEFAULT_BODY_COLOR, DEFAULT_HEAD_COLOR},
        surface::tests::RecordingSurface,
    };

    use super::*;

    const GRID: GridBounds = GridBounds {
        width: 20,
        height: 20,
    };

    fn controller_with_probability(p: f64, seed: u64) -> AiController<StdRng> {
        let config = AiSnakeConfig::default()
            .with_change_direction_probability(p)
            .unwrap();
        AiController::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn steady_controller(body: Vec<Cell>) -> AiController<StdRng> {
        let mut ai = controller_with_probability(0.0, 1);
        ai.initialize(Some(body), &MapConfig::new(20, 20, 1).unwrap());
        ai
    }

    #[test]
    fn default_spawn_is_centered_facing_left() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut ai = controller_with_probability(0.1, 3);
        ai.initialize(None, &MapConfig::new(20, 20, 1).unwrap());
        let state = ai.debug_state();
        assert_eq!(state.body, vec![(10, 10), (9, 10), (8, 10)]);
        assert_eq!(state.direction, SnakeDirection::Left);
    }

    #[test]
    fn default_spawn_uses_grid_size() {
        let mut ai = controller_with_probability(0.1, 3);
        ai.initialize(None, &MapConfig::new(800, 600, 20).unwrap());
        assert_eq!(ai.head(), Some((20, 15)));
        assert_eq!(ai.len(), 3);
    }

    #[test]
    fn initialize_resets_direction() {
        let mut ai = controller_with_probability(1.0, 11);
        let map = MapConfig::new(20, 20, 1).unwrap();
        ai.initialize(None, &map);
        for _ in 0..20 {
            ai.sync_state(None);
        }
        ai.initialize(Some(vec![(3, 3), (4, 3)]), &map);
        assert_eq!(ai.direction(), SnakeDirection::Left);
        assert_eq!(ai.debug_state().body, vec![(3, 3), (4, 3)]);
    }

    #[test]
    fn step_left_drops_tail() {
        let mut ai = steady_controller(vec![(10, 10), (11, 10), (12, 10)]);
        let body: Vec<Cell> = ai.step(&[], GRID).iter().copied().collect();
        assert_eq!(body, vec![(9, 10), (10, 10), (11, 10)]);
        assert_eq!(ai.direction(), SnakeDirection::Left);
    }

    #[test]
    fn sync_with_zero_probability_keeps_direction() {
        let mut ai = steady_controller(vec![(10, 10), (11, 10), (12, 10)]);
        for _ in 0..100 {
            assert_eq!(ai.sync_state(None), SnakeDirection::Left);
        }
    }

    #[test]
    fn sync_overwrites_body() {
        let mut ai = steady_controller(vec![(10, 10), (11, 10), (12, 10)]);
        ai.sync_state(Some(vec![(1, 1), (1, 2)]));
        assert_eq!(ai.debug_state().body, vec![(1, 1), (1, 2)]);
    }

    #[test]
    fn sync_never_reverses() {
        let mut ai = controller_with_probability(1.0, 42);
        ai.initialize(None, &MapConfig::new(20, 20, 1).unwrap());
        let mut seen_change = false;
        for _ in 0..500 {
            let before = ai.direction();
            let after = ai.sync_state(None);
            assert!(!after.is_opposite_of(before), "{before} reversed to {after}");
            seen_change |= after != before;
        }
        assert!(seen_change);
    }

    #[test]
    fn out_of_bounds_always_collides() {
        let ai = steady_controller(vec![(10, 10)]);
        for (x, y) in [(-1, 0), (0, -1), (20, 0), (0, 20), (-5, 25)] {
            assert!(ai.collides(x, y, &[], GRID), "({x}, {y})");
        }
        assert!(!ai.collides(0, 0, &[], GRID));
        assert!(!ai.collides(19, 19, &[], GRID));
    }

    #[test]
    fn obstacles_collide_on_every_covered_cell() {
        let ai = steady_controller(vec![(0, 0)]);
        let obstacles = [Obstacle::new(5, 5, 2, 2)];
        assert!(ai.collides(5, 5, &obstacles, GRID));
        assert!(ai.collides(6, 6, &obstacles, GRID));
        assert!(!ai.collides(7, 5, &obstacles, GRID));
    }

    #[test]
    fn own_body_collides_except_head() {
        let ai = steady_controller(vec![(1, 1), (1, 2), (2, 2), (2, 1)]);
        assert!(!ai.collides(1, 1, &[], GRID));
        assert!(ai.collides(1, 2, &[], GRID));
        // the tail has not moved out of the way yet
        assert!(ai.collides(2, 1, &[], GRID));
    }

    #[test]
    fn valid_directions_keep_probe_order() {
        let ai = steady_controller(vec![(5, 5), (6, 5), (7, 5)]);
        let obstacles = [Obstacle::new(5, 3, 1, 2)];
        assert_eq!(
            ai.valid_directions(5, 5, &obstacles, GRID),
            vec![SnakeDirection::Down, SnakeDirection::Left]
        );
        assert_eq!(
            ai.valid_directions(5, 5, &[], GRID),
            vec![
                SnakeDirection::Up,
                SnakeDirection::Down,
                SnakeDirection::Left
            ]
        );
    }

    #[test]
    fn blocked_step_turns_to_free_neighbour() {
        let _ = env_logger::builder().is_test(true).try_init();
        for seed in 0..20 {
            let mut ai = controller_with_probability(0.0, seed);
            ai.initialize(
                Some(vec![(0, 5), (1, 5), (2, 5)]),
                &MapConfig::new(20, 20, 1).unwrap(),
            );
            let body: Vec<Cell> = ai.step(&[], GRID).iter().copied().collect();
            assert!(body[0] == (0, 4) || body[0] == (0, 6), "{body:?}");
            assert_eq!(&body[1..], &[(0, 5), (1, 5)]);
            let expected = if body[0] == (0, 4) {
                SnakeDirection::Up
            } else {
                SnakeDirection::Down
            };
            assert_eq!(ai.direction(), expected);
        }
    }

    #[test]
    fn boxed_in_snake_stays_put() {
        let _ = env_logger::builder().is_test(true).try_init();
        let start = vec![(5, 5), (6, 5), (6, 6)];
        let mut ai = steady_controller(start.clone());
        let obstacles = [
            Obstacle::new(5, 4, 1, 1),
            Obstacle::new(5, 6, 1, 1),
            Obstacle::new(4, 5, 1, 1),
        ];
        let body: Vec<Cell> = ai.step(&obstacles, GRID).iter().copied().collect();
        assert_eq!(body, start);
        assert_eq!(ai.direction(), SnakeDirection::Left);
    }

    #[test]
    fn empty_body_is_a_no_op() {
        let mut ai = controller_with_probability(0.5, 9);
        assert!(ai.step(&[], GRID).is_empty());
        let mut surface = RecordingSurface::new(100.0, 100.0);
        ai.render(&mut surface, 0.0, 0.0, 10.0, 2.0);
        assert!(surface.drawn.is_empty());
        assert!(ai.head().is_none());
    }

    #[test]
    fn long_walk_keeps_length_and_stays_on_free_cells() {
        let mut ai = controller_with_probability(0.3, 1234);
        ai.initialize(None, &MapConfig::new(20, 20, 1).unwrap());
        let obstacles = [Obstacle::new(2, 2, 3, 3), Obstacle::new(14, 12, 2, 5)];
        let len = ai.len();
        for _ in 0..2000 {
            let before = ai.head().unwrap();
            ai.sync_state(None);
            let after = ai.step(&obstacles, GRID)[0];
            assert_eq!(ai.len(), len);
            assert!(GRID.contains(after.0, after.1));
            assert!(obstacles.iter().all(|o| !o.overlaps_cell(after.0, after.1)));
            let dist = (after.0 - before.0).abs() + (after.1 - before.1).abs();
            assert!(dist <= 1, "jumped from {before:?} to {after:?}");
        }
    }

    #[test]
    fn render_pads_cells_and_colours_head() {
        let ai = steady_controller(vec![(0, 0), (1, 0), (50, 50)]);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        ai.render(&mut surface, 0.0, 0.0, 10.0, 2.0);

        assert_eq!(surface.drawn.len(), 2);
        let head = &surface.drawn[0];
        assert_eq!((head.x, head.y, head.width, head.height), (1.0, 1.0, 8.0, 8.0));
        assert_eq!(head.color, DEFAULT_HEAD_COLOR);
        assert!((head.radius - 6.0).abs() < f32::EPSILON);
        let body = &surface.drawn[1];
        assert_eq!((body.x, body.y), (11.0, 1.0));
        assert_eq!(body.color, DEFAULT_BODY_COLOR);
    }

    #[test]
    fn render_applies_view_offset_and_margin() {
        let ai = steady_controller(vec![(-1, 0), (10, 0), (11, 0), (5, 5)]);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        ai.render(&mut surface, 0.0, 0.0, 10.0, 0.0);
        // -1 sits exactly one cell off screen, 10 is inside the margin, 11 is past it
        let xs: Vec<f32> = surface.drawn.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![100.0, 50.0]);

        let mut shifted = RecordingSurface::new(100.0, 100.0);
        ai.render(&mut shifted, 30.0, 5.0, 10.0, 0.0);
        assert_eq!(shifted.drawn.len(), 3);
        let last = shifted.drawn.last().unwrap();
        assert_eq!((last.x, last.y), (20.0, 45.0));
    }

    #[test]
    fn snapshot_is_detached_copy() {
        let mut ai = steady_controller(vec![(10, 10), (11, 10), (12, 10)]);
        let snapshot = ai.debug_state();
        ai.step(&[], GRID);
        assert_eq!(snapshot.body, vec![(10, 10), (11, 10), (12, 10)]);
        assert_ne!(ai.debug_state(), snapshot);
    }
}
