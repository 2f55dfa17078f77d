//! Movement directions for the AI snake.
use rand::Rng;

/// Direction the AI snake is heading in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnakeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SnakeDirection {
    /// All directions, in the order they are probed when looking for an escape route.
    pub const VARIANTS: [SnakeDirection; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Grid delta `(dx, dy)` of one step. Screen coordinates, so up is negative y.
    #[must_use]
    pub fn value(self) -> (i32, i32) {
        match self {
            SnakeDirection::Up => (0, -1),
            SnakeDirection::Down => (0, 1),
            SnakeDirection::Left => (-1, 0),
            SnakeDirection::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn get_opposite(self) -> SnakeDirection {
        match self {
            SnakeDirection::Up => SnakeDirection::Down,
            SnakeDirection::Down => SnakeDirection::Up,
            SnakeDirection::Left => SnakeDirection::Right,
            SnakeDirection::Right => SnakeDirection::Left,
        }
    }

    #[must_use]
    pub fn is_opposite_of(self, other: SnakeDirection) -> bool {
        self.get_opposite() == other
    }

    /// Cell reached by moving one step from `(x, y)`.
    #[must_use]
    pub fn advance(self, x: i32, y: i32) -> (i32, i32) {
        let (dx, dy) = self.value();
        (x + dx, y + dy)
    }

    /// Uniformly samples one of the four directions.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> SnakeDirection {
        SnakeDirection::VARIANTS[rng.gen_range(0..SnakeDirection::VARIANTS.len())]
    }
}

impl std::fmt::Display for SnakeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeDirection::Up => write!(f, "UP"),
            SnakeDirection::Down => write!(f, "DOWN"),
            SnakeDirection::Left => write!(f, "LEFT"),
            SnakeDirection::Right => write!(f, "RIGHT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn opposites_cancel_out() {
        for dir in SnakeDirection::VARIANTS {
            let (dx, dy) = dir.value();
            let (ox, oy) = dir.get_opposite().value();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert!(dir.is_opposite_of(dir.get_opposite()));
            assert!(!dir.is_opposite_of(dir));
        }
    }

    #[test]
    fn up_moves_towards_row_zero() {
        assert_eq!(SnakeDirection::Up.advance(4, 4), (4, 3));
        assert_eq!(SnakeDirection::Left.advance(4, 4), (3, 4));
    }

    #[test]
    fn random_eventually_yields_every_direction() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let dir = SnakeDirection::random(&mut rng);
            let idx = SnakeDirection::VARIANTS
                .iter()
                .position(|d| *d == dir)
                .unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
