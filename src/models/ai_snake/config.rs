//! Tunables and errors for the AI snake.
use super::surface::Rgb;

/// Chance per tick that the AI snake picks a new random direction.
pub const DEFAULT_CHANGE_DIRECTION_PROBABILITY: f64 = 0.1;
/// Corner radius of each drawn cell, in pixels.
pub const DEFAULT_CORNER_RADIUS: f32 = 6.0;
/// Colour of the head cell.
pub const DEFAULT_HEAD_COLOR: Rgb = Rgb::from_hex(0x00FF00);
/// Colour of every other body cell.
pub const DEFAULT_BODY_COLOR: Rgb = Rgb::from_hex(0x4CAF50);
/// Number of cells in a freshly spawned snake.
pub const DEFAULT_BODY_LENGTH: i32 = 3;

pub type Result<T> = std::result::Result<T, AiSnakeError>;

#[derive(Debug, Clone, PartialEq)]
pub enum AiSnakeError {
    ZeroGridSize,
    InvalidProbability(f64),
}

impl std::fmt::Display for AiSnakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiSnakeError::ZeroGridSize => write!(f, "grid size must be at least one pixel"),
            AiSnakeError::InvalidProbability(p) => {
                write!(f, "probability {p} is not within [0, 1]")
            }
        }
    }
}

impl std::error::Error for AiSnakeError {}

/// Behaviour and look of an [`crate::models::ai_snake::ai_controller::AiController`].
#[derive(Debug, Clone, PartialEq)]
pub struct AiSnakeConfig {
    change_direction_probability: f64,
    pub head_color: Rgb,
    pub body_color: Rgb,
    pub corner_radius: f32,
}

impl AiSnakeConfig {
    /// Replaces the per-tick direction change probability.
    ///
    /// # Errors
    ///
    /// Returns [`AiSnakeError::InvalidProbability`] if `p` is NaN or outside `[0, 1]`.
    pub fn with_change_direction_probability(mut self, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AiSnakeError::InvalidProbability(p));
        }
        self.change_direction_probability = p;
        Ok(self)
    }

    #[must_use]
    pub fn change_direction_probability(&self) -> f64 {
        self.change_direction_probability
    }
}

impl Default for AiSnakeConfig {
    fn default() -> Self {
        Self {
            change_direction_probability: DEFAULT_CHANGE_DIRECTION_PROBABILITY,
            head_color: DEFAULT_HEAD_COLOR,
            body_color: DEFAULT_BODY_COLOR,
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}
