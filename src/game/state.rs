use rand::SeedableRng;
use rand::rngs::StdRng;

use super::candy::{self, Candy};
use super::config::GameConfig;
use super::error::GameError;
use super::geometry::Grid;
use super::snake::{INITIAL_GROWTH, Snake};

/// Stage of the death animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathSequence {
    /// The tail is being removed; this many segments are still to go
    Dying { segments_left: usize },
    /// Down to one segment, waiting to come back to life
    AwaitingResurrection,
}

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for the first directional input
    Ready,
    Playing,
    Paused,
    GameOver(DeathSequence),
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameState::GameOver(_))
    }
}

/// Everything one game owns: the board, the snake, the candy and the scores
#[derive(Debug, Clone)]
pub struct GameSession {
    pub grid: Grid,
    pub snake: Snake,
    pub candy: Candy,
    pub state: GameState,
    pub score: u32,
    pub high_score: u32,
    /// Rejected moves the snake may still survive
    pub collision_frames_left: u32,
    /// Ticks played in the current round
    pub frames: u64,
    rng: StdRng,
}

impl GameSession {
    /// Start a session from entropy
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a reproducible session
    pub fn seeded(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        let grid = config.grid()?;

        let mut snake = Snake::new(candy::random_point(&grid, &mut rng));
        snake.growth_left = INITIAL_GROWTH.min(grid.capacity() - 2);
        let candy = candy::spawn(&grid, &snake, &mut rng)?;

        Ok(Self {
            grid,
            snake,
            candy,
            state: GameState::Ready,
            score: 0,
            high_score: 0,
            collision_frames_left: config.collision_tolerance,
            frames: 0,
            rng,
        })
    }

    /// Build a session around a hand-placed snake and candy
    pub fn from_parts(
        config: &GameConfig,
        snake: Snake,
        candy: Candy,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if snake.is_empty() {
            return Err(GameError::EmptySnake);
        }
        Ok(Self {
            grid: config.grid()?,
            snake,
            candy,
            state: GameState::Ready,
            score: 0,
            high_score: 0,
            collision_frames_left: config.collision_tolerance,
            frames: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Largest body that still leaves a free cell for a candy
    pub fn max_snake_len(&self) -> usize {
        self.grid.capacity() - 1
    }

    /// Replace the candy with a fresh one away from the snake
    pub fn respawn_candy(&mut self) -> Result<(), GameError> {
        self.candy = candy::spawn(&self.grid, &self.snake, &mut self.rng)?;
        Ok(())
    }

    /// Add `points` to the score, carrying the high score along
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Bring a dead snake back for another round; the high score survives
    pub fn resurrect(&mut self) {
        self.score = 0;
        self.frames = 0;
        let room = self.max_snake_len().saturating_sub(self.snake.len());
        self.snake.growth_left = INITIAL_GROWTH.min(room);
        self.snake.alive = true;
        self.state = GameState::Ready;
    }
}
