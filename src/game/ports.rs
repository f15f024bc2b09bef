//! Boundaries between the engine and the outside world.

use super::action::Direction;
use super::candy::Candy;
use super::config::Rgb;
use super::snake::Snake;

/// Where the engine sends its frames
///
/// Calls arrive in a fixed order (`clear`, `draw_snake`, `draw_candy`, `draw_score`) and are
/// expected to complete before the engine continues.
pub trait Presenter {
    /// Prepare the play field; called once when a game is initialised
    fn init_play_field(&mut self);
    fn clear(&mut self);
    fn draw_snake(&mut self, snake: &Snake, color: Rgb);
    fn draw_candy(&mut self, candy: &Candy);
    fn draw_score(&mut self, score: u32, high_score: u32);
}

/// Source of player direction requests
pub trait InputPort {
    /// Most recent direction reported, if any. Several inputs between two ticks collapse
    /// into the last one.
    fn last_direction(&self) -> Option<Direction>;
    fn start_listening(&mut self);
    fn stop_listening(&mut self);
}

/// One call received by a [`RecordingPresenter`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    InitPlayField,
    Clear,
    Snake { body_len: usize, alive: bool, color: Rgb },
    Candy(Candy),
    Score { score: u32, high_score: u32 },
}

/// Presenter that keeps every call, for inspecting what the engine drew
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<DrawCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full scenes drawn so far
    pub fn scenes(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Clear).count()
    }

    pub fn last_score(&self) -> Option<(u32, u32)> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::Score { score, high_score } => Some((*score, *high_score)),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn init_play_field(&mut self) {
        self.calls.push(DrawCall::InitPlayField);
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_snake(&mut self, snake: &Snake, color: Rgb) {
        self.calls.push(DrawCall::Snake {
            body_len: snake.len(),
            alive: snake.alive,
            color,
        });
    }

    fn draw_candy(&mut self, candy: &Candy) {
        self.calls.push(DrawCall::Candy(candy.clone()));
    }

    fn draw_score(&mut self, score: u32, high_score: u32) {
        self.calls.push(DrawCall::Score { score, high_score });
    }
}

/// Input whose last direction is set directly
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pub direction: Option<Direction>,
    pub listening: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputPort for ScriptedInput {
    fn last_direction(&self) -> Option<Direction> {
        self.direction
    }

    fn start_listening(&mut self) {
        self.listening = true;
    }

    fn stop_listening(&mut self) {
        self.listening = false;
    }
}
