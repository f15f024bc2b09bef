use log::{debug, info, warn};

use super::{
    action::Direction,
    candy::CandyKind,
    clock::{Scheduled, Scheduler, Wakeup},
    config::GameConfig,
    error::GameError,
    geometry::{move_point, wrap},
    ports::{InputPort, Presenter},
    state::{DeathSequence, GameSession, GameState},
};

/// Wait after death, and again before resurrection, in frame intervals
const DEATH_PAUSE_FRAMES: u32 = 10;
/// Tail segments removed per frame interval while dying
const SHRINKS_PER_FRAME: u32 = 4;

/// What one simulation tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The snake moved
    Moved {
        /// Kind of candy eaten this tick, if any
        eaten: Option<CandyKind>,
        /// A shrinking candy ran out and was replaced
        candy_expired: bool,
    },
    /// The move was blocked but the snake survived; this many grace frames remain
    Grace { frames_left: u32 },
    /// The move was blocked with no grace left
    Died { final_score: u32 },
}

/// What a fired timer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Frame(FrameOutcome),
    TailShrunk { segments_left: usize },
    /// The dead snake is down to one segment and waits to come back
    AwaitingResurrection,
    Resurrected,
}

/// The game engine that handles all game logic
///
/// Owns the session, the two ports and the timer slot. Nothing here blocks: the driver asks
/// [`GameEngine::scheduled`] what to wait for and calls [`GameEngine::fire`] when it is due.
pub struct GameEngine<P, I> {
    config: GameConfig,
    session: GameSession,
    scheduler: Scheduler,
    presenter: P,
    input: I,
}

impl<P: Presenter, I: InputPort> GameEngine<P, I> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig, presenter: P, input: I) -> Result<Self, GameError> {
        let session = GameSession::new(&config)?;
        Ok(Self::with_session(config, session, presenter, input))
    }

    /// Create an engine that plays reproducibly from `seed`
    pub fn seeded(config: GameConfig, seed: u64, presenter: P, input: I) -> Result<Self, GameError> {
        let session = GameSession::seeded(&config, seed)?;
        Ok(Self::with_session(config, session, presenter, input))
    }

    /// Wrap an already built session
    #[doc(hidden)]
    pub fn with_session(config: GameConfig, session: GameSession, presenter: P, input: I) -> Self {
        Self {
            config,
            session,
            scheduler: Scheduler::new(),
            presenter,
            input,
        }
    }

    /// Draw the first frame, start listening for input and wait in Ready
    pub fn init_game(&mut self) {
        self.scheduler.cancel();
        self.session.state = GameState::Ready;
        self.presenter.init_play_field();
        self.draw_scene();
        self.input.start_listening();
        info!(
            "game ready on a {}x{} grid",
            self.session.grid.width(),
            self.session.grid.height()
        );
    }

    /// Stop ticking while playing; any other state is left alone
    pub fn pause_game(&mut self) {
        if self.session.state == GameState::Playing {
            self.scheduler.cancel();
            self.session.state = GameState::Paused;
            info!("game paused");
        }
    }

    /// Continue a paused game with a fresh tick schedule
    pub fn resume_game(&mut self) {
        if self.session.state == GameState::Paused {
            self.start_ticking();
            info!("game resumed");
        }
    }

    /// Hook for the input adapter: a directional key leaves Ready
    pub fn on_first_directional_input(&mut self) {
        if self.session.state == GameState::Ready {
            self.start_ticking();
            info!("game started");
        }
    }

    /// Cancel any pending timer and stop reading input
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.input.stop_listening();
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score
    }

    pub fn state(&self) -> GameState {
        self.session.state
    }

    #[doc(hidden)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    #[doc(hidden)]
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The callback the driver should wait for, if any
    pub fn scheduled(&self) -> Option<Scheduled> {
        self.scheduler.pending()
    }

    /// Run the callback with `id`. Stale ids (cancelled or replaced) are ignored.
    pub fn fire(&mut self, id: u64) -> Result<Option<TimerEvent>, GameError> {
        let Some(wakeup) = self.scheduler.take(id) else {
            return Ok(None);
        };

        let event = match wakeup {
            Wakeup::Frame => TimerEvent::Frame(self.next_frame()?),
            Wakeup::ShrinkTail => self.shrink_tail(),
            Wakeup::Resurrect => {
                self.resurrect();
                TimerEvent::Resurrected
            }
        };
        Ok(Some(event))
    }

    /// Fire whatever is pending right now, ignoring its delay
    pub fn fire_pending(&mut self) -> Result<Option<TimerEvent>, GameError> {
        match self.scheduler.pending() {
            Some(scheduled) => self.fire(scheduled.id),
            None => Ok(None),
        }
    }

    /// Advance the simulation by one tick
    pub fn next_frame(&mut self) -> Result<FrameOutcome, GameError> {
        let desired = self.input.last_direction().unwrap_or(Direction::DEFAULT);
        let session = &mut self.session;
        session.frames += 1;

        let direction = session.snake.resolve_direction(desired);
        let new_head = wrap(move_point(session.snake.head(), direction), &session.grid);

        if session.snake.collides_on_move(new_head) {
            if session.collision_frames_left > 0 {
                session.collision_frames_left -= 1;
                let frames_left = session.collision_frames_left;
                debug!("move blocked, {} grace frames left", frames_left);
                self.draw_scene();
                return Ok(FrameOutcome::Grace { frames_left });
            }

            session.snake.alive = false;
            let final_score = session.score;
            self.draw_scene();
            self.game_over();
            return Ok(FrameOutcome::Died { final_score });
        }

        session.collision_frames_left = self.config.collision_tolerance;
        session.snake.advance(new_head, direction);

        let candy_expired = !session.candy.age();
        if candy_expired {
            debug!("{:?} candy expired", session.candy.kind);
            session.respawn_candy()?;
        }

        let mut eaten = None;
        if session.candy.point == session.snake.head() {
            let candy = session.candy.clone();
            session.add_score(candy.score());
            let max_len = session.max_snake_len();
            let wasted = session.snake.feed(candy.calories(), max_len);
            if wasted > 0 {
                warn!("grid is nearly full, dropped {} segments of growth", wasted);
            }
            debug!(
                "ate {:?} candy, score {} (high {})",
                candy.kind, session.score, session.high_score
            );
            eaten = Some(candy.kind);
            session.respawn_candy()?;
        }

        self.draw_scene();
        Ok(FrameOutcome::Moved {
            eaten,
            candy_expired,
        })
    }

    fn start_ticking(&mut self) {
        self.scheduler
            .set_interval(Wakeup::Frame, self.config.frame_interval());
        self.session.state = GameState::Playing;
    }

    fn game_over(&mut self) {
        let segments_left = self.session.snake.len() - 1;
        self.session.state = GameState::GameOver(DeathSequence::Dying { segments_left });
        // Replacing the frame interval cancels it
        self.scheduler
            .set_timeout(Wakeup::ShrinkTail, self.config.frame_interval() * DEATH_PAUSE_FRAMES);
        info!(
            "game over after {} frames with score {} (high score {})",
            self.session.frames, self.session.score, self.session.high_score
        );
    }

    fn shrink_tail(&mut self) -> TimerEvent {
        if self.session.snake.shrink_tail() {
            let segments_left = self.session.snake.len() - 1;
            self.session.state = GameState::GameOver(DeathSequence::Dying { segments_left });
            self.draw_scene();
            self.scheduler
                .set_timeout(Wakeup::ShrinkTail, self.config.frame_interval() / SHRINKS_PER_FRAME);
            TimerEvent::TailShrunk { segments_left }
        } else {
            self.session.state = GameState::GameOver(DeathSequence::AwaitingResurrection);
            self.scheduler
                .set_timeout(Wakeup::Resurrect, self.config.frame_interval() * DEATH_PAUSE_FRAMES);
            TimerEvent::AwaitingResurrection
        }
    }

    fn resurrect(&mut self) {
        self.session.resurrect();
        self.session.collision_frames_left = self.config.collision_tolerance;
        self.draw_scene();
        info!("snake resurrected, ready for a new round");
    }

    fn draw_scene(&mut self) {
        self.presenter.clear();
        self.presenter
            .draw_snake(&self.session.snake, self.config.snake_color);
        self.presenter.draw_candy(&self.session.candy);
        self.presenter
            .draw_score(self.session.score, self.session.high_score);
    }
}
