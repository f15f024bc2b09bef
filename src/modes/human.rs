use anyhow::{Context, Result};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep_until};

use crate::game::{FrameOutcome, GameConfig, GameEngine, GameState, TimerEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Canvas, Renderer};

/// The engine's pending callback, pinned to a wall-clock deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArmedTimer {
    id: u64,
    deadline: Instant,
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

pub struct HumanMode {
    engine: GameEngine<Canvas, InputHandler>,
    renderer: Renderer,
    metrics: GameMetrics,
    timer: Option<ArmedTimer>,
    should_quit: bool,
}

impl HumanMode {
    /// Build and initialise a game; `seed` makes candy and start positions reproducible
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let canvas = Canvas::new(&config);
        let renderer = Renderer::new(&config);
        let input = InputHandler::new();

        let mut engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed, canvas, input),
            None => GameEngine::new(config, canvas, input),
        }
        .context("Failed to create game")?;
        engine.init_game();

        Ok(Self {
            engine,
            renderer,
            metrics: GameMetrics::new(),
            timer: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableFocusChange)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!("session ended, high score {}", self.engine.high_score());
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            self.sync_timer();
            let deadline = self.timer.map(|timer| timer.deadline);

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // The engine's pending tick or death-sequence step
                _ = wait_until(deadline) => {
                    self.fire_timer()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.engine.presenter(),
                            self.engine.state(),
                            &self.metrics,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                self.engine.shutdown();
                break;
            }
        }

        Ok(())
    }

    /// Follow the engine's timer slot: keep the deadline while the same callback is pending,
    /// start a new one when it changed, drop it when nothing is pending
    fn sync_timer(&mut self) {
        self.timer = match (self.engine.scheduled(), self.timer) {
            (Some(scheduled), Some(timer)) if scheduled.id == timer.id => Some(timer),
            (Some(scheduled), _) => Some(ArmedTimer {
                id: scheduled.id,
                deadline: Instant::now() + scheduled.delay,
            }),
            (None, _) => None,
        };
    }

    fn fire_timer(&mut self) -> Result<()> {
        let Some(timer) = self.timer else {
            return Ok(());
        };

        let event = self
            .engine
            .fire(timer.id)
            .context("Failed to advance game")?;

        // A repeating tick keeps its cadence
        self.timer = match self.engine.scheduled() {
            Some(scheduled) if scheduled.id == timer.id => Some(ArmedTimer {
                id: timer.id,
                deadline: timer.deadline + scheduled.delay,
            }),
            _ => None,
        };

        match event {
            Some(TimerEvent::Frame(FrameOutcome::Died { final_score })) => {
                self.metrics.on_game_over();
                info!(
                    "round {} ended with {} points",
                    self.metrics.games_played, final_score
                );
            }
            Some(TimerEvent::Resurrected) => {
                info!("ready for round {}", self.metrics.games_played + 1);
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let before = self.engine.state();

        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.engine.input_mut().handle_key_event(key) {
                    KeyAction::Turn(_) => self.engine.on_first_directional_input(),
                    KeyAction::TogglePause => match before {
                        GameState::Playing => self.engine.pause_game(),
                        GameState::Paused => self.engine.resume_game(),
                        _ => {}
                    },
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::FocusLost => self.engine.pause_game(),
            Event::FocusGained => self.engine.resume_game(),
            _ => {}
        }

        match (before, self.engine.state()) {
            (GameState::Ready, GameState::Playing) => self.metrics.on_game_start(),
            (GameState::Playing, GameState::Paused) => self.metrics.on_pause(),
            (GameState::Paused, GameState::Playing) => self.metrics.on_resume(),
            _ => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
