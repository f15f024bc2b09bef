use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::canvas::Canvas;
use crate::game::{DeathSequence, Direction, GameConfig, GameState, Point, Rgb};
use crate::metrics::GameMetrics;

/// Candies at least this big are drawn as a full dot
const LARGE_CANDY_RADIUS: f64 = 0.4;
const MEDIUM_CANDY_RADIUS: f64 = 0.2;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Glyph for the head, pointing the way the snake looks; a cross once it is dead
fn head_glyph(direction: Direction, alive: bool) -> &'static str {
    if !alive {
        return "✖ ";
    }
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

fn candy_glyph(radius: f64) -> &'static str {
    if radius >= LARGE_CANDY_RADIUS {
        "● "
    } else if radius >= MEDIUM_CANDY_RADIUS {
        "• "
    } else {
        "· "
    }
}

pub struct Renderer {
    eye_color: Color,
    background: Color,
    score_board: Color,
    score_text: Color,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            eye_color: color(config.snake_eye_color),
            background: color(config.background_color),
            score_board: color(config.score_board_color),
            score_text: color(config.score_text_color),
        }
    }

    pub fn render(&self, frame: &mut Frame, canvas: &Canvas, state: GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(1), // Score board
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_score_board(canvas, metrics), chunks[0]);

        if canvas.initialized {
            frame.render_widget(self.render_grid(canvas, state), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, canvas: &Canvas, state: GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(canvas.height);

        for y in 0..canvas.height {
            let mut spans = Vec::with_capacity(canvas.width);

            for x in 0..canvas.width {
                let pos = Point::new(x as i32, y as i32);
                let empty = Style::default().bg(self.background);

                let cell = match (&canvas.snake, &canvas.candy) {
                    (Some(snake), _) if canvas.is_head(pos) => Span::styled(
                        head_glyph(snake.direction, snake.alive),
                        empty
                            .fg(self.eye_color)
                            .bg(color(snake.color))
                            .add_modifier(Modifier::BOLD),
                    ),
                    (Some(snake), _) if canvas.is_body(pos) => {
                        Span::styled("  ", empty.bg(color(snake.color)))
                    }
                    (_, Some(candy)) if canvas.is_candy(pos) => Span::styled(
                        candy_glyph(candy.radius),
                        empty.fg(color(candy.color)).add_modifier(Modifier::BOLD),
                    ),
                    _ => Span::styled(". ", empty.fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border) = match state {
            GameState::Ready => (" Press an arrow key to start ", Color::White),
            GameState::Playing => (" Snake ", Color::White),
            GameState::Paused => (" PAUSED ", Color::Yellow),
            GameState::GameOver(DeathSequence::Dying { .. }) => (" GAME OVER ", Color::Red),
            GameState::GameOver(DeathSequence::AwaitingResurrection) => {
                (" GAME OVER - get ready ", Color::Red)
            }
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_score_board(&self, canvas: &Canvas, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(self.score_text);
        let value = label.add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("High: ", label),
            Span::styled(canvas.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Score: ", label),
            Span::styled(canvas.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text)
            .style(Style::default().bg(self.score_board))
            .alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Candy, CandyKind, Presenter, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(head_glyph(Direction::Left, true), "◀ ");
        assert_eq!(head_glyph(Direction::Left, false), "✖ ");
        assert_eq!(candy_glyph(0.45), "● ");
        assert_eq!(candy_glyph(0.3), "• ");
        assert_eq!(candy_glyph(0.1), "· ");
    }

    #[test]
    fn test_renders_scene_and_status() {
        let config = GameConfig::small();
        let mut canvas = Canvas::new(&config);
        canvas.init_play_field();
        canvas.clear();
        let snake = Snake::from_body(vec![Point::new(3, 3), Point::new(2, 3)], Direction::Right, 0).unwrap();
        canvas.draw_snake(&snake, config.snake_color);
        canvas.draw_candy(&Candy::new(Point::new(6, 6), CandyKind::Massive));
        canvas.draw_score(15, 40);

        let renderer = Renderer::new(&config);
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, &canvas, GameState::Paused, &metrics))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Score: 15"));
        assert!(text.contains("High: 40"));
        assert!(text.contains("▶"));
        assert!(text.contains("●"));
    }
}
