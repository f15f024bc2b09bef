use crate::game::{Candy, CandyKind, Direction, GameConfig, Point, Presenter, Rgb, Snake};

/// Snapshot of the snake as last drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeSprite {
    pub body: Vec<Point>,
    pub direction: Direction,
    pub alive: bool,
    pub color: Rgb,
}

/// Snapshot of the candy as last drawn
#[derive(Debug, Clone, PartialEq)]
pub struct CandySprite {
    pub point: Point,
    pub radius: f64,
    pub color: Rgb,
}

/// Frame buffer the engine draws into and the terminal renderer reads from
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub initialized: bool,
    pub snake: Option<SnakeSprite>,
    pub candy: Option<CandySprite>,
    pub score: u32,
    pub high_score: u32,
    candy_color: Rgb,
    shrinking_candy_color: Rgb,
}

impl Canvas {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            width: config.grid_width,
            height: config.grid_height,
            initialized: false,
            snake: None,
            candy: None,
            score: 0,
            high_score: 0,
            candy_color: config.candy_color,
            shrinking_candy_color: config.shrinking_candy_color,
        }
    }

    pub fn is_head(&self, point: Point) -> bool {
        self.snake
            .as_ref()
            .is_some_and(|snake| snake.body.first() == Some(&point))
    }

    pub fn is_body(&self, point: Point) -> bool {
        self.snake
            .as_ref()
            .is_some_and(|snake| snake.body.iter().skip(1).any(|p| *p == point))
    }

    pub fn is_candy(&self, point: Point) -> bool {
        self.candy.as_ref().is_some_and(|candy| candy.point == point)
    }
}

impl Presenter for Canvas {
    fn init_play_field(&mut self) {
        self.initialized = true;
    }

    fn clear(&mut self) {
        self.snake = None;
        self.candy = None;
    }

    fn draw_snake(&mut self, snake: &Snake, color: Rgb) {
        self.snake = Some(SnakeSprite {
            body: snake.body.clone(),
            direction: snake.direction,
            alive: snake.alive,
            color,
        });
    }

    fn draw_candy(&mut self, candy: &Candy) {
        let color = match candy.kind {
            CandyKind::Shrinking => self.shrinking_candy_color,
            CandyKind::Regular | CandyKind::Massive => self.candy_color,
        };
        self.candy = Some(CandySprite {
            point: candy.point,
            radius: candy.radius,
            color,
        });
    }

    fn draw_score(&mut self, score: u32, high_score: u32) {
        self.score = score;
        self.high_score = high_score;
    }
}
