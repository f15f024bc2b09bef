use super::action::Direction;
use super::error::GameError;
use super::geometry::Point;

/// Growth a freshly created or resurrected snake still has to do
pub const INITIAL_GROWTH: usize = 6;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Point>,
    /// Current direction of movement
    pub direction: Direction,
    /// Future moves that add a segment instead of dropping the tail
    pub growth_left: usize,
    pub alive: bool,
}

impl Snake {
    /// A one-segment snake facing the default direction, still owing its initial growth
    pub fn new(head: Point) -> Self {
        Self {
            body: vec![head],
            direction: Direction::DEFAULT,
            growth_left: INITIAL_GROWTH,
            alive: true,
        }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_body(
        body: Vec<Point>,
        direction: Direction,
        growth_left: usize,
    ) -> Result<Self, GameError> {
        if body.is_empty() {
            return Err(GameError::EmptySnake);
        }
        Ok(Self {
            body,
            direction,
            growth_left,
            alive: true,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Point {
        self.body[0]
    }

    /// True when `point` is any body cell
    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Would moving the head onto `point` bite the body?
    ///
    /// The tail is ignored when the snake has no growth left, since it moves out of the way
    /// during the same tick.
    pub fn collides_on_move(&self, point: Point) -> bool {
        let range = if self.growth_left == 0 {
            self.body.len() - 1
        } else {
            self.body.len()
        };
        self.body[..range].contains(&point)
    }

    /// Direction the snake will actually take when `desired` is requested.
    /// A snake longer than one segment cannot reverse into itself.
    pub fn resolve_direction(&self, desired: Direction) -> Direction {
        if self.body.len() > 1 && self.direction.is_opposite(desired) {
            self.direction
        } else {
            desired
        }
    }

    /// Push a new head, consuming one unit of growth or dropping the tail
    pub fn advance(&mut self, new_head: Point, direction: Direction) {
        self.direction = direction;
        self.body.insert(0, new_head);

        if self.growth_left >= 1 {
            self.growth_left -= 1;
        } else {
            self.body.pop();
        }
    }

    /// Drop the last segment, keeping at least the head. Returns false when nothing was removed.
    pub fn shrink_tail(&mut self) -> bool {
        if self.body.len() > 1 {
            self.body.pop();
            true
        } else {
            false
        }
    }

    /// Add growth without letting the body outgrow `max_len` cells
    pub fn feed(&mut self, calories: usize, max_len: usize) -> usize {
        let room = max_len.saturating_sub(self.body.len());
        let wanted = self.growth_left + calories;
        self.growth_left = wanted.min(room);
        wanted - self.growth_left
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// True for a snake without a head, which no game can be built around
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
