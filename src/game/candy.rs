//! Candy placement, type selection, ageing and nutrition.

use log::debug;
use rand::Rng;

use super::error::GameError;
use super::geometry::{Grid, Point};
use super::snake::Snake;

/// Random probes before falling back to scanning for free cells
const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Radius lost by a shrinking candy on every tick
pub const SHRINK_DECREMENT: f64 = 0.008;
/// A shrinking candy below this radius disappears
pub const SHRINK_MIN_RADIUS: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandyKind {
    Regular,
    Massive,
    Shrinking,
}

impl CandyKind {
    /// Map a roll in `0..=9` to a kind: 0-4 regular, 5 shrinking, 6-9 massive
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=4 => CandyKind::Regular,
            5 => CandyKind::Shrinking,
            _ => CandyKind::Massive,
        }
    }

    /// Points awarded when eaten
    pub fn score(self) -> u32 {
        match self {
            CandyKind::Regular => 5,
            CandyKind::Massive => 15,
            CandyKind::Shrinking => 50,
        }
    }

    /// Segments the snake grows by when eating it
    pub fn calories(self) -> usize {
        match self {
            CandyKind::Regular => 3,
            CandyKind::Massive => 5,
            CandyKind::Shrinking => 0,
        }
    }

    /// Starting radius, as a fraction of a cell
    pub fn radius(self) -> f64 {
        match self {
            CandyKind::Regular => 0.3,
            CandyKind::Massive | CandyKind::Shrinking => 0.45,
        }
    }
}

/// Ageing parameters of a shrinking candy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shrink {
    pub decrement: f64,
    pub min_radius: f64,
    initial_radius: f64,
    steps: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candy {
    pub point: Point,
    pub kind: CandyKind,
    /// Current radius, used for drawing only
    pub radius: f64,
    shrink: Option<Shrink>,
}

impl Candy {
    pub fn new(point: Point, kind: CandyKind) -> Self {
        let radius = kind.radius();
        let shrink = (kind == CandyKind::Shrinking).then_some(Shrink {
            decrement: SHRINK_DECREMENT,
            min_radius: SHRINK_MIN_RADIUS,
            initial_radius: radius,
            steps: 0,
        });

        Self {
            point,
            kind,
            radius,
            shrink,
        }
    }

    pub fn score(&self) -> u32 {
        self.kind.score()
    }

    pub fn calories(&self) -> usize {
        self.kind.calories()
    }

    pub fn shrink(&self) -> Option<&Shrink> {
        self.shrink.as_ref()
    }

    /// Age the candy by one tick. Returns false once it must be replaced.
    ///
    /// Only shrinking candies age; the radius is recomputed from the step count so that
    /// repeated subtraction does not drift.
    pub fn age(&mut self) -> bool {
        match self.shrink.as_mut() {
            Some(shrink) => {
                shrink.steps += 1;
                self.radius = shrink.initial_radius - shrink.decrement * f64::from(shrink.steps);
                self.radius >= shrink.min_radius
            }
            None => true,
        }
    }
}

/// Place a candy of random kind on a random cell the snake does not occupy
pub fn spawn<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Result<Candy, GameError> {
    let point = free_point(grid, snake, rng)?;
    let kind = CandyKind::from_roll(rng.gen_range(0..=9));
    debug!("spawned {:?} candy at ({}, {})", kind, point.x, point.y);
    Ok(Candy::new(point, kind))
}

fn free_point<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Result<Point, GameError> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let point = random_point(grid, rng);
        if !snake.occupies(point) {
            return Ok(point);
        }
    }

    // Crowded grid: pick uniformly among the cells that are left
    let free: Vec<Point> = grid.cells().filter(|p| !snake.occupies(*p)).collect();
    if free.is_empty() {
        return Err(GameError::SpawnStarvation {
            capacity: grid.capacity(),
        });
    }
    Ok(free[rng.gen_range(0..free.len())])
}

/// A uniformly random cell of the grid
pub fn random_point<R: Rng>(grid: &Grid, rng: &mut R) -> Point {
    let x = rng.gen_range(0..grid.width()) as i32;
    let y = rng.gen_range(0..grid.height()) as i32;
    Point::new(x, y)
}
