//! Coordinate arithmetic on the wrap-around grid.

use super::action::Direction;
use super::error::ConfigError;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move point by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move point one cell in a direction, without wrapping
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True when the two cells touch orthogonally, either directly or across a grid edge
    pub fn is_adjacent_on(&self, other: Point, grid: &Grid) -> bool {
        Direction::ALL
            .iter()
            .any(|&direction| wrap(move_point(*self, direction), grid) == other)
    }
}

/// Fixed extents of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid, rejecting empty extents
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(ConfigError::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells on the grid
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| Point::new(x, y)))
    }
}

/// Add the direction's unit vector to the point. No wrapping.
pub fn move_point(point: Point, direction: Direction) -> Point {
    point.moved_in_direction(direction)
}

/// Map any coordinate into `[0, extent)` using floored modulo, so `-1` lands on `extent - 1`.
pub fn wrap_coordinate(coordinate: i32, extent: i32) -> i32 {
    debug_assert!(extent > 0);
    coordinate.rem_euclid(extent)
}

/// Bring a point back onto the grid, entering from the opposite edge
pub fn wrap(point: Point, grid: &Grid) -> Point {
    Point::new(
        wrap_coordinate(point.x, grid.width as i32),
        wrap_coordinate(point.y, grid.height as i32),
    )
}

/// Check if a point is within the grid bounds
pub fn inside_grid(point: Point, grid: &Grid) -> bool {
    point.x >= 0 && point.x < grid.width as i32 && point.y >= 0 && point.y < grid.height as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_movement() {
        let pos = Point::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Point::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Point::new(4, 5));
        assert_eq!(move_point(pos, Direction::Down), Point::new(5, 6));
        assert_eq!(move_point(pos, Direction::Up), Point::new(5, 4));
    }

    #[test]
    fn test_move_does_not_wrap() {
        assert_eq!(move_point(Point::new(0, 0), Direction::Left), Point::new(-1, 0));
    }

    #[test]
    fn test_wrap_coordinate() {
        assert_eq!(wrap_coordinate(-1, 30), 29);
        assert_eq!(wrap_coordinate(30, 30), 0);
        assert_eq!(wrap_coordinate(31, 30), 1);
        assert_eq!(wrap_coordinate(0, 30), 0);
        assert_eq!(wrap_coordinate(-61, 30), 29);
        assert_eq!(wrap_coordinate(7, 1), 0);
    }

    #[test]
    fn test_wrap_point() {
        let grid = Grid::new(30, 20).unwrap();
        assert_eq!(wrap(Point::new(-1, 20), &grid), Point::new(29, 0));
        assert_eq!(wrap(Point::new(30, -1), &grid), Point::new(0, 19));
        assert_eq!(wrap(Point::new(12, 7), &grid), Point::new(12, 7));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20).unwrap();

        assert!(inside_grid(Point::new(0, 0), &grid));
        assert!(inside_grid(Point::new(19, 19), &grid));
        assert!(!inside_grid(Point::new(-1, 0), &grid));
        assert!(!inside_grid(Point::new(20, 0), &grid));
        assert!(!inside_grid(Point::new(0, 20), &grid));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            Grid::new(0, 10),
            Err(ConfigError::InvalidGrid {
                width: 0,
                height: 10
            })
        );
        assert!(Grid::new(10, 0).is_err());
    }

    #[test]
    fn test_cells_cover_grid() {
        let grid = Grid::new(3, 2).unwrap();
        let cells: Vec<Point> = grid.cells().collect();
        assert_eq!(cells.len(), grid.capacity());
        assert_eq!(cells[0], Point::new(0, 0));
        assert_eq!(cells[5], Point::new(2, 1));
    }

    #[test]
    fn test_adjacency_across_edge() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(Point::new(0, 2).is_adjacent_on(Point::new(4, 2), &grid));
        assert!(Point::new(1, 1).is_adjacent_on(Point::new(1, 2), &grid));
        assert!(!Point::new(1, 1).is_adjacent_on(Point::new(2, 2), &grid));
    }
}
