//! Robot facing directions on the grid.

/// One of the four facing directions.
///
/// The grid uses screen coordinates: x grows eastward, y grows southward,
/// so north is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    /// The direction after a 90 degree counterclockwise turn.
    pub fn to_left(self) -> Self {
        match self {
            Direction::East => Direction::North,
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
        }
    }

    /// The direction after a 90 degree clockwise turn.
    pub fn to_right(self) -> Self {
        match self {
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::North => Direction::East,
        }
    }

    /// The direction after a 180 degree turn.
    pub fn opposite(self) -> Self {
        self.to_left().to_left()
    }

    /// Unit step in this direction, in screen coordinates.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
        }
    }

    /// Glyph used by the ASCII world rendering.
    pub fn arrow(self) -> char {
        match self {
            Direction::East => '>',
            Direction::North => '^',
            Direction::West => '<',
            Direction::South => 'v',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    #[test]
    fn four_lefts_make_a_circle() {
        for direction in ALL {
            assert_eq!(direction.to_left().to_left().to_left().to_left(), direction);
        }
    }

    #[test]
    fn left_and_right_cancel() {
        for direction in ALL {
            assert_eq!(direction.to_left().to_right(), direction);
            assert_eq!(direction.to_right().to_left(), direction);
        }
    }

    #[test]
    fn opposite_is_involutive() {
        for direction in ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn deltas_sum_to_zero() {
        let (dx, dy) = ALL.iter().fold((0, 0), |(x, y), d| {
            let (dx, dy) = d.delta();
            (x + dx, y + dy)
        });
        assert_eq!((dx, dy), (0, 0));
    }
}
