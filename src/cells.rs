use smallvec::SmallVec;

/// Location of one cell on the rectangular grid. Row zero is the top row and
/// rows grow downward, column zero is the leftmost column and columns grow
/// rightward.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub col: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate { row, col }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_col_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

/// Creates a new `GridCoordinate` offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable: north of the top row
/// or west of the leftmost column. Moves south or east always produce a
/// coordinate, which may still lie outside a particular grid - the grid
/// bounds check is the maze's job.
pub fn offset_coordinate(coord: GridCoordinate, dir: CompassPrimary) -> Option<GridCoordinate> {
    let GridCoordinate { row, col } = coord;
    match dir {
        CompassPrimary::North => {
            if row > 0 {
                Some(GridCoordinate { row: row - 1, col })
            } else {
                None
            }
        }
        CompassPrimary::South => Some(GridCoordinate { row: row + 1, col }),
        CompassPrimary::East => Some(GridCoordinate { row, col: col + 1 }),
        CompassPrimary::West => {
            if col > 0 {
                Some(GridCoordinate { row, col: col - 1 })
            } else {
                None
            }
        }
    }
}
