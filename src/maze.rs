use std::error;
use std::fmt;
use std::rc::Rc;

use fnv::FnvHashSet;
use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate, offset_coordinate};
use crate::displays::CellDisplay;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// A rectangular maze described entirely by which walls are open.
///
/// `vertical_walls` holds the rows × (columns - 1) walls between horizontally
/// adjacent cells and `horizontal_walls` the (rows - 1) × columns walls
/// between vertically adjacent cells, both row major. An entry is `true` when
/// the wall has been removed and the two cells it separated are connected.
/// A new maze starts with every wall in place.
pub struct Maze {
    rows: RowsCount,
    columns: ColumnsCount,
    vertical_walls: Vec<bool>,
    horizontal_walls: Vec<bool>,
    grid_display: Option<Rc<dyn CellDisplay>>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    InvalidDimension(RowsCount, ColumnsCount),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidDimension(RowsCount(rows), ColumnsCount(columns)) => {
                write!(f,
                       "invalid maze dimensions {} x {}, rows and columns must both be at least 1",
                       rows,
                       columns)
            }
        }
    }
}

impl error::Error for MazeError {
    fn description(&self) -> &str {
        match *self {
            MazeError::InvalidDimension(..) => "invalid maze dimensions",
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallLinkError {
    InvalidGridCoordinate,
    NotAdjacent,
}

impl fmt::Display for WallLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WallLinkError::InvalidGridCoordinate => {
                write!(f, "grid coordinate outside the maze dimensions")
            }
            WallLinkError::NotAdjacent => {
                write!(f, "only the wall between two adjacent cells can be opened")
            }
        }
    }
}

impl error::Error for WallLinkError {
    fn description(&self) -> &str {
        match *self {
            WallLinkError::InvalidGridCoordinate => "grid coordinate outside the maze dimensions",
            WallLinkError::NotAdjacent => "cells are not adjacent",
        }
    }
}

// A wall slot between two adjacent cells, resolved to the matrix holding it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum WallIndex {
    Vertical(usize),
    Horizontal(usize),
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Maze :: rows: {:?}, columns: {:?}, open walls: {:?}",
               self.rows,
               self.columns,
               self.open_walls_count())
    }
}

impl Maze {
    /// Creates a maze with every wall closed.
    ///
    /// Dimensions are validated before anything is allocated: a maze must
    /// have at least one row and one column.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Maze, MazeError> {
        let (RowsCount(row_count), ColumnsCount(column_count)) = (rows, columns);
        if row_count < 1 || column_count < 1 {
            return Err(MazeError::InvalidDimension(rows, columns));
        }

        Ok(Maze {
            rows,
            columns,
            vertical_walls: vec![false; row_count * (column_count - 1)],
            horizontal_walls: vec![false; (row_count - 1) * column_count],
            grid_display: None,
        })
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn CellDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn CellDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    /// The walls between horizontally adjacent cells, row major,
    /// rows() × (columns() - 1) entries. `true` is an open wall.
    #[inline]
    pub fn vertical_walls(&self) -> &[bool] {
        &self.vertical_walls
    }

    /// The walls between vertically adjacent cells, row major,
    /// (rows() - 1) × columns() entries. `true` is an open wall.
    #[inline]
    pub fn horizontal_walls(&self) -> &[bool] {
        &self.horizontal_walls
    }

    pub fn open_walls_count(&self) -> usize {
        let open = |walls: &[bool]| walls.iter().filter(|&&is_open| is_open).count();
        open(&self.vertical_walls) + open(&self.horizontal_walls)
    }

    /// Is the grid coordinate within this maze's dimensions.
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        (coord.row as usize) < rows && (coord.col as usize) < columns
    }

    /// Convert a grid coordinate to a one dimensional index in the range
    /// 0...maze.size(). Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let ColumnsCount(columns) = self.columns;
            Some(coord.row as usize * columns + coord.col as usize)
        } else {
            None
        }
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction).and_then(|neighbour| {
            if self.is_valid_coordinate(neighbour) {
                Some(neighbour)
            } else {
                None
            }
        })
    }

    /// Open the wall between two adjacent cells.
    ///
    /// The lower indexed cell of the pair selects the matrix entry, so the
    /// same physical wall is opened whichever way round the arguments are
    /// given. Opening an already open wall changes nothing.
    pub fn open_wall_between(&mut self,
                             a: GridCoordinate,
                             b: GridCoordinate)
                             -> Result<(), WallLinkError> {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(WallLinkError::InvalidGridCoordinate);
        }
        match self.wall_index_between(a, b) {
            Some(WallIndex::Vertical(index)) => {
                self.vertical_walls[index] = true;
                Ok(())
            }
            Some(WallIndex::Horizontal(index)) => {
                self.horizontal_walls[index] = true;
                Ok(())
            }
            None => Err(WallLinkError::NotAdjacent),
        }
    }

    /// Is the wall between two cells open? False whenever the coordinates are
    /// invalid or not adjacent.
    pub fn is_open_between(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        match self.wall_index_between(a, b) {
            Some(WallIndex::Vertical(index)) => self.vertical_walls[index],
            Some(WallIndex::Horizontal(index)) => self.horizontal_walls[index],
            None => false,
        }
    }

    pub fn is_neighbour_open(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour| self.is_open_between(coord, neighbour))
    }

    /// Openness of the wall east of cell (row, col). None outside the
    /// rows() × (columns() - 1) matrix shape.
    pub fn is_vertical_wall_open(&self, row: RowIndex, col: ColumnIndex) -> Option<bool> {
        let (RowIndex(r), ColumnIndex(c)) = (row, col);
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        if r < rows && c + 1 < columns {
            Some(self.vertical_walls[r * (columns - 1) + c])
        } else {
            None
        }
    }

    /// Openness of the wall south of cell (row, col). None outside the
    /// (rows() - 1) × columns() matrix shape.
    pub fn is_horizontal_wall_open(&self, row: RowIndex, col: ColumnIndex) -> Option<bool> {
        let (RowIndex(r), ColumnIndex(c)) = (row, col);
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        if r + 1 < rows && c < columns {
            Some(self.horizontal_walls[r * columns + c])
        } else {
            None
        }
    }

    /// Cells reachable through an open wall from a particular cell.
    pub fn passages_from(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let passages = [CompassPrimary::North,
                        CompassPrimary::South,
                        CompassPrimary::East,
                        CompassPrimary::West]
                .iter()
                .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
                .filter(|&neighbour| self.is_open_between(coord, neighbour))
                .collect();
        Some(passages)
    }

    /// How many cells can be reached from `start` by walking only through
    /// open walls, `start` included. A carved maze reaches every cell.
    /// Returns None if the start coordinate is invalid.
    pub fn reachable_cell_count(&self, start: GridCoordinate) -> Option<usize> {
        if !self.is_valid_coordinate(start) {
            return None;
        }

        let mut visited: FnvHashSet<GridCoordinate> = FnvHashSet::default();
        visited.insert(start);
        let mut frontier = vec![start];

        while !frontier.is_empty() {
            let mut new_frontier = Vec::new();
            for cell in frontier {
                let passages = self.passages_from(cell)
                    .expect("frontier coordinates are always valid");
                for &next in passages.iter() {
                    if visited.insert(next) {
                        new_frontier.push(next);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(visited.len())
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns.0,
            cells_count: self.size(),
        }
    }

    /// Every open wall as a (lower indexed cell, higher indexed cell) pair,
    /// sweeping the cells row major and checking east then south of each.
    pub fn iter_open_walls(&self) -> OpenWallsIter {
        OpenWallsIter {
            maze: self,
            cell_number: 0,
            side: WallSide::East,
        }
    }

    /// The cells and open walls as an undirected graph: one node per cell in
    /// row major order, one edge per open wall.
    ///
    /// The chosen index type must be able to count maze.size() nodes,
    /// e.g. u16 caps the maze at 65535 cells.
    pub fn passage_graph<GridIndexType>(&self) -> Graph<(), (), Undirected, GridIndexType>
        where GridIndexType: IndexType
    {
        let mut graph = Graph::with_capacity(self.size(), self.open_walls_count());
        for _ in 0..self.size() {
            let _ = graph.add_node(());
        }
        for (a, b) in self.iter_open_walls() {
            let a_index = self.grid_coordinate_to_index(a)
                .expect("open wall coordinates are always valid");
            let b_index = self.grid_coordinate_to_index(b)
                .expect("open wall coordinates are always valid");
            let _ = graph.update_edge(graph::NodeIndex::<GridIndexType>::new(a_index),
                                      graph::NodeIndex::<GridIndexType>::new(b_index),
                                      ());
        }
        graph
    }

    fn coordinate_from_index(&self, index: usize) -> GridCoordinate {
        let ColumnsCount(columns) = self.columns;
        GridCoordinate::new((index / columns) as u32, (index % columns) as u32)
    }

    // Callers must have validated both coordinates. Self pairs and diagonal
    // pairs have no wall slot.
    fn wall_index_between(&self, a: GridCoordinate, b: GridCoordinate) -> Option<WallIndex> {
        let ColumnsCount(columns) = self.columns;
        if a.row == b.row {
            let (west, east) = if a.col <= b.col { (a, b) } else { (b, a) };
            if east.col - west.col == 1 {
                return Some(WallIndex::Vertical(west.row as usize * (columns - 1) +
                                                west.col as usize));
            }
        } else if a.col == b.col {
            let (north, south) = if a.row <= b.row { (a, b) } else { (b, a) };
            if south.row - north.row == 1 {
                return Some(WallIndex::Horizontal(north.row as usize * columns +
                                                  north.col as usize));
            }
        }
        None
    }
}

#[derive(Copy, Clone, Debug)]
pub struct CellIter {
    current_cell_number: usize,
    columns: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::new((self.current_cell_number / self.columns) as u32,
                                            (self.current_cell_number % self.columns) as u32);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

impl<'a> IntoIterator for &'a Maze {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Copy, Clone)]
enum WallSide {
    East,
    South,
}

pub struct OpenWallsIter<'a> {
    maze: &'a Maze,
    cell_number: usize,
    side: WallSide,
}

impl<'a> Iterator for OpenWallsIter<'a> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let cells_count = self.maze.size();
        while self.cell_number < cells_count {
            let coord = self.maze.coordinate_from_index(self.cell_number);
            match self.side {
                WallSide::East => {
                    self.side = WallSide::South;
                    if let Some(east) = self.maze
                           .neighbour_at_direction(coord, CompassPrimary::East) {
                        if self.maze.is_open_between(coord, east) {
                            return Some((coord, east));
                        }
                    }
                }
                WallSide::South => {
                    self.side = WallSide::East;
                    self.cell_number += 1;
                    if let Some(south) = self.maze
                           .neighbour_at_direction(coord, CompassPrimary::South) {
                        if self.maze.is_open_between(coord, south) {
                            return Some((coord, south));
                        }
                    }
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Up to two walls left to check per unswept cell.
        (0, Some(2 * (self.maze.size() - self.cell_number)))
    }
}

impl<'a> fmt::Debug for OpenWallsIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "OpenWallsIter :: cell number: {:?}, maze: {:?}",
               self.cell_number,
               self.maze)
    }
}
