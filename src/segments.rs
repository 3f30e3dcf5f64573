//! Translation of a maze's wall matrices into positioned wall segments.
//!
//! The maze itself is unit agnostic. A host environment (a physics or render
//! engine) supplies the per cell unit lengths and receives axis aligned
//! rectangles to place: one per closed interior wall, four for the grid
//! boundary, plus a start and a goal marker. Open wall entries produce no
//! segment at all.

use itertools::iproduct;
use serde_derive::Serialize;

use crate::maze::Maze;
use crate::units::{CellHeight, CellWidth, ColumnIndex, ColumnsCount, RowIndex, RowsCount,
                   WallThickness};

// The goal covers this proportion of its cell.
const GOAL_CELL_PROPORTION: f64 = 0.7;

/// How long a cell is in the consumer's world, and how thick to make the
/// wall rectangles.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct SegmentScale {
    cell_width: CellWidth,
    cell_height: CellHeight,
    wall_thickness: WallThickness,
}

impl SegmentScale {
    pub fn new(cell_width: CellWidth,
               cell_height: CellHeight,
               wall_thickness: WallThickness)
               -> SegmentScale {
        SegmentScale {
            cell_width,
            cell_height,
            wall_thickness,
        }
    }

    #[inline]
    fn parts(&self) -> (f64, f64, f64) {
        (self.cell_width.0, self.cell_height.0, self.wall_thickness.0)
    }
}

/// An axis aligned rectangle given by its centre point and extent.
#[derive(PartialEq, Copy, Clone, Debug, Serialize)]
pub struct WallSegment {
    pub centre_x: f64,
    pub centre_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where a consumer drops a player piece: the centre of the top left cell.
#[derive(PartialEq, Copy, Clone, Debug, Serialize)]
pub struct StartMarker {
    pub centre_x: f64,
    pub centre_y: f64,
    pub radius: f64,
}

/// The target area in the bottom right cell.
#[derive(PartialEq, Copy, Clone, Debug, Serialize)]
pub struct GoalMarker {
    pub centre_x: f64,
    pub centre_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything a host needs to materialize the maze, ready to serialize.
#[derive(PartialEq, Clone, Debug, Serialize)]
pub struct SegmentPlan {
    pub rows: usize,
    pub columns: usize,
    pub width: f64,
    pub height: f64,
    pub walls: Vec<WallSegment>,
    pub boundary: Vec<WallSegment>,
    pub start: StartMarker,
    pub goal: GoalMarker,
}

/// One rectangle per closed interior wall.
///
/// A closed horizontal entry (row, col) sits under cell (row, col): centre
/// (col·w + w/2, row·h + h), extent (w, thickness). A closed vertical entry
/// sits right of its cell: centre (col·w + w, row·h + h/2), extent
/// (thickness, h). Horizontal entries are emitted first, each matrix swept
/// row major.
pub fn wall_segments(maze: &Maze, scale: &SegmentScale) -> Vec<WallSegment> {
    let (RowsCount(rows), ColumnsCount(columns)) = (maze.rows(), maze.columns());
    let (unit_width, unit_height, thickness) = scale.parts();

    let wall_slots = rows * (columns - 1) + (rows - 1) * columns;
    let mut segments = Vec::with_capacity(wall_slots - maze.open_walls_count());

    for (row, col) in iproduct!(0..rows - 1, 0..columns) {
        if maze.is_horizontal_wall_open(RowIndex(row), ColumnIndex(col)) == Some(false) {
            segments.push(WallSegment {
                centre_x: col as f64 * unit_width + unit_width / 2.0,
                centre_y: row as f64 * unit_height + unit_height,
                width: unit_width,
                height: thickness,
            });
        }
    }
    for (row, col) in iproduct!(0..rows, 0..columns - 1) {
        if maze.is_vertical_wall_open(RowIndex(row), ColumnIndex(col)) == Some(false) {
            segments.push(WallSegment {
                centre_x: col as f64 * unit_width + unit_width,
                centre_y: row as f64 * unit_height + unit_height / 2.0,
                width: thickness,
                height: unit_height,
            });
        }
    }
    segments
}

/// The four border rectangles around the whole grid: top, bottom, left,
/// right. These exist regardless of the carve - the boundary is never open.
pub fn boundary_segments(maze: &Maze, scale: &SegmentScale) -> Vec<WallSegment> {
    let (width, height) = grid_extent(maze, scale);
    let (_, _, thickness) = scale.parts();

    vec![WallSegment {
             centre_x: width / 2.0,
             centre_y: 0.0,
             width,
             height: thickness,
         },
         WallSegment {
             centre_x: width / 2.0,
             centre_y: height,
             width,
             height: thickness,
         },
         WallSegment {
             centre_x: 0.0,
             centre_y: height / 2.0,
             width: thickness,
             height,
         },
         WallSegment {
             centre_x: width,
             centre_y: height / 2.0,
             width: thickness,
             height,
         }]
}

/// Centre of the top left cell, radius a quarter of the smaller unit length.
pub fn start_marker(scale: &SegmentScale) -> StartMarker {
    let (unit_width, unit_height, _) = scale.parts();
    StartMarker {
        centre_x: unit_width / 2.0,
        centre_y: unit_height / 2.0,
        radius: unit_width.min(unit_height) / 4.0,
    }
}

/// Centre of the bottom right cell, the extreme cell opposite the start.
pub fn goal_marker(maze: &Maze, scale: &SegmentScale) -> GoalMarker {
    let (width, height) = grid_extent(maze, scale);
    let (unit_width, unit_height, _) = scale.parts();
    GoalMarker {
        centre_x: width - unit_width / 2.0,
        centre_y: height - unit_height / 2.0,
        width: unit_width * GOAL_CELL_PROPORTION,
        height: unit_height * GOAL_CELL_PROPORTION,
    }
}

pub fn segment_plan(maze: &Maze, scale: &SegmentScale) -> SegmentPlan {
    let (RowsCount(rows), ColumnsCount(columns)) = (maze.rows(), maze.columns());
    let (width, height) = grid_extent(maze, scale);
    SegmentPlan {
        rows,
        columns,
        width,
        height,
        walls: wall_segments(maze, scale),
        boundary: boundary_segments(maze, scale),
        start: start_marker(scale),
        goal: goal_marker(maze, scale),
    }
}

fn grid_extent(maze: &Maze, scale: &SegmentScale) -> (f64, f64) {
    let (RowsCount(rows), ColumnsCount(columns)) = (maze.rows(), maze.columns());
    let (unit_width, unit_height, _) = scale.parts();
    (columns as f64 * unit_width, rows as f64 * unit_height)
}

#[cfg(test)]
mod tests {
    use rand;

    use super::*;
    use crate::cells::GridCoordinate;
    use crate::generators;
    use crate::maze::Maze;
    use crate::units::{ColumnsCount, RowsCount};

    fn blank_maze(rows: usize, columns: usize) -> Maze {
        Maze::new(RowsCount(rows), ColumnsCount(columns)).expect("maze dimensions are invalid")
    }

    fn test_scale() -> SegmentScale {
        SegmentScale::new(CellWidth(100.0), CellHeight(50.0), WallThickness(10.0))
    }

    fn segment(centre_x: f64, centre_y: f64, width: f64, height: f64) -> WallSegment {
        WallSegment {
            centre_x,
            centre_y,
            width,
            height,
        }
    }

    #[test]
    fn every_closed_wall_becomes_a_segment() {
        let m = blank_maze(2, 2);
        let segments = wall_segments(&m, &test_scale());
        assert_eq!(segments,
                   vec![// horizontal walls, row major
                        segment(50.0, 50.0, 100.0, 10.0),
                        segment(150.0, 50.0, 100.0, 10.0),
                        // vertical walls, row major
                        segment(100.0, 25.0, 10.0, 50.0),
                        segment(100.0, 75.0, 10.0, 50.0)]);
    }

    #[test]
    fn open_walls_produce_no_segment() {
        let mut m = blank_maze(2, 2);
        m.open_wall_between(GridCoordinate::new(0, 0), GridCoordinate::new(0, 1))
            .expect("open failed");
        let segments = wall_segments(&m, &test_scale());
        assert_eq!(segments,
                   vec![segment(50.0, 50.0, 100.0, 10.0),
                        segment(150.0, 50.0, 100.0, 10.0),
                        segment(100.0, 75.0, 10.0, 50.0)]);
    }

    #[test]
    fn single_cell_maze_has_boundary_but_no_wall_segments() {
        let m = blank_maze(1, 1);
        assert!(wall_segments(&m, &test_scale()).is_empty());
        assert_eq!(boundary_segments(&m, &test_scale()).len(), 4);
    }

    #[test]
    fn boundary_wraps_the_grid_extent() {
        let m = blank_maze(2, 2);
        let boundary = boundary_segments(&m, &test_scale());
        assert_eq!(boundary,
                   vec![segment(100.0, 0.0, 200.0, 10.0),
                        segment(100.0, 100.0, 200.0, 10.0),
                        segment(0.0, 50.0, 10.0, 100.0),
                        segment(200.0, 50.0, 10.0, 100.0)]);
    }

    #[test]
    fn markers_sit_in_the_corner_cells() {
        let m = blank_maze(2, 2);
        let scale = test_scale();

        let start = start_marker(&scale);
        assert_eq!(start.centre_x, 50.0);
        assert_eq!(start.centre_y, 25.0);
        assert_eq!(start.radius, 12.5);

        let goal = goal_marker(&m, &scale);
        assert_eq!(goal.centre_x, 150.0);
        assert_eq!(goal.centre_y, 75.0);
        assert_eq!(goal.width, 100.0 * GOAL_CELL_PROPORTION);
        assert_eq!(goal.height, 50.0 * GOAL_CELL_PROPORTION);
    }

    #[test]
    fn carved_maze_segment_count() {
        let mut rng = rand::weak_rng();
        let maze = generators::generate(RowsCount(6), ColumnsCount(6), &mut rng)
            .expect("dimensions are valid");
        // 60 wall slots in a 6x6 grid, 35 opened by the carve.
        let segments = wall_segments(&maze, &test_scale());
        assert_eq!(segments.len(), 60 - 35);
    }

    #[test]
    fn plan_serializes_for_host_engines() {
        let m = blank_maze(2, 3);
        let plan = segment_plan(&m, &test_scale());
        let json = serde_json::to_value(&plan).expect("plan serializes");
        assert_eq!(json["rows"], serde_json::Value::from(2));
        assert_eq!(json["columns"], serde_json::Value::from(3));
        assert_eq!(json["width"], serde_json::Value::from(300.0));
        assert!(json["walls"].is_array());
        assert_eq!(json["boundary"].as_array().map(|b| b.len()), Some(4));
        assert_eq!(json["start"]["radius"], serde_json::Value::from(12.5));
        assert_eq!(json["goal"]["centre_y"], serde_json::Value::from(75.0));
    }
}
