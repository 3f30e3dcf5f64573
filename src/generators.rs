//! Maze generation algorithms.

use bit_set::BitSet;
use rand::{Rng, XorShiftRng};

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::maze::{Maze, MazeError};
use crate::units::{ColumnsCount, RowsCount};

// Candidate carve directions in the order they are listed before shuffling:
// up, right, down, left.
const CARVE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                               CompassPrimary::East,
                                               CompassPrimary::South,
                                               CompassPrimary::West];

/// Shuffle a slice in place into a uniformly random permutation.
///
/// Fisher-Yates with a shrinking window: draw an index uniformly in
/// [0, counter), decrement the counter and swap the drawn element to the
/// window end. The final window of one element still draws an index, so a
/// shuffle always consumes `values.len()` draws from the rng - seeded
/// reproducibility depends on that draw count. Slices of length <= 1 come
/// back unchanged. Works on any slice, allocates nothing.
pub fn shuffle<T>(rng: &mut XorShiftRng, values: &mut [T]) {
    let mut counter = values.len();
    while counter > 0 {
        let index = rng.gen_range(0, counter);
        counter -= 1;
        values.swap(counter, index);
    }
}

/// Create a maze of the given dimensions and carve it with
/// `recursive_backtracker`. Fails with `MazeError::InvalidDimension` before
/// touching the rng if either dimension is zero.
pub fn generate(rows: RowsCount,
                columns: ColumnsCount,
                rng: &mut XorShiftRng)
                -> Result<Maze, MazeError> {
    let mut maze = Maze::new(rows, columns)?;
    recursive_backtracker(&mut maze, rng);
    Ok(maze)
}

/// Carve a perfect maze into a blank maze with the recursive backtracker
/// algorithm.
///
/// A randomised depth first walk over the cells. The start cell is drawn
/// uniformly, row first then column. Each newly visited cell shuffles the
/// four candidate directions and consumes them in that order: a direction
/// leaving the grid is skipped, a neighbour already visited is skipped,
/// otherwise the wall between the two cells is opened and the walk descends
/// into the neighbour. A cell with no candidates left retreats to the cell
/// it was entered from. Every cell is visited exactly once, so exactly
/// maze.size() - 1 walls end up open and any two cells are joined by a
/// single path - the open walls form a spanning tree of the grid.
///
/// The walk keeps its own stack of (cell, shuffled directions, cursor)
/// frames rather than recursing, which leaves the visit order and the rng
/// draw order untouched while the call stack stays flat on large grids.
///
/// The maze is expected to be freshly created; walls opened by earlier
/// carving would be counted against the invariants above.
pub fn recursive_backtracker(maze: &mut Maze, rng: &mut XorShiftRng) {
    let (RowsCount(rows), ColumnsCount(columns)) = (maze.rows(), maze.columns());
    let start_row = rng.gen_range(0, rows);
    let start_column = rng.gen_range(0, columns);
    let start = GridCoordinate::new(start_row as u32, start_column as u32);

    let mut visited = BitSet::with_capacity(maze.size());
    let mut stack: Vec<CarveFrame> = Vec::new();
    visit_cell(maze, rng, &mut visited, &mut stack, start);

    loop {
        // Take the next unconsumed direction of the deepest frame, if any.
        let unconsumed = match stack.last_mut() {
            Some(frame) => {
                if frame.next_direction < CARVE_DIRECTIONS.len() {
                    let direction = frame.directions[frame.next_direction];
                    frame.next_direction += 1;
                    Some((frame.coord, direction))
                } else {
                    None
                }
            }
            None => break,
        };

        match unconsumed {
            Some((coord, direction)) => {
                if let Some(next) = maze.neighbour_at_direction(coord, direction) {
                    let next_index = maze.grid_coordinate_to_index(next)
                        .expect("in bounds neighbours are always valid");
                    if !visited.contains(next_index) {
                        maze.open_wall_between(coord, next)
                            .expect("in bounds neighbours are always adjacent");
                        visit_cell(maze, rng, &mut visited, &mut stack, next);
                    }
                }
            }
            None => {
                // Frame exhausted, retreat.
                stack.pop();
            }
        }
    }
}

struct CarveFrame {
    coord: GridCoordinate,
    directions: [CompassPrimary; 4],
    next_direction: usize,
}

fn visit_cell(maze: &Maze,
              rng: &mut XorShiftRng,
              visited: &mut BitSet,
              stack: &mut Vec<CarveFrame>,
              coord: GridCoordinate) {
    let cell_index = maze.grid_coordinate_to_index(coord)
        .expect("visited coordinates are always valid");
    visited.insert(cell_index);

    let mut directions = CARVE_DIRECTIONS;
    shuffle(rng, &mut directions);
    stack.push(CarveFrame {
        coord,
        directions,
        next_direction: 0,
    });
}

#[cfg(test)]
mod tests {
    use itertools::Itertools; // a trait
    use petgraph::algo::connected_components;
    use quickcheck::quickcheck;
    use rand::{self, SeedableRng, XorShiftRng};

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn seeded_rng(seed: (u32, u32, u32, u32)) -> XorShiftRng {
        let words = [seed.0, seed.1, seed.2, seed.3];
        if words == [0, 0, 0, 0] {
            // An all zero seed is rejected by XorShiftRng.
            XorShiftRng::from_seed([1, 2, 3, 4])
        } else {
            XorShiftRng::from_seed(words)
        }
    }

    // Keep the property test grids small but never degenerate.
    fn test_dimensions(rows_seed: u8, columns_seed: u8) -> (usize, usize) {
        (usize::from(rows_seed % 16) + 1, usize::from(columns_seed % 16) + 1)
    }

    #[test]
    fn shuffling_produces_a_permutation() {
        fn prop(values: Vec<u32>, seed: (u32, u32, u32, u32)) -> bool {
            let mut rng = seeded_rng(seed);
            let mut shuffled = values.clone();
            shuffle(&mut rng, &mut shuffled);
            shuffled.len() == values.len() &&
            shuffled.iter().cloned().sorted() == values.iter().cloned().sorted()
        }
        quickcheck(prop as fn(Vec<u32>, (u32, u32, u32, u32)) -> bool);
    }

    #[test]
    fn shuffling_one_or_zero_elements_changes_nothing() {
        let mut rng = rand::weak_rng();

        let mut empty: [u32; 0] = [];
        shuffle(&mut rng, &mut empty);

        let mut single = [7u32];
        shuffle(&mut rng, &mut single);
        assert_eq!(single, [7]);
    }

    #[test]
    fn carving_opens_cell_count_minus_one_walls() {
        fn prop(rows_seed: u8, columns_seed: u8, seed: (u32, u32, u32, u32)) -> bool {
            let (rows, columns) = test_dimensions(rows_seed, columns_seed);
            let mut rng = seeded_rng(seed);
            let maze = generate(RowsCount(rows), ColumnsCount(columns), &mut rng)
                .expect("test dimensions are never zero");
            maze.open_walls_count() == rows * columns - 1
        }
        quickcheck(prop as fn(u8, u8, (u32, u32, u32, u32)) -> bool);
    }

    #[test]
    fn carving_connects_every_cell() {
        fn prop(rows_seed: u8, columns_seed: u8, seed: (u32, u32, u32, u32)) -> bool {
            let (rows, columns) = test_dimensions(rows_seed, columns_seed);
            let mut rng = seeded_rng(seed);
            let maze = generate(RowsCount(rows), ColumnsCount(columns), &mut rng)
                .expect("test dimensions are never zero");
            maze.reachable_cell_count(GridCoordinate::new(0, 0)) == Some(rows * columns)
        }
        quickcheck(prop as fn(u8, u8, (u32, u32, u32, u32)) -> bool);
    }

    #[test]
    fn carving_is_deterministic_for_a_fixed_seed() {
        fn prop(rows_seed: u8, columns_seed: u8, seed: (u32, u32, u32, u32)) -> bool {
            let (rows, columns) = test_dimensions(rows_seed, columns_seed);
            let carve = || {
                let mut rng = seeded_rng(seed);
                generate(RowsCount(rows), ColumnsCount(columns), &mut rng)
                    .expect("test dimensions are never zero")
            };
            let first = carve();
            let second = carve();
            first.vertical_walls() == second.vertical_walls() &&
            first.horizontal_walls() == second.horizontal_walls()
        }
        quickcheck(prop as fn(u8, u8, (u32, u32, u32, u32)) -> bool);
    }

    #[test]
    fn carved_passages_form_one_connected_component() {
        let mut rng = rand::weak_rng();
        let maze = generate(RowsCount(12), ColumnsCount(12), &mut rng)
            .expect("dimensions are valid");
        let graph = maze.passage_graph::<u32>();
        assert_eq!(graph.node_count(), 144);
        assert_eq!(graph.edge_count(), 143);
        assert_eq!(connected_components(&graph), 1);
    }

    #[test]
    fn single_cell_maze_carves_nothing() {
        let mut rng = rand::weak_rng();
        let maze = generate(RowsCount(1), ColumnsCount(1), &mut rng)
            .expect("dimensions are valid");
        assert_eq!(maze.open_walls_count(), 0);
        assert!(maze.vertical_walls().is_empty());
        assert!(maze.horizontal_walls().is_empty());
    }

    #[test]
    fn two_by_two_maze_is_a_spanning_tree() {
        // Any spanning tree of the 2x2 grid opens three of its four walls.
        let mut rng = rand::weak_rng();
        for _ in 0..100 {
            let maze = generate(RowsCount(2), ColumnsCount(2), &mut rng)
                .expect("dimensions are valid");
            assert_eq!(maze.vertical_walls().len(), 2);
            assert_eq!(maze.horizontal_walls().len(), 2);
            assert_eq!(maze.open_walls_count(), 3);
            assert_eq!(maze.reachable_cell_count(GridCoordinate::new(0, 0)), Some(4));
        }
    }

    #[test]
    fn zero_dimensions_fail_before_carving() {
        let mut rng = rand::weak_rng();
        let result = generate(RowsCount(0), ColumnsCount(5), &mut rng);
        assert_eq!(result.err(),
                   Some(MazeError::InvalidDimension(RowsCount(0), ColumnsCount(5))));
    }
}
