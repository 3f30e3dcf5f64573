#![cfg_attr(feature="clippy", feature(plugin))]
#![cfg_attr(feature="clippy", plugin(clippy))]

use docopt::Docopt;
use rand::{weak_rng, SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use wallmaze::{
    cells::{CoordinateSmallVec, GridCoordinate},
    displays::{CellDisplay, StartEndPointsDisplay},
    generators,
    maze::Maze,
    renderers,
    segments,
    units,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
    path::Path,
    rc::Rc
};

const USAGE: &str = "Wallmaze

Usage:
    wallmaze_driver -h | --help
    wallmaze_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--save-edges=<path>] [--save-segments=<path>] [--unit-width=<uw> --unit-height=<uh> --wall-thickness=<t>]
    wallmaze_driver render [text --text-out=<path>] [image --image-out=<path> --cell-pixels=<n>] [--mark-start-end] [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--save-edges=<path>] [--save-segments=<path>] [--unit-width=<uw> --unit-height=<uh> --wall-thickness=<t>]

Options:
    -h --help               Show this screen.
    --grid-size=<n>         The grid size is n * n.
    --grid-width=<w>        The grid width in a w*h grid [default: 20].
    --grid-height=<h>       The grid height in a w*h grid [default: 20].
    --seed=<s>              Fix the random number generator seed so the same maze is carved every run.
    --text-out=<path>       Output file path for a textual rendering of a maze.
    --image-out=<path>      Output file path for an image rendering of a maze. Always PNG format. [default: maze.png]
    --cell-pixels=<n>       Pixel count to render one cell wall in a maze max 255. [default: 10]
    --mark-start-end        Mark the start and goal cells when rendering.
    --unit-width=<uw>       World space width of one cell when translating walls to segments. [default: 40]
    --unit-height=<uh>      World space height of one cell when translating walls to segments. [default: 40]
    --wall-thickness=<t>    World space thickness of translated wall segments. [default: 10]
    --save-edges=<path>     Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --save-segments=<path>  Serialize the maze walls to a JSON file as world space segments, with the boundary walls and the start/goal markers.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    cmd_render: bool,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_mark_start_end: bool,
    flag_unit_width: f64,
    flag_unit_height: f64,
    flag_wall_thickness: f64,
    flag_save_edges: String,
    flag_save_segments: String,
}

// The driver keeps its errors in an `errors` module so everything
// `error_chain!` creates lives in one place.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            JsonWriteError(::serde_json::Error);
            MazeCreation(::wallmaze::maze::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let large_grid_cell_count = 25 * 25;
    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };
    let cells_count = width * height;
    let any_render_option = args.cmd_text || args.cmd_image;

    // Do whatever defaults we want if not given a specific 'render' command:
    // text suits a terminal until the maze gets too big to read there.
    let do_text_render = args.cmd_text ||
                         (!any_render_option && cells_count < large_grid_cell_count);
    let do_image_render = args.cmd_image ||
                          (!any_render_option && cells_count >= large_grid_cell_count);

    let mut rng = match args.flag_seed {
        Some(seed) => seeded_rng(seed),
        None => weak_rng(),
    };

    let mut maze = generators::generate(units::RowsCount(height),
                                        units::ColumnsCount(width),
                                        &mut rng)?;

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    if !args.flag_save_segments.is_empty() {

        save_wall_segments(&maze, &args)?;
    }

    if do_text_render {

        set_maze_display(&mut maze, &args);

        if args.flag_text_out.is_empty() {
            println!("{}", maze);
        } else {
            write_text_to_file(&format!("{}", maze), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if do_image_render {
        let render_options = renderers::RenderOptionsBuilder::new()
            .cell_side_pixels_length(args.flag_cell_pixels)
            .mark_start_end(args.flag_mark_start_end)
            .build();
        renderers::render_maze_image(&maze, &render_options, Path::new(&args.flag_image_out))
            .chain_err(|| format!("Failed to write maze image file {}", args.flag_image_out))?;
    }

    Ok(())
}

// XorShiftRng seeding must never be all zeroes, so fold the user seed over
// the generator's default seeding constants rather than using it directly.
fn seeded_rng(seed: u64) -> XorShiftRng {
    let low = seed as u32;
    let high = (seed >> 32) as u32;
    XorShiftRng::from_seed([0x193a_6754 ^ low,
                            0xa8a7_d469 ^ high,
                            0x9783_5e92 ^ low,
                            0x5c47_2f96 ^ high])
}

/// Show the start and goal cell markers in the textual rendering when asked,
/// otherwise leave every cell body blank.
fn set_maze_display(maze: &mut Maze, maze_args: &MazeArgs) {

    let (start_points, end_points) = if maze_args.flag_mark_start_end {
        let units::RowsCount(rows) = maze.rows();
        let units::ColumnsCount(columns) = maze.columns();
        (as_coordinate_smallvec(GridCoordinate::new(0, 0)),
         as_coordinate_smallvec(GridCoordinate::new(rows as u32 - 1, columns as u32 - 1)))
    } else {
        (CoordinateSmallVec::new(), CoordinateSmallVec::new())
    };

    let display_start_end_points = Rc::new(StartEndPointsDisplay::new(start_points, end_points));
    maze.set_grid_display(Some(display_start_end_points as Rc<dyn CellDisplay>));
}

fn as_coordinate_smallvec(coord: GridCoordinate) -> CoordinateSmallVec {
    [coord]
        .iter()
        .cloned()
        .collect::<CoordinateSmallVec>()
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze.size();
    let edges_count = maze.open_walls_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze.iter_open_walls() {
        let index_a = maze.grid_coordinate_to_index(src)
            .expect("Open walls iter should give valid coordinate");
        let index_b = maze.grid_coordinate_to_index(dst)
            .expect("Open walls iter should give valid coordinate");
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}

fn save_wall_segments(maze: &Maze, maze_args: &MazeArgs) -> Result<()> {

    let scale = segments::SegmentScale::new(units::CellWidth(maze_args.flag_unit_width),
                                            units::CellHeight(maze_args.flag_unit_height),
                                            units::WallThickness(maze_args.flag_wall_thickness));
    let plan = segments::segment_plan(maze, &scale);
    let json = serde_json::to_string_pretty(&plan)?;

    write_text_to_file(&json, &maze_args.flag_save_segments)
        .chain_err(|| {
            format!("Failed to write wall segments to JSON file {}",
                    maze_args.flag_save_segments)
        })?;

    Ok(())
}
