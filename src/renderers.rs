//! Rendering mazes as raster images.

use std::io;
use std::path::Path;

use image::{self, ImageBuffer, Rgba, RgbaImage};

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::maze::Maze;
use crate::units::{ColumnsCount, RowsCount};

const BACKGROUND_COLOUR: Rgba<u8> = Rgba { data: [0xff, 0xff, 0xff, 0xff] };
const WALL_COLOUR: Rgba<u8> = Rgba { data: [0x00, 0x00, 0x00, 0xff] };
const START_COLOUR: Rgba<u8> = Rgba { data: [0x00, 0x00, 0xff, 0xff] };
const GOAL_COLOUR: Rgba<u8> = Rgba { data: [0x00, 0xff, 0x00, 0xff] };

#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    cell_side_pixels_length: u8,
    mark_start_end: bool,
}

pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 10,
                mark_start_end: false,
            },
        }
    }

    pub fn cell_side_pixels_length(mut self, length: u8) -> RenderOptionsBuilder {
        self.options.cell_side_pixels_length = length;
        self
    }

    pub fn mark_start_end(mut self, mark: bool) -> RenderOptionsBuilder {
        self.options.mark_start_end = mark;
        self
    }

    pub fn build(self) -> RenderOptions {
        self.options
    }
}

/// Paint the maze into an RGBA pixel buffer: white rooms with one pixel
/// black wall lines, cell sides `cell_side_pixels_length` pixels long.
///
/// The buffer is columns·s + 1 by rows·s + 1 pixels so the east and south
/// grid boundary lines have a pixel row to land on. With `mark_start_end`
/// the start cell room is filled blue and the goal cell room green.
pub fn paint_maze(maze: &Maze, options: &RenderOptions) -> RgbaImage {
    let cell_size = u32::from(options.cell_side_pixels_length);
    let (RowsCount(rows), ColumnsCount(columns)) = (maze.rows(), maze.columns());
    let image_width = columns as u32 * cell_size + 1;
    let image_height = rows as u32 * cell_size + 1;
    let mut image = ImageBuffer::from_pixel(image_width, image_height, BACKGROUND_COLOUR);

    for cell in maze.iter() {
        let x1 = cell.col * cell_size;
        let y1 = cell.row * cell_size;
        let x2 = (cell.col + 1) * cell_size;
        let y2 = (cell.row + 1) * cell_size;

        // special cases north and west to handle the first row and column.
        if maze.neighbour_at_direction(cell, CompassPrimary::North).is_none() {
            draw_horizontal_line(&mut image, x1, x2, y1);
        }
        if maze.neighbour_at_direction(cell, CompassPrimary::West).is_none() {
            draw_vertical_line(&mut image, y1, y2, x1);
        }
        if !maze.is_neighbour_open(cell, CompassPrimary::East) {
            draw_vertical_line(&mut image, y1, y2, x2);
        }
        if !maze.is_neighbour_open(cell, CompassPrimary::South) {
            draw_horizontal_line(&mut image, x1, x2, y2);
        }
    }

    if options.mark_start_end {
        fill_cell_room(&mut image,
                       GridCoordinate::new(0, 0),
                       cell_size,
                       START_COLOUR);
        fill_cell_room(&mut image,
                       GridCoordinate::new(rows as u32 - 1, columns as u32 - 1),
                       cell_size,
                       GOAL_COLOUR);
    }

    image
}

/// Paint the maze and save it as a PNG file.
pub fn render_maze_image(maze: &Maze,
                         options: &RenderOptions,
                         output_file: &Path)
                         -> io::Result<()> {
    let image = paint_maze(maze, options);
    let (width, height) = image.dimensions();
    image::save_buffer(output_file, &image, width, height, image::ColorType::RGBA(8))
}

fn draw_horizontal_line(image: &mut RgbaImage, x1: u32, x2: u32, y: u32) {
    for x in x1..=x2 {
        image.put_pixel(x, y, WALL_COLOUR);
    }
}

fn draw_vertical_line(image: &mut RgbaImage, y1: u32, y2: u32, x: u32) {
    for y in y1..=y2 {
        image.put_pixel(x, y, WALL_COLOUR);
    }
}

// Fill the middle of a cell, inset from the walls by a quarter cell.
fn fill_cell_room(image: &mut RgbaImage, cell: GridCoordinate, cell_size: u32, colour: Rgba<u8>) {
    let inset = cell_size / 4;
    let x1 = cell.col * cell_size + inset + 1;
    let x2 = (cell.col + 1) * cell_size - inset;
    let y1 = cell.row * cell_size + inset + 1;
    let y2 = (cell.row + 1) * cell_size - inset;
    for y in y1..y2 {
        for x in x1..x2 {
            image.put_pixel(x, y, colour);
        }
    }
}
