use crate::entities::{is_mining_target, Dwarf};
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};

/// The side length of the grid used by the default simulation.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// A grid coordinate.
///
/// Coordinates are signed because the ring search probes candidates outside
/// the grid before the bounds filter rejects them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Whether the other point is within king-move distance, i.e. at most one
    /// cell away on each axis. A point is adjacent to itself.
    pub fn is_adjacent(&self, other: Point) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// Takes a single step toward the target, moving at most one cell on each
    /// axis. Returns the target itself once it is adjacent.
    pub fn step_toward(&self, target: Point) -> Point {
        if self.is_adjacent(target) {
            return target;
        }

        Point {
            x: target.x.clamp(self.x - 1, self.x + 1),
            y: target.y.clamp(self.y - 1, self.y + 1),
        }
    }
}

/// A single grid cell. Cells carry their own coordinate for self-description.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub mined: bool,
}

impl Cell {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn char(&self) -> char {
        match self.mined {
            true => '#',
            false => '.',
        }
    }

    pub fn color(&self) -> Color {
        match self.mined {
            true => Color::Blue,
            false => Color::Red,
        }
    }
}

/// The square mining grid, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell unmined.
    pub fn new(size: usize) -> Grid {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                cells.push(Cell { x, y, mined: false });
            }
        }

        Grid { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.size
            && (point.y as usize) < self.size
    }

    pub fn get(&self, point: Point) -> Option<&Cell> {
        if !self.contains(point) {
            return None;
        }

        self.cells.get(point.y as usize * self.size + point.x as usize)
    }

    /// Whether the cell at the point is mined. Out-of-bounds points are not.
    pub fn is_mined(&self, point: Point) -> bool {
        self.get(point).is_some_and(|cell| cell.mined)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn mined_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.mined).count()
    }

    pub fn is_fully_mined(&self) -> bool {
        self.cells.iter().all(|cell| cell.mined)
    }

    /// Returns a copy of the grid with the mined flag at the point inverted.
    /// The point must be a valid cell.
    pub fn toggle_mined(&self, point: Point) -> Grid {
        let cells = self
            .cells
            .iter()
            .map(|cell| {
                if cell.point() == point {
                    Cell {
                        mined: !cell.mined,
                        ..*cell
                    }
                } else {
                    cell.clone()
                }
            })
            .collect();

        Grid {
            size: self.size,
            cells,
        }
    }

    pub(crate) fn set_mined(&mut self, point: Point) {
        if self.contains(point) {
            self.cells[point.y as usize * self.size + point.x as usize].mined = true;
        }
    }

    /// Draws the grid to the console, with the dwarves and their current
    /// mining targets overlaid.
    pub fn draw(&self, tick: usize, dwarves: &[Dwarf]) {
        let mut stdout = stdout();

        // Display information about the simulation
        execute!(
            stdout,
            Clear(ClearType::All),
            Hide,
            Print("Tick: "),
            Print(tick.to_string()),
            Print("\nMined: "),
            Print(self.mined_count().to_string()),
            Print(" / "),
            Print((self.size * self.size).to_string()),
            Print("\nDwarves: "),
            Print(dwarves.len().to_string()),
            Print("\n\n")
        )
        .unwrap();

        // Display the grid
        for y in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                let point = Point::new(x, y);
                let (value, color) = match dwarves.iter().find(|dwarf| dwarf.position() == point) {
                    Some(dwarf) => (dwarf.char(), dwarf.color()),
                    None if is_mining_target(dwarves, point) => ('*', Color::Green),
                    None => {
                        let cell = self.get(point).unwrap();
                        (cell.char(), cell.color())
                    }
                };
                execute!(
                    stdout,
                    SetForegroundColor(color),
                    Print(value),
                    SetForegroundColor(Color::Reset)
                )
                .unwrap();
            }
            execute!(stdout, Print("\n")).unwrap();
        }

        stdout.flush().unwrap();
    }
}
