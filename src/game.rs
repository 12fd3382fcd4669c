use crate::map::Point;
use crate::replay::{create_replay_logger, ReplayLogger};
use crate::simulation::Snapshot;

/// The dwarves game.
/// Main entry point for driving the simulation.
///
/// The game owns the current snapshot and replaces it wholesale on every
/// update or edit; the simulation logic itself lives in [`Snapshot`]. An
/// external driver is expected to call [`Game::update`] on a fixed schedule
/// (one second per tick by convention) and [`Game::toggle_mined`] on user
/// interaction.
pub struct Game {
    snapshot: Snapshot,
    size: usize,
    tick: usize,
    started: bool,
    complete_logged: bool,
    replay_logger: Box<dyn ReplayLogger>,
}

/// Represents the state of the game.
pub struct GameState {
    /// The current tick.
    pub tick: usize,
    /// The side length of the grid.
    pub size: usize,
    /// The number of mined cells.
    pub mined: usize,
    /// Whether every cell of the grid is mined.
    pub complete: bool,
    /// The dwarves, in stable collection order.
    pub dwarves: Vec<StateDwarf>,
}

/// Represents a dwarf in the game state.
pub struct StateDwarf {
    /// The unique identifier for the dwarf.
    pub id: String,
    /// The x coordinate of the dwarf.
    pub x: i32,
    /// The y coordinate of the dwarf.
    pub y: i32,
    /// The cell the dwarf is mining, if any.
    pub mining: Option<Point>,
    /// The standing point the dwarf is walking toward, if any.
    pub moving: Option<Point>,
}

impl Game {
    /// Creates a new game.
    ///
    /// # Arguments
    /// * `size` - The side length of the square grid.
    /// * `replay_filename` - The filename to save the replay of the run to. If `None`, no replay will be saved.
    pub fn new(size: usize, replay_filename: Option<String>) -> Game {
        Game {
            snapshot: Snapshot::initial(size),
            size,
            tick: 0,
            started: false,
            complete_logged: false,
            replay_logger: create_replay_logger(replay_filename, size),
        }
    }

    /// Starts the game.
    ///
    /// Must be called once before updating the game state.
    pub fn start(&mut self) -> GameState {
        self.tick = 0;
        self.started = true;
        self.complete_logged = false;
        self.snapshot = Snapshot::initial(self.size);
        self.replay_logger.clear();

        for dwarf in &self.snapshot.dwarves {
            self.replay_logger
                .log_spawn_dwarf(self.tick, dwarf.id().to_string(), (dwarf.x, dwarf.y));
        }
        self.log_tick();

        self.state()
    }

    /// Advances the simulation by one tick and replaces the snapshot.
    pub fn update(&mut self) -> GameState {
        if !self.started {
            panic!("Game has not started! Call `start` to start the game.");
        }

        self.tick += 1;

        let next = self.snapshot.step();
        self.log_changes(&next);
        self.snapshot = next;

        self.log_tick();

        // Save the replay the first time the grid completes; the simulation
        // itself keeps ticking indefinitely
        if self.snapshot.grid.is_fully_mined() && !self.complete_logged {
            self.complete_logged = true;
            self.replay_logger.log_end_game("Complete".to_string());
            self.replay_logger.save();
        }

        self.state()
    }

    /// Toggles the mined flag of the cell at the coordinate. The dwarves are
    /// unaffected.
    ///
    /// # Arguments
    /// * `x` - The x coordinate of the cell to toggle.
    /// * `y` - The y coordinate of the cell to toggle.
    pub fn toggle_mined(&mut self, x: i32, y: i32) -> GameState {
        self.snapshot = self.snapshot.toggle_mined(Point::new(x, y));
        self.replay_logger.log_toggle_cell(self.tick, (x, y));

        self.state()
    }

    /// Draws the game to the console.
    pub fn draw(&self) {
        self.snapshot.grid.draw(self.tick, &self.snapshot.dwarves);
    }

    /// The current snapshot, for drivers that render the world themselves.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Computes the current game state.
    pub fn state(&self) -> GameState {
        GameState {
            tick: self.tick,
            size: self.size,
            mined: self.snapshot.grid.mined_count(),
            complete: self.snapshot.grid.is_fully_mined(),
            dwarves: self
                .snapshot
                .dwarves
                .iter()
                .map(|dwarf| StateDwarf {
                    id: dwarf.id().to_string(),
                    x: dwarf.x,
                    y: dwarf.y,
                    mining: dwarf.mining,
                    moving: dwarf.moving,
                })
                .collect(),
        }
    }
}

impl Game {
    fn log_changes(&mut self, next: &Snapshot) {
        // Dwarves keep their collection order across ticks, so pairing by
        // index matches before and after states
        for (before, after) in self.snapshot.dwarves.iter().zip(&next.dwarves) {
            if before.position() != after.position() {
                self.replay_logger.log_move_dwarf(
                    self.tick,
                    after.id().to_string(),
                    (before.x, before.y),
                    (after.x, after.y),
                );
            }
        }

        for cell in next.grid.cells() {
            if cell.mined && !self.snapshot.grid.is_mined(cell.point()) {
                self.replay_logger.log_mine_cell(self.tick, (cell.x, cell.y));
            }
        }
    }

    fn log_tick(&mut self) {
        self.replay_logger.log_tick(
            self.tick,
            self.snapshot.grid.mined_count(),
            self.snapshot.dwarves.len(),
        );
    }
}
