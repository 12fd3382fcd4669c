use dwarves_engine::{Game, DEFAULT_GRID_SIZE};
use std::thread;
use std::time::Duration;

fn main() {
    let replay_filename = "/tmp/dwarves_replay.json".to_string();
    let mut game = Game::new(DEFAULT_GRID_SIZE, Some(replay_filename));

    let mut state = game.start();
    game.draw();

    // The driver owns the clock: one tick per second until the grid is mined out
    while !state.complete {
        thread::sleep(Duration::from_secs(1));
        state = game.update();
        game.draw();
    }

    println!("\nGrid fully mined in {} ticks", state.tick);
}
