use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter};

pub fn create_replay_logger(filename: Option<String>, size: usize) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, size)),
    }
}

pub trait ReplayLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_tick(&mut self, tick: usize, mined: usize, dwarves: usize) {}

    #[allow(unused_variables)]
    fn log_end_game(&mut self, reason: String) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, tick: usize, event: Event) {}

    fn clear(&mut self) {}

    fn save(&self) {}

    fn log_spawn_dwarf(&mut self, tick: usize, id: String, location: (i32, i32)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Spawn,
                entity_id: Some(id),
                location: Some(location),
                destination: None,
            },
        );
    }

    fn log_move_dwarf(
        &mut self,
        tick: usize,
        id: String,
        location: (i32, i32),
        destination: (i32, i32),
    ) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Move,
                entity_id: Some(id),
                location: Some(location),
                destination: Some(destination),
            },
        );
    }

    fn log_mine_cell(&mut self, tick: usize, location: (i32, i32)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Mine,
                entity_id: None,
                location: Some(location),
                destination: None,
            },
        );
    }

    fn log_toggle_cell(&mut self, tick: usize, location: (i32, i32)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Toggle,
                entity_id: None,
                location: Some(location),
                destination: None,
            },
        );
    }
}

#[derive(serde::Serialize)]
enum EventType {
    Spawn,
    Move,
    Mine,
    Toggle,
}

#[derive(serde::Serialize)]
pub struct Event {
    event_type: EventType,
    entity_id: Option<String>,
    location: Option<(i32, i32)>,
    destination: Option<(i32, i32)>,
}

struct Tick {
    tick: usize,
    mined: usize,
    dwarves: usize,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    size: usize,
    ticks: Vec<Tick>,
    events: HashMap<usize, Vec<Event>>,
    finished_reason: Option<String>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, size: usize) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            size,
            ticks: Vec::new(),
            events: HashMap::new(),
            finished_reason: None,
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_tick(&mut self, tick: usize, mined: usize, dwarves: usize) {
        self.ticks.push(Tick {
            tick,
            mined,
            dwarves,
        });
    }

    fn log_end_game(&mut self, reason: String) {
        self.finished_reason = Some(reason);
    }

    fn log_event(&mut self, tick: usize, event: Event) {
        self.events.entry(tick).or_default().push(event);
    }

    fn clear(&mut self) {
        self.ticks.clear();
        self.events.clear();
        self.finished_reason = None;
    }

    fn save(&self) {
        let file = File::create(&self.filename).unwrap();
        let ticks: Vec<_> = self
            .ticks
            .iter()
            .map(|tick| {
                json!({
                    "tick": tick.tick,
                    "mined": tick.mined,
                    "dwarves": tick.dwarves,
                    "events": self.events.get(&tick.tick).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        let data = json!({
            "grid": {
                "size": self.size,
            },
            "ticks": ticks,
            "finished_reason": self.finished_reason,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data).unwrap();
    }
}
