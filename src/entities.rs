use crate::map::Point;
use crossterm::style::Color;
use uuid::Uuid;

/// A dwarf: a mobile agent with a position and up to two intents.
///
/// `mining` is the cell the dwarf intends to or is currently mining; `moving`
/// is the standing point it is walking toward. A stale `mining` target may
/// linger while a relocation is in progress; the transition re-derives both
/// every tick.
#[derive(Clone, Debug)]
pub struct Dwarf {
    id: String,
    pub x: i32,
    pub y: i32,
    pub mining: Option<Point>,
    pub moving: Option<Point>,
}

impl Dwarf {
    pub fn new(x: i32, y: i32) -> Dwarf {
        Dwarf {
            id: Uuid::new_v4().to_string(),
            x,
            y,
            mining: None,
            moving: None,
        }
    }

    /// The unique identifier for the dwarf. Identity plays no role in the
    /// transition semantics; it only gives the UI and event log a stable handle.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The successor of this dwarf for the next tick, keeping its id.
    pub(crate) fn advanced(
        &self,
        position: Point,
        mining: Option<Point>,
        moving: Option<Point>,
    ) -> Dwarf {
        Dwarf {
            id: self.id.clone(),
            x: position.x,
            y: position.y,
            mining,
            moving,
        }
    }

    pub fn char(&self) -> char {
        'D'
    }

    pub fn color(&self) -> Color {
        Color::Yellow
    }
}

/// Whether any dwarf stands on the point.
pub fn has_dwarf(dwarves: &[Dwarf], point: Point) -> bool {
    dwarves.iter().any(|dwarf| dwarf.position() == point)
}

/// Whether any dwarf's mining target is the point.
pub fn is_mining_target(dwarves: &[Dwarf], point: Point) -> bool {
    dwarves.iter().any(|dwarf| dwarf.mining == Some(point))
}
