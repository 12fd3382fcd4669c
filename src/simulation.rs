use crate::entities::{has_dwarf, Dwarf};
use crate::map::{Grid, Point};
use crate::search::find_nearest;
use regex::Regex;

/// The complete world state for one tick: the grid plus the dwarf collection.
///
/// Snapshots are immutable units of state; every transition returns a new one
/// and leaves its input untouched. Dwarf collection order is preserved across
/// ticks and is significant: the first dwarf in the collection wins a
/// contested mining target.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub grid: Grid,
    pub dwarves: Vec<Dwarf>,
}

impl Snapshot {
    /// The starting world: every cell unmined except the seed at (0, 0), and
    /// one dwarf standing on the seed, already assigned to mine (0, 1).
    pub fn initial(size: usize) -> Snapshot {
        let mut grid = Grid::new(size);
        grid.set_mined(Point::new(0, 0));

        let mut dwarf = Dwarf::new(0, 0);
        dwarf.mining = Some(Point::new(0, 1));

        Snapshot {
            grid,
            dwarves: vec![dwarf],
        }
    }

    /// Parses a snapshot from the string representation of a map.
    ///
    /// The format is a `size N` metadata line followed by one `m` line per
    /// row, where `.` is an unmined cell, `#` a mined cell, and `d` a dwarf
    /// standing on a mined cell (with no intents assigned). Dwarves are
    /// collected in row-major scan order.
    ///
    /// # Arguments
    /// * `map_contents` - A string representation of a map.
    pub fn parse(map_contents: &str) -> Snapshot {
        let size = Regex::new(r"size (\d+)")
            .unwrap()
            .captures(map_contents)
            .unwrap()
            .get(1)
            .unwrap()
            .as_str()
            .parse()
            .unwrap();

        let mut grid = Grid::new(size);
        let mut dwarves = Vec::new();

        Regex::new(r"m (.*)")
            .unwrap()
            .captures_iter(map_contents)
            .map(|captures| captures.get(1).unwrap().as_str().trim())
            .enumerate()
            .for_each(|(y, line)| {
                line.chars().enumerate().for_each(|(x, value)| {
                    let point = Point::new(x as i32, y as i32);
                    match value {
                        '.' => {}
                        '#' => grid.set_mined(point),
                        'd' => {
                            grid.set_mined(point);
                            dwarves.push(Dwarf::new(point.x, point.y));
                        }
                        _ => panic!("Invalid character value: {}", value),
                    }
                });
            });

        Snapshot { grid, dwarves }
    }

    /// Advances the simulation by one tick.
    ///
    /// The next grid is computed first: every cell some dwarf is currently
    /// mining becomes mined, all other flags carry forward. Then each dwarf,
    /// in collection order, either keeps walking toward its recorded
    /// destination, or picks the nearest unmined unclaimed cell to mine and a
    /// mined standing point beside it, moving, settling or committing to mine
    /// depending on adjacency.
    pub fn step(&self) -> Snapshot {
        let mut next_grid = self.grid.clone();
        for dwarf in &self.dwarves {
            if let Some(target) = dwarf.mining {
                next_grid.set_mined(target);
            }
        }

        // Targets picked earlier in the pass are visible to later dwarves, so
        // the first dwarf in collection order wins a contested cell
        let mut claimed: Vec<Point> = self
            .dwarves
            .iter()
            .filter_map(|dwarf| dwarf.mining)
            .collect();

        let mut next_dwarves = Vec::with_capacity(self.dwarves.len());
        for dwarf in &self.dwarves {
            // Relocating: keep walking toward the recorded destination; the
            // mining target is dropped and re-derived on arrival
            if let Some(destination) = dwarf.moving {
                if !dwarf.position().is_adjacent(destination) {
                    let position = dwarf.position().step_toward(destination);
                    next_dwarves.push(dwarf.advanced(position, None, Some(destination)));
                    continue;
                }
            }

            let next_mining = find_nearest(&self.grid, dwarf.position(), |point| {
                !self.grid.is_mined(point) && !claimed.contains(&point)
            });
            claimed.push(next_mining);

            // The standing point is searched on the next grid so cells that
            // finish mining this tick count as usable footing
            let next_standing = find_nearest(&next_grid, next_mining, |point| {
                point.x != next_mining.x
                    && point.y != next_mining.y
                    && !has_dwarf(&self.dwarves, point)
                    && next_grid.is_mined(point)
            });

            if !dwarf.position().is_adjacent(next_standing) {
                let position = dwarf.position().step_toward(next_standing);
                next_dwarves.push(dwarf.advanced(position, None, Some(next_standing)));
            } else if dwarf.position().is_adjacent(next_mining) {
                next_dwarves.push(dwarf.advanced(dwarf.position(), Some(next_mining), None));
            } else {
                next_dwarves.push(dwarf.advanced(next_standing, Some(next_mining), None));
            }
        }

        Snapshot {
            grid: next_grid,
            dwarves: next_dwarves,
        }
    }

    /// Returns a snapshot with the mined flag at the point inverted. The
    /// dwarves are unaffected. The point must be a valid cell.
    pub fn toggle_mined(&self, point: Point) -> Snapshot {
        Snapshot {
            grid: self.grid.toggle_mined(point),
            dwarves: self.dwarves.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_creating_the_initial_snapshot_one_dwarf_is_assigned_its_neighbor() {
        let snapshot = Snapshot::initial(10);

        assert_eq!(snapshot.grid.size(), 10);
        assert_eq!(snapshot.grid.mined_count(), 1);
        assert!(snapshot.grid.is_mined(Point::new(0, 0)));

        assert_eq!(snapshot.dwarves.len(), 1);
        assert_eq!(snapshot.dwarves[0].position(), Point::new(0, 0));
        assert_eq!(snapshot.dwarves[0].mining, Some(Point::new(0, 1)));
        assert_eq!(snapshot.dwarves[0].moving, None);
    }

    #[test]
    fn when_parsing_a_map_cells_and_dwarves_are_placed_in_scan_order() {
        let map = "\
            size 3
            m #d#
            m d.#
            m ###";
        let snapshot = Snapshot::parse(map);

        assert_eq!(snapshot.grid.size(), 3);
        assert_eq!(snapshot.grid.mined_count(), 8);
        assert!(!snapshot.grid.is_mined(Point::new(1, 1)));

        assert_eq!(snapshot.dwarves.len(), 2);
        assert_eq!(snapshot.dwarves[0].position(), Point::new(1, 0));
        assert_eq!(snapshot.dwarves[1].position(), Point::new(0, 1));
    }

    #[test]
    fn when_ticking_each_mining_target_becomes_mined() {
        let snapshot = Snapshot::initial(3);
        let next = snapshot.step();

        assert!(next.grid.is_mined(Point::new(0, 1)));
        assert_eq!(next.grid.mined_count(), 2);
    }

    #[test]
    fn when_ticking_the_input_snapshot_is_left_untouched() {
        let snapshot = Snapshot::initial(3);
        let _ = snapshot.step();

        assert_eq!(snapshot.grid.mined_count(), 1);
        assert_eq!(snapshot.dwarves[0].mining, Some(Point::new(0, 1)));
    }

    #[test]
    fn when_ticking_the_initial_snapshot_the_dwarf_retargets_the_nearest_unmined_cell() {
        let snapshot = Snapshot::initial(3);
        let next = snapshot.step();

        // (0, 0) is already mined and (0, 1) finishes this tick; the ring
        // scan from the dwarf reaches (1, 0) first
        assert_eq!(next.dwarves[0].mining, Some(Point::new(1, 0)));
        assert_eq!(next.dwarves[0].position(), Point::new(0, 0));
        assert_eq!(next.dwarves[0].moving, None);
    }

    #[test]
    fn when_ticking_dwarf_ids_are_stable() {
        let snapshot = Snapshot::initial(3);
        let id = snapshot.dwarves[0].id().to_string();

        let next = snapshot.step();

        assert_eq!(next.dwarves[0].id(), id);
    }

    #[test]
    fn when_a_dwarf_is_relocating_it_steps_once_and_drops_its_mining_target() {
        let map = "\
            size 5
            m d....
            m .....
            m .....
            m .....
            m .....";
        let mut snapshot = Snapshot::parse(map);
        snapshot.dwarves[0].mining = Some(Point::new(0, 1));
        snapshot.dwarves[0].moving = Some(Point::new(4, 4));

        let next = snapshot.step();

        assert_eq!(next.dwarves[0].position(), Point::new(1, 1));
        assert_eq!(next.dwarves[0].moving, Some(Point::new(4, 4)));
        assert_eq!(next.dwarves[0].mining, None);
        // The lingering target still mined out this tick
        assert!(next.grid.is_mined(Point::new(0, 1)));
    }

    #[test]
    fn when_a_relocating_dwarf_reaches_its_destination_it_settles_and_retargets() {
        let map = "\
            size 5
            m #####
            m #####
            m #####
            m ###d.
            m ####.";
        let mut snapshot = Snapshot::parse(map);
        snapshot.dwarves[0].moving = Some(Point::new(4, 4));

        let next = snapshot.step();

        // Adjacent to its destination, the dwarf re-derives its intent: the
        // nearest unmined cell is (4, 3) and it can mine it from where it is
        assert_eq!(next.dwarves[0].position(), Point::new(3, 3));
        assert_eq!(next.dwarves[0].mining, Some(Point::new(4, 3)));
        assert_eq!(next.dwarves[0].moving, None);
    }

    #[test]
    fn when_the_standing_point_is_not_adjacent_the_dwarf_starts_relocating() {
        let map = "\
            size 5
            m d....
            m .....
            m .....
            m .....
            m ....#";
        let snapshot = Snapshot::parse(map);

        let next = snapshot.step();

        // The target is (1, 0) but the only mined cell off both of its axes
        // is (4, 4), so the dwarf records it and starts walking
        assert_eq!(next.dwarves[0].position(), Point::new(1, 1));
        assert_eq!(next.dwarves[0].moving, Some(Point::new(4, 4)));
        assert_eq!(next.dwarves[0].mining, None);
    }

    #[test]
    fn when_adjacent_to_the_standing_point_but_not_the_target_the_dwarf_settles_there() {
        let map = "\
            size 3
            m d#.
            m #..
            m ...";
        let mut snapshot = Snapshot::parse(map);
        snapshot.dwarves[0].mining = Some(Point::new(1, 1));

        let next = snapshot.step();

        // The next target is (2, 0); its standing point (1, 1) only finishes
        // mining this tick, and the dwarf settles on it without committing
        assert_eq!(next.dwarves[0].position(), Point::new(1, 1));
        assert_eq!(next.dwarves[0].mining, Some(Point::new(2, 0)));
        assert_eq!(next.dwarves[0].moving, None);
    }

    #[test]
    fn when_two_dwarves_prefer_the_same_cell_the_second_is_redirected() {
        let map = "\
            size 3
            m #d#
            m d.#
            m ###";
        let snapshot = Snapshot::parse(map);

        let next = snapshot.step();

        // Both searches would reach (1, 1) first; the first dwarf in
        // collection order claims it and the second must look elsewhere
        assert_eq!(next.dwarves[0].mining, Some(Point::new(1, 1)));
        assert_ne!(next.dwarves[1].mining, next.dwarves[0].mining);
    }

    #[test]
    fn when_ticking_repeatedly_the_grid_is_eventually_fully_mined() {
        let mut snapshot = Snapshot::initial(3);
        let mut mined = snapshot.grid.mined_count();

        for _ in 0..20 {
            snapshot = snapshot.step();
            let next_mined = snapshot.grid.mined_count();
            assert!(next_mined >= mined);
            mined = next_mined;

            if snapshot.grid.is_fully_mined() {
                break;
            }
        }

        assert!(snapshot.grid.is_fully_mined());
    }

    #[test]
    fn when_the_grid_is_fully_mined_ticking_leaves_it_fully_mined() {
        let map = "\
            size 2
            m d#
            m ##";
        let snapshot = Snapshot::parse(map);

        let next = snapshot.step();

        assert!(next.grid.is_fully_mined());
        assert_eq!(next.dwarves[0].position(), Point::new(0, 0));
    }

    #[test]
    fn when_toggling_a_cell_the_dwarves_are_unchanged() {
        let snapshot = Snapshot::initial(3);
        let toggled = snapshot.toggle_mined(Point::new(2, 2));

        assert!(toggled.grid.is_mined(Point::new(2, 2)));
        assert_eq!(toggled.dwarves.len(), 1);
        assert_eq!(toggled.dwarves[0].position(), Point::new(0, 0));
        assert_eq!(toggled.dwarves[0].mining, Some(Point::new(0, 1)));

        let restored = toggled.toggle_mined(Point::new(2, 2));
        assert_eq!(restored.grid, snapshot.grid);
    }
}
