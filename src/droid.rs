use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::machine::{Fault, Machine};

/// Movement commands understood by the repair droid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    fn command(self) -> i64 {
        match self {
            Direction::North => 1,
            Direction::South => 2,
            Direction::West => 3,
            Direction::East => 4,
        }
    }

    fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }
}

/// Status reply to a movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The droid hit a wall and did not move.
    Wall,
    /// The droid moved one cell.
    Moved,
    /// The droid moved one cell and is on the oxygen system.
    Oxygen,
}

/// What the survey learned about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
    Oxygen,
}

#[derive(Debug, Error)]
pub enum DroidError {
    #[error(transparent)]
    Fault(#[from] Fault),
    #[error("remote gave no status reply")]
    NoReply,
    #[error("unknown status reply {0}")]
    UnknownReply(i64),
}

/// The droid's remote-control link: one movement command in, one status
/// reply out. The live implementation is a machine; tests drive the
/// same exploration against a scripted maze.
pub trait Remote {
    fn probe(&mut self, dir: Direction) -> Result<Reply, DroidError>;
}

impl Remote for Machine {
    fn probe(&mut self, dir: Direction) -> Result<Reply, DroidError> {
        self.push_input(dir.command());
        self.run_until_output(1)?;
        match self.pop_output() {
            Some(0) => Ok(Reply::Wall),
            Some(1) => Ok(Reply::Moved),
            Some(2) => Ok(Reply::Oxygen),
            Some(other) => Err(DroidError::UnknownReply(other)),
            None => Err(DroidError::NoReply),
        }
    }
}

/// The fully explored section map.
pub struct Survey {
    pub cells: HashMap<(i64, i64), Cell>,
    pub oxygen: Option<(i64, i64)>,
}

impl Survey {
    /// Fewest movement commands from the droid's start to the oxygen
    /// system, or None if the survey never found it.
    pub fn shortest_path_to_oxygen(&self) -> Option<usize> {
        let oxygen = self.oxygen?;
        self.distances_from((0, 0)).get(&oxygen).copied()
    }

    /// Minutes for oxygen to reach every open cell: the greatest
    /// distance from the oxygen system over the walkable area.
    pub fn fill_time(&self) -> Option<usize> {
        let oxygen = self.oxygen?;
        self.distances_from(oxygen).values().max().copied()
    }

    /// Breadth-first distances over walkable cells.
    fn distances_from(&self, start: (i64, i64)) -> HashMap<(i64, i64), usize> {
        let mut dist = HashMap::from([(start, 0)]);
        let mut frontier = VecDeque::from([start]);
        while let Some(pos) = frontier.pop_front() {
            let here = dist[&pos];
            for dir in Direction::ALL {
                let (dx, dy) = dir.offset();
                let next = (pos.0 + dx, pos.1 + dy);
                if matches!(self.cells.get(&next), Some(Cell::Open) | Some(Cell::Oxygen))
                    && !dist.contains_key(&next)
                {
                    dist.insert(next, here + 1);
                    frontier.push_back(next);
                }
            }
        }
        dist
    }
}

/// Map every cell reachable from the droid's starting position.
///
/// Depth-first walk with explicit backtracking: probe the first
/// unmapped neighbour; when none remains, retrace the last move. The
/// remote program never halts, so exploration ends when the trail is
/// exhausted with nothing left to probe.
pub fn explore<R: Remote>(remote: &mut R) -> Result<Survey, DroidError> {
    let mut cells = HashMap::from([((0, 0), Cell::Open)]);
    let mut oxygen = None;
    let mut pos = (0i64, 0i64);
    let mut trail: Vec<Direction> = Vec::new();

    loop {
        let unmapped = Direction::ALL.into_iter().find(|dir| {
            let (dx, dy) = dir.offset();
            !cells.contains_key(&(pos.0 + dx, pos.1 + dy))
        });

        match unmapped {
            Some(dir) => {
                let (dx, dy) = dir.offset();
                let next = (pos.0 + dx, pos.1 + dy);
                match remote.probe(dir)? {
                    Reply::Wall => {
                        cells.insert(next, Cell::Wall);
                    }
                    Reply::Moved => {
                        cells.insert(next, Cell::Open);
                        pos = next;
                        trail.push(dir);
                    }
                    Reply::Oxygen => {
                        cells.insert(next, Cell::Oxygen);
                        oxygen = Some(next);
                        pos = next;
                        trail.push(dir);
                    }
                }
            }
            None => match trail.pop() {
                Some(dir) => {
                    let back = dir.reverse();
                    // Retracing a recorded move cannot hit a wall.
                    remote.probe(back)?;
                    let (dx, dy) = back.offset();
                    pos = (pos.0 + dx, pos.1 + dy);
                }
                None => break,
            },
        }
    }
    Ok(Survey { cells, oxygen })
}
