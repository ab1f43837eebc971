use std::collections::HashMap;

use crate::machine::{Fault, Machine};

/// Color of a hull panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Black,
    White,
}

impl Paint {
    fn camera_value(self) -> i64 {
        match self {
            Paint::Black => 0,
            Paint::White => 1,
        }
    }

    fn from_brush(value: i64) -> Paint {
        if value == 0 { Paint::Black } else { Paint::White }
    }
}

/// The panels a painting run touched, keyed by grid position. Positions
/// grow rightwards in x and downwards in y.
pub struct Hull {
    pub panels: HashMap<(i64, i64), Paint>,
}

impl Hull {
    /// Number of panels painted at least once.
    pub fn painted(&self) -> usize {
        self.panels.len()
    }

    /// Render the painted region, `#` for white and space for black.
    pub fn render(&self) -> String {
        if self.panels.is_empty() {
            return String::new();
        }
        let xs = self.panels.keys().map(|&(x, _)| x);
        let ys = self.panels.keys().map(|&(_, y)| y);
        let (min_x, max_x) = (xs.clone().min().unwrap_or(0), xs.max().unwrap_or(0));
        let (min_y, max_y) = (ys.clone().min().unwrap_or(0), ys.max().unwrap_or(0));

        let mut out = String::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                match self.panels.get(&(x, y)) {
                    Some(Paint::White) => out.push('#'),
                    _ => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Walk the painting robot over the hull until its controller halts.
///
/// Each step pushes the color under the robot, runs for a color/turn
/// output pair, paints, turns (0 left, 1 right) and moves one panel
/// forward. Panels never painted read as `start`; running with a white
/// start panel produces the registration identifier.
pub fn paint(program: &[i64], start: Paint) -> Result<Hull, Fault> {
    let mut robot = Machine::new(program);
    let mut panels: HashMap<(i64, i64), Paint> = HashMap::new();
    let (mut x, mut y) = (0i64, 0i64);
    // Facing up; y decreases upwards.
    let (mut dx, mut dy) = (0i64, -1i64);

    loop {
        let under = panels.get(&(x, y)).copied().unwrap_or(start);
        robot.push_input(under.camera_value());
        robot.run_until_output(2)?;

        let brush = match robot.pop_output() {
            Some(value) => value,
            None => break,
        };
        let turn = match robot.pop_output() {
            Some(value) => value,
            None => break,
        };

        panels.insert((x, y), Paint::from_brush(brush));
        if turn == 0 {
            // Left: (dx, dy) -> (dy, -dx)
            (dx, dy) = (dy, -dx);
        } else {
            // Right: (dx, dy) -> (-dy, dx)
            (dx, dy) = (-dy, dx);
        }
        x += dx;
        y += dy;
    }
    Ok(Hull { panels })
}
