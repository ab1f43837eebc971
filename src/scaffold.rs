use thiserror::Error;

use crate::machine::{Fault, Machine};

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error(transparent)]
    Fault(#[from] Fault),
    #[error("robot produced no dust report")]
    NoReport,
}

/// One camera frame of the scaffolding, row-major. `#` is scaffold,
/// `.` open space; `^ v < >` mark the vacuum robot on a scaffold cell.
pub struct View {
    rows: Vec<Vec<char>>,
}

impl View {
    fn parse(ascii: &str) -> View {
        View {
            rows: ascii
                .lines()
                .filter(|line| !line.is_empty())
                .map(|line| line.chars().collect())
                .collect(),
        }
    }

    fn is_scaffold(&self, x: usize, y: usize) -> bool {
        matches!(
            self.rows.get(y).and_then(|row| row.get(x)),
            Some('#' | '^' | 'v' | '<' | '>')
        )
    }

    /// Sum of x*y over cells that are scaffold together with all four
    /// neighbours, the calibration parameter for the camera.
    pub fn alignment_sum(&self) -> usize {
        let mut sum = 0;
        for y in 1..self.rows.len().saturating_sub(1) {
            for x in 1..self.rows[y].len().saturating_sub(1) {
                if self.is_scaffold(x, y)
                    && self.is_scaffold(x, y - 1)
                    && self.is_scaffold(x, y + 1)
                    && self.is_scaffold(x - 1, y)
                    && self.is_scaffold(x + 1, y)
                {
                    sum += x * y;
                }
            }
        }
        sum
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

/// Run the camera pass to completion and decode the ASCII frame it
/// emits.
pub fn capture(program: &[i64]) -> Result<View, Fault> {
    let mut camera = Machine::new(program);
    camera.run()?;
    Ok(View::parse(&camera.drain_ascii()))
}

/// Wake the vacuum robot (address 0 set to 2) and feed it a movement
/// routine: the main routine line, the three function definition lines,
/// and whether to stream the video feed. Each line is sent as ASCII
/// with a trailing newline. Returns the dust report, the single
/// out-of-ASCII-range value the robot emits after completing its run.
pub fn run_routine(
    program: &[i64],
    main_routine: &str,
    functions: [&str; 3],
    video: bool,
) -> Result<i64, ScaffoldError> {
    let mut robot = Machine::new(program);
    robot.memory_mut().write(0, 2);

    robot.push_ascii(main_routine);
    robot.push_input(10);
    for function in functions {
        robot.push_ascii(function);
        robot.push_input(10);
    }
    robot.push_ascii(if video { "y" } else { "n" });
    robot.push_input(10);

    robot.run()?;
    robot
        .drain_outputs()
        .into_iter()
        .rev()
        .find(|&value| value > 127)
        .ok_or(ScaffoldError::NoReport)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a camera program that prints `ascii` verbatim and halts.
    fn camera_program(ascii: &str) -> Vec<i64> {
        let mut program = Vec::new();
        for byte in ascii.bytes() {
            program.extend_from_slice(&[104, i64::from(byte)]);
        }
        program.push(99);
        program
    }

    const FRAME: &str = "..#..........\n\
                         ..#..........\n\
                         #######...###\n\
                         #.#...#...#.#\n\
                         #############\n\
                         ..#...#...#..\n\
                         ..#####...^..\n";

    #[test]
    fn test_alignment_sum() {
        // Four intersections: (2,2), (6,4), (2,4), (10,4).
        let view = capture(&camera_program(FRAME)).unwrap();
        assert_eq!(view.alignment_sum(), 76);
    }

    #[test]
    fn test_capture_round_trips_frame() {
        let view = capture(&camera_program(FRAME)).unwrap();
        assert_eq!(view.render(), FRAME);
    }

    #[test]
    fn test_alignment_sum_no_intersections() {
        let view = capture(&camera_program("###\n...\n")).unwrap();
        assert_eq!(view.alignment_sum(), 0);
    }

    #[test]
    fn test_run_routine_reports_dust() {
        // A robot that prints a prompt, ignores its routine, and emits
        // the dust count. The leading multiply keeps the listing valid
        // after the wake-up patch rewrites address 0 to 2.
        let mut program = vec![2, 0, 0, 63];
        for byte in "Main:\n".bytes() {
            program.extend_from_slice(&[104, i64::from(byte)]);
        }
        program.extend_from_slice(&[104, 133777, 99]);

        let dust = run_routine(&program, "A,B,C", ["L,4", "R,8", "L,12"], false).unwrap();
        assert_eq!(dust, 133777);
    }

    #[test]
    fn test_run_routine_without_report() {
        let program = [2, 0, 0, 63, 104, 104, 99];
        assert!(matches!(
            run_routine(&program, "A", ["L", "R", "L"], false),
            Err(ScaffoldError::NoReport)
        ));
    }
}
