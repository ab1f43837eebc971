use std::collections::HashMap;

use crate::machine::{Fault, Machine, Status};

/// What the cabinet draws at a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Block,
    Paddle,
    Ball,
}

impl Tile {
    fn from_value(value: i64) -> Tile {
        match value {
            1 => Tile::Wall,
            2 => Tile::Block,
            3 => Tile::Paddle,
            4 => Tile::Ball,
            _ => Tile::Empty,
        }
    }
}

/// Run the cabinet's draw pass to completion and count block tiles on
/// the final screen. Frames are (x, y, tile) triples; later frames for
/// a position overwrite earlier ones.
pub fn count_blocks(program: &[i64]) -> Result<usize, Fault> {
    let mut cabinet = Machine::new(program);
    cabinet.run()?;

    let mut screen: HashMap<(i64, i64), Tile> = HashMap::new();
    for frame in cabinet.drain_outputs().chunks(3) {
        if let [x, y, value] = *frame {
            // (-1, 0) frames carry the score, not a tile.
            if (x, y) != (-1, 0) {
                screen.insert((x, y), Tile::from_value(value));
            }
        }
    }
    Ok(screen.values().filter(|&&tile| tile == Tile::Block).count())
}

/// Insert two quarters (address 0 set to 2) and play until the cabinet
/// halts, steering the paddle under the ball whenever the joystick is
/// polled. Returns the final score.
pub fn play(program: &[i64]) -> Result<i64, Fault> {
    let mut cabinet = Machine::new(program);
    cabinet.memory_mut().write(0, 2);

    let mut score = 0;
    let mut ball_x = 0;
    let mut paddle_x = 0;
    loop {
        cabinet.run_until_output(3)?;

        if cabinet.pending_output() >= 3 {
            let x = cabinet.pop_output().unwrap_or_default();
            let y = cabinet.pop_output().unwrap_or_default();
            let value = cabinet.pop_output().unwrap_or_default();
            if (x, y) == (-1, 0) {
                score = value;
            } else {
                match Tile::from_value(value) {
                    Tile::Ball => ball_x = x,
                    Tile::Paddle => paddle_x = x,
                    _ => {}
                }
            }
            continue;
        }

        match cabinet.status() {
            // Joystick poll: push the paddle towards the ball.
            Status::Blocked => cabinet.push_input((ball_x - paddle_x).signum()),
            _ => break,
        }
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_blocks() {
        // Draws two blocks, a wall, and a score frame, then overdraws
        // one block with empty.
        let program = [
            104, 1, 104, 2, 104, 2, // block at (1, 2)
            104, 3, 104, 2, 104, 2, // block at (3, 2)
            104, 0, 104, 0, 104, 1, // wall at (0, 0)
            104, -1, 104, 0, 104, 45, // score frame, not a tile
            104, 3, 104, 2, 104, 0, // (3, 2) cleared
            99,
        ];
        assert_eq!(count_blocks(&program).unwrap(), 1);
    }

    #[test]
    fn test_count_blocks_empty_screen() {
        assert_eq!(count_blocks(&[99]).unwrap(), 0);
    }

    #[test]
    fn test_play_steers_towards_ball() {
        // A cabinet that draws the paddle at x=5 and the ball at x=6,
        // polls the joystick once, and reports 100 plus the joystick
        // deflection as its score. The ball sits right of the paddle,
        // so the deflection must be +1 and the score 101.
        //
        // The listing opens with a multiply into scratch space so that
        // the quarter patch (address 0 set to 2) leaves its meaning
        // unchanged.
        let program = [
            2, 0, 0, 63, // mem[63] = mem[0] * mem[0], scratch
            104, 5, 104, 20, 104, 3, // paddle at (5, 20)
            104, 6, 104, 18, 104, 4, // ball at (6, 18)
            3, 50, // joystick poll
            104, -1, 104, 0, // score frame follows
            1001, 50, 100, 51, // mem[51] = joystick + 100
            4, 51, 99,
        ];
        assert_eq!(play(&program).unwrap(), 101);
    }

    #[test]
    fn test_play_final_score_wins() {
        let program = [
            2, 0, 0, 63, //
            104, -1, 104, 0, 104, 10, // score 10
            104, -1, 104, 0, 104, 2220, // final score 2220
            99,
        ];
        assert_eq!(play(&program).unwrap(), 2220);
    }
}
