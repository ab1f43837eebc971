use rayon::prelude::*;

use crate::machine::{Fault, Machine, Status};

/// Drive a chain of amplifiers sharing one controller program.
///
/// Each amplifier receives its phase setting as its first input, then
/// the signal produced by the previous stage; the first stage is seeded
/// with 0. In serial mode the signal makes one pass down the chain. In
/// feedback mode the last stage's output loops back to the first, and
/// the chain runs round-robin until the controllers halt.
pub fn chain_signal(program: &[i64], phases: &[i64], feedback: bool) -> Result<i64, Fault> {
    let mut amps: Vec<Machine> = phases
        .iter()
        .map(|&phase| {
            let mut amp = Machine::new(program);
            amp.push_input(phase);
            amp
        })
        .collect();

    let mut signal = 0;
    loop {
        for amp in amps.iter_mut() {
            amp.push_input(signal);
            amp.run_until_output(1)?;
            // A controller that halted without producing an output
            // passes the signal through unchanged.
            if let Some(out) = amp.pop_output() {
                signal = out;
            }
        }
        let finished = !feedback || amps.last().is_none_or(|amp| amp.status() == Status::Halted);
        if finished {
            return Ok(signal);
        }
    }
}

/// The best final signal over every ordering of `phases`. Orderings are
/// evaluated in parallel; each gets its own pristine chain.
pub fn max_signal(program: &[i64], phases: &[i64], feedback: bool) -> Result<i64, Fault> {
    permutations(phases)
        .into_par_iter()
        .map(|perm| chain_signal(program, &perm, feedback))
        .try_reduce(|| i64::MIN, |a, b| Ok(a.max(b)))
}

/// All orderings of `items`, by Heap's algorithm.
fn permutations(items: &[i64]) -> Vec<Vec<i64>> {
    let mut scratch = items.to_vec();
    let mut out = Vec::new();
    generate(&mut scratch, items.len(), &mut out);
    out
}

fn generate(items: &mut [i64], k: usize, out: &mut Vec<Vec<i64>>) {
    if k <= 1 {
        out.push(items.to_vec());
        return;
    }
    for i in 0..k {
        generate(items, k - 1, out);
        if k % 2 == 0 {
            items.swap(i, k - 1);
        } else {
            items.swap(0, k - 1);
        }
    }
}
