use crate::machine::{Fault, Machine};

/// How the droid traverses the hull after its script is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gait {
    Walk,
    Run,
}

impl Gait {
    fn command(self) -> &'static str {
        match self {
            Gait::Walk => "WALK",
            Gait::Run => "RUN",
        }
    }
}

/// Outcome of a springdroid survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The droid crossed the hull; the value is the damage reading.
    Damage(i64),
    /// The droid fell; an ASCII replay of its last moments.
    Replay(String),
}

/// Load a springscript onto the droid and send it across the hull.
///
/// Script lines are fed as ASCII followed by the gait command. If the
/// final output value exceeds the ASCII range it is the damage report;
/// otherwise the whole output stream is a replay of the fall, returned
/// for diagnosis.
pub fn survey(program: &[i64], script: &[&str], gait: Gait) -> Result<Report, Fault> {
    let mut droid = Machine::new(program);
    for line in script {
        droid.push_ascii(line);
        droid.push_input(10);
    }
    droid.push_ascii(gait.command());
    droid.push_input(10);

    droid.run()?;
    let outputs = droid.drain_outputs();
    match outputs.last() {
        Some(&value) if value > 127 => Ok(Report::Damage(value)),
        _ => Ok(Report::Replay(
            outputs
                .into_iter()
                .filter_map(|value| u8::try_from(value).ok())
                .map(char::from)
                .collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_outputs(text: &str) -> Vec<i64> {
        text.bytes().flat_map(|b| [104, i64::from(b)]).collect()
    }

    #[test]
    fn test_survey_reports_damage() {
        let mut program = ascii_outputs("Input instructions:\n");
        program.extend_from_slice(&[104, 19355645, 99]);
        let report = survey(&program, &["NOT A J"], Gait::Walk).unwrap();
        assert_eq!(report, Report::Damage(19355645));
    }

    #[test]
    fn test_survey_returns_replay_on_fall() {
        let mut program = ascii_outputs("\nDidn't make it across:\n..@..\n");
        program.push(99);
        let report = survey(&program, &["NOT D J"], Gait::Run).unwrap();
        match report {
            Report::Replay(text) => assert!(text.contains("..@..")),
            Report::Damage(_) => panic!("expected a replay"),
        }
    }

    #[test]
    fn test_survey_feeds_script_as_ascii() {
        // An echo droid: repeats its input back until the first
        // newline. The replay must be the script line the driver fed,
        // byte for byte.
        let program = [
            3, 50, // read
            4, 50, // echo
            1001, 50, -10, 51, // mem[51] = value - 10
            1005, 51, 0, // loop unless the value was a newline
            99,
        ];
        let report = survey(&program, &["AND A J"], Gait::Walk).unwrap();
        match report {
            Report::Replay(text) => assert_eq!(text, "AND A J\n"),
            Report::Damage(_) => panic!("expected a replay"),
        }
    }
}
