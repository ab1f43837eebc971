use std::fs;
use std::path::PathBuf;

use clap::Parser;
use intcode::machine::{Machine, Status};
use intcode::painter::Paint;
use intcode::spring::{Gait, Report};
use intcode::{amplifier, arcade, droid, network, painter, program, scaffold, spring};

#[derive(Parser)]
#[command(name = "intcode", about = "Run a decimal register-machine program under a puzzle driver")]
struct Cli {
    /// Path to the program listing (comma-separated integers).
    program: PathBuf,

    /// Which driver to run the program under (run, amplifier, painter,
    /// arcade, droid, scaffold, spring, network).
    #[arg(long, default_value = "run")]
    driver: String,

    /// Values queued as input before running (run driver).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    input: Vec<i64>,

    /// Amplifier: use the feedback phase set (5..9) and loop topology.
    #[arg(long)]
    feedback: bool,

    /// Painter: start the robot on a white panel and show the hull.
    #[arg(long)]
    start_white: bool,

    /// Arcade: insert quarters and play to completion instead of
    /// counting blocks.
    #[arg(long)]
    play: bool,

    /// Scaffold: file with the movement routine, one line each for the
    /// main routine and the A, B, C functions.
    #[arg(long)]
    routine: Option<PathBuf>,

    /// Scaffold: stream the video feed while running the routine.
    #[arg(long)]
    video: bool,

    /// Spring: file with the springscript instruction lines.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Spring: end the script with RUN instead of WALK.
    #[arg(long)]
    run_gait: bool,

    /// Network: number of machines in the bank.
    #[arg(long, default_value_t = 50)]
    nodes: usize,

    /// Network: monitor the NAT for the first repeated resume value.
    #[arg(long)]
    nat: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&cli.program)?;
    let image = program::parse(&text)?;

    match cli.driver.as_str() {
        "run" => {
            let mut machine = Machine::new(&image);
            for &value in &cli.input {
                machine.push_input(value);
            }
            let status = machine.run()?;
            for value in machine.drain_outputs() {
                println!("{value}");
            }
            if status == Status::Blocked {
                eprintln!("machine is waiting for more input");
            }
        }
        "amplifier" => {
            let phases: Vec<i64> = if cli.feedback { (5..=9).collect() } else { (0..=4).collect() };
            let signal = amplifier::max_signal(&image, &phases, cli.feedback)?;
            println!("{signal}");
        }
        "painter" => {
            let start = if cli.start_white { Paint::White } else { Paint::Black };
            let hull = painter::paint(&image, start)?;
            println!("{}", hull.painted());
            if cli.start_white {
                print!("{}", hull.render());
            }
        }
        "arcade" => {
            if cli.play {
                println!("{}", arcade::play(&image)?);
            } else {
                println!("{}", arcade::count_blocks(&image)?);
            }
        }
        "droid" => {
            let mut remote = Machine::new(&image);
            let survey = droid::explore(&mut remote)?;
            match survey.shortest_path_to_oxygen() {
                Some(steps) => println!("{steps}"),
                None => eprintln!("no oxygen system found"),
            }
            if let Some(minutes) = survey.fill_time() {
                println!("{minutes}");
            }
        }
        "scaffold" => match &cli.routine {
            Some(path) => {
                let routine = fs::read_to_string(path)?;
                let mut lines = routine.lines();
                let main_routine = lines.next().unwrap_or_default();
                let functions = [
                    lines.next().unwrap_or_default(),
                    lines.next().unwrap_or_default(),
                    lines.next().unwrap_or_default(),
                ];
                let dust = scaffold::run_routine(&image, main_routine, functions, cli.video)?;
                println!("{dust}");
            }
            None => {
                let view = scaffold::capture(&image)?;
                eprint!("{}", view.render());
                println!("{}", view.alignment_sum());
            }
        },
        "spring" => {
            let script = match &cli.script {
                Some(path) => fs::read_to_string(path)?,
                None => String::new(),
            };
            let lines: Vec<&str> = script.lines().collect();
            let gait = if cli.run_gait { Gait::Run } else { Gait::Walk };
            match spring::survey(&image, &lines, gait)? {
                Report::Damage(damage) => println!("{damage}"),
                Report::Replay(replay) => eprint!("{replay}"),
            }
        }
        "network" => {
            if cli.nat {
                println!("{}", network::nat_repeated_y(&image, cli.nodes)?);
            } else {
                let packet = network::first_packet_to(&image, cli.nodes, 255)?;
                println!("{}", packet.y);
            }
        }
        other => {
            eprintln!(
                "Unknown driver: {other}. Available: run, amplifier, painter, arcade, droid, scaffold, spring, network"
            );
            std::process::exit(1);
        }
    }
    Ok(())
}
