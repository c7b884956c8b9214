mod trace;

use std::{fs, path::PathBuf, process};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use tapclock::gesture::{GestureEngine, GestureOutput, GestureTraceSample};

use trace::{parse_expectations, parse_trace, ExpectedGesture, ReplayStep};

#[derive(Debug, Parser)]
#[command(name = "gesture_replay")]
#[command(about = "Replay a recorded button event trace through the gesture classifier")]
struct Cli {
    /// Trace file, one `ms,phase,source,origin,primary` event per line.
    trace: PathBuf,
    /// Expected `gesture,ms,kind` lines; exits non-zero on mismatch.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// How long to keep the clock running after the last trace line.
    #[arg(long = "tail-ms", default_value_t = 1_500)]
    tail_ms: u64,
    /// Also print the decision trace for every step.
    #[arg(long)]
    verbose: bool,
}

struct Replay {
    engine: GestureEngine,
    gestures: Vec<ExpectedGesture>,
    verbose: bool,
}

impl Replay {
    fn new(verbose: bool) -> Self {
        Self {
            engine: GestureEngine::default(),
            gestures: Vec::new(),
            verbose,
        }
    }

    /// Fires timers at their own deadlines so output timestamps are exact.
    fn run_timers_until(&mut self, t_ms: u64) {
        while let Some(deadline) = self.engine.next_deadline_ms() {
            if deadline > t_ms {
                break;
            }
            let output = self.engine.tick(deadline);
            self.record(output);
        }
    }

    fn step(&mut self, step: ReplayStep) {
        self.run_timers_until(step.t_ms());
        let output = match step {
            ReplayStep::Press(phase, signal) => self.engine.handle(phase, signal),
            ReplayStep::Tick(t_ms) => self.engine.tick(t_ms),
        };
        self.record(output);
    }

    fn record(&mut self, output: GestureOutput) {
        if self.verbose {
            print_trace(&output.trace);
        }
        for gesture in output.gestures.iter() {
            self.gestures.push(ExpectedGesture {
                t_ms: output.trace.now_ms,
                kind: gesture.as_str().to_string(),
            });
        }
    }
}

fn print_trace(trace: &GestureTraceSample) {
    println!(
        "trace,{},{},{},{},{},{}",
        trace.now_ms,
        trace.state_id.as_u8(),
        trace.reject_reason.as_str(),
        trace.pending_taps,
        trace
            .hold_deadline_ms
            .map_or_else(|| "-".to_string(), |t| t.to_string()),
        trace
            .tap_deadline_ms
            .map_or_else(|| "-".to_string(), |t| t.to_string()),
    );
}

fn compare(actual: &[ExpectedGesture], expected: &[ExpectedGesture]) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    for (idx, (a, e)) in actual.iter().zip(expected).enumerate() {
        if a != e {
            bail!(
                "gesture #{idx}: expected {}@{}ms, got {}@{}ms",
                e.kind,
                e.t_ms,
                a.kind,
                a.t_ms
            );
        }
    }
    bail!(
        "expected {} gestures, got {}",
        expected.len(),
        actual.len()
    )
}

fn run(cli: Cli) -> Result<()> {
    let source = fs::read_to_string(&cli.trace)
        .with_context(|| format!("failed to read {}", cli.trace.display()))?;
    let steps = parse_trace(&source)?;
    info!("replay: {} steps from {}", steps.len(), cli.trace.display());

    let mut replay = Replay::new(cli.verbose);
    for step in &steps {
        replay.step(*step);
    }
    let end_ms = steps
        .last()
        .map_or(0, ReplayStep::t_ms)
        .saturating_add(cli.tail_ms);
    replay.run_timers_until(end_ms);

    println!("gesture,ms,kind");
    for gesture in &replay.gestures {
        println!("gesture,{},{}", gesture.t_ms, gesture.kind);
    }

    if let Some(path) = cli.expect {
        let expected = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let expected = parse_expectations(&expected)?;
        compare(&replay.gestures, &expected)?;
        info!("replay: {} gestures match {}", expected.len(), path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
