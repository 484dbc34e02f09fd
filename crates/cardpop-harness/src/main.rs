#![forbid(unsafe_code)]

//! CardPop harness.
//!
//! Replays the sample app on a simulated phone and prints a summary.
//!
//! # Running
//!
//! ```sh
//! cargo run -p cardpop-harness
//! cargo run -p cardpop-harness -- --json --trace trace.jsonl
//! ```
//!
//! # Environment
//!
//! - `CARDPOP_LOG`: log filter (default `info`)
//! - `CARDPOP_LOG_JSON=1`: JSON log lines (same as `--json`)
//! - `CARDPOP_CONFIG`: popover configuration file (same as `--config <path>`)
//! - `CARDPOP_TRACE`: write the event trace as JSONL; `-` for stdout (same
//!   as `--trace <path>`)
//! - `CARDPOP_TRACE_FRAMES=0`: leave per-tick frames out of the trace

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use cardpop::config::load_config_or_default;
use cardpop_harness::{TraceRecorder, example_config, replay_example};
use web_time::Instant;

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Command-line and environment options.
struct Options {
    log_filter: String,
    json_logs: bool,
    config: Option<PathBuf>,
    trace: Option<String>,
    trace_frames: bool,
}

impl Options {
    fn from_env() -> Self {
        let mut options = Self {
            log_filter: std::env::var("CARDPOP_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: env_flag("CARDPOP_LOG_JSON").unwrap_or(false),
            config: std::env::var_os("CARDPOP_CONFIG").map(PathBuf::from),
            trace: std::env::var("CARDPOP_TRACE").ok(),
            trace_frames: env_flag("CARDPOP_TRACE_FRAMES").unwrap_or(true),
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => options.json_logs = true,
                "--config" => options.config = args.next().map(PathBuf::from),
                "--trace" => options.trace = args.next(),
                "--no-frames" => options.trace_frames = false,
                other => eprintln!("ignoring unknown argument: {other}"),
            }
        }
        options
    }
}

fn main() -> cardpop::Result<()> {
    let options = Options::from_env();
    cardpop_core::logging::init_subscriber(&options.log_filter, options.json_logs);

    let config = match &options.config {
        Some(path) => {
            let (config, fallback) = load_config_or_default(path)?;
            if let Some(err) = fallback {
                tracing::warn!(error = %err, "using the sample app's defaults");
                example_config()
            } else {
                config
            }
        }
        None => example_config(),
    };

    let started = Instant::now();
    let (stage, summary) = replay_example(config, TraceRecorder::new(options.trace_frames))?;
    let wall = started.elapsed();

    // The trace owns stdout when written there.
    if options.trace.as_deref() != Some("-") {
        println!("ticks            {}", summary.ticks);
        println!("stage time       {:.3}s", summary.elapsed.as_secs_f64());
        println!("wall time        {:.3}ms", wall.as_secs_f64() * 1000.0);
        println!("presented frame  {:?}", summary.presented_frame);
        println!("frame with strip {:?}", summary.frame_with_strip);
        println!("blur after flip  {}", summary.blur_after_toggle);
        println!("dismissed toward {:?}", summary.dismissed_toward);
        println!("final phase      {:?}", summary.final_phase);
        println!("trace events     {}", stage.trace().len());
    }

    match options.trace.as_deref() {
        Some("-") => stage.trace().write_jsonl(io::stdout().lock())?,
        Some(path) => stage.trace().write_jsonl(BufWriter::new(File::create(path)?))?,
        None => {}
    }
    Ok(())
}
