use anyhow::Context;
use bridge::server::{bind_address, serve, SharedDetector};
use clap::Parser;
use generator::profile::{build_trace, TraceKind};
use generator::trace_file::{load_trace, save_trace};
use log::info;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::WorkflowConfig;
use workflow::report::append_report;
use workflow::runner::Runner;

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Replay driver for the DeskBreak step detector")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Replay a JSON trace instead of generating one
    #[arg(long)]
    trace: Option<PathBuf>,
    /// Write the replayed trace as JSON
    #[arg(long)]
    save_trace: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = TraceKind::Accelerometer)]
    kind: TraceKind,
    #[arg(long, default_value_t = 100)]
    steps: usize,
    #[arg(long, default_value_t = 1.8)]
    cadence_hz: f64,
    #[arg(long, default_value_t = 50.0)]
    sample_rate_hz: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Append a JSON summary line to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep a detector alive behind the HTTP control bridge
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = 9000)]
    port: u16,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            args.kind,
            args.steps,
            args.cadence_hz,
            args.sample_rate_hz,
            args.seed,
        )
    };
    let runner = Runner::new(workflow_config);

    if args.serve {
        let detector: SharedDetector = Arc::new(Mutex::new(runner.build_detector()?));
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating runtime for control bridge")?;
        println!(
            "Control bridge on http://{} (Ctrl+C to stop)",
            bind_address(args.port)
        );
        return runtime.block_on(serve(detector, bind_address(args.port)));
    }

    let (trace, runner) = if let Some(path) = &args.trace {
        let trace = load_trace(path)?;
        let mut config = runner.config().clone();
        if args.workflow.is_some() {
            info!("keeping sensors from the workflow config for the recorded trace");
        } else if let Some(kind) = config.adopt_trace_sensors(&trace) {
            info!("advertising sensors for a recorded {:?} trace", kind);
        }
        (trace, Runner::new(config))
    } else {
        (build_trace(&runner.config().generator)?, runner)
    };
    info!("replaying {} samples", trace.len());

    if let Some(path) = &args.save_trace {
        save_trace(path, &trace)?;
    }

    let result = runner.execute(&trace)?;
    println!(
        "Replay -> mode {}, samples {}, steps {}, distance {:.1} m, rejected {}",
        result.mode,
        result.samples,
        result.step_count,
        result.session.distance_m,
        result.metrics.rejected
    );

    if let Some(path) = &args.report {
        append_report(path, &result)?;
    }

    Ok(())
}
