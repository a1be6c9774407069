//! 1-D conservative tracer benchmark
//!
//! Runs the five Amanzi variants in the current directory, reads them
//! together with the PFloTran and CrunchFlow reference solutions, and writes
//! `tracer_1d.png`.
//!
//! Log verbosity follows `RUST_LOG` (default: `info`).

use rtbench::benchmark::{run_benchmark, BenchmarkConfig, ProcessRunner, SourceOutcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("═══════════════════════════════════════════════════════");
    println!("  Amanzi 1D Tracer Benchmark");
    println!("═══════════════════════════════════════════════════════\n");

    let config = BenchmarkConfig::tracer_1d();
    let report = run_benchmark(&config, &ProcessRunner::default())?;

    println!("Sources:");
    for source in &report.sources {
        match &source.outcome {
            SourceOutcome::Available(series) => {
                println!("  {:<24}: {} samples", source.label, series.len());
            }
            SourceOutcome::Unavailable(cause) => {
                println!("  {:<24}: unavailable ({})", source.label, cause);
            }
        }
    }

    println!("\n{}", report.image.display());
    Ok(())
}
