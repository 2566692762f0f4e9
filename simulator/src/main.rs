use anyhow::Context;
use clap::Parser;
use results_bridge::bridge::ResultsBridge;
use results_bridge::model::VisualizationModel;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod results_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the subspace DOA engine")]
struct Args {
    /// Run one estimation pass and print the per-algorithm summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load estimation parameters from a YAML workflow file
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Sweep one parameter: snr | snapshots | arrayElements | sourceSpacing
    #[arg(long)]
    sweep: Option<String>,
    /// Override the preset sweep values
    #[arg(long, value_delimiter = ',')]
    values: Vec<f64>,
    #[arg(long, default_value_t = 200)]
    snapshots: usize,
    #[arg(long, default_value_t = 10)]
    elements: usize,
    #[arg(long, default_value_t = 10.0)]
    snr: f64,
    /// True source bearings in degrees
    #[arg(long, value_delimiter = ',', default_values_t = vec![20.0, 40.0, 60.0])]
    angles: Vec<f64>,
    /// Inter-element spacing in wavelengths
    #[arg(long, default_value_t = 0.5)]
    spacing: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Trials averaged per swept value
    #[arg(long, default_value_t = 5)]
    trials: usize,
    /// Keep the results bridge alive for incoming estimation jobs
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            args.snapshots,
            args.elements,
            args.snr,
            args.angles.clone(),
            args.spacing,
            args.seed,
        )
    };

    let runner = Arc::new(Runner::new(config, args.trials));
    let bridge = ResultsBridge::new(runner.clone());

    if args.offline {
        let outcome = runner.execute()?;

        for result in &outcome.results {
            let angles: Vec<String> = result
                .estimated_angles
                .iter()
                .map(|angle| format!("{:.2}", angle))
                .collect();
            println!(
                "{:>10}: [{}] rmse {:.3} ({:.2} ms){}",
                result.algorithm.name(),
                angles.join(", "),
                result.rmse,
                result.execution_time_ms,
                if result.shortfall { " [shortfall]" } else { "" }
            );
        }

        let model = VisualizationModel {
            results: outcome.results.clone(),
            comparison: Vec::new(),
            notes: outcome.notes.clone(),
        };
        bridge.publish(&model)?;
        bridge.publish_status("Offline estimation results ready.");
    }

    if let Some(parameter) = &args.sweep {
        let values = if args.values.is_empty() {
            preset_values(parameter)?
        } else {
            args.values.clone()
        };
        let rows = runner.sweep(parameter, &values)?;

        println!(
            "{:>14} {:>12} {:>12} {:>12}",
            parameter, "MUSIC", "Root-MUSIC", "ESPRIT"
        );
        for row in &rows {
            println!(
                "{:>14.2} {:>12.3} {:>12.3} {:>12.3}",
                row.value, row.music_rmse, row.root_music_rmse, row.esprit_rmse
            );
        }

        let model = VisualizationModel {
            results: Vec::new(),
            comparison: rows.clone(),
            notes: vec![format!("sweep {} over {} values", parameter, rows.len())],
        };
        bridge.publish(&model)?;
        bridge.publish_status("Comparison sweep results ready.");
    }

    if args.serve {
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

/// Preset sweep values per parameter.
fn preset_values(parameter: &str) -> anyhow::Result<Vec<f64>> {
    match parameter {
        "snr" => Ok(vec![0.0, 5.0, 10.0, 15.0, 20.0]),
        "snapshots" => Ok(vec![50.0, 100.0, 200.0, 300.0, 500.0]),
        "arrayElements" => Ok(vec![6.0, 8.0, 10.0, 12.0, 14.0]),
        "sourceSpacing" => Ok(vec![5.0, 10.0, 15.0, 20.0, 25.0]),
        other => anyhow::bail!("no preset values for sweep parameter {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_exist_for_every_sweep_parameter() {
        for parameter in ["snr", "snapshots", "arrayElements", "sourceSpacing"] {
            assert_eq!(preset_values(parameter).unwrap().len(), 5);
        }
        assert!(preset_values("bandwidth").is_err());
    }
}
