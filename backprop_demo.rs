// backprop_demo.rs
// Trains one topology on its fixed demo sample and reports output, target and
// loss after every epoch.
//
// Usage:
//   backprop_demo [mlp|cnn|rnn|attention] [config.json]
//
// The topology argument overrides the config's "model" field. Set RUST_LOG=debug
// for more detail.

use backprop_lab::config::{load_config, TrainingConfig};
use backprop_lab::models::{sample_for, Model, ModelKind, Trainable};
use log::{debug, error, info};
use std::env;
use std::error::Error;
use std::process;

// Outcome of one epoch (one train step followed by a fresh prediction).
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    pub epoch: usize,
    pub output: Vec<f64>,
    pub target: Vec<f64>,
    pub loss: f64,
}

// Resolve the topology and configuration from command-line arguments.
fn parse_args(args: &[String]) -> Result<(ModelKind, TrainingConfig), Box<dyn Error>> {
    let config = match args.get(2) {
        Some(path) => load_config(path)?,
        None => TrainingConfig::default(),
    };
    let kind = match args.get(1) {
        Some(name) => name.parse::<ModelKind>()?,
        None => config.model,
    };
    Ok((kind, config))
}

// Epoch loop: train on the sample, then predict and score it.
fn run_demo(kind: ModelKind, config: &TrainingConfig) -> backprop_lab::Result<Vec<EpochReport>> {
    let mut model = Model::build(kind, config)?;
    let sample = sample_for(kind)?;
    let learning_rate = config.learning_rate_for(kind);
    info!(
        "Training {} ({} inputs, {} parameters) for {} epochs, learning rate {}",
        model.kind(),
        model.input_size(),
        model.parameter_count(),
        config.epochs,
        learning_rate
    );

    let mut reports = Vec::with_capacity(config.epochs);
    for epoch in 1..=config.epochs {
        model.train(&sample.input, &sample.target, learning_rate)?;
        let output = model.predict(&sample.input)?;
        let loss = model.loss(&output, &sample.target)?;
        debug!("epoch {} done, loss {:.6}", epoch, loss);
        reports.push(EpochReport {
            epoch,
            output,
            target: sample.target.clone(),
            loss,
        });
    }
    Ok(reports)
}

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.4}", v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let (kind, config) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("{}", err);
            let program = args.first().map(String::as_str).unwrap_or("backprop_demo");
            eprintln!("Usage: {} [mlp|cnn|rnn|attention] [config.json]", program);
            process::exit(1);
        }
    };
    debug!("Configuration: {:?}", config);

    match run_demo(kind, &config) {
        Ok(reports) => {
            for report in &reports {
                println!(
                    "Epoch {:>3}: output [{}] target [{}] loss {:.6}",
                    report.epoch,
                    format_values(&report.output),
                    format_values(&report.target),
                    report.loss
                );
            }
        }
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}
