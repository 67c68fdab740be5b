//! Fuzzy heating controller

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fuzzy_control::{InferenceConfig, MamdaniInference, Rules, Variables, DEFAULT_RESOLUTION, DEFAULT_TOLERANCE};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fuzzy-control")]
#[command(about = "Computes a crisp control action with Mamdani fuzzy inference")]
struct Args {
    /// Input linguistic variables document
    #[arg(long, default_value = "lvinput.json")]
    input: PathBuf,

    /// Output linguistic variables document
    #[arg(long, default_value = "lvoutput.json")]
    output: PathBuf,

    /// Rule base document
    #[arg(long, default_value = "rules.json")]
    rules: PathBuf,

    /// Name of the input variable within the input document
    #[arg(long, default_value = "температура")]
    input_variable: String,

    /// Name of the output variable within the output document
    #[arg(long, default_value = "нагрев")]
    output_variable: String,

    /// Crisp input value
    #[arg(short, long, default_value_t = 19.0, allow_negative_numbers = true)]
    value: f64,

    /// Samples in the output universe
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: usize,

    /// Plateau tolerance for middle of maximum
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let inputs = Variables::load(&args.input)
        .with_context(|| format!("failed to read input variables from {}", args.input.display()))?;
    let outputs = Variables::load(&args.output)
        .with_context(|| format!("failed to read output variables from {}", args.output.display()))?;
    let rules =
        Rules::load(&args.rules).with_context(|| format!("failed to read rules from {}", args.rules.display()))?;

    let input = inputs.get(&args.input_variable)?;
    let output = outputs.get(&args.output_variable)?;

    let inference = MamdaniInference::new(InferenceConfig {
        resolution: args.resolution,
        tolerance: args.tolerance,
    });
    let control = inference.eval(args.value, input, output, &rules).crisp();

    info!(value = args.value, control, "inference complete");
    println!("Optimal control at {}: {control:.2}", args.value);

    Ok(())
}
