//! Noisy Digits Demo
//!
//! Builds train/valid/test splits for a digit subset and renders one digit
//! under escalating noise strengths as a terminal intensity grid.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use alsvid_data::{
    DatasetConfig, DigitSource, IdxSource, InMemorySource, NoiseModel, NoisyDigits, RawDigits,
    Split, SplitBundle,
};
use alsvid_demos::{
    create_progress_bar, init_tracing, print_header, print_info, print_result, print_section,
    render_image,
};

#[derive(Parser, Debug)]
#[command(name = "demo-noisy-digits")]
#[command(about = "Build noisy digit-dataset splits and visualize noise effects")]
struct Args {
    /// Directory holding the IDX ubyte files (plain or .gz)
    #[arg(short, long, default_value = "data/mnist")]
    root: PathBuf,

    /// Use a synthetic in-memory pool instead of IDX files
    #[arg(long)]
    synthetic: bool,

    /// Digits of interest, in re-indexing order
    #[arg(short, long, value_delimiter = ',', default_values_t = [3_u8, 6])]
    digits: Vec<u8>,

    /// Noise model (none, gaussian, saltandpepper, poisson, speckle)
    #[arg(short, long, default_value = "gaussian")]
    noise: String,

    /// Test-split item to render
    #[arg(short, long, default_value = "0")]
    index: usize,

    /// Seed for the split partition and the rendered noise draws
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    show_config: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// A small fake pool: blocky pseudo-digits, enough to exercise the pipeline.
fn synthetic_source(digits: &[u8]) -> InMemorySource {
    let make = |n: usize| {
        let labels: Vec<u8> = (0..n).map(|i| digits[i % digits.len()]).collect();
        let images = Array3::from_shape_fn((n, 28, 28), |(row, r, c)| {
            let digit = labels[row] as usize;
            // A filled square whose size tracks the digit value.
            let half = 4 + digit;
            let (dr, dc) = (r.abs_diff(14), c.abs_diff(14));
            if dr < half && dc < half { 220 } else { 0 }
        });
        RawDigits { images, labels }
    };
    InMemorySource::new(make(600), make(100))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("Noisy Digit Dataset Demo");

    let config = DatasetConfig::default()
        .with_digits(args.digits.clone())
        .with_noise(NoiseModel::from_name(&args.noise, 0.3)?)
        .with_seed(args.seed);

    if args.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let idx_source;
    let mem_source;
    let source: &dyn DigitSource = if args.synthetic {
        mem_source = synthetic_source(&args.digits);
        &mem_source
    } else {
        idx_source = IdxSource::new(&args.root);
        &idx_source
    };

    let bundle = SplitBundle::load(source, &config)
        .with_context(|| format!("loading digit pools from {:?}", source.name()))?;

    print_section("Split sizes");
    for split in [&bundle.train, &bundle.valid, &bundle.test] {
        print_result(split.split().name(), split.len());
    }

    print_section("Per-class counts (test)");
    for (digit, count) in args.digits.iter().zip(bundle.test.class_counts()) {
        print_result(&format!("digit {digit}"), count);
    }

    // One noisy pass over the train split to sanity-check pixel statistics.
    print_section("Train-split sweep");
    let mut sweep_rng = StdRng::seed_from_u64(args.seed);
    let pb = create_progress_bar(bundle.train.len() as u64, "reading train items");
    let mut mean_abs = 0.0_f64;
    for item in bundle.train.iter_with_rng(&mut sweep_rng) {
        let item = item?;
        mean_abs += f64::from(item.image.iter().map(|p| p.abs()).sum::<f32>())
            / item.image.len() as f64;
        pb.inc(1);
    }
    pb.finish_and_clear();
    mean_abs /= bundle.train.len().max(1) as f64;
    tracing::info!(mean_abs, n = bundle.train.len(), "train sweep complete");
    print_result("Mean |pixel|", format!("{mean_abs:.4}"));

    let clean = bundle.test.item(args.index)?;
    let lo = clean.image.iter().fold(f32::INFINITY, |m, &v| m.min(v));
    let hi = clean.image.iter().fold(f32::NEG_INFINITY, |m, &v| m.max(v));

    print_section(&format!(
        "Item {} (digit {}) under escalating {} noise",
        args.index, clean.digit, args.noise
    ));
    for strength in [0.0, 0.2, 0.5, 1.0] {
        let noisy = if strength > 0.0 {
            let noise = NoiseModel::from_name(&args.noise, strength)?;
            let escalated = config.clone().with_noise(noise);
            let split = NoisyDigits::load(source, Split::Test, &escalated)?;
            let mut rng = StdRng::seed_from_u64(args.seed);
            split.item_with_rng(args.index, &mut rng)?
        } else {
            bundle.test.item(args.index)?
        };
        print_info(&format!("strength {strength}"));
        render_image(&noisy.image, lo, hi);
    }

    Ok(())
}
