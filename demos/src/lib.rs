//! Alsvid Demo Suite
//!
//! Runnable command-line demonstrations of the Alsvid research-support
//! crates:
//!
//! - **demo-hamiltonian**: expand a Pauli-term file (or an inline Ising
//!   model) into its dense matrix and inspect it
//! - **demo-noisy-digits**: build noisy digit-dataset splits and render a
//!   digit under escalating noise as a terminal intensity grid

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

/// Initialize tracing from a `-v` count: warn, info, debug, trace.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Create a progress bar for demo passes over a dataset.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a section divider.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("── {title} ──")).yellow().bold());
}

/// Print a labeled result value.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", style(label).bold(), value);
}

/// Print an informational note.
pub fn print_info(message: &str) {
    println!("  {}", style(message).dim());
}

/// Render one grayscale image as a terminal intensity grid.
///
/// Pixel values are linearly mapped from `[lo, hi]` onto a density ramp,
/// one character cell per pixel (doubled horizontally to keep the aspect
/// ratio roughly square).
pub fn render_image(image: &ndarray::Array2<f32>, lo: f32, hi: f32) {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let span = (hi - lo).max(f32::EPSILON);
    for row in image.rows() {
        print!("  ");
        for &p in row {
            let t = ((p - lo) / span).clamp(0.0, 1.0);
            let idx = (t * (RAMP.len() - 1) as f32).round() as usize;
            let ch = RAMP[idx] as char;
            print!("{ch}{ch}");
        }
        println!();
    }
}
