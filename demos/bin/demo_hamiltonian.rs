//! Hamiltonian Builder Demo
//!
//! Expands a Pauli-term file (default: the bundled H₂ fixture) or an inline
//! transverse-field Ising model into its dense matrix and inspects it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use alsvid_demos::{init_tracing, print_header, print_info, print_result, print_section};
use alsvid_ham::Hamiltonian;

#[derive(Parser, Debug)]
#[command(name = "demo-hamiltonian")]
#[command(about = "Expand a Pauli-string Hamiltonian into its dense matrix")]
struct Args {
    /// Term file with one '<coefficient> <pauli_string>' pair per line
    #[arg(short, long, default_value = "demos/fixtures/h2.txt")]
    file: PathBuf,

    /// Build an inline transverse-field Ising chain of N qubits instead
    #[arg(long)]
    ising: Option<usize>,

    /// ZZ coupling strength for --ising
    #[arg(long, default_value = "1.0")]
    coupling: f64,

    /// Transverse field strength for --ising
    #[arg(long, default_value = "0.5")]
    field: f64,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn ising_hamiltonian(n: usize, coupling: f64, field: f64) -> anyhow::Result<Hamiltonian> {
    let mut coeffs = Vec::new();
    let mut labels = Vec::new();
    for q in 0..n.saturating_sub(1) {
        let mut s = vec!['I'; n];
        s[q] = 'Z';
        s[q + 1] = 'Z';
        coeffs.push(-coupling);
        labels.push(s.into_iter().collect::<String>());
    }
    for q in 0..n {
        let mut s = vec!['I'; n];
        s[q] = 'X';
        coeffs.push(-field);
        labels.push(s.into_iter().collect::<String>());
    }
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    Ok(Hamiltonian::from_labels(&coeffs, &label_refs)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("Pauli-String Hamiltonian Expansion");

    let hamiltonian = match args.ising {
        Some(n) => {
            print_result("Model", format!("transverse-field Ising, {n} qubits"));
            ising_hamiltonian(n, args.coupling, args.field)?
        }
        None => {
            print_result("Term file", args.file.display());
            Hamiltonian::from_file(&args.file)
                .with_context(|| format!("loading {}", args.file.display()))?
        }
    };

    tracing::info!(
        n_terms = hamiltonian.n_terms(),
        n_qubits = hamiltonian.n_qubits(),
        "Hamiltonian constructed"
    );

    print_section("Terms");
    for (coeff, pauli) in hamiltonian.coeffs().iter().zip(hamiltonian.paulis()) {
        println!("  {coeff:>12.7}  {pauli}");
    }

    print_section("Properties");
    print_result("Qubits", hamiltonian.n_qubits());
    print_result(
        "Dimension",
        format!("{0} × {0}", hamiltonian.dim()),
    );
    print_result("λ = Σ|c_k|", format!("{:.7}", hamiltonian.lambda()));
    print_result("Hermitian", hamiltonian.is_hermitian(1e-9));

    if hamiltonian.n_qubits() <= 3 {
        print_section("Dense matrix");
        for i in 0..hamiltonian.dim() {
            print!("  ");
            for j in 0..hamiltonian.dim() {
                let v = hamiltonian.matrix()[(i, j)];
                if v.im.abs() > 1e-12 {
                    print!("{:>7.3}{:+.3}i ", v.re, v.im);
                } else {
                    print!("{:>7.3} ", v.re);
                }
            }
            println!();
        }
    } else {
        print_info("matrix larger than 8×8, skipping dump");
    }

    Ok(())
}
