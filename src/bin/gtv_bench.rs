use clap::{Parser, ValueEnum};
use gtv_solvers::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    #[value(name = "l1-l1")]
    L1L1,
    #[value(name = "l2-l1-nw")]
    L2L1Nw,
    #[value(name = "l2-l1-w")]
    L2L1W,
    #[value(name = "linear-l2")]
    LinearL2,
    #[value(name = "pwl1-l1")]
    PwL1,
    #[value(name = "pwl2-l1")]
    PwL2,
    #[value(name = "huber")]
    Huber,
    #[value(name = "condat")]
    Condat,
}

/// Benchmarks the bisection solver (and, where applicable, a closed-form
/// fast path) against synthetic chain-structured GTV instances.
#[derive(Debug, Parser)]
#[command(name = "gtv-bench")]
struct Cli {
    /// Which synthetic problem family to generate.
    #[arg(long, value_enum, default_value = "l2-l1-nw")]
    profile: Profile,

    /// Number of timed rounds to average over.
    #[arg(long, default_value_t = 5)]
    rounds: usize,

    /// Chain length.
    #[arg(long, default_value_t = 10_000)]
    n: usize,

    /// Separation penalty used by the non-weighted profiles.
    #[arg(long, default_value_t = 1.0)]
    lambda: Floating,

    /// Where to write the CSV report; omit to only print a summary.
    #[arg(long)]
    path: Option<String>,

    /// PRNG seed, for reproducible instances.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn build_instance(cli: &Cli, rng: &mut StdRng) -> InputData {
    let n = cli.n;
    match cli.profile {
        Profile::L1L1 => {
            let (c_dev, a_dev, c_sep) = generators::gen_lp_lq_funcs_with_lambda(rng, n, cli.lambda, false, true);
            InputData::builder(n, 1, 1)
                .c_dev(c_dev)
                .a_dev(a_dev)
                .c_sep(c_sep)
                .build()
                .expect("generated l1-l1 instance should be valid")
        }
        Profile::L2L1Nw => {
            let (c_dev, a_dev, c_sep) = generators::gen_lp_lq_funcs_with_lambda(rng, n, cli.lambda, false, true);
            InputData::builder(n, 2, 1)
                .c_dev(c_dev)
                .a_dev(a_dev)
                .c_sep(c_sep)
                .build()
                .expect("generated l2-l1 (non-weighted) instance should be valid")
        }
        Profile::L2L1W => {
            let (c_dev, a_dev, c_sep) = generators::gen_lp_lq_funcs(rng, n, true);
            InputData::builder(n, 2, 1)
                .c_dev(c_dev)
                .a_dev(a_dev)
                .c_sep(c_sep)
                .build()
                .expect("generated l2-l1 (weighted) instance should be valid")
        }
        Profile::LinearL2 => {
            let (c_dev, c_sep) = generators::gen_linear_l2_funcs(rng, n);
            InputData::builder(n, 1, 2)
                .c_dev(c_dev)
                .a_dev(DVector::zeros(n))
                .c_sep(c_sep)
                .build()
                .expect("generated linear-l2 instance should be valid")
        }
        Profile::PwL1 | Profile::PwL2 => {
            let pw_deg = match cli.profile {
                Profile::PwL1 => PiecewiseDegree::Linear,
                _ => PiecewiseDegree::Quadratic,
            };
            let bkp_nums = generators::gen_pw_bkp_nums_random(rng, n);
            let pw = generators::gen_pw_funcs(rng, pw_deg, &bkp_nums);
            let c_sep = generators::fill_sep_weighted(rng, n);
            InputData::builder(n, pw_deg.as_i32(), 1)
                .piecewise(pw_deg, bkp_nums, pw)
                .c_sep(c_sep)
                .build()
                .expect("generated piecewise instance should be valid")
        }
        Profile::Huber => {
            let (c_dev, a_dev, c_sep) = generators::gen_lp_lq_funcs(rng, n, true);
            let huber_d = generators::gen_huber_scales(rng, a_dev.as_slice(), 0.5, 1.0);
            InputData::builder(n, 1, 1)
                .c_dev(c_dev)
                .a_dev(a_dev)
                .c_sep(c_sep)
                .huber_d(huber_d)
                .build()
                .expect("generated Huber instance should be valid")
        }
        Profile::Condat => {
            let (c_dev, a_dev, c_sep) = generators::condat_worst_case(n);
            InputData::builder(n, 2, 1)
                .c_dev(c_dev)
                .a_dev(a_dev)
                .c_sep(c_sep)
                .build()
                .expect("Condat worst-case instance should be valid")
        }
    }
}

fn main() {
    let _guards = Tracer::default().with_stdout_layer(None).build();
    let cli = Cli::parse();
    let mut rng = StdRng::seed_from_u64(cli.seed);

    info!(profile = ?cli.profile, n = cli.n, rounds = cli.rounds, "building synthetic instance");
    let input = build_instance(&cli, &mut rng);

    let mut run_times = Vec::with_capacity(cli.rounds);
    let mut last_obj = 0.0;
    for round in 0..cli.rounds {
        let mut output = OutputData::new(&input);
        let start = Instant::now();
        solve(&input, &mut output);
        let elapsed = start.elapsed().as_secs_f64() * 1e3;
        objective::comp_obj(&input, &mut output);
        last_obj = *output.obj_val();
        run_times.push(elapsed);
        info!(round, elapsed_ms = elapsed, obj_val = last_obj, "solve round complete");
    }

    let (mean_ms, std_ms) = report::stat(&run_times);
    println!(
        "profile={:?} n={} rounds={} mean_ms={:.4} std_ms={:.4} obj_val={:.6}",
        cli.profile, cli.n, cli.rounds, mean_ms, std_ms, last_obj
    );

    if let Some(path) = cli.path {
        let row = report::BenchRow {
            n: cli.n,
            alg_name: format!("{:?}", cli.profile),
            mean_ms,
            std_ms,
            obj_val: last_obj,
        };
        if let Err(err) = report::write_report(&path, &[row]) {
            eprintln!("failed to write report to {path}: {err}");
        }
    }
}
