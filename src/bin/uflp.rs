use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use u_facility::grasp::GraspConfig;
use u_facility::io::{load_instance, InstanceFormat};
use u_facility::observer::{LogObserver, RunLog};
use u_facility::sa::SaConfig;
use u_facility::solver::{Algorithm, Solved, Solver};
use u_facility::vns::VnsConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Solve an uncapacitated facility location instance")]
struct Args {
    #[arg(short, long, help = "instance file path")]
    instance: PathBuf,

    #[arg(long, value_enum, default_value = "orlib", help = "instance file layout")]
    format: Format,

    #[arg(short, long, value_enum, default_value = "grasp")]
    algorithm: AlgorithmKind,

    #[arg(long, help = "rng seed")]
    seed: Option<u64>,

    #[arg(long, help = "TOML file with [grasp], [simulated_annealing] and [vns] tables")]
    config: Option<PathBuf>,

    #[arg(long, help = "write a CSV run log to this file")]
    run_log: Option<PathBuf>,

    #[arg(long, help = "GRASP candidate list width in [0, 1]")]
    alpha: Option<f64>,

    #[arg(long, help = "GRASP trials")]
    grasp_iterations: Option<usize>,

    #[arg(long)]
    initial_temperature: Option<f64>,

    #[arg(long)]
    final_temperature: Option<f64>,

    #[arg(long)]
    cooling_rate: Option<f64>,

    #[arg(long)]
    iterations_per_temperature: Option<usize>,

    #[arg(long)]
    max_stagnation_sweeps: Option<usize>,

    #[arg(long, help = "VNS outer iterations")]
    max_iterations: Option<usize>,

    #[arg(long, help = "VNS largest shake size")]
    k_max: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    #[value(name = "orlib")]
    OrLib,
    #[value(name = "lines", alias = "m")]
    Lines,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmKind {
    Grasp,
    #[value(name = "sa", alias = "simulated-annealing")]
    SimulatedAnnealing,
    HillClimbing,
    Vns,
}

/// Settings file layout; every table and key is optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RunConfig {
    grasp: GraspConfig,
    simulated_annealing: SaConfig,
    vns: VnsConfig,
}

impl RunConfig {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

fn build_algorithm(args: &Args, run_config: RunConfig) -> anyhow::Result<Algorithm> {
    let algorithm = match args.algorithm {
        AlgorithmKind::Grasp => {
            let mut config = run_config.grasp;
            if let Some(alpha) = args.alpha {
                config = config.with_alpha(alpha);
            }
            if let Some(n) = args.grasp_iterations {
                config = config.with_iterations(n);
            }
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            config.validate().map_err(anyhow::Error::msg)?;
            Algorithm::Grasp(config)
        }
        AlgorithmKind::SimulatedAnnealing => {
            let mut config = run_config.simulated_annealing;
            if let Some(t) = args.initial_temperature {
                config = config.with_initial_temperature(t);
            }
            if let Some(t) = args.final_temperature {
                config = config.with_final_temperature(t);
            }
            if let Some(rate) = args.cooling_rate {
                config = config.with_cooling_rate(rate);
            }
            if let Some(n) = args.iterations_per_temperature {
                config = config.with_iterations_per_temperature(n);
            }
            if let Some(n) = args.max_stagnation_sweeps {
                config = config.with_max_stagnation_sweeps(n);
            }
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            config.validate().map_err(anyhow::Error::msg)?;
            Algorithm::SimulatedAnnealing(config)
        }
        AlgorithmKind::HillClimbing => Algorithm::HillClimbing,
        AlgorithmKind::Vns => {
            let mut config = run_config.vns;
            if let Some(n) = args.max_iterations {
                config = config.with_max_iterations(n);
            }
            if let Some(k) = args.k_max {
                config = config.with_k_max(k);
            }
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            config.validate().map_err(anyhow::Error::msg)?;
            Algorithm::Vns(config)
        }
    };
    Ok(algorithm)
}

fn write_solution(solved: &Solved) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (customer, warehouse) in solved.assignments.as_signed_pairs() {
        writeln!(out, "{customer} {warehouse}")?;
    }
    writeln!(out, "cost {}", solved.cost)?;
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    info!("{:?}", &args);

    let format = match args.format {
        Format::OrLib => InstanceFormat::OrLib,
        Format::Lines => InstanceFormat::LineOriented,
    };
    let problem = load_instance(&args.instance, format)
        .with_context(|| format!("loading instance {}", args.instance.display()))?;

    let run_config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let algorithm = build_algorithm(&args, run_config)?;
    info!("starting {}", algorithm.name());

    let solved = match &args.run_log {
        Some(path) => {
            let name = args
                .instance
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut run_log = RunLog::new(name);
            let solved = algorithm.solve_observed(&problem, &mut run_log);
            run_log
                .write_csv(path)
                .with_context(|| format!("writing run log {}", path.display()))?;
            info!("run log: {} events to {}", run_log.len(), path.display());
            solved
        }
        None => algorithm.solve_observed(&problem, &mut LogObserver),
    };

    info!(
        "finished after {:?}: cost {}, {} iterations, {} evaluations",
        solved.statistics.elapsed,
        solved.cost,
        solved.statistics.iterations,
        solved.statistics.evaluations
    );
    write_solution(&solved)
}
