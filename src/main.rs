//! Batch driver: greedy construction, LNS, optional hill climbing.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use u_binpack::greedy::{ConstructionRule, GreedyConfig, GreedyRunner};
use u_binpack::hill_climb::{HillClimbConfig, HillClimbRunner};
use u_binpack::lns::{Acceptance, LnsConfig, LnsRunner};
use u_binpack::model::{Instance, Solution};
use u_binpack::placement::AnchorStrategy;
use u_binpack::report::{save_solution, write_solution, RunRecord, RunReport};

#[derive(Parser)]
#[command(name = "u-binpack")]
#[command(about = "Cost-weighted 2D bin packing with greedy construction, LNS and hill climbing")]
#[command(version)]
struct Cli {
    /// Instance files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for per-instance result files (<stem>.out)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Output file for the CSV run report
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of LNS rounds
    #[arg(short, long, default_value = "50")]
    rounds: usize,

    /// Destroy/repair trials per round
    #[arg(short, long, default_value = "100")]
    iterations: usize,

    /// Fraction of placed items removed per trial
    #[arg(short, long, default_value = "0.3")]
    destroy_rate: f64,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// End each LNS round at its first improvement
    #[arg(long)]
    first_improvement: bool,

    /// Polish the LNS result with relocation hill climbing
    #[arg(long)]
    hill_climb: bool,

    /// Construction rule
    #[arg(long, value_enum, default_value = "first-fit")]
    rule: RuleArg,

    /// Anchor point strategy
    #[arg(long, value_enum, default_value = "frontier")]
    anchors: AnchorArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum RuleArg {
    FirstFit,
    LowestCorner,
}

impl From<RuleArg> for ConstructionRule {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::FirstFit => ConstructionRule::FirstFit,
            RuleArg::LowestCorner => ConstructionRule::LowestCorner,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AnchorArg {
    Frontier,
    Corners,
}

impl From<AnchorArg> for AnchorStrategy {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::Frontier => AnchorStrategy::Frontier,
            AnchorArg::Corners => AnchorStrategy::Corners,
        }
    }
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Everything the solve pipeline needs, built once from the flags.
struct Pipeline {
    greedy: GreedyConfig,
    lns: LnsConfig,
    hill_climb: Option<HillClimbConfig>,
}

impl Pipeline {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut lns = LnsConfig::default()
            .with_rounds(cli.rounds)
            .with_iterations(cli.iterations)
            .with_destroy_rate(cli.destroy_rate);
        if cli.first_improvement {
            lns = lns.with_acceptance(Acceptance::FirstImprovement);
        }
        if let Some(seed) = cli.seed {
            lns = lns.with_seed(seed);
        }
        if let Err(msg) = lns.validate() {
            bail!("invalid LNS settings: {msg}");
        }

        Ok(Self {
            greedy: GreedyConfig::default()
                .with_rule(cli.rule.into())
                .with_anchors(cli.anchors.into()),
            lns,
            hill_climb: cli.hill_climb.then(HillClimbConfig::default),
        })
    }

    fn solve(&self, path: &Path) -> anyhow::Result<(Solution, Duration)> {
        let instance = Instance::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        log::info!(
            "solving {} with {} items and {} containers",
            path.display(),
            instance.item_count(),
            instance.container_count()
        );

        let start = Instant::now();
        let initial = GreedyRunner::run(Arc::new(instance), &self.greedy)?;
        let mut best = LnsRunner::run(&initial, &self.lns)?.best;
        if let Some(config) = &self.hill_climb {
            best = HillClimbRunner::run(&best, config).best;
        }
        best.verify()?;

        Ok((best, start.elapsed()))
    }
}

fn instance_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn main() -> anyhow::Result<()> {
    enable_tracing();
    let cli = Cli::parse();
    let pipeline = Pipeline::from_cli(&cli)?;

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    } else if cli.inputs.len() > 1 {
        bail!("--out-dir is required when solving more than one instance");
    }

    let mut report = RunReport::new();

    for path in &cli.inputs {
        let name = instance_name(path);

        let (solution, elapsed) = match pipeline.solve(path) {
            Ok(solved) => solved,
            Err(err) => {
                log::error!("{name}: {err:#}");
                report.add(RunRecord::failed(name));
                continue;
            }
        };

        let written = match &cli.out_dir {
            Some(dir) => {
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("solution");
                save_solution(dir.join(format!("{stem}.out")), &solution, elapsed)
            }
            None => {
                let mut stdout = io::stdout().lock();
                write_solution(&mut stdout, &solution, elapsed).and_then(|()| stdout.flush())
            }
        };
        if let Err(err) = written {
            log::error!("{name}: failed to write solution: {err}");
            report.add(RunRecord::failed(name));
            continue;
        }

        log::info!(
            "{name}: cost {} using {} containers in {:.3}s",
            solution.total_cost(),
            solution.used_count(),
            elapsed.as_secs_f64()
        );
        report.add(RunRecord::solved(name, &solution, elapsed));
    }

    if let Some(csv) = &cli.csv {
        report
            .save_csv(csv)
            .with_context(|| format!("failed to write {}", csv.display()))?;
        log::info!("run report saved to {}", csv.display());
    }
    if cli.out_dir.is_some() {
        report.print_summary();
    }

    Ok(())
}
