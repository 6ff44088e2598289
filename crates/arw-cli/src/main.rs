//! arw - exact stationary distributions of activated random walks
//!
//! Computes the symbolic stationary distribution of the ARW on a finite
//! graph with one sink, saves it as a JSON artifact next to plaintext and
//! LaTeX renderings, and derives marginals, correlations, and
//! survivor-count statistics from saved artifacts.

use anyhow::{Context, Result};
use arw_analysis::{
    marginals, pair_correlations, specialize_univariate, survivors_at_least, survivors_exactly,
};
use arw_chain::{stationary_distribution, Graph, StationaryDist};
use arw_symbolic::{ParamSet, Rat};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};

mod graphs;
mod output;
mod progress;

use progress::ProgressLine;

#[derive(Parser)]
#[command(name = "arw", version, about = "Exact ARW stationary distributions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a stationary distribution and save it with its renderings
    Compute {
        /// Built-in graph name or path to a JSON adjacency list
        #[arg(long)]
        graph: String,
        /// Directory for the artifact and renderings
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// Derive marginals and pair correlations from a saved distribution
    Analyze {
        /// Name of a previously computed graph
        #[arg(long)]
        graph: String,
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
    /// Derive survivor-count probabilities from a saved distribution
    Survivors {
        /// Name of a previously computed graph
        #[arg(long)]
        graph: String,
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Compute { graph, out_dir } => compute(&graph, &out_dir),
        Command::Analyze { graph, out_dir } => analyze(&graph, &out_dir),
        Command::Survivors { graph, out_dir } => survivors(&graph, &out_dir),
    }
}

fn compute(graph_arg: &str, out_dir: &Path) -> Result<()> {
    let (name, adjacency) = graphs::resolve(graph_arg)?;
    let graph = Graph::new(adjacency).context("invalid adjacency list")?;
    let params = ParamSet::sleep_probs(graph.non_sink());

    log::info!(
        "computing stationary distribution for '{name}' ({} vertices + sink)",
        graph.non_sink()
    );
    let sd = stationary_distribution(&graph, &params, &mut ProgressLine::default())
        .context("stationary distribution failed")?;

    output::write_distribution(out_dir, &name, &sd)
}

fn analyze(name: &str, out_dir: &Path) -> Result<()> {
    let sd = output::load_distribution(out_dir, name)?;
    let uni = specialize_univariate(&sd, "q").context("univariate specialization failed")?;

    output::write_blocks(out_dir, name, "distribution-univar", &uni.probs, &uni.params)?;

    let margs = marginals(&sd)?;
    output::write_blocks(out_dir, name, "marginals", &margs, &sd.params)?;
    let corrs = pair_correlations(&sd)?;
    output::write_blocks(out_dir, name, "correlations", &corrs, &sd.params)?;

    let margs_uni = marginals(&uni)?;
    output::write_blocks(out_dir, name, "marginals-univar", &margs_uni, &uni.params)?;
    let corrs_uni = pair_correlations(&uni)?;
    output::write_blocks(out_dir, name, "correlations-univar", &corrs_uni, &uni.params)?;

    Ok(())
}

fn survivors(name: &str, out_dir: &Path) -> Result<()> {
    let sd = output::load_distribution(out_dir, name)?;
    let n = sd.vertices();

    // Plain files count down from n survivors, univariate ones count up.
    let at_least = collect_survivors(survivors_at_least, &sd, (0..=n).rev())?;
    output::write_blocks(out_dir, name, "survivors", &at_least, &sd.params)?;
    let exact = collect_survivors(survivors_exactly, &sd, (0..=n).rev())?;
    output::write_blocks(out_dir, name, "exact-survivors", &exact, &sd.params)?;

    let uni = specialize_univariate(&sd, "q").context("univariate specialization failed")?;
    let at_least_uni = collect_survivors(survivors_at_least, &uni, 0..=n)?;
    output::write_blocks(out_dir, name, "survivors-univar", &at_least_uni, &uni.params)?;
    let exact_uni = collect_survivors(survivors_exactly, &uni, 0..=n)?;
    output::write_blocks(
        out_dir,
        name,
        "exact-survivors-univar",
        &exact_uni,
        &uni.params,
    )?;

    Ok(())
}

fn collect_survivors(
    f: fn(usize, &StationaryDist) -> arw_analysis::Result<Rat>,
    sd: &StationaryDist,
    ks: impl Iterator<Item = usize>,
) -> arw_analysis::Result<Vec<Rat>> {
    ks.map(|k| f(k, sd)).collect()
}
