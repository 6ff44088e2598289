//! Artifact persistence and plaintext rendering
//!
//! A computed distribution is saved as one JSON artifact plus plaintext
//! renderings: a state list, a pretty numerator-over-denominator version
//! of each probability, and a LaTeX version.

use anyhow::{Context, Result};
use arw_chain::StationaryDist;
use arw_symbolic::{ParamSet, Rat};
use std::fs;
use std::path::{Path, PathBuf};

/// Pretty `numerator / denominator` block, one fraction per paragraph.
pub fn pretty_block(r: &Rat, ps: &ParamSet) -> String {
    format!("{}\n/\n{}\n\n", r.num().render(ps), r.den().render(ps))
}

fn artifact_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{name}.json"))
}

fn text_path(out_dir: &Path, name: &str, suffix: &str) -> PathBuf {
    out_dir.join(format!("{name}-{suffix}.txt"))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Save the JSON artifact and the three renderings produced by `compute`.
pub fn write_distribution(out_dir: &Path, name: &str, sd: &StationaryDist) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let artifact = artifact_path(out_dir, name);
    let json = serde_json::to_string(sd).context("serializing distribution")?;
    fs::write(&artifact, json).with_context(|| format!("writing {}", artifact.display()))?;
    log::info!("wrote {}", artifact.display());

    let states: String = sd
        .states
        .iter()
        .map(|s| format!("{s}\n"))
        .collect();
    write_text(&text_path(out_dir, name, "states"), &states)?;

    let pretty: String = sd
        .probs
        .iter()
        .map(|p| pretty_block(p, &sd.params))
        .collect();
    write_text(&text_path(out_dir, name, "distribution"), &pretty)?;

    let latex: String = sd
        .probs
        .iter()
        .map(|p| format!("{}\n", p.latex(&sd.params)))
        .collect();
    write_text(&text_path(out_dir, name, "distribution-latex"), &latex)?;

    Ok(())
}

/// Load a previously saved distribution artifact.
pub fn load_distribution(out_dir: &Path, name: &str) -> Result<StationaryDist> {
    let path = artifact_path(out_dir, name);
    let text = fs::read_to_string(&path).with_context(|| {
        format!(
            "reading {} (run `arw compute --graph {name}` first)",
            path.display()
        )
    })?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Write one pretty block per value to `<name>-<suffix>.txt`.
pub fn write_blocks(
    out_dir: &Path,
    name: &str,
    suffix: &str,
    values: &[Rat],
    ps: &ParamSet,
) -> Result<()> {
    let content: String = values.iter().map(|v| pretty_block(v, ps)).collect();
    write_text(&text_path(out_dir, name, suffix), &content)
}
