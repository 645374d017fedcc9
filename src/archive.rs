use crate::game::GameResult;
use crate::strategy::Strategy;

use std::fs::{read, write};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{ensure, Context, Result};
use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};
use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use serde_json::{from_slice, to_vec};

/// Results of one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub strategy: Strategy,
    pub results: Vec<GameResult>,
}

/// Persistent simulation results
#[derive(Serialize, Deserialize)]
struct Archive {
    /// Version information for compatibility
    version: String,
    /// Actual results
    runs: Vec<Run>,
}

fn current_version() -> &'static str {
    env!("CARGO_PKG_VERSION", "must build with cargo")
}

/// Dump results to file
/// # Arguments
/// * `path` - to dump to
/// # Returns
/// Result - serialization, I/O can fail
pub fn dump_results(path: &Path, runs: Vec<Run>) -> Result<()> {
    let archive = Archive {
        version: String::from(current_version()),
        runs,
    };
    let serialized = to_vec(&archive)?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&serialized)?;
    let compressed = encoder.finish()?;
    write(path, compressed).with_context(|| format!("cannot write {}", path.display()))?;
    log::info!("saved {} runs to {}", archive.runs.len(), path.display());
    Ok(())
}

/// Restore results from file written by a compatible version
pub fn restore_results(path: &Path) -> Result<Vec<Run>> {
    let compressed = read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let mut serialized = Vec::new();
    DeflateDecoder::new(&compressed[..]).read_to_end(&mut serialized)?;
    let archive: Archive = from_slice(&serialized)?;

    let requirement = VersionReq::parse(&format!("^{}", current_version()))?;
    let version = Version::parse(&archive.version)?;
    ensure!(
        requirement.matches(&version),
        "Results were written by incompatible version {}",
        version
    );
    Ok(archive.runs)
}
