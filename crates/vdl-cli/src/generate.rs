//! # Generate Subcommand
//!
//! Writes the credential fixture set: one JSON file per U.S. state, each
//! carrying the sample license claims with that state as the issuing
//! authority. A one-time step run before the suite; the orchestrator only
//! ever reads the results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use vdl_core::files::write_json;
use vdl_core::{Fixture, HarnessPaths, STATES};

/// Arguments for `vdl generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output directory for fixture files. Defaults to the fixtures
    /// directory from the environment.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Generate and write all fixtures.
pub fn run_generate(args: &GenerateArgs, base: &Path) -> Result<u8> {
    let paths = HarnessPaths::from_env(base);
    let dir = args.output.clone().unwrap_or(paths.fixtures);

    for state in &STATES {
        let fixture = Fixture::sample(state);
        let path = dir.join(format!("{}.json", state.name));
        write_json(&path, &fixture)
            .with_context(|| format!("writing fixture for {}", state.name))?;
        tracing::debug!(state = state.code, path = %path.display(), "wrote fixture");
    }

    println!("Wrote {} fixtures to {}", STATES.len(), dir.display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdl_core::fixture::load_fixtures;

    #[test]
    fn generates_one_fixture_per_state() {
        let dir = tempfile::tempdir().unwrap();
        let args = GenerateArgs {
            output: Some(dir.path().to_path_buf()),
        };
        let code = run_generate(&args, Path::new(".")).unwrap();
        assert_eq!(code, 0);

        let fixtures = load_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.len(), STATES.len());

        let california = fixtures.iter().find(|f| f.name == "California").unwrap();
        assert_eq!(california.issuing_authority(), Some("CA"));
    }
}
