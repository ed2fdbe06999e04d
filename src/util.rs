// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, idempotent file writes, logging setup, and man page rendering
// role: utilities/helpers
// inputs: paths; file contents; verbosity; clap CommandFactory
// outputs: Absolute paths, write outcomes, initialized tracing subscriber, man page text
// side_effects: write_if_missing creates files and parent directories
// invariants:
// - canonicalize_lossy always returns an absolute path, even when the target does not exist yet
// - write_if_missing never truncates an existing file
// errors: IO errors bubble with the full path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing_subscriber::{fmt, EnvFilter};

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> PathBuf {
  let p = p.as_ref();
  match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  }
}

/// Outcome of an idempotent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  Created,
  Exists,
}

/// Write `contents` to `path` unless the file already exists.
pub fn write_if_missing(path: &Path, contents: &[u8]) -> Result<WriteOutcome> {
  if path.exists() {
    return Ok(WriteOutcome::Exists);
  }
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }
  std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;

  Ok(WriteOutcome::Created)
}

/// Install the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` for this crate with `--verbose`.
pub fn init_logging(verbose: bool) {
  let default = if verbose { "warn,bootstrap=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  let _ = fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .with_target(false)
    .try_init();
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
