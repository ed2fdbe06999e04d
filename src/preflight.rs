// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Verify required programs are on PATH and report missing global git identity settings
// role: checks/preflight
// inputs: validated Options; Shell for `git config --global`
// outputs: Ok or MissingProgram; a list of identity warnings
// side_effects: Spawns `git config` (read-only); prints warnings to stderr
// invariants:
// - the first unresolvable program fails; later programs are not checked
// - identity gaps are warnings only and never abort
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use tracing::{debug, warn};

use crate::cli::Options;
use crate::error::ExecutionError;
use crate::shell::{args, Shell};

pub const IDENTITY_KEYS: [&str; 2] = ["user.name", "user.email"];

/// Programs the enabled steps will spawn, in check order.
pub fn required_programs(opts: &Options) -> Vec<&'static str> {
  let mut out = Vec::new();
  if opts.git {
    out.push("git");
  }
  if opts.github {
    out.push("gh");
  }
  if opts.installs_packages() {
    out.push("npm");
  }
  if opts.lint_staged {
    out.push("npx");
  }
  out
}

pub fn check_programs(names: &[&str]) -> Result<()> {
  for name in names {
    match which::which(name) {
      Ok(path) => debug!(program = %name, path = %path.display(), "found"),
      Err(_) => return Err(ExecutionError::MissingProgram(name.to_string()).into()),
    }
  }
  Ok(())
}

/// Look up global git identity keys; each unset key yields a warning string.
pub fn check_identity(shell: &dyn Shell, cwd: &Path, keys: &[&str]) -> Vec<String> {
  let mut warnings = Vec::new();

  for key in keys {
    let value = shell
      .run(cwd, "git", &args(&["config", "--global", "--get", key]), true)
      .map(|s| s.trim().to_string())
      .unwrap_or_default();

    if value.is_empty() {
      let msg = format!(
        "git {} is not set globally; commits may fail. Set it with: git config --global {} \"...\"",
        key, key
      );
      warn!("{}", msg);
      warnings.push(msg);
    }
  }

  warnings
}

/// Run every preflight check for `opts`, printing identity warnings.
pub fn run(opts: &Options, shell: &dyn Shell) -> Result<Vec<String>> {
  check_programs(&required_programs(opts))?;

  if !opts.git {
    return Ok(Vec::new());
  }

  let cwd = std::env::temp_dir();
  let warnings = check_identity(shell, &cwd, &IDENTITY_KEYS);
  for w in &warnings {
    eprintln!("{} {}", "warning:".yellow().bold(), w);
  }

  Ok(warnings)
}
