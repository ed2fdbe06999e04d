// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Spawn external programs (git, gh, npm, npx) with an explicit per-call quiet flag
// role: process/shell
// inputs: working directory, program name, argument list, quiet flag
// outputs: captured stdout (quiet) or empty string (streamed)
// side_effects: Spawns subprocesses
// invariants:
// - the process-wide working directory is never changed; cwd is passed per call
// - quiet = true captures stdout/stderr; quiet = false inherits the terminal
// - a non-zero exit is always an ExecutionError::CommandFailed carrying stderr when captured
// errors: spawn failures carry the command line as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::ExecutionError;

/// Seam over process spawning so the sequencer can be driven without npm or gh.
pub trait Shell {
  fn run(&self, cwd: &Path, program: &str, args: &[String], quiet: bool) -> Result<String>;
}

pub struct SystemShell;

impl Shell for SystemShell {
  fn run(&self, cwd: &Path, program: &str, args: &[String], quiet: bool) -> Result<String> {
    let command_line = render_command(program, args);
    debug!(cwd = %cwd.display(), quiet, "running {}", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);

    if quiet {
      let out = cmd
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("spawning {}", command_line))?;

      if out.status.success() {
        return Ok(String::from_utf8_lossy(&out.stdout).to_string());
      }

      return Err(
        ExecutionError::CommandFailed {
          command: command_line,
          status: out.status.to_string(),
          stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }
        .into(),
      );
    }

    let status = cmd
      .status()
      .with_context(|| format!("spawning {}", command_line))?;

    if status.success() {
      Ok(String::new())
    } else {
      Err(
        ExecutionError::CommandFailed {
          command: command_line,
          status: status.to_string(),
          stderr: "see output above".into(),
        }
        .into(),
      )
    }
  }
}

/// Human-readable command line for logs and error messages.
pub fn render_command(program: &str, args: &[String]) -> String {
  let mut s = program.to_string();
  for a in args {
    s.push(' ');
    if a.is_empty() || a.contains(char::is_whitespace) {
      s.push('"');
      s.push_str(a);
      s.push('"');
    } else {
      s.push_str(a);
    }
  }
  s
}

/// Build an owned argument vector from string slices.
pub fn args(parts: &[&str]) -> Vec<String> {
  parts.iter().map(|s| s.to_string()).collect()
}
