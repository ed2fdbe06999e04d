// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error kinds surfaced to the user: validation (before side effects) and execution (during the run)
// role: errors/types
// outputs: ValidationError and ExecutionError, carried inside anyhow::Error and downcastable by callers/tests
// invariants: Messages name the violated constraint or failing program exactly; no variant triggers cleanup
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("a project name is required: bootstrap <project_name> [flags]")]
  MissingProjectName,

  #[error("--github requires --git")]
  GithubRequiresGit,

  #[error("--public requires --github")]
  PublicRequiresGithub,

  #[error("--lint-staged requires --git (or an existing git repository in the project directory)")]
  LintStagedRequiresGit,

  #[error("--lint-staged requires --prettier or --eslint")]
  LintStagedRequiresTooling,

  #[error("unknown preset '{0}'")]
  UnknownPreset(String),

  #[error("preset extension cycle: {}", .0.join(" -> "))]
  PresetCycle(Vec<String>),

  #[error("invalid preset file {path}: {reason}")]
  InvalidPresetFile { path: String, reason: String },

  #[error("invalid package name(s): {}", .0.join(", "))]
  InvalidPackageNames(Vec<String>),

  #[error("package(s) not found in the npm registry: {}", .0.join(", "))]
  MissingPackages(Vec<String>),

  #[error("no valid answer for '{question}' after {attempts} attempts")]
  PromptExhausted { question: String, attempts: usize },
}

#[derive(Debug, Error)]
pub enum ExecutionError {
  #[error("required program '{0}' was not found on PATH")]
  MissingProgram(String),

  #[error("`{command}` failed ({status}): {stderr}")]
  CommandFailed {
    command: String,
    status: String,
    stderr: String,
  },
}
