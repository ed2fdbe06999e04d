use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::error::ValidationError;
use crate::prompt::Prompter;
use crate::registry::{self, RemoteApi};
use crate::util;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "bootstrap",
    version,
    about = "Scaffold a new Node.js project: git, package.json, formatter, linter and hooks",
    long_about = None,
    args_override_self = true
)]
pub struct Cli {
  /// Project name; also the directory to create (relative to the current dir)
  pub project_name: Option<String>,

  /// Initialize a git repository with a Node .gitignore and commit the scaffold
  #[arg(long)]
  pub git: bool,

  /// Create a GitHub repository from the local one and push (requires --git)
  #[arg(long)]
  pub github: bool,

  /// Make the GitHub repository public (requires --github)
  #[arg(long)]
  pub public: bool,

  /// Use ES modules ("type": "module") instead of CommonJS
  #[arg(long)]
  pub esm: bool,

  /// Write an .editorconfig
  #[arg(long)]
  pub editorconfig: bool,

  /// Install Prettier and add a `format` script
  #[arg(long)]
  pub prettier: bool,

  /// Install ESLint, write .eslintrc.json, and add `lint` scripts
  #[arg(long)]
  pub eslint: bool,

  /// Run Prettier/ESLint on staged files in a pre-commit hook (requires --git and --prettier or --eslint)
  #[arg(long)]
  pub lint_staged: bool,

  /// Render a README.md from the package metadata
  #[arg(long)]
  pub readme: bool,

  /// Write an MIT LICENSE using your git identity
  #[arg(long)]
  pub license: bool,

  /// Runtime dependencies, space separated, e.g. --dependencies="fastify pino"
  #[arg(long, value_name = "PACKAGES")]
  pub dependencies: Option<String>,

  /// Development dependencies, space separated
  #[arg(long, value_name = "PACKAGES")]
  pub dev_dependencies: Option<String>,

  /// Apply a named preset from the presets file before the other flags
  #[arg(short = 'p', long, value_name = "NAME")]
  pub preset: Option<String>,

  /// Path to the presets file (default: $BOOTSTRAP_CONFIG or <config dir>/bootstrap/presets.json)
  #[arg(long, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// List the presets defined in the presets file and exit
  #[arg(long)]
  pub list_presets: bool,

  /// Ask for the module type and dependency lists when not given as flags
  #[arg(short = 'i', long)]
  pub interactive: bool,

  /// Stream child-process output and log every command
  #[arg(short = 'v', long)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
  Module,
  CommonJs,
}

impl ModuleType {
  pub fn as_str(&self) -> &'static str {
    match self {
      ModuleType::Module => "module",
      ModuleType::CommonJs => "commonjs",
    }
  }
}

/// Validated options; read-only once built.
#[derive(Debug, Clone)]
pub struct Options {
  pub project_name: String,
  pub project_dir: PathBuf, // absolute
  pub module_type: ModuleType,
  pub dependencies: Vec<String>,
  pub dev_dependencies: Vec<String>,
  pub git: bool,
  pub github: bool,
  pub public: bool,
  pub editorconfig: bool,
  pub prettier: bool,
  pub eslint: bool,
  pub lint_staged: bool,
  pub readme: bool,
  pub license: bool,
  pub verbose: bool,
}

impl Options {
  /// True when any step will run `npm install`.
  pub fn installs_packages(&self) -> bool {
    !self.dependencies.is_empty() || !self.dev_dependencies.is_empty() || self.prettier || self.eslint || self.lint_staged
  }
}

/// Cross-flag checks that need no I/O beyond an existence probe for `.git`.
fn check_flag_constraints(cli: &Cli, has_repo: impl Fn() -> bool) -> Result<(), ValidationError> {
  if cli.github && !cli.git {
    return Err(ValidationError::GithubRequiresGit);
  }
  if cli.public && !cli.github {
    return Err(ValidationError::PublicRequiresGithub);
  }
  if cli.lint_staged {
    if !cli.git && !has_repo() {
      return Err(ValidationError::LintStagedRequiresGit);
    }
    if !cli.prettier && !cli.eslint {
      return Err(ValidationError::LintStagedRequiresTooling);
    }
  }
  Ok(())
}

pub fn normalize<R: BufRead, W: Write>(
  cli: Cli,
  remote: &dyn RemoteApi,
  prompter: &mut Prompter<R, W>,
) -> Result<Options> {
  // Phase 1: the project name gates everything else
  let name = match cli.project_name.as_deref().map(str::trim) {
    Some(n) if !n.is_empty() => n.to_string(),
    _ => return Err(ValidationError::MissingProjectName.into()),
  };

  // Phase 2: flag combinations
  let project_dir = util::canonicalize_lossy(&name);
  check_flag_constraints(&cli, || project_dir.join(".git").exists())?;

  // Phase 3: interactive answers for anything not given as a flag
  let mut module_type = if cli.esm { ModuleType::Module } else { ModuleType::CommonJs };
  let mut deps_raw = cli.dependencies.clone();
  let mut dev_raw = cli.dev_dependencies.clone();

  if cli.interactive {
    if !cli.esm {
      module_type = prompter.module_type()?;
    }
    if deps_raw.is_none() {
      deps_raw = Some(prompter.packages("Dependencies")?);
    }
    if dev_raw.is_none() {
      dev_raw = Some(prompter.packages("Dev dependencies")?);
    }
  }

  // Phase 4: dependency names must exist before anything is written
  let dependencies = registry::split_packages(deps_raw.as_deref().unwrap_or(""));
  let dev_dependencies = registry::split_packages(dev_raw.as_deref().unwrap_or(""));

  let mut all: Vec<String> = dependencies.clone();
  for d in &dev_dependencies {
    if !all.contains(d) {
      all.push(d.clone());
    }
  }
  if !all.is_empty() {
    registry::verify_packages(remote, &all)?;
  }

  let project_name = project_dir
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or(name);

  Ok(Options {
    project_name,
    project_dir,
    module_type,
    dependencies,
    dev_dependencies,
    git: cli.git,
    github: cli.github,
    public: cli.public,
    editorconfig: cli.editorconfig,
    prettier: cli.prettier,
    eslint: cli.eslint,
    lint_staged: cli.lint_staged,
    readme: cli.readme,
    license: cli.license,
    verbose: cli.verbose,
  })
}
