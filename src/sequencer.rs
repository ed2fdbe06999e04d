// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Plan and run the scaffold steps in fixed order for a validated Options
// role: processing/orchestrator
// inputs: Options; Shell (git/gh/npm/npx); RemoteApi (gitignore template)
// outputs: Files in the project directory, a git commit, optionally a GitHub remote; a RunReport
// side_effects: Creates directories and files; spawns subprocesses; network via RemoteApi and gh
// invariants:
// - steps run in plan order; a disabled step is absent from the plan and touches nothing
// - the first failing step aborts the run; completed steps are left as they are
// - every subprocess runs with the project directory as cwd; the process cwd is never changed
// - config files are written only when missing; package.json is patched, never replaced
// errors: The failing step's label is attached as context to the underlying error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use colored::Colorize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::Options;
use crate::manifest::{self, PackageManifest};
use crate::registry::RemoteApi;
use crate::render::{self, Author, ReadmeParams};
use crate::shell::{args, Shell};
use crate::util::{write_if_missing, WriteOutcome};

pub const COMMIT_MESSAGE: &str = "Initial commit";
const GITIGNORE_LANGUAGE: &str = "Node";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  CreateDirectory,
  InitRepository,
  EditorConfig,
  Manifest,
  Dependencies,
  Prettier,
  Eslint,
  LintStaged,
  License,
  Readme,
  Commit,
  PublishGithub,
}

impl Step {
  pub fn label(&self) -> &'static str {
    match self {
      Step::CreateDirectory => "create project directory",
      Step::InitRepository => "initialize git repository",
      Step::EditorConfig => "write .editorconfig",
      Step::Manifest => "write package.json",
      Step::Dependencies => "install dependencies",
      Step::Prettier => "set up prettier",
      Step::Eslint => "set up eslint",
      Step::LintStaged => "set up lint-staged pre-commit hook",
      Step::License => "write LICENSE",
      Step::Readme => "write README.md",
      Step::Commit => "commit scaffold",
      Step::PublishGithub => "create GitHub repository",
    }
  }
}

/// Enabled steps for `opts`, in execution order.
pub fn plan(opts: &Options) -> Vec<Step> {
  let candidates = [
    (Step::CreateDirectory, true),
    (Step::InitRepository, opts.git),
    (Step::EditorConfig, opts.editorconfig),
    (Step::Manifest, true),
    (Step::Dependencies, !opts.dependencies.is_empty() || !opts.dev_dependencies.is_empty()),
    (Step::Prettier, opts.prettier),
    (Step::Eslint, opts.eslint),
    (Step::LintStaged, opts.lint_staged),
    (Step::License, opts.license),
    (Step::Readme, opts.readme),
    (Step::Commit, opts.git),
    (Step::PublishGithub, opts.github),
  ];

  candidates.into_iter().filter(|(_, on)| *on).map(|(s, _)| s).collect()
}

/// What a step did, for the final summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
  pub step: Step,
  pub note: String,
}

#[derive(Debug, Default)]
pub struct RunReport {
  pub outcomes: Vec<StepOutcome>,
}

pub struct Sequencer<'a> {
  opts: &'a Options,
  shell: &'a dyn Shell,
  remote: &'a dyn RemoteApi,
  year: i32,
}

impl<'a> Sequencer<'a> {
  pub fn new(opts: &'a Options, shell: &'a dyn Shell, remote: &'a dyn RemoteApi) -> Self {
    Self {
      opts,
      shell,
      remote,
      year: chrono::Local::now().year(),
    }
  }

  fn dir(&self) -> &Path {
    &self.opts.project_dir
  }

  fn quiet(&self) -> bool {
    !self.opts.verbose
  }

  fn git(&self, parts: &[&str]) -> Result<String> {
    self.shell.run(self.dir(), "git", &args(parts), true)
  }

  fn npm_install(&self, flag: &str, packages: &[String]) -> Result<()> {
    let mut a = vec!["install".to_string(), flag.to_string()];
    a.extend(packages.iter().cloned());
    self.shell.run(self.dir(), "npm", &a, self.quiet())?;
    Ok(())
  }

  fn update_manifest<F: FnOnce(&mut PackageManifest)>(&self, f: F) -> Result<()> {
    manifest::update(self.dir(), &self.opts.project_name, f)
  }

  pub fn run(&self) -> Result<RunReport> {
    let mut report = RunReport::default();

    for step in plan(self.opts) {
      info!(step = step.label(), "starting");
      let note = self
        .perform(step)
        .with_context(|| format!("step '{}' failed", step.label()))?;

      println!("{} {} {}", "✔".green(), step.label(), note.dimmed());
      report.outcomes.push(StepOutcome { step, note });
    }

    Ok(report)
  }

  fn perform(&self, step: Step) -> Result<String> {
    match step {
      Step::CreateDirectory => self.create_directory(),
      Step::InitRepository => self.init_repository(),
      Step::EditorConfig => self.editorconfig(),
      Step::Manifest => self.manifest(),
      Step::Dependencies => self.dependencies(),
      Step::Prettier => self.prettier(),
      Step::Eslint => self.eslint(),
      Step::LintStaged => self.lint_staged(),
      Step::License => self.license(),
      Step::Readme => self.readme(),
      Step::Commit => self.commit(),
      Step::PublishGithub => self.publish_github(),
    }
  }

  fn create_directory(&self) -> Result<String> {
    if self.dir().is_dir() {
      return Ok(format!("(exists: {})", self.dir().display()));
    }
    std::fs::create_dir_all(self.dir()).with_context(|| format!("creating {}", self.dir().display()))?;
    Ok(format!("({})", self.dir().display()))
  }

  fn init_repository(&self) -> Result<String> {
    let mut notes = Vec::new();

    if self.dir().join(".git").exists() {
      notes.push("repository exists");
    } else {
      self.git(&["init", "-q"])?;
      notes.push("git init");
    }

    let ignore = self.dir().join(".gitignore");
    if ignore.exists() {
      notes.push(".gitignore exists");
    } else {
      let template = self
        .remote
        .gitignore_template(GITIGNORE_LANGUAGE)
        .context("downloading the Node .gitignore template")?;
      write_if_missing(&ignore, template.as_bytes())?;
      notes.push(".gitignore");
    }

    Ok(format!("({})", notes.join(", ")))
  }

  fn editorconfig(&self) -> Result<String> {
    let outcome = write_if_missing(&self.dir().join(".editorconfig"), render::EDITORCONFIG.as_bytes())?;
    Ok(describe(outcome))
  }

  fn manifest(&self) -> Result<String> {
    let module_type = self.opts.module_type;
    self.update_manifest(|m| m.apply_project_defaults(module_type))?;
    Ok(format!("(type: {}, private)", module_type.as_str()))
  }

  fn dependencies(&self) -> Result<String> {
    if !self.opts.dependencies.is_empty() {
      self.npm_install("--save", &self.opts.dependencies)?;
    }
    if !self.opts.dev_dependencies.is_empty() {
      self.npm_install("--save-dev", &self.opts.dev_dependencies)?;
    }
    let all: Vec<String> = self
      .opts
      .dependencies
      .iter()
      .chain(self.opts.dev_dependencies.iter())
      .cloned()
      .collect();
    Ok(format!("({})", all.join(" ")))
  }

  fn prettier(&self) -> Result<String> {
    self.npm_install("--save-dev", &["prettier".to_string()])?;
    self.update_manifest(|m| m.set_script("format", "prettier --write ."))?;
    Ok("(format script)".into())
  }

  fn eslint(&self) -> Result<String> {
    let mut packages = vec!["eslint@^8".to_string(), "eslint-plugin-node".to_string()];
    if self.opts.prettier {
      packages.push("eslint-config-prettier".to_string());
    }
    self.npm_install("--save-dev", &packages)?;

    let config = render::eslint_config(self.opts.module_type, self.opts.prettier);
    let mut buf = serde_json::to_vec_pretty(&config)?;
    buf.push(b'\n');
    let outcome = write_if_missing(&self.dir().join(".eslintrc.json"), &buf)?;

    self.update_manifest(|m| {
      m.set_script("lint", "eslint .");
      m.set_script("lint:fix", "eslint --fix .");
    })?;

    Ok(format!("{} (lint scripts)", describe(outcome)))
  }

  fn lint_staged(&self) -> Result<String> {
    self.npm_install("--save-dev", &["husky".to_string(), "lint-staged".to_string()])?;

    let config = render::lint_staged_config(self.opts.prettier, self.opts.eslint);
    self.update_manifest(|m| {
      m.set_script("prepare", "husky");
      m.set("lint-staged", config);
    })?;

    let hook = self.dir().join(".husky").join("pre-commit");
    write_if_missing(&hook, render::PRE_COMMIT_HOOK.as_bytes())?;
    make_executable(&hook)?;

    // points core.hooksPath at .husky
    self.shell.run(self.dir(), "npx", &args(&["husky"]), self.quiet())?;

    Ok("(.husky/pre-commit)".into())
  }

  fn author(&self) -> Author {
    let lookup = |key: &str| {
      self
        .git(&["config", "--get", key])
        .map(|s| s.trim().to_string())
        .ok()
        .filter(|s| !s.is_empty())
    };

    Author {
      name: lookup("user.name").unwrap_or_else(|| "Your Name".into()),
      email: lookup("user.email").unwrap_or_else(|| "you@example.com".into()),
    }
  }

  fn license(&self) -> Result<String> {
    let author = self.author();
    let outcome = write_if_missing(&self.dir().join("LICENSE"), render::mit_license(self.year, &author).as_bytes())?;

    let author_field = author.manifest_field();
    self.update_manifest(|m| {
      m.set("license", Value::from("MIT"));
      m.set("author", Value::from(author_field));
    })?;

    Ok(format!("{} (MIT, {})", describe(outcome), author.name))
  }

  fn readme(&self) -> Result<String> {
    let m = PackageManifest::load_or_new(self.dir(), &self.opts.project_name)?;
    let name = m.get_str("name").unwrap_or_else(|| self.opts.project_name.clone());
    let description = m.get_str("description");
    let license = m.get_str("license");
    let scripts = m.scripts();

    let text = render::readme(&ReadmeParams {
      name: &name,
      description: description.as_deref(),
      scripts: &scripts,
      license: license.as_deref(),
    });

    Ok(describe(write_if_missing(&self.dir().join("README.md"), text.as_bytes())?))
  }

  fn commit(&self) -> Result<String> {
    self.git(&["add", "-A"])?;

    let status = self.git(&["status", "--porcelain"])?;
    if status.trim().is_empty() {
      debug!("work tree clean; skipping commit");
      return Ok("(nothing to commit)".into());
    }

    self.git(&["commit", "-q", "-m", COMMIT_MESSAGE])?;
    Ok(format!("(\"{}\")", COMMIT_MESSAGE))
  }

  fn publish_github(&self) -> Result<String> {
    if self.git(&["remote", "get-url", "origin"]).is_ok() {
      return Ok("(origin already configured)".into());
    }

    let visibility = if self.opts.public { "--public" } else { "--private" };
    let dir = self.dir().to_string_lossy().to_string();
    let a = args(&[
      "repo",
      "create",
      self.opts.project_name.as_str(),
      visibility,
      "--source",
      dir.as_str(),
      "--remote",
      "origin",
      "--push",
    ]);
    self.shell.run(self.dir(), "gh", &a, self.quiet())?;

    Ok(format!("({})", visibility.trim_start_matches("--")))
  }
}

fn describe(outcome: WriteOutcome) -> String {
  match outcome {
    WriteOutcome::Created => "(created)".into(),
    WriteOutcome::Exists => "(exists, left unchanged)".into(),
  }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let mut perms = std::fs::metadata(path)?.permissions();
  perms.set_mode(perms.mode() | 0o755);
  std::fs::set_permissions(path, perms).with_context(|| format!("chmod +x {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
  Ok(())
}
