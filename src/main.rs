use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;

mod cli;
mod error;
mod ext;
mod manifest;
mod preflight;
mod preset;
mod prompt;
mod registry;
mod render;
mod sequencer;
mod shell;
mod util;

use crate::cli::{normalize, Cli};
use crate::preset::PresetConfig;
use crate::prompt::Prompter;
use crate::sequencer::Sequencer;
use crate::shell::SystemShell;

fn main() -> ExitCode {
  let raw: Vec<String> = std::env::args().collect();

  match run(raw) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{}", format!("error: {:#}", e).red().bold());
      ExitCode::FAILURE
    }
  }
}

fn run(raw: Vec<String>) -> Result<()> {
  let first = Cli::parse_from(&raw);

  if first.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: presets (flags from the preset come first, raw flags override)
  let cli = if first.preset.is_some() || first.list_presets {
    let config_path = first.config.clone().or_else(preset::default_config_path);
    let presets = match &config_path {
      Some(p) => PresetConfig::load(p)?,
      None => PresetConfig::default(),
    };

    if first.list_presets {
      for line in presets.describe() {
        println!("{}", line);
      }
      return Ok(());
    }

    match first.preset.clone() {
      Some(name) => Cli::parse_from(preset::expand_args(&raw, &presets, &name)?),
      None => first,
    }
  } else {
    first
  };
  util::init_logging(cli.verbose);

  // Phase 2: validate everything before touching the filesystem
  let remote = registry::build_remote();
  let opts = {
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    normalize(cli, remote.as_ref(), &mut prompter)?
  };
  debug!(?opts, "resolved options");

  // Phase 3: preflight, then the ordered steps
  let shell = SystemShell;
  preflight::run(&opts, &shell)?;

  let report = Sequencer::new(&opts, &shell, remote.as_ref()).run()?;
  for o in &report.outcomes {
    debug!(step = o.step.label(), note = %o.note, "completed");
  }

  println!(
    "\n{} {} created at {}",
    "Done:".green().bold(),
    opts.project_name.bold(),
    opts.project_dir.display()
  );

  Ok(())
}
