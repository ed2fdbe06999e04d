// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load user presets and expand a named preset into a flat flag list prepended to the raw arguments
// role: config/presets
// inputs: raw argv tokens and the preset name clap parsed from them; presets JSON file (BOOTSTRAP_CONFIG, --config, or <config_dir>/bootstrap/presets.json)
// outputs: PresetConfig; resolved flag lists; expanded argv
// side_effects: Reads the presets file (never writes)
// invariants:
// - resolved flags are ancestors first, the named preset last
// - raw arguments always follow preset flags, so they win on conflict
// - extension chains of any depth resolve; a cycle or unknown name is a ValidationError
// - a missing presets file is an empty configuration, not an error
// errors: ValidationError::{UnknownPreset, PresetCycle, InvalidPresetFile}
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

const PRESET_SCHEMA: &str = include_str!("../schemas/presets.schema.json");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
  #[serde(default)]
  pub presets: BTreeMap<String, Preset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
  #[serde(default)]
  pub flags: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub extends: Option<String>,
}

/// Default location of the presets file, honoring `BOOTSTRAP_CONFIG`.
pub fn default_config_path() -> Option<PathBuf> {
  if let Ok(p) = std::env::var("BOOTSTRAP_CONFIG") {
    if !p.trim().is_empty() {
      return Some(PathBuf::from(p));
    }
  }
  dirs::config_dir().map(|d| d.join("bootstrap").join("presets.json"))
}

impl PresetConfig {
  /// Load and schema-check the presets file. Absent file => no presets.
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!(path = %path.display(), "no presets file");
      return Ok(Self::default());
    }

    let invalid = |reason: String| ValidationError::InvalidPresetFile {
      path: path.display().to_string(),
      reason,
    };

    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_slice(&data).map_err(|e| invalid(e.to_string()))?;

    let schema: serde_json::Value = serde_json::from_str(PRESET_SCHEMA).context("parsing embedded preset schema")?;
    let validator = jsonschema::validator_for(&schema).map_err(|e| anyhow!("compiling preset schema: {}", e))?;
    let problems: Vec<String> = validator.iter_errors(&value).map(|e| e.to_string()).collect();

    if !problems.is_empty() {
      return Err(invalid(problems.join("; ")).into());
    }

    let cfg: PresetConfig = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
    Ok(cfg)
  }

  /// One line per preset, for `--list-presets`.
  pub fn describe(&self) -> Vec<String> {
    self
      .presets
      .iter()
      .map(|(name, p)| match &p.extends {
        Some(parent) => format!("{} (extends {}): {}", name, parent, p.flags.join(" ")),
        None => format!("{}: {}", name, p.flags.join(" ")),
      })
      .collect()
  }
}

/// Flatten `name` and its ancestors into one flag list, ancestors first.
pub fn resolve_preset(config: &PresetConfig, name: &str) -> Result<Vec<String>, ValidationError> {
  let mut chain: Vec<&str> = Vec::new();
  let mut cur = name;

  loop {
    if chain.contains(&cur) {
      let mut cycle: Vec<String> = chain.iter().map(|s| s.to_string()).collect();
      cycle.push(cur.to_string());
      return Err(ValidationError::PresetCycle(cycle));
    }

    let preset = config
      .presets
      .get(cur)
      .ok_or_else(|| ValidationError::UnknownPreset(cur.to_string()))?;
    chain.push(cur);

    match preset.extends.as_deref() {
      Some(parent) => cur = parent,
      None => break,
    }
  }

  let flags = chain
    .iter()
    .rev()
    .filter_map(|n| config.presets.get(*n))
    .flat_map(|p| p.flags.iter().cloned())
    .collect();

  Ok(flags)
}

/// Prepend the named preset's flags to the raw arguments, after argv[0].
pub fn expand_args(raw: &[String], config: &PresetConfig, name: &str) -> Result<Vec<String>, ValidationError> {
  let flags = resolve_preset(config, name)?;
  debug!(preset = %name, ?flags, "expanding preset");

  let mut out = Vec::with_capacity(raw.len() + flags.len());
  out.extend(raw.first().cloned());
  out.extend(flags);
  out.extend(raw.iter().skip(1).cloned());

  Ok(out)
}
