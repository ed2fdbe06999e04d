// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Create or patch package.json: module type, private flag, scripts, and removal of npm-init defaults
// role: persistence/manifest
// inputs: project directory, project name, module type
// outputs: package.json written under the project directory
// side_effects: Reads and writes package.json
// invariants:
// - fields this module does not set are preserved, in their original key order
// - scaffold defaults are removed only when they still hold npm-init's default value
// - output is pretty-printed JSON with a trailing newline
// errors: IO and parse errors surfaced with the full path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::cli::ModuleType;
use crate::ext::serde_json::JsonPath;

pub const FILE_NAME: &str = "package.json";

const NPM_DEFAULT_TEST: &str = "echo \"Error: no test specified\" && exit 1";

/// In-memory package.json bound to its path.
pub struct PackageManifest {
  path: PathBuf,
  value: Value,
}

impl PackageManifest {
  /// Load `<dir>/package.json`, or start a minimal manifest named `name`.
  pub fn load_or_new(dir: &Path, name: &str) -> Result<Self> {
    let path = dir.join(FILE_NAME);

    if path.exists() {
      return Self::load(dir);
    }

    let value = serde_json::json!({
      "name": name,
      "version": "1.0.0",
    });
    Ok(Self { path, value })
  }

  pub fn load(dir: &Path) -> Result<Self> {
    let path = dir.join(FILE_NAME);
    let buf = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value = serde_json::from_slice(&buf).with_context(|| format!("parsing {}", path.display()))?;

    if !value.is_object() {
      anyhow::bail!("{} is not a JSON object", path.display());
    }

    Ok(Self { path, value })
  }

  /// Module type, `private: true`, and removal of npm-init leftovers.
  pub fn apply_project_defaults(&mut self, module_type: ModuleType) {
    self.value.put("type", Value::from(module_type.as_str()));
    self.value.put("private", Value::Bool(true));
    self.remove_scaffold_defaults();
  }

  fn remove_scaffold_defaults(&mut self) {
    let defaults: [(&str, Value); 5] = [
      ("main", Value::from("index.js")),
      ("description", Value::from("")),
      ("keywords", Value::Array(Vec::new())),
      ("author", Value::from("")),
      ("license", Value::from("ISC")),
    ];

    for (key, default) in defaults.iter() {
      if self.value.fetch(key).value() == Some(default) {
        self.value.take_path(key);
      }
    }

    if self.value.fetch("scripts.test").to::<String>().as_deref() == Some(NPM_DEFAULT_TEST) {
      self.value.take_path("scripts.test");
    }

    let scripts_empty = self
      .value
      .fetch("scripts")
      .value()
      .and_then(|v| v.as_object())
      .is_some_and(|m| m.is_empty());
    if scripts_empty {
      self.value.take_path("scripts");
    }
  }

  pub fn set_script(&mut self, name: &str, command: &str) {
    let scripts = self
      .value
      .as_object_mut()
      .map(|m| m.entry("scripts").or_insert_with(|| Value::Object(Default::default())));

    if let Some(scripts) = scripts {
      if !scripts.is_object() {
        *scripts = Value::Object(Default::default());
      }
      if let Some(map) = scripts.as_object_mut() {
        map.insert(name.to_string(), Value::from(command));
      }
    }
  }

  /// Set a top-level field.
  pub fn set(&mut self, key: &str, value: Value) {
    if let Some(map) = self.value.as_object_mut() {
      map.insert(key.to_string(), value);
    }
  }

  pub fn get_str(&self, path: &str) -> Option<String> {
    self.value.fetch(path).to::<String>()
  }

  /// Script names and commands, in manifest order.
  pub fn scripts(&self) -> Vec<(String, String)> {
    self
      .value
      .fetch("scripts")
      .to_or_default::<Map<String, Value>>()
      .into_iter()
      .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
      .collect()
  }

  pub fn write(&self) -> Result<&Path> {
    let mut buf = serde_json::to_vec_pretty(&self.value)?;
    buf.push(b'\n');
    std::fs::write(&self.path, buf).with_context(|| format!("writing {}", self.path.display()))?;
    Ok(&self.path)
  }

  #[cfg(test)]
  pub fn as_value(&self) -> &Value {
    &self.value
  }
}

/// Load (or create), patch with `f`, and write back in one step.
pub fn update<F>(dir: &Path, name: &str, f: F) -> Result<()>
where
  F: FnOnce(&mut PackageManifest),
{
  let mut manifest = PackageManifest::load_or_new(dir, name)?;
  f(&mut manifest);
  manifest.write()?;
  Ok(())
}
