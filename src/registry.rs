// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Remote lookups: npm registry package existence and the canonical Node .gitignore template
// role: network/remote-api
// inputs: package names; env fixtures BOOTSTRAP_TEST_MISSING_PACKAGES / BOOTSTRAP_TEST_GITIGNORE
// outputs: existence booleans; template text; a combined ValidationError for unresolvable names
// side_effects: HTTP requests to registry.npmjs.org and raw.githubusercontent.com
// invariants:
// - package lists are split on whitespace and de-duplicated in first-seen order
// - every unresolvable name is reported in one error, in input order
// - env fixtures replace the HTTP backend entirely when present
// errors: network failures propagate as execution errors; 404 means "does not exist"
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use tracing::debug;

use crate::error::ValidationError;

const NPM_REGISTRY: &str = "https://registry.npmjs.org";
const GITIGNORE_BASE: &str = "https://raw.githubusercontent.com/github/gitignore/main";

// --- Trait seam for remote lookups ---
pub trait RemoteApi: Sync {
  fn package_exists(&self, name: &str) -> Result<bool>;
  /// Fetch `<language>.gitignore` from the canonical template collection.
  fn gitignore_template(&self, language: &str) -> Result<String>;
}

struct HttpRemote {
  agent: ureq::Agent,
}

impl HttpRemote {
  fn new() -> Self {
    let agent = ureq::AgentBuilder::new()
      .user_agent(concat!("bootstrap/", env!("CARGO_PKG_VERSION")))
      .build();
    Self { agent }
  }
}

impl RemoteApi for HttpRemote {
  fn package_exists(&self, name: &str) -> Result<bool> {
    // scoped names keep the '@' but encode the separator
    let url = format!("{}/{}", NPM_REGISTRY, name.replace('/', "%2F"));
    debug!(%url, "registry lookup");

    match self.agent.head(&url).call() {
      Ok(_) => Ok(true),
      Err(ureq::Error::Status(404, _)) => Ok(false),
      Err(e) => Err(e).with_context(|| format!("looking up '{}' in the npm registry", name)),
    }
  }

  fn gitignore_template(&self, language: &str) -> Result<String> {
    let url = format!("{}/{}.gitignore", GITIGNORE_BASE, language);
    debug!(%url, "fetching gitignore template");

    let resp = self
      .agent
      .get(&url)
      .call()
      .with_context(|| format!("fetching {}", url))?;

    resp.into_string().with_context(|| format!("reading body of {}", url))
  }
}

/// Fixture-backed remote for tests and offline runs.
struct EnvRemote;

impl RemoteApi for EnvRemote {
  fn package_exists(&self, name: &str) -> Result<bool> {
    let missing = std::env::var("BOOTSTRAP_TEST_MISSING_PACKAGES").unwrap_or_default();
    Ok(!missing.split_whitespace().any(|m| m == name))
  }

  fn gitignore_template(&self, _language: &str) -> Result<String> {
    match std::env::var("BOOTSTRAP_TEST_GITIGNORE") {
      Ok(s) => Ok(s),
      Err(_) => anyhow::bail!("gitignore template source unreachable (BOOTSTRAP_TEST_GITIGNORE unset)"),
    }
  }
}

fn env_wants_mock() -> bool {
  std::env::var("BOOTSTRAP_TEST_MISSING_PACKAGES").is_ok() || std::env::var("BOOTSTRAP_TEST_GITIGNORE").is_ok()
}

pub fn build_remote() -> Box<dyn RemoteApi> {
  if env_wants_mock() {
    debug!("using environment fixtures for remote lookups");
    Box::new(EnvRemote)
  } else {
    Box::new(HttpRemote::new())
  }
}

#[cfg(any(test, feature = "testutil"))]
pub fn make_env_remote() -> Box<dyn RemoteApi> {
  Box::new(EnvRemote)
}

/// Split a whitespace-separated package list, dropping repeats.
pub fn split_packages(raw: &str) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for name in raw.split_whitespace() {
    if !out.iter().any(|n| n == name) {
      out.push(name.to_string());
    }
  }
  out
}

/// Lexical npm package-name check (optionally scoped, optionally with a version/tag suffix).
/// Uppercase is accepted: legacy packages such as `JSONStream` still resolve in the registry.
pub fn is_valid_package_name(spec: &str) -> bool {
  static RE_NAME: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^(?:@[A-Za-z0-9][A-Za-z0-9._~-]*/)?[A-Za-z0-9][A-Za-z0-9._~-]*(?:@[^\s@/]+)?$").unwrap()
  });
  spec.len() <= 214 && RE_NAME.is_match(spec)
}

/// Strip a trailing `@version` / `@tag` so the registry is asked about the package itself.
pub fn package_name(spec: &str) -> &str {
  let search_from = if spec.starts_with('@') { 1 } else { 0 };
  match spec[search_from..].find('@') {
    Some(i) => &spec[..search_from + i],
    None => spec,
  }
}

/// Verify every name exists; one ValidationError lists all failures in input order.
pub fn verify_packages(remote: &dyn RemoteApi, names: &[String]) -> Result<()> {
  let invalid: Vec<String> = names.iter().filter(|n| !is_valid_package_name(n)).cloned().collect();
  if !invalid.is_empty() {
    return Err(ValidationError::InvalidPackageNames(invalid).into());
  }

  let results: Vec<(String, Result<bool>)> = names
    .par_iter()
    .map(|spec| (spec.clone(), remote.package_exists(package_name(spec))))
    .collect();

  let mut missing = Vec::new();
  for (spec, res) in results {
    if !res? {
      missing.push(spec);
    }
  }

  if missing.is_empty() {
    Ok(())
  } else {
    Err(ValidationError::MissingPackages(missing).into())
  }
}
