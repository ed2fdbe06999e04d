// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path read/write/remove helpers over serde_json::Value for manifest patching
// role: extension/serde_json
// outputs: JsonPath trait (fetch/put/take_path) and the JsonFetched wrapper for typed extraction
// invariants:
// - No panics; missing paths yield None on read
// - put creates intermediate objects and replaces non-object intermediates
// - take_path never creates anything; it only removes an existing leaf
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A located JSON value, read through a typed second step.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  pub fn value(&self) -> Option<&'a Value> {
    self.inner
  }
}

/// Nested access via paths like "scripts.lint".
pub trait JsonPath {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
  /// Set the value at `path`, creating intermediate objects as needed.
  fn put(&mut self, path: &str, value: Value);
  /// Remove and return the value at `path`.
  fn take_path(&mut self, path: &str) -> Option<Value>;
}

impl JsonPath for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }

  fn put(&mut self, path: &str, value: Value) {
    let mut keys: Vec<&str> = path.split('.').collect();
    let Some(leaf) = keys.pop() else { return };

    let mut cur = self;

    for key in keys {
      if !cur.is_object() {
        *cur = Value::Object(Map::new());
      }
      cur = match cur {
        Value::Object(map) => map.entry(key.to_string()).or_insert_with(|| Value::Object(Map::new())),
        _ => return,
      };
    }

    if !cur.is_object() {
      *cur = Value::Object(Map::new());
    }
    if let Value::Object(map) = cur {
      map.insert(leaf.to_string(), value);
    }
  }

  fn take_path(&mut self, path: &str) -> Option<Value> {
    let (parent, leaf) = match path.rsplit_once('.') {
      Some((p, l)) => (Some(p), l),
      None => (None, path),
    };

    let mut cur = self;

    if let Some(parent) = parent {
      for key in parent.split('.') {
        cur = cur.get_mut(key)?;
      }
    }

    // shift_remove keeps the remaining keys in their original order
    cur.as_object_mut()?.shift_remove(leaf)
  }
}
