use jsonschema::validator_for;
use serde_json::json;

fn compile_schema() -> jsonschema::Validator {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("schemas").join("presets.schema.json");
  let data = std::fs::read(&path).expect("schema file");
  let schema: serde_json::Value = serde_json::from_slice(&data).expect("valid schema JSON");
  validator_for(&schema).expect("compile schema")
}

#[test]
fn example_presets_conform_to_schema() {
  let presets: serde_json::Value = test_support::read_fixture_json("presets.json");
  compile_schema()
    .validate(&presets)
    .expect("schema validation failed for presets fixture");
}

#[test]
fn unknown_keys_and_wrong_types_are_rejected() {
  let compiled = compile_schema();
  assert!(!compiled.is_valid(&json!({ "presets": { "a": { "flags": ["--git"], "colour": "red" } } })));
  assert!(!compiled.is_valid(&json!({ "presets": { "a": { "flags": [1] } } })));
  assert!(!compiled.is_valid(&json!({ "presets": { "a": { "flags": [], "extends": "" } } })));
  assert!(compiled.is_valid(&json!({ "presets": {} })));
}

#[test]
fn fixture_presets_are_listed_by_the_cli() {
  let sandbox = test_support::Sandbox::new();
  sandbox.write_presets(&test_support::read_fixture_text("presets.json"));
  let out = sandbox.cmd().arg("--list-presets").output().unwrap();
  assert!(out.status.success());
  let s = String::from_utf8_lossy(&out.stdout);
  assert!(s.contains("api (extends node-lib-hooks): --esm --dependencies fastify pino"));
}
