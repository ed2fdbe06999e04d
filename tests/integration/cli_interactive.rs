use predicates::prelude::*;
use test_support::Sandbox;

#[test]
fn interactive_answers_fill_in_missing_flags() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["demo", "-i"])
    .write_stdin("maybe\nesm\n\n\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("is not a module type"));

  let manifest: serde_json::Value =
    serde_json::from_slice(&std::fs::read(sandbox.path().join("demo").join("package.json")).unwrap()).unwrap();
  assert_eq!(manifest["type"], "module");
}

#[test]
fn interactive_dependencies_are_verified() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["demo", "-i", "--esm"])
    .env("BOOTSTRAP_TEST_MISSING_PACKAGES", "ghost-pkg")
    .write_stdin("ghost-pkg\n\n")
    .assert()
    .failure()
    .stderr(predicate::str::contains("ghost-pkg"));
  assert!(!sandbox.path().join("demo").exists());
}

#[test]
fn closed_input_aborts_the_prompt() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["demo", "-i"])
    .write_stdin("")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no valid answer"));
  assert!(!sandbox.path().join("demo").exists());
}
