use predicates::prelude::*;
use test_support::Sandbox;

#[test]
fn missing_packages_abort_before_the_directory_exists() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["demo", "--git", "--dependencies", "left-pad fastify"])
    .env("BOOTSTRAP_TEST_MISSING_PACKAGES", "left-pad")
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found in the npm registry: left-pad"))
    .stderr(predicate::str::contains("fastify").not());
  assert!(!sandbox.path().join("demo").exists());
}

#[test]
fn every_missing_package_is_named() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["demo", "--dependencies", "express nope-a", "--dev-dependencies", "nope-b"])
    .env("BOOTSTRAP_TEST_MISSING_PACKAGES", "nope-a nope-b")
    .assert()
    .failure()
    .stderr(predicate::str::contains("nope-a, nope-b"));
}

#[test]
fn malformed_package_names_are_rejected() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["demo", "--dev-dependencies", "Bad_Name!"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid package name(s): Bad_Name!"));
  assert!(!sandbox.path().join("demo").exists());
}
