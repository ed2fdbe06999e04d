use predicates::prelude::*;
use test_support::Sandbox;

fn assert_rejected(args: &[&str], message: &str) {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(args)
    .assert()
    .failure()
    .stderr(predicate::str::contains(message));
  assert!(!sandbox.path().join("demo").exists(), "{args:?} created the project directory");
}

#[test]
fn errors_when_no_project_name() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["--git", "--readme"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("a project name is required"));
  assert_eq!(std::fs::read_dir(sandbox.path()).unwrap().count(), 0);
}

#[test]
fn github_requires_git() {
  assert_rejected(&["demo", "--github"], "--github requires --git");
}

#[test]
fn public_requires_github() {
  assert_rejected(&["demo", "--git", "--public"], "--public requires --github");
}

#[test]
fn lint_staged_requires_git() {
  assert_rejected(&["demo", "--lint-staged", "--prettier"], "--lint-staged requires --git");
}

#[test]
fn lint_staged_requires_a_tool() {
  assert_rejected(&["demo", "--git", "--lint-staged"], "--lint-staged requires --prettier or --eslint");
}

#[test]
fn lint_staged_accepts_an_existing_repository() {
  let sandbox = Sandbox::new();
  let project = sandbox.path().join("demo");
  test_support::init_repo(&project);

  // passes validation; the run then stops on npm, so only the message matters here
  let out = sandbox
    .cmd()
    .args(["demo", "--lint-staged", "--eslint"])
    .env("PATH", "")
    .output()
    .unwrap();
  let err = String::from_utf8_lossy(&out.stderr);
  assert!(!err.contains("--lint-staged requires --git"), "{err}");
}

#[test]
fn missing_program_is_reported_before_any_step() {
  let sandbox = Sandbox::new();
  sandbox
    .cmd()
    .args(["demo", "--git"])
    .env("PATH", "")
    .assert()
    .failure()
    .stderr(predicate::str::contains("required program 'git' was not found"));
  assert!(!sandbox.path().join("demo").exists());
}
