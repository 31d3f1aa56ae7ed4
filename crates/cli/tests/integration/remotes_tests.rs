//! Remotes command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, stub_body};

#[test]
fn remotes_outside_a_repository_fails() {
  let env = TestEnv::new();

  env
    .binstubs_cmd()
    .arg("remotes")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No Git remotes found."));
}

#[test]
fn remotes_creates_stubs_and_skips_heroku() {
  let env = TestEnv::new();
  if !env.git(&["init", "-q"]) {
    return;
  }
  assert!(env.git(&["remote", "add", "heroku", "git@heroku.com:acme.git"]));
  assert!(env.git(&["remote", "add", "staging", "https://git.heroku.com/acme-staging.git"]));
  assert!(env.git(&["remote", "add", "origin", "git@github.com:org/acme.git"]));

  env
    .binstubs_cmd()
    .arg("remotes")
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/heroku would be recursive: skipping"))
    .stdout(predicate::str::contains("bin/staging -> acme-staging"));

  assert_eq!(env.read_file("bin/staging"), stub_body("acme-staging"));
  assert!(!env.bin("heroku").exists());
  assert!(!env.bin("origin").exists());
}

#[test]
fn create_as_uses_heroku_remote() {
  let env = TestEnv::new();
  if !env.git(&["init", "-q"]) {
    return;
  }
  assert!(env.git(&["remote", "add", "heroku", "git@heroku.com:acme.git"]));

  env
    .binstubs_cmd()
    .args(["create", "--as", "prod"])
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/prod -> acme"));
}
