//! Create, all and setup command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, stub_body};

#[test]
fn create_writes_family_stubs() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging", "acme-qa", "other"]);

  env
    .binstubs_cmd()
    .arg("create")
    .arg("acme")
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/production -> acme"))
    .stdout(predicate::str::contains("bin/staging -> acme-staging"))
    .stdout(predicate::str::contains("bin/qa -> acme-qa"));

  assert_eq!(env.read_file("bin/production"), stub_body("acme"));
  assert_eq!(env.read_file("bin/staging"), stub_body("acme-staging"));
  assert!(!env.bin("other").exists());

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(env.bin("staging")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
  }
}

#[test]
fn create_with_full_names() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging"]);

  env.binstubs_cmd().args(["--full", "create", "acme"]).assert().success();

  assert!(env.bin("acme").exists());
  assert!(env.bin("acme-staging").exists());
  assert!(!env.bin("production").exists());
}

#[test]
fn create_into_custom_directory() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging"]);

  env
    .binstubs_cmd()
    .args(["-d", "script", "create", "--app", "acme"])
    .assert()
    .success()
    .stdout(predicate::str::contains("script/staging -> acme-staging"));

  assert_eq!(env.read_file("script/staging"), stub_body("acme-staging"));
}

#[test]
fn create_does_not_overwrite_foreign_files() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging"]);
  env.write_file("bin/staging", "#!/bin/sh\necho mine\n");

  env
    .binstubs_cmd()
    .args(["create", "acme"])
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/production -> acme"))
    .stderr(predicate::str::contains("bin/staging exists: not overwriting"));

  assert_eq!(env.read_file("bin/staging"), "#!/bin/sh\necho mine\n");
}

#[test]
fn create_overwrites_own_stubs() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging"]);
  env.write_file("bin/staging", &stub_body("acme-old"));

  env.binstubs_cmd().args(["create", "acme"]).assert().success();

  assert_eq!(env.read_file("bin/staging"), stub_body("acme-staging"));
}

#[test]
fn create_reports_unknown_family() {
  let env = TestEnv::new().with_apps(&["other"]);

  env
    .binstubs_cmd()
    .args(["create", "acme"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Couldn't find any apps named acme or acme-*."));

  assert!(!env.path().join("bin").exists());
}

#[test]
fn create_as_single_stub_needs_no_inventory() {
  let env = TestEnv::new();

  env
    .binstubs_cmd()
    .args(["create", "acme-edge", "--as", "edge"])
    .env_remove("HEROKU_API_KEY")
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/edge -> acme-edge"));

  assert_eq!(env.read_file("bin/edge"), stub_body("acme-edge"));
}

#[test]
fn create_without_api_key_fails() {
  let env = TestEnv::new();

  env
    .binstubs_cmd()
    .args(["create", "acme"])
    .env_remove("HEROKU_API_KEY")
    .assert()
    .failure()
    .stderr(predicate::str::contains("HEROKU_API_KEY"));
}

#[test]
fn create_json_report() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging"]);
  env.write_file("bin/staging", "not a binstub\n");

  let output = env
    .binstubs_cmd()
    .args(["--output", "json", "create", "acme"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["written"].as_array().unwrap().len(), 1);
  assert_eq!(report["written"][0]["app"], "acme");
  assert_eq!(report["conflicts"].as_array().unwrap().len(), 1);
}

#[test]
fn all_uses_full_names_with_prefix() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging", "beta"]);

  env
    .binstubs_cmd()
    .args(["all", "acme"])
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/acme -> acme"))
    .stdout(predicate::str::contains("bin/acme-staging -> acme-staging"));

  assert!(!env.bin("beta").exists());
  assert!(!env.bin("production").exists());
}

#[test]
fn all_without_prefix_covers_every_app() {
  let env = TestEnv::new().with_apps(&["acme", "beta"]);

  env.binstubs_cmd().arg("all").assert().success();

  assert_eq!(env.read_file("bin/acme"), stub_body("acme"));
  assert_eq!(env.read_file("bin/beta"), stub_body("beta"));
}

#[test]
fn setup_adds_remotes_for_each_stub() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging"]);
  if !env.git(&["init", "-q"]) {
    return;
  }

  env
    .binstubs_cmd()
    .args(["setup", "acme"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Git remote staging added"))
    .stdout(predicate::str::contains("Git remote production added"));

  let remotes = std::process::Command::new("git")
    .args(["remote", "-v"])
    .current_dir(env.path())
    .output()
    .unwrap();
  let remotes = String::from_utf8_lossy(&remotes.stdout);
  assert!(remotes.contains("staging\tgit@heroku.com:acme-staging.git"), "{remotes}");
  assert!(remotes.contains("production\tgit@heroku.com:acme.git"), "{remotes}");
}

#[test]
fn setup_outside_a_repository_only_writes_stubs() {
  let env = TestEnv::new().with_apps(&["acme", "acme-staging"]);

  env
    .binstubs_cmd()
    .args(["setup", "acme"])
    .assert()
    .success()
    .stdout(predicate::str::contains("bin/production -> acme"))
    .stdout(predicate::str::contains("bin/staging -> acme-staging"))
    .stdout(predicate::str::contains("Git remote").not());

  assert_eq!(env.read_file("bin/production"), stub_body("acme"));
  assert_eq!(env.read_file("bin/staging"), stub_body("acme-staging"));
  assert!(!env.path().join(".git").exists());
}
