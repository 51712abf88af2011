use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

/// Run siteconf against `dir/settings` with a clean environment.
fn siteconf(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("siteconf");
    cmd.current_dir(dir.path())
        .env_clear()
        .env("NO_COLOR", "1")
        .env("ROOT_DIR", dir.path())
        .arg("--settings-dir")
        .arg(dir.path().join("settings"));
    cmd
}

fn settings_dir(dir: &assert_fs::TempDir) -> assert_fs::fixture::ChildPath {
    let settings = dir.child("settings");
    settings.create_dir_all().unwrap();
    settings
}

fn resolve_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "resolve failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn development_extends_hosts_and_uses_console_email() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    let settings = resolve_json(siteconf(&dir).args(["--profile", "development", "resolve"]));

    assert_eq!(
        settings["ALLOWED_HOSTS"],
        serde_json::json!(["example.org", "127.0.0.1", "localhost", ".example.com", "vagrant"])
    );
    assert_eq!(settings["EMAIL_BACKEND"], "console");
    assert_eq!(settings["LOGGING"]["handlers"]["mail_admins"]["email_backend"], "dummy");
    assert_eq!(settings["CELERY_ALWAYS_EAGER"], true);
    assert_eq!(settings["DEBUG"], true);
}

#[test]
fn development_logs_startup_after_resolving() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    siteconf(&dir)
        .arg("resolve")
        .assert()
        .success()
        .stderr(predicate::str::contains("Settings resolved"))
        .stderr(predicate::str::contains("Startup complete"));
}

#[test]
fn quiet_silences_console_logging() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    siteconf(&dir)
        .args(["-q", "resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALLOWED_HOSTS"))
        .stderr(predicate::str::contains("Settings resolved").not())
        .stderr(predicate::str::contains("Startup complete").not());
}

#[test]
fn quiet_keeps_file_logging() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    siteconf(&dir)
        .env("EMAIL_HOST_PASSWORD", "secret123")
        .env("RAVEN_CONFIG_DSN", "https://key@sentry.example.org/7")
        .args(["--quiet", "--profile", "production", "resolve"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Startup complete").not());

    dir.child("logs/website.log")
        .assert(predicate::str::contains("Startup complete"));
}

#[test]
fn profile_can_come_from_environment() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    let settings = resolve_json(siteconf(&dir).env("SITECONF_PROFILE", "testing").arg("resolve"));

    assert_eq!(settings["TASKER_ALWAYS_EAGER"], true);
    assert_eq!(settings["EMAIL_BACKEND"], "smtp");
}

#[test]
fn process_environment_beats_env_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir)
        .child(".env")
        .write_str("DEBUG=True\nEMAIL_HOST=mx.example.org\n")
        .unwrap();

    let settings = resolve_json(siteconf(&dir).env("DEBUG", "False").arg("resolve"));

    assert_eq!(settings["DEBUG"], false);
    assert_eq!(settings["EMAIL_HOST"], "mx.example.org");
}

#[test]
fn testing_forces_eager_flags() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir)
        .child("testing.env")
        .write_str("ALLOWED_HOSTS=testserver\n")
        .unwrap();

    let settings = resolve_json(siteconf(&dir).args(["--profile", "testing", "resolve"]));

    assert_eq!(settings["CELERY_ALWAYS_EAGER"], true);
    assert_eq!(settings["CELERY_EAGER_PROPAGATES_EXCEPTIONS"], true);
    assert_eq!(settings["TASKER_ALWAYS_EAGER"], true);
    assert_eq!(settings["ALLOWED_HOSTS"], serde_json::json!(["testserver"]));
}

#[test]
fn production_without_password_fails_before_startup() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir)
        .child("production.env")
        .write_str("RAVEN_CONFIG_DSN=https://key@sentry.example.org/7\n")
        .unwrap();

    siteconf(&dir)
        .args(["--profile", "production", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EMAIL_HOST_PASSWORD"))
        .stderr(predicate::str::contains("Settings resolved").not())
        .stderr(predicate::str::contains("Startup complete").not());

    dir.child("logs").assert(predicate::path::missing());
}

#[test]
fn production_resolves_secrets_and_writes_log_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir)
        .child("production.env")
        .write_str(
            "EMAIL_HOST_PASSWORD=secret123\n\
             RAVEN_CONFIG_DSN=https://key@sentry.example.org/7\n",
        )
        .unwrap();

    let settings = resolve_json(siteconf(&dir).args(["--profile", "production", "resolve", "--show-secrets"]));

    assert_eq!(settings["EMAIL_HOST_PASSWORD"], "secret123");
    assert_eq!(settings["DEBUG"], false);
    assert_eq!(settings["RAVEN_CONFIG"]["dsn"], "https://key@sentry.example.org/7");
    assert_eq!(settings["RAVEN_CONFIG"]["release"], env!("CARGO_PKG_VERSION"));
    assert_eq!(settings["LOGGING"]["root"]["handlers"], serde_json::json!(["console", "file"]));
    assert_eq!(settings["LOGGING"]["handlers"]["file"]["maxBytes"], 4 * 1024 * 1024);
    assert_eq!(settings["LOGGING"]["handlers"]["file"]["backupCount"], 3);

    dir.child("logs").assert(predicate::path::is_dir());
    dir.child("logs/website.log")
        .assert(predicate::str::contains("Startup complete"));
}

#[test]
fn production_output_is_redacted_by_default() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    siteconf(&dir)
        .env("EMAIL_HOST_PASSWORD", "secret123")
        .env("RAVEN_CONFIG_DSN", "https://key@sentry.example.org/7")
        .args(["--profile", "production", "resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[REDACTED]"))
        .stdout(predicate::str::contains("secret123").not())
        .stdout(predicate::str::contains("sentry.example.org").not());
}

#[test]
fn malformed_env_file_reports_line() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir)
        .child(".env")
        .write_str("DEBUG=True\nthis is not a setting\n")
        .unwrap();

    siteconf(&dir)
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains(".env"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn toml_output_written_to_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    siteconf(&dir)
        .args(["resolve", "--format", "toml", "--output", "resolved.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("written to resolved.toml"));

    dir.child("resolved.toml")
        .assert(predicate::str::contains("EMAIL_BACKEND = \"console\""));
}

#[test]
fn base_file_is_merged_over_defaults() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir)
        .child("base.toml")
        .write_str("DEFAULT_FROM_EMAIL = \"noreply@example.org\"\n")
        .unwrap();

    let settings = resolve_json(siteconf(&dir).arg("resolve"));

    assert_eq!(settings["DEFAULT_FROM_EMAIL"], "noreply@example.org");
}

#[test]
fn unknown_profile_is_rejected() {
    let dir = assert_fs::TempDir::new().unwrap();
    settings_dir(&dir);

    siteconf(&dir)
        .args(["--profile", "staging", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}
