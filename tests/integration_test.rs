use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;
use logwire::config::Config;
use logwire::environment::EnvironmentSnapshot;
use logwire::handler::{ConsoleHandler, Handler};
use logwire::level::Level;
use logwire::setup;

/// Concatenated contents of every file in `dir` (rotated files carry a date).
fn read_logs(dir: &Path) -> String {
    let mut out = String::new();
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            out.push_str(&std::fs::read_to_string(path).unwrap());
        }
    }
    out
}

fn run_cli(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logwire"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("LOGWIRE_CONFIG")
        .env_remove("REQUEST_URI")
        .output()
        .expect("Failed to run logwire binary")
}

#[test]
fn test_end_to_end_runtime_logging() {
    let root = tempfile::tempdir().unwrap();
    let logdir = root.path().join("x");
    let logfile = logdir.join("app.log");

    let config = Config::new("app", &logfile, Level::Info, false, true, Some(5));
    let env = EnvironmentSnapshot::from_vars([
        ("REQUEST_METHOD", "GET"),
        ("REQUEST_URI", "/reports/42"),
        ("REMOTE_ADDR", "198.51.100.7"),
        ("HTTP_ACCEPT", "text/html"),
    ]);
    let setup = setup::setup(config, env);
    let guard = setup.runtime.expect("runtime guard armed");

    let logger = setup.provider.logger().unwrap();
    assert_eq!(logger.name(), "app");
    assert_eq!(logger.handlers().len(), 2);
    assert!(matches!(*logger.handlers()[0], Handler::RotatingFile(_)));
    assert!(matches!(*logger.handlers()[1], Handler::Console(ConsoleHandler::Inert { .. })));
    assert_eq!(logger.processors().len(), 1);
    assert!(Arc::ptr_eq(&logger, &setup.provider.logger().unwrap()));

    guard.finish().unwrap();

    let log = read_logs(&logdir);
    let line = log.lines().find(|l| l.contains("Finished")).expect("Finished record");
    assert!(line.contains("app.INFO: Finished"));
    assert!(line.contains("\"runtime\":\""));
    assert!(line.contains("ms\""));
    assert!(line.contains("\"url\":\"/reports/42\""));
    assert!(line.contains("\"http_method\":\"GET\""));
    assert!(line.contains("\"ip\":\"198.51.100.7\""));
    assert!(!line.contains("HTTP_ACCEPT"));
}

#[test]
fn test_runtime_guard_builds_logger_on_demand() {
    let root = tempfile::tempdir().unwrap();
    let config = Config::new("cron", root.path().join("logs").join("cron.log"), Level::Debug, false, true, None);
    let setup = setup::setup(config, EnvironmentSnapshot::default());

    assert!(!setup.provider.is_built());
    drop(setup.runtime);
    assert!(setup.provider.is_built());

    let log = read_logs(&root.path().join("logs"));
    assert_eq!(log.lines().filter(|l| l.contains("cron.INFO: Finished")).count(), 1);
}

#[test]
fn test_cli_writes_message_and_runtime() {
    let root = tempfile::tempdir().unwrap();
    let output = run_cli(
        root.path(),
        &["--name", "cli", "--logfile", "var/log/cli.log", "--log-runtime", "--level", "warning", "disk low"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let log = read_logs(&root.path().join("var").join("log"));
    assert!(log.contains("cli.WARNING: disk low"));
    assert!(log.contains("cli.INFO: Finished"));
}

#[test]
fn test_cli_reads_toml_config() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(
        root.path().join("logwire.toml"),
        "name = \"svc\"\nlogfile = \"out/svc.log\"\nloglevel = \"error\"\nrotation = \"never\"\n",
    )
    .unwrap();

    let output = run_cli(root.path(), &["--level", "info", "not written"]);
    assert!(output.status.success());
    let output = run_cli(root.path(), &["--level", "critical", "written"]);
    assert!(output.status.success());

    let log = std::fs::read_to_string(root.path().join("out").join("svc.log")).unwrap();
    assert!(!log.contains("not written"));
    assert!(log.contains("svc.CRITICAL: written"));
}

#[test]
fn test_cli_exits_with_server_error_when_directory_cannot_be_created() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("blocker"), b"plain file").unwrap();

    let output = run_cli(root.path(), &["--logfile", "blocker/app.log", "hello"]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Status: 500"));
    assert!(stdout.contains("Could not create logfile directory."));
    assert!(!root.path().join("blocker").is_dir());
}
