//! Tests for command dispatch against a table on disk

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clap::Parser;
use tempfile::TempDir;

use alloctree::cli::commands::execute_command;
use alloctree::cli::{Cli, CliError};
use alloctree::config::Settings;
use alloctree::exitcode;
use alloctree::infrastructure::di::ServiceContainer;
use alloctree::infrastructure::traits::{Confirmer, FixedConfirmer, RealFileSystem};
use alloctree::util::testing::init_test_setup;

const TABLE: &str = r#"
[[rows]]
id = "parent"
label = "Parent"

  [[rows.children]]
  id = "x"
  label = "X"
  value = 30.0

  [[rows.children]]
  id = "y"
  label = "Y"
  value = 70.0
"#;

/// Answers a fixed value and counts how often it was asked.
struct CountingConfirmer {
    answer: bool,
    asked: AtomicUsize,
}

impl Confirmer for CountingConfirmer {
    fn confirm(&self, _question: &str) -> io::Result<bool> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

struct Fixture {
    _dir: TempDir,
    table: PathBuf,
}

fn fixture() -> Fixture {
    init_test_setup();
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("table.toml");
    fs::write(&table, TABLE).unwrap();
    Fixture { _dir: dir, table }
}

fn container(confirmer: Arc<dyn Confirmer>) -> ServiceContainer {
    ServiceContainer::with_deps(Settings::default(), Arc::new(RealFileSystem), confirmer)
}

fn run(args: &[&str], container: &ServiceContainer) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("arguments parse");
    execute_command(&cli, container)
}

#[test]
fn given_value_command_when_executing_then_succeeds() {
    let f = fixture();
    let table = f.table.to_str().unwrap();
    let container = container(Arc::new(FixedConfirmer(false)));

    let result = run(&["alloctree", "-f", table, "value", "parent", "200"], &container);

    assert!(result.is_ok());
}

#[test]
fn given_percent_command_when_executing_then_succeeds() {
    let f = fixture();
    let table = f.table.to_str().unwrap();
    let container = container(Arc::new(FixedConfirmer(false)));

    assert!(run(&["alloctree", "-f", table, "percent", "x", "10"], &container).is_ok());
    assert!(run(&["alloctree", "-f", table, "percent", "x", "0"], &container).is_ok());
}

#[test]
fn given_zero_value_without_yes_when_executing_then_asks_once() {
    let f = fixture();
    let table = f.table.to_str().unwrap();
    let confirmer = Arc::new(CountingConfirmer {
        answer: false,
        asked: AtomicUsize::new(0),
    });
    let container = container(confirmer.clone());

    let result = run(&["alloctree", "-f", table, "value", "parent", "0"], &container);

    assert!(result.is_ok());
    assert_eq!(confirmer.asked.load(Ordering::SeqCst), 1);
}

#[test]
fn given_zero_value_with_yes_when_executing_then_does_not_ask() {
    let f = fixture();
    let table = f.table.to_str().unwrap();
    let confirmer = Arc::new(CountingConfirmer {
        answer: false,
        asked: AtomicUsize::new(0),
    });
    let container = container(confirmer.clone());

    let result = run(
        &["alloctree", "-f", table, "value", "parent", "0", "--yes"],
        &container,
    );

    assert!(result.is_ok());
    assert_eq!(confirmer.asked.load(Ordering::SeqCst), 0);
}

#[test]
fn given_negative_value_when_executing_then_usage_exit_code() {
    let f = fixture();
    let table = f.table.to_str().unwrap();
    let container = container(Arc::new(FixedConfirmer(true)));

    let err = run(&["alloctree", "-f", table, "value", "x", "-5"], &container).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_unknown_row_when_executing_then_usage_exit_code() {
    let f = fixture();
    let table = f.table.to_str().unwrap();
    let container = container(Arc::new(FixedConfirmer(true)));

    let err = run(&["alloctree", "-f", table, "value", "nope", "5"], &container).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_missing_table_when_executing_then_noinput_exit_code() {
    let f = fixture();
    let missing = f.table.with_file_name("absent.toml");
    let container = container(Arc::new(FixedConfirmer(true)));

    let err = run(
        &["alloctree", "-f", missing.to_str().unwrap(), "show"],
        &container,
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_show_and_tree_when_executing_then_succeed() {
    let f = fixture();
    let table = f.table.to_str().unwrap();
    let container = container(Arc::new(FixedConfirmer(true)));

    assert!(run(&["alloctree", "-f", table, "show"], &container).is_ok());
    assert!(run(&["alloctree", "-f", table, "tree"], &container).is_ok());
}

#[test]
fn given_no_subcommand_when_executing_then_usage_error() {
    init_test_setup();
    let container = container(Arc::new(FixedConfirmer(true)));

    let err = run(&["alloctree"], &container).unwrap_err();

    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}
