//! Argument parsing of the one-shot subcommands.

use std::path::PathBuf;

use clap::Parser;
use codeconv_cli::{Cli, Commands, ConfigCommand, LogsCommand, ServerCommand};

#[test]
fn convert_takes_file_and_range() {
    let cli = Cli::try_parse_from([
        "codeconv",
        "convert",
        "src/OrderDao.java",
        "-s",
        "10",
        "--end",
        "42",
        "--target-language",
        "java",
        "-o",
        "out/OrderDao.java",
    ])
    .unwrap();

    let Some(Commands::Convert {
        file,
        start,
        end,
        target_language,
        output,
        source_language,
        vo_path,
    }) = cli.command
    else {
        panic!("expected convert");
    };
    assert_eq!(file, PathBuf::from("src/OrderDao.java"));
    assert_eq!((start, end), (10, 42));
    assert_eq!(target_language.as_deref(), Some("java"));
    assert_eq!(output, Some(PathBuf::from("out/OrderDao.java")));
    assert!(source_language.is_none());
    assert!(vo_path.is_none());
}

#[test]
fn convert_requires_a_range() {
    assert!(Cli::try_parse_from(["codeconv", "convert", "Dao.java", "--start", "3"]).is_err());
}

#[test]
fn make_vo_paths_are_optional() {
    let cli = Cli::try_parse_from(["codeconv", "make-vo", "-p", "/work/shop-api"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::MakeVo { project: Some(_), output: None })
    ));
}

#[test]
fn nested_subcommands() {
    let cli = Cli::try_parse_from(["codeconv", "server", "run", "--entry", "api/server.py"]).unwrap();
    let Some(Commands::Server {
        command: ServerCommand::Run { entry },
    }) = cli.command
    else {
        panic!("expected server run");
    };
    assert_eq!(entry, Some(PathBuf::from("api/server.py")));

    let cli = Cli::try_parse_from(["codeconv", "logs", "tail"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Logs {
            command: LogsCommand::Tail { path: None }
        })
    ));
}

#[test]
fn config_set_without_values_is_detected() {
    let cli = Cli::try_parse_from(["codeconv", "config", "set"]).unwrap();
    let Some(Commands::Config { command }) = cli.command else {
        panic!("expected config");
    };
    assert!(command.is_empty_set());

    let cli = Cli::try_parse_from(["codeconv", "config", "set", "--timeout-ms", "0"]).unwrap();
    let Some(Commands::Config { command }) = cli.command else {
        panic!("expected config");
    };
    assert!(matches!(command, ConfigCommand::Set { timeout_ms: Some(0), .. }));
    assert!(!command.is_empty_set());
}
