//! Tests for the download subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_download_defaults() {
    match parse(&["vidgrab", "download", "https://www.douyin.com/video/7300000000000000001"]) {
        CliCommand::Download {
            url,
            cookies,
            output_dir,
            index,
            via_api,
        } => {
            assert_eq!(url, "https://www.douyin.com/video/7300000000000000001");
            assert!(cookies.is_none());
            assert!(output_dir.is_none());
            assert_eq!(index, 0);
            assert!(!via_api);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_all_flags() {
    match parse(&[
        "vidgrab",
        "download",
        "7300000000000000001",
        "--cookies",
        "cookies.txt",
        "--output-dir",
        "/tmp/videos",
        "--index",
        "2",
        "--via-api",
    ]) {
        CliCommand::Download {
            url,
            cookies,
            output_dir,
            index,
            via_api,
        } => {
            assert_eq!(url, "7300000000000000001");
            assert_eq!(cookies.as_deref(), Some(Path::new("cookies.txt")));
            assert_eq!(output_dir.as_deref(), Some(Path::new("/tmp/videos")));
            assert_eq!(index, 2);
            assert!(via_api);
        }
        _ => panic!("expected Download with flags"),
    }
}

#[test]
fn cli_parse_download_rejects_bad_index() {
    assert!(Cli::try_parse_from(["vidgrab", "download", "u", "--index", "-1"]).is_err());
    assert!(Cli::try_parse_from(["vidgrab", "download"]).is_err());
}

#[test]
fn cli_parse_upgrade_tool() {
    assert!(matches!(
        parse(&["vidgrab", "upgrade-tool"]),
        CliCommand::UpgradeTool
    ));
}

#[test]
fn cli_parse_completions() {
    match parse(&["vidgrab", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
    assert!(Cli::try_parse_from(["vidgrab", "completions", "tcsh"]).is_err());
}
