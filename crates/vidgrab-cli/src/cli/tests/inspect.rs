//! Tests for fetch, search and the probe subcommands.

use super::parse;
use crate::cli::{CliCommand, DEFAULT_SAVE_PATH};
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_fetch_default_save() {
    match parse(&["vidgrab", "fetch", "https://www.douyin.com/video/1"]) {
        CliCommand::Fetch { url, cookies, save } => {
            assert_eq!(url, "https://www.douyin.com/video/1");
            assert!(cookies.is_none());
            assert_eq!(save, PathBuf::from(DEFAULT_SAVE_PATH));
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_save_and_cookies() {
    match parse(&[
        "vidgrab",
        "fetch",
        "https://x/1",
        "--save",
        "out.html",
        "--cookies",
        "c.txt",
    ]) {
        CliCommand::Fetch { cookies, save, .. } => {
            assert_eq!(save, PathBuf::from("out.html"));
            assert_eq!(cookies.as_deref(), Some(Path::new("c.txt")));
        }
        _ => panic!("expected Fetch with --save"),
    }
}

#[test]
fn cli_parse_search() {
    match parse(&["vidgrab", "search", "page.html"]) {
        CliCommand::Search { file, verbose } => {
            assert_eq!(file, PathBuf::from("page.html"));
            assert!(!verbose);
        }
        _ => panic!("expected Search"),
    }
    match parse(&["vidgrab", "search", "-v", "page.html"]) {
        CliCommand::Search { verbose, .. } => assert!(verbose),
        _ => panic!("expected Search -v"),
    }
}

#[test]
fn cli_parse_probes() {
    match parse(&["vidgrab", "probe-page", "https://x/1", "--cookies", "c.txt"]) {
        CliCommand::ProbePage { url, cookies } => {
            assert_eq!(url, "https://x/1");
            assert_eq!(cookies.as_deref(), Some(Path::new("c.txt")));
        }
        _ => panic!("expected ProbePage"),
    }
    match parse(&["vidgrab", "probe-api", "7300000000000000001"]) {
        CliCommand::ProbeApi { input, cookies } => {
            assert_eq!(input, "7300000000000000001");
            assert!(cookies.is_none());
        }
        _ => panic!("expected ProbeApi"),
    }
}
