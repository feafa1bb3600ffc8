pub mod config;
pub mod logging;

pub mod cookies;
pub mod downloader;
pub mod extractor;
pub mod fetch;
pub mod probe;
pub mod resolver;
pub mod updater;
pub mod url_model;
