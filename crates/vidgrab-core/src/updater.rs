//! Upgrade the external downloader (yt-dlp) the site extractor falls back on.
//!
//! Runs `<python> -m pip install --upgrade <package>`, then asks the package
//! for its version, and optionally runs a standalone binary's `-U`
//! self-update. Step failures are recorded in the report; only failing to
//! spawn pip at all is an error.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};

use crate::config::UpdaterConfig;

/// Outcome of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for StepOutput {
    fn from(out: Output) -> Self {
        Self {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeReport {
    pub pip: StepOutput,
    /// `<package> --version` output after a successful pip run.
    pub version: Option<StepOutput>,
    /// `<local_binary> -U`, when configured. `Err` if it could not be spawned.
    pub local_binary: Option<Result<StepOutput, String>>,
}

impl UpgradeReport {
    /// Trimmed version string, when the version check succeeded.
    pub fn installed_version(&self) -> Option<&str> {
        self.version
            .as_ref()
            .filter(|v| v.success && !v.stdout.is_empty())
            .map(|v| v.stdout.as_str())
    }
}

pub fn pip_upgrade_command(cfg: &UpdaterConfig) -> Command {
    let mut cmd = Command::new(&cfg.python);
    cmd.args(["-m", "pip", "install", "--upgrade", &cfg.package]);
    cmd
}

pub fn version_command(cfg: &UpdaterConfig) -> Command {
    let mut cmd = Command::new(&cfg.package);
    cmd.arg("--version");
    cmd
}

pub fn self_update_command(binary: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.arg("-U");
    cmd
}

pub fn upgrade(cfg: &UpdaterConfig) -> Result<UpgradeReport> {
    tracing::info!("upgrading {} via {} -m pip", cfg.package, cfg.python);
    let pip: StepOutput = pip_upgrade_command(cfg)
        .output()
        .with_context(|| format!("run {} -m pip", cfg.python))?
        .into();

    let version = if pip.success {
        match version_command(cfg).output() {
            Ok(out) => Some(StepOutput::from(out)),
            Err(e) => {
                tracing::warn!("{} --version failed to start: {}", cfg.package, e);
                Some(StepOutput {
                    success: false,
                    stdout: String::new(),
                    stderr: e.to_string(),
                })
            }
        }
    } else {
        tracing::warn!("pip upgrade of {} failed: {}", cfg.package, pip.stderr);
        None
    };

    let local_binary = cfg.local_binary.as_deref().map(|bin| {
        self_update_command(bin)
            .output()
            .map(StepOutput::from)
            .map_err(|e| format!("{}: {}", bin.display(), e))
    });

    Ok(UpgradeReport {
        pip,
        version,
        local_binary,
    })
}
