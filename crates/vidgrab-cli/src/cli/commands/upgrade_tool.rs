//! `vidgrab upgrade-tool` – upgrade yt-dlp and report the installed version.

use anyhow::Result;
use vidgrab_core::config::VidgrabConfig;
use vidgrab_core::updater::{self, StepOutput};

fn print_step(label: &str, step: &StepOutput) {
    println!("{}: {}", label, if step.success { "ok" } else { "failed" });
    if !step.success && !step.stderr.is_empty() {
        println!("{}", step.stderr);
    }
}

pub fn run_upgrade_tool(cfg: &VidgrabConfig) -> Result<()> {
    let report = updater::upgrade(&cfg.updater)?;
    print_step("pip upgrade", &report.pip);
    match report.installed_version() {
        Some(v) => println!("{} version: {}", cfg.updater.package, v),
        None => {
            if let Some(step) = &report.version {
                print_step("version check", step);
            }
        }
    }
    match &report.local_binary {
        Some(Ok(step)) => print_step("local binary self-update", step),
        Some(Err(e)) => println!("local binary self-update: could not run {}", e),
        None => {}
    }
    Ok(())
}
