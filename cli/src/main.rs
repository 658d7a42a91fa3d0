mod args;
mod check_view;
mod global_settings;
mod kinds_view;
pub mod tables;

use crate::args::build_cli;
use crate::check_view::check_view;
use crate::global_settings::GlobalSettings;
use crate::kinds_view::kinds_view;
use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use purse_lib::{asset_kinds::AssetKind, scenarios::Scenario};
use std::path::Path;

/// Route log messages through the progress bars, so that they do not
/// garble each other.
fn init_logger(settings: &GlobalSettings) -> Result<MultiProgress> {
    let logger = env_logger::Builder::new()
        .filter_level(settings.log_level)
        .parse_default_env()
        .build();
    let level = logger.filter();
    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), logger).try_init()?;
    log::set_max_level(level);
    Ok(multi)
}

fn check(
    path: &Path,
    auto_correct: bool,
    multi: &MultiProgress,
    settings: &GlobalSettings,
) -> Result<bool> {
    let mut scenario = Scenario::from_path(path)
        .with_context(|| format!("Cannot load {}", path.display()))?;
    if auto_correct {
        scenario.auto_correct();
    }

    let progress = multi.add(
        ProgressBar::new(1) //  we do not know the length
            .with_style(
                ProgressStyle::with_template(
                    "[{pos:3}/{len:3}] {msg} {wide_bar} {elapsed_precise}",
                )?,
            )
            .with_message("checking"),
    );
    let report = scenario.check(|current, max| {
        progress.set_length(max);
        progress.set_position(current);
    });
    progress.finish_and_clear();

    println!("{}", check_view(&report, settings));
    Ok(report.is_ok())
}

fn main() -> Result<()> {
    let args = build_cli().get_matches();
    let settings = GlobalSettings::new(&args);
    let multi = init_logger(&settings)?;

    match args.subcommand() {
        Some(("classify", sub)) => {
            let kind = |name: &str| -> Result<AssetKind> {
                Ok(sub
                    .get_one::<String>(name)
                    .context("missing argument")?
                    .parse::<AssetKind>()?)
            };
            let account = kind("account")?;
            let partner = kind("partner")?;
            println!("{account} -> {partner}: {}", account.classify(partner));
        }
        Some(("kinds", _)) => {
            println!("{}", kinds_view(&settings));
        }
        Some(("check", sub)) => {
            let file = sub
                .get_one::<String>("FILE")
                .context("missing scenario file")?;
            if !check(
                Path::new(file),
                sub.get_flag("auto-correct"),
                &multi,
                &settings,
            )? {
                std::process::exit(1);
            }
        }
        Some(("completions", sub)) => {
            if let Some(shell) =
                sub.get_one::<clap_complete_command::Shell>("shell")
            {
                shell.generate(&mut build_cli(), &mut std::io::stdout());
            }
        }
        Some((cmd, _)) => {
            anyhow::bail!("Unknown command {cmd}");
        }
        None => {}
    }

    Ok(())
}
