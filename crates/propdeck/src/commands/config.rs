use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    println!("{} {}", "Config file:".bold(), path.display());
    println!();

    let config = Config::load_or_default();
    println!(
        "  defaults.theme       {}",
        setting(config.defaults.as_ref().and_then(|d| d.theme.as_deref()), "light")
    );
    println!(
        "  defaults.transition  {}",
        setting(
            config.defaults.as_ref().and_then(|d| d.transition.as_deref()),
            "cascade"
        )
    );
    println!(
        "  api.base_url         {}",
        setting(
            config.api.as_ref().and_then(|a| a.base_url.as_deref()),
            crate::config::DEFAULT_BASE_URL
        )
    );
    println!();
    println!(
        "{}",
        "Change a value with `propdeck config set <key> <value>`.".dimmed()
    );
    Ok(())
}

fn setting(value: Option<&str>, default: &str) -> String {
    match value {
        Some(value) => value.to_string(),
        None => format!("{default} {}", "(default)".dimmed()),
    }
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {key} = {value}",
        "Updated".green().bold(),
    );
    println!("{}", format!("Saved to {}", path.display()).dimmed());
    Ok(())
}
