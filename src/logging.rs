//! Logger setup.

use std::str::FromStr;

use anyhow::Context;
use log::LevelFilter;

/// Parses a level name, falling back to `Info` for anything unknown.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Installs a stdout logger. `RUST_LOG`, when set to a plain level name,
/// takes precedence over `level`.
pub fn init(level: &str) -> anyhow::Result<()> {
    let level = std::env::var("RUST_LOG")
        .map(|env| parse_level(&env))
        .unwrap_or_else(|_| parse_level(level));

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("egui_glow", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()
        .context("logger already installed")?;

    log::debug!("Logging at {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
    }

    #[test]
    fn unknown_level_defaults_to_info() {
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }
}
