use std::path::PathBuf;

use clap::Parser;

/// Colloquy: a multi-turn chat client for Azure AI inference endpoints.
#[derive(Parser, Debug)]
#[command(name = "colloquy", version, about)]
pub struct Args {
    /// Settings file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. debug, colloquy_ai=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Initial system prompt, overriding the settings file.
    #[arg(long)]
    pub system_prompt: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::parse_from([
            "colloquy",
            "--config",
            "/tmp/colloquy.toml",
            "--log-level",
            "debug",
            "--system-prompt",
            "Be brief.",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/colloquy.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.system_prompt.as_deref(), Some("Be brief."));
    }

    #[test]
    fn flags_are_optional() {
        let args = Args::parse_from(["colloquy"]);
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
        assert!(args.system_prompt.is_none());
    }
}
