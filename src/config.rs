//! Configuration: terminal screen settings, colors, logging and the CLI.

use crate::buffer::Rgb;
use crate::calc::ChainMode;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Application name shown on the hint line.
pub const APP_NAME: &str = "iCalci";

/// One-line description of the application.
pub const APP_DESCRIPTION: &str = "Apple Calculator clone";

/// Terminal screen configuration.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Upper bound on repaints per second.
    pub target_fps: u32,
    /// How long the input thread waits before re-checking for shutdown.
    pub input_poll_timeout: Duration,
    /// Whether keys can be clicked with the mouse.
    pub enable_mouse: bool,
    /// Whether to draw on the alternate screen.
    pub alternate_screen: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

/// Colors of the panel, display and key families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Panel background.
    pub background: Rgb,
    /// Display text.
    pub display_fg: Rgb,
    /// Digit and decimal point keys.
    pub number_bg: Rgb,
    /// Digit key labels.
    pub number_fg: Rgb,
    /// `AC`, `±` and `%` keys.
    pub function_bg: Rgb,
    /// Function key labels.
    pub function_fg: Rgb,
    /// Operator and `=` keys.
    pub operator_bg: Rgb,
    /// Operator key labels.
    pub operator_fg: Rgb,
    /// Background of the lit operator key.
    pub highlight_bg: Rgb,
    /// Label of the lit operator key.
    pub highlight_fg: Rgb,
    /// Hint line text.
    pub hint_fg: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            display_fg: Rgb::WHITE,
            number_bg: Rgb::from_u32(0x52_52_52),
            number_fg: Rgb::WHITE,
            function_bg: Rgb::from_u32(0xD4_D4_D4),
            function_fg: Rgb::BLACK,
            operator_bg: Rgb::from_u32(0xFB_92_3C),
            operator_fg: Rgb::WHITE,
            highlight_bg: Rgb::WHITE,
            highlight_fg: Rgb::from_u32(0xF5_9E_0B),
            hint_fg: Rgb::from_u32(0x73_73_73),
        }
    }
}

/// Logging configuration.
///
/// The terminal is in raw mode while the keypad is up, so logs only ever
/// go to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file; logging is off when `None`.
    pub file: Option<PathBuf>,
    /// `EnvFilter` directive, e.g. `info` or `calci=debug`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: String::from("info"),
        }
    }
}

/// Everything the application needs to start.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Terminal settings.
    pub screen: ScreenConfig,
    /// Colors.
    pub theme: Theme,
    /// How operator keys chain.
    pub chain: ChainMode,
    /// Logging.
    pub log: LogConfig,
    /// Keys to evaluate headlessly instead of opening the keypad.
    pub eval: Option<String>,
}

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "calci", version, about = "A phone-style keypad calculator for the terminal")]
pub struct Cli {
    /// How an operator key combines the running total with the new entry
    /// (`immediate`: 2+3×4=24, `deferred`: 2+3×4=20).
    #[arg(long, default_value_t = ChainMode::Immediate)]
    pub chain: ChainMode,

    /// Maximum repaints per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Disable clicking keys with the mouse.
    #[arg(long)]
    pub no_mouse: bool,

    /// Draw in the main screen instead of the alternate screen.
    #[arg(long)]
    pub inline: bool,

    /// Write logs to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive.
    #[arg(long, default_value = "info", env = "CALCI_LOG")]
    pub log_level: String,

    /// Press these keys without opening the keypad and print the display,
    /// e.g. `--eval "12+30="`.
    #[arg(long, value_name = "KEYS")]
    pub eval: Option<String>,
}

impl Cli {
    /// Turn parsed arguments into an [`AppConfig`].
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            screen: ScreenConfig {
                target_fps: self.fps,
                enable_mouse: !self.no_mouse,
                alternate_screen: !self.inline,
                ..ScreenConfig::default()
            },
            theme: Theme::default(),
            chain: self.chain,
            log: LogConfig {
                file: self.log_file,
                level: self.log_level,
            },
            eval: self.eval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = Cli::try_parse_from(["calci"]).unwrap().into_config();
        assert_eq!(config.chain, ChainMode::Immediate);
        assert_eq!(config.screen.target_fps, 60);
        assert!(config.screen.enable_mouse);
        assert!(config.screen.alternate_screen);
        assert_eq!(config.log.file, None);
        assert_eq!(config.eval, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "calci",
            "--chain",
            "deferred",
            "--fps",
            "30",
            "--no-mouse",
            "--log-file",
            "/tmp/calci.log",
            "--eval",
            "2+2=",
        ])
        .unwrap();
        let config = cli.into_config();
        assert_eq!(config.chain, ChainMode::Deferred);
        assert_eq!(config.screen.target_fps, 30);
        assert!(!config.screen.enable_mouse);
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/calci.log")));
        assert_eq!(config.eval.as_deref(), Some("2+2="));
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["calci", "--chain", "precedence"]).is_err());
        assert!(Cli::try_parse_from(["calci", "--fps", "0"]).is_err());
    }
}
