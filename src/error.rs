//! Error type for the terminal front end.
//!
//! The calculator itself cannot fail: every key press either applies or is
//! ignored. Errors come from the terminal, the logger and headless input.

use thiserror::Error;

/// Errors raised while running the calculator.
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal cannot fit the keypad.
    #[error("terminal is {width}x{height}, the keypad needs at least {min_width}x{min_height}")]
    TerminalTooSmall {
        /// Current width.
        width: u16,
        /// Current height.
        height: u16,
        /// Required width.
        min_width: u16,
        /// Required height.
        min_height: u16,
    },

    /// The log file or filter could not be set up.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// A character in `--eval` input has no key.
    #[error("no calculator key for {0:?}")]
    InvalidKey(char),

    /// A worker thread could not be started.
    #[error("failed to spawn {name} thread: {source}")]
    ThreadSpawn {
        /// Thread name.
        name: &'static str,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::TerminalTooSmall {
            width: 20,
            height: 10,
            min_width: 25,
            min_height: 20,
        };
        assert_eq!(
            err.to_string(),
            "terminal is 20x10, the keypad needs at least 25x20"
        );
        assert_eq!(Error::InvalidKey('a').to_string(), "no calculator key for 'a'");
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> Result<()> {
            std::fs::read("/nonexistent/calci/input")?;
            Ok(())
        }
        assert!(matches!(fails(), Err(Error::Io(_))));
    }
}
