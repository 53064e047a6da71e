use std::env;

use crate::algorithm::FrontierMode;
use crate::graph::generators::{DEMO_END, DEMO_START};
use crate::{Error, Result};

/// How the shell prints each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON document per step
    Json,
}

/// Configuration for the stepping shell
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub mode: FrontierMode,
    pub start: String,
    pub end: String,
    pub format: OutputFormat,
    /// Step to completion without waiting for input
    pub auto_run: bool,
    pub color: bool,
    /// Use the demo graph with the end node cut off
    pub unreachable: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            mode: FrontierMode::PriorityQueue,
            start: DEMO_START.to_string(),
            end: DEMO_END.to_string(),
            format: OutputFormat::Text,
            auto_run: false,
            color: true,
            unreachable: false,
        }
    }
}

impl ShellConfig {
    /// Reads the process arguments and the `NO_COLOR` convention
    pub fn from_env() -> Result<Self> {
        let mut config = Self::from_args(env::args().skip(1))?;
        if env::var_os("NO_COLOR").is_some() {
            config.color = false;
        }
        Ok(config)
    }

    /// Parses `--mode`, `--start`, `--end`, `--json`, `--auto`, `--no-color`, `--unreachable`
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            let mut value = |name: &str| {
                inline
                    .clone()
                    .or_else(|| args.next())
                    .ok_or_else(|| Error::InvalidArgument(format!("{} needs a value", name)))
            };

            match flag.as_str() {
                "--mode" | "-m" => config.mode = value("--mode")?.parse()?,
                "--start" | "-s" => config.start = value("--start")?,
                "--end" | "-e" => config.end = value("--end")?,
                "--json" => config.format = OutputFormat::Json,
                "--auto" => config.auto_run = true,
                "--no-color" => config.color = false,
                "--unreachable" => config.unreachable = true,
                other => return Err(Error::InvalidArgument(other.to_string())),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo() {
        let config = ShellConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.start, "A");
        assert_eq!(config.end, "G");
    }

    #[test]
    fn parses_flags() {
        let config =
            ShellConfig::from_args(["--mode", "lin", "--end=F", "--json", "--auto", "--no-color"])
                .unwrap();
        assert_eq!(config.mode, FrontierMode::LinearScan);
        assert_eq!(config.end, "F");
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.auto_run);
        assert!(!config.color);
    }

    #[test]
    fn rejects_unknown_mode_and_flag() {
        assert_eq!(
            ShellConfig::from_args(["--mode", "fib"]).unwrap_err(),
            Error::InvalidMode("fib".to_string())
        );
        assert!(matches!(
            ShellConfig::from_args(["--fast"]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            ShellConfig::from_args(["--start"]),
            Err(Error::InvalidArgument(_))
        ));
    }
}
