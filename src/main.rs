use anyhow::Context;
use clap::Parser;
use gcodeview::{default_config_path, init_logging, Config, ViewerSession, BUILD_DATE, VERSION};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load a G-code file and print the rendered frame as JSON
#[derive(Parser, Debug)]
#[command(name = "gcodeview", version, about = "Headless G-code tool path preview")]
struct Args {
    /// G-code file to load
    file: PathBuf,

    /// Viewport width in pixels
    #[arg(default_value_t = 800)]
    width: u32,

    /// Viewport height in pixels
    #[arg(default_value_t = 600)]
    height: u32,

    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(long, env = "GCODEVIEW_CONFIG")]
    config: Option<PathBuf>,
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    match default_config_path() {
        Ok(path) => Config::load_or_default(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        Err(e) => {
            warn!("{}, using default config", e);
            Ok(Config::default())
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut session = ViewerSession::new(config.to_viewer_options()?);
    session.resize(args.width, args.height);

    let outcome = session.load_file(&args.file)?;
    info!("{}", session.title());
    if let Some(notice) = outcome.notice() {
        warn!("{}", notice);
    }

    println!("{}", session.frame().to_json()?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;
    info!("GCodeView {} (built {})", VERSION, BUILD_DATE);

    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_file_only_uses_default_viewport() {
        let args = Args::try_parse_from(["gcodeview", "part.nc"]).unwrap();
        assert_eq!(args.file, PathBuf::from("part.nc"));
        assert_eq!((args.width, args.height), (800, 600));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_explicit_viewport_and_config() {
        let args = Args::try_parse_from([
            "gcodeview",
            "part.nc",
            "1920",
            "1080",
            "--config",
            "view.toml",
        ])
        .unwrap();
        assert_eq!((args.width, args.height), (1920, 1080));
        assert_eq!(args.config, Some(PathBuf::from("view.toml")));
    }

    #[test]
    fn test_help_is_not_a_file_name() {
        let err = Args::try_parse_from(["gcodeview", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["gcodeview", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_bad_arguments() {
        let err = Args::try_parse_from(["gcodeview"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Args::try_parse_from(["gcodeview", "part.nc", "wide", "100"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        assert!(Args::try_parse_from(["gcodeview", "part.nc", "1", "2", "3"]).is_err());
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
