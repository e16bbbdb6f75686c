//! slidex - Entry Point

use clap::Parser;
use slidex::config::CliOverrides;
use slidex::model::AppError;
use slidex::state::{persistence, ExpansionController, ListenerTiming};
use slidex::view::{ColorConfig, ListStyles};
use std::path::{Path, PathBuf};
use tracing::info;

/// slidex - expandable rows in a virtualized, recycling list
#[derive(Parser, Debug)]
#[command(name = "slidex")]
#[command(version)]
#[command(about = "Demo list with slide-open detail panels that survive view recycling")]
pub struct Args {
    /// Number of rows in the list
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Expand/collapse animation length in milliseconds
    #[arg(short, long, allow_negative_numbers = true)]
    pub duration: Option<i64>,

    /// Allow several rows to be open at once
    #[arg(long)]
    pub multi_open: bool,

    /// Do not scroll freshly expanded panels into view
    #[arg(long)]
    pub no_adjust: bool,

    /// When expand/collapse events are reported
    #[arg(long, value_parser = ["dispatch", "completion"])]
    pub listener_timing: Option<String>,

    /// Ignore the saved expand state
    #[arg(long)]
    pub fresh: bool,

    /// Print the saved expand state as JSON and exit
    #[arg(long)]
    pub print_state: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Overrides to apply on top of file and environment settings.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            rows: self.rows,
            animation_duration_ms: self.duration,
            multi_open: self.multi_open,
            no_adjust: self.no_adjust,
            listener_timing: self
                .listener_timing
                .as_deref()
                .and_then(ListenerTiming::from_name),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = slidex::config::resolve(args.config.clone(), &args.overrides())?;

    slidex::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut controller = ExpansionController::new(config.expand_options());
    if !args.fresh {
        let blob = persistence::load_from_file(&config.state_file_path)?;
        controller.restore_state(blob.as_deref());
    }

    if args.print_state {
        println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
        return Ok(());
    }

    let styles = ListStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    let controller = slidex::view::run(controller, config.rows, config.easing, styles)?;

    save_on_exit(&controller, &config.state_file_path)?;

    Ok(())
}

/// Persist the expand state for the next launch.
fn save_on_exit(controller: &ExpansionController, path: &Path) -> Result<(), AppError> {
    let blob = controller.save_state()?;
    persistence::save_to_file(path, &blob)?;
    info!(path = ?path, "Expand state saved on exit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help should succeed (exits with code 0)
        let result = Args::try_parse_from(["slidex", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["slidex", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["slidex"]);
        assert_eq!(args.rows, None);
        assert_eq!(args.duration, None);
        assert!(!args.multi_open);
        assert!(!args.no_adjust);
        assert_eq!(args.listener_timing, None);
        assert!(!args.fresh);
        assert!(!args.print_state);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_rows_and_duration() {
        let args = Args::parse_from(["slidex", "-r", "500", "--duration", "120"]);
        assert_eq!(args.rows, Some(500));
        assert_eq!(args.duration, Some(120));
    }

    #[test]
    fn test_negative_duration_parses_for_later_validation() {
        let args = Args::parse_from(["slidex", "--duration", "-5"]);
        assert_eq!(args.overrides().animation_duration_ms, Some(-5));
    }

    #[test]
    fn test_mode_flags_map_to_overrides() {
        let args = Args::parse_from(["slidex", "--multi-open", "--no-adjust"]);
        let overrides = args.overrides();
        assert!(overrides.multi_open);
        assert!(overrides.no_adjust);
    }

    #[test]
    fn test_listener_timing_values() {
        let args = Args::parse_from(["slidex", "--listener-timing", "completion"]);
        assert_eq!(
            args.overrides().listener_timing,
            Some(ListenerTiming::Completion)
        );

        let result = Args::try_parse_from(["slidex", "--listener-timing", "later"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["slidex", "--config", "/tmp/slidex.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/slidex.toml")));
    }

    #[test]
    fn test_state_flags() {
        let args = Args::parse_from(["slidex", "--fresh", "--print-state", "--no-color"]);
        assert!(args.fresh);
        assert!(args.print_state);
        assert!(args.no_color);
    }
}
