//! Row and status bar styling.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors explicitly on or off.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ListStyles =====

/// Styles of the list widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyles {
    /// Header of a collapsed row.
    pub header: Style,
    /// Header of an expanded row.
    pub open_header: Style,
    /// Extra style of the row under the cursor.
    pub cursor: Style,
    /// Panel body text.
    pub panel: Style,
    /// Action button row.
    pub action: Style,
    /// Status bar.
    pub status: Style,
}

impl ListStyles {
    /// Styles for the given color configuration.
    ///
    /// Without colors only modifiers remain, so the cursor stays visible.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let cursor = Style::default().add_modifier(Modifier::REVERSED);
        if config.colors_enabled() {
            Self {
                header: Style::default(),
                open_header: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                cursor,
                panel: Style::default().fg(Color::Gray),
                action: Style::default().fg(Color::Yellow),
                status: Style::default().fg(Color::Black).bg(Color::Cyan),
            }
        } else {
            Self {
                header: Style::default(),
                open_header: Style::default().add_modifier(Modifier::BOLD),
                cursor,
                panel: Style::default(),
                action: Style::default(),
                status: Style::default(),
            }
        }
    }
}

impl Default for ListStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn color_config_respects_no_color_flag() {
        assert!(!ColorConfig::from_env_and_args(true).colors_enabled());
    }

    #[test]
    #[serial(no_color)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");

        assert!(!config.colors_enabled(), "NO_COLOR with any value disables colors");
    }

    #[test]
    #[serial(no_color)]
    fn color_config_enables_colors_by_default() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    fn plain_styles_have_no_colors_but_keep_cursor() {
        let styles = ListStyles::with_color_config(ColorConfig::fixed(false));

        assert_eq!(styles.open_header.fg, None);
        assert_eq!(styles.status.bg, None);
        assert!(styles.cursor.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn colored_styles_highlight_open_rows() {
        let styles = ListStyles::with_color_config(ColorConfig::fixed(true));

        assert_eq!(styles.open_header.fg, Some(Color::Cyan));
    }
}
