//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:        green   (SUCCESS)
//!   - Active:         yellow  (RUNNING, STARTING)
//!   - Error:          red     (FAILED, TERMINATED)
//!   - Info/Reference: cyan    (job names, ACTIVATED, ON_HOLD)
//!   - Muted:          dimmed  (field labels, INACTIVE, bullets)
//!   - Unknown:        magenta (UNKNOWN and unmapped codes)

use colored::Colorize;
use jilgraph_formats::Status;

use super::OutputConfig;

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().bold().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply color to status text based on the status.
pub(crate) fn colorize_status(status: &Status, config: &OutputConfig) -> String {
    let text = status.to_string();
    if !config.use_colors {
        return text;
    }
    match status {
        Status::Success => text.green().to_string(),
        Status::Running | Status::Starting => text.yellow().to_string(),
        Status::Failed | Status::Terminated => text.red().bold().to_string(),
        Status::Activated | Status::OnHold => text.cyan().to_string(),
        Status::Inactive => text.dimmed().to_string(),
        Status::Unknown | Status::Other(_) => text.magenta().to_string(),
    }
}

/// Colorize a job name (cyan).
pub(crate) fn colorize_job(name: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return name.to_string();
    }
    name.cyan().to_string()
}

/// Bold text for section headers.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Dimmed text for labels and connectors.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::set_override;
    use std::sync::{Mutex, MutexGuard};

    // `set_override` is process-global; color tests hold this lock.
    static COLOR_MUTEX: Mutex<()> = Mutex::new(());

    struct ColorGuard<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl ColorGuard<'_> {
        fn new() -> Self {
            let guard = COLOR_MUTEX.lock().unwrap();
            set_override(true);
            Self { _guard: guard }
        }
    }

    impl Drop for ColorGuard<'_> {
        fn drop(&mut self) {
            set_override(false);
        }
    }

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false)
    }

    #[test]
    fn no_colors_returns_plain_text() {
        let config = plain();
        assert_eq!(colorize_status(&Status::Failed, &config), "FAILED");
        assert_eq!(colorize_job("load", &config), "load");
        assert_eq!(bold("Upstream", &config), "Upstream");
        assert_eq!(error("error", &config), "error");
    }

    #[test]
    fn colors_wrap_text_in_escape_codes() {
        let _guard = ColorGuard::new();
        let config = OutputConfig::new(80, true);

        let failed = colorize_status(&Status::Failed, &config);
        assert!(failed.contains("FAILED"));
        assert!(failed.contains("\x1b["));

        let other = colorize_status(&Status::Other("PE".to_string()), &config);
        assert!(other.contains("PE"));
        assert_ne!(other, "PE");
    }
}
