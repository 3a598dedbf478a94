//! CLI value enums and argument parsers.

use clap::ValueEnum;
use jilgraph_formats::Status;

/// Graph export format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Nodes and edges as JSON
    Json,
    /// Graphviz DOT
    Dot,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Dot => write!(f, "dot"),
        }
    }
}

/// Parse a status code or name given on the command line.
///
/// Unrecognized codes are accepted as-is, matching how the report parser
/// treats them.
pub fn parse_status_arg(s: &str) -> Result<Status, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("status cannot be empty".to_string());
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(format!("status '{trimmed}' cannot contain whitespace"));
    }
    Ok(Status::from_code(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("FA", Status::Failed)]
    #[case("running", Status::Running)]
    #[case(" te ", Status::Terminated)]
    #[case("pe", Status::Other("PE".to_string()))]
    fn status_arg_accepts_codes_and_names(#[case] input: &str, #[case] expected: Status) {
        assert_eq!(parse_status_arg(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("ON HOLD")]
    fn status_arg_rejects_blank_and_spaced(#[case] input: &str) {
        assert!(parse_status_arg(input).is_err());
    }

    #[test]
    fn export_format_display() {
        assert_eq!(ExportFormat::Json.to_string(), "json");
        assert_eq!(ExportFormat::Dot.to_string(), "dot");
    }
}
