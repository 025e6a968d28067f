//! Inbound line limits configuration.

use serde::Deserialize;

/// Inbound line limits configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum bytes per inbound line, terminator included (default: 4096).
    /// A longer line closes the connection.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
        }
    }
}

fn default_max_line_len() -> usize {
    relay_proto::line::DEFAULT_MAX_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_correct() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.max_line_len, 4096);
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let limits: LimitsConfig = toml::from_str("").unwrap();
        assert_eq!(limits.max_line_len, 4096);

        let limits: LimitsConfig = toml::from_str("max_line_len = 128").unwrap();
        assert_eq!(limits.max_line_len, 128);
    }
}
