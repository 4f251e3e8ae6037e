use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Fixed-width baseline a symbol would occupy uncompressed.
pub const SYMBOL_BIT_WIDTH: u32 = 8;

/// Hard cap on input size; the whole file is held in memory.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024 * 1024; // 1GB

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    pub output_extension: String,
    pub symbol_bit_width: u32,
    pub max_input_size: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            output_extension: "hfpk".to_string(),
            symbol_bit_width: SYMBOL_BIT_WIDTH,
            max_input_size: MAX_INPUT_SIZE,
        }
    }
}

impl ToolConfig {
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or("huffpack.toml");

        if std::path::Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)?;
            let config: ToolConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        tracing::info!("Wrote config to {}", config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ToolConfig::default();
        assert_eq!(config.symbol_bit_width, 8);
        assert_eq!(config.output_extension, "hfpk");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = ToolConfig::load_or_default(Some("/nonexistent/huffpack.toml")).unwrap();
        assert_eq!(config.symbol_bit_width, SYMBOL_BIT_WIDTH);
    }
}
