use crate::core::allocator::DEFAULT_MAX_RESAMPLE_ATTEMPTS;
use crate::core::generator::DEFAULT_MAX_SERIAL_ATTEMPTS;
use crate::domain::model::{Catalog, PartType, SerialRange};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SalvageError};
use crate::utils::validation::{
    validate_option_list, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub generation: GenerationConfig,
    pub catalog: Catalog,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub donors: usize,
    pub recipients: usize,
    pub serial_range: SerialRange,
    pub max_resample_attempts: usize,
    pub max_serial_attempts: usize,
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            donors: 500,
            recipients: 400,
            serial_range: SerialRange::default(),
            max_resample_attempts: DEFAULT_MAX_RESAMPLE_ATTEMPTS,
            max_serial_attempts: DEFAULT_MAX_SERIAL_ATTEMPTS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "compact" or "json"
    pub format: String,
    pub verbose: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            verbose: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SalvageError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SalvageError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SALVAGE_SEED})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SalvageError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let generation = &self.generation;

        validate_positive_number("generation.donors", generation.donors, 1)?;
        // every recipient takes one part of each category out of inventory
        validate_range(
            "generation.recipients",
            generation.recipients,
            0,
            generation.donors,
        )?;
        validate_positive_number(
            "generation.max_resample_attempts",
            generation.max_resample_attempts,
            1,
        )?;
        validate_positive_number(
            "generation.max_serial_attempts",
            generation.max_serial_attempts,
            1,
        )?;

        let range = generation.serial_range;
        if range.min > range.max {
            return Err(SalvageError::InvalidConfigValueError {
                field: "generation.serial_range".to_string(),
                value: format!("{}..={}", range.min, range.max),
                reason: "min must not exceed max".to_string(),
            });
        }
        let needed = (generation.donors + generation.recipients) as u64;
        if range.size() < needed {
            return Err(SalvageError::InvalidConfigValueError {
                field: "generation.serial_range".to_string(),
                value: format!("{}..={}", range.min, range.max),
                reason: format!("Range holds {} serials but {} units are needed", range.size(), needed),
            });
        }

        validate_option_list("catalog.donor_tags", &self.catalog.donor_tags)?;
        validate_option_list("catalog.recipient_tags", &self.catalog.recipient_tags)?;
        for part in PartType::ALL {
            let field = format!("catalog.{}", serde_field(part));
            validate_option_list(&field, self.catalog.options(part))?;
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(SalvageError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.logging.format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    valid_formats.join(", ")
                ),
            });
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

fn serde_field(part: PartType) -> &'static str {
    match part {
        PartType::Brain => "brain",
        PartType::Mobility => "mobility",
        PartType::Vision => "vision",
        PartType::Arms => "arms",
        PartType::MediaCenter => "media_center",
        PartType::PowerPlant => "power_plant",
    }
}

impl ConfigProvider for TomlConfig {
    fn donor_count(&self) -> usize {
        self.generation.donors
    }

    fn recipient_count(&self) -> usize {
        self.generation.recipients
    }

    fn serial_range(&self) -> SerialRange {
        self.generation.serial_range
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn max_resample_attempts(&self) -> usize {
        self.generation.max_resample_attempts
    }

    fn max_serial_attempts(&self) -> usize {
        self.generation.max_serial_attempts
    }

    fn seed(&self) -> Option<u64> {
        self.generation.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
