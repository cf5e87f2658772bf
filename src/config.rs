use crate::error::ConfigError;
use crate::models::{AspectRatio, Quality, Selection, StyleType};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "portrait.toml";

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- 远程生成服务配置 ---
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub gemini_model_name: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 源照片所在目录
    pub input_folder: String,
    /// 生成结果保存目录
    pub output_folder: String,
    /// 下载文件名前缀
    pub product_name: String,
    /// 两张图片之间的间隔（毫秒）
    pub item_delay_ms: u64,
    /// 批量下载时每个文件之间的间隔（毫秒）
    pub download_stagger_ms: u64,
    /// 默认风格 / 比例 / 画质
    pub style: StyleType,
    pub ratio: AspectRatio,
    pub quality: Quality,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_model_name: "gemini-2.5-flash-image".to_string(),
            request_timeout_secs: 120,
            input_folder: "input_photos".to_string(),
            output_folder: "output_portraits".to_string(),
            product_name: "LoiAI_Studio".to_string(),
            item_delay_ms: 1200,
            download_stagger_ms: 600,
            style: StyleType::TetMai,
            ratio: AspectRatio::Portrait,
            quality: Quality::FourK,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

/// 配置文件中的可选字段，缺失的字段保留默认值
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    gemini_api_key: Option<String>,
    gemini_api_base_url: Option<String>,
    gemini_model_name: Option<String>,
    request_timeout_secs: Option<u64>,
    input_folder: Option<String>,
    output_folder: Option<String>,
    product_name: Option<String>,
    item_delay_ms: Option<u64>,
    download_stagger_ms: Option<u64>,
    style: Option<StyleType>,
    ratio: Option<AspectRatio>,
    quality: Option<Quality>,
    verbose_logging: Option<bool>,
    output_log_file: Option<String>,
}

impl Config {
    /// 加载配置：默认值 < 配置文件 < 环境变量
    ///
    /// 配置文件路径取自 `PORTRAIT_CONFIG`，未设置时尝试 `portrait.toml`（不存在则跳过）
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PORTRAIT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).is_file() {
            let content = std::fs::read_to_string(&path).map_err(|source| {
                ConfigError::FileReadFailed {
                    path: path.clone(),
                    source,
                }
            })?;
            Self::from_toml_str(&content, &path)?
        } else {
            Self::default()
        };
        Ok(base.with_env())
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            })?;
        let d = Self::default();

        Ok(Self {
            gemini_api_key: file.gemini_api_key.unwrap_or(d.gemini_api_key),
            gemini_api_base_url: file.gemini_api_base_url.unwrap_or(d.gemini_api_base_url),
            gemini_model_name: file.gemini_model_name.unwrap_or(d.gemini_model_name),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(d.request_timeout_secs),
            input_folder: file.input_folder.unwrap_or(d.input_folder),
            output_folder: file.output_folder.unwrap_or(d.output_folder),
            product_name: file.product_name.unwrap_or(d.product_name),
            item_delay_ms: file.item_delay_ms.unwrap_or(d.item_delay_ms),
            download_stagger_ms: file.download_stagger_ms.unwrap_or(d.download_stagger_ms),
            style: file.style.unwrap_or(d.style),
            ratio: file.ratio.unwrap_or(d.ratio),
            quality: file.quality.unwrap_or(d.quality),
            verbose_logging: file.verbose_logging.unwrap_or(d.verbose_logging),
            output_log_file: file.output_log_file.unwrap_or(d.output_log_file),
        })
    }

    /// 只使用默认值和环境变量
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 用环境变量覆盖已有配置，无法解析的值被忽略
    pub fn with_env(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            gemini_api_key: env("GEMINI_API_KEY").or_else(|| env("API_KEY")).unwrap_or(self.gemini_api_key),
            gemini_api_base_url: env("GEMINI_API_BASE_URL").unwrap_or(self.gemini_api_base_url),
            gemini_model_name: env("GEMINI_MODEL_NAME").unwrap_or(self.gemini_model_name),
            request_timeout_secs: env("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            input_folder: env("INPUT_FOLDER").unwrap_or(self.input_folder),
            output_folder: env("OUTPUT_FOLDER").unwrap_or(self.output_folder),
            product_name: env("PRODUCT_NAME").unwrap_or(self.product_name),
            item_delay_ms: env("ITEM_DELAY_MS").and_then(|v| v.parse().ok()).unwrap_or(self.item_delay_ms),
            download_stagger_ms: env("DOWNLOAD_STAGGER_MS").and_then(|v| v.parse().ok()).unwrap_or(self.download_stagger_ms),
            style: env("PORTRAIT_STYLE").and_then(|v| StyleType::from_key(&v)).unwrap_or(self.style),
            ratio: env("PORTRAIT_RATIO").and_then(|v| AspectRatio::from_key(&v)).unwrap_or(self.ratio),
            quality: env("PORTRAIT_QUALITY").and_then(|v| Quality::from_key(&v)).unwrap_or(self.quality),
            verbose_logging: env("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: env("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        }
    }

    /// 当前配置对应的默认选择
    pub fn selection(&self) -> Selection {
        Selection::new(self.style, self.ratio, self.quality)
    }

    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }

    pub fn download_stagger(&self) -> Duration {
        Duration::from_millis(self.download_stagger_ms)
    }

    /// 检查必须的配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_product() {
        let config = Config::default();
        assert_eq!(config.item_delay_ms, 1200);
        assert_eq!(config.product_name, "LoiAI_Studio");
        assert_eq!(
            config.selection(),
            Selection::new(StyleType::TetMai, AspectRatio::Portrait, Quality::FourK)
        );
    }

    #[test]
    fn test_from_toml_partial() {
        let content = r#"
            style = "gala"
            ratio = "16:9"
            quality = "8k"
            item_delay_ms = 50
        "#;
        let config = Config::from_toml_str(content, "test.toml").unwrap();
        assert_eq!(config.style, StyleType::Gala);
        assert_eq!(config.ratio, AspectRatio::Landscape);
        assert_eq!(config.quality, Quality::EightK);
        assert_eq!(config.item_delay_ms, 50);
        assert_eq!(config.output_folder, "output_portraits");
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = Config::from_toml_str("style = \"anime\"", "bad.toml");
        assert!(matches!(result, Err(ConfigError::TomlParseFailed { .. })));
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));

        let config = Config {
            gemini_api_key: "key".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
