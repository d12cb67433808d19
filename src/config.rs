use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "courtdle.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 案例服务地址（提供 /cases_info 与 /check_answer）
    pub api_base_url: String,
    /// 每轮预期的案例数量
    pub expected_case_count: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 结束页倒计时是否每秒刷新
    pub live_countdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            expected_case_count: 5,
            verbose_logging: false,
            output_log_file: "courtdle.log".to_string(),
            live_countdown: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量
    ///
    /// 配置文件路径取自 `COURTDLE_CONFIG`，未设置时使用 `courtdle.toml`；
    /// 文件不存在不算错误。
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("COURTDLE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = Self::from_file(Path::new(&path))?.unwrap_or_default();
        Ok(base.with_env())
    }

    /// 从 TOML 文件读取配置，文件不存在时返回 `None`
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Some(config))
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原样
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// 用 `lookup` 提供的变量覆盖已有配置
    pub fn with_vars(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base_url: lookup("COURTDLE_API_BASE_URL").unwrap_or(self.api_base_url),
            expected_case_count: lookup("COURTDLE_EXPECTED_CASES").and_then(|v| v.parse().ok()).unwrap_or(self.expected_case_count),
            verbose_logging: lookup("COURTDLE_VERBOSE").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: lookup("COURTDLE_LOG_FILE").unwrap_or(self.output_log_file),
            live_countdown: lookup("COURTDLE_LIVE_COUNTDOWN").and_then(|v| v.parse().ok()).unwrap_or(self.live_countdown),
        }
    }
}
