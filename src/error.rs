use thiserror::Error;

use crate::quiz::Phase;

/// 应用程序错误类型
///
/// 服务调用失败会转换为状态机事件，状态机拒绝的操作直接提示用户，
/// 只有终端读写失败会终止运行。
#[derive(Debug, Error)]
pub enum AppError {
    /// 终端读写错误
    #[error("终端IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 案例服务调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非 2xx 状态码
    #[error("API返回错误状态 ({endpoint}): {status}")]
    BadStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    /// 响应体不是合法 JSON 或字段类型不符
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 响应缺少必要字段或字段形态未知
    #[error("响应格式异常 ({endpoint}): {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

impl ApiError {
    /// 是否属于"响应格式异常"（需要向用户展示）
    ///
    /// 网络层失败只记录日志，格式异常需要快速失败并展示给用户。
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ApiError::MalformedResponse { .. } | ApiError::JsonParseFailed { .. }
        )
    }
}

/// 状态机拒绝的操作
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// 当前阶段不接受该操作
    #[error("阶段 {phase:?} 不接受操作 {action}")]
    InvalidAction { phase: Phase, action: &'static str },
    /// 所选当事方不属于当前案例
    #[error("当事方 '{party}' 不属于当前案例")]
    UnknownParty { party: String },
    /// 尚未收到判定结果
    #[error("尚未收到判定结果，无法进入下一题")]
    JudgmentPending,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建响应格式异常错误
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
