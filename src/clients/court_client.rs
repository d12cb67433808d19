/// 案例服务 API 客户端
///
/// 封装所有与案例服务相关的调用逻辑
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{AnswerRequest, CaseId, CaseRecord, Judgment, JudgmentResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

pub const CASES_ENDPOINT: &str = "/cases_info";
pub const CHECK_ANSWER_ENDPOINT: &str = "/check_answer";

/// 案例服务客户端
///
/// 内部的 `reqwest::Client` 基于 Arc，clone 代价很低，可以直接移入后台任务。
#[derive(Clone)]
pub struct CourtClient {
    http: Client,
    base_url: String,
}

impl CourtClient {
    /// 创建新的案例服务客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url)
    }

    /// 使用自定义服务地址创建
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拉取本轮案例列表
    ///
    /// # 返回
    /// 按服务端顺序返回案例；任一案例字段形态不合法时整体报错
    pub async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, ApiError> {
        let url = format!("{}{}", self.base_url, CASES_ENDPOINT);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(CASES_ENDPOINT, e))?;

        let cases: Vec<CaseRecord> = Self::read_json(CASES_ENDPOINT, response).await?;

        for case in &cases {
            case.validate()
                .map_err(|reason| ApiError::malformed(CASES_ENDPOINT, reason))?;
        }

        debug!("拉取到 {} 个案例", cases.len());
        Ok(cases)
    }

    /// 提交答案并获取判定
    ///
    /// # 参数
    /// - `case_id`: 案例 ID
    /// - `user_choice`: 用户选择的当事方
    pub async fn check_answer(
        &self,
        case_id: &CaseId,
        user_choice: &str,
    ) -> Result<Judgment, ApiError> {
        let url = format!("{}{}", self.base_url, CHECK_ANSWER_ENDPOINT);
        let body = AnswerRequest {
            case_id,
            user_choice,
        };
        debug!("POST {} case_id={} user_choice={}", url, case_id, user_choice);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(CHECK_ANSWER_ENDPOINT, e))?;

        let raw: JudgmentResponse = Self::read_json(CHECK_ANSWER_ENDPOINT, response).await?;
        let judgment = raw
            .into_judgment()
            .map_err(|reason| ApiError::malformed(CHECK_ANSWER_ENDPOINT, reason))?;

        debug!("判定结果: case_id={} correct={}", case_id, judgment.is_correct);
        Ok(judgment)
    }

    /// 检查状态码并解析 JSON 响应体
    async fn read_json<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        serde_json::from_slice(&bytes).map_err(|source| ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}
