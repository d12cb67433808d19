use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::models::case::CaseId;

/// `/check_answer` 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRequest<'a> {
    pub case_id: &'a CaseId,
    pub user_choice: &'a str,
}

/// `/check_answer` 原始响应
///
/// `correct` 在不同版本的服务中可能是布尔值，也可能是 `"Correct"` / `"Incorrect"`，
/// 先按原样接收，再交给 [`normalize_correct`] 统一判定。
/// `conclusion` 只是附带信息，非字符串时直接忽略。
#[derive(Debug, Clone, Deserialize)]
pub struct JudgmentResponse {
    #[serde(default)]
    pub correct: Option<JsonValue>,
    #[serde(default)]
    pub conclusion: Option<JsonValue>,
}

/// 规范化后的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgment {
    pub is_correct: bool,
    /// 服务端随判定返回的结论摘要（如有）
    pub conclusion: Option<String>,
}

/// 把 `correct` 字段统一成布尔值
///
/// - 布尔值原样返回
/// - 字符串去除首尾空白后等于 `"Correct"` 为 `true`，其余字符串为 `false`
/// - 缺失、`null`、数字、数组、对象返回 `Err(原因)`
pub fn normalize_correct(value: Option<&JsonValue>) -> Result<bool, String> {
    match value {
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(JsonValue::String(s)) => Ok(s.trim() == "Correct"),
        Some(JsonValue::Null) | None => Err("缺少 correct 字段".to_string()),
        Some(other) => Err(format!("无法识别的 correct 字段: {}", other)),
    }
}

impl JudgmentResponse {
    /// 转换为规范化判定，字段形态不合法时返回原因
    pub fn into_judgment(self) -> Result<Judgment, String> {
        let is_correct = normalize_correct(self.correct.as_ref())?;
        let conclusion = match self.conclusion {
            Some(JsonValue::String(c)) if !c.trim().is_empty() => Some(c),
            _ => None,
        };
        Ok(Judgment {
            is_correct,
            conclusion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: JsonValue) -> Result<Judgment, String> {
        let response: JudgmentResponse = serde_json::from_value(value).expect("object");
        response.into_judgment()
    }

    #[test]
    fn test_string_correct_is_true() {
        assert_eq!(parse(json!({"correct": "Correct"})).map(|j| j.is_correct), Ok(true));
        assert_eq!(parse(json!({"correct": " Correct\n"})).map(|j| j.is_correct), Ok(true));
    }

    #[test]
    fn test_boolean_false_is_false() {
        assert_eq!(parse(json!({"correct": false})).map(|j| j.is_correct), Ok(false));
        assert_eq!(parse(json!({"correct": true})).map(|j| j.is_correct), Ok(true));
    }

    #[test]
    fn test_other_strings_are_incorrect() {
        assert_eq!(parse(json!({"correct": "Incorrect"})).map(|j| j.is_correct), Ok(false));
        assert_eq!(parse(json!({"correct": "correct"})).map(|j| j.is_correct), Ok(false));
    }

    #[test]
    fn test_unknown_shapes_are_malformed() {
        assert!(parse(json!({})).is_err());
        assert!(parse(json!({"correct": null})).is_err());
        assert!(parse(json!({"correct": 1})).is_err());
        assert!(parse(json!({"correct": ["Correct"]})).is_err());
    }

    #[test]
    fn test_conclusion_passthrough() {
        let judgment = parse(json!({
            "correct": "Correct",
            "conclusion": "The Court ruled 5-4 for Terminiello.",
            "decisions": []
        }))
        .expect("valid");
        assert_eq!(
            judgment.conclusion.as_deref(),
            Some("The Court ruled 5-4 for Terminiello.")
        );

        let judgment = parse(json!({"correct": true, "conclusion": "  "})).expect("valid");
        assert!(judgment.conclusion.is_none());
    }

    #[test]
    fn test_non_string_conclusion_is_ignored() {
        let judgment = parse(json!({"correct": true, "conclusion": 5})).expect("valid");
        assert!(judgment.is_correct);
        assert!(judgment.conclusion.is_none());

        let judgment = parse(json!({"correct": "Incorrect", "conclusion": {"text": "x"}}))
            .expect("valid");
        assert!(!judgment.is_correct);
        assert!(judgment.conclusion.is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let id = CaseId::new("1968.492");
        let body = serde_json::to_value(AnswerRequest {
            case_id: &id,
            user_choice: "Tinker",
        })
        .expect("serialize");
        assert_eq!(body, json!({"case_id": "1968.492", "user_choice": "Tinker"}));
    }
}
