use serde::{Deserialize, Serialize};
use std::fmt;

/// 案例 ID
///
/// 服务端返回的 `case_id` 可能是字符串（如 `"1940-1955.337us1"`）也可能是整数，
/// 统一保存为文本形式，原样回传给 `/check_answer`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CaseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct CaseIdVisitor;

        impl<'de> Visitor<'de> for CaseIdVisitor {
            type Value = CaseId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer case id")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(CaseId(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(CaseId(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(CaseId(value.to_string()))
            }
        }

        deserializer.deserialize_any(CaseIdVisitor)
    }
}

/// 最高法院案例
///
/// 拉取后不可变，整轮答题期间由状态机持有。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(rename = "case_id")]
    pub id: CaseId,
    #[serde(rename = "case_name")]
    pub name: String,
    pub judges: Vec<String>,
    pub summary: String,
    /// 案例列表可能不带结论，此时以判定响应中的结论为准
    #[serde(default)]
    pub conclusion: String,
    /// 对立双方，恰好两个
    pub parties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

impl CaseRecord {
    /// 当事方是否属于本案例
    pub fn has_party(&self, party: &str) -> bool {
        self.parties.iter().any(|p| p == party)
    }

    /// 按 1 起始的序号取当事方（终端输入 `1` / `2`）
    pub fn party_by_number(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.parties.get(i))
            .map(String::as_str)
    }

    /// 校验字段形态，返回不合法的原因
    pub fn validate(&self) -> Result<(), String> {
        if self.parties.len() != 2 {
            return Err(format!(
                "案例 {} 的 parties 应为 2 个，实际 {} 个",
                self.id,
                self.parties.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_service_shape() {
        let value = json!({
            "case_id": "1940-1955.337us1",
            "case_name": "Terminiello v. Chicago",
            "judges": ["Fred M. Vinson", "Hugo L. Black"],
            "summary": "A priest was fined for a speech.",
            "conclusion": "The ordinance was unconstitutional.",
            "parties": ["Terminiello", "Chicago"],
            "theme": "Free Speech"
        });

        let case: CaseRecord = serde_json::from_value(value).expect("valid case");
        assert_eq!(case.id.as_str(), "1940-1955.337us1");
        assert_eq!(case.name, "Terminiello v. Chicago");
        assert_eq!(case.judges.len(), 2);
        assert_eq!(case.theme.as_deref(), Some("Free Speech"));
        assert!(case.question.is_none());
        assert!(case.validate().is_ok());
    }

    #[test]
    fn test_conclusion_is_optional() {
        let value = json!({
            "case_id": "1968.21",
            "theme": "Free Speech",
            "judges": ["Earl Warren"],
            "case_name": "Tinker v. Des Moines",
            "parties": ["Tinker", "Des Moines"],
            "question": "Does a ban on armbands violate the First Amendment?",
            "summary": "Students wore black armbands."
        });

        let case: CaseRecord = serde_json::from_value(value).expect("valid case");
        assert!(case.conclusion.is_empty());
        assert_eq!(
            case.question.as_deref(),
            Some("Does a ban on armbands violate the First Amendment?")
        );
    }

    #[test]
    fn test_integer_case_id() {
        let id: CaseId = serde_json::from_value(json!(492)).expect("int id");
        assert_eq!(id.as_str(), "492");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let value = json!({
            "case_id": "1",
            "case_name": "Missing parties",
            "judges": [],
            "summary": "",
            "conclusion": ""
        });
        assert!(serde_json::from_value::<CaseRecord>(value).is_err());
    }

    #[test]
    fn test_party_helpers() {
        let case = CaseRecord {
            id: CaseId::new("a"),
            name: "A v. B".to_string(),
            judges: vec![],
            summary: String::new(),
            conclusion: String::new(),
            parties: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            theme: None,
            question: None,
        };
        assert!(case.has_party("B"));
        assert!(!case.has_party("D"));
        assert_eq!(case.party_by_number(1), Some("A"));
        assert_eq!(case.party_by_number(0), None);
        assert!(case.validate().is_err());
    }
}
