use crate::utils::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// 使用者選取（或拖放）的單一檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub file: SelectedFile,
    /// 一律送出，即使是空字串
    pub job_description: String,
}

/// 後端回傳欄位的實際形狀。沒有 schema 驗證，所以型別不對也要能顯示。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    List(Vec<String>),
    Text(String),
    Other(Value),
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Array(items) => FieldValue::List(items.iter().map(list_item_text).collect()),
            other => FieldValue::Other(other.clone()),
        }
    }
}

fn list_item_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_summary: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_reasoning: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_role: Option<FieldValue>,
    pub match_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_keywords: Option<FieldValue>,
}

impl ParsedResult {
    /// 寬鬆地把任意 JSON 轉成結果；非物件一律視為所有欄位缺失
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            tracing::debug!("Response body is not a JSON object, treating every field as absent");
            return Self::default();
        };

        let field = |key: &str| obj.get(key).map(FieldValue::from);

        Self {
            profile_summary: field("profile_summary"),
            scoring_reasoning: field("scoring_reasoning"),
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
            education: field("education"),
            skills: field("skills"),
            detected_role: field("detected_role"),
            match_percentage: obj.get("match_percentage").map_or(0.0, score_from_json),
            missing_keywords: field("missing_keywords"),
        }
    }

    /// 僅在為非空清單時回傳關鍵字
    pub fn missing_keywords(&self) -> Option<&[String]> {
        match &self.missing_keywords {
            Some(FieldValue::List(items)) if !items.is_empty() => Some(items),
            _ => None,
        }
    }
}

// 缺失或 falsy（0、NaN、null、false、空字串）都當成 0；數字字串照樣解析
fn score_from_json(value: &Value) -> f64 {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match score {
        Some(score) if score.is_finite() => score,
        _ => {
            if !value.is_null() && !value.is_number() && value.as_str() != Some("") {
                tracing::debug!("Ignoring non-numeric match_percentage: {}", value);
            }
            0.0
        }
    }
}
