//! リクエストボディの検証
//!
//! JSON 値を型付きの入力（`NewTodo` / `TodoPatch`）に変換します。
//! タイトルは必ずトリムしてから長さを検査し、保存されるのもトリム後の値です。
//! 問題は最初の 1 件で止めず、すべて収集して返します。

use crate::todo::{NewTodo, TodoPatch};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

const TITLE_REQUIRED: &str = "Title is required";

/// 問題の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// 型の不一致・必須フィールドの欠落
    InvalidType,
    /// トリム後の文字列が短すぎる
    TooSmall,
    /// ボディが JSON として解釈できない
    InvalidJson,
}

/// フィールド単位の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// 対象フィールドへのパス（ボディ全体なら空）
    pub path: Vec<String>,
    pub code: IssueCode,
    pub message: String,
}

impl FieldIssue {
    fn new(path: &[&str], code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|p| p.to_string()).collect(),
            code,
            message: message.into(),
        }
    }
}

/// 検証失敗（1 件以上の `FieldIssue`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("validation failed ({})", summarize(.issues))]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| {
            if issue.path.is_empty() {
                issue.message.clone()
            } else {
                format!("{}: {}", issue.path.join("."), issue.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// JSON として読めないボディ
    pub fn malformed_json(detail: impl fmt::Display) -> Self {
        Self {
            issues: vec![FieldIssue::new(
                &[],
                IssueCode::InvalidJson,
                format!("Malformed JSON in request body: {detail}"),
            )],
        }
    }

    fn from_issues(issues: Vec<FieldIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }
}

/// POST /todos のボディを検証します。
pub fn validate_create(body: &Value) -> Result<NewTodo, ValidationErrors> {
    let object = expect_object(body)?;
    let mut issues = Vec::new();

    let title = match object.get("title") {
        None => {
            issues.push(FieldIssue::new(&["title"], IssueCode::InvalidType, "Required"));
            None
        }
        Some(value) => check_title(value, &mut issues),
    };

    match title {
        Some(title) if issues.is_empty() => Ok(NewTodo { title }),
        _ => Err(ValidationErrors { issues }),
    }
}

/// PATCH /todos/:id のボディを検証します。
/// 両フィールドとも任意ですが、指定された場合は制約を満たす必要があります。
pub fn validate_update(body: &Value) -> Result<TodoPatch, ValidationErrors> {
    let object = expect_object(body)?;
    let mut issues = Vec::new();

    let title = object
        .get("title")
        .and_then(|value| check_title(value, &mut issues));

    let completed = match object.get("completed") {
        None => None,
        Some(Value::Bool(flag)) => Some(*flag),
        Some(other) => {
            issues.push(FieldIssue::new(
                &["completed"],
                IssueCode::InvalidType,
                format!("Expected boolean, received {}", type_name(other)),
            ));
            None
        }
    };

    ValidationErrors::from_issues(issues)?;
    Ok(TodoPatch { title, completed })
}

fn expect_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object().ok_or_else(|| ValidationErrors {
        issues: vec![FieldIssue::new(
            &[],
            IssueCode::InvalidType,
            format!("Expected object, received {}", type_name(body)),
        )],
    })
}

/// トリムしてから長さを検査し、トリム後の値を返します。
fn check_title(value: &Value, issues: &mut Vec<FieldIssue>) -> Option<String> {
    let Some(raw) = value.as_str() else {
        issues.push(FieldIssue::new(
            &["title"],
            IssueCode::InvalidType,
            format!("Expected string, received {}", type_name(value)),
        ));
        return None;
    };

    let trimmed = trim_title(raw);
    if trimmed.is_empty() {
        issues.push(FieldIssue::new(&["title"], IssueCode::TooSmall, TITLE_REQUIRED));
        return None;
    }
    Some(trimmed.to_string())
}

/// 前後の空白を除去します（U+FEFF も空白として扱う）。
fn trim_title(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
