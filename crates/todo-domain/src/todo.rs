use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Todo の識別子（UUID v4 文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// 新しい UUID v4 を採番します。
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

/// パスから受け取った ID をそのまま包みます（存在しなければ not found になるだけ）。
impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Todo 1 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    /// トリム済み・空でないタイトル
    pub title: String,
    pub completed: bool,
    /// 作成時刻（ミリ秒精度、以後変更されない）
    #[serde(with = "iso8601_millis")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// 検証済み入力から新しい Todo を組み立てます。
    pub fn new(input: NewTodo) -> Self {
        Self {
            id: TodoId::new(),
            title: input.title,
            completed: false,
            created_at: now_millis(),
        }
    }

    /// 指定されたフィールドだけを上書きします。
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// 作成入力（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
}

/// 部分更新（検証済み）。`None` のフィールドは変更しません。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// `2024-01-02T03:04:05.678Z` 形式に整形します。
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 整形結果と往復一致するよう、ミリ秒に切り詰めた現在時刻
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

mod iso8601_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        Todo::new(NewTodo { title: "Buy milk".into() })
    }

    #[test]
    fn todo_id_new_is_a_uuid_v4() {
        let id = TodoId::new();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn new_todo_starts_incomplete() {
        let todo = sample();
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
    }

    #[test]
    fn serializes_with_camel_case_keys_and_millis_timestamp() {
        let todo = sample();
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], todo.id.as_str());
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["completed"], false);

        let created = json["createdAt"].as_str().unwrap();
        // 例: 2024-01-02T03:04:05.678Z
        assert_eq!(created.len(), 24);
        assert!(created.ends_with('Z'));
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn created_at_round_trips_exactly() {
        let todo = sample();
        let formatted = format_timestamp(&todo.created_at);
        let parsed = DateTime::parse_from_rfc3339(&formatted).unwrap().with_timezone(&Utc);
        assert_eq!(parsed, todo.created_at);
        assert_eq!(format_timestamp(&parsed), formatted);
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut todo = sample();
        let before = todo.clone();

        todo.apply(TodoPatch { title: None, completed: Some(true) });
        assert!(todo.completed);
        assert_eq!(todo.title, before.title);
        assert_eq!(todo.id, before.id);
        assert_eq!(todo.created_at, before.created_at);

        todo.apply(TodoPatch { title: Some("Buy oat milk".into()), completed: None });
        assert_eq!(todo.title, "Buy oat milk");
        assert!(todo.completed);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut todo = sample();
        let before = todo.clone();
        let patch = TodoPatch::default();
        assert!(patch.is_empty());
        todo.apply(patch);
        assert_eq!(todo, before);
    }
}
