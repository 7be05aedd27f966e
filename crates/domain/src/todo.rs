use crate::errors::TodoError;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Todo ID
///
/// 新規発行分は ULID（先頭 48bit がミリ秒タイムスタンプ）。
/// 既存データの ID は形式を問わずそのまま受け入れる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// 新しい Todo ID を生成
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
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

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Todo レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// クライアントから受け取ったテキストで新しい Todo を作成
    ///
    /// テキストは前後の空白を除去したうえで空であってはならない。
    pub fn create(text: Option<&str>) -> Result<Self, TodoError> {
        let text = validate_text(text)?;
        Ok(Self {
            id: TodoId::new(),
            text,
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        })
    }

    /// 部分更新を適用する。指定されたフィールドのみ変更する。
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(text) = patch.text {
            self.text = text.trim().to_string();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// 作成時のテキスト検証
pub fn validate_text(text: Option<&str>) -> Result<String, TodoError> {
    match text.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(TodoError::text_required()),
    }
}

/// 更新リクエストの内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }

    /// 空白のみのテキストを設定しようとしているか
    pub fn sets_blank_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| t.trim().is_empty())
    }
}

/// ID でレコードを探す
pub fn find_mut<'a>(todos: &'a mut [Todo], id: &TodoId) -> Result<&'a mut Todo, TodoError> {
    todos
        .iter_mut()
        .find(|todo| &todo.id == id)
        .ok_or_else(|| TodoError::NotFound(id.to_string()))
}

/// ID が一致するレコードを取り除き、取り除いたものを返す
pub fn remove_by_id(todos: &mut Vec<Todo>, id: &TodoId) -> Option<Todo> {
    let index = todos.iter().position(|todo| &todo.id == id)?;
    Some(todos.remove(index))
}

/// `2024-05-01T09:30:00.123Z` 形式（ミリ秒、UTC）で読み書きする
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_todo_id_new_generates_ulid() {
        // Act: 新しいTodoIdを生成
        let id = TodoId::new();

        // Assert: 26文字のULIDとして解釈できること
        assert_eq!(id.as_str().len(), 26);
        assert!(ulid::Ulid::from_string(id.as_str()).is_ok());
    }

    #[test]
    fn test_legacy_id_is_accepted_verbatim() {
        // Arrange: 旧形式（数字のみ）のID
        let id = TodoId::from("1714555800123");

        // Assert: そのまま保持される
        assert_eq!(id.as_str(), "1714555800123");
        assert_eq!(id.to_string(), "1714555800123");
    }

    #[test]
    fn test_create_trims_text_and_sets_defaults() {
        // Act
        let todo = Todo::create(Some("  牛乳を買う  ")).unwrap();

        // Assert
        assert_eq!(todo.text, "牛乳を買う");
        assert!(!todo.completed);
        assert!(todo.created_at <= Utc::now());
    }

    #[test]
    fn test_create_rejects_missing_and_blank_text() {
        for input in [None, Some(""), Some("   "), Some("\t\n")] {
            let result = Todo::create(input);
            assert_eq!(result, Err(TodoError::text_required()), "input: {input:?}");
        }
    }

    #[test]
    fn test_create_generates_unique_ids() {
        let a = Todo::create(Some("a")).unwrap();
        let b = Todo::create(Some("b")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_completed_only() {
        // Arrange
        let mut todo = Todo::create(Some("洗濯")).unwrap();
        let before = todo.clone();

        // Act
        todo.apply(TodoPatch {
            text: None,
            completed: Some(true),
        });

        // Assert: completed のみ変わる
        assert!(todo.completed);
        assert_eq!(todo.text, before.text);
        assert_eq!(todo.created_at, before.created_at);
        assert_eq!(todo.id, before.id);
    }

    #[test]
    fn test_apply_text_only_trims() {
        let mut todo = Todo::create(Some("洗濯")).unwrap();
        todo.completed = true;

        todo.apply(TodoPatch {
            text: Some("  掃除 ".to_string()),
            completed: None,
        });

        assert_eq!(todo.text, "掃除");
        assert!(todo.completed);
    }

    #[test]
    fn test_apply_allows_blank_text() {
        // 更新時は空文字チェックを行わない
        let mut todo = Todo::create(Some("洗濯")).unwrap();
        let patch = TodoPatch {
            text: Some("   ".to_string()),
            completed: None,
        };
        assert!(patch.sets_blank_text());

        todo.apply(patch);

        assert_eq!(todo.text, "");
    }

    #[test]
    fn test_serialized_shape_uses_camel_case_and_millis() {
        // Arrange
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T09:30:00.123456Z")
            .unwrap()
            .with_timezone(&Utc)
            .trunc_subsecs(3);
        let todo = Todo {
            id: TodoId::from("01HX0000000000000000000000"),
            text: "テスト".to_string(),
            completed: false,
            created_at,
        };

        // Act
        let json = serde_json::to_value(&todo).unwrap();

        // Assert
        assert_eq!(json["createdAt"], "2024-05-01T09:30:00.123Z");
        assert_eq!(json["id"], "01HX0000000000000000000000");
        assert_eq!(json["completed"], false);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let raw = r#"{"id":"1714555800123","text":"旧データ","completed":true,"createdAt":"2024-05-01T09:30:00.123Z"}"#;

        let todo: Todo = serde_json::from_str(raw).unwrap();

        assert_eq!(todo.id.as_str(), "1714555800123");
        assert!(todo.completed);
        assert_eq!(todo.created_at.timestamp_millis(), 1_714_555_800_123);
    }

    #[test]
    fn test_find_mut_and_remove_by_id() {
        let mut todos = vec![
            Todo::create(Some("a")).unwrap(),
            Todo::create(Some("b")).unwrap(),
        ];
        let target = todos[1].id.clone();

        assert!(find_mut(&mut todos, &target).is_ok());
        assert_eq!(
            find_mut(&mut todos, &TodoId::from("nonexistent")).unwrap_err(),
            TodoError::NotFound("nonexistent".to_string())
        );

        let removed = remove_by_id(&mut todos, &target).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(todos.len(), 1);
        assert!(remove_by_id(&mut todos, &target).is_none());
    }

    proptest! {
        #[test]
        fn prop_created_text_is_trimmed_and_non_empty(s in "\\PC{0,40}") {
            match Todo::create(Some(&s)) {
                Ok(todo) => {
                    prop_assert_eq!(todo.text.as_str(), s.trim());
                    prop_assert!(!todo.text.is_empty());
                }
                Err(e) => {
                    prop_assert!(s.trim().is_empty());
                    prop_assert_eq!(e, TodoError::text_required());
                }
            }
        }
    }
}
