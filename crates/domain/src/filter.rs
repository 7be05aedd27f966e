use crate::errors::TodoError;
use crate::todo::Todo;
use std::str::FromStr;

/// 一覧表示のフィルタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.completed,
            TodoFilter::Completed => todo.completed,
        }
    }

    /// 挿入順を保ったままフィルタを適用
    pub fn apply(&self, todos: Vec<Todo>) -> Vec<Todo> {
        todos.into_iter().filter(|todo| self.matches(todo)).collect()
    }
}

impl FromStr for TodoFilter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TodoFilter::All),
            "active" => Ok(TodoFilter::Active),
            "completed" => Ok(TodoFilter::Completed),
            other => Err(TodoError::InvalidFilter(other.to_string())),
        }
    }
}
