use serde::{Deserialize, Serialize};

/// POST /api/todos リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// 未指定も受け付け、検証はドメイン側で行う
    pub text: Option<String>,
}

/// GET /api/todos クエリ
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    /// サービスの簡易ステータス
    pub status: &'static str,
    pub storage: &'static str,
}
