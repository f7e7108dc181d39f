//! ドメインモデル
//!
//! Todo の値オブジェクト、インメモリストア、リクエスト入力の検証を提供します。
//! HTTP には依存しません（`todo-api` から利用されます）。

pub mod store;
pub mod todo;
pub mod validation;

pub use store::TodoStore;
pub use todo::{format_timestamp, NewTodo, Todo, TodoId, TodoPatch};
pub use validation::{validate_create, validate_update, FieldIssue, IssueCode, ValidationErrors};
