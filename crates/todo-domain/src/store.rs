//! インメモリ Todo ストア
//!
//! 挿入順を保持する `Vec` で管理します。存在しない ID は `None` / `false` で表し、
//! エラーにはしません（呼び出し側が 404 などに変換します）。

use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

/// Todo コレクションの所有者
#[derive(Debug, Default, Clone)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    /// 空のストアを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// サンプル 2 件を投入したストア（ローカル動作確認用）
    pub fn with_samples() -> Self {
        let mut store = Self::new();
        for title in ["Learn axum", "Build a REST API"] {
            store.create(NewTodo { title: title.to_string() });
        }
        store
    }

    /// 作成順の全件
    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// 新しい Todo を末尾に追加して返します。
    /// タイトルはトリム済み・空でないことを呼び出し側が保証します。
    pub fn create(&mut self, input: NewTodo) -> Todo {
        let todo = Todo::new(input);
        self.todos.push(todo.clone());
        todo
    }

    /// 部分更新。対象が無ければ何もせず `None` を返します。
    pub fn update(&mut self, id: &TodoId, patch: TodoPatch) -> Option<Todo> {
        let todo = self.todos.iter_mut().find(|todo| &todo.id == id)?;
        todo.apply(patch);
        Some(todo.clone())
    }

    /// 削除できたかどうかを返します。
    pub fn delete(&mut self, id: &TodoId) -> bool {
        match self.todos.iter().position(|todo| &todo.id == id) {
            Some(index) => {
                self.todos.remove(index);
                true
            }
            None => false,
        }
    }

    /// 全件を破棄します（テストの初期化用）。
    pub fn reset(&mut self) {
        self.todos.clear();
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}
