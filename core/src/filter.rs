//! Client-side filtering over an already fetched todo list.

use crate::types::{LocalFilters, Todo};

/// Keep the todos whose `body` and `category` contain the given filters.
///
/// Matching is case-sensitive containment; both filters must hold. An absent
/// filter imposes no constraint, so `LocalFilters::default()` returns a copy
/// of the input. Order is preserved.
pub fn filter_todos(todos: &[Todo], filters: &LocalFilters) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| contains(&todo.body, filters.body.as_deref()))
        .filter(|todo| contains(&todo.category, filters.category.as_deref()))
        .cloned()
        .collect()
}

fn contains(field: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |needle| field.contains(needle))
}
