//! Domain types for the to-do list demo.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a to-do item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Text of the to-do
    pub text: String,
    /// Whether the to-do is done
    #[serde(default)]
    pub done: bool,
}

impl TodoItem {
    /// Creates a new, not-yet-done to-do item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }
}

/// The full to-do list, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList(pub Vec<TodoItem>);

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an item
    pub fn push(&mut self, item: TodoItem) {
        self.0.push(item);
    }

    /// Removes the item with the given id, preserving the order of the rest
    pub fn remove(&mut self, id: &TodoId) {
        self.0.retain(|item| item.id != *id);
    }

    /// Marks the item with the given id as done
    pub fn mark_done(&mut self, id: &TodoId) {
        if let Some(item) = self.0.iter_mut().find(|item| item.id == *id) {
            item.done = true;
        }
    }

    /// Looks an item up by id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.0.iter().find(|item| item.id == *id)
    }

    /// Iterates the items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn todo_id_display() {
        let id = TodoId::new();
        let display = format!("{id}");
        assert!(!display.is_empty());
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut list = TodoList::new();
        let ids: Vec<TodoId> = (0..3).map(|_| TodoId::new()).collect();
        for (n, id) in ids.iter().enumerate() {
            list.push(TodoItem::new(id.clone(), format!("todo {n}")));
        }

        list.remove(&ids[1]);

        let remaining: Vec<&TodoId> = list.iter().map(|item| &item.id).collect();
        assert_eq!(remaining, vec![&ids[0], &ids[2]]);
    }

    #[test]
    fn mark_done_touches_only_the_matching_item() {
        let mut list = TodoList::new();
        let first = TodoId::new();
        let second = TodoId::new();
        list.push(TodoItem::new(first.clone(), "one".to_owned()));
        list.push(TodoItem::new(second.clone(), "two".to_owned()));

        list.mark_done(&second);

        assert!(!list.get(&first).unwrap().done);
        assert!(list.get(&second).unwrap().done);
    }

    #[test]
    fn serializes_as_a_bare_array() {
        let mut list = TodoList::new();
        list.push(TodoItem::new(TodoId::new(), "x".to_owned()));

        let value = serde_json::to_value(&list).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["text"], "x");

        let back: TodoList = serde_json::from_value(value).unwrap();
        assert_eq!(back, list);
    }
}
