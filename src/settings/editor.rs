//! Editable service list behind the settings window.
//!
//! Every successful mutation writes the whole list to the config store and
//! publishes `AppEvent::ServicesChanged` so the controller reconciles its
//! session matrix. Rejected mutations leave the list and the file untouched,
//! and a failed save restores the rows as they were before the mutation.

use tracing::{info, warn};

use crate::error::EditorError;
use crate::events::{AppEvent, EventPublisher};
use crate::model::service::template;
use crate::model::{ServiceDefinition, ServiceField};
use crate::storage::ConfigStore;

pub struct SettingsEditor {
    rows: Vec<ServiceDefinition>,
    store: ConfigStore,
    publisher: EventPublisher,
}

impl SettingsEditor {
    /// Loads the current list from `store`.
    pub fn open(store: ConfigStore, publisher: EventPublisher) -> Self {
        let rows = store.load();
        Self::with_rows(rows, store, publisher)
    }

    pub fn with_rows(
        rows: Vec<ServiceDefinition>,
        store: ConfigStore,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            rows,
            store,
            publisher,
        }
    }

    pub fn rows(&self) -> &[ServiceDefinition] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn field_value(&self, row: usize, field: ServiceField) -> Option<&str> {
        self.rows.get(row).map(|def| def.field(field))
    }

    // === Mutations ===

    pub fn add(&mut self, definition: ServiceDefinition) -> Result<(), EditorError> {
        info!(name = %definition.name, "adding service");
        self.commit(|rows| rows.push(definition))
    }

    /// Appends a "New Engine" placeholder row.
    pub fn add_default(&mut self) -> Result<(), EditorError> {
        self.add(ServiceDefinition::placeholder())
    }

    pub fn add_from_template(&mut self, template_name: &str) -> Result<(), EditorError> {
        let template = template(template_name)
            .ok_or_else(|| EditorError::UnknownTemplate(template_name.to_owned()))?;
        self.add(template.instantiate())
    }

    pub fn remove(&mut self, row: usize) -> Result<ServiceDefinition, EditorError> {
        self.check_row(row)?;
        let removed = self.commit(|rows| rows.remove(row))?;
        info!(name = %removed.name, "removed service");
        Ok(removed)
    }

    /// Moves the rows at `from` to the gap above `to` (a pre-move index;
    /// `to == len` drops after the last row).
    pub fn reorder(&mut self, from: &[usize], to: usize) -> Result<(), EditorError> {
        if from.is_empty() {
            return Ok(());
        }
        let mut reordered = self.rows.clone();
        reorder_rows(&mut reordered, from, to).map_err(|row| EditorError::RowOutOfRange {
            row,
            len: self.rows.len(),
        })?;
        self.commit(|rows| *rows = reordered)
    }

    pub fn edit_field(
        &mut self,
        row: usize,
        field: ServiceField,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.check_row(row)?;
        let value = value.into();
        self.commit(|rows| rows[row].set_field(field, value))
    }

    fn check_row(&self, row: usize) -> Result<(), EditorError> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(EditorError::RowOutOfRange {
                row,
                len: self.rows.len(),
            })
        }
    }

    /// Applies `mutate`, then saves and publishes the new list. A failed
    /// save puts the previous rows back.
    fn commit<R>(
        &mut self,
        mutate: impl FnOnce(&mut Vec<ServiceDefinition>) -> R,
    ) -> Result<R, EditorError> {
        let previous = self.rows.clone();
        let result = mutate(&mut self.rows);
        if let Err(err) = self.store.save(&self.rows) {
            warn!(%err, "could not save services, reverting edit");
            self.rows = previous;
            return Err(err.into());
        }
        self.publisher
            .publish(AppEvent::ServicesChanged(self.rows.clone()));
        Ok(result)
    }
}

/// Moves the rows at `from` (duplicates ignored) as one block, in their
/// original relative order, to the gap above pre-move row `to`.
///
/// On error nothing is moved and the offending index is returned.
pub fn reorder_rows<T>(rows: &mut Vec<T>, from: &[usize], to: usize) -> Result<(), usize> {
    let mut indices = from.to_vec();
    indices.sort_unstable();
    indices.dedup();

    if let Some(&bad) = indices.iter().find(|&&i| i >= rows.len()) {
        return Err(bad);
    }
    if to > rows.len() {
        return Err(to);
    }

    let before = indices.iter().filter(|&&i| i < to).count();
    let mut moved: Vec<T> = indices.iter().rev().map(|&i| rows.remove(i)).collect();
    moved.reverse();

    let insert_at = to - before;
    rows.splice(insert_at..insert_at, moved);
    Ok(())
}

/// Pasteboard payload for dragged rows: comma-separated indices.
pub fn encode_row_indices(rows: &[usize]) -> String {
    rows.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Inverse of [`encode_row_indices`]; malformed entries are skipped.
pub fn decode_row_indices(payload: &str) -> Vec<usize> {
    payload
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_index_payload() {
        assert_eq!(encode_row_indices(&[0, 3, 4]), "0,3,4");
        assert_eq!(decode_row_indices("0,3,4"), [0, 3, 4]);
        assert_eq!(decode_row_indices("2, x,,7"), [2, 7]);
        assert!(decode_row_indices("").is_empty());
    }

    #[test]
    fn test_reorder_single_row_up() {
        let mut rows = vec!['a', 'b', 'c', 'd'];
        reorder_rows(&mut rows, &[3], 0).unwrap();
        assert_eq!(rows, ['d', 'a', 'b', 'c']);
    }

    #[test]
    fn test_reorder_single_row_down() {
        let mut rows = vec!['a', 'b', 'c', 'd'];
        reorder_rows(&mut rows, &[0], 3).unwrap();
        assert_eq!(rows, ['b', 'c', 'a', 'd']);
    }

    #[test]
    fn test_reorder_to_end() {
        let mut rows = vec!['a', 'b', 'c'];
        reorder_rows(&mut rows, &[0], 3).unwrap();
        assert_eq!(rows, ['b', 'c', 'a']);
    }

    #[test]
    fn test_reorder_non_contiguous_keeps_order() {
        let mut rows = vec!['a', 'b', 'c', 'd', 'e'];
        reorder_rows(&mut rows, &[2, 0], 4).unwrap();
        assert_eq!(rows, ['b', 'd', 'a', 'c', 'e']);
    }

    #[test]
    fn test_reorder_ignores_duplicates() {
        let mut rows = vec!['a', 'b', 'c'];
        reorder_rows(&mut rows, &[2, 2], 0).unwrap();
        assert_eq!(rows, ['c', 'a', 'b']);
    }

    #[test]
    fn test_reorder_onto_itself() {
        let mut rows = vec!['a', 'b', 'c'];
        reorder_rows(&mut rows, &[1], 1).unwrap();
        assert_eq!(rows, ['a', 'b', 'c']);
        reorder_rows(&mut rows, &[1], 2).unwrap();
        assert_eq!(rows, ['a', 'b', 'c']);
    }

    #[test]
    fn test_reorder_rejects_out_of_range() {
        let mut rows = vec!['a', 'b'];
        assert_eq!(reorder_rows(&mut rows, &[5], 0), Err(5));
        assert_eq!(reorder_rows(&mut rows, &[0], 3), Err(3));
        assert_eq!(rows, ['a', 'b']);
    }
}
