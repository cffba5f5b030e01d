//! The single-visible-view state machine.
//!
//! Every configured service owns ten session slots. Exactly one slot across
//! the whole matrix is visible: the active slot of the active service. All
//! operations return the [`ViewCommand`]s needed to bring the real views in
//! line with the new state.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::slot::{SessionSlot, SlotKey, ViewCommand};
use crate::error::SelectionError;
use crate::model::service::ensure_unique_ids;
use crate::model::{ServiceDefinition, ServiceId, SlotIndex};

type SlotRow = [SessionSlot; SlotIndex::COUNT];

#[derive(Debug, Clone, Default)]
pub struct SessionMatrix {
    services: Vec<ServiceDefinition>,
    slots: HashMap<ServiceId, SlotRow>,
    active_service: Option<ServiceId>,
    active_indices: HashMap<ServiceId, SlotIndex>,
    inspector: Option<SlotKey>,
}

impl SessionMatrix {
    /// Builds the matrix for `services`, activating `preferred_name` when it
    /// is configured and the first service otherwise.
    ///
    /// Returns `Create` for every slot followed by the load/reveal of the
    /// active one.
    pub fn new(
        services: Vec<ServiceDefinition>,
        preferred_name: Option<&str>,
    ) -> (Self, Vec<ViewCommand>) {
        let mut services = services;
        ensure_unique_ids(&mut services);

        let mut matrix = Self::default();
        let mut commands = Vec::new();
        for service in &services {
            matrix.add_slots(&service.id, &mut commands);
        }
        matrix.services = services;

        matrix.active_service = preferred_name
            .and_then(|name| matrix.id_for_name(name).cloned())
            .or_else(|| matrix.services.first().map(|s| s.id.clone()));

        matrix.recompute_into(&mut commands);
        (matrix, commands)
    }

    // === Selection ===

    /// Activates the service called `name`.
    pub fn switch_service(&mut self, name: &str) -> Result<Vec<ViewCommand>, SelectionError> {
        let id = self
            .id_for_name(name)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownService(name.to_owned()))?;
        self.switch_service_id(&id)
    }

    /// Activates the service at `position` in configuration order.
    pub fn switch_service_at(&mut self, position: usize) -> Result<Vec<ViewCommand>, SelectionError> {
        let id = self
            .services
            .get(position)
            .map(|s| s.id.clone())
            .ok_or(SelectionError::ServiceOutOfRange {
                position,
                count: self.services.len(),
            })?;
        self.switch_service_id(&id)
    }

    /// Activates the service with `id`, keeping its remembered slot index.
    pub fn switch_service_id(&mut self, id: &ServiceId) -> Result<Vec<ViewCommand>, SelectionError> {
        if !self.slots.contains_key(id) {
            return Err(SelectionError::UnknownService(id.to_string()));
        }
        if self.active_service.as_ref() == Some(id) {
            return Ok(Vec::new());
        }

        let mut commands = Vec::new();
        self.close_inspector_into(&mut commands);
        self.active_service = Some(id.clone());
        self.recompute_into(&mut commands);
        debug!(service = %id, "switched service");
        Ok(commands)
    }

    /// Shows slot `index` of the active service.
    ///
    /// Selecting the slot that is already shown yields no commands.
    pub fn switch_slot(&mut self, index: SlotIndex) -> Result<Vec<ViewCommand>, SelectionError> {
        let active = self
            .active_service
            .clone()
            .ok_or(SelectionError::NoActiveService)?;
        if self.active_indices.get(&active) == Some(&index) {
            return Ok(Vec::new());
        }

        let mut commands = Vec::new();
        self.close_inspector_into(&mut commands);
        self.active_indices.insert(active.clone(), index);
        self.recompute_into(&mut commands);
        debug!(service = %active, %index, "switched slot");
        Ok(commands)
    }

    // === Visibility ===

    /// Hides every slot but the active one and reveals the active one,
    /// loading it first if it was never loaded.
    ///
    /// Only slots whose hidden state changes produce a `SetHidden`.
    pub fn recompute_visibility(&mut self) -> Vec<ViewCommand> {
        let mut commands = Vec::new();
        self.recompute_into(&mut commands);
        commands
    }

    fn recompute_into(&mut self, commands: &mut Vec<ViewCommand>) {
        let active = self.active_key();

        for service in &self.services {
            let Some(row) = self.slots.get_mut(&service.id) else {
                continue;
            };
            for index in SlotIndex::all() {
                let slot = &mut row[index.as_usize()];
                let key = SlotKey::new(service.id.clone(), index);
                if active.as_ref() != Some(&key) && !slot.is_hidden() {
                    slot.set_hidden(true);
                    commands.push(ViewCommand::SetHidden { key, hidden: true });
                }
            }
        }

        let Some(key) = active else {
            return;
        };
        let url = self.definition(&key.service).map(|s| s.url.clone());
        let Some(slot) = self.slot_mut(&key) else {
            return;
        };
        if !slot.is_loaded() {
            slot.mark_loaded();
            if let Some(url) = url {
                commands.push(ViewCommand::Load {
                    key: key.clone(),
                    url,
                });
            }
        }
        if slot.is_hidden() {
            slot.set_hidden(false);
            commands.push(ViewCommand::SetHidden { key, hidden: false });
        }
    }

    // === Configuration Changes ===

    /// Aligns the matrix with a new service list.
    ///
    /// Removed services lose all their slots, new services get ten fresh
    /// slots at index 1, surviving services keep their slot index and take
    /// over their edited definition. If the active service disappeared the
    /// first remaining one becomes active.
    pub fn reconcile(&mut self, new_services: Vec<ServiceDefinition>) -> Vec<ViewCommand> {
        let mut new_services = new_services;
        ensure_unique_ids(&mut new_services);

        let mut commands = Vec::new();
        let keep: HashSet<&ServiceId> = new_services.iter().map(|s| &s.id).collect();

        let removed: Vec<ServiceId> = self
            .services
            .iter()
            .filter(|s| !keep.contains(&s.id))
            .map(|s| s.id.clone())
            .collect();
        for id in removed {
            if self.inspector.as_ref().is_some_and(|key| key.service == id) {
                self.close_inspector_into(&mut commands);
            }
            self.slots.remove(&id);
            self.active_indices.remove(&id);
            commands.extend(
                SlotIndex::all().map(|index| ViewCommand::Destroy(SlotKey::new(id.clone(), index))),
            );
        }

        for service in &new_services {
            if !self.slots.contains_key(&service.id) {
                self.add_slots(&service.id, &mut commands);
            }
        }
        self.services = new_services;

        let active_survives = self
            .active_service
            .as_ref()
            .is_some_and(|id| self.slots.contains_key(id));
        if !active_survives {
            self.active_service = self.services.first().map(|s| s.id.clone());
        }

        self.recompute_into(&mut commands);
        commands
    }

    fn add_slots(&mut self, id: &ServiceId, commands: &mut Vec<ViewCommand>) {
        self.slots.insert(id.clone(), [SessionSlot::new(); SlotIndex::COUNT]);
        self.active_indices.insert(id.clone(), SlotIndex::DEFAULT);
        commands.extend(SlotIndex::all().map(|index| ViewCommand::Create(SlotKey::new(id.clone(), index))));
    }

    // === Inspector & Focus ===

    /// Opens the developer inspector on the active slot, or closes it.
    pub fn toggle_inspector(&mut self) -> Vec<ViewCommand> {
        let mut commands = Vec::new();
        if self.inspector.is_some() {
            self.close_inspector_into(&mut commands);
        } else if let Some(key) = self.active_key() {
            self.inspector = Some(key.clone());
            commands.push(ViewCommand::OpenInspector(key));
        }
        commands
    }

    fn close_inspector_into(&mut self, commands: &mut Vec<ViewCommand>) {
        if let Some(key) = self.inspector.take() {
            commands.push(ViewCommand::CloseInspector(key));
        }
    }

    /// Focus command for the active slot, when its service has a selector.
    pub fn focus_command(&self) -> Option<ViewCommand> {
        let key = self.active_key()?;
        let selector = self.definition(&key.service)?.selector()?.to_owned();
        Some(ViewCommand::FocusInput { key, selector })
    }

    // === Accessors ===

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn active_service(&self) -> Option<&ServiceId> {
        self.active_service.as_ref()
    }

    pub fn active_definition(&self) -> Option<&ServiceDefinition> {
        self.active_service.as_ref().and_then(|id| self.definition(id))
    }

    /// Position of the active service in configuration order.
    pub fn active_position(&self) -> Option<usize> {
        let id = self.active_service.as_ref()?;
        self.services.iter().position(|s| &s.id == id)
    }

    pub fn active_slot_index(&self, id: &ServiceId) -> Option<SlotIndex> {
        self.active_indices.get(id).copied()
    }

    pub fn active_key(&self) -> Option<SlotKey> {
        let id = self.active_service.as_ref()?;
        let index = self.active_indices.get(id)?;
        Some(SlotKey::new(id.clone(), *index))
    }

    pub fn active_slot(&self) -> Option<&SessionSlot> {
        self.active_key().and_then(|key| self.slot(&key))
    }

    pub fn slot(&self, key: &SlotKey) -> Option<&SessionSlot> {
        self.slots.get(&key.service).map(|row| &row[key.index.as_usize()])
    }

    fn slot_mut(&mut self, key: &SlotKey) -> Option<&mut SessionSlot> {
        self.slots
            .get_mut(&key.service)
            .map(|row| &mut row[key.index.as_usize()])
    }

    /// Keys of all slots currently not hidden.
    pub fn visible_keys(&self) -> Vec<SlotKey> {
        self.services
            .iter()
            .filter_map(|s| self.slots.get(&s.id).map(|row| (&s.id, row)))
            .flat_map(|(id, row)| {
                SlotIndex::all()
                    .filter(|index| !row[index.as_usize()].is_hidden())
                    .map(|index| SlotKey::new(id.clone(), index))
            })
            .collect()
    }

    pub fn inspector_open(&self) -> Option<&SlotKey> {
        self.inspector.as_ref()
    }

    pub fn definition(&self, id: &ServiceId) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| &s.id == id)
    }

    /// First service whose display name is `name`.
    pub fn id_for_name(&self, name: &str) -> Option<&ServiceId> {
        self.services.iter().find(|s| s.name == name).map(|s| &s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str) -> ServiceDefinition {
        ServiceDefinition::with_id(
            ServiceId::from(id),
            id.to_uppercase(),
            format!("https://{id}.example"),
            "",
        )
    }

    fn key(id: &str, index: u8) -> SlotKey {
        SlotKey::new(ServiceId::from(id), SlotIndex::new(index).unwrap())
    }

    #[test]
    fn test_new_creates_all_slots_then_reveals_active() {
        let (matrix, commands) = SessionMatrix::new(vec![service("a"), service("b")], None);
        let creates = commands
            .iter()
            .filter(|c| matches!(c, ViewCommand::Create(_)))
            .count();
        assert_eq!(creates, 20);
        assert_eq!(
            &commands[20..],
            &[
                ViewCommand::Load {
                    key: key("a", 1),
                    url: "https://a.example".into()
                },
                ViewCommand::SetHidden {
                    key: key("a", 1),
                    hidden: false
                },
            ]
        );
        assert_eq!(matrix.visible_keys(), vec![key("a", 1)]);
    }

    #[test]
    fn test_new_prefers_named_service() {
        let (matrix, _) = SessionMatrix::new(vec![service("a"), service("b")], Some("B"));
        assert_eq!(matrix.active_service(), Some(&ServiceId::from("b")));
    }

    #[test]
    fn test_new_with_unknown_preference_uses_first() {
        let (matrix, _) = SessionMatrix::new(vec![service("a"), service("b")], Some("Grok"));
        assert_eq!(matrix.active_service(), Some(&ServiceId::from("a")));
    }

    #[test]
    fn test_new_empty() {
        let (matrix, commands) = SessionMatrix::new(Vec::new(), Some("Grok"));
        assert!(commands.is_empty());
        assert!(matrix.active_key().is_none());
        assert!(matrix.focus_command().is_none());
    }

    #[test]
    fn test_switch_slot_same_index_is_noop() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        let commands = matrix.switch_slot(SlotIndex::DEFAULT).unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_switch_slot_loads_before_reveal() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        let commands = matrix.switch_slot(SlotIndex::new(3).unwrap()).unwrap();
        assert_eq!(
            commands,
            vec![
                ViewCommand::SetHidden {
                    key: key("a", 1),
                    hidden: true
                },
                ViewCommand::Load {
                    key: key("a", 3),
                    url: "https://a.example".into()
                },
                ViewCommand::SetHidden {
                    key: key("a", 3),
                    hidden: false
                },
            ]
        );
    }

    #[test]
    fn test_revisiting_slot_does_not_reload() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        matrix.switch_slot(SlotIndex::new(3).unwrap()).unwrap();
        let commands = matrix.switch_slot(SlotIndex::DEFAULT).unwrap();
        assert!(!commands
            .iter()
            .any(|c| matches!(c, ViewCommand::Load { .. })));
    }

    #[test]
    fn test_switch_slot_without_services() {
        let (mut matrix, _) = SessionMatrix::new(Vec::new(), None);
        assert_eq!(
            matrix.switch_slot(SlotIndex::DEFAULT),
            Err(SelectionError::NoActiveService)
        );
    }

    #[test]
    fn test_switch_service_keeps_slot_index() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a"), service("b")], None);
        matrix.switch_slot(SlotIndex::new(4).unwrap()).unwrap();
        matrix.switch_service("B").unwrap();
        matrix.switch_service("A").unwrap();
        assert_eq!(matrix.active_key(), Some(key("a", 4)));
    }

    #[test]
    fn test_switch_unknown_service_changes_nothing() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        let err = matrix.switch_service("Nope").unwrap_err();
        assert_eq!(err, SelectionError::UnknownService("Nope".into()));
        assert_eq!(matrix.active_key(), Some(key("a", 1)));
    }

    #[test]
    fn test_switch_service_at_out_of_range() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        assert_eq!(
            matrix.switch_service_at(1),
            Err(SelectionError::ServiceOutOfRange {
                position: 1,
                count: 1
            })
        );
    }

    #[test]
    fn test_switch_to_active_service_is_noop() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        assert!(matrix.switch_service_at(0).unwrap().is_empty());
    }

    #[test]
    fn test_inspector_closes_before_slot_switch() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        assert_eq!(
            matrix.toggle_inspector(),
            vec![ViewCommand::OpenInspector(key("a", 1))]
        );
        let commands = matrix.switch_slot(SlotIndex::new(2).unwrap()).unwrap();
        assert_eq!(commands[0], ViewCommand::CloseInspector(key("a", 1)));
        assert!(matrix.inspector_open().is_none());
    }

    #[test]
    fn test_toggle_inspector_closes_when_open() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        matrix.toggle_inspector();
        assert_eq!(
            matrix.toggle_inspector(),
            vec![ViewCommand::CloseInspector(key("a", 1))]
        );
    }

    #[test]
    fn test_toggle_inspector_without_services() {
        let (mut matrix, _) = SessionMatrix::new(Vec::new(), None);
        assert!(matrix.toggle_inspector().is_empty());
    }

    #[test]
    fn test_reconcile_removes_inspected_service() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a"), service("b")], None);
        matrix.toggle_inspector();
        let commands = matrix.reconcile(vec![service("b")]);
        assert_eq!(commands[0], ViewCommand::CloseInspector(key("a", 1)));
        assert!(matrix.inspector_open().is_none());
    }

    #[test]
    fn test_reconcile_to_empty() {
        let (mut matrix, _) = SessionMatrix::new(vec![service("a")], None);
        let commands = matrix.reconcile(Vec::new());
        assert_eq!(commands.len(), 10);
        assert!(matrix.active_service().is_none());
        assert!(matrix.visible_keys().is_empty());
    }

    #[test]
    fn test_focus_command_uses_selector() {
        let def = ServiceDefinition::with_id(ServiceId::from("a"), "A", "https://a", "#prompt");
        let (matrix, _) = SessionMatrix::new(vec![def], None);
        assert_eq!(
            matrix.focus_command(),
            Some(ViewCommand::FocusInput {
                key: key("a", 1),
                selector: "#prompt".into()
            })
        );
    }

    #[test]
    fn test_focus_command_without_selector() {
        let (matrix, _) = SessionMatrix::new(vec![service("a")], None);
        assert!(matrix.focus_command().is_none());
    }
}
