//! Session matrix behaviour across whole scenarios.

use quiper::model::service::default_services;
use quiper::{ServiceDefinition, ServiceId, SessionMatrix, SlotIndex, SlotKey, ViewCommand};

fn service(id: &str) -> ServiceDefinition {
    ServiceDefinition::with_id(
        ServiceId::from(id),
        id.to_uppercase(),
        format!("https://{id}.example"),
        "",
    )
}

fn slot(n: u8) -> SlotIndex {
    SlotIndex::new(n).unwrap()
}

fn id_of(matrix: &SessionMatrix, name: &str) -> ServiceId {
    matrix.id_for_name(name).cloned().unwrap()
}

fn assert_single_visible(matrix: &SessionMatrix) {
    let visible = matrix.visible_keys();
    match matrix.active_key() {
        Some(active) => assert_eq!(visible, vec![active]),
        None => assert!(visible.is_empty()),
    }
}

// === Scenarios ===

#[test]
fn default_services_switch_to_gemini_then_slot_three() {
    let (mut matrix, _) = SessionMatrix::new(default_services(), Some("Grok"));
    let grok = id_of(&matrix, "Grok");
    let gemini = id_of(&matrix, "Gemini");
    assert_eq!(matrix.active_key(), Some(SlotKey::new(grok.clone(), slot(1))));

    let commands = matrix.switch_service("Gemini").unwrap();
    assert_eq!(matrix.active_service(), Some(&gemini));
    assert_eq!(matrix.visible_keys(), vec![SlotKey::new(gemini.clone(), slot(1))]);
    assert!(commands.contains(&ViewCommand::SetHidden {
        key: SlotKey::new(grok.clone(), slot(1)),
        hidden: true,
    }));

    let commands = matrix.switch_slot(slot(3)).unwrap();
    assert_eq!(matrix.active_slot_index(&gemini), Some(slot(3)));
    let target = SlotKey::new(gemini, slot(3));
    let load = commands
        .iter()
        .position(|c| matches!(c, ViewCommand::Load { key, .. } if *key == target))
        .expect("slot 3 loads");
    let reveal = commands
        .iter()
        .position(|c| *c == ViewCommand::SetHidden { key: target.clone(), hidden: false })
        .expect("slot 3 is revealed");
    assert!(load < reveal);
    assert_single_visible(&matrix);
    assert!(SlotIndex::all().all(|i| matrix
        .slot(&SlotKey::new(grok.clone(), i))
        .unwrap()
        .is_hidden()));
}

#[test]
fn reconcile_removing_active_service_activates_first_remaining() {
    let (mut matrix, _) =
        SessionMatrix::new(vec![service("a"), service("b"), service("c")], Some("A"));
    let commands = matrix.reconcile(vec![service("b"), service("c"), service("d")]);

    let b = ServiceId::from("b");
    let d = ServiceId::from("d");
    assert_eq!(matrix.active_service(), Some(&b));
    assert_eq!(matrix.active_slot_index(&d), Some(SlotIndex::DEFAULT));
    assert_eq!(matrix.active_slot_index(&ServiceId::from("a")), None);
    assert!(matrix.slot(&SlotKey::new(ServiceId::from("a"), slot(1))).is_none());

    let destroyed = commands
        .iter()
        .filter(|c| matches!(c, ViewCommand::Destroy(key) if key.service.as_str() == "a"))
        .count();
    let created = commands
        .iter()
        .filter(|c| matches!(c, ViewCommand::Create(key) if key.service == d))
        .count();
    assert_eq!(destroyed, SlotIndex::COUNT);
    assert_eq!(created, SlotIndex::COUNT);
    assert_single_visible(&matrix);
}

#[test]
fn renaming_a_service_keeps_its_sessions() {
    let (mut matrix, _) = SessionMatrix::new(vec![service("a"), service("b")], None);
    matrix.switch_slot(slot(5)).unwrap();

    let mut renamed = service("a");
    renamed.name = "Alpha".into();
    let commands = matrix.reconcile(vec![renamed, service("b")]);

    assert!(!commands
        .iter()
        .any(|c| matches!(c, ViewCommand::Destroy(_) | ViewCommand::Create(_))));
    assert_eq!(matrix.active_key(), Some(SlotKey::new(ServiceId::from("a"), slot(5))));
    assert_eq!(matrix.id_for_name("Alpha"), Some(&ServiceId::from("a")));
    assert!(matrix.id_for_name("A").is_none());
}

#[test]
fn reordering_services_keeps_the_active_one() {
    let (mut matrix, _) = SessionMatrix::new(vec![service("a"), service("b")], Some("B"));
    let commands = matrix.reconcile(vec![service("b"), service("a")]);
    assert!(commands.is_empty());
    assert_eq!(matrix.active_position(), Some(0));
}

// === Invariants ===

#[test]
fn exactly_one_view_visible_through_a_session() {
    let (mut matrix, _) =
        SessionMatrix::new(vec![service("a"), service("b"), service("c")], None);
    assert_single_visible(&matrix);

    for n in [3, 0, 9, 3] {
        matrix.switch_slot(slot(n)).unwrap();
        assert_single_visible(&matrix);
    }
    for position in [2, 0, 1] {
        matrix.switch_service_at(position).unwrap();
        assert_single_visible(&matrix);
    }
    matrix.reconcile(vec![service("c"), service("d")]);
    assert_single_visible(&matrix);
    matrix.reconcile(Vec::new());
    assert_single_visible(&matrix);
}

#[test]
fn each_slot_loads_at_most_once() {
    let (mut matrix, initial) = SessionMatrix::new(vec![service("a"), service("b")], None);
    let mut loads: Vec<SlotKey> = initial
        .into_iter()
        .filter_map(|c| match c {
            ViewCommand::Load { key, .. } => Some(key),
            _ => None,
        })
        .collect();

    let steps: Vec<Box<dyn Fn(&mut SessionMatrix) -> Vec<ViewCommand>>> = vec![
        Box::new(|m| m.switch_slot(slot(2)).unwrap()),
        Box::new(|m| m.switch_service_at(1).unwrap()),
        Box::new(|m| m.switch_service_at(0).unwrap()),
        Box::new(|m| m.switch_slot(slot(1)).unwrap()),
        Box::new(|m| m.switch_slot(slot(2)).unwrap()),
        Box::new(|m| m.switch_service_at(1).unwrap()),
    ];
    for step in steps {
        loads.extend(step(&mut matrix).into_iter().filter_map(|c| match c {
            ViewCommand::Load { key, .. } => Some(key),
            _ => None,
        }));
    }

    let mut unique = loads.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), loads.len());
    assert_eq!(loads.len(), 3);
}

#[test]
fn every_service_remembers_its_own_slot() {
    let (mut matrix, _) = SessionMatrix::new(vec![service("a"), service("b")], None);
    matrix.switch_slot(slot(7)).unwrap();
    matrix.switch_service("B").unwrap();
    assert_eq!(matrix.active_key(), Some(SlotKey::new(ServiceId::from("b"), SlotIndex::DEFAULT)));
    matrix.switch_slot(slot(0)).unwrap();
    matrix.switch_service("A").unwrap();
    assert_eq!(matrix.active_key(), Some(SlotKey::new(ServiceId::from("a"), slot(7))));
    assert_eq!(matrix.active_slot_index(&ServiceId::from("b")), Some(slot(0)));
}

#[test]
fn duplicate_ids_are_split_into_separate_services() {
    let mut copy = service("a");
    copy.name = "Copy".into();
    let (matrix, commands) = SessionMatrix::new(vec![service("a"), copy], None);
    assert_eq!(matrix.services().len(), 2);
    assert_ne!(matrix.services()[0].id, matrix.services()[1].id);
    let creates = commands
        .iter()
        .filter(|c| matches!(c, ViewCommand::Create(_)))
        .count();
    assert_eq!(creates, 2 * SlotIndex::COUNT);
}
