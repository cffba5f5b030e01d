//! Controller flows driven the way the platform shell drives them.

use quiper::model::service::default_services;
use quiper::model::{ServiceField, KC_COMMA, KC_I, KC_Q};
use quiper::settings::SettingsEditor;
use quiper::storage::{AppPaths, ConfigStore};
use quiper::{
    AppEvent, Effect, EventBus, HotkeyDescriptor, KeyInput, MenuCommand, Modifiers,
    OverlayController, ServiceDefinition, ServiceId, SlotIndex, SlotKey, ViewCommand,
};

const KC_1: u16 = 18;
const KC_2: u16 = 19;
const KC_3: u16 = 20;

fn key(code: u16, modifiers: Modifiers) -> AppEvent {
    AppEvent::Key(KeyInput::new(code, modifiers))
}

fn started(services: Vec<ServiceDefinition>) -> OverlayController {
    OverlayController::new(services, HotkeyDescriptor::default()).0
}

fn views(effects: &[Effect]) -> Vec<&ViewCommand> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::View(command) => Some(command),
            _ => None,
        })
        .collect()
}

#[test]
fn startup_prefers_grok_and_loads_only_it() {
    let (controller, effects) =
        OverlayController::new(default_services(), HotkeyDescriptor::default());
    let grok = controller.matrix().id_for_name("Grok").cloned().unwrap();

    let loads: Vec<&ViewCommand> = views(&effects)
        .into_iter()
        .filter(|c| matches!(c, ViewCommand::Load { .. }))
        .collect();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].key(), &SlotKey::new(grok, SlotIndex::DEFAULT));

    let Some(Effect::SyncSelectors(state)) = effects
        .iter()
        .find(|e| matches!(e, Effect::SyncSelectors(_)))
    else {
        panic!("selectors are synced at startup");
    };
    assert_eq!(state.labels, ["ChatGPT", "Gemini", "Grok"]);
    assert_eq!(state.selected_service, Some(2));
    assert_eq!(state.selected_slot, Some(0));
}

#[test]
fn keyboard_session_switches_service_and_slot() {
    let mut controller = started(default_services());
    controller.dispatch(AppEvent::GlobalHotkey);

    let effects = controller.dispatch(key(KC_2, Modifiers::COMMAND | Modifiers::OPTION));
    let gemini = controller.matrix().id_for_name("Gemini").cloned().unwrap();
    assert_eq!(controller.matrix().active_service(), Some(&gemini));
    assert!(matches!(
        effects.last(),
        Some(Effect::View(ViewCommand::FocusInput { selector, .. })) if selector == ".textarea"
    ));

    let effects = controller.dispatch(key(KC_3, Modifiers::COMMAND));
    assert_eq!(
        controller.matrix().active_key(),
        Some(SlotKey::new(gemini, SlotIndex::new(3).unwrap()))
    );
    assert!(effects.iter().any(|e| matches!(e, Effect::SyncSelectors(s) if s.selected_slot == Some(2))));
}

#[test]
fn selection_while_hidden_does_not_focus() {
    let mut controller = started(default_services());
    let effects = controller.dispatch(AppEvent::ServiceSelected(0));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::View(ViewCommand::FocusInput { .. }))));
}

#[test]
fn session_shortcuts_are_inert_without_services() {
    let mut controller = started(Vec::new());
    controller.dispatch(AppEvent::GlobalHotkey);
    for event in [
        key(KC_1, Modifiers::COMMAND),
        key(KC_1, Modifiers::COMMAND | Modifiers::OPTION),
        key(KC_I, Modifiers::COMMAND | Modifiers::OPTION),
    ] {
        assert!(controller.dispatch(event).is_empty());
    }
    assert!(controller.is_visible());

    assert_eq!(
        controller.dispatch(key(KC_COMMA, Modifiers::COMMAND)),
        vec![Effect::ShowSettings]
    );
    assert_eq!(
        controller.dispatch(key(KC_Q, Modifiers::COMMAND | Modifiers::CONTROL | Modifiers::SHIFT)),
        vec![Effect::Terminate]
    );
}

#[test]
fn quit_shortcut_terminates() {
    let mut controller = started(default_services());
    assert_eq!(
        controller.dispatch(key(KC_Q, Modifiers::COMMAND | Modifiers::CONTROL | Modifiers::SHIFT)),
        vec![Effect::Terminate]
    );
}

#[test]
fn switching_service_resets_inspector_title() {
    let mut controller = started(default_services());
    let effects = controller.dispatch(AppEvent::Menu(MenuCommand::ToggleInspector));
    assert_eq!(
        effects.last(),
        Some(&Effect::SetInspectorMenuTitle("Hide Inspector"))
    );

    let effects = controller.dispatch(AppEvent::ServiceSelected(0));
    assert!(matches!(
        effects.first(),
        Some(Effect::View(ViewCommand::CloseInspector(_)))
    ));
    assert!(effects.contains(&Effect::SetInspectorMenuTitle("Show Inspector")));
    assert!(controller.matrix().inspector_open().is_none());
}

#[test]
fn editor_changes_reach_the_controller_through_the_bus() {
    let bus = EventBus::new();
    let publisher = bus.publisher();
    let mut controller = started(vec![
        ServiceDefinition::with_id(ServiceId::from("a"), "A", "https://a.example", ""),
        ServiceDefinition::with_id(ServiceId::from("b"), "B", "https://b.example", ""),
    ]);

    publisher.publish(AppEvent::ServicesChanged(vec![ServiceDefinition::with_id(
        ServiceId::from("b"),
        "Bee",
        "https://b.example",
        "",
    )]));

    let mut effects = Vec::new();
    for event in bus.drain() {
        effects.extend(controller.dispatch(event));
    }

    let destroyed = views(&effects)
        .into_iter()
        .filter(|c| matches!(c, ViewCommand::Destroy(k) if k.service.as_str() == "a"))
        .count();
    assert_eq!(destroyed, SlotIndex::COUNT);
    assert_eq!(controller.matrix().active_service(), Some(&ServiceId::from("b")));
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::SyncSelectors(s) if s.labels == ["Bee"] && s.selected_service == Some(0)
    )));
}

#[test]
fn menu_login_items_map_to_effects() {
    let mut controller = started(Vec::new());
    assert_eq!(
        controller.dispatch(AppEvent::Menu(MenuCommand::InstallAtLogin)),
        vec![Effect::InstallLoginItem]
    );
    assert_eq!(
        controller.dispatch(AppEvent::Menu(MenuCommand::UninstallFromLogin)),
        vec![Effect::UninstallLoginItem]
    );
    assert_eq!(
        controller.dispatch(AppEvent::Menu(MenuCommand::ClearWebCache)),
        vec![Effect::ClearWebsiteData]
    );
}

/// Picks Gemini slot 3, edits the third row through an editor opened the way
/// the settings window opens it, and feeds the published change back.
fn edit_after_selecting(
    controller: &mut OverlayController,
    editor: impl FnOnce(&OverlayController, &EventBus) -> SettingsEditor,
    row: usize,
    field: ServiceField,
    value: &str,
) -> Vec<Effect> {
    let bus = EventBus::new();
    let mut editor = editor(&*controller, &bus);
    editor.edit_field(row, field, value).unwrap();

    let mut effects = Vec::new();
    for event in bus.drain() {
        effects.extend(controller.dispatch(event));
    }
    effects
}

fn destroyed(effects: &[Effect]) -> usize {
    views(effects)
        .into_iter()
        .filter(|c| matches!(c, ViewCommand::Destroy(_)))
        .count()
}

#[test]
fn first_launch_edit_keeps_every_session() {
    let dir = tempfile::tempdir().unwrap();
    let paths = AppPaths::rooted(dir.path());
    let store = ConfigStore::new(&paths.settings_file);
    let mut controller = started(store.load());
    controller.dispatch(key(KC_2, Modifiers::COMMAND | Modifiers::OPTION));
    controller.dispatch(key(KC_3, Modifiers::COMMAND));
    let selected = controller.matrix().active_key().unwrap();

    let effects = edit_after_selecting(
        &mut controller,
        |_, bus| SettingsEditor::open(store.clone(), bus.publisher()),
        2,
        ServiceField::Name,
        "Grok 2",
    );

    assert_eq!(destroyed(&effects), 0);
    assert_eq!(controller.matrix().active_key(), Some(selected));
    assert_eq!(controller.matrix().services()[2].name, "Grok 2");
}

#[test]
fn legacy_file_without_ids_keeps_every_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("settings.json"));
    std::fs::write(
        store.path(),
        r#"[{"name": "A", "url": "https://a.example"},
            {"name": "B", "url": "https://b.example"},
            {"name": "C", "url": "https://c.example"}]"#,
    )
    .unwrap();
    let mut controller = started(store.load());
    controller.dispatch(key(KC_2, Modifiers::COMMAND | Modifiers::OPTION));
    controller.dispatch(key(KC_3, Modifiers::COMMAND));
    let selected = controller.matrix().active_key().unwrap();

    let effects = edit_after_selecting(
        &mut controller,
        |_, bus| SettingsEditor::open(store.clone(), bus.publisher()),
        2,
        ServiceField::Url,
        "https://c2.example",
    );

    assert_eq!(destroyed(&effects), 0);
    assert_eq!(controller.matrix().active_key(), Some(selected));
}

#[test]
fn editor_seeded_from_the_controller_survives_an_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("settings.json"));
    std::fs::write(store.path(), "{not json").unwrap();
    let mut controller = started(store.load());
    controller.dispatch(key(KC_2, Modifiers::COMMAND | Modifiers::OPTION));
    controller.dispatch(key(KC_3, Modifiers::COMMAND));
    let selected = controller.matrix().active_key().unwrap();

    let effects = edit_after_selecting(
        &mut controller,
        |controller, bus| {
            SettingsEditor::with_rows(
                controller.matrix().services().to_vec(),
                store.clone(),
                bus.publisher(),
            )
        },
        2,
        ServiceField::Name,
        "Grok 2",
    );

    assert_eq!(destroyed(&effects), 0);
    assert_eq!(controller.matrix().active_key(), Some(selected));
    assert_eq!(store.try_load().unwrap(), controller.matrix().services());
}
