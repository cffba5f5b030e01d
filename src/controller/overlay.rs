//! The overlay window controller.
//!
//! Owns the session matrix, the toggle hotkey, the window state and the
//! settings window flag. Every input arrives as an [`AppEvent`] through
//! [`OverlayController::dispatch`], which returns the [`Effect`]s the
//! platform shell must execute.

use tracing::{debug, info};

use super::effects::{Effect, SelectorState};
use super::keymap::{route_overlay_key, KeyAction};
use crate::error::SelectionError;
use crate::events::{AppEvent, MenuCommand};
use crate::model::{
    HotkeyDescriptor, KeyInput, ServiceDefinition, SlotIndex, DEFAULT_SERVICE,
    HIDE_INSPECTOR_TITLE, SHOW_INSPECTOR_TITLE,
};
use crate::session::{SessionMatrix, ViewCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Hidden,
    Visible,
}

#[derive(Debug, Clone)]
pub struct OverlayController {
    matrix: SessionMatrix,
    hotkey: HotkeyDescriptor,
    window: WindowState,
    settings_visible: bool,
}

impl OverlayController {
    /// Builds the controller with the window hidden.
    ///
    /// The returned effects create every web view, load the active one,
    /// populate the selectors and arm the global hotkey.
    pub fn new(services: Vec<ServiceDefinition>, hotkey: HotkeyDescriptor) -> (Self, Vec<Effect>) {
        let (matrix, commands) = SessionMatrix::new(services, Some(DEFAULT_SERVICE));
        let controller = Self {
            matrix,
            hotkey,
            window: WindowState::Hidden,
            settings_visible: false,
        };

        let mut effects: Vec<Effect> = commands.into_iter().map(Effect::View).collect();
        effects.push(Effect::SyncSelectors(controller.selector_state()));
        effects.push(Effect::ArmHotkey(hotkey));
        (controller, effects)
    }

    /// Single entry point for every input.
    pub fn dispatch(&mut self, event: AppEvent) -> Vec<Effect> {
        debug!(event = event.description(), "dispatch");
        let rearm = event.requires_hotkey_reinstall();

        let mut effects = match event {
            AppEvent::GlobalHotkey => self.toggle(),
            AppEvent::Key(input) => self.handle_key(input),
            AppEvent::Menu(command) => self.handle_menu(command),
            AppEvent::ServiceSelected(segment) => self.select(|m| m.switch_service_at(segment)),
            AppEvent::SlotSelected(segment) => match SlotIndex::from_segment(segment) {
                Some(index) => self.select(|m| m.switch_slot(index)),
                None => {
                    debug!(segment, "ignoring unknown session segment");
                    Vec::new()
                }
            },
            AppEvent::ServicesChanged(services) => self.reconcile(services),
            AppEvent::HotkeyRecorded(hotkey) => {
                info!(hotkey = %hotkey.display_string(), "recorded new hotkey");
                self.set_hotkey(hotkey);
                vec![Effect::PersistHotkey(hotkey)]
            }
            AppEvent::SettingsClosed => {
                if self.settings_visible {
                    self.close_settings()
                } else {
                    Vec::new()
                }
            }
            AppEvent::AppDeactivated => {
                self.window = WindowState::Hidden;
                if self.settings_visible {
                    self.settings_visible = false;
                    vec![Effect::HideSettings]
                } else {
                    Vec::new()
                }
            }
            AppEvent::LinkActivated(url) => vec![Effect::OpenExternal(url)],
            AppEvent::ReinstallHotkeys => Vec::new(),
        };

        if rearm {
            effects.push(Effect::ArmHotkey(self.hotkey));
        }
        effects
    }

    // === Window Lifecycle ===

    /// Brings the overlay forward and focuses the active prompt.
    pub fn show(&mut self) -> Vec<Effect> {
        self.window = WindowState::Visible;
        let mut effects = vec![Effect::ShowWindow];
        effects.extend(self.matrix.focus_command().map(Effect::View));
        effects
    }

    /// Hides the settings window (if shown) and then the whole app.
    pub fn hide(&mut self) -> Vec<Effect> {
        self.window = WindowState::Hidden;
        let mut effects = Vec::new();
        if self.settings_visible {
            self.settings_visible = false;
            effects.push(Effect::HideSettings);
        }
        effects.push(Effect::HideApp);
        effects
    }

    pub fn toggle(&mut self) -> Vec<Effect> {
        match self.window {
            WindowState::Visible => self.hide(),
            WindowState::Hidden => self.show(),
        }
    }

    fn toggle_settings(&mut self) -> Vec<Effect> {
        if self.settings_visible {
            self.close_settings()
        } else {
            self.settings_visible = true;
            vec![Effect::ShowSettings]
        }
    }

    fn close_settings(&mut self) -> Vec<Effect> {
        self.settings_visible = false;
        let mut effects = vec![Effect::HideSettings];
        if self.window == WindowState::Visible {
            effects.push(Effect::ShowWindow);
        }
        effects
    }

    // === Input ===

    fn handle_key(&mut self, input: KeyInput) -> Vec<Effect> {
        let Some(action) = route_overlay_key(input) else {
            return Vec::new();
        };

        match action {
            KeyAction::SelectService(_) | KeyAction::SelectSlot(_) | KeyAction::ToggleInspector
                if self.matrix.is_empty() =>
            {
                debug!(?action, "no services configured, ignoring shortcut");
                Vec::new()
            }
            KeyAction::Quit => vec![Effect::Terminate],
            KeyAction::SelectService(position) => self.select(|m| m.switch_service_at(position)),
            KeyAction::ToggleInspector => self.toggle_inspector(),
            KeyAction::SelectSlot(index) => self.select(|m| m.switch_slot(index)),
            KeyAction::Edit(command) => vec![Effect::Edit(command)],
            KeyAction::ToggleSettings => self.toggle_settings(),
            KeyAction::Hide => self.hide(),
        }
    }

    fn handle_menu(&mut self, command: MenuCommand) -> Vec<Effect> {
        match command {
            MenuCommand::Show => self.show(),
            MenuCommand::Hide => self.hide(),
            MenuCommand::Settings => self.toggle_settings(),
            MenuCommand::ToggleInspector => self.toggle_inspector(),
            MenuCommand::ClearWebCache => vec![Effect::ClearWebsiteData],
            MenuCommand::SetNewHotkey => {
                let mut effects = self.show();
                effects.push(Effect::BeginHotkeyCapture);
                effects
            }
            MenuCommand::InstallAtLogin => vec![Effect::InstallLoginItem],
            MenuCommand::UninstallFromLogin => vec![Effect::UninstallLoginItem],
            MenuCommand::Quit => vec![Effect::Terminate],
        }
    }

    fn toggle_inspector(&mut self) -> Vec<Effect> {
        let commands = self.matrix.toggle_inspector();
        if commands.is_empty() {
            return Vec::new();
        }
        let title = if self.matrix.inspector_open().is_some() {
            HIDE_INSPECTOR_TITLE
        } else {
            SHOW_INSPECTOR_TITLE
        };
        let mut effects: Vec<Effect> = commands.into_iter().map(Effect::View).collect();
        effects.push(Effect::SetInspectorMenuTitle(title));
        effects
    }

    // === Selection ===

    fn select(
        &mut self,
        op: impl FnOnce(&mut SessionMatrix) -> Result<Vec<ViewCommand>, SelectionError>,
    ) -> Vec<Effect> {
        let inspector_was_open = self.matrix.inspector_open().is_some();
        match op(&mut self.matrix) {
            Ok(commands) if commands.is_empty() => Vec::new(),
            Ok(commands) => {
                let focus = self.window == WindowState::Visible;
                self.finish(commands, inspector_was_open, focus)
            }
            Err(err) => {
                debug!(%err, "ignoring selection");
                Vec::new()
            }
        }
    }

    /// Applies a new service list from the settings editor.
    pub fn reconcile(&mut self, services: Vec<ServiceDefinition>) -> Vec<Effect> {
        let inspector_was_open = self.matrix.inspector_open().is_some();
        let commands = self.matrix.reconcile(services);
        info!(services = self.matrix.services().len(), "reconciled service list");
        self.finish(commands, inspector_was_open, false)
    }

    fn finish(
        &self,
        commands: Vec<ViewCommand>,
        inspector_was_open: bool,
        focus: bool,
    ) -> Vec<Effect> {
        let mut effects: Vec<Effect> = commands.into_iter().map(Effect::View).collect();
        if inspector_was_open && self.matrix.inspector_open().is_none() {
            effects.push(Effect::SetInspectorMenuTitle(SHOW_INSPECTOR_TITLE));
        }
        effects.push(Effect::SyncSelectors(self.selector_state()));
        if focus {
            effects.extend(self.matrix.focus_command().map(Effect::View));
        }
        effects
    }

    /// Labels and selected segments for the selector chrome.
    pub fn selector_state(&self) -> SelectorState {
        SelectorState {
            labels: self
                .matrix
                .services()
                .iter()
                .map(|s| s.name.clone())
                .collect(),
            selected_service: self.matrix.active_position(),
            selected_slot: self.matrix.active_key().map(|key| key.index.segment()),
        }
    }

    // === Accessors ===

    pub fn matrix(&self) -> &SessionMatrix {
        &self.matrix
    }

    pub fn hotkey(&self) -> &HotkeyDescriptor {
        &self.hotkey
    }

    pub fn set_hotkey(&mut self, hotkey: HotkeyDescriptor) {
        self.hotkey = hotkey;
    }

    pub fn window_state(&self) -> WindowState {
        self.window
    }

    pub fn is_visible(&self) -> bool {
        self.window == WindowState::Visible
    }

    pub fn settings_visible(&self) -> bool {
        self.settings_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modifiers, ServiceId, KC_COMMA, KC_H};

    const KC_1: u16 = 18;

    fn controller() -> OverlayController {
        let services = vec![
            ServiceDefinition::with_id(ServiceId::from("a"), "A", "https://a.example", "#a"),
            ServiceDefinition::with_id(ServiceId::from("b"), "B", "https://b.example", ""),
        ];
        OverlayController::new(services, HotkeyDescriptor::default()).0
    }

    fn cmd(code: u16) -> AppEvent {
        AppEvent::Key(KeyInput::new(code, Modifiers::COMMAND))
    }

    #[test]
    fn test_starts_hidden_and_arms_hotkey() {
        let (controller, effects) =
            OverlayController::new(Vec::new(), HotkeyDescriptor::default());
        assert_eq!(controller.window_state(), WindowState::Hidden);
        assert_eq!(
            effects.last(),
            Some(&Effect::ArmHotkey(HotkeyDescriptor::default()))
        );
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut controller = controller();
        let effects = controller.dispatch(AppEvent::GlobalHotkey);
        assert_eq!(effects[0], Effect::ShowWindow);
        assert!(matches!(effects[1], Effect::View(ViewCommand::FocusInput { .. })));
        assert!(controller.is_visible());

        let effects = controller.dispatch(AppEvent::GlobalHotkey);
        assert_eq!(effects, vec![Effect::HideApp]);
        assert!(!controller.is_visible());
    }

    #[test]
    fn test_hide_closes_settings_first() {
        let mut controller = controller();
        controller.dispatch(AppEvent::GlobalHotkey);
        controller.dispatch(cmd(KC_COMMA));
        assert!(controller.settings_visible());

        let effects = controller.dispatch(cmd(KC_H));
        assert_eq!(effects, vec![Effect::HideSettings, Effect::HideApp]);
        assert!(!controller.settings_visible());
    }

    #[test]
    fn test_settings_shortcut_toggles() {
        let mut controller = controller();
        controller.dispatch(AppEvent::GlobalHotkey);
        assert_eq!(controller.dispatch(cmd(KC_COMMA)), vec![Effect::ShowSettings]);
        assert_eq!(
            controller.dispatch(cmd(KC_COMMA)),
            vec![Effect::HideSettings, Effect::ShowWindow]
        );
    }

    #[test]
    fn test_app_shortcuts_work_without_services() {
        let (mut controller, _) = OverlayController::new(Vec::new(), HotkeyDescriptor::default());
        controller.dispatch(AppEvent::GlobalHotkey);
        assert!(controller.dispatch(cmd(KC_1)).is_empty());
        assert_eq!(controller.dispatch(cmd(KC_COMMA)), vec![Effect::ShowSettings]);
        assert_eq!(
            controller.dispatch(cmd(KC_H)),
            vec![Effect::HideSettings, Effect::HideApp]
        );
    }

    #[test]
    fn test_settings_closed_when_already_hidden() {
        let mut controller = controller();
        assert!(controller.dispatch(AppEvent::SettingsClosed).is_empty());
    }

    #[test]
    fn test_deactivation_hides_settings() {
        let mut controller = controller();
        controller.dispatch(AppEvent::Menu(MenuCommand::Settings));
        assert_eq!(
            controller.dispatch(AppEvent::AppDeactivated),
            vec![Effect::HideSettings]
        );
        assert_eq!(controller.window_state(), WindowState::Hidden);
    }

    #[test]
    fn test_hotkey_recorded_persists_then_arms() {
        let mut controller = controller();
        let hotkey = HotkeyDescriptor::new(Modifiers::COMMAND | Modifiers::SHIFT, 49);
        let effects = controller.dispatch(AppEvent::HotkeyRecorded(hotkey));
        assert_eq!(
            effects,
            vec![Effect::PersistHotkey(hotkey), Effect::ArmHotkey(hotkey)]
        );
        assert_eq!(controller.hotkey(), &hotkey);
    }

    #[test]
    fn test_reinstall_rearms_current_hotkey() {
        let mut controller = controller();
        assert_eq!(
            controller.dispatch(AppEvent::ReinstallHotkeys),
            vec![Effect::ArmHotkey(HotkeyDescriptor::default())]
        );
    }

    #[test]
    fn test_link_opens_externally() {
        let mut controller = controller();
        assert_eq!(
            controller.dispatch(AppEvent::LinkActivated("https://x.example".into())),
            vec![Effect::OpenExternal("https://x.example".into())]
        );
    }

    #[test]
    fn test_set_new_hotkey_shows_window_first() {
        let mut controller = controller();
        let effects = controller.dispatch(AppEvent::Menu(MenuCommand::SetNewHotkey));
        assert_eq!(effects.first(), Some(&Effect::ShowWindow));
        assert_eq!(effects.last(), Some(&Effect::BeginHotkeyCapture));
    }

    #[test]
    fn test_unknown_slot_segment_is_ignored() {
        let mut controller = controller();
        assert!(controller.dispatch(AppEvent::SlotSelected(12)).is_empty());
    }

    #[test]
    fn test_selector_state_follows_selection() {
        let mut controller = controller();
        controller.dispatch(AppEvent::ServiceSelected(1));
        controller.dispatch(AppEvent::SlotSelected(9));
        let state = controller.selector_state();
        assert_eq!(state.labels, ["A", "B"]);
        assert_eq!(state.selected_service, Some(1));
        assert_eq!(state.selected_slot, Some(9));
    }
}
