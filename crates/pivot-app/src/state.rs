//! Application state (Model in TEA pattern)

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use pivot_core::{
    Asset, BatchCommand, MethodologyDetail, MethodologySummary, Relationship, Scenario, Stats,
    TriggerMatch,
};

use crate::config::{Settings, Tab};
use crate::confirm_dialog::ConfirmDialogState;
use crate::form::{AssetFormState, FormControls, RelationshipFormState};
use crate::views;

/// How long a toast stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// Toasts kept at once; older ones are dropped first
const MAX_NOTIFICATIONS: usize = 4;

/// Lifecycle of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Tabs with list navigation
    #[default]
    Normal,

    /// Typing into the asset name filter
    FilterInput,

    /// Create/edit asset modal
    AssetForm,

    /// New relationship modal
    RelationshipForm,

    /// Methodology detail modal
    MethodologyDetail,

    /// Yes/no prompt (delete, reset)
    ConfirmDialog,

    /// Demo scenario picker
    ScenarioPicker,
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine Data
// ─────────────────────────────────────────────────────────────────────────────

/// Last successfully fetched copy of every collection
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub stats: Stats,
    pub assets: Vec<Asset>,
    pub methodologies: Vec<MethodologySummary>,
    pub trigger_matches: Vec<TriggerMatch>,
    pub batch_commands: Vec<BatchCommand>,
    pub relationships: Vec<Relationship>,
}

impl Collections {
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }
}

/// Reachability of the engine as seen by the synchronizer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No cycle has completed yet
    #[default]
    Unknown,
    Connected,
    /// Every read of the last cycle failed
    Unreachable { error: String },
}

#[derive(Debug, Clone, Default)]
pub struct SyncStatus {
    /// Generation of the newest snapshot applied
    pub last_generation: u64,
    /// When a cycle last succeeded on every collection
    pub last_success: Option<DateTime<Local>>,
    /// Collections that failed in the last applied cycle, with the error
    pub failed: Vec<(&'static str, String)>,
    pub connection: ConnectionState,
}

// ─────────────────────────────────────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= NOTIFICATION_TTL
    }
}

/// Transient toasts, newest last
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
    pushed: u64,
}

impl Notifications {
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if self.items.len() == MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            level,
            message: message.into(),
            created_at: Instant::now(),
        });
        self.pushed += 1;
    }

    /// Toasts raised since startup, including dropped ones
    pub fn total(&self) -> u64 {
        self.pushed
    }

    /// Drop toasts older than [`NOTIFICATION_TTL`]
    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View State
// ─────────────────────────────────────────────────────────────────────────────

/// Selection in a list of `len` rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    pub selected: usize,
}

impl ListCursor {
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Assets tab filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    /// Case-insensitive name substring
    pub query: String,
    pub asset_type: Option<String>,
}

impl AssetFilter {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.asset_type.is_some()
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        let type_ok = self
            .asset_type
            .as_deref()
            .map_or(true, |t| t == asset.asset_type);
        let name_ok = self.query.is_empty()
            || asset
                .name
                .to_lowercase()
                .contains(&self.query.to_lowercase());
        type_ok && name_ok
    }
}

#[derive(Debug, Clone)]
pub enum DetailState {
    Loading,
    Loaded(Box<MethodologyDetail>),
    Failed(String),
}

/// Open methodology detail modal
#[derive(Debug, Clone)]
pub struct MethodologyView {
    pub id: String,
    pub name: String,
    /// Responses carrying another token are stale
    pub token: u64,
    pub detail: DetailState,
    pub scroll: u16,
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    pub tab: Tab,
    pub settings: Settings,

    pub data: Collections,
    pub sync: SyncStatus,

    pub assets_cursor: ListCursor,
    pub queue_cursor: ListCursor,
    pub library_cursor: ListCursor,
    pub topology_cursor: ListCursor,
    pub filter: AssetFilter,

    pub asset_form: Option<AssetFormState>,
    pub relationship_form: Option<RelationshipFormState>,
    pub methodology: Option<MethodologyView>,
    pub confirm_dialog: Option<ConfirmDialogState>,
    pub scenario_cursor: ListCursor,

    pub notifications: Notifications,
    /// Label of a scenario/reset/delete request in progress
    pub busy: Option<String>,
    /// Advanced on every tick; drives spinners
    pub tick_count: u64,

    next_token: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            tab: settings.ui.default_tab,
            settings,
            data: Collections::default(),
            sync: SyncStatus::default(),
            assets_cursor: ListCursor::default(),
            queue_cursor: ListCursor::default(),
            library_cursor: ListCursor::default(),
            topology_cursor: ListCursor::default(),
            filter: AssetFilter::default(),
            asset_form: None,
            relationship_form: None,
            methodology: None,
            confirm_dialog: None,
            scenario_cursor: ListCursor::default(),
            notifications: Notifications::default(),
            busy: None,
            tick_count: 0,
            next_token: 0,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    // ─────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────

    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notifications.push(NotificationLevel::Success, message);
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notifications.push(NotificationLevel::Info, message);
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications.push(NotificationLevel::Error, message);
    }

    // ─────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────

    /// Cursor of the active tab
    pub fn cursor_mut(&mut self) -> &mut ListCursor {
        match self.tab {
            Tab::Assets => &mut self.assets_cursor,
            Tab::Queue => &mut self.queue_cursor,
            Tab::Library => &mut self.library_cursor,
            Tab::Topology => &mut self.topology_cursor,
        }
    }

    /// Number of selectable rows on the active tab
    pub fn row_count(&self) -> usize {
        match self.tab {
            Tab::Assets => views::visible_assets(self).len(),
            Tab::Queue => self.data.batch_commands.len(),
            Tab::Library => self.data.methodologies.len(),
            Tab::Topology => self.data.assets.len(),
        }
    }

    /// Clamp every cursor after the collections changed
    pub fn clamp_cursors(&mut self) {
        let visible = views::visible_assets(self).len();
        self.assets_cursor.clamp(visible);
        self.queue_cursor.clamp(self.data.batch_commands.len());
        self.library_cursor.clamp(self.data.methodologies.len());
        self.topology_cursor.clamp(self.data.assets.len());
    }

    /// Asset under the cursor on the Assets or Network Diagram tab
    pub fn selected_asset(&self) -> Option<&Asset> {
        match self.tab {
            Tab::Assets => views::visible_assets(self)
                .get(self.assets_cursor.selected)
                .copied(),
            Tab::Topology => views::topology_order(&self.data.assets)
                .get(self.topology_cursor.selected)
                .copied(),
            _ => None,
        }
    }

    pub fn selected_methodology(&self) -> Option<&MethodologySummary> {
        views::library_order(&self.data.methodologies)
            .get(self.library_cursor.selected)
            .copied()
    }

    pub fn selected_scenario(&self) -> Scenario {
        Scenario::ALL[self.scenario_cursor.selected.min(Scenario::ALL.len() - 1)]
    }

    // ─────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────

    /// Form shown by the current mode, if any
    pub fn active_form_mut(&mut self) -> Option<&mut dyn FormControls> {
        match self.ui_mode {
            UiMode::AssetForm => self
                .asset_form
                .as_mut()
                .map(|f| f as &mut dyn FormControls),
            UiMode::RelationshipForm => self
                .relationship_form
                .as_mut()
                .map(|f| f as &mut dyn FormControls),
            _ => None,
        }
    }

    pub fn active_form(&self) -> Option<&dyn FormControls> {
        match self.ui_mode {
            UiMode::AssetForm => self.asset_form.as_ref().map(|f| f as &dyn FormControls),
            UiMode::RelationshipForm => self
                .relationship_form
                .as_ref()
                .map(|f| f as &dyn FormControls),
            _ => None,
        }
    }

    /// Close whatever modal is open and return to the tabs
    pub fn close_modal(&mut self) {
        self.asset_form = None;
        self.relationship_form = None;
        self.methodology = None;
        self.confirm_dialog = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn show_confirm(&mut self, dialog: ConfirmDialogState) {
        self.confirm_dialog = Some(dialog);
        self.ui_mode = UiMode::ConfirmDialog;
    }

    /// Fresh token for an on-demand request
    pub fn next_request_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_api::test_utils::test_asset;

    #[test]
    fn test_new_state_uses_default_tab() {
        let mut settings = Settings::default();
        settings.ui.default_tab = Tab::Library;
        let state = AppState::with_settings(settings);
        assert_eq!(state.tab, Tab::Library);
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(!state.should_quit());
    }

    #[test]
    fn test_list_cursor_bounds() {
        let mut cursor = ListCursor::default();
        cursor.next(3);
        cursor.next(3);
        cursor.next(3);
        assert_eq!(cursor.selected, 2);
        cursor.clamp(1);
        assert_eq!(cursor.selected, 0);
        cursor.prev();
        assert_eq!(cursor.selected, 0);
        cursor.last(0);
        assert_eq!(cursor.selected, 0);
    }

    #[test]
    fn test_notifications_expire() {
        let mut notifications = Notifications::default();
        notifications.push(NotificationLevel::Info, "hello");
        let created = notifications.latest().unwrap().created_at;

        notifications.expire(created + Duration::from_millis(2999));
        assert_eq!(notifications.len(), 1);

        notifications.expire(created + NOTIFICATION_TTL);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_notifications_are_capped() {
        let mut notifications = Notifications::default();
        for i in 0..10 {
            notifications.push(NotificationLevel::Info, format!("n{i}"));
        }
        assert_eq!(notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(notifications.latest().unwrap().message, "n9");
    }

    #[test]
    fn test_filter_matches_name_and_type() {
        let asset = test_asset("a1", "host", "Web-Server");
        let mut filter = AssetFilter::default();
        assert!(filter.matches(&asset));

        filter.query = "web".into();
        assert!(filter.matches(&asset));

        filter.asset_type = Some("service".into());
        assert!(!filter.matches(&asset));
    }

    #[test]
    fn test_request_tokens_increase() {
        let mut state = AppState::new();
        let a = state.next_request_token();
        let b = state.next_request_token();
        assert!(b > a);
    }
}
