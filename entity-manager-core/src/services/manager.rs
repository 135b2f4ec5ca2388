//! Entity manager view-model
//!
//! Owns the snapshot, selection, expansion and modal state, and turns
//! [`Command`]s into backend calls followed by a full reload.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::services::bulk_rename::BulkRenameSession;
use crate::services::command::Command;
use crate::services::expansion::ExpansionState;
use crate::services::filter::filter_hierarchy;
use crate::services::notice::{BulkAction, Notice};
use crate::services::rename::RenameSession;
use crate::services::selection::SelectionSet;
use crate::services::tree_view::{self, TreeRow, ViewStats};
use crate::traits::EntityBackend;
use crate::types::{DeviceRegistry, EntityId, Hierarchy, RenameTarget, ViewState};

/// View-model settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// View state requested on the first load
    pub initial_view_state: ViewState,
    /// Delay between a single rename succeeding and the reload
    pub rename_settle_delay_ms: u64,
    /// Delay between a bulk rename succeeding and the reload
    pub bulk_rename_settle_delay_ms: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            initial_view_state: ViewState::default(),
            rename_settle_delay_ms: 800,
            bulk_rename_settle_delay_ms: 1200,
        }
    }
}

/// Whether a mutating backend call is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Committing,
}

/// Active modal dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Rename(RenameSession),
    BulkRename(BulkRenameSession),
}

/// Reload scheduled after a successful rename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSettle {
    pub delay: Duration,
}

/// Entity manager view-model
pub struct EntityManager {
    backend: Arc<dyn EntityBackend>,
    config: ManagerConfig,
    view_state: ViewState,
    /// Lower-cased search term
    search: String,
    snapshot: Hierarchy,
    registry: DeviceRegistry,
    load_error: Option<CoreError>,
    last_loaded_at: Option<DateTime<Utc>>,
    selection: SelectionSet,
    expansion: ExpansionState,
    modal: Option<Modal>,
    mutation: MutationState,
    pending: Option<PendingSettle>,
}

impl EntityManager {
    /// Create a view-model; nothing is fetched until [`load`](Self::load).
    #[must_use]
    pub fn new(backend: Arc<dyn EntityBackend>, config: ManagerConfig) -> Self {
        Self {
            backend,
            view_state: config.initial_view_state,
            config,
            search: String::new(),
            snapshot: Hierarchy::default(),
            registry: DeviceRegistry::new(),
            load_error: None,
            last_loaded_at: None,
            selection: SelectionSet::new(),
            expansion: ExpansionState::default(),
            modal: None,
            mutation: MutationState::Idle,
            pending: None,
        }
    }

    // ===== Accessors =====

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Unfiltered snapshot of the last successful load
    pub fn snapshot(&self) -> &Hierarchy {
        &self.snapshot
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn load_error(&self) -> Option<&CoreError> {
        self.load_error.as_ref()
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn mutation_state(&self) -> MutationState {
        self.mutation
    }

    pub fn pending(&self) -> Option<PendingSettle> {
        self.pending
    }

    // ===== Loading =====

    /// Replace the snapshot with a fresh backend fetch.
    ///
    /// A rejected fetch leaves an empty snapshot and a load error. The device
    /// registry is only refreshed after a successful fetch; a registry failure
    /// is logged and the previous registry kept.
    pub async fn load(&mut self) {
        match self.backend.fetch_entities(self.view_state).await {
            Ok(snapshot) => {
                log::info!(
                    "Loaded {} integrations, {} devices, {} entities ({})",
                    snapshot.integration_count(),
                    snapshot.device_count(),
                    snapshot.entity_count(),
                    self.view_state
                );
                self.snapshot = snapshot;
                self.load_error = None;
                self.last_loaded_at = Some(Utc::now());
            }
            Err(e) => {
                log::error!("Error loading {} entities: {e}", self.view_state);
                self.snapshot = Hierarchy::default();
                self.load_error = Some(CoreError::LoadFailed(e.reason()));
                return;
            }
        }

        match self.backend.fetch_device_registry().await {
            Ok(devices) => self.registry = DeviceRegistry::from(devices),
            Err(e) => log::warn!("Error loading device info: {e}"),
        }
    }

    /// Switch the requested view state and reload.
    pub async fn set_view_state(&mut self, view_state: ViewState) {
        self.view_state = view_state;
        self.load().await;
    }

    /// Store the search term (lower-cased). No reload.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_lowercase();
    }

    // ===== Derived view =====

    /// Snapshot filtered by the current search term
    pub fn view(&self) -> Cow<'_, Hierarchy> {
        filter_hierarchy(&self.snapshot, &self.registry, &self.search)
    }

    pub fn stats(&self) -> ViewStats {
        ViewStats::collect(&self.view(), &self.selection)
    }

    pub fn rows(&self) -> Vec<TreeRow> {
        tree_view::rows(&self.view(), &self.registry, &self.expansion, &self.selection)
    }

    /// Ids of every entity in the filtered view
    pub fn visible_entity_ids(&self) -> Vec<EntityId> {
        self.view()
            .integrations
            .iter()
            .flat_map(|integration| integration.entities())
            .map(|entity| entity.entity_id.clone())
            .collect()
    }

    /// Title of the empty state, when there is nothing to show
    pub fn empty_state(&self) -> Option<String> {
        if let Some(e) = &self.load_error {
            return Some(e.to_string());
        }
        self.view()
            .is_empty()
            .then(|| tree_view::empty_title(self.view_state))
    }

    // ===== Commands =====

    /// Run one command to completion.
    ///
    /// Failures never escape: they are returned as a [`Notice`].
    pub async fn dispatch(&mut self, command: Command) -> Option<Notice> {
        if command.is_mutation() && self.mutation == MutationState::Committing {
            return Some(Notice::warning(CoreError::MutationInFlight.to_string()));
        }

        match command {
            Command::EnableEntity(entity_id) => {
                self.set_entity_enabled(entity_id, BulkAction::Enable).await
            }
            Command::DisableEntity(entity_id) => {
                self.set_entity_enabled(entity_id, BulkAction::Disable).await
            }
            Command::EnableDevice {
                integration,
                device_key,
            } => {
                let entity_ids = self.snapshot.device_entity_ids(&integration, &device_key);
                if entity_ids.is_empty() {
                    log::debug!("Device {integration}/{device_key} not in snapshot, nothing to enable");
                    None
                } else {
                    self.bulk_set_enabled(entity_ids, BulkAction::Enable).await
                }
            }
            Command::EnableIntegration { name } => {
                let entity_ids = self.snapshot.integration_entity_ids(&name);
                if entity_ids.is_empty() {
                    log::debug!("Integration {name} not in snapshot, nothing to enable");
                    None
                } else {
                    self.bulk_set_enabled(entity_ids, BulkAction::Enable).await
                }
            }
            Command::EnableSelected => {
                let entity_ids = self.selection.to_vec();
                self.bulk_set_enabled(entity_ids, BulkAction::Enable).await
            }
            Command::DisableSelected => {
                let entity_ids = self.selection.to_vec();
                self.bulk_set_enabled(entity_ids, BulkAction::Disable).await
            }
            Command::ToggleSelection(entity_id) => {
                self.selection.toggle(&entity_id);
                None
            }
            Command::SelectAll(entity_ids) => {
                self.selection.add_all(entity_ids);
                None
            }
            Command::DeselectAll(entity_ids) => {
                self.selection.remove_all(&entity_ids);
                None
            }
            Command::ClearSelection => {
                self.selection.clear();
                None
            }
            Command::ToggleIntegration(name) => {
                self.expansion.toggle_integration(&name);
                None
            }
            Command::ToggleDevice(device_key) => {
                self.expansion.toggle_device(&device_key);
                None
            }
            Command::SetSearch(term) => {
                self.set_search(&term);
                None
            }
            Command::SetViewState(view_state) => {
                self.set_view_state(view_state).await;
                None
            }
            Command::Refresh => {
                self.load().await;
                None
            }
            Command::OpenRename(entity_id) => {
                self.modal = Some(Modal::Rename(RenameSession::open(entity_id, &self.snapshot)));
                None
            }
            Command::OpenBulkRename => {
                if self.selection.is_empty() {
                    Some(Notice::warning(CoreError::NoSelection.to_string()))
                } else {
                    let session = BulkRenameSession::new(self.selection.to_vec());
                    self.modal = Some(Modal::BulkRename(session));
                    None
                }
            }
            Command::CloseModal => {
                self.close_modal();
                None
            }
        }
    }

    async fn set_entity_enabled(&mut self, entity_id: EntityId, action: BulkAction) -> Option<Notice> {
        self.mutation = MutationState::Committing;
        let outcome = match action {
            BulkAction::Enable => self.backend.enable_entity(&entity_id).await,
            BulkAction::Disable => self.backend.disable_entity(&entity_id).await,
        };
        self.mutation = MutationState::Idle;

        // Pruned whether or not the backend accepted the change
        self.selection.remove(entity_id.as_str());

        match outcome {
            Ok(()) => {
                log::info!("{} {entity_id}", action.past_tense());
                self.load().await;
                None
            }
            Err(e) => {
                log_failure(&e);
                Some(Notice::blocking(
                    format!("Failed to {} {entity_id}", action.verb()),
                    e.reason(),
                ))
            }
        }
    }

    /// Bulk enable/disable. Always reloads once the backend answered; an
    /// outright rejection is blocking and skips the reload.
    async fn bulk_set_enabled(
        &mut self,
        entity_ids: Vec<EntityId>,
        action: BulkAction,
    ) -> Option<Notice> {
        if entity_ids.is_empty() {
            return Some(Notice::warning(CoreError::NoSelection.to_string()));
        }

        self.mutation = MutationState::Committing;
        let outcome = match action {
            BulkAction::Enable => self.backend.bulk_enable(&entity_ids).await,
            BulkAction::Disable => self.backend.bulk_disable(&entity_ids).await,
        };
        self.mutation = MutationState::Idle;

        match outcome {
            Ok(result) => {
                match action {
                    BulkAction::Enable => self.selection.remove_all(&entity_ids),
                    BulkAction::Disable => self.selection.clear(),
                }
                log::info!(
                    "Bulk {}: {} succeeded, {} failed",
                    action.verb(),
                    result.success.len(),
                    result.failed.len()
                );
                for failure in &result.failed {
                    log::warn!("Failed to {} {}: {}", action.verb(), failure.entity_id, failure.error);
                }
                self.load().await;
                Some(Notice::Summary {
                    action,
                    succeeded: result.success.len(),
                    failed: result.failed.len(),
                })
            }
            Err(e) => {
                log_failure(&e);
                Some(Notice::blocking(
                    format!("Failed to {} entities", action.verb()),
                    e.reason(),
                ))
            }
        }
    }

    /// Dismiss the active modal. A scheduled settle still reloads.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    // ===== Bulk rename =====

    fn bulk_session(&mut self) -> CoreResult<(&mut BulkRenameSession, &Hierarchy)> {
        match self.modal.as_mut() {
            Some(Modal::BulkRename(session)) => Ok((session, &self.snapshot)),
            _ => Err(CoreError::Validation("No bulk rename in progress".to_string())),
        }
    }

    pub fn set_rename_target(&mut self, target: RenameTarget) -> CoreResult<()> {
        let (session, snapshot) = self.bulk_session()?;
        session.set_target(target, snapshot)
    }

    pub fn set_rename_find(&mut self, find: &str) -> CoreResult<()> {
        let (session, snapshot) = self.bulk_session()?;
        session.set_find(find, snapshot)
    }

    pub fn set_rename_replace(&mut self, replace: &str) -> CoreResult<()> {
        let (session, snapshot) = self.bulk_session()?;
        session.set_replace(replace, snapshot)
    }

    /// Send the batch rename.
    ///
    /// `Err` only for local rejections (nothing to commit, commit already
    /// running). Backend failures land in the modal's inline message. When
    /// anything was renamed the selection is cleared and a settle scheduled.
    pub async fn commit_bulk_rename(&mut self) -> CoreResult<()> {
        if self.mutation == MutationState::Committing {
            return Err(CoreError::MutationInFlight);
        }
        let request = self.bulk_session()?.0.begin_commit()?;

        self.mutation = MutationState::Committing;
        let outcome = self.backend.bulk_rename(&request).await;
        self.mutation = MutationState::Idle;

        match &outcome {
            Ok(result) => log::info!(
                "Bulk rename '{}' -> '{}': {} renamed, {} failed, {} skipped",
                request.find,
                request.replace,
                result.success.len(),
                result.failed.len(),
                result.skipped.len()
            ),
            Err(e) => log_failure(e),
        }

        // Modal dismissed while the call was outstanding: result is discarded
        let Some(Modal::BulkRename(session)) = self.modal.as_mut() else {
            return Ok(());
        };
        if session.finish_commit(outcome) {
            self.selection.clear();
            self.pending = Some(PendingSettle {
                delay: Duration::from_millis(self.config.bulk_rename_settle_delay_ms),
            });
        }
        Ok(())
    }

    // ===== Single rename =====

    fn rename_session(&mut self) -> CoreResult<&mut RenameSession> {
        match self.modal.as_mut() {
            Some(Modal::Rename(session)) if session.can_submit() => Ok(session),
            Some(Modal::Rename(_)) => Err(CoreError::MutationInFlight),
            _ => Err(CoreError::Validation("No rename in progress".to_string())),
        }
    }

    pub fn set_rename_name(&mut self, name: &str) -> CoreResult<()> {
        self.rename_session()?.name_input = name.to_string();
        Ok(())
    }

    pub fn set_rename_new_id(&mut self, new_id: &str) -> CoreResult<()> {
        self.rename_session()?.new_id_input = new_id.to_string();
        Ok(())
    }

    /// Move focus to the other rename input.
    pub fn toggle_rename_field(&mut self) -> CoreResult<()> {
        let session = self.rename_session()?;
        session.focus = session.focus.toggle();
        Ok(())
    }

    /// Submit the single rename.
    ///
    /// Unchanged inputs are rejected with [`CoreError::NoChanges`] before any
    /// backend call. On success a settle is scheduled.
    pub async fn submit_rename(&mut self) -> CoreResult<()> {
        if self.mutation == MutationState::Committing {
            return Err(CoreError::MutationInFlight);
        }
        let session = match self.modal.as_mut() {
            Some(Modal::Rename(session)) => session,
            _ => return Err(CoreError::Validation("No rename in progress".to_string())),
        };
        let entity_id = session.entity_id().clone();
        let request = session.begin_submit()?;

        self.mutation = MutationState::Committing;
        let outcome = self.backend.rename_entity(&entity_id, &request).await;
        self.mutation = MutationState::Idle;

        match &outcome {
            Ok(()) => log::info!("Renamed {entity_id}"),
            Err(e) => log_failure(e),
        }

        let Some(Modal::Rename(session)) = self.modal.as_mut() else {
            return Ok(());
        };
        if session.finish_submit(outcome) {
            self.pending = Some(PendingSettle {
                delay: Duration::from_millis(self.config.rename_settle_delay_ms),
            });
        }
        Ok(())
    }

    // ===== Settle =====

    /// Perform the scheduled settle: wait, dismiss the modal and reload.
    ///
    /// Returns `false` when nothing was scheduled.
    pub async fn run_pending(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        tokio::time::sleep(pending.delay).await;
        self.close_modal();
        self.load().await;
        true
    }
}

fn log_failure(e: &CoreError) {
    if e.is_expected() {
        log::warn!("{e}");
    } else {
        log::error!("{e}");
    }
}
