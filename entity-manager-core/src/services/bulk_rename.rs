//! Bulk rename engine: find/replace preview and commit state machine

use crate::error::{CoreError, CoreResult};
use crate::services::notice::InlineMessage;
use crate::types::{BulkRenameRequest, BulkRenameResult, EntityId, Hierarchy, RenameTarget};
use crate::utils::replace_first;

/// Value a rename operates on for one entity.
///
/// For [`RenameTarget::Name`] this is the current display name (looked up in
/// the unfiltered snapshot, falling back to a name derived from the id when the
/// entity is not listed). For [`RenameTarget::EntityId`] it is the raw id.
pub fn current_value(hierarchy: &Hierarchy, entity_id: &EntityId, target: RenameTarget) -> String {
    match target {
        RenameTarget::Name => hierarchy
            .find_entity(entity_id.as_str())
            .map_or_else(|| entity_id.fallback_name(), |entity| entity.current_name()),
        RenameTarget::EntityId => entity_id.to_string(),
    }
}

/// Preview outcome for one selected entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewItem {
    Changed {
        entity_id: EntityId,
        old: String,
        new: String,
    },
    /// Current value does not contain the find string
    Skipped { entity_id: EntityId },
}

impl PreviewItem {
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::Changed { entity_id, .. } | Self::Skipped { entity_id } => entity_id,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Per-entity preview of a find/replace, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePreview {
    pub items: Vec<PreviewItem>,
}

impl RenamePreview {
    /// Compute the preview. Matching is literal, case-sensitive and replaces
    /// only the first occurrence.
    pub fn compute(
        entity_ids: &[EntityId],
        hierarchy: &Hierarchy,
        target: RenameTarget,
        find: &str,
        replace: &str,
    ) -> Self {
        let items = entity_ids
            .iter()
            .map(|entity_id| {
                let old = current_value(hierarchy, entity_id, target);
                match replace_first(&old, find, replace) {
                    Some(new) => PreviewItem::Changed {
                        entity_id: entity_id.clone(),
                        old,
                        new,
                    },
                    None => PreviewItem::Skipped {
                        entity_id: entity_id.clone(),
                    },
                }
            })
            .collect();
        Self { items }
    }

    /// Number of entities that would change
    pub fn match_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_changed()).count()
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn can_commit(&self) -> bool {
        self.match_count() > 0
    }

    /// `"2 of 3 entities will be renamed"`
    pub fn summary(&self) -> String {
        format!(
            "{} of {} entities will be renamed",
            self.match_count(),
            self.total()
        )
    }
}

/// Lifecycle of one bulk rename modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkRenamePhase {
    /// Empty find string: no preview, commit disabled
    #[default]
    Idle,
    Previewed,
    Committing,
    Succeeded,
    /// Some renamed, some failed
    PartiallyFailed,
    /// Nothing renamed; commit is available again
    Failed,
}

/// State of the bulk rename modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRenameSession {
    entity_ids: Vec<EntityId>,
    target: RenameTarget,
    find: String,
    replace: String,
    preview: Option<RenamePreview>,
    phase: BulkRenamePhase,
    result: Option<BulkRenameResult>,
    message: Option<InlineMessage>,
}

impl BulkRenameSession {
    /// Open a session for the selected ids (selection order is kept).
    pub fn new(entity_ids: Vec<EntityId>) -> Self {
        Self {
            entity_ids,
            target: RenameTarget::default(),
            find: String::new(),
            replace: String::new(),
            preview: None,
            phase: BulkRenamePhase::Idle,
            result: None,
            message: None,
        }
    }

    pub fn entity_ids(&self) -> &[EntityId] {
        &self.entity_ids
    }

    pub fn target(&self) -> RenameTarget {
        self.target
    }

    pub fn find(&self) -> &str {
        &self.find
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    pub fn phase(&self) -> BulkRenamePhase {
        self.phase
    }

    pub fn preview(&self) -> Option<&RenamePreview> {
        self.preview.as_ref()
    }

    /// Backend tallies of the last commit
    pub fn result(&self) -> Option<&BulkRenameResult> {
        self.result.as_ref()
    }

    pub fn message(&self) -> Option<&InlineMessage> {
        self.message.as_ref()
    }

    pub fn is_committing(&self) -> bool {
        self.phase == BulkRenamePhase::Committing
    }

    /// Commit is offered after a preview with matches, or again after a failed commit.
    pub fn can_commit(&self) -> bool {
        matches!(
            self.phase,
            BulkRenamePhase::Previewed | BulkRenamePhase::Failed
        ) && self.preview.as_ref().is_some_and(RenamePreview::can_commit)
    }

    pub fn set_target(&mut self, target: RenameTarget, hierarchy: &Hierarchy) -> CoreResult<()> {
        self.edit(hierarchy, |session| session.target = target)
    }

    pub fn set_find(&mut self, find: &str, hierarchy: &Hierarchy) -> CoreResult<()> {
        self.edit(hierarchy, |session| session.find = find.to_string())
    }

    pub fn set_replace(&mut self, replace: &str, hierarchy: &Hierarchy) -> CoreResult<()> {
        self.edit(hierarchy, |session| session.replace = replace.to_string())
    }

    fn edit(&mut self, hierarchy: &Hierarchy, apply: impl FnOnce(&mut Self)) -> CoreResult<()> {
        if self.is_committing() {
            return Err(CoreError::MutationInFlight);
        }
        apply(self);
        self.refresh_preview(hierarchy);
        Ok(())
    }

    /// Recompute the preview from the current inputs.
    pub fn refresh_preview(&mut self, hierarchy: &Hierarchy) {
        self.message = None;
        self.result = None;
        if self.find.is_empty() {
            self.preview = None;
            self.phase = BulkRenamePhase::Idle;
            return;
        }
        self.preview = Some(RenamePreview::compute(
            &self.entity_ids,
            hierarchy,
            self.target,
            &self.find,
            &self.replace,
        ));
        self.phase = BulkRenamePhase::Previewed;
    }

    /// Enter `Committing` and build the batch request.
    ///
    /// The request carries the full selection; the backend recomputes every
    /// outcome itself.
    pub fn begin_commit(&mut self) -> CoreResult<BulkRenameRequest> {
        if self.is_committing() {
            return Err(CoreError::MutationInFlight);
        }
        if !self.can_commit() {
            return Err(CoreError::NoMatches);
        }
        self.phase = BulkRenamePhase::Committing;
        self.message = None;
        Ok(BulkRenameRequest {
            entity_ids: self.entity_ids.clone(),
            find: self.find.clone(),
            replace: self.replace.clone(),
            target: self.target,
        })
    }

    /// Record the backend response. Returns `true` when at least one entity
    /// was renamed and the modal should settle.
    pub fn finish_commit(&mut self, outcome: CoreResult<BulkRenameResult>) -> bool {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                self.phase = BulkRenamePhase::Failed;
                self.message = Some(InlineMessage::Error(format!("Error: {}", e.reason())));
                return false;
            }
        };

        let succeeded = result.success.len();
        let failed = result.failed.len();
        let skipped = result.skipped.len();

        let mut text = format!("Renamed {succeeded} entities.");
        if skipped > 0 {
            text.push_str(&format!(" Skipped {skipped} (no match)."));
        }
        if failed > 0 {
            text.push_str(&format!(" Failed: {failed}."));
        }

        self.message = Some(if failed > 0 && succeeded == 0 {
            InlineMessage::Error(text)
        } else {
            InlineMessage::Success(text)
        });
        self.phase = match (succeeded, failed) {
            (0, _) => BulkRenamePhase::Failed,
            (_, 0) => BulkRenamePhase::Succeeded,
            _ => BulkRenamePhase::PartiallyFailed,
        };
        self.result = Some(result);

        succeeded > 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{BulkFailure, Device, Entity, Integration};

    fn id(raw: &str) -> EntityId {
        EntityId::new(raw)
    }

    fn snapshot() -> Hierarchy {
        let mut switch = Entity::new("switch.hall", "zwave");
        switch.name = Some("light light switch".to_string());
        let mut kitchen = Entity::new("light.kitchen", "hue");
        kitchen.original_name = Some("Kitchen Light".to_string());

        let mut device = Device::new(None);
        device.entities = vec![
            Arc::new(switch),
            Arc::new(kitchen),
            Arc::new(Entity::new("light.garage", "hue")),
        ];
        let mut integration = Integration::new("hue");
        integration.devices.insert("no_device".to_string(), device);
        Hierarchy::new(vec![integration])
    }

    #[test]
    fn entity_id_preview_changes_both() {
        let preview = RenamePreview::compute(
            &[id("light.kitchen"), id("light.garage")],
            &snapshot(),
            RenameTarget::EntityId,
            "light",
            "lamp",
        );
        assert_eq!(
            preview.items,
            vec![
                PreviewItem::Changed {
                    entity_id: id("light.kitchen"),
                    old: "light.kitchen".to_string(),
                    new: "lamp.kitchen".to_string(),
                },
                PreviewItem::Changed {
                    entity_id: id("light.garage"),
                    old: "light.garage".to_string(),
                    new: "lamp.garage".to_string(),
                },
            ]
        );
        assert_eq!(preview.match_count(), 2);
        assert!(preview.can_commit());
    }

    #[test]
    fn absent_find_string_skips_everything() {
        let preview = RenamePreview::compute(
            &[id("light.kitchen"), id("light.garage")],
            &snapshot(),
            RenameTarget::EntityId,
            "sensor",
            "x",
        );
        assert_eq!(preview.match_count(), 0);
        assert!(!preview.can_commit());
        assert!(preview.items.iter().all(|item| !item.is_changed()));
    }

    #[test]
    fn name_preview_replaces_first_occurrence_only() {
        let preview = RenamePreview::compute(
            &[id("switch.hall")],
            &snapshot(),
            RenameTarget::Name,
            "light",
            "lamp",
        );
        assert_eq!(
            preview.items[0],
            PreviewItem::Changed {
                entity_id: id("switch.hall"),
                old: "light light switch".to_string(),
                new: "lamp light switch".to_string(),
            }
        );
    }

    #[test]
    fn name_value_falls_back_through_original_name_and_id() {
        let tree = snapshot();
        assert_eq!(
            current_value(&tree, &id("light.kitchen"), RenameTarget::Name),
            "Kitchen Light"
        );
        assert_eq!(
            current_value(&tree, &id("light.garage"), RenameTarget::Name),
            "garage"
        );
        assert_eq!(
            current_value(&tree, &id("sensor.not_loaded"), RenameTarget::Name),
            "not loaded"
        );
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let preview = RenamePreview::compute(
            &[id("light.kitchen")],
            &snapshot(),
            RenameTarget::Name,
            "kitchen",
            "Galley",
        );
        assert_eq!(preview.match_count(), 0);
    }

    #[test]
    fn session_moves_between_idle_and_previewed() {
        let tree = snapshot();
        let mut session = BulkRenameSession::new(vec![id("light.kitchen")]);
        assert_eq!(session.phase(), BulkRenamePhase::Idle);
        assert!(!session.can_commit());

        session.set_find("light", &tree).unwrap();
        assert_eq!(session.phase(), BulkRenamePhase::Previewed);
        assert_eq!(session.preview().unwrap().match_count(), 0, "name target by default");

        session.set_target(RenameTarget::EntityId, &tree).unwrap();
        assert!(session.can_commit());

        session.set_find("", &tree).unwrap();
        assert_eq!(session.phase(), BulkRenamePhase::Idle);
        assert!(session.preview().is_none());
    }

    #[test]
    fn edits_and_commits_rejected_while_committing() {
        let tree = snapshot();
        let mut session = BulkRenameSession::new(vec![id("light.kitchen")]);
        session.set_target(RenameTarget::EntityId, &tree).unwrap();
        session.set_find("light", &tree).unwrap();

        let request = session.begin_commit().unwrap();
        assert_eq!(request.entity_ids, vec![id("light.kitchen")]);
        assert_eq!(request.find, "light");

        assert_eq!(session.begin_commit(), Err(CoreError::MutationInFlight));
        assert_eq!(
            session.set_find("x", &tree),
            Err(CoreError::MutationInFlight)
        );
    }

    #[test]
    fn zero_matches_cannot_commit() {
        let mut session = BulkRenameSession::new(vec![id("light.kitchen")]);
        session.set_find("zzz", &snapshot()).unwrap();
        assert_eq!(session.begin_commit(), Err(CoreError::NoMatches));
    }

    #[test]
    fn zero_successes_reenable_commit() {
        let tree = snapshot();
        let mut session = BulkRenameSession::new(vec![id("light.kitchen")]);
        session.set_target(RenameTarget::EntityId, &tree).unwrap();
        session.set_find("light", &tree).unwrap();
        session.begin_commit().unwrap();

        let settle = session.finish_commit(Ok(BulkRenameResult {
            success: vec![],
            failed: vec![BulkFailure::new("light.kitchen", "already registered")],
            skipped: vec![],
        }));
        assert!(!settle);
        assert_eq!(session.phase(), BulkRenamePhase::Failed);
        assert!(session.can_commit());
        assert_eq!(
            session.message(),
            Some(&InlineMessage::Error("Renamed 0 entities. Failed: 1.".to_string()))
        );
    }

    #[test]
    fn backend_tallies_drive_the_message() {
        let tree = snapshot();
        let mut session =
            BulkRenameSession::new(vec![id("light.kitchen"), id("light.garage"), id("switch.hall")]);
        session.set_target(RenameTarget::EntityId, &tree).unwrap();
        session.set_find("light", &tree).unwrap();
        session.begin_commit().unwrap();

        let settle = session.finish_commit(Ok(BulkRenameResult {
            success: vec![id("light.kitchen")],
            failed: vec![BulkFailure::new("light.garage", "locked")],
            skipped: vec![id("switch.hall")],
        }));
        assert!(settle);
        assert_eq!(session.phase(), BulkRenamePhase::PartiallyFailed);
        assert!(!session.can_commit());
        assert_eq!(
            session.message().map(InlineMessage::text),
            Some("Renamed 1 entities. Skipped 1 (no match). Failed: 1.")
        );
    }

    #[test]
    fn rejected_call_is_inline_error() {
        let tree = snapshot();
        let mut session = BulkRenameSession::new(vec![id("light.kitchen")]);
        session.set_target(RenameTarget::EntityId, &tree).unwrap();
        session.set_find("light", &tree).unwrap();
        session.begin_commit().unwrap();

        assert!(!session.finish_commit(Err(CoreError::LoadFailed("offline".to_string()))));
        assert!(session.message().unwrap().is_error());
        assert!(session.can_commit());
    }
}
