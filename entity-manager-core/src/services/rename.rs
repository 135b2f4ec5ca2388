//! Single-entity rename

use crate::error::{CoreError, CoreResult};
use crate::services::bulk_rename::current_value;
use crate::services::notice::InlineMessage;
use crate::types::{EntityId, Hierarchy, RenameRequest, RenameTarget};

/// Build a rename request holding only the fields that differ.
///
/// Inputs are trimmed; an empty input leaves its field unchanged. Returns
/// [`CoreError::NoChanges`] when nothing differs, before any backend call.
pub fn build_request(
    entity_id: &EntityId,
    current_name: &str,
    name_input: &str,
    new_id_input: &str,
) -> CoreResult<RenameRequest> {
    let name = name_input.trim();
    let new_id = new_id_input.trim();

    let name = (!name.is_empty() && name != current_name).then(|| name.to_string());
    let new_entity_id = if !new_id.is_empty() && new_id != entity_id.as_str() {
        Some(EntityId::parse(new_id)?)
    } else {
        None
    };

    let request = RenameRequest {
        name,
        new_entity_id,
    };
    if request.is_empty() {
        return Err(CoreError::NoChanges);
    }
    Ok(request)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenamePhase {
    #[default]
    Editing,
    Committing,
    /// Renamed; waiting for the settle reload
    Succeeded,
}

/// Focused input of the rename modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameField {
    EntityId,
    #[default]
    Name,
}

impl RenameField {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::EntityId => Self::Name,
            Self::Name => Self::EntityId,
        }
    }
}

/// State of the single rename modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSession {
    entity_id: EntityId,
    current_name: String,
    pub name_input: String,
    pub new_id_input: String,
    pub focus: RenameField,
    phase: RenamePhase,
    message: Option<InlineMessage>,
}

impl RenameSession {
    /// Open the modal with both inputs prefilled from current values.
    pub fn open(entity_id: EntityId, hierarchy: &Hierarchy) -> Self {
        let current_name = current_value(hierarchy, &entity_id, RenameTarget::Name);
        Self {
            new_id_input: entity_id.to_string(),
            name_input: current_name.clone(),
            entity_id,
            current_name,
            focus: RenameField::default(),
            phase: RenamePhase::Editing,
            message: None,
        }
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn phase(&self) -> RenamePhase {
        self.phase
    }

    pub fn message(&self) -> Option<&InlineMessage> {
        self.message.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == RenamePhase::Editing
    }

    /// Validate inputs and enter `Committing`.
    ///
    /// Local rejections become an inline error and leave the session editable.
    pub fn begin_submit(&mut self) -> CoreResult<RenameRequest> {
        match self.phase {
            RenamePhase::Committing => return Err(CoreError::MutationInFlight),
            RenamePhase::Succeeded => return Err(CoreError::NoChanges),
            RenamePhase::Editing => {}
        }
        match build_request(
            &self.entity_id,
            &self.current_name,
            &self.name_input,
            &self.new_id_input,
        ) {
            Ok(request) => {
                self.phase = RenamePhase::Committing;
                self.message = None;
                Ok(request)
            }
            Err(e) => {
                self.message = Some(InlineMessage::Error(match &e {
                    CoreError::NoChanges => "No changes detected.".to_string(),
                    other => other.reason(),
                }));
                Err(e)
            }
        }
    }

    /// Record the backend response. Returns `true` on success.
    pub fn finish_submit(&mut self, outcome: CoreResult<()>) -> bool {
        match outcome {
            Ok(()) => {
                self.phase = RenamePhase::Succeeded;
                self.message = Some(InlineMessage::Success("Renamed successfully.".to_string()));
                true
            }
            Err(e) => {
                self.phase = RenamePhase::Editing;
                self.message = Some(InlineMessage::Error(format!("Error: {}", e.reason())));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{Device, Entity, Integration};

    fn snapshot() -> Hierarchy {
        let mut porch = Entity::new("light.porch", "hue");
        porch.original_name = Some("Porch".to_string());
        let mut device = Device::new(None);
        device.entities = vec![Arc::new(porch)];
        let mut hue = Integration::new("hue");
        hue.devices.insert("no_device".to_string(), device);
        Hierarchy::new(vec![hue])
    }

    #[test]
    fn only_changed_fields_are_sent() {
        let id = EntityId::new("light.porch");
        let request = build_request(&id, "Porch", "Front Porch", "light.porch").unwrap();
        assert_eq!(request.name.as_deref(), Some("Front Porch"));
        assert!(request.new_entity_id.is_none());

        let request = build_request(&id, "Porch", "Porch", " light.deck ").unwrap();
        assert!(request.name.is_none());
        assert_eq!(request.new_entity_id, Some(EntityId::new("light.deck")));
    }

    #[test]
    fn identical_inputs_are_a_local_no_op() {
        let id = EntityId::new("light.porch");
        assert_eq!(
            build_request(&id, "Porch", "Porch", "light.porch"),
            Err(CoreError::NoChanges)
        );
        assert_eq!(build_request(&id, "Porch", "  ", ""), Err(CoreError::NoChanges));
    }

    #[test]
    fn malformed_new_id_is_rejected() {
        let id = EntityId::new("light.porch");
        assert!(matches!(
            build_request(&id, "Porch", "Porch", "porch"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn session_prefills_and_reports_no_changes_inline() {
        let mut session = RenameSession::open(EntityId::new("light.porch"), &snapshot());
        assert_eq!(session.name_input, "Porch");
        assert_eq!(session.new_id_input, "light.porch");

        assert_eq!(session.begin_submit(), Err(CoreError::NoChanges));
        assert_eq!(
            session.message(),
            Some(&InlineMessage::Error("No changes detected.".to_string()))
        );
        assert!(session.can_submit());
    }

    #[test]
    fn failed_submit_returns_to_editing() {
        let mut session = RenameSession::open(EntityId::new("light.porch"), &snapshot());
        session.name_input = "Deck".to_string();
        session.begin_submit().unwrap();
        assert_eq!(session.phase(), RenamePhase::Committing);
        assert_eq!(session.begin_submit(), Err(CoreError::MutationInFlight));

        assert!(!session.finish_submit(Err(CoreError::backend("rename", "light.porch", "taken"))));
        assert_eq!(session.phase(), RenamePhase::Editing);
        assert_eq!(session.message().map(InlineMessage::text), Some("Error: taken"));
    }

    #[test]
    fn successful_submit_blocks_resubmission() {
        let mut session = RenameSession::open(EntityId::new("light.porch"), &snapshot());
        session.name_input = "Deck".to_string();
        session.begin_submit().unwrap();
        assert!(session.finish_submit(Ok(())));
        assert!(!session.can_submit());
        assert!(!session.message().unwrap().is_error());
    }
}
