use super::WheelApp;
use crate::error::{WheelError, WheelResult};
use crate::events::WheelEvent;
use crate::palette::color_for_index;
use crate::types::Participant;

impl WheelApp {
    /// Current roster in insertion order
    pub async fn get_participants(&self) -> Vec<Participant> {
        self.participants.read().await.clone()
    }

    /// Add a participant; the name is trimmed and must not be empty
    pub async fn add_participant(&self, name: &str) -> WheelResult<Participant> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WheelError::EmptyName);
        }

        let mut participants = self.participants.write().await;
        self.ensure_roster_unlocked().await?;

        let participant = Participant::new(name, color_for_index(participants.len()));
        participants.push(participant.clone());
        tracing::info!(id = %participant.id, "Participant added: {}", participant.name);

        self.roster_changed(&participants);
        Ok(participant)
    }

    /// Remove a participant by id
    pub async fn remove_participant(&self, id: &str) -> WheelResult<Participant> {
        let mut participants = self.participants.write().await;
        self.ensure_roster_unlocked().await?;

        let position = participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| WheelError::ParticipantNotFound(id.to_string()))?;
        let removed = participants.remove(position);
        tracing::info!(id = %removed.id, "Participant removed: {}", removed.name);

        self.roster_changed(&participants);
        Ok(removed)
    }

    /// Remove everyone
    pub async fn clear_participants(&self) -> WheelResult<()> {
        let mut participants = self.participants.write().await;
        self.ensure_roster_unlocked().await?;

        tracing::info!(count = participants.len(), "Clearing participants");
        participants.clear();

        self.roster_changed(&participants);
        Ok(())
    }

    async fn ensure_roster_unlocked(&self) -> WheelResult<()> {
        if self.config.lock_roster_while_spinning && self.session.read().await.is_spinning() {
            return Err(WheelError::RosterLocked);
        }
        Ok(())
    }

    /// Persist the whole roster and tell subscribers. Store failures are
    /// logged; the in-memory edit stands.
    fn roster_changed(&self, participants: &[Participant]) {
        if let Err(e) = self.store.save(participants) {
            tracing::warn!("Failed to persist participants: {}", e);
        }
        self.notify(WheelEvent::RosterChanged {
            participants: participants.to_vec(),
        });
    }
}
