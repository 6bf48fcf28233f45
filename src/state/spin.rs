use super::WheelApp;
use crate::audio::{play_best_effort, stop_best_effort, SoundCue};
use crate::error::WheelResult;
use crate::events::WheelEvent;
use crate::render::{self, DrawCommand, RotationTransition, WheelView};
use crate::session::{SpinRejected, SpinTicket};
use crate::types::{Participant, SpinId, WheelState};

impl WheelApp {
    /// Trigger a spin.
    ///
    /// The roster is read fresh and the winner fixed right here. A reveal is
    /// scheduled after `config.spin_duration`; until then further triggers
    /// are rejected.
    pub async fn spin(&self) -> Result<SpinTicket, SpinRejected> {
        let participants = self.participants.read().await;
        let result = {
            let mut session = self.session.write().await;
            let mut rng = self.rng.lock().await;
            session.try_spin(&participants, &mut **rng)
        };
        drop(participants);

        let ticket = match result {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::debug!("Spin ignored: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            spin_id = ticket.spin_id,
            new_rotation = ticket.plan.new_rotation,
            "Spin started"
        );

        if !self.is_muted().await {
            play_best_effort(self.audio.as_ref(), SoundCue::Spin);
        }

        self.notify(WheelEvent::SpinStarted {
            spin_id: ticket.spin_id,
            rotation: ticket.plan.new_rotation,
            duration_ms: self.config.transition_duration.as_millis() as u64,
        });

        self.schedule_reveal(ticket.spin_id);
        Ok(ticket)
    }

    fn schedule_reveal(&self, spin_id: SpinId) {
        let app = self.clone();
        let delay = self.config.spin_duration;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            app.reveal_winner(spin_id).await;
        });
    }

    /// Finish `spin_id` and announce the winner captured when it started
    async fn reveal_winner(&self, spin_id: SpinId) -> Option<Participant> {
        let winner = self.session.write().await.finish_spin(spin_id);
        let Some(winner) = winner else {
            tracing::warn!(spin_id, "Reveal fired for a spin that is not running");
            return None;
        };

        stop_best_effort(self.audio.as_ref(), SoundCue::Spin);
        if !self.is_muted().await {
            play_best_effort(self.audio.as_ref(), SoundCue::Win);
        }

        tracing::info!(spin_id, id = %winner.id, "Winner revealed: {}", winner.name);
        self.notify(WheelEvent::WinnerRevealed {
            spin_id,
            winner: winner.clone(),
            revealed_at: chrono::Utc::now().to_rfc3339(),
        });

        Some(winner)
    }

    /// Close the winner display
    pub async fn dismiss_winner(&self) -> Option<Participant> {
        let dismissed = self.session.write().await.dismiss_winner()?;

        stop_best_effort(self.audio.as_ref(), SoundCue::Win);
        self.notify(WheelEvent::WinnerDismissed);
        Some(dismissed)
    }

    pub async fn is_muted(&self) -> bool {
        *self.muted.read().await
    }

    /// Mute or unmute future cues
    pub async fn set_muted(&self, muted: bool) {
        *self.muted.write().await = muted;
        tracing::debug!(muted, "Mute toggled");
        self.notify(WheelEvent::MuteChanged { muted });
    }

    pub async fn wheel_state(&self) -> WheelState {
        self.session.read().await.snapshot()
    }

    /// Snapshot for the rendering surface
    pub async fn view(&self) -> WheelView {
        let participants = self.get_participants().await;
        let state = self.wheel_state().await;

        WheelView {
            participants,
            rotation_degrees: state.rotation,
            is_spinning: state.is_spinning,
            transition: RotationTransition::new(self.config.transition_duration),
        }
    }

    /// Drawing commands for the current roster
    pub async fn render(&self) -> WheelResult<Vec<DrawCommand>> {
        render::render(&self.participants.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::audio::{SilentAudio, SoundCue};
    use crate::config::WheelConfig;
    use crate::error::{WheelError, WheelResult};
    use crate::events::WheelEvent;
    use crate::session::SpinRejected;
    use crate::targeting::sector_under_pointer;
    use std::sync::Arc;
    use std::time::Duration;

    async fn next_reveal(rx: &mut tokio::sync::broadcast::Receiver<WheelEvent>) -> WheelEvent {
        loop {
            let event = rx.recv().await.unwrap();
            if matches!(event, WheelEvent::WinnerRevealed { .. }) {
                return event;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_spin_reveals_after_duration() {
        let (app, _store) = test_app(&["A", "B", "C", "D"], test_config(), Arc::new(SilentAudio));
        let mut rx = app.subscribe();

        let ticket = app.spin().await.unwrap();
        let state = app.wheel_state().await;
        assert!(state.is_spinning);
        assert!(state.winner.is_none());
        assert_eq!(state.rotation, ticket.plan.new_rotation);

        tokio::time::sleep(Duration::from_millis(8999)).await;
        assert!(app.wheel_state().await.is_spinning);

        match next_reveal(&mut rx).await {
            WheelEvent::WinnerRevealed { spin_id, winner, .. } => {
                assert_eq!(spin_id, ticket.spin_id);
                assert_eq!(winner, ticket.plan.winner);
            }
            _ => unreachable!(),
        }

        let state = app.wheel_state().await;
        assert!(!state.is_spinning);
        assert_eq!(state.winner, Some(ticket.plan.winner.clone()));
        assert_eq!(
            sector_under_pointer(state.rotation, 4),
            Some(ticket.plan.winner_index)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_trigger_ignored_while_spinning() {
        let (app, _store) = test_app(&["A", "B", "C"], test_config(), Arc::new(SilentAudio));
        app.spin().await.unwrap();
        let before = app.wheel_state().await;

        assert_eq!(app.spin().await, Err(SpinRejected::AlreadySpinning));
        assert_eq!(app.wheel_state().await, before);
    }

    #[tokio::test]
    async fn test_spin_needs_two_participants() {
        let (app, _store) = test_app(&["A"], test_config(), Arc::new(SilentAudio));
        assert_eq!(
            app.spin().await,
            Err(SpinRejected::NotEnoughParticipants { count: 1 })
        );
        assert!(!app.wheel_state().await.is_spinning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_audio_cues() {
        let audio = Arc::new(RecordingAudio::default());
        let (app, _store) = test_app(&["A", "B", "C"], test_config(), audio.clone());
        let mut rx = app.subscribe();

        app.spin().await.unwrap();
        assert_eq!(audio.calls(), vec![("play", SoundCue::Spin)]);

        next_reveal(&mut rx).await;
        assert_eq!(
            audio.calls(),
            vec![
                ("play", SoundCue::Spin),
                ("stop", SoundCue::Spin),
                ("play", SoundCue::Win)
            ]
        );

        assert!(app.dismiss_winner().await.is_some());
        assert_eq!(audio.calls().last(), Some(&("stop", SoundCue::Win)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_muted_spin_plays_nothing() {
        let audio = Arc::new(RecordingAudio::default());
        let (app, _store) = test_app(&["A", "B", "C"], test_config(), audio.clone());
        let mut rx = app.subscribe();
        app.set_muted(true).await;

        app.spin().await.unwrap();
        next_reveal(&mut rx).await;

        assert!(audio.calls().iter().all(|(action, _)| *action == "stop"));
    }

    struct BrokenAudio;

    impl crate::audio::AudioSink for BrokenAudio {
        fn play(&self, _cue: SoundCue) -> WheelResult<()> {
            Err(WheelError::Audio("autoplay blocked".to_string()))
        }

        fn stop(&self, _cue: SoundCue) -> WheelResult<()> {
            Err(WheelError::Audio("no such element".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_audio_failure_does_not_block_reveal() {
        let (app, _store) = test_app(&["A", "B", "C"], test_config(), Arc::new(BrokenAudio));
        let mut rx = app.subscribe();

        let ticket = app.spin().await.unwrap();
        next_reveal(&mut rx).await;
        assert_eq!(app.wheel_state().await.winner, Some(ticket.plan.winner));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_keeps_rotation() {
        let (app, _store) = test_app(&["A", "B", "C"], test_config(), Arc::new(SilentAudio));
        let mut rx = app.subscribe();

        app.spin().await.unwrap();
        next_reveal(&mut rx).await;
        let rotation = app.wheel_state().await.rotation;

        assert!(app.dismiss_winner().await.is_some());
        let state = app.wheel_state().await;
        assert!(state.winner.is_none());
        assert_eq!(state.rotation, rotation);
        assert_eq!(app.get_participants().await.len(), 3);
        assert_eq!(rx.recv().await.unwrap(), WheelEvent::WinnerDismissed);

        assert!(app.dismiss_winner().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotation_accumulates_across_spins() {
        let config = WheelConfig {
            spin_duration: Duration::from_millis(100),
            ..test_config()
        };
        let (app, _store) = test_app(&["A", "B", "C", "D", "E"], config, Arc::new(SilentAudio));
        let mut rx = app.subscribe();
        let mut previous = 0.0;

        for _ in 0..10 {
            let ticket = app.spin().await.unwrap();
            assert!(ticket.plan.new_rotation >= previous + 360.0 * 8.0);
            assert_ne!(ticket.plan.winner_index, 1);
            previous = ticket.plan.new_rotation;
            next_reveal(&mut rx).await;
        }
    }

    #[tokio::test]
    async fn test_view_and_render() {
        let config = WheelConfig {
            transition_duration: Duration::from_millis(4000),
            ..test_config()
        };
        let (app, _store) = test_app(&["A", "B", "C"], config, Arc::new(SilentAudio));

        let view = app.view().await;
        assert_eq!(view.participants.len(), 3);
        assert_eq!(view.rotation_degrees, 0.0);
        assert!(!view.is_spinning);
        assert_eq!(view.transition.duration_ms, 4000);

        assert!(!app.render().await.unwrap().is_empty());

        app.clear_participants().await.unwrap();
        assert!(matches!(app.render().await, Err(WheelError::EmptyWheel)));
    }
}
