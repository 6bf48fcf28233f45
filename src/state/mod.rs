mod roster;
mod spin;

use crate::audio::AudioSink;
use crate::config::WheelConfig;
use crate::events::WheelEvent;
use crate::session::SpinSession;
use crate::store::{load_or_default, ParticipantStore};
use crate::targeting::{SkipSecondSlot, SpinTargetingEngine};
use crate::types::Participant;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

/// Random source shared by all spins of a wheel
pub type SharedRng = Box<dyn RngCore + Send + Sync>;

/// Shared wheel state: roster, spin session, and the collaborators they
/// talk to. Cheap to clone; clones share everything.
///
/// Lock order is `participants` before `session`.
#[derive(Clone)]
pub struct WheelApp {
    pub config: WheelConfig,
    pub participants: Arc<RwLock<Vec<Participant>>>,
    pub session: Arc<RwLock<SpinSession>>,
    pub muted: Arc<RwLock<bool>>,
    rng: Arc<Mutex<SharedRng>>,
    store: Arc<dyn ParticipantStore>,
    audio: Arc<dyn AudioSink>,
    /// Broadcast channel for pushing state changes to the host
    pub events: broadcast::Sender<WheelEvent>,
}

impl WheelApp {
    /// Wheel with the default exclusion policy and an OS-seeded random source
    pub fn new(
        config: WheelConfig,
        store: Arc<dyn ParticipantStore>,
        audio: Arc<dyn AudioSink>,
    ) -> Self {
        let engine = SpinTargetingEngine::new(Arc::new(SkipSecondSlot), config.min_rotations);
        Self::new_with(config, store, audio, engine, Box::new(StdRng::from_os_rng()))
    }

    /// Wheel with an explicit targeting engine and random source
    pub fn new_with(
        config: WheelConfig,
        store: Arc<dyn ParticipantStore>,
        audio: Arc<dyn AudioSink>,
        engine: SpinTargetingEngine,
        rng: SharedRng,
    ) -> Self {
        let participants = load_or_default(store.as_ref());
        let (tx, _rx) = broadcast::channel(100);

        Self {
            muted: Arc::new(RwLock::new(config.start_muted)),
            config,
            participants: Arc::new(RwLock::new(participants)),
            session: Arc::new(RwLock::new(SpinSession::new(engine))),
            rng: Arc::new(Mutex::new(rng)),
            store,
            audio,
            events: tx,
        }
    }

    /// Start receiving events; drop the receiver to unsubscribe
    pub fn subscribe(&self) -> broadcast::Receiver<WheelEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: WheelEvent) {
        // Ignore send errors (no subscribers is fine)
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::audio::SoundCue;
    use crate::error::WheelResult;
    use crate::palette::color_for_index;
    use crate::store::MemoryStore;
    use std::time::Duration;

    /// Records every play/stop call in order
    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub calls: std::sync::Mutex<Vec<(&'static str, SoundCue)>>,
    }

    impl RecordingAudio {
        pub fn calls(&self) -> Vec<(&'static str, SoundCue)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AudioSink for RecordingAudio {
        fn play(&self, cue: SoundCue) -> WheelResult<()> {
            self.calls.lock().unwrap().push(("play", cue));
            Ok(())
        }

        fn stop(&self, cue: SoundCue) -> WheelResult<()> {
            self.calls.lock().unwrap().push(("stop", cue));
            Ok(())
        }
    }

    pub fn test_config() -> WheelConfig {
        WheelConfig {
            spin_duration: Duration::from_millis(9000),
            ..WheelConfig::default()
        }
    }

    /// Wheel backed by an in-memory store holding `names`
    pub fn test_app(
        names: &[&str],
        config: WheelConfig,
        audio: Arc<dyn AudioSink>,
    ) -> (WheelApp, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let participants: Vec<Participant> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Participant::new(*name, color_for_index(i)))
            .collect();
        store.save(&participants).unwrap();

        let engine = SpinTargetingEngine::new(Arc::new(SkipSecondSlot), config.min_rotations);
        let app = WheelApp::new_with(
            config,
            store.clone(),
            audio,
            engine,
            Box::new(StdRng::seed_from_u64(99)),
        );
        (app, store)
    }
}
