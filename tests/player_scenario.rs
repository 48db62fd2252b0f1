//! End-to-end scenario: a media player driven by a transition table.

mod common;

use parking_lot::Mutex;
use statecraft::rules::{Effect, EffectError, RuleTable, TransitionType};
use statecraft::{hook, DispatchError, EffectOutcome, TransitionEngine};
use std::sync::{Arc, OnceLock};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PlayerState {
    Idle,
    Playing,
    Paused,
    Stopped,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PlayerAction {
    Play,
    Pause,
    Resume,
    Stop,
}

/// Stand-in for an audio backend; records every call it receives.
#[derive(Default)]
struct AudioService {
    calls: Mutex<Vec<&'static str>>,
    broken: bool,
}

impl AudioService {
    fn shared() -> Arc<AudioService> {
        static SHARED: OnceLock<Arc<AudioService>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(AudioService::default())))
    }

    fn broken() -> Arc<AudioService> {
        Arc::new(AudioService {
            calls: Mutex::new(Vec::new()),
            broken: true,
        })
    }

    async fn call(&self, command: &'static str) -> Result<(), EffectError> {
        tokio::task::yield_now().await;
        self.calls.lock().push(command);
        if self.broken {
            return Err(EffectError::failed(format!("{command}: output device missing")));
        }
        Ok(())
    }

    fn effect(service: Arc<AudioService>, command: &'static str) -> Effect {
        Effect::new(move || {
            let service = Arc::clone(&service);
            async move { service.call(command).await }
        })
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }
}

#[derive(Clone, Copy, Debug)]
enum PlayerTransition {
    IdlePlay,
    PlayingPause,
    PausedResume,
    PlayingStop,
    PausedStop,
}

impl TransitionType for PlayerTransition {
    type State = PlayerState;
    type Action = PlayerAction;

    fn all() -> Vec<Self> {
        vec![
            Self::IdlePlay,
            Self::PlayingPause,
            Self::PausedResume,
            Self::PlayingStop,
            Self::PausedStop,
        ]
    }

    fn from(&self) -> PlayerState {
        match self {
            Self::IdlePlay => PlayerState::Idle,
            Self::PlayingPause | Self::PlayingStop => PlayerState::Playing,
            Self::PausedResume | Self::PausedStop => PlayerState::Paused,
        }
    }

    fn action(&self) -> PlayerAction {
        match self {
            Self::IdlePlay => PlayerAction::Play,
            Self::PlayingPause => PlayerAction::Pause,
            Self::PausedResume => PlayerAction::Resume,
            Self::PlayingStop | Self::PausedStop => PlayerAction::Stop,
        }
    }

    fn to(&self) -> PlayerState {
        match self {
            Self::IdlePlay | Self::PausedResume => PlayerState::Playing,
            Self::PlayingPause => PlayerState::Paused,
            Self::PlayingStop | Self::PausedStop => PlayerState::Stopped,
        }
    }

    fn effect(&self) -> Option<Effect> {
        let command = match self {
            Self::IdlePlay => "play",
            Self::PlayingPause => "pause",
            Self::PausedResume => "resume",
            Self::PlayingStop | Self::PausedStop => "stop",
        };
        Some(AudioService::effect(AudioService::shared(), command))
    }
}

fn recording_hook() -> (statecraft::Hook<PlayerState>, Arc<Mutex<Vec<PlayerState>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    (hook(move |state: &PlayerState| log.lock().push(*state)), seen)
}

#[tokio::test]
async fn player_walks_through_its_lifecycle() {
    common::init_tracing();
    let (hook, seen) = recording_hook();
    let engine =
        TransitionEngine::for_transitions::<PlayerTransition>(PlayerState::Idle, Some(hook))
            .unwrap();

    engine.dispatch(PlayerAction::Play).await.unwrap();
    assert_eq!(engine.state(), PlayerState::Playing);

    engine.dispatch(PlayerAction::Pause).await.unwrap();
    assert_eq!(engine.state(), PlayerState::Paused);

    engine.dispatch(PlayerAction::Resume).await.unwrap();
    assert_eq!(engine.state(), PlayerState::Playing);

    engine.dispatch(PlayerAction::Stop).await.unwrap();
    assert_eq!(engine.state(), PlayerState::Stopped);

    let rejected = engine.dispatch(PlayerAction::Pause).await;
    assert_eq!(
        rejected,
        Err(DispatchError::InvalidTransition {
            state: "Stopped".to_string(),
            action: "Pause".to_string(),
        })
    );
    assert_eq!(engine.state(), PlayerState::Stopped);

    assert_eq!(
        *seen.lock(),
        vec![
            PlayerState::Idle,
            PlayerState::Playing,
            PlayerState::Paused,
            PlayerState::Playing,
            PlayerState::Stopped,
        ]
    );
    assert_eq!(
        AudioService::shared().calls(),
        vec!["play", "pause", "resume", "stop"]
    );
    assert_eq!(
        engine.history().get_path(),
        vec![
            &PlayerState::Idle,
            &PlayerState::Playing,
            &PlayerState::Paused,
            &PlayerState::Playing,
            &PlayerState::Stopped,
        ]
    );
}

#[tokio::test]
async fn broken_audio_does_not_block_transitions() {
    common::init_tracing();
    let audio = AudioService::broken();
    let table = RuleTable::new(vec![
        PlayerTransition::IdlePlay
            .rule()
            .with_effect(AudioService::effect(Arc::clone(&audio), "play")),
        PlayerTransition::PlayingStop
            .rule()
            .with_effect(AudioService::effect(Arc::clone(&audio), "stop")),
    ])
    .unwrap();
    let (hook, seen) = recording_hook();
    let engine = TransitionEngine::new(PlayerState::Idle, table, Some(hook));

    let played = engine.dispatch(PlayerAction::Play).await.unwrap();
    let stopped = engine.dispatch(PlayerAction::Stop).await.unwrap();

    assert!(played.effect.is_failure());
    assert_eq!(
        stopped.effect,
        EffectOutcome::Failed("Effect failed: stop: output device missing".to_string())
    );
    assert_eq!(engine.state(), PlayerState::Stopped);
    assert_eq!(
        *seen.lock(),
        vec![PlayerState::Idle, PlayerState::Playing, PlayerState::Stopped]
    );
    assert_eq!(audio.calls(), vec!["play", "stop"]);
    assert_eq!(engine.history().effect_failures(), 2);
}

#[tokio::test]
async fn available_actions_reflect_player_state() {
    let engine = TransitionEngine::new(
        PlayerState::Paused,
        RuleTable::new(PlayerTransition::all().iter().map(|t| t.rule()).collect()).unwrap(),
        None,
    );

    assert_eq!(
        engine.available_actions(),
        vec![PlayerAction::Resume, PlayerAction::Stop]
    );
    assert!(!engine.can_dispatch(&PlayerAction::Play));
}
