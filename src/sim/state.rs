//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::target::{Bounds, Target};
use super::wave::spawn_wave;
use crate::accuracy_percent;
use crate::consts::MARKER_FRAMES;
use crate::settings::Rules;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Shots are accepted and targets move
    Active,
    /// Miss budget exhausted; frozen until a new game
    GameOver,
}

/// Final numbers shown on the game-over overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u64,
    pub hits: u32,
    pub misses: u32,
    /// Rounded percentage
    pub accuracy: u32,
}

/// Things that happened during an operation, in order.
///
/// Drained by the orchestrator, which turns them into sounds and HUD updates.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A shot was fired (always first for an accepted shot)
    Shot { pos: Vec2 },
    /// A target was destroyed
    TargetHit { pos: Vec2, points: u32 },
    /// The shot hit nothing
    Missed { pos: Vec2 },
    /// Miss budget exhausted
    GameOver(Summary),
    /// Every target of the wave is gone; `wave` is the new wave number
    WaveCleared { wave: u32 },
    /// A fresh batch of targets is on the field
    WaveSpawned { wave: u32, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Hit,
    Miss,
}

/// Short-lived hit/miss effect (visual only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotMarker {
    pub pos: Vec2,
    pub kind: MarkerKind,
    /// Frames left on screen
    pub frames_left: u32,
}

impl ShotMarker {
    pub fn new(pos: Vec2, kind: MarkerKind) -> Self {
        Self {
            pos,
            kind,
            frames_left: MARKER_FRAMES,
        }
    }

    /// 1.0 when fresh, fading toward 0.0
    pub fn alpha(&self) -> f32 {
        self.frames_left as f32 / MARKER_FRAMES as f32
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rules: Rules,
    pub bounds: Bounds,
    pub phase: GamePhase,
    pub score: u64,
    pub hits: u32,
    pub misses: u32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Live targets in spawn order; shots test the newest first
    pub targets: Vec<Target>,
    /// Last pointer position (crosshair only)
    pub cursor: Vec2,
    /// Visual hit/miss markers (not gameplay-affecting)
    pub markers: Vec<ShotMarker>,
    pub(crate) events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game and spawn wave 1
    pub fn new(bounds: Bounds, rules: Rules, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rules,
            bounds,
            phase: GamePhase::Active,
            score: 0,
            hits: 0,
            misses: 0,
            wave: 1,
            targets: Vec::new(),
            cursor: bounds.size() / 2.0,
            markers: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        state.spawn_wave();
        state
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Reset counters and phase, then spawn wave 1 again.
    ///
    /// The RNG keeps running so the new layout differs from the last one.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Active;
        self.score = 0;
        self.hits = 0;
        self.misses = 0;
        self.wave = 1;
        self.markers.clear();
        self.spawn_wave();
        log::info!("New game started");
    }

    /// Replace the live targets with a fresh wave of the configured size
    pub fn spawn_wave(&mut self) {
        let count = self.rules.targets_per_wave;
        let next_id = &mut self.next_id;
        spawn_wave(
            &mut self.targets,
            self.bounds,
            count,
            &self.rules,
            &mut self.rng,
            || {
                let id = *next_id;
                *next_id += 1;
                id
            },
        );
        log::info!("Wave {}: {} targets", self.wave, count);
        self.events.push(GameEvent::WaveSpawned {
            wave: self.wave,
            count,
        });
    }

    /// Canvas size changed. Targets left outside are pulled back in on their next update.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.hits, self.misses)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            hits: self.hits,
            misses: self.misses,
            accuracy: self.accuracy(),
        }
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_spawns_first_wave() {
        let mut state = GameState::new(Bounds::new(800.0, 600.0), Rules::default(), 1);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.wave, 1);
        assert_eq!(state.targets.len(), 10);
        assert_eq!(state.cursor, Vec2::new(400.0, 300.0));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::WaveSpawned { wave: 1, count: 10 }]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = GameState::new(Bounds::new(800.0, 600.0), Rules::default(), 1);
        state.score = 70;
        state.hits = 7;
        state.misses = 5;
        state.wave = 3;
        state.phase = GamePhase::GameOver;
        state.targets.truncate(2);
        let old_ids: Vec<u32> = state.targets.iter().map(|t| t.id).collect();

        state.reset();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!((state.score, state.hits, state.misses, state.wave), (0, 0, 0, 1));
        assert_eq!(state.targets.len(), 10);
        assert!(state.targets.iter().all(|t| !old_ids.contains(&t.id)));
    }

    #[test]
    fn test_targets_return_after_canvas_shrinks() {
        let mut state = GameState::new(Bounds::new(800.0, 600.0), Rules::default(), 7);
        state.set_bounds(Bounds::new(400.0, 300.0));
        for _ in 0..600 {
            crate::sim::advance_frame(&mut state);
        }
        let bounds = state.bounds;
        assert!(state.targets.iter().all(|t| bounds.contains_circle(t.pos, t.radius)));
    }

    #[test]
    fn test_edge_spawns_move_inside() {
        let rules = Rules {
            spawn_margin: 0.0,
            ..Rules::default()
        };
        let mut state = GameState::new(Bounds::new(800.0, 600.0), rules, 7);
        for _ in 0..600 {
            crate::sim::advance_frame(&mut state);
            let bounds = state.bounds;
            assert!(state.targets.iter().all(|t| bounds.contains_circle(t.pos, t.radius)));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(Bounds::new(800.0, 600.0), Rules::default(), 99);
        let b = GameState::new(Bounds::new(800.0, 600.0), Rules::default(), 99);
        assert_eq!(a.targets, b.targets);
    }

    #[test]
    fn test_summary() {
        let mut state = GameState::new(Bounds::new(800.0, 600.0), Rules::default(), 1);
        state.score = 30;
        state.hits = 3;
        state.misses = 5;
        assert_eq!(
            state.summary(),
            Summary {
                score: 30,
                hits: 3,
                misses: 5,
                accuracy: 38
            }
        );
    }

    #[test]
    fn test_marker_fades() {
        let mut marker = ShotMarker::new(Vec2::ZERO, MarkerKind::Hit);
        assert_eq!(marker.alpha(), 1.0);
        marker.frames_left = 0;
        assert_eq!(marker.alpha(), 0.0);
    }
}
