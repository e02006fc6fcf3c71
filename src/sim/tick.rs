//! Per-frame advance and shot resolution

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState, MarkerKind, ShotMarker};

/// What a shot did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Game over; nothing happened
    Ignored,
    /// Destroyed the target with this id
    Hit { id: u32, points: u32 },
    Miss,
}

/// Advance the game state by one display frame
pub fn advance_frame(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    let bounds = state.bounds;
    for target in &mut state.targets {
        target.update(bounds);
    }

    for marker in &mut state.markers {
        marker.frames_left = marker.frames_left.saturating_sub(1);
    }
    state.markers.retain(|m| m.frames_left > 0);
}

/// Resolve a click at `pos`.
///
/// Targets are tested newest first and at most one is destroyed. Clearing
/// the field advances the wave; a miss that exhausts the budget ends the run.
pub fn handle_shot(state: &mut GameState, pos: Vec2) -> ShotOutcome {
    if state.phase == GamePhase::GameOver {
        return ShotOutcome::Ignored;
    }

    state.events.push(GameEvent::Shot { pos });

    let Some(index) = state.targets.iter().rposition(|t| t.is_hit(pos)) else {
        record_miss(state, pos);
        return ShotOutcome::Miss;
    };

    let target = state.targets.remove(index);
    state.score += u64::from(target.points);
    state.hits += 1;
    state.markers.push(ShotMarker::new(pos, MarkerKind::Hit));
    state.events.push(GameEvent::TargetHit {
        pos,
        points: target.points,
    });

    if state.targets.is_empty() && state.phase == GamePhase::Active {
        state.wave += 1;
        state.events.push(GameEvent::WaveCleared { wave: state.wave });
        state.spawn_wave();
    }

    ShotOutcome::Hit {
        id: target.id,
        points: target.points,
    }
}

fn record_miss(state: &mut GameState, pos: Vec2) {
    state.misses += 1;
    state.markers.push(ShotMarker::new(pos, MarkerKind::Miss));
    state.events.push(GameEvent::Missed { pos });

    if state.misses >= state.rules.max_misses {
        state.phase = GamePhase::GameOver;
        let summary = state.summary();
        log::info!(
            "Game over: score {}, hits {}, misses {}, accuracy {}%",
            summary.score,
            summary.hits,
            summary.misses,
            summary.accuracy
        );
        state.events.push(GameEvent::GameOver(summary));
    }
}
