//! Per-frame simulation tick
//!
//! Physics advances one step per call. `elapsed_ms` only drives the session
//! clock (countdown and invincibility expiries), so the level time follows
//! the wall clock whatever the host's frame rate.

use super::blocks;
use super::enemy;
use super::player;
use super::state::GameState;
use crate::platform::InputSource;
use crate::settings::Controls;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Held jump; re-triggers on every touchdown while held
    pub jump: bool,
}

impl TickInput {
    /// Resolve held keys through the configured bindings
    pub fn from_source(source: &impl InputSource, controls: &Controls) -> Self {
        let held = |keys: &[String]| keys.iter().any(|k| source.is_held(k));
        Self {
            left: held(&controls.left),
            right: held(&controls.right),
            jump: held(&controls.jump),
        }
    }
}

/// Advance the game state by one frame. No-op unless playing.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f64) {
    if !state.director.is_playing() {
        return;
    }
    state.frame += 1;

    // Timed events first: countdown and invincibility expiries
    state.director.timeline.advance(elapsed_ms);
    if state.director.process_due(&mut state.player) {
        state
            .director
            .lose_life(&mut state.player, &mut state.camera, &state.tuning);
        if !state.director.is_playing() {
            return;
        }
    }

    if player::update(&mut state.player, input, &state.tuning, &state.level.platforms) {
        state
            .effects
            .landing_message
            .on_landing(state.player.landing_count);
    }

    blocks::resolve_strikes(
        &mut state.player,
        &mut state.level.bricks,
        &mut state.level.question_blocks,
        &mut state.director,
        &mut state.effects,
        &mut state.items,
        &mut state.rng,
        &state.tuning,
    );

    if player::fell_out(&state.player, state.viewport.height) {
        log::debug!("Fell into a pit at x={}", state.player.pos.x);
        state
            .director
            .lose_life(&mut state.player, &mut state.camera, &state.tuning);
        if !state.director.is_playing() {
            return;
        }
    }
    player::clamp_to_level(&mut state.player);

    let life_lost = enemy::update(
        &mut state.enemies,
        &state.level.platforms,
        &mut state.player,
        &state.camera,
        state.viewport.width,
        &mut state.director,
        &mut state.effects,
        &mut state.rng,
        &state.tuning,
    );
    if life_lost {
        state
            .director
            .lose_life(&mut state.player, &mut state.camera, &state.tuning);
        if !state.director.is_playing() {
            return;
        }
    }

    state.items.update(
        &state.level.platforms,
        &mut state.player,
        &mut state.director,
        &state.camera,
        state.viewport.height,
        &state.tuning,
    );

    state.effects.update(&state.tuning);
    blocks::decay_bounce(&mut state.level.question_blocks);

    state.camera.follow(&state.player, state.viewport.width);

    state
        .director
        .check_flag_pole(&mut state.level.flag_pole, &state.player, &state.tuning);
}
