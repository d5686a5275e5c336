//! Platform abstraction layer
//!
//! Seams between the simulation and whatever hosts it:
//! - Keyboard state (`InputSource`, with `KeyMap` as a ready-made store)
//! - Drawing (`RenderSink`)
//! - Score/lives display (`HudSink`)
//! - Menu and game-over panels (`MenuController`)

use std::collections::HashMap;

use crate::sim::{GameEvent, GameState, Hud, RenderView};

/// Held-key query over lower-case logical key names (`"arrowleft"`, `" "`)
pub trait InputSource {
    fn is_held(&self, key: &str) -> bool;
}

/// Held state fed from key down/up events
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    keys: HashMap<String, bool>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase(), true);
    }

    pub fn release(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase(), false);
    }

    /// Forget everything (focus lost)
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl InputSource for KeyMap {
    fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}

/// Draws one frame from a read-only view of the state
pub trait RenderSink {
    fn render(&mut self, view: &RenderView<'_>);
}

pub trait HudSink {
    fn update_hud(&mut self, hud: &Hud);
}

/// Menu and overlay panels. Every method has a no-op default so hosts only
/// implement what they display.
pub trait MenuController {
    fn show_menu(&mut self) {}

    fn show_game(&mut self) {}

    fn show_game_over(&mut self, _won: bool, _score: u64, _coins: u32, _kills: u32) {}

    /// Every event, including the ones routed to the methods above
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Route pending notifications to the menu controller
pub fn dispatch_events(state: &mut GameState, menu: &mut impl MenuController) {
    for event in state.drain_events() {
        match event {
            GameEvent::ShowMenu => menu.show_menu(),
            GameEvent::GameStarted => menu.show_game(),
            GameEvent::GameOver {
                won,
                score,
                coins,
                kills,
            } => menu.show_game_over(won, score, coins, kills),
            _ => {}
        }
        menu.on_event(&event);
    }
}

/// Render and refresh the HUD after a tick
pub fn present(state: &GameState, renderer: &mut impl RenderSink, hud: &mut impl HudSink) {
    renderer.render(&state.view());
    hud.update_hud(&state.hud());
}
