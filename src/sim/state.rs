//! Game state and lifecycle entry points
//!
//! Everything that makes up a session lives here. The level, enemies and
//! RNG are rebuilt from `seed` on every reset, so a seed plus an input
//! script reproduces a session exactly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::director::{Director, GameEvent, GamePhase};
use super::effects::{Effects, LandingMessage};
use super::entities::{
    Brick, CoinEffect, Enemy, FlagPole, Item, ItemKind, Particle, Platform, QuestionBlock,
};
use super::items::ItemManager;
use super::level::{Level, enemy_roster};
use super::player::Player;
use crate::consts::*;
use crate::settings::{Controls, Settings, Tuning};

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Read-only snapshot handed to the renderer after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub camera: Camera,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub bricks: &'a [Brick],
    pub question_blocks: &'a [QuestionBlock],
    pub enemies: &'a [Enemy],
    pub items: &'a [Item],
    pub coin_effects: &'a [CoinEffect],
    pub particles: &'a [Particle],
    pub flag_pole: &'a FlagPole,
    pub landing_message: &'a LandingMessage,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub coins: u32,
    pub time: u32,
    pub lives: u32,
    pub world: &'static str,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed; every reset reseeds the RNG from it
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub controls: Controls,
    /// Particle cap from the settings
    pub max_particles: usize,
    pub viewport: Viewport,
    pub director: Director,
    pub player: Player,
    pub level: Level,
    /// Dead enemies stay in place with `alive == false`
    pub enemies: Vec<Enemy>,
    pub items: ItemManager,
    pub effects: Effects,
    pub camera: Camera,
    /// Simulated frames this session
    pub frame: u64,
}

impl GameState {
    /// A fresh state sitting in the title menu
    pub fn new(seed: u64, viewport: Viewport, settings: &Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = Level::build(viewport.height, &mut rng);
        Self {
            seed,
            rng,
            tuning: settings.tuning.clone(),
            controls: settings.controls.clone(),
            max_particles: settings.max_particles(),
            viewport,
            director: Director::new(&settings.tuning),
            player: Player::new(&settings.tuning),
            level,
            enemies: enemy_roster(viewport.height),
            items: ItemManager::default(),
            effects: Effects::new(settings.max_particles()),
            camera: Camera::default(),
            frame: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.director.phase
    }

    /// Menu -> Playing
    pub fn start_game(&mut self) {
        if self.director.phase != GamePhase::Menu {
            log::warn!("start_game ignored in {:?}", self.director.phase);
            return;
        }
        self.reset_session();
    }

    /// Start over from scratch while playing or after a game over
    pub fn restart_game(&mut self) {
        if self.director.phase == GamePhase::Menu {
            log::warn!("restart_game ignored in menu, use start_game");
            return;
        }
        self.reset_session();
    }

    pub fn return_to_menu(&mut self) {
        self.director.enter_menu();
    }

    /// Rebuild the world and begin a new session in `Playing`
    fn reset_session(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.level = Level::build(self.viewport.height, &mut self.rng);
        self.enemies = enemy_roster(self.viewport.height);
        self.player = Player::new(&self.tuning);
        self.items = ItemManager::default();
        self.effects = Effects::new(self.max_particles);
        self.camera.reset();
        self.frame = 0;
        self.director.begin(&self.tuning);
    }

    /// New viewport size. The layout is anchored to the bottom edge, so
    /// everything moves down by the height delta.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring resize to {width}x{height}");
            return;
        }
        let dy = height - self.viewport.height;
        self.viewport = Viewport::new(width, height);
        if dy == 0.0 {
            return;
        }

        self.level.shift(dy);
        for enemy in &mut self.enemies {
            enemy.pos.y += dy;
        }
        self.items.shift(dy);
        self.effects.shift(dy);
        self.player.pos.y += dy;
        self.player.prev_pos.y += dy;
        log::debug!("Resized to {width}x{height}, shifted layout by {dy}");
    }

    /// Add a power-up to the world
    pub fn spawn_item(&mut self, kind: ItemKind, pos: Vec2) {
        self.items.spawn(kind, pos);
    }

    /// Take all notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.director.drain_events()
    }

    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            phase: self.director.phase,
            viewport: self.viewport,
            camera: self.camera,
            player: &self.player,
            platforms: &self.level.platforms,
            bricks: &self.level.bricks,
            question_blocks: &self.level.question_blocks,
            enemies: &self.enemies,
            items: &self.items.items,
            coin_effects: &self.effects.coin_effects,
            particles: &self.effects.particles,
            flag_pole: &self.level.flag_pole,
            landing_message: &self.effects.landing_message,
        }
    }

    pub fn hud(&self) -> Hud {
        let board = &self.director.board;
        Hud {
            score: board.score,
            coins: board.coins,
            time: board.time,
            lives: board.lives,
            world: WORLD_NAME,
        }
    }
}
