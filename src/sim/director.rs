//! Level Director: scoring, lives, the countdown and the win/lose lifecycle
//!
//! ```text
//!   Menu --start_game--> Playing --lose_life (last)--> GameOver { won: false }
//!                          |  ^
//!                          |  +--restart_game-- (Playing | GameOver)
//!                          +--check_flag_pole--> GameOver { won: true }
//!   any --return_to_menu--> Menu
//! ```
//!
//! Every transition out of `Playing` begins a new timeline session, which
//! cancels the pending countdown and any invincibility expiries.

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entities::{FlagPole, ItemKind};
use super::geometry::Bounds;
use super::player::Player;
use super::schedule::{TimedEvent, Timeline};
use crate::consts::*;
use crate::settings::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu, nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or menu
    GameOver { won: bool },
}

/// Notifications for the menu/overlay controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Show the title menu, hide the game and game-over panels
    ShowMenu,
    /// Hide menu and game-over panels, show the game
    GameStarted,
    LifeLost { lives_left: u32 },
    ExtraLife { lives: u32 },
    BrickBroken,
    CoinCollected { coins: u32 },
    EnemyStomped,
    PowerUp { kind: ItemKind },
    /// Player shrank instead of losing a life
    PlayerHurt,
    /// Show the game-over panel with the final tallies
    GameOver {
        won: bool,
        score: u64,
        coins: u32,
        kills: u32,
    },
}

/// Per-session tallies shown on the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub coins: u32,
    pub lives: u32,
    /// Seconds of level time remaining
    pub time: u32,
    pub kills: u32,
}

impl Scoreboard {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            coins: 0,
            lives: tuning.start_lives,
            time: tuning.time_budget,
            kills: 0,
        }
    }

    /// Count a coin. Returns true when it completed a set of 100 and
    /// converted into an extra life.
    ///
    /// At most one conversion happens per coin, matching the one-coin
    /// increments every coin source produces.
    pub fn add_coin(&mut self) -> bool {
        self.coins += 1;
        if self.coins >= COINS_PER_LIFE {
            self.coins -= COINS_PER_LIFE;
            self.lives += 1;
            true
        } else {
            false
        }
    }
}

/// Owns the lifecycle phase, tallies, timed events and outgoing
/// notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    pub phase: GamePhase,
    pub board: Scoreboard,
    pub timeline: Timeline,
    pub flag_bonus: u64,
    events: Vec<GameEvent>,
}

impl Director {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            board: Scoreboard::new(tuning),
            timeline: Timeline::new(),
            flag_bonus: 0,
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn award(&mut self, points: u64) {
        self.board.score += points;
    }

    /// Coin tally plus the 100-coin extra life
    pub fn collect_coin(&mut self) {
        let extra_life = self.board.add_coin();
        self.emit(GameEvent::CoinCollected {
            coins: self.board.coins,
        });
        if extra_life {
            log::info!("100 coins: extra life ({} lives)", self.board.lives);
            self.emit(GameEvent::ExtraLife {
                lives: self.board.lives,
            });
        }
    }

    /// Make the player invincible for `duration_ms` of session time
    pub fn grant_invincibility(&mut self, player: &mut Player, duration_ms: f64) {
        let grant = player.grant_invincibility();
        self.timeline
            .schedule(duration_ms, TimedEvent::InvincibilityExpired { grant });
        log::debug!("Invincible for {duration_ms} ms (grant {grant})");
    }

    /// Reset tallies and open a new session in `Playing`
    pub(crate) fn begin(&mut self, tuning: &Tuning) {
        self.board = Scoreboard::new(tuning);
        self.flag_bonus = 0;
        let session = self.timeline.begin_session();
        self.timeline
            .schedule(COUNTDOWN_INTERVAL_MS, TimedEvent::CountdownTick);
        self.phase = GamePhase::Playing;
        log::info!("Session {session} started: {} lives, {}s", self.board.lives, self.board.time);
        self.emit(GameEvent::GameStarted);
    }

    /// Leave to the title menu, cancelling all pending timers
    pub(crate) fn enter_menu(&mut self) {
        self.timeline.begin_session();
        self.phase = GamePhase::Menu;
        log::info!("Returned to menu");
        self.emit(GameEvent::ShowMenu);
    }

    /// Fire every timed event that has come due.
    ///
    /// Returns true if the countdown ran out; the caller owes a life and
    /// `lose_life` restores the time budget. Events still due after that
    /// wait for the next frame.
    pub fn process_due(&mut self, player: &mut Player) -> bool {
        while let Some((due_ms, event)) = self.timeline.pop_due() {
            match event {
                TimedEvent::CountdownTick => {
                    if !self.is_playing() {
                        continue;
                    }
                    self.board.time = self.board.time.saturating_sub(1);
                    self.timeline
                        .schedule_at(due_ms + COUNTDOWN_INTERVAL_MS, TimedEvent::CountdownTick);
                    if self.board.time == 0 {
                        log::info!("Time up");
                        return true;
                    }
                }
                TimedEvent::InvincibilityExpired { grant } => {
                    if player.expire_invincibility(grant) {
                        log::debug!("Invincibility ended (grant {grant})");
                    }
                }
            }
        }
        false
    }

    /// Lose a life: game over on the last one, otherwise respawn at the
    /// level start with a fresh time budget.
    pub fn lose_life(&mut self, player: &mut Player, camera: &mut Camera, tuning: &Tuning) {
        if !self.is_playing() {
            return;
        }
        self.board.lives = self.board.lives.saturating_sub(1);
        log::info!("Life lost, {} remaining", self.board.lives);
        self.emit(GameEvent::LifeLost {
            lives_left: self.board.lives,
        });
        if self.board.lives == 0 {
            self.game_over(false);
            return;
        }
        player.respawn();
        camera.reset();
        self.board.time = tuning.time_budget;
    }

    /// Win once the player reaches the flag. Single fire.
    pub fn check_flag_pole(&mut self, flag: &mut FlagPole, player: &Player, tuning: &Tuning) {
        if flag.reached || !self.is_playing() {
            return;
        }
        if player.pos.x >= flag.bounds().left() {
            flag.reached = true;
            self.flag_bonus = self.board.time as u64 * tuning.score_time_bonus;
            self.award(self.flag_bonus);
            log::info!(
                "Flag reached with {}s left: +{} bonus",
                self.board.time,
                self.flag_bonus
            );
            self.game_over(true);
        }
    }

    fn game_over(&mut self, won: bool) {
        self.timeline.begin_session();
        self.phase = GamePhase::GameOver { won };
        log::info!(
            "Game over ({}): score {}, coins {}, kills {}",
            if won { "won" } else { "lost" },
            self.board.score,
            self.board.coins,
            self.board.kills
        );
        self.emit(GameEvent::GameOver {
            won,
            score: self.board.score,
            coins: self.board.coins,
            kills: self.board.kills,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;

    fn playing_director(tuning: &Tuning) -> Director {
        let mut director = Director::new(tuning);
        director.begin(tuning);
        director.drain_events();
        director
    }

    #[test]
    fn test_coin_rollover_fires_once_at_crossing() {
        let tuning = Tuning::default();
        let mut director = playing_director(&tuning);
        director.board.coins = 95;
        director.board.lives = 3;
        for _ in 0..6 {
            director.collect_coin();
        }
        assert_eq!(director.board.coins, 1);
        assert_eq!(director.board.lives, 4);
        let extra = director
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ExtraLife { .. }))
            .count();
        assert_eq!(extra, 1);
    }

    #[test]
    fn test_countdown_follows_wall_clock() {
        let tuning = Tuning::default();
        let mut director = playing_director(&tuning);
        let mut player = Player::new(&tuning);

        // 30 fps host: 45 frames is 1.5 s
        for _ in 0..45 {
            director.timeline.advance(1000.0 / 30.0);
            assert!(!director.process_due(&mut player));
        }
        assert_eq!(director.board.time, tuning.time_budget - 1);

        director.timeline.advance(3000.0);
        director.process_due(&mut player);
        assert_eq!(director.board.time, tuning.time_budget - 4);
    }

    #[test]
    fn test_countdown_exhaustion_reports_time_up() {
        let tuning = Tuning::default();
        let mut director = playing_director(&tuning);
        let mut player = Player::new(&tuning);
        let mut camera = Camera::default();
        director.board.time = 1;
        director.timeline.advance(1000.0);
        assert!(director.process_due(&mut player));
        assert_eq!(director.board.time, 0);

        director.lose_life(&mut player, &mut camera, &tuning);
        assert_eq!(director.board.time, tuning.time_budget);
        assert_eq!(director.board.lives, tuning.start_lives - 1);
    }

    #[test]
    fn test_lose_life_respawns_and_keeps_tallies() {
        let tuning = Tuning::default();
        let mut director = playing_director(&tuning);
        let mut player = Player::new(&tuning);
        let mut camera = Camera::default();
        director.board.score = 1234;
        director.board.coins = 7;
        director.board.time = 12;
        player.pos.x = 900.0;
        player.vel.x = 5.0;
        camera.x = 600.0;

        director.lose_life(&mut player, &mut camera, &tuning);
        assert_eq!(director.board.lives, tuning.start_lives - 1);
        assert_eq!(director.board.score, 1234);
        assert_eq!(director.board.coins, 7);
        assert_eq!(director.board.time, tuning.time_budget);
        assert_eq!(player.pos.x, PLAYER_START_X);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(camera.x, 0.0);
        assert!(director.is_playing());
    }

    #[test]
    fn test_last_life_ends_game_and_cancels_countdown() {
        let tuning = Tuning::default();
        let mut director = playing_director(&tuning);
        let mut player = Player::new(&tuning);
        let mut camera = Camera::default();
        director.board.lives = 1;

        director.lose_life(&mut player, &mut camera, &tuning);
        assert_eq!(director.phase, GamePhase::GameOver { won: false });
        assert_eq!(director.board.lives, 0);
        assert_eq!(director.timeline.pending(), 0);

        // Further hits are ignored, lives never go negative
        director.lose_life(&mut player, &mut camera, &tuning);
        assert_eq!(director.board.lives, 0);

        let events = director.drain_events();
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver { won: false, .. })
        ));
    }

    #[test]
    fn test_flag_pole_awards_bonus_once() {
        let tuning = Tuning::default();
        let mut director = playing_director(&tuning);
        let mut player = Player::new(&tuning);
        let mut flag = FlagPole {
            rect: Rect::new(7000.0, 0.0, 10.0, 200.0),
            reached: false,
        };
        director.board.time = 120;
        director.board.score = 500;

        player.pos.x = 6999.0;
        director.check_flag_pole(&mut flag, &player, &tuning);
        assert!(director.is_playing());

        player.pos.x = 7000.0;
        director.check_flag_pole(&mut flag, &player, &tuning);
        assert_eq!(director.phase, GamePhase::GameOver { won: true });
        assert_eq!(director.board.score, 500 + 120 * 50);

        director.check_flag_pole(&mut flag, &player, &tuning);
        assert_eq!(director.board.score, 500 + 120 * 50);
    }

    #[test]
    fn test_invincibility_expires_by_grant() {
        let tuning = Tuning::default();
        let mut director = playing_director(&tuning);
        let mut player = Player::new(&tuning);
        director.grant_invincibility(&mut player, 2000.0);
        director.timeline.advance(1999.0);
        director.process_due(&mut player);
        assert!(player.is_invincible);
        director.timeline.advance(1.0);
        director.process_due(&mut player);
        assert!(!player.is_invincible);
    }
}
