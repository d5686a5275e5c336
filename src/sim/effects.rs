//! Visual-only transients: coin pops, debris particles and the landing
//! message overlay. Nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{CoinEffect, Particle};
use super::physics::integrate;
use crate::consts::*;
use crate::settings::Tuning;

/// Overlay text shown on the first two touchdowns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandingMessage {
    pub visible: bool,
    /// 1.0 until the last `MESSAGE_FADE_FRAMES`, then fades linearly
    pub opacity: f32,
    /// Frames remaining
    pub duration: i32,
    pub text: String,
}

impl LandingMessage {
    pub fn arm(&mut self, text: &str) {
        self.visible = true;
        self.opacity = 1.0;
        self.duration = MESSAGE_DURATION;
        self.text = text.to_string();
    }

    /// React to the player's `landing_count`-th touchdown. Only the first two
    /// have a message.
    pub fn on_landing(&mut self, landing_count: u32) {
        match landing_count {
            1 => self.arm(FIRST_LANDING_TEXT),
            2 => self.arm(SECOND_LANDING_TEXT),
            _ => {}
        }
    }

    pub fn update(&mut self) {
        if !self.visible {
            return;
        }
        self.duration -= 1;
        if self.duration <= MESSAGE_FADE_FRAMES {
            self.opacity = self.duration.max(0) as f32 / MESSAGE_FADE_FRAMES as f32;
        }
        if self.duration <= 0 {
            self.visible = false;
        }
    }
}

/// Owner of every transient visual container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub coin_effects: Vec<CoinEffect>,
    pub particles: Vec<Particle>,
    pub landing_message: LandingMessage,
    /// Particle cap from the quality preset (0 disables particles)
    pub max_particles: usize,
}

impl Effects {
    pub fn new(max_particles: usize) -> Self {
        Self {
            max_particles,
            ..Self::default()
        }
    }

    /// Coin popping up out of a block
    pub fn spawn_coin(&mut self, at: Vec2) {
        self.coin_effects.push(CoinEffect {
            pos: at,
            vel: Vec2::new(0.0, COIN_EFFECT_VELOCITY),
            life: COIN_EFFECT_LIFE,
        });
    }

    /// Burst of debris at `at`. Oldest particles make room when at the cap.
    pub fn burst(&mut self, rng: &mut impl Rng, at: Vec2, color: u32) {
        if self.max_particles == 0 {
            return;
        }
        for _ in 0..PARTICLES_PER_BURST {
            if self.particles.len() >= self.max_particles {
                self.particles.remove(0);
            }
            let vel = Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-4.0..0.0));
            self.particles.push(Particle {
                pos: at,
                vel,
                color,
                life: PARTICLE_LIFE,
            });
        }
    }

    /// Advance coin pops, particles and the landing message by one frame.
    ///
    /// Expired entries are compacted out in the same pass.
    pub fn update(&mut self, tuning: &Tuning) {
        self.coin_effects = std::mem::take(&mut self.coin_effects)
            .into_iter()
            .filter_map(|mut coin| {
                integrate(&mut coin.pos, &mut coin.vel, tuning.coin_gravity);
                coin.life = coin.life.saturating_sub(1);
                (coin.life > 0).then_some(coin)
            })
            .collect();

        self.particles = std::mem::take(&mut self.particles)
            .into_iter()
            .filter_map(|mut particle| {
                integrate(&mut particle.pos, &mut particle.vel, tuning.particle_gravity);
                particle.life = particle.life.saturating_sub(1);
                (particle.life > 0).then_some(particle)
            })
            .collect();

        self.landing_message.update();
    }

    /// Vertical relayout after a viewport resize
    pub fn shift(&mut self, dy: f32) {
        for coin in &mut self.coin_effects {
            coin.pos.y += dy;
        }
        for particle in &mut self.particles {
            particle.pos.y += dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::DEBRIS_COLOR;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_coin_effect_expires_on_zero() {
        let tuning = Tuning::default();
        let mut effects = Effects::new(500);
        effects.spawn_coin(Vec2::new(420.0, 100.0));

        for _ in 0..COIN_EFFECT_LIFE - 1 {
            effects.update(&tuning);
        }
        assert_eq!(effects.coin_effects.len(), 1);
        assert_eq!(effects.coin_effects[0].life, 1);
        assert!(effects.coin_effects[0].pos.y < 100.0);
        effects.update(&tuning);
        assert!(effects.coin_effects.is_empty());
    }

    #[test]
    fn test_no_dead_particles_survive_a_frame() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut effects = Effects::new(500);
        effects.burst(&mut rng, Vec2::new(0.0, 0.0), DEBRIS_COLOR);
        for _ in 0..10 {
            effects.update(&tuning);
        }
        effects.burst(&mut rng, Vec2::new(50.0, 0.0), DEBRIS_COLOR);
        assert_eq!(effects.particles.len(), 16);

        for _ in 0..PARTICLE_LIFE {
            effects.update(&tuning);
            assert!(effects.particles.iter().all(|p| p.life > 0));
        }
        assert!(effects.particles.is_empty());
    }

    #[test]
    fn test_burst_velocities_in_range() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut effects = Effects::new(500);
        effects.burst(&mut rng, Vec2::ZERO, DEBRIS_COLOR);
        for p in &effects.particles {
            assert!((-2.0..2.0).contains(&p.vel.x));
            assert!((-4.0..0.0).contains(&p.vel.y));
        }
    }

    #[test]
    fn test_particle_cap_evicts_oldest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut effects = Effects::new(10);
        effects.burst(&mut rng, Vec2::new(1.0, 0.0), 1);
        effects.burst(&mut rng, Vec2::new(2.0, 0.0), 2);
        assert_eq!(effects.particles.len(), 10);
        assert_eq!(effects.particles.iter().filter(|p| p.color == 2).count(), 8);

        let mut off = Effects::new(0);
        off.burst(&mut rng, Vec2::ZERO, 1);
        assert!(off.particles.is_empty());
    }

    #[test]
    fn test_landing_message_fades_and_hides() {
        let mut message = LandingMessage::default();
        message.on_landing(1);
        assert_eq!(message.text, FIRST_LANDING_TEXT);
        assert!(message.visible);

        for _ in 0..(MESSAGE_DURATION - MESSAGE_FADE_FRAMES) {
            message.update();
        }
        assert_eq!(message.opacity, 1.0);
        for _ in 0..15 {
            message.update();
        }
        assert_eq!(message.opacity, 0.5);
        for _ in 0..15 {
            message.update();
        }
        assert!(!message.visible);
        assert_eq!(message.opacity, 0.0);
    }

    #[test]
    fn test_only_first_two_landings_have_messages() {
        let mut message = LandingMessage::default();
        message.on_landing(2);
        assert_eq!(message.text, SECOND_LANDING_TEXT);
        let mut later = LandingMessage::default();
        later.on_landing(3);
        assert!(!later.visible);
        assert!(later.text.is_empty());
    }
}
