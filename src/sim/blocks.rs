//! Bricks and question blocks struck from below

use glam::Vec2;
use rand::Rng;

use super::director::{Director, GameEvent};
use super::effects::Effects;
use super::entities::{BlockContent, Brick, DEBRIS_COLOR, ItemKind, QuestionBlock};
use super::geometry::{Bounds, overlaps};
use super::items::ItemManager;
use super::physics::strikes_from_below;
use super::player::Player;
use crate::consts::*;
use crate::settings::Tuning;

/// Head-bumps against active bricks and question blocks.
///
/// Any bump sends the player back down at `HEAD_BUMP_VELOCITY`, which also
/// stops later blocks in the same pass from registering a strike.
#[allow(clippy::too_many_arguments)]
pub fn resolve_strikes(
    player: &mut Player,
    bricks: &mut [Brick],
    question_blocks: &mut [QuestionBlock],
    director: &mut Director,
    effects: &mut Effects,
    items: &mut ItemManager,
    rng: &mut impl Rng,
    tuning: &Tuning,
) {
    let prev = player.prev_bounds();

    for brick in bricks.iter_mut().filter(|b| b.active) {
        if !overlaps(&player.bounds(), &brick.rect) || !strikes_from_below(&prev, player.vel.y, &brick.rect) {
            continue;
        }
        if player.is_big {
            brick.active = false;
            director.award(tuning.score_brick);
            effects.burst(rng, brick.rect.top_center(), DEBRIS_COLOR);
            director.emit(GameEvent::BrickBroken);
            log::debug!("Brick broken at x={}", brick.rect.left());
        }
        player.vel.y = HEAD_BUMP_VELOCITY;
    }

    for block in question_blocks.iter_mut().filter(|b| b.active) {
        if !overlaps(&player.bounds(), &block.rect) || !strikes_from_below(&prev, player.vel.y, &block.rect) {
            continue;
        }
        hit_question_block(block, director, effects, items, tuning);
        player.vel.y = HEAD_BUMP_VELOCITY;
    }
}

/// Release a question block's content. No-op once the block is spent.
pub fn hit_question_block(
    block: &mut QuestionBlock,
    director: &mut Director,
    effects: &mut Effects,
    items: &mut ItemManager,
    tuning: &Tuning,
) {
    if !block.active {
        return;
    }
    block.active = false;
    block.bounce = BLOCK_BOUNCE;

    match block.content {
        BlockContent::Coin => {
            director.award(tuning.score_coin);
            director.collect_coin();
            effects.spawn_coin(block.rect.top_center());
        }
        BlockContent::Mushroom => {
            let at = Vec2::new(block.rect.left(), block.rect.top() - BLOCK_SIZE);
            items.spawn(ItemKind::Mushroom, at);
        }
    }
    log::debug!("{:?} block struck at x={}", block.content, block.rect.left());
}

/// Struck blocks settle back into place
pub fn decay_bounce(question_blocks: &mut [QuestionBlock]) {
    for block in question_blocks.iter_mut() {
        if block.bounce > 0.0 {
            block.bounce = (block.bounce - BLOCK_BOUNCE_DECAY).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        tuning: Tuning,
        director: Director,
        effects: Effects,
        items: ItemManager,
        rng: Pcg32,
    }

    fn fixture() -> Fixture {
        let tuning = Tuning::default();
        let mut director = Director::new(&tuning);
        director.begin(&tuning);
        director.drain_events();
        Fixture {
            director,
            effects: Effects::new(500),
            items: ItemManager::default(),
            rng: Pcg32::seed_from_u64(3),
            tuning,
        }
    }

    fn block(x: f32, content: BlockContent) -> QuestionBlock {
        QuestionBlock {
            rect: Rect::new(x, 300.0, BLOCK_SIZE, BLOCK_SIZE),
            active: true,
            content,
            bounce: 0.0,
        }
    }

    /// Player whose head just rose into a block bottom at y=340
    fn jumping_player(tuning: &Tuning, x: f32) -> Player {
        let mut player = Player::new(tuning);
        player.prev_pos = Vec2::new(x, 345.0);
        player.pos = Vec2::new(x, 335.0);
        player.vel = Vec2::new(0.0, -10.0);
        player
    }

    #[test]
    fn test_coin_block_scores_and_pops_coin() {
        let mut f = fixture();
        let mut b = block(400.0, BlockContent::Coin);
        hit_question_block(&mut b, &mut f.director, &mut f.effects, &mut f.items, &f.tuning);
        assert!(!b.active);
        assert_eq!(b.bounce, BLOCK_BOUNCE);
        assert_eq!(f.director.board.coins, 1);
        assert_eq!(f.director.board.score, SCORE_COIN);
        assert_eq!(f.effects.coin_effects.len(), 1);
        assert_eq!(f.effects.coin_effects[0].pos, Vec2::new(420.0, 300.0));
    }

    #[test]
    fn test_mushroom_block_struck_once() {
        let mut f = fixture();
        let mut blocks = vec![block(400.0, BlockContent::Mushroom)];
        let mut bricks: Vec<Brick> = Vec::new();

        for _ in 0..3 {
            // Same collision condition holds on consecutive frames
            let mut player = jumping_player(&f.tuning, 404.0);
            resolve_strikes(
                &mut player,
                &mut bricks,
                &mut blocks,
                &mut f.director,
                &mut f.effects,
                &mut f.items,
                &mut f.rng,
                &f.tuning,
            );
        }
        assert!(!blocks[0].active);
        assert_eq!(f.items.items.len(), 1);
        let mushroom = &f.items.items[0];
        assert_eq!(mushroom.kind, ItemKind::Mushroom);
        assert_eq!(mushroom.pos, Vec2::new(400.0, 260.0));
        assert_eq!(mushroom.vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_small_player_bounces_off_brick() {
        let mut f = fixture();
        let mut bricks = vec![Brick {
            rect: Rect::new(400.0, 300.0, BLOCK_SIZE, BLOCK_SIZE),
            active: true,
        }];
        let mut player = jumping_player(&f.tuning, 404.0);
        resolve_strikes(
            &mut player,
            &mut bricks,
            &mut [],
            &mut f.director,
            &mut f.effects,
            &mut f.items,
            &mut f.rng,
            &f.tuning,
        );
        assert!(bricks[0].active);
        assert_eq!(player.vel.y, HEAD_BUMP_VELOCITY);
        assert_eq!(f.director.board.score, 0);
    }

    #[test]
    fn test_big_player_breaks_brick() {
        let mut f = fixture();
        let mut bricks = vec![Brick {
            rect: Rect::new(400.0, 300.0, BLOCK_SIZE, BLOCK_SIZE),
            active: true,
        }];
        let mut player = jumping_player(&f.tuning, 404.0);
        player.is_big = true;
        player.height = PLAYER_BIG_HEIGHT;
        resolve_strikes(
            &mut player,
            &mut bricks,
            &mut [],
            &mut f.director,
            &mut f.effects,
            &mut f.items,
            &mut f.rng,
            &f.tuning,
        );
        assert!(!bricks[0].active);
        assert_eq!(f.director.board.score, SCORE_BRICK);
        assert_eq!(f.effects.particles.len(), PARTICLES_PER_BURST);
        assert_eq!(player.vel.y, HEAD_BUMP_VELOCITY);
    }

    #[test]
    fn test_side_contact_is_not_a_strike() {
        let mut f = fixture();
        let mut blocks = vec![block(400.0, BlockContent::Coin)];
        let mut player = Player::new(&f.tuning);
        player.prev_pos = Vec2::new(365.0, 310.0);
        player.pos = Vec2::new(370.0, 305.0);
        player.vel = Vec2::new(5.0, -5.0);
        resolve_strikes(
            &mut player,
            &mut [],
            &mut blocks,
            &mut f.director,
            &mut f.effects,
            &mut f.items,
            &mut f.rng,
            &f.tuning,
        );
        assert!(blocks[0].active);
    }

    #[test]
    fn test_bounce_decays_to_zero() {
        let mut blocks = vec![block(0.0, BlockContent::Coin)];
        blocks[0].bounce = BLOCK_BOUNCE;
        for _ in 0..9 {
            decay_bounce(&mut blocks);
        }
        assert_eq!(blocks[0].bounce, 2.0);
        decay_bounce(&mut blocks);
        decay_bounce(&mut blocks);
        assert_eq!(blocks[0].bounce, 0.0);
    }
}
