//! The per-frame tick engine and the scare interaction
//!
//! The shell calls [`tick`] on every animation frame; the elapsed-time check
//! gates the logic, not the scheduling. Within a tick the order is fixed:
//! advance, then collision/near-miss against the post-advance position, then
//! surface expansion, then cue selection from the post-expansion tile, then
//! stopwatch restart. Collision short-circuits everything after it.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GamePhase, GameSession, collide, near_miss};
use super::surface::{Surface, Tile};
use crate::consts::{MIN_MOVE_INTERVAL_MS, SCARE_REACH, STEP_VARIANTS};

/// Advance the session by one frame callback
pub fn tick(session: &mut GameSession, surface: &mut Surface, now_ms: f64) {
    if session.phase != GamePhase::Running {
        return;
    }

    session.timer.update(now_ms);
    if session.timer.elapsed_ms() < session.player.move_interval_ms {
        return;
    }

    session.player.position += 1;

    if collide(&session.player, &session.target) {
        let score = session.player.score;
        session.phase = GamePhase::GameOver;
        session.timer.pause();
        session.push_event(GameEvent::GameOver { score });
        log::info!("collision at {} - run over, score {}", session.player.position, score);
        return;
    }

    if near_miss(&session.player, &session.target) {
        session.push_event(GameEvent::NearMiss);
    }

    surface.expand(session.player.position, &mut session.rng);
    // Expansion just guaranteed the tile exists; Concrete is a dead fallback
    let tile = surface
        .tile_at(session.player.position)
        .unwrap_or(Tile::Concrete);
    let variant = next_step_variant(&mut session.rng, session.last_step_variant);
    session.last_step_variant = Some(variant);
    session.push_event(GameEvent::Step { tile, variant });

    session.timer.restart(now_ms);
}

/// The player-triggered scare action, valid only while running
///
/// In reach (fly within [`SCARE_REACH`] tiles): score a point, relocate the
/// fly by a profile-random gap, and cut the move interval by a profile-random
/// amount, floored at [`MIN_MOVE_INTERVAL_MS`]. Out of reach: failure cue
/// only, no state change. The player token never moves here.
pub fn scare(session: &mut GameSession) {
    if session.phase != GamePhase::Running {
        return;
    }

    let profile = session.profile();
    let gap = session.target.position.saturating_sub(session.player.position);
    if gap > SCARE_REACH {
        session.push_event(GameEvent::ScareFail);
        return;
    }

    session.push_event(GameEvent::ScareSuccess);
    session.target.position += session.rng.random_range(profile.gap_min..=profile.gap_max);
    session.player.score += 1;
    let cut = session
        .rng
        .random_range(profile.move_time_min..=profile.move_time_max) as f64;
    session.player.move_interval_ms =
        (session.player.move_interval_ms - cut).max(MIN_MOVE_INTERVAL_MS);

    if session.config.announce_enabled && session.player.score % session.config.announce_every == 0
    {
        session.push_event(GameEvent::ScoreAnnouncement {
            score: session.player.score,
        });
    }
}

/// Pick a step variant in `0..STEP_VARIANTS`, excluding the previous one.
/// Sampling from the reduced set keeps this a single draw - no retry loop.
fn next_step_variant(rng: &mut Pcg32, last: Option<u8>) -> u8 {
    match last {
        None => rng.random_range(0..STEP_VARIANTS),
        Some(prev) => {
            let draw = rng.random_range(0..STEP_VARIANTS - 1);
            if draw >= prev { draw + 1 } else { draw }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::sim::Difficulty;
    use rand::SeedableRng;

    fn medium_session(seed: u64) -> GameSession {
        let config = RunConfig {
            difficulty: Difficulty::Medium,
            announce_enabled: false,
            ..Default::default()
        };
        let mut session = GameSession::new(config, seed);
        session.start_run(0.0);
        session
    }

    /// Run frames until the next step fires, stepping time past the interval
    fn force_step(session: &mut GameSession, surface: &mut Surface, now_ms: &mut f64) {
        *now_ms += session.player.move_interval_ms + 1.0;
        tick(session, surface, *now_ms);
    }

    #[test]
    fn test_tick_below_interval_is_gated() {
        let mut session = medium_session(42);
        let mut surface = Surface::new();
        tick(&mut session, &mut surface, 10.0);
        assert_eq!(session.player.position, 0);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_full_run_collides_at_target() {
        let mut session = medium_session(42);
        let mut surface = Surface::new();
        let target_start = session.target.position;
        assert!((4..=35).contains(&target_start));

        let mut now = 0.0;
        for _ in 0..target_start {
            assert_eq!(session.phase, GamePhase::Running);
            force_step(&mut session, &mut surface, &mut now);
        }

        // Collision exactly when positions meet, never before
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.player.position, target_start);
        assert_eq!(session.player.score, 0);
        assert!(session.timer.is_paused());

        let events = session.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0 }));
        // Final tick stops at the collision: no step cue after game over
        assert!(!matches!(events.last(), Some(GameEvent::Step { .. })));
    }

    #[test]
    fn test_no_ticks_after_game_over() {
        let mut session = medium_session(42);
        let mut surface = Surface::new();
        let mut now = 0.0;
        while session.phase == GamePhase::Running {
            force_step(&mut session, &mut surface, &mut now);
        }
        session.drain_events();

        let frozen_pos = session.player.position;
        let frozen_interval = session.player.move_interval_ms;
        // Callbacks already in flight at cancellation still arrive; they
        // must mutate nothing
        for _ in 0..10 {
            now += 1000.0;
            tick(&mut session, &mut surface, now);
            scare(&mut session);
        }
        assert_eq!(session.player.position, frozen_pos);
        assert_eq!(session.player.score, 0);
        assert_eq!(session.player.move_interval_ms, frozen_interval);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_near_miss_fires_two_short_of_target() {
        let mut session = medium_session(7);
        let mut surface = Surface::new();
        let target_start = session.target.position;
        let mut now = 0.0;

        let mut near_miss_positions = Vec::new();
        while session.phase == GamePhase::Running {
            force_step(&mut session, &mut surface, &mut now);
            if session.drain_events().contains(&GameEvent::NearMiss) {
                near_miss_positions.push(session.player.position);
            }
        }
        assert_eq!(near_miss_positions, vec![target_start - 2]);
    }

    #[test]
    fn test_step_cue_matches_surface_tile() {
        let mut session = medium_session(3);
        let mut surface = Surface::new();
        let mut now = 0.0;
        force_step(&mut session, &mut surface, &mut now);

        assert!(surface.horizon() >= session.player.position + 5);
        let expected = surface.tile_at(session.player.position).unwrap();
        let events = session.drain_events();
        match events.as_slice() {
            [GameEvent::Step { tile, variant }] => {
                assert_eq!(*tile, expected);
                assert!(*variant < STEP_VARIANTS);
            }
            other => panic!("expected a single step event, got {other:?}"),
        }
    }

    #[test]
    fn test_scare_success_mutations() {
        let mut session = medium_session(11);
        session.target.position = session.player.position + 2;
        let interval_before = session.player.move_interval_ms;

        scare(&mut session);

        assert_eq!(session.player.score, 1);
        assert_eq!(session.player.position, 0);
        let jump = session.target.position - 2;
        assert!((4..=35).contains(&jump), "fly jumped {jump}");
        let cut = interval_before - session.player.move_interval_ms;
        assert!((10.0..=40.0).contains(&cut), "interval cut {cut}");
        assert!(session.drain_events().contains(&GameEvent::ScareSuccess));
    }

    #[test]
    fn test_scare_out_of_reach_mutates_nothing() {
        let mut session = medium_session(11);
        session.target.position = session.player.position + 3;
        let interval_before = session.player.move_interval_ms;

        scare(&mut session);

        assert_eq!(session.player.score, 0);
        assert_eq!(session.target.position, 3);
        assert_eq!(session.player.move_interval_ms, interval_before);
        assert_eq!(session.drain_events(), vec![GameEvent::ScareFail]);
    }

    #[test]
    fn test_interval_floor_holds() {
        let mut session = medium_session(5);
        for _ in 0..100 {
            session.target.position = session.player.position; // always in reach
            scare(&mut session);
        }
        assert!(session.player.move_interval_ms >= MIN_MOVE_INTERVAL_MS);
        assert_eq!(session.player.score, 100);
    }

    #[test]
    fn test_score_announcement_cadence() {
        let config = RunConfig {
            difficulty: Difficulty::Easy,
            announce_enabled: true,
            announce_every: 3,
        };
        let mut session = GameSession::new(config, 9);
        session.start_run(0.0);

        let mut announced = Vec::new();
        for _ in 0..7 {
            session.target.position = session.player.position;
            scare(&mut session);
            for ev in session.drain_events() {
                if let GameEvent::ScoreAnnouncement { score } = ev {
                    announced.push(score);
                }
            }
        }
        assert_eq!(announced, vec![3, 6]);
    }

    #[test]
    fn test_replay_resets_run_state() {
        let mut session = medium_session(42);
        let mut surface = Surface::new();
        let mut now = 0.0;
        while session.phase == GamePhase::Running {
            force_step(&mut session, &mut surface, &mut now);
        }
        let horizon_after_run = surface.horizon();

        session.start_run(now);
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.player.position, 0);
        assert_eq!(session.player.score, 0);
        assert_eq!(session.player.move_interval_ms, 480.0);
        assert!(session.target.position >= 4);
        assert!(!session.timer.is_paused());
        // Surface persists across runs
        assert_eq!(surface.horizon(), horizon_after_run);
    }

    #[test]
    fn test_step_variant_never_repeats() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut last = None;
        for _ in 0..500 {
            let v = next_step_variant(&mut rng, last);
            assert!(v < STEP_VARIANTS);
            if let Some(prev) = last {
                assert_ne!(v, prev);
            }
            last = Some(v);
        }
    }
}
