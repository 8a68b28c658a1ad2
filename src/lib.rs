//! Host-testable library interface for pong52.
//!
//! Everything with actual logic - the debounce manager, the physics
//! engine, the rendering primitives and the game state machine - lives
//! here and is pure `no_std` code with no hardware dependencies, so it
//! can be tested on the host with `cargo test`.
//!
//! The embedded binary uses main.rs with #![no_std] and #![no_main];
//! it wires GPIO, the ST7789 panel and flash storage to this core and
//! drives `game::Game::step` at a fixed cadence.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod game;
pub mod input;
pub mod render;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::game::physics::{self, speed_for_hits, Ball, Paddle, Score};
    use crate::game::{Game, GameState};
    use crate::input::{Button, InputSource, Level, Line, Tick};
    use crate::render::{draw_glyph, draw_text, font::FONT8X8, screens, text_width, Frame};

    /// Input source with one fixed level per line, mutated between ticks.
    struct Pad {
        left: Level,
        right: Level,
        pause: Level,
    }

    impl Pad {
        fn released() -> Self {
            Self {
                left: Level::High,
                right: Level::High,
                pause: Level::High,
            }
        }
    }

    impl InputSource for Pad {
        fn read(&mut self, line: Line) -> Level {
            match line {
                Line::Left => self.left,
                Line::Right => self.right,
                Line::Pause => self.pause,
            }
        }
    }

    /// Input source that must never be sampled.
    struct NoInput;

    impl InputSource for NoInput {
        fn read(&mut self, _line: Line) -> Level {
            unreachable!("an unbound button must not sample its line")
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Debounce Tests
    // ════════════════════════════════════════════════════════════════════════

    /// Feed `level` for `n` ticks starting at `*now`, counting edges.
    fn feed(btn: &mut Button, level: Level, n: u32, now: &mut Tick) -> u32 {
        let mut pad = Pad {
            left: level,
            right: level,
            pause: level,
        };
        let mut edges = 0;
        for _ in 0..n {
            if btn.update(&mut pad, *now, DEBOUNCE_TICKS) {
                edges += 1;
            }
            *now += 1;
        }
        edges
    }

    #[test]
    fn debounce_single_edge_on_threshold_tick() {
        let mut btn = Button::new(Some(Line::Pause));
        let mut pad = Pad::released();
        pad.pause = Level::Low;

        // Flip tick resets the counter; the edge fires when the counter
        // first reaches the threshold, and never again while held.
        for now in 0..u64::from(DEBOUNCE_TICKS) {
            assert!(!btn.update(&mut pad, now, DEBOUNCE_TICKS));
            assert!(!btn.is_pressed());
        }
        assert!(btn.update(&mut pad, u64::from(DEBOUNCE_TICKS), DEBOUNCE_TICKS));
        assert!(btn.is_pressed());

        for now in 10..100 {
            assert!(!btn.update(&mut pad, now, DEBOUNCE_TICKS));
        }
        assert!(btn.is_pressed());
    }

    #[test]
    fn debounce_bounce_below_threshold_fires_nothing() {
        let mut btn = Button::new(Some(Line::Pause));
        let mut now = 0;

        // Two low samples, flip back high before the counter reaches
        // the threshold: no edge, and the stable level never changes.
        assert_eq!(feed(&mut btn, Level::Low, 2, &mut now), 0);
        assert_eq!(feed(&mut btn, Level::High, 20, &mut now), 0);
        assert!(!btn.is_pressed());
    }

    #[test]
    fn debounce_release_then_repress_fires_second_edge() {
        let mut btn = Button::new(Some(Line::Pause));
        let mut now = 0;

        assert_eq!(feed(&mut btn, Level::Low, 10, &mut now), 1);
        // Release is a stable transition but not a press edge.
        assert_eq!(feed(&mut btn, Level::High, 10, &mut now), 0);
        assert!(!btn.is_pressed());
        assert_eq!(feed(&mut btn, Level::Low, 10, &mut now), 1);
        assert!(btn.is_pressed());
    }

    #[test]
    fn debounce_unbound_button_never_samples_or_presses() {
        let mut btn = Button::new(None);
        for now in 0..50 {
            assert!(!btn.update(&mut NoInput, now, DEBOUNCE_TICKS));
        }
        assert!(!btn.is_pressed());
        assert!(!btn.long_pressed(1_000, LONG_PRESS_TICKS));
    }

    #[test]
    fn long_press_predicate_tracks_hold_duration() {
        let mut btn = Button::new(Some(Line::Left));
        let mut now = 0;

        feed(&mut btn, Level::Low, 10, &mut now);
        // Edge was accepted at tick DEBOUNCE_TICKS.
        let pressed_since = u64::from(DEBOUNCE_TICKS);
        assert!(!btn.long_pressed(pressed_since + LONG_PRESS_TICKS - 1, LONG_PRESS_TICKS));
        assert!(btn.long_pressed(pressed_since + LONG_PRESS_TICKS, LONG_PRESS_TICKS));

        // Released: the predicate drops immediately.
        feed(&mut btn, Level::High, 10, &mut now);
        assert!(!btn.long_pressed(now + LONG_PRESS_TICKS, LONG_PRESS_TICKS));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Physics Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn speed_ramp_reference_values() {
        // BASE=1, STEP=5, MAX=6.
        for hits in 0..5 {
            assert_eq!(speed_for_hits(hits), 1);
        }
        for hits in 5..10 {
            assert_eq!(speed_for_hits(hits), 2);
        }
        for hits in 25..30 {
            assert_eq!(speed_for_hits(hits), 6);
        }
        assert_eq!(speed_for_hits(100), 6);
    }

    #[test]
    fn speed_ramp_is_nondecreasing_and_saturates() {
        let mut prev = speed_for_hits(0);
        assert_eq!(prev, BALL_BASE_SPEED);
        for hits in 1..500 {
            let s = speed_for_hits(hits);
            assert!(s >= prev);
            assert!(s <= BALL_MAX_SPEED);
            prev = s;
        }
    }

    #[test]
    fn paddle_clamps_to_screen_for_any_input() {
        let mut paddle = Paddle::centered();
        for dx in [-1, 3, -10_000, 7, 10_000, -3, 0, 999] {
            paddle.shift(dx);
            assert!(paddle.x >= 0);
            assert!(paddle.x <= SCREEN_W - PADDLE_W);
        }
        paddle.shift(-10_000);
        assert_eq!(paddle.x, 0);
        paddle.shift(10_000);
        assert_eq!(paddle.x, SCREEN_W - PADDLE_W);
    }

    #[test]
    fn left_wall_mirrors_vx_without_moving_ball() {
        let mut ball = Ball {
            x: 0,
            y: 100,
            vx: -2,
            vy: 2,
        };
        let paddle = Paddle::centered();
        let mut score = Score::default();

        physics::step(&mut ball, &paddle, &mut score);
        // Integration carried the ball to -2; the mirror itself only
        // flips the velocity.
        assert_eq!(ball.x, -2);
        assert_eq!(ball.vx, 2);

        physics::step(&mut ball, &paddle, &mut score);
        assert_eq!(ball.x, 0);
    }

    #[test]
    fn right_wall_and_top_wall_mirror_velocity() {
        let mut ball = Ball {
            x: SCREEN_W - BALL_SIZE - 1,
            y: 100,
            vx: 2,
            vy: -2,
        };
        let paddle = Paddle::centered();
        let mut score = Score::default();

        physics::step(&mut ball, &paddle, &mut score);
        assert_eq!(ball.vx, -2);

        ball.y = 1;
        ball.vy = -2;
        physics::step(&mut ball, &paddle, &mut score);
        assert_eq!(ball.vy, 2);
    }

    #[test]
    fn paddle_hit_scores_and_repositions_above_paddle() {
        let paddle = Paddle::centered();
        let mut ball = Ball {
            x: paddle.x + PADDLE_W / 2,
            y: PADDLE_Y - BALL_SIZE,
            vx: 1,
            vy: 1,
        };
        let mut score = Score::default();

        physics::step(&mut ball, &paddle, &mut score);
        assert_eq!(score.hits, 1);
        assert_eq!(score.misses, 0);
        assert_eq!(ball.y, PADDLE_Y - BALL_SIZE - 1);
        assert_eq!(ball.vy, -speed_for_hits(1));
        assert_eq!(ball.vx, speed_for_hits(1));
    }

    #[test]
    fn fifth_hit_raises_speed_and_keeps_axes_uniform() {
        let paddle = Paddle::centered();
        let mut ball = Ball {
            x: paddle.x,
            y: PADDLE_Y - BALL_SIZE,
            vx: -1,
            vy: 1,
        };
        let mut score = Score {
            hits: 4,
            misses: 0,
        };

        physics::step(&mut ball, &paddle, &mut score);
        assert_eq!(score.hits, 5);
        assert_eq!(ball.vx, -2); // horizontal direction preserved
        assert_eq!(ball.vy, -2);
        assert_eq!(ball.vx.abs(), ball.vy.abs());
    }

    #[test]
    fn miss_recenters_ball_and_mirrors_direction() {
        let paddle = Paddle { x: 0 };
        let mut ball = Ball {
            x: 200,
            y: SCREEN_H - BALL_SIZE,
            vx: 2,
            vy: 2,
        };
        let mut score = Score {
            hits: 7,
            misses: 0,
        };

        physics::step(&mut ball, &paddle, &mut score);
        assert_eq!(score.misses, 1);
        assert_eq!(score.hits, 7);
        assert_eq!((ball.x, ball.y), (SCREEN_W / 2, SCREEN_H / 2));
        // Back to base speed, previous horizontal direction mirrored,
        // moving downward.
        assert_eq!(ball.vx, -BALL_BASE_SPEED);
        assert_eq!(ball.vy, BALL_BASE_SPEED);
    }

    #[test]
    fn velocity_axes_stay_uniform_over_long_runs() {
        let paddle = Paddle::centered();
        let mut ball = Ball::centered();
        let mut score = Score::default();

        for _ in 0..5_000 {
            physics::step(&mut ball, &paddle, &mut score);
            assert_eq!(ball.vx.abs(), ball.vy.abs());
            assert!(ball.vx.abs() <= BALL_MAX_SPEED);
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Rendering Primitive Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn fill_rect_fully_outside_touches_nothing() {
        let mut buf = [0u16; 64];
        let mut frame = Frame::new(8, 8, &mut buf);

        frame.fill_rect(-10, -10, 5, 5, 0xFFFF);
        frame.fill_rect(8, 0, 4, 4, 0xFFFF);
        frame.fill_rect(0, 8, 4, 4, 0xFFFF);
        frame.fill_rect(2, 2, 0, 4, 0xFFFF);
        frame.fill_rect(2, 2, 4, -1, 0xFFFF);

        assert!(buf.iter().all(|&p| p == 0));
    }

    #[test]
    fn fill_rect_partial_overlap_paints_exact_intersection() {
        let mut buf = [0u16; 64];
        let mut frame = Frame::new(8, 8, &mut buf);

        // Origin at (-2,-2), size 5x5: visible part is 3x3 at (0,0).
        frame.fill_rect(-2, -2, 5, 5, 0xFFFF);
        for y in 0..8 {
            for x in 0..8 {
                let expect = x < 3 && y < 3;
                assert_eq!(frame.pixel(x, y) == Some(0xFFFF), expect, "({x},{y})");
            }
        }
    }

    #[test]
    fn fill_rect_clips_far_edges() {
        let mut buf = [0u16; 64];
        let mut frame = Frame::new(8, 8, &mut buf);

        frame.fill_rect(6, 5, 10, 10, 0x1234);
        for y in 0..8 {
            for x in 0..8 {
                let expect = x >= 6 && y >= 5;
                assert_eq!(frame.pixel(x, y) == Some(0x1234), expect, "({x},{y})");
            }
        }
    }

    #[test]
    fn clear_overwrites_every_pixel() {
        let mut buf = [0u16; 64];
        let mut frame = Frame::new(8, 8, &mut buf);
        frame.clear(0xABCD);
        assert!(buf.iter().all(|&p| p == 0xABCD));
    }

    #[test]
    fn unbacked_frame_draws_are_noops() {
        let mut frame = Frame::unbacked(8, 8);
        frame.clear(0xFFFF);
        frame.fill_rect(0, 0, 8, 8, 0xFFFF);
        draw_text(&mut frame, 0, 0, "PONG", 2, 0xFFFF);
        assert_eq!(frame.pixel(0, 0), None);
        assert!(frame.pixels().is_none());
    }

    #[test]
    fn glyph_matches_font_bitmap_at_scale_one() {
        let mut buf = [0u16; 256];
        let mut frame = Frame::new(16, 16, &mut buf);
        draw_glyph(&mut frame, 4, 4, b'A', 1, 0xFFFF);

        let bitmap = &FONT8X8[b'A' as usize];
        for (row, bits) in bitmap.iter().enumerate() {
            for col in 0..8 {
                let lit = bits & (0x80 >> col) != 0;
                let px = frame.pixel(4 + col, 4 + row as i32).unwrap();
                assert_eq!(px == 0xFFFF, lit, "row {row} col {col}");
            }
        }
    }

    #[test]
    fn glyph_scaling_expands_each_bit_to_a_square() {
        let mut buf = [0u16; 1024];
        let mut frame = Frame::new(32, 32, &mut buf);
        draw_glyph(&mut frame, 0, 0, b'A', 2, 0xFFFF);

        let bitmap = &FONT8X8[b'A' as usize];
        for (row, bits) in bitmap.iter().enumerate() {
            for col in 0..8 {
                let lit = bits & (0x80 >> col) != 0;
                for dy in 0..2 {
                    for dx in 0..2 {
                        let px = frame.pixel(col * 2 + dx, row as i32 * 2 + dy).unwrap();
                        assert_eq!(px == 0xFFFF, lit);
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_table_code_points_render_question_mark() {
        let mut buf_sub = [0u16; 256];
        let mut buf_ref = [0u16; 256];
        let mut sub = Frame::new(16, 16, &mut buf_sub);
        let mut reference = Frame::new(16, 16, &mut buf_ref);

        draw_glyph(&mut sub, 0, 0, 200, 1, 0xFFFF);
        draw_glyph(&mut reference, 0, 0, b'?', 1, 0xFFFF);
        assert_eq!(buf_sub, buf_ref);
    }

    #[test]
    fn text_advances_by_glyph_plus_spacing() {
        let mut buf_text = [0u16; 32 * 32];
        let mut buf_glyph = [0u16; 32 * 32];
        let mut text = Frame::new(32, 32, &mut buf_text);
        let mut glyphs = Frame::new(32, 32, &mut buf_glyph);

        draw_text(&mut text, 1, 2, "AB", 1, 0xFFFF);
        draw_glyph(&mut glyphs, 1, 2, b'A', 1, 0xFFFF);
        draw_glyph(&mut glyphs, 1 + 9, 2, b'B', 1, 0xFFFF);
        assert_eq!(buf_text, buf_glyph);

        assert_eq!(text_width(4, 3), 4 * 27);
        assert_eq!(text_width(0, 2), 0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Screen Composition Tests
    // ════════════════════════════════════════════════════════════════════════

    fn screen_buf() -> Vec<u16> {
        vec![0u16; (SCREEN_W * SCREEN_H) as usize]
    }

    #[test]
    fn start_screen_draws_centered_title_and_no_paddle() {
        let mut buf = screen_buf();
        let mut frame = Frame::new(SCREEN_W, SCREEN_H, &mut buf);
        screens::draw_start_screen(&mut frame, 42);

        // "PONG" at scale 3 is 108 px wide, so 'P' starts at x = 66;
        // its top-left bit is set.
        assert_eq!(frame.pixel(66, 20), Some(COLOR_WHITE));
        // The paddle band stays empty on the title screen.
        for x in 0..SCREEN_W {
            assert_eq!(frame.pixel(x, PADDLE_Y), Some(COLOR_BLACK));
        }
    }

    #[test]
    fn play_frame_draws_paddle_ball_and_hud() {
        let mut buf = screen_buf();
        let mut frame = Frame::new(SCREEN_W, SCREEN_H, &mut buf);
        let ball = Ball::centered();
        let paddle = Paddle::centered();
        let score = Score {
            hits: 3,
            misses: 1,
        };
        screens::draw_play_frame(&mut frame, &ball, &paddle, &score, 9, false, false);

        assert_eq!(
            frame.pixel(paddle.x + PADDLE_W / 2, PADDLE_Y + 1),
            Some(COLOR_WHITE)
        );
        assert_eq!(frame.pixel(ball.x + 1, ball.y + 1), Some(COLOR_WHITE));
        // HUD starts with 'H', whose top-left bit is set.
        assert_eq!(frame.pixel(2, 2), Some(COLOR_WHITE));
    }

    #[test]
    fn pause_label_only_when_frozen() {
        let ball = Ball::centered();
        let paddle = Paddle::centered();
        let score = Score::default();

        // 'P' of "PAUSE" at (SCREEN_W/2 - 20, SCREEN_H/2 - 4), scale 1.
        let (px, py) = (SCREEN_W / 2 - 20, SCREEN_H / 2 - 4);

        let mut buf = screen_buf();
        let mut frame = Frame::new(SCREEN_W, SCREEN_H, &mut buf);
        screens::draw_play_frame(&mut frame, &ball, &paddle, &score, 0, false, true);
        assert_eq!(frame.pixel(px, py), Some(COLOR_WHITE));

        let mut buf = screen_buf();
        let mut frame = Frame::new(SCREEN_W, SCREEN_H, &mut buf);
        screens::draw_play_frame(&mut frame, &ball, &paddle, &score, 0, false, false);
        assert_eq!(frame.pixel(px, py), Some(COLOR_BLACK));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Game State Machine Tests
    // ════════════════════════════════════════════════════════════════════════

    fn new_game(buf: &mut [u16], highscore: u32) -> Game<'_> {
        Game::new(Frame::new(SCREEN_W, SCREEN_H, buf), highscore)
    }

    /// Hold then release the pause line, stepping through the debounce
    /// window so exactly one press edge fires.
    fn press_pause(game: &mut Game, now: &mut Tick) {
        let mut pad = Pad::released();
        pad.pause = Level::Low;
        for _ in 0..=DEBOUNCE_TICKS {
            game.step(*now, &mut pad);
            *now += 1;
        }
        pad.pause = Level::High;
        for _ in 0..=DEBOUNCE_TICKS {
            game.step(*now, &mut pad);
            *now += 1;
        }
    }

    fn idle_ticks(game: &mut Game, now: &mut Tick, n: u32) {
        let mut pad = Pad::released();
        for _ in 0..n {
            game.step(*now, &mut pad);
            *now += 1;
        }
    }

    #[test]
    fn pause_edge_starts_a_fresh_round() {
        let mut buf = screen_buf();
        let mut game = new_game(&mut buf, 5);
        let mut now: Tick = 0;
        assert_eq!(game.state(), GameState::Start);

        let mut pad = Pad::released();
        pad.pause = Level::Low;
        for _ in 0..=DEBOUNCE_TICKS {
            game.step(now, &mut pad);
            now += 1;
        }

        assert_eq!(game.state(), GameState::Run);
        assert_eq!(game.score().hits, 0);
        assert_eq!(game.score().misses, 0);
        assert_eq!(game.paddle().x, SCREEN_W / 2 - PADDLE_W / 2);
        // Physics already advanced one tick from the centered reset.
        assert_eq!(game.ball().x, SCREEN_W / 2 + BALL_BASE_SPEED);
        assert_eq!(game.ball().y, SCREEN_H / 2 + BALL_BASE_SPEED);
        assert_eq!(game.highscore(), 5);
    }

    #[test]
    fn pause_freezes_and_resumes_without_reset() {
        let mut buf = screen_buf();
        let mut game = new_game(&mut buf, 0);
        let mut now: Tick = 0;

        press_pause(&mut game, &mut now);
        idle_ticks(&mut game, &mut now, 10);
        assert_eq!(game.state(), GameState::Run);

        press_pause(&mut game, &mut now);
        assert_eq!(game.state(), GameState::Pause);
        let frozen = *game.ball();
        idle_ticks(&mut game, &mut now, 25);
        assert_eq!(*game.ball(), frozen);

        press_pause(&mut game, &mut now);
        assert_eq!(game.state(), GameState::Run);
        idle_ticks(&mut game, &mut now, 3);
        assert_ne!(*game.ball(), frozen);
    }

    #[test]
    fn fail_limit_returns_to_start_despite_concurrent_pause() {
        let mut buf = screen_buf();
        let mut game = new_game(&mut buf, 0);
        let mut now: Tick = 0;

        press_pause(&mut game, &mut now);
        assert_eq!(game.state(), GameState::Run);

        // Arrange the pause edge to land on the same tick the forced
        // miss cap is observed: the round must still end in Start.
        let mut pad = Pad::released();
        pad.pause = Level::Low;
        for _ in 0..DEBOUNCE_TICKS {
            game.step(now, &mut pad);
            now += 1;
        }
        game.score_mut().misses = FAIL_LIMIT;
        game.step(now, &mut pad);

        assert_eq!(game.state(), GameState::Start);
        assert_eq!(game.score().misses, 0);
        assert_eq!(game.score().hits, 0);
    }

    #[test]
    fn paddle_moves_in_every_state() {
        let mut buf = screen_buf();
        let mut game = new_game(&mut buf, 0);
        let mut now: Tick = 0;
        let start_x = game.paddle().x;

        // Pre-position on the title screen.
        let mut pad = Pad::released();
        pad.left = Level::Low;
        for _ in 0..20 {
            game.step(now, &mut pad);
            now += 1;
        }
        assert_eq!(game.state(), GameState::Start);
        assert!(game.paddle().x < start_x);
    }

    #[test]
    fn unbound_pause_button_never_starts_the_game() {
        let mut buf = screen_buf();
        let frame = Frame::new(SCREEN_W, SCREEN_H, &mut buf);
        let mut game = Game::with_bindings(frame, 0, Some(Line::Left), Some(Line::Right), None);

        let mut pad = Pad::released();
        pad.pause = Level::Low;
        for now in 0..100 {
            game.step(now, &mut pad);
        }
        assert_eq!(game.state(), GameState::Start);
    }

    #[test]
    fn long_press_selects_wide_hud_outside_start() {
        let mut buf = screen_buf();
        let mut game = new_game(&mut buf, 0);
        let mut now: Tick = 0;

        // Holding on the title screen never shows the overlay.
        let mut pad = Pad::released();
        pad.left = Level::Low;
        for _ in 0..(LONG_PRESS_TICKS + 20) {
            game.step(now, &mut pad);
            now += 1;
        }
        assert!(!game.show_highscore());
        pad.left = Level::High;
        for _ in 0..10 {
            game.step(now, &mut pad);
            now += 1;
        }

        press_pause(&mut game, &mut now);
        assert_eq!(game.state(), GameState::Run);

        pad.left = Level::Low;
        for _ in 0..(LONG_PRESS_TICKS + u64::from(DEBOUNCE_TICKS) + 2) {
            game.step(now, &mut pad);
            now += 1;
        }
        assert!(game.show_highscore());

        pad.left = Level::High;
        for _ in 0..10 {
            game.step(now, &mut pad);
            now += 1;
        }
        assert!(!game.show_highscore());
    }

    #[test]
    fn degraded_frame_keeps_simulation_running() {
        let mut game = Game::new(Frame::unbacked(SCREEN_W, SCREEN_H), 0);
        let mut now: Tick = 0;

        press_pause(&mut game, &mut now);
        assert_eq!(game.state(), GameState::Run);
        idle_ticks(&mut game, &mut now, 50);
        assert!(game.ball().x != SCREEN_W / 2 || game.ball().y != SCREEN_H / 2);
        assert!(game.frame().pixels().is_none());
    }
}
