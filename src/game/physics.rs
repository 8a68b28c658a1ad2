//! Deterministic integer physics for the ball and paddle.
//!
//! Positions and velocities are whole pixels per tick; there is no
//! sub-pixel state.  Speed is applied uniformly to both axes, so
//! `|vx| == |vy|` holds at all times and the magnitude is governed
//! entirely by the hit-count speed ramp.

use crate::config::{
    BALL_BASE_SPEED, BALL_MAX_SPEED, BALL_SIZE, BALL_SPEED_STEP_HITS, FAIL_LIMIT, PADDLE_W,
    PADDLE_Y, SCREEN_H, SCREEN_W,
};

/// The ball: a filled square of `BALL_SIZE` pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
}

impl Ball {
    /// Ball at screen center with base velocity, moving down-right.
    pub const fn centered() -> Self {
        Self {
            x: SCREEN_W / 2,
            y: SCREEN_H / 2,
            vx: BALL_BASE_SPEED,
            vy: BALL_BASE_SPEED,
        }
    }
}

/// The paddle.  Only the left edge moves; width, height and vertical
/// position are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paddle {
    pub x: i32,
}

impl Paddle {
    /// Paddle centered horizontally.
    pub const fn centered() -> Self {
        Self {
            x: SCREEN_W / 2 - PADDLE_W / 2,
        }
    }

    /// Move by `dx` pixels and clamp to the screen.  Raw movement input
    /// is unbounded; the clamp keeps `0 <= x <= SCREEN_W - PADDLE_W`.
    pub fn shift(&mut self, dx: i32) {
        self.x = (self.x + dx).clamp(0, SCREEN_W - PADDLE_W);
    }
}

/// Round score counters.  Both are monotonic within a round; `misses`
/// is capped by `FAIL_LIMIT` through the state machine reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Score {
    pub hits: u32,
    pub misses: u32,
}

impl Score {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The round is over once the miss cap is reached.
    pub fn fail_limit_reached(&self) -> bool {
        self.misses >= FAIL_LIMIT
    }
}

/// Ball speed for a given hit count: `BASE + hits / STEP`, floored by
/// integer division and saturating at `BALL_MAX_SPEED`.
pub fn speed_for_hits(hits: u32) -> i32 {
    let speed = BALL_BASE_SPEED + (hits / BALL_SPEED_STEP_HITS) as i32;
    speed.min(BALL_MAX_SPEED)
}

/// Advance the simulation by one tick.
///
/// Integrates the ball, mirrors velocity on wall contact and resolves
/// the paddle band: a return off the paddle bumps `hits` and re-derives
/// the speed ramp; a ball reaching the bottom edge without paddle
/// overlap counts a miss and respawns at the center with base speed and
/// mirrored horizontal direction.
pub fn step(ball: &mut Ball, paddle: &Paddle, score: &mut Score) {
    ball.x += ball.vx;
    ball.y += ball.vy;

    if ball.x <= 0 || ball.x + BALL_SIZE >= SCREEN_W {
        ball.vx = -ball.vx;
    }

    if ball.y <= 0 {
        ball.vy = -ball.vy;
    }

    if ball.y + BALL_SIZE >= PADDLE_Y {
        if ball.x + BALL_SIZE >= paddle.x && ball.x <= paddle.x + PADDLE_W {
            // Returned: reposition just above the paddle so the next
            // tick cannot re-collide.
            ball.vy = -ball.vy;
            ball.y = PADDLE_Y - BALL_SIZE - 1;
            score.hits += 1;
            let speed = speed_for_hits(score.hits);
            ball.vx = if ball.vx < 0 { -speed } else { speed };
            ball.vy = -speed;
        } else if ball.y + BALL_SIZE >= SCREEN_H {
            score.misses += 1;
            ball.x = SCREEN_W / 2;
            ball.y = SCREEN_H / 2;
            let speed = speed_for_hits(0);
            ball.vx = if ball.vx > 0 { -speed } else { speed };
            ball.vy = speed;
        }
    }
}
