//! Game state machine and the per-tick pipeline.
//!
//! `Game` owns every mutable entity of one session - ball, paddle,
//! score, the three debounced buttons, the framebuffer and the session
//! highscore - and advances them in a fixed order each tick:
//! input sampling → pause transition → paddle movement → fail-limit
//! check → physics → full-frame redraw.
//!
//! `Game::step` is hardware-free: the caller supplies the tick counter
//! and the raw input source, flushes the composed frame, and persists
//! the highscore when asked to.  That split is what lets the whole
//! loop run on the host, tick by tick, under a controlled clock.

pub mod physics;

use crate::config::{DEBOUNCE_TICKS, LONG_PRESS_TICKS, PADDLE_SPEED};
use crate::input::{Button, InputSource, Line, Tick};
use crate::render::{screens, Frame};
use physics::{Ball, Paddle, Score};

/// The three top-level states.  Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    /// Title / highscore screen; live entities are not drawn.
    Start,
    /// Simulation advancing.
    Run,
    /// Simulation frozen; last frame's entities stay untouched.
    Pause,
}

/// What the driver must do after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// New session highscore to persist (best effort; failures are the
    /// driver's to drop - the in-memory value stays authoritative).
    pub save_highscore: Option<u32>,
}

/// One game session.
pub struct Game<'b> {
    state: GameState,
    ball: Ball,
    paddle: Paddle,
    score: Score,
    highscore: u32,
    show_highscore: bool,
    left: Button,
    right: Button,
    pause: Button,
    frame: Frame<'b>,
}

impl<'b> Game<'b> {
    /// Session with all three buttons bound to their standard lines.
    pub fn new(frame: Frame<'b>, highscore: u32) -> Self {
        Self::with_bindings(
            frame,
            highscore,
            Some(Line::Left),
            Some(Line::Right),
            Some(Line::Pause),
        )
    }

    /// Session with explicit line bindings.  `None` leaves a button
    /// unbound: it permanently reads as released.
    pub fn with_bindings(
        frame: Frame<'b>,
        highscore: u32,
        left: Option<Line>,
        right: Option<Line>,
        pause: Option<Line>,
    ) -> Self {
        Self {
            state: GameState::Start,
            ball: Ball::centered(),
            paddle: Paddle::centered(),
            score: Score::default(),
            highscore,
            show_highscore: false,
            left: Button::new(left),
            right: Button::new(right),
            pause: Button::new(pause),
            frame,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Best hit count seen this session (persisted across sessions by
    /// the driver).
    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    /// Whether the wide highscore HUD is currently selected.
    pub fn show_highscore(&self) -> bool {
        self.show_highscore
    }

    /// The frame composed by the last `step`, ready for the display.
    pub fn frame(&self) -> &Frame<'b> {
        &self.frame
    }

    #[cfg(test)]
    pub(crate) fn score_mut(&mut self) -> &mut Score {
        &mut self.score
    }

    /// Advance one tick and redraw the frame.
    pub fn step(&mut self, now: Tick, input: &mut impl InputSource) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        self.left.update(input, now, DEBOUNCE_TICKS);
        self.right.update(input, now, DEBOUNCE_TICKS);
        let pause_edge = self.pause.update(input, now, DEBOUNCE_TICKS);

        if pause_edge {
            self.state = match self.state {
                GameState::Start => {
                    self.reset_round();
                    GameState::Run
                }
                GameState::Run => GameState::Pause,
                GameState::Pause => GameState::Run,
            };
        }

        // Paddle movement applies in every state so the player can
        // pre-position before starting.
        if self.left.is_pressed() {
            self.paddle.shift(-PADDLE_SPEED);
        }
        if self.right.is_pressed() {
            self.paddle.shift(PADDLE_SPEED);
        }

        // A miss count already at the cap ends the round this tick,
        // even against concurrent pause input.
        if self.state != GameState::Start && self.score.fail_limit_reached() {
            self.reset_round();
            self.state = GameState::Start;
        }

        if self.state == GameState::Start {
            self.show_highscore = false;
            screens::draw_start_screen(&mut self.frame, self.highscore);
            return outcome;
        }

        self.show_highscore = self.left.long_pressed(now, LONG_PRESS_TICKS)
            || self.right.long_pressed(now, LONG_PRESS_TICKS);

        if self.state == GameState::Run {
            physics::step(&mut self.ball, &self.paddle, &mut self.score);

            if self.score.hits > self.highscore {
                self.highscore = self.score.hits;
                outcome.save_highscore = Some(self.highscore);
            }

            if self.score.fail_limit_reached() {
                self.reset_round();
                self.state = GameState::Start;
                screens::draw_start_screen(&mut self.frame, self.highscore);
                return outcome;
            }
        }

        screens::draw_play_frame(
            &mut self.frame,
            &self.ball,
            &self.paddle,
            &self.score,
            self.highscore,
            self.show_highscore,
            self.state == GameState::Pause,
        );
        outcome
    }

    /// Center the paddle and ball and zero the score, as on entering a
    /// fresh round.
    fn reset_round(&mut self) {
        self.paddle = Paddle::centered();
        self.ball = Ball::centered();
        self.score.reset();
    }
}
