//! Full-frame screen composition.
//!
//! One function per view, mirroring the game states: the title screen
//! with the persisted highscore, and the live play frame with its HUD
//! variants.  Each call rewrites the whole frame.

use core::fmt::Write as _;

use super::{draw_text, text_width, Frame};
use crate::config::{
    BALL_SIZE, COLOR_BLACK, COLOR_WHITE, PADDLE_H, PADDLE_W, PADDLE_Y, SCREEN_H, SCREEN_W,
};
use crate::game::physics::{Ball, Paddle, Score};

/// Title / highscore screen shown in the start state.
pub fn draw_start_screen(frame: &mut Frame, highscore: u32) {
    frame.clear(COLOR_BLACK);

    let title = "PONG";
    let title_scale = 3;
    let title_x = (SCREEN_W - text_width(title.len(), title_scale)) / 2;
    draw_text(frame, title_x, 20, title, title_scale, COLOR_WHITE);

    let mut info: heapless::String<16> = heapless::String::new();
    let _ = write!(info, "HIGH:{}", highscore);
    let info_scale = 2;
    let info_x = (SCREEN_W - text_width(info.len(), info_scale)) / 2;
    draw_text(frame, info_x, 70, &info, info_scale, COLOR_WHITE);

    draw_text(frame, 20, SCREEN_H - 20, "PRESS START", 1, COLOR_WHITE);
}

/// Live frame: paddle, ball, HUD, and the pause label when frozen.
///
/// `show_highscore` selects the wide HUD (highscore + score at scale 1)
/// over the compact one (score only at scale 2).
pub fn draw_play_frame(
    frame: &mut Frame,
    ball: &Ball,
    paddle: &Paddle,
    score: &Score,
    highscore: u32,
    show_highscore: bool,
    paused: bool,
) {
    frame.clear(COLOR_BLACK);

    frame.fill_rect(paddle.x, PADDLE_Y, PADDLE_W, PADDLE_H, COLOR_WHITE);
    frame.fill_rect(ball.x, ball.y, BALL_SIZE, BALL_SIZE, COLOR_WHITE);

    let mut hud: heapless::String<32> = heapless::String::new();
    let hud_scale = if show_highscore {
        let _ = write!(hud, "HISCORE:{} H:{} F:{}", highscore, score.hits, score.misses);
        1
    } else {
        let _ = write!(hud, "H:{} F:{}", score.hits, score.misses);
        2
    };
    draw_text(frame, 2, 2, &hud, hud_scale, COLOR_WHITE);

    if paused {
        draw_text(
            frame,
            SCREEN_W / 2 - 20,
            SCREEN_H / 2 - 4,
            "PAUSE",
            1,
            COLOR_WHITE,
        );
    }
}
