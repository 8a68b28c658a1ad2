//! Debounced button input.
//!
//! Three logical lines (active-low with internal pull-up):
//!   - LEFT   - move paddle left
//!   - RIGHT  - move paddle right
//!   - PAUSE  - start / pause / resume
//!
//! Raw levels are sampled once per tick of the game loop and filtered
//! through a stability counter: a level change is accepted only after
//! `DEBOUNCE_TICKS` consecutive identical samples.  A button may be left
//! unbound (no GPIO assigned), in which case it permanently reads as
//! released.

/// Monotonic tick counter of the game loop.
pub type Tick = u64;

/// Logical level of an input line.  `Low` means pressed (active-low).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Logical input lines the game samples each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    Left,
    Right,
    Pause,
}

/// Source of raw line levels.
///
/// The embedded binary implements this over GPIO inputs; tests implement
/// it over scripted sample sequences.
pub trait InputSource {
    fn read(&mut self, line: Line) -> Level;
}

/// Debounce state for one button.
///
/// `line == None` models a button with no GPIO assigned: it never reads
/// as pressed and never raises an edge.
#[derive(Clone, Debug)]
pub struct Button {
    line: Option<Line>,
    raw_level: Level,
    stable_level: Level,
    stable_count: u16,
    pressed_since: Tick,
}

impl Button {
    /// Create a released button, optionally bound to a line.
    pub const fn new(line: Option<Line>) -> Self {
        Self {
            line,
            raw_level: Level::High,
            stable_level: Level::High,
            stable_count: 0,
            pressed_since: 0,
        }
    }

    /// Sample the line once and update debounce state.
    ///
    /// Returns `true` exactly on the tick a debounced press edge is
    /// accepted, i.e. when the stability counter first reaches
    /// `threshold` with a newly stable low level.
    pub fn update(&mut self, input: &mut impl InputSource, now: Tick, threshold: u16) -> bool {
        let Some(line) = self.line else {
            return false;
        };

        let level = input.read(line);
        if level != self.raw_level {
            self.raw_level = level;
            self.stable_count = 0;
        } else if self.stable_count < threshold {
            self.stable_count += 1;
        }

        if self.stable_count == threshold && level != self.stable_level {
            self.stable_level = level;
            if level == Level::Low {
                self.pressed_since = now;
                return true;
            }
        }
        false
    }

    /// Debounced pressed state.
    pub fn is_pressed(&self) -> bool {
        self.line.is_some() && self.stable_level == Level::Low
    }

    /// Held long enough to count as a long press.  Derived predicate,
    /// recomputed every tick; not an edge.
    pub fn long_pressed(&self, now: Tick, long_press_ticks: Tick) -> bool {
        self.is_pressed() && now.saturating_sub(self.pressed_since) >= long_press_ticks
    }
}
