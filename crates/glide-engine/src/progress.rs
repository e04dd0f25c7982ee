//! Progress Indicator
//!
//! Cosmetic top-bar model driven by the navigation lifecycle. Trickles
//! toward a ceiling while work is pending, animates to completion, then
//! fades out. Never gates correctness.

use std::time::{Duration, Instant};

/// The trickle never passes this point on its own.
const TRICKLE_CEILING: f32 = 0.9;
/// Trickle rate, applied to the remaining headroom per second.
const TRICKLE_PER_SEC: f32 = 1.2;
/// Fill rate once completion is requested.
const COMPLETE_PER_SEC: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarState {
    Hidden,
    Active,
    Completing,
    Fading,
}

/// Top progress bar.
#[derive(Debug)]
pub struct ProgressBar {
    state: BarState,
    value: f32,
    fade: Duration,
    fade_deadline: Option<Instant>,
    last_tick: Option<Instant>,
}

impl ProgressBar {
    pub fn new(fade: Duration) -> Self {
        Self {
            state: BarState::Hidden,
            value: 0.0,
            fade,
            fade_deadline: None,
            last_tick: None,
        }
    }

    /// Show the bar at the start of a navigation.
    pub fn show(&mut self) {
        self.state = BarState::Active;
        self.value = 0.05;
        self.fade_deadline = None;
        self.last_tick = None;
    }

    /// Advance to at least `fraction` (clamped to the trickle ceiling).
    pub fn set(&mut self, fraction: f32) {
        if self.state == BarState::Active {
            self.value = self.value.max(fraction.clamp(0.0, TRICKLE_CEILING));
        }
    }

    /// Animate to 100% and fade out. Called on success and failure alike, so
    /// the bar never appears stuck.
    pub fn complete(&mut self) {
        if self.state != BarState::Hidden {
            self.state = BarState::Completing;
        }
    }

    /// Take the bar off screen immediately, skipping the fade.
    pub fn hide(&mut self) {
        self.state = BarState::Hidden;
        self.value = 0.0;
        self.fade_deadline = None;
    }

    /// Advance the animation.
    pub fn tick(&mut self, now: Instant) {
        let dt = match self.last_tick.replace(now) {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        match self.state {
            BarState::Hidden => {}
            BarState::Active => {
                self.value = (self.value + dt * TRICKLE_PER_SEC * (TRICKLE_CEILING - self.value))
                    .min(TRICKLE_CEILING);
            }
            BarState::Completing => {
                self.value = (self.value + dt * COMPLETE_PER_SEC).min(1.0);
                if self.value >= 1.0 {
                    self.state = BarState::Fading;
                    self.fade_deadline = Some(now + self.fade);
                }
            }
            BarState::Fading => {
                if self.fade_deadline.is_some_and(|d| now >= d) {
                    self.state = BarState::Hidden;
                    self.value = 0.0;
                    self.fade_deadline = None;
                }
            }
        }
    }

    /// Whether the bar is on screen.
    pub fn visible(&self) -> bool {
        self.state != BarState::Hidden
    }

    /// Current fill fraction, 0.0 to 1.0.
    pub fn value(&self) -> f32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> ProgressBar {
        ProgressBar::new(Duration::from_millis(200))
    }

    #[test]
    fn test_hidden_until_shown() {
        let mut bar = bar();
        assert!(!bar.visible());

        bar.show();
        assert!(bar.visible());
        assert!(bar.value() > 0.0);
    }

    #[test]
    fn test_trickle_stays_below_ceiling() {
        let mut bar = bar();
        bar.show();

        let mut now = Instant::now();
        for _ in 0..50 {
            now += Duration::from_millis(100);
            bar.tick(now);
        }
        assert!(bar.visible());
        assert!(bar.value() <= TRICKLE_CEILING);
    }

    #[test]
    fn test_complete_fills_then_fades_out() {
        let mut bar = bar();
        bar.show();
        bar.complete();

        let mut now = Instant::now();
        bar.tick(now);
        now += Duration::from_millis(300);
        bar.tick(now);
        assert!((bar.value() - 1.0).abs() < f32::EPSILON);

        now += Duration::from_millis(300);
        bar.tick(now);
        assert!(!bar.visible());
        assert_eq!(bar.value(), 0.0);
    }

    #[test]
    fn test_hide_is_immediate() {
        let mut bar = bar();
        bar.show();
        bar.hide();
        assert!(!bar.visible());
        assert_eq!(bar.value(), 0.0);
    }

    #[test]
    fn test_set_advances_but_never_regresses() {
        let mut bar = bar();
        bar.show();
        bar.set(0.5);
        assert!(bar.value() >= 0.5);

        bar.set(0.2);
        assert!(bar.value() >= 0.5);
    }
}
