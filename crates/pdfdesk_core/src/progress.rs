use std::time::Duration;

use crate::Effect;

/// Period of the cosmetic fill timer.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);
/// Fill added per tick.
pub const TICK_STEP: u8 = 10;
/// The simulator never fills past this on its own.
pub const FILL_CAP: u8 = 90;
/// Fill shown once completion has been signalled.
pub const FILL_COMPLETE: u8 = 100;
/// Pause between completion and hiding the indicator.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressPhase {
    #[default]
    Idle,
    Running,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    pub phase: ProgressPhase,
    pub fill: u8,
}

/// Time-driven progress indicator, decoupled from real operation state.
///
/// The simulator owns no clock. It emits timer effects and reacts to tick and
/// settle messages tagged with the generation that requested them, so ticks
/// from a cancelled timer can never advance a newer run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressSimulator {
    state: ProgressState,
    generation: u64,
    timer_active: bool,
}

impl ProgressSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_visible(&self) -> bool {
        self.state.phase != ProgressPhase::Idle
    }

    /// Reset to zero and begin ticking. A timer that is still active is
    /// stopped first.
    pub fn start(&mut self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if self.timer_active {
            effects.push(Effect::StopProgressTimer);
        }
        self.generation += 1;
        self.timer_active = true;
        self.state = ProgressState {
            phase: ProgressPhase::Running,
            fill: 0,
        };
        effects.push(Effect::StartProgressTimer {
            generation: self.generation,
            period: TICK_PERIOD,
        });
        effects
    }

    /// Advance the fill. Returns `true` when the visible fill changed.
    pub fn tick(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.state.phase != ProgressPhase::Running {
            return false;
        }
        let next = self.state.fill.saturating_add(TICK_STEP).min(FILL_CAP);
        let changed = next != self.state.fill;
        self.state.fill = next;
        changed
    }

    /// Stop the timer and schedule hiding. Repeated calls are no-ops.
    pub fn complete(&mut self) -> Vec<Effect> {
        if self.state.phase != ProgressPhase::Running {
            return Vec::new();
        }
        self.timer_active = false;
        self.state = ProgressState {
            phase: ProgressPhase::Settling,
            fill: FILL_COMPLETE,
        };
        vec![
            Effect::StopProgressTimer,
            Effect::ScheduleProgressSettle {
                generation: self.generation,
                delay: SETTLE_DELAY,
            },
        ]
    }

    /// Settle delay elapsed. Returns `true` when the indicator was hidden.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.state.phase != ProgressPhase::Settling {
            return false;
        }
        self.state = ProgressState::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_capped_below_completion() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        let generation = sim.generation();
        let mut last = 0;
        for _ in 0..50 {
            sim.tick(generation);
            let fill = sim.state().fill;
            assert!(fill >= last);
            assert!(fill <= FILL_CAP);
            last = fill;
        }
        assert_eq!(last, FILL_CAP);
    }

    #[test]
    fn restart_stops_previous_timer_first() {
        let mut sim = ProgressSimulator::new();
        let first = sim.start();
        assert_eq!(
            first,
            vec![Effect::StartProgressTimer {
                generation: 1,
                period: TICK_PERIOD
            }]
        );

        let second = sim.start();
        assert_eq!(
            second,
            vec![
                Effect::StopProgressTimer,
                Effect::StartProgressTimer {
                    generation: 2,
                    period: TICK_PERIOD
                },
            ]
        );
    }

    #[test]
    fn ticks_from_old_generation_are_ignored() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        sim.start();
        assert!(!sim.tick(1));
        assert_eq!(sim.state().fill, 0);
        assert!(sim.tick(2));
        assert_eq!(sim.state().fill, TICK_STEP);
    }

    #[test]
    fn complete_is_idempotent() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        assert_eq!(sim.complete().len(), 2);
        assert!(sim.complete().is_empty());
        assert_eq!(sim.state().phase, ProgressPhase::Settling);
    }

    #[test]
    fn settle_from_previous_run_does_not_hide_new_run() {
        let mut sim = ProgressSimulator::new();
        sim.start();
        sim.complete();
        sim.start();
        assert!(!sim.settle(1));
        assert_eq!(sim.state().phase, ProgressPhase::Running);
    }
}
