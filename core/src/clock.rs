use std::time::Duration;

use crate::constants::TIMER_HZ;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Something the clock has decided is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Execute one instruction
    Cpu,
    /// Count the delay and sound timers down
    Timer,
}

/// # Clock
/// Turns however much time the host says has passed into CPU cycles and timer
/// ticks, independently of how often the host calls.
///
/// Time is kept in units of `1 / (10^9 * cpu_hz * TIMER_HZ)` seconds so that a
/// nanosecond, a CPU period and a timer period are all whole numbers of units
/// and nothing drifts.
///
/// Due ticks come out in the order they fell due; a CPU cycle and a timer
/// tick falling due together run the CPU cycle first.
///
/// At most one second of work is ever owed. Time beyond that, such as a host
/// that was suspended, is dropped rather than replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    units_per_nano: u128,
    max_debt: u128,
    cpu_period: u128,
    timer_period: u128,
    cpu_debt: u128,
    timer_debt: u128,
}

impl Clock {
    pub fn new(cpu_hz: u32) -> Self {
        let cpu_hz = u128::from(cpu_hz.max(1));
        let timer_hz = u128::from(TIMER_HZ);
        Clock {
            units_per_nano: cpu_hz * timer_hz,
            max_debt: NANOS_PER_SECOND * cpu_hz * timer_hz,
            cpu_period: NANOS_PER_SECOND * timer_hz,
            timer_period: NANOS_PER_SECOND * cpu_hz,
            cpu_debt: 0,
            timer_debt: 0,
        }
    }

    /// Forget any time that has built up
    pub fn reset(&mut self) {
        self.cpu_debt = 0;
        self.timer_debt = 0;
    }

    /// Let `elapsed` wall-clock time pass
    pub fn elapse(&mut self, elapsed: Duration) {
        self.add_units(elapsed.as_nanos().saturating_mul(self.units_per_nano));
    }

    /// Let exactly one CPU period pass
    pub fn elapse_cycle(&mut self) {
        self.add_units(self.cpu_period);
    }

    fn add_units(&mut self, units: u128) {
        self.cpu_debt = self.cpu_debt.saturating_add(units).min(self.max_debt);
        self.timer_debt = self.timer_debt.saturating_add(units).min(self.max_debt);
    }

    /// Takes the earliest tick that has fallen due, if any
    pub fn pop_due(&mut self) -> Option<Tick> {
        let cpu_overdue = self.cpu_debt.checked_sub(self.cpu_period);
        let timer_overdue = self.timer_debt.checked_sub(self.timer_period);
        let tick = match (cpu_overdue, timer_overdue) {
            (None, None) => return None,
            (Some(_), None) => Tick::Cpu,
            (None, Some(_)) => Tick::Timer,
            // the one that is more overdue fell due first
            (Some(cpu), Some(timer)) => {
                if cpu >= timer {
                    Tick::Cpu
                } else {
                    Tick::Timer
                }
            }
        };
        match tick {
            Tick::Cpu => self.cpu_debt -= self.cpu_period,
            Tick::Timer => self.timer_debt -= self.timer_period,
        }
        Some(tick)
    }
}
