//! Hardware timers: the clock tick source and the timestamp source.

use crate::system::hal::pac::{TIM2, TIM5};
use crate::system::hal::timer::{Event, Timer};

/// Frequency both timers count at.
pub const TIMER_FREQUENCY_HZ: u32 = 1_000_000;

/// Periodic interrupt firing once per MIDI clock tick.
///
/// Counting at 1 MHz, the reload value is the period in microseconds. The
/// prescaler never changes, so a new period written right after the update
/// event applies cleanly to the next tick.
pub struct TickTimer {
    timer: Timer<TIM2>,
}

impl TickTimer {
    /// The timer stays paused until `start` is called.
    #[must_use]
    pub fn new(mut timer: Timer<TIM2>) -> Self {
        timer.pause();
        timer.reset_counter();
        timer.listen(Event::TimeOut);
        Self { timer }
    }

    pub fn start(&mut self, period_us: u32) {
        self.set_period(period_us);
        self.timer.resume();
    }

    pub fn set_period(&mut self, period_us: u32) {
        let reload = period_us.saturating_sub(1);
        // SAFETY: The timer is owned by `self`, only its reload value is
        // written. Any 32-bit value is valid for TIM2.
        unsafe {
            (*TIM2::ptr()).arr.write(|w| w.bits(reload));
        }
    }

    pub fn clear_irq(&mut self) {
        self.timer.clear_irq();
    }
}

/// Free-running microsecond timestamp, extended to 64 bits.
///
/// The hardware counter wraps every 71 minutes. `now_us` must be called
/// more often than that to notice every wrap, which the 1 ms control loop
/// does.
pub struct MicrosClock {
    timer: Timer<TIM5>,
    last: u32,
    wraps: u64,
}

impl MicrosClock {
    #[must_use]
    pub fn new(timer: Timer<TIM5>) -> Self {
        Self {
            timer,
            last: 0,
            wraps: 0,
        }
    }

    pub fn now_us(&mut self) -> u64 {
        let counter = self.timer.counter();
        if counter < self.last {
            self.wraps += 1;
        }
        self.last = counter;
        (self.wraps << 32) | u64::from(counter)
    }
}
