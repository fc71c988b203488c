/// Outcome of one one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// No timer is running.
    Inactive,
    /// Countdown held because playback is paused.
    Held(u32),
    Running(u32),
    /// Countdown reached zero; the timer is gone and playback must pause.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    minutes: u32,
    remaining: u32,
}

/// Optional countdown that pauses playback when it runs out.
#[derive(Debug, Clone, Default)]
pub struct SleepTimer {
    active: Option<Countdown>,
}

impl SleepTimer {
    /// Start a countdown of `minutes`, replacing any running one.
    pub fn start(&mut self, minutes: u32) {
        log::info!("Sleep timer set for {minutes} min");
        self.active = Some(Countdown {
            minutes,
            remaining: minutes.saturating_mul(60),
        });
    }

    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            log::info!("Sleep timer cancelled");
        }
    }

    /// Cancel a running timer or start one of `minutes`. Returns whether a timer is now active.
    pub fn toggle(&mut self, minutes: u32) -> bool {
        if self.is_active() {
            self.cancel();
            false
        } else {
            self.start(minutes);
            true
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Remaining seconds, if a timer is running.
    pub fn remaining(&self) -> Option<u32> {
        self.active.map(|c| c.remaining)
    }

    /// Configured minutes of the running timer.
    pub fn minutes(&self) -> Option<u32> {
        self.active.map(|c| c.minutes)
    }

    /// Advance by one second. Counts down only while `playing`.
    pub fn tick(&mut self, playing: bool) -> TimerTick {
        let Some(countdown) = self.active.as_mut() else {
            return TimerTick::Inactive;
        };
        if !playing {
            return TimerTick::Held(countdown.remaining);
        }
        if countdown.remaining <= 1 {
            self.active = None;
            log::info!("Sleep timer expired");
            return TimerTick::Expired;
        }
        countdown.remaining -= 1;
        TimerTick::Running(countdown.remaining)
    }
}
