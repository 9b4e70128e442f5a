//! Network task timers: weather refresh and the two uplinks.

use crate::config::Config;
use crate::timer::Timer;
use std::time::{Duration, Instant};

/// Periodic network work, in the order it is checked each pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    WeatherCurrent,
    ThingSpeakPost,
    AprsPost,
    WeatherForecast,
}

impl Task {
    pub const ALL: [Task; 4] = [
        Task::WeatherCurrent,
        Task::ThingSpeakPost,
        Task::AprsPost,
        Task::WeatherForecast,
    ];
}

/// One recurring timer per [`Task`].
pub struct TaskControl {
    timers: Vec<(Task, Timer)>,
}

impl TaskControl {
    pub fn new(intervals: [(Task, Duration); 4]) -> Self {
        Self {
            timers: intervals
                .into_iter()
                .map(|(task, interval)| (task, Timer::recurring(interval)))
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let minutes = |m: u64| Duration::from_secs(m * 60);
        let intervals = &config.intervals;
        Self::new([
            (Task::WeatherCurrent, minutes(intervals.weather_current_minutes)),
            (Task::ThingSpeakPost, minutes(intervals.thingspeak_minutes)),
            (Task::AprsPost, minutes(intervals.aprs_minutes)),
            (Task::WeatherForecast, minutes(intervals.weather_forecast_minutes)),
        ])
    }

    pub fn start_all(&mut self, now: Instant) {
        for (_, timer) in &mut self.timers {
            timer.start(now);
        }
    }

    /// Tasks whose timers fired, in check order.
    pub fn due(&mut self, now: Instant) -> Vec<Task> {
        self.timers
            .iter_mut()
            .filter_map(|(task, timer)| timer.update(now).then_some(*task))
            .collect()
    }

    pub fn interval(&self, task: Task) -> Option<Duration> {
        self.timers
            .iter()
            .find(|(t, _)| *t == task)
            .map(|(_, timer)| timer.interval())
    }
}
