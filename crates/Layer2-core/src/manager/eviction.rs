//! Eviction Sweep + Game Loop Timers

use super::ResourceManager;
use std::time::Duration;
use tracing::debug;

impl ResourceManager {
    /// Runs one eviction tick over every table.
    ///
    /// One tick counts as one minute for `CacheHint::Until`. Returns the number
    /// of removed entries.
    pub fn sweep(&self) -> usize {
        let removed = self.with_state(|state, inner| {
            // prepared importers only live for one tick
            inner.dispatcher.importer_cache().clear();
            state.sweep(&inner.events)
        });
        if removed > 0 {
            debug!("Sweep removed {} resource(s)", removed);
        }
        removed
    }

    /// Game loop entry point
    ///
    /// Applies finished loads, then runs a sweep for every `sweep.intervalSecs`
    /// of accumulated time and a hot-reload pass once `hotReload.pollIntervalMs`
    /// has elapsed. Leftover time carries over to the next call.
    pub fn update(&self, delta: Duration) -> usize {
        let applied = self.pump();

        let mut clock = self.inner.clock.get();
        clock.since_sweep += delta;
        clock.since_poll += delta;

        let sweep_interval = self.inner.config.sweep.interval();
        let mut sweeps = 0;
        while clock.since_sweep >= sweep_interval {
            clock.since_sweep -= sweep_interval;
            sweeps += 1;
        }

        let poll_interval = self.inner.config.hot_reload.poll_interval();
        let run_reload = self.hot_reload_enabled() && clock.since_poll >= poll_interval;
        if run_reload {
            // 여러 간격이 밀려도 검사는 한 번
            clock.since_poll = if poll_interval.is_zero() {
                Duration::ZERO
            } else {
                Duration::from_nanos((clock.since_poll.as_nanos() % poll_interval.as_nanos()) as u64)
            };
        }
        self.inner.clock.set(clock);

        for _ in 0..sweeps {
            self.sweep();
        }
        if run_reload {
            self.check_for_changes();
        }
        applied
    }
}
