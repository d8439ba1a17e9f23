/// Outcome of feeding one raw hardware counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterReading {
    /// First value after a (re)start; it becomes the zero point.
    Calibrated { baseline: u64 },
    /// The platform counter went backwards (reboot) and was re-baselined.
    Rebaselined { baseline: u64, steps: u64 },
    Steps(u64),
}

/// Turns a cumulative since-boot counter into session-relative steps.
///
/// Steps counted before a stop/start cycle or before a platform counter reset
/// are carried forward, so the relative count never decreases until `clear`.
#[derive(Debug, Clone, Default)]
pub struct CounterBaseline {
    baseline: Option<u64>,
    last_raw: u64,
    carried: u64,
}

impl CounterBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, raw: u64) -> CounterReading {
        let Some(baseline) = self.baseline else {
            self.baseline = Some(raw);
            self.last_raw = raw;
            return CounterReading::Calibrated { baseline: raw };
        };

        if raw < self.last_raw {
            self.carried += self.last_raw - baseline;
            self.baseline = Some(raw);
            self.last_raw = raw;
            return CounterReading::Rebaselined {
                baseline: raw,
                steps: self.carried,
            };
        }

        self.last_raw = raw;
        CounterReading::Steps(self.carried + (raw - baseline))
    }

    pub fn baseline(&self) -> Option<u64> {
        self.baseline
    }

    /// Forgets the zero point but keeps `carried` steps as the new floor.
    pub fn restart(&mut self, carried: u64) {
        self.baseline = None;
        self.last_raw = 0;
        self.carried = carried;
    }

    pub fn clear(&mut self) {
        self.restart(0);
    }
}
