use chrono::{DateTime, Local, NaiveDate, NaiveTime};

/// Source of "today", so month selection stays deterministic in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.date
            .and_time(NaiveTime::default())
            .and_local_timezone(Local)
            .earliest()
            .unwrap_or_else(Local::now)
    }

    fn today(&self) -> NaiveDate {
        self.date
    }
}
