use chrono::{Local, NaiveDateTime, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// Wall-clock "now" as naive local components. Recurrence and due-window
    /// arithmetic run on these, never on UTC-normalized instants.
    fn now(&self) -> NaiveDateTime;
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Frozen clock for tests
pub struct FakeSys(pub NaiveDateTime);
impl ISys for FakeSys {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn get_timestamp_millis(&self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }
}
