use chrono::{DateTime, Local};

/// Wall clock as the application sees it. Injected so the attendance engine
/// can be exercised at a fixed instant.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Calendar day key for "today": the local date, midnight-normalized,
    /// formatted YYYY-MM-DD.
    fn today(&self) -> String {
        self.now().format("%Y-%m-%d").to_string()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Device positioning, best-effort. `None` covers denied, timed out, and
/// not-present alike; a check-in must never fail because of it.
pub trait Geolocator {
    fn request_position(&self) -> Option<GeoPoint>;
}

/// Host without a positioning device. Check-ins proceed without coordinates.
pub struct NoDevice;

impl Geolocator for NoDevice {
    fn request_position(&self) -> Option<GeoPoint> {
        None
    }
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Local>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
pub fn fixed_clock(y: i32, m: u32, d: u32, h: u32, min: u32) -> FixedClock {
    use chrono::TimeZone;
    FixedClock(Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap())
}
