use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Fixed-timezone time source. Every stored "when did this happen" timestamp
/// and every "today" decision goes through one of these, so day-boundary
/// comparisons and the timestamps they are compared against always agree on
/// the zone.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    tz: Tz,
}

impl Clock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Reads `APP_TIMEZONE` (IANA name), falling back to America/Sao_Paulo.
    pub fn from_env() -> Self {
        let tz = std::env::var("APP_TIMEZONE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(chrono_tz::America::Sao_Paulo);
        Self::new(tz)
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    /// Current calendar date in the fixed zone.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// RFC 3339 rendering of `now()`, carrying the fixed zone's offset.
    pub fn timestamp(&self) -> String {
        self.now().to_rfc3339()
    }

    /// Calendar date a stored timestamp falls on, in the fixed zone.
    /// `None` when the string is not valid RFC 3339.
    pub fn local_date(&self, rfc3339: &str) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(rfc3339)
            .ok()
            .map(|dt| dt.with_timezone(&self.tz).date_naive())
    }
}
