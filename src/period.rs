use chrono::NaiveTime;

/// Coarse time-of-day bucket a habit is scheduled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

impl Period {
    /// Classifies a "H:MM"/"HH:MM" string by its hour component.
    /// Anything unparseable (empty string included) falls back to Morning;
    /// that is the lenient default, not an error.
    pub fn from_time(raw: &str) -> Self {
        let hour = match raw.split(':').next().and_then(|h| h.trim().parse::<u32>().ok()) {
            Some(hour) => hour,
            None => return Period::Morning,
        };
        if hour < 12 {
            Period::Morning
        } else if hour < 18 {
            Period::Afternoon
        } else {
            Period::Evening
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
        }
    }
}

/// Reformats a habit's scheduled time as zero-padded "HH:MM".
/// `None` when the stored string is not a valid 24-hour time.
pub fn normalize_time(raw: &str) -> Option<String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_hour() {
        assert_eq!(Period::from_time("09:00"), Period::Morning);
        assert_eq!(Period::from_time("14:30"), Period::Afternoon);
        assert_eq!(Period::from_time("20:15"), Period::Evening);
        assert_eq!(Period::from_time("11:59"), Period::Morning);
        assert_eq!(Period::from_time("12:00"), Period::Afternoon);
        assert_eq!(Period::from_time("18:00"), Period::Evening);
    }

    #[test]
    fn falls_back_to_morning_on_bad_input() {
        assert_eq!(Period::from_time(""), Period::Morning);
        assert_eq!(Period::from_time("garbage"), Period::Morning);
        assert_eq!(Period::from_time(":30"), Period::Morning);
    }

    #[test]
    fn normalizes_single_digit_hours() {
        assert_eq!(normalize_time("9:05"), Some("09:05".to_string()));
        assert_eq!(normalize_time("20:15"), Some("20:15".to_string()));
        assert_eq!(normalize_time(""), None);
        assert_eq!(normalize_time("25:00"), None);
    }
}
