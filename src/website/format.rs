use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateFormat {
    /// "Monday May, 21, 2035 at 9:30PM"
    Full,
    /// "Mon 05, 21, 2035 9:30PM"
    Medium,
}

pub fn format_datetime(value: &NaiveDateTime, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };

    value.format(pattern).to_string()
}

/// Value for an `<input type="datetime-local">`.
pub fn datetime_input(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn evening() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2035, 5, 21)
            .and_then(|date| date.and_hms_opt(21, 30, 0))
            .expect("valid date")
    }

    #[test]
    fn full_format() {
        assert_eq!(
            format_datetime(&evening(), DateFormat::Full),
            "Monday May, 21, 2035 at 9:30PM"
        );
    }

    #[test]
    fn medium_format() {
        assert_eq!(
            format_datetime(&evening(), DateFormat::Medium),
            "Mon 05, 21, 2035 9:30PM"
        );
    }

    #[test]
    fn morning_hours_are_not_padded() {
        let morning = NaiveDate::from_ymd_opt(2035, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 5, 0))
            .expect("valid date");

        assert_eq!(
            format_datetime(&morning, DateFormat::Full),
            "Tuesday May, 1, 2035 at 9:05AM"
        );
    }

    #[test]
    fn input_value() {
        assert_eq!(datetime_input(&evening()), "2035-05-21T21:30");
    }
}
