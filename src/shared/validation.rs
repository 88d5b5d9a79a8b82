use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating merchant schedule fields (24-hour HH:MM)
    /// - Valid: "08:00", "19:30", "23:59"
    /// - Invalid: "8:00", "24:00", "08.00", "8am"
    pub static ref SCHEDULE_REGEX: Regex = Regex::new(r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_regex_valid() {
        assert!(SCHEDULE_REGEX.is_match("08:00"));
        assert!(SCHEDULE_REGEX.is_match("00:00"));
        assert!(SCHEDULE_REGEX.is_match("19:30"));
        assert!(SCHEDULE_REGEX.is_match("23:59"));
    }

    #[test]
    fn test_schedule_regex_invalid() {
        assert!(!SCHEDULE_REGEX.is_match("8:00")); // missing leading zero
        assert!(!SCHEDULE_REGEX.is_match("24:00")); // hour out of range
        assert!(!SCHEDULE_REGEX.is_match("08:60")); // minute out of range
        assert!(!SCHEDULE_REGEX.is_match("08.00")); // wrong separator
        assert!(!SCHEDULE_REGEX.is_match("8am")); // not a time
        assert!(!SCHEDULE_REGEX.is_match("")); // empty
        assert!(!SCHEDULE_REGEX.is_match("08:00 ")); // trailing space
    }
}
