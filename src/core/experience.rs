use crate::models::ExperienceLevel;

/// Map years of experience to the two adjacent levels treated as a match
///
/// | years      | window          |
/// |------------|-----------------|
/// | < 2        | entry, junior   |
/// | 2 ..< 5    | junior, mid     |
/// | 5 ..< 8    | mid, senior     |
/// | >= 8       | senior, lead    |
///
/// Negative or NaN input is treated as zero years.
#[inline]
pub fn experience_window(years: f64) -> [ExperienceLevel; 2] {
    let years = years.max(0.0);

    if years < 2.0 {
        [ExperienceLevel::Entry, ExperienceLevel::Junior]
    } else if years < 5.0 {
        [ExperienceLevel::Junior, ExperienceLevel::Mid]
    } else if years < 8.0 {
        [ExperienceLevel::Mid, ExperienceLevel::Senior]
    } else {
        [ExperienceLevel::Senior, ExperienceLevel::Lead]
    }
}

/// Whether a posting's level falls inside the candidate's window
#[inline]
pub fn matches_experience(years: f64, level: ExperienceLevel) -> bool {
    experience_window(years).contains(&level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_boundaries() {
        assert_eq!(experience_window(0.0), [ExperienceLevel::Entry, ExperienceLevel::Junior]);
        assert_eq!(experience_window(1.9), [ExperienceLevel::Entry, ExperienceLevel::Junior]);
        assert_eq!(experience_window(2.0), [ExperienceLevel::Junior, ExperienceLevel::Mid]);
        assert_eq!(experience_window(4.99), [ExperienceLevel::Junior, ExperienceLevel::Mid]);
        assert_eq!(experience_window(5.0), [ExperienceLevel::Mid, ExperienceLevel::Senior]);
        assert_eq!(experience_window(7.5), [ExperienceLevel::Mid, ExperienceLevel::Senior]);
        assert_eq!(experience_window(8.0), [ExperienceLevel::Senior, ExperienceLevel::Lead]);
        assert_eq!(experience_window(30.0), [ExperienceLevel::Senior, ExperienceLevel::Lead]);
    }

    #[test]
    fn test_garbage_years_fall_back_to_entry() {
        assert_eq!(experience_window(-3.0), [ExperienceLevel::Entry, ExperienceLevel::Junior]);
        assert_eq!(experience_window(f64::NAN), [ExperienceLevel::Entry, ExperienceLevel::Junior]);
    }

    #[test]
    fn test_matches_adjacent_level() {
        assert!(matches_experience(6.0, ExperienceLevel::Senior));
        assert!(matches_experience(6.0, ExperienceLevel::Mid));
        assert!(!matches_experience(6.0, ExperienceLevel::Lead));
        assert!(!matches_experience(10.0, ExperienceLevel::Entry));
    }
}
