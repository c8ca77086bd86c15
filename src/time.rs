use crate::constants::JulianDay;

/// Julian Day Number of a civil calendar date, at 0h.
///
/// Dates before 1582-10-15 are read in the Julian calendar, later ones in the Gregorian
/// calendar. January and February are counted as months 13 and 14 of the previous year.
/// Month and day are clamped to at least 1, so the function never fails.
///
/// Arguments
/// ---------
/// * `year`: civil year (astronomical numbering)
/// * `month`: month in `1..=12`
/// * `day`: day of month
///
/// Return
/// ------
/// * the Julian Day Number, always ending in `.5`
pub fn julian_day_from_date(year: i32, month: i32, day: i32) -> JulianDay {
    let mut year = year;
    let mut month = month.max(1);
    let day = day.max(1);

    if month < 3 {
        month += 12;
        year -= 1;
    }

    let is_julian = year < 1582
        || (year == 1582 && month < 10)
        || (year == 1582 && month == 10 && day < 15);

    let b = if is_julian {
        0
    } else {
        let a = year.div_euclid(100);
        2 - a + a.div_euclid(4)
    };

    (365.25 * f64::from(year + 4716)).floor() + (30.6001 * f64::from(month + 1)).floor()
        + f64::from(b)
        - 1524.5
        + f64::from(day)
}
