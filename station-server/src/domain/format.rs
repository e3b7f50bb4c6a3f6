//! Human-readable distance and walking-time strings.

/// Language used for walking-time labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Korean,
}

/// Format a straight-line distance given in kilometres.
///
/// Under one kilometre the value is shown in whole metres.
///
/// ```
/// use station_server::domain::format_distance;
///
/// assert_eq!(format_distance(0.4567), "457m");
/// assert_eq!(format_distance(1.3612), "1.36km");
/// ```
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        return format!("{}m", (km * 1000.0).round());
    }
    format!("{:.2}km", km)
}

/// Format a walking distance given in metres.
pub fn format_walking_distance(meters: f64) -> String {
    if meters < 1000.0 {
        return format!("{}m", meters.round());
    }
    format!("{:.1}km", meters / 1000.0)
}

/// Format a walking duration given in seconds, rounded to whole minutes.
pub fn format_walking_time(seconds: f64, locale: Locale) -> String {
    let minutes = (seconds / 60.0).round();
    match (minutes < 1.0, locale) {
        (true, Locale::English) => "<1 min".to_string(),
        (true, Locale::Korean) => "1분 미만".to_string(),
        (false, Locale::English) => format!("{} min walk", minutes),
        (false, Locale::Korean) => format!("도보 {}분", minutes),
    }
}
