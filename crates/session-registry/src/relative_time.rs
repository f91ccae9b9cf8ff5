//! Polish relative-time labels for session rows.

/// Pick the Polish plural form for a count.
///
/// `few` covers counts ending in 2..=4 except the teens (22, 23, 24 take
/// `few`; 12, 13, 14 take `many`).
fn plural<'a>(n: i64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        return one;
    }
    let tens = n % 100;
    let units = n % 10;
    if (2..=4).contains(&units) && !(12..=14).contains(&tens) {
        few
    } else {
        many
    }
}

fn unit_phrase(seconds: i64) -> String {
    if seconds < 60 {
        format!("{} {}", seconds, plural(seconds, "sekundę", "sekundy", "sekund"))
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        format!("{} {}", minutes, plural(minutes, "minutę", "minuty", "minut"))
    } else if seconds < 86_400 {
        let hours = seconds / 3600;
        format!("{} {}", hours, plural(hours, "godzinę", "godziny", "godzin"))
    } else {
        let days = seconds / 86_400;
        format!("{} {}", days, plural(days, "dzień", "dni", "dni"))
    }
}

/// Humanize the distance between two Unix-second timestamps.
///
/// Past timestamps read "… temu", future ones "za …". The unit downgrades at
/// 60 seconds, 1 hour and 24 hours; beyond that everything is counted in
/// days.
pub fn format_relative(now: i64, then: i64) -> String {
    let diff = now - then;
    if diff >= 0 {
        format!("{} temu", unit_phrase(diff))
    } else {
        format!("za {}", unit_phrase(-diff))
    }
}
