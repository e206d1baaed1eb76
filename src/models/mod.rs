pub mod activity;
pub mod destination;
pub mod itinerary;
pub mod theme_park;

mod numbers;

/// Render a minute count the way itinerary days and touring plans report it,
/// e.g. `3 hours 20 minutes`.
pub fn human_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    let unit = |n: u32, word: &str| {
        if n == 1 {
            format!("1 {}", word)
        } else {
            format!("{} {}s", n, word)
        }
    };

    match (hours, rest) {
        (0, m) => unit(m, "minute"),
        (h, 0) => unit(h, "hour"),
        (h, m) => format!("{} {}", unit(h, "hour"), unit(m, "minute")),
    }
}
