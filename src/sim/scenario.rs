//! Year-keyed game scenario: debris cadence and on-screen commentary

/// Commentary shown during the given year
pub const PHRASES: &[(u32, &str)] = &[
    (1957, "First Sputnik"),
    (1961, "Gagarin flew!"),
    (1969, "Armstrong got on the moon!"),
    (1971, "First orbital space station Salute-1"),
    (1981, "Flight of the Shuttle Columbia"),
    (1998, "ISS start building"),
    (2011, "Messenger launch to Mercury"),
    (2020, "Take the plasma gun! Shoot the garbage!"),
];

/// Ticks between debris spawns for a year, or `None` before the orbit
/// gets crowded
pub fn debris_delay(year: u32) -> Option<u32> {
    match year {
        ..1961 => None,
        1961..1969 => Some(20),
        1969..1981 => Some(14),
        1981..1995 => Some(10),
        1995..2010 => Some(8),
        2010..2020 => Some(6),
        _ => Some(2),
    }
}

/// Commentary for a year, empty when nothing happened
pub fn phrase(year: u32) -> &'static str {
    PHRASES
        .iter()
        .find(|(y, _)| *y == year)
        .map_or("", |(_, text)| text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debris_delay_boundaries() {
        assert_eq!(debris_delay(1957), None);
        assert_eq!(debris_delay(1960), None);
        assert_eq!(debris_delay(1961), Some(20));
        assert_eq!(debris_delay(1969), Some(14));
        assert_eq!(debris_delay(1994), Some(10));
        assert_eq!(debris_delay(1995), Some(8));
        assert_eq!(debris_delay(2019), Some(6));
        assert_eq!(debris_delay(2020), Some(2));
        assert_eq!(debris_delay(3000), Some(2));
    }

    #[test]
    fn test_delay_never_grows() {
        let mut last = u32::MAX;
        for year in 1961..2100 {
            let delay = debris_delay(year).unwrap_or(u32::MAX);
            assert!(delay <= last, "delay grew in {year}");
            last = delay;
        }
    }

    #[test]
    fn test_phrase_lookup() {
        assert_eq!(phrase(1961), "Gagarin flew!");
        assert_eq!(phrase(1962), "");
        assert_eq!(phrase(2020), "Take the plasma gun! Shoot the garbage!");
    }
}
