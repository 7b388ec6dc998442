use crate::error::WeatherError;

/// Device-reported position, in decimal degrees
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The resolved target of one weather fetch
#[derive(Clone, Debug, PartialEq)]
pub enum LocationQuery {
    Coordinates(Coordinates),
    City(String),
}

/// Decide what to fetch for the current search text. Typed input wins, then
/// the session's geolocated position, then the configured default city.
/// Invalid input is rejected here, before any request goes out.
pub fn resolve_query(
    input: &str,
    position: Option<Coordinates>,
    default_city: &str,
) -> Result<LocationQuery, WeatherError> {
    let input = input.trim();
    if input.is_empty() {
        Ok(match position {
            Some(coordinates) => LocationQuery::Coordinates(coordinates),
            None => LocationQuery::City(default_city.to_owned()),
        })
    } else if is_valid_city_name(input) {
        Ok(LocationQuery::City(input.to_owned()))
    } else {
        Err(WeatherError::InvalidCity)
    }
}

/// A city name is one or more letters (ASCII or accented Latin-1),
/// whitespace, apostrophes and hyphens. Any digit or symbol rejects the
/// whole string.
pub fn is_valid_city_name(city: &str) -> bool {
    !city.is_empty() && city.chars().all(is_city_char)
}

fn is_city_char(c: char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' | '\'' | '-' => true,
        // The two non-letters sitting inside the Latin-1 accented range
        '\u{d7}' | '\u{f7}' => false,
        '\u{c0}'..='\u{ff}' => true,
        _ => c.is_whitespace(),
    }
}
