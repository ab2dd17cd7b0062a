//! Map text format parser and serializer.
//!
//! One city per line: `<CityName> [north=N] [south=S] [east=E] [west=W]`,
//! tokens separated by single spaces, blank lines ignored. A later
//! occurrence of the same direction on one line overwrites the earlier one.
//! Any malformed line aborts the whole parse; this is a batch format with
//! no partial recovery.

use std::io::{BufRead, Write};

use crate::city::{CityMap, Direction, LinkPolicy};
use crate::error::InvasionError;

/// Intermediate record for one parsed line: a city name and up to four
/// neighbor names, held until every referenced city exists in the map.
#[derive(Debug, Clone, Default, PartialEq)]
struct CityRef {
    name: String,
    neighbors: [Option<String>; 4],
}

/// Parse a city map from a line-oriented input stream.
///
/// Build pass 1 creates a node for every distinct name seen, as a line's
/// subject or as a referenced neighbor. Pass 2 applies the declared roads
/// with the selected [`LinkPolicy`]; strict conflicts fail the parse.
pub fn parse(
    input: &mut dyn BufRead,
    policy: LinkPolicy,
) -> Result<CityMap, InvasionError> {
    let mut refs = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        if let Some(city_ref) = parse_city_ref(&line, number + 1)? {
            refs.push(city_ref);
        }
    }

    let mut cities = CityMap::new();
    for city_ref in &refs {
        cities.insert(&city_ref.name);
        for neighbor in city_ref.neighbors.iter().flatten() {
            cities.insert(neighbor);
        }
    }
    for city_ref in &refs {
        for direction in Direction::ALL {
            if let Some(neighbor) = &city_ref.neighbors[direction.index()] {
                cities.link_neighbor(&city_ref.name, direction, neighbor, policy)?;
            }
        }
    }

    Ok(cities)
}

/// Parse one line into a [`CityRef`]. Blank lines yield `None`.
fn parse_city_ref(text: &str, line: usize) -> Result<Option<CityRef>, InvasionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let fail = |reason: String| InvasionError::Parse {
        line,
        text: trimmed.to_string(),
        reason,
    };

    let mut tokens = trimmed.split(' ');
    let name = match tokens.next() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(fail("no city name".to_string())),
    };
    let mut city_ref = CityRef {
        name: name.to_string(),
        ..Default::default()
    };
    for token in tokens {
        if token.is_empty() {
            return Err(fail("empty token, multiple spaces between tokens".to_string()));
        }
        let parts: Vec<&str> = token.split('=').collect();
        if parts.len() != 2 {
            return Err(fail(format!(
                "'{}' is not a single direction=city assignment",
                token
            )));
        }
        let (keyword, neighbor) = (parts[0], parts[1]);
        if neighbor.is_empty() {
            return Err(fail(format!("no city named after '{}='", keyword)));
        }
        let direction = match Direction::from_label(keyword) {
            Some(direction) => direction,
            None => {
                return Err(fail(format!(
                    "'{}' is not a recognized direction",
                    keyword
                )))
            }
        };
        // last occurrence of a direction on a line wins
        city_ref.neighbors[direction.index()] = Some(neighbor.to_string());
    }
    Ok(Some(city_ref))
}

/// Serialize a city map, one city per line in lexicographic name order,
/// direction tokens only where a road exists and always in north, south,
/// east, west order. The exact inverse of the permissive parser for any
/// graph with no one-way roads.
pub fn dump(output: &mut dyn Write, cities: &CityMap) -> Result<(), InvasionError> {
    for city in cities.sorted() {
        write!(output, "{}", city.name())?;
        for direction in Direction::ALL {
            if let Some(neighbor) = city.neighbor(direction) {
                write!(output, " {}={}", direction, neighbor)?;
            }
        }
        writeln!(output)?;
    }
    Ok(())
}
