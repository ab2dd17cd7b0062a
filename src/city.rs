//! City graph arena.
//!
//! Cities are records in a name-keyed map, and roads are neighbor *names*
//! stored per compass direction rather than node-to-node references, so
//! destroying a city is just clearing map entries — no ownership cycles.

use std::collections::HashMap;
use std::fmt;

use crate::alien::Alien;
use crate::error::InvasionError;

/// Compass direction of a road out of a city.
///
/// The discriminants double as indices into a city's link array, and the
/// declaration order is the deterministic scan order used when searching
/// for a usable neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in fixed scan order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The reciprocal direction: a road north out of A enters B from the south.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Keyword used in the map text format.
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Parse a map-format keyword. Keywords are case-sensitive.
    pub fn from_label(label: &str) -> Option<Direction> {
        match label {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            _ => None,
        }
    }

    /// Index into a city's link array.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Inverse of [`Direction::index`]. Out-of-range indices are a
    /// programming error; callers only ever pass `n % 4`.
    pub fn from_index(index: usize) -> Result<Direction, InvasionError> {
        Direction::ALL
            .get(index)
            .copied()
            .ok_or(InvasionError::InvalidDirection(index))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How [`CityMap::link_neighbor`] treats the reciprocal road.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Every declared road also creates the road back in the opposite
    /// direction. Re-declarations overwrite silently (last wins).
    Permissive,
    /// Only the declared road is created, and re-declaring a direction with
    /// a different neighbor is a conflict.
    Strict,
}

/// One city: a unique name and up to one neighbor name per direction.
#[derive(Debug, Clone)]
pub struct City {
    name: String,
    links: [Option<String>; 4],
}

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The neighboring city in a direction, or `None` if there is no road.
    pub fn neighbor(&self, direction: Direction) -> Option<&str> {
        self.links[direction.index()].as_deref()
    }

    fn set_neighbor(&mut self, direction: Direction, neighbor: &str) {
        self.links[direction.index()] = Some(neighbor.to_string());
    }
}

/// The mutable city graph, keyed by city name.
///
/// Constructed once per run by the parser and mutated in place as cities are
/// destroyed. Iteration order of the underlying map is unspecified, so every
/// deterministic consumer goes through [`CityMap::sorted_names`].
#[derive(Debug, Clone, Default)]
pub struct CityMap {
    cities: HashMap<String, City>,
}

impl CityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a city if absent. Repeated inserts of the same name resolve to
    /// the same node (dedup by name).
    pub fn insert(&mut self, name: &str) {
        if !self.cities.contains_key(name) {
            self.cities.insert(name.to_string(), City::new(name));
        }
    }

    pub fn get(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// The neighbor of `city` in `direction`, or `None` for no road.
    pub fn neighbor(&self, city: &str, direction: Direction) -> Option<&str> {
        self.cities.get(city).and_then(|c| c.neighbor(direction))
    }

    /// Create a road from `city` to `neighbor`.
    ///
    /// Permissive policy also creates the reciprocal road, overwriting any
    /// previous link. Strict policy sets only the one directed road and
    /// fails with [`InvasionError::Conflict`] when the direction already
    /// points at a different city; re-linking the same city is a no-op.
    pub fn link_neighbor(
        &mut self,
        city: &str,
        direction: Direction,
        neighbor: &str,
        policy: LinkPolicy,
    ) -> Result<(), InvasionError> {
        if !self.cities.contains_key(neighbor) {
            return Err(InvasionError::UnresolvedNeighbor {
                city: city.to_string(),
                direction,
                neighbor: neighbor.to_string(),
            });
        }
        let node = self.cities.get_mut(city).ok_or_else(|| {
            InvasionError::UnresolvedNeighbor {
                city: neighbor.to_string(),
                direction: direction.opposite(),
                neighbor: city.to_string(),
            }
        })?;
        match policy {
            LinkPolicy::Strict => {
                if let Some(existing) = node.neighbor(direction) {
                    if existing != neighbor {
                        return Err(InvasionError::Conflict {
                            city: city.to_string(),
                            direction,
                            existing: existing.to_string(),
                            requested: neighbor.to_string(),
                        });
                    }
                    return Ok(());
                }
                node.set_neighbor(direction, neighbor);
            }
            LinkPolicy::Permissive => {
                node.set_neighbor(direction, neighbor);
                if let Some(back) = self.cities.get_mut(neighbor) {
                    back.set_neighbor(direction.opposite(), city);
                }
            }
        }
        Ok(())
    }

    /// Sever every road out of `name` and every road into it from any other
    /// city, including strict-mode inbound roads with no reciprocal. The
    /// node itself persists, fully unlinked. Safe to call more than once.
    pub fn destroy(&mut self, name: &str) {
        if let Some(node) = self.cities.get_mut(name) {
            node.links = Default::default();
        }
        for node in self.cities.values_mut() {
            for link in node.links.iter_mut() {
                if link.as_deref() == Some(name) {
                    *link = None;
                }
            }
        }
    }

    /// City names in lexicographic order, for deterministic iteration.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cities.keys().cloned().collect();
        names.sort();
        names
    }

    /// Cities in lexicographic name order.
    pub fn sorted(&self) -> Vec<&City> {
        let mut cities: Vec<&City> = self.cities.values().collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        cities
    }

    /// A copy of this map holding only the cities `keep` accepts.
    pub fn filtered(&self, keep: impl Fn(&str) -> bool) -> CityMap {
        CityMap {
            cities: self
                .cities
                .iter()
                .filter(|(name, _)| keep(name))
                .map(|(name, city)| (name.clone(), city.clone()))
                .collect(),
        }
    }
}

/// Occupied city names in lexicographic order. The occupancy map is
/// unordered, so round processing snapshots it through this to stay
/// reproducible for a fixed seed.
pub fn sorted_occupied_names(occupied: &HashMap<String, Alien>) -> Vec<String> {
    let mut names: Vec<String> = occupied.keys().cloned().collect();
    names.sort();
    names
}
