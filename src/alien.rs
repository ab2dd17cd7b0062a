//! Invading aliens.

use std::fmt;

/// An alien carries no state except a unique label; its current location is
/// tracked by the invasion engine, not the alien itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alien {
    name: String,
}

impl Alien {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Alien {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Generate a set of aliens ready for invasion. Aliens have very boring
/// names of sequential numbers, but anything unique would do.
pub fn create_aliens(count: usize) -> Vec<Alien> {
    (0..count).map(|i| Alien::new(i.to_string())).collect()
}
