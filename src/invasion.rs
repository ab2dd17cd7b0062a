//! Invasion simulation engine.
//!
//! The whole pipeline is synchronous and single-pass: parse the map, land
//! the aliens, move them round by round until everyone is dead, trapped, or
//! the round limit runs out, then dump whatever cities are left standing.
//! Every random draw comes from one seeded generator owned by the session,
//! and every iteration over an unordered map goes through a sorted snapshot,
//! so a fixed seed reproduces the run byte for byte.

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::alien::{create_aliens, Alien};
use crate::city::{sorted_occupied_names, CityMap, Direction, LinkPolicy};
use crate::error::InvasionError;
use crate::parse::{dump, parse};
use crate::report::Report;

/// Hard cap on invasion rounds, not counting the landing phase. Requests
/// above this are clamped with a warning.
pub const MAX_ROUNDS: usize = 10_000;

/// Everything one invasion run needs. The input is read once to end of
/// stream and the remaining-cities dump is written once; narration goes to
/// the report collaborator, never into the structural dump.
pub struct Options<'a> {
    /// Number of aliens to land.
    pub aliens: usize,
    /// Requested round limit, clamped to [`MAX_ROUNDS`].
    pub rounds: usize,
    /// Seed for the pseudo-random source. Deriving a seed from the clock is
    /// the caller's job; the engine treats every value literally.
    pub seed: u64,
    /// Parse the map strictly, without back-linking declared roads.
    pub strict_parse: bool,
    /// City map input stream.
    pub map_input: &'a mut dyn BufRead,
    /// Output stream for the remaining-cities dump.
    pub remaining_output: &'a mut dyn Write,
    /// Consumer of destruction events.
    pub report: &'a mut dyn Report,
}

/// Final tallies of a completed invasion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Rounds actually simulated, not counting the landing phase.
    pub rounds_completed: usize,
    /// Cities destroyed by collisions.
    pub destroyed: usize,
    /// Cities still standing.
    pub remaining: usize,
    /// Surviving aliens still occupying a city at the end.
    pub survivors: usize,
    /// Survivors that could no longer move anywhere.
    pub trapped: usize,
}

/// Run the full parse, invade, dump pipeline.
pub fn invade(options: Options<'_>) -> Result<Summary, InvasionError> {
    let policy = if options.strict_parse {
        LinkPolicy::Strict
    } else {
        LinkPolicy::Permissive
    };
    let cities = parse(options.map_input, policy)?;
    let aliens = create_aliens(options.aliens);
    let mut invasion = Invasion::new(cities, aliens, options.rounds, options.seed, options.report);
    invasion.run()?;
    dump(options.remaining_output, &invasion.remaining())?;
    Ok(invasion.summary())
}

/// One invasion session: the mutable city map, the occupancy of each city,
/// and the monotonically growing set of destroyed city names.
pub struct Invasion<'a> {
    cities: CityMap,
    aliens: Vec<Alien>,
    rounds: usize,
    rng: StdRng,
    report: &'a mut dyn Report,
    destroyed: HashSet<String>,
    occupied: HashMap<String, Alien>,
    rounds_completed: usize,
    trapped: usize,
}

impl<'a> Invasion<'a> {
    pub fn new(
        cities: CityMap,
        aliens: Vec<Alien>,
        rounds: usize,
        seed: u64,
        report: &'a mut dyn Report,
    ) -> Self {
        Self {
            cities,
            aliens,
            rounds,
            rng: StdRng::seed_from_u64(seed),
            report,
            destroyed: HashSet::new(),
            occupied: HashMap::new(),
            rounds_completed: 0,
            trapped: 0,
        }
    }

    /// Land the aliens and simulate rounds until a termination condition.
    pub fn run(&mut self) -> Result<(), InvasionError> {
        log::info!(
            "invasion starting, {} aliens over {} cities",
            self.aliens.len(),
            self.cities.len()
        );
        self.land_aliens()?;

        let mut rounds = self.rounds;
        if rounds > MAX_ROUNDS {
            log::warn!("requested {} rounds exceeds maximum of {}, clamping", rounds, MAX_ROUNDS);
            rounds = MAX_ROUNDS;
        }
        for round in 1..=rounds {
            log::debug!("invasion round {}", round);
            self.rounds_completed = round;
            if !self.step()? {
                break;
            }
        }

        log::info!(
            "invasion over after {} rounds: {} cities destroyed, {} remaining, \
             {} aliens surviving of which {} trapped",
            self.rounds_completed,
            self.destroyed.len(),
            self.cities.len() - self.destroyed.len(),
            self.occupied.len(),
            self.trapped
        );
        Ok(())
    }

    /// Land each alien in a random city. The draw is over the full original
    /// name list; a destroyed city advances lexicographically, wrapping
    /// around, to the next one still standing instead of re-rolling. Once
    /// every city is rubble the rest of the aliens are never landed.
    fn land_aliens(&mut self) -> Result<(), InvasionError> {
        let start_names = self.cities.sorted_names();
        if start_names.is_empty() {
            return Ok(());
        }
        let aliens = std::mem::take(&mut self.aliens);
        let total = aliens.len();
        for (landed, alien) in aliens.into_iter().enumerate() {
            if self.destroyed.len() == start_names.len() {
                log::warn!(
                    "every city destroyed during landing, {} aliens never arrive",
                    total - landed
                );
                break;
            }
            let drawn = self.rng.gen_range(0..start_names.len());
            let mut target = None;
            for offset in 0..start_names.len() {
                let name = &start_names[(drawn + offset) % start_names.len()];
                if !self.destroyed.contains(name.as_str()) {
                    target = Some(name.clone());
                    break;
                }
            }
            if let Some(name) = target {
                self.invade_city(alien, name)?;
            }
        }
        Ok(())
    }

    /// Simulate one round. Returns false when the invasion is over.
    fn step(&mut self) -> Result<bool, InvasionError> {
        let order = sorted_occupied_names(&self.occupied);
        let mut current = std::mem::take(&mut self.occupied);
        let mut moved = 0usize;
        let mut trapped = 0usize;

        for name in order {
            let alien = match current.remove(&name) {
                Some(alien) => alien,
                None => continue,
            };
            match self.next_random_city(&name)? {
                Some(destination) => {
                    moved += 1;
                    self.invade_city(alien, destination)?;
                }
                None => {
                    if self.destroyed.contains(&name) {
                        // the city fell this round with the alien still in it
                        log::debug!("agent {} perished in the ruins of {}", alien, name);
                    } else {
                        log::debug!("agent {} is trapped in {}", alien, name);
                        trapped += 1;
                        self.invade_city(alien, name)?;
                    }
                }
            }
        }
        self.trapped = trapped;

        if self.occupied.is_empty() {
            log::info!("no more aliens");
            return Ok(false);
        }
        if moved == 0 {
            // roads are only ever removed, so a round with no movement can
            // never be followed by one with movement
            log::info!("all remaining aliens are trapped");
            return Ok(false);
        }
        Ok(true)
    }

    /// Move an alien into a city. If another alien is already there this
    /// round, both are removed, the city is destroyed, and the destruction
    /// is reported.
    fn invade_city(&mut self, incoming: Alien, target: String) -> Result<(), InvasionError> {
        log::debug!("agent {} invading {}", incoming, target);
        if let Some(resident) = self.occupied.remove(&target) {
            self.report.city_destroyed(&target, &incoming, &resident)?;
            self.destroyed.insert(target.clone());
            self.cities.destroy(&target);
        } else {
            self.occupied.insert(target, incoming);
        }
        Ok(())
    }

    /// Pick the next city for an alien: one random draw chooses a starting
    /// direction, then the four directions are scanned round-robin from
    /// there for the first one with a road. Destroyed neighbors never
    /// appear because destruction severs their roads.
    fn next_random_city(&mut self, origin: &str) -> Result<Option<String>, InvasionError> {
        let start = self.rng.gen_range(0..Direction::ALL.len());
        for offset in 0..Direction::ALL.len() {
            let direction = Direction::from_index((start + offset) % Direction::ALL.len())?;
            if let Some(neighbor) = self.cities.neighbor(origin, direction) {
                return Ok(Some(neighbor.to_string()));
            }
        }
        Ok(None)
    }

    /// The original city set minus everything destroyed.
    pub fn remaining(&self) -> CityMap {
        self.cities.filtered(|name| !self.destroyed.contains(name))
    }

    pub fn summary(&self) -> Summary {
        Summary {
            rounds_completed: self.rounds_completed,
            destroyed: self.destroyed.len(),
            remaining: self.cities.len() - self.destroyed.len(),
            survivors: self.occupied.len(),
            trapped: self.trapped,
        }
    }
}
