//! # Alien Invasion - discrete-event invasion of a city road map
//!
//! This library simulates aliens invading a map of cities connected by roads
//! in the four compass directions. Each round every alien wanders to a
//! random neighboring city; when two aliens meet, their city and every road
//! into it are destroyed and both aliens die. The run ends when all aliens
//! are dead, all survivors are trapped, or the round limit is reached, and
//! whatever cities are left standing are dumped in the same text format they
//! were read in.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `city`: the city graph arena, compass directions, and link policies
//! - `parse`: the line-oriented map text parser and serializer
//! - `alien`: alien labels and the alien factory
//! - `invasion`: the round-based simulation engine and pipeline entry point
//! - `report`: the destruction-event collaborator and its implementations
//! - `error`: the typed error taxonomy
//!
//! ## Example Usage
//!
//! ```rust
//! use alien_invasion::{invade, Options, WriteReport};
//!
//! let mut map = "Bar south=Foo west=Bee\nFoo north=Bar south=Qu-ux west=Baz\n"
//!     .as_bytes();
//! let mut remaining = Vec::new();
//! let mut report = WriteReport::new(Vec::new());
//! let summary = invade(Options {
//!     aliens: 10,
//!     rounds: 10,
//!     seed: 42,
//!     strict_parse: false,
//!     map_input: &mut map,
//!     remaining_output: &mut remaining,
//!     report: &mut report,
//! })?;
//! assert_eq!(summary.destroyed + summary.remaining, 5);
//! # Ok::<(), alien_invasion::InvasionError>(())
//! ```
//!
//! ## Determinism
//!
//! A fixed seed reproduces an invasion byte for byte: the engine owns a
//! single seeded generator, draws from it in a fixed order, and iterates
//! every unordered map through a lexicographically sorted snapshot.
//!
//! ## Error Handling
//!
//! The library returns typed [`InvasionError`] values and never terminates
//! the process; converting failures to exit codes is the binary's job.

pub mod alien;
pub mod city;
pub mod error;
pub mod invasion;
pub mod parse;
pub mod report;

pub use alien::{create_aliens, Alien};
pub use city::{City, CityMap, Direction, LinkPolicy};
pub use error::InvasionError;
pub use invasion::{invade, Invasion, Options, Summary, MAX_ROUNDS};
pub use parse::{dump, parse};
pub use report::{LogReport, NullReport, Report, WriteReport};
