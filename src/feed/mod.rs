//! Feed I/O (C4 fetch, C5 emit): the only two places this crate talks to
//! the outside world other than the engines. Grounded on `feed-rs` for the
//! unified RSS+Atom parse model and `atom_syndication` for emission, per
//! `original_source/` which parses with `feedparser` and emits with
//! `feedgen` — both single-purpose, format-specific libraries, same as here.

mod emit;
mod error;
mod fetch;

pub use emit::{JsonFeedItem, generate_atom_feed, to_json_feed};
pub use error::{EmitError, FetchError};
pub use fetch::{FetchOutcome, ParsedEntry, fetch_feed, parse_feed_bytes};
