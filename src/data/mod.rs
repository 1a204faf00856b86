//! The data pipeline: raw CSV bytes in, typed immutable dataset out.
//!
//! Stages, in order:
//! 1. limit checks and parsing (`csv_parser`, off-thread via `worker`)
//! 2. header/row cleaning (`cleaning`)
//! 3. column type inference (`inference`)
//! 4. signature hashing (`signature`)
//! 5. dataset assembly (`builder`)
//!
//! ## Error Handling
//!
//! Every operation returns `DataResult<T>` with a [`DataError`]. All errors
//! are terminal for the parse attempt; nothing is retried internally and
//! messages are surfaced to the caller verbatim.

mod builder;
mod cleaning;
mod csv_parser;
mod error;
mod inference;
mod signature;
mod worker;

pub use builder::*;
pub use cleaning::*;
pub use csv_parser::*;
pub use error::*;
pub use inference::*;
pub use signature::*;
pub use worker::*;

use crate::types::ParsedCsv;

/// Full pipeline: parse `bytes` off-thread, then build the typed dataset.
///
/// Progress events are consumed internally; callers that want to forward
/// them spawn the worker themselves and feed the success payload to
/// [`build_parsed_csv`].
pub fn ingest_bytes(
    bytes: Vec<u8>,
    file_name: impl Into<String>,
    options: &ParseOptions,
) -> DataResult<ParsedCsv> {
    let job = spawn_parse(bytes, file_name.into(), options.clone());
    let table = job.wait()?;
    Ok(build_parsed_csv(table))
}
