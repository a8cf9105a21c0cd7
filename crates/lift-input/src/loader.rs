//! CSV request loader.
//!
//! # CSV format
//!
//! One row per passenger group.  Times are seconds since the start of the
//! run; loads are kilograms.
//!
//! ```csv
//! id,origin,destination,load,arrival_time
//! 0,1,9,75.0,12.5
//! 1,7,1,140.0,30.0
//! 2,1,4,60.0,31.2
//! ```
//!
//! Columns may appear in any order; extra columns are ignored.  Rows are
//! returned in ascending `arrival_time`, keeping file order among equal
//! times.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lift_core::{Floor, Request, RequestId};

use crate::{InputError, InputResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestRecord {
    id:           u32,
    origin:       Floor,
    destination:  Floor,
    load:         f64,
    arrival_time: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load requests from a CSV file.
pub fn load_requests_csv(path: &Path) -> InputResult<Vec<Request>> {
    let file = std::fs::File::open(path)?;
    load_requests_reader(file)
}

/// Like [`load_requests_csv`] but accepts any `Read` source.
pub fn load_requests_reader<R: Read>(reader: R) -> InputResult<Vec<Request>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut requests = Vec::new();
    for (row, result) in csv_reader.deserialize::<RequestRecord>().enumerate() {
        let r = result.map_err(|e| InputError::Parse(format!("row {}: {e}", row + 1)))?;
        if !r.arrival_time.is_finite() {
            return Err(InputError::Parse(format!(
                "row {}: arrival_time must be finite, got {}",
                row + 1,
                r.arrival_time
            )));
        }
        requests.push(Request::new(RequestId(r.id), r.origin, r.destination, r.load, r.arrival_time));
    }

    requests.sort_by(|a, b| a.arrival_time.total_cmp(&b.arrival_time));
    Ok(requests)
}
