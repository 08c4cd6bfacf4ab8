/*!
 # csv-email-hash

 Pseudonymizes the email column of a CSV file so it can be shared without
 exposing addresses. Each email is trimmed, lowercased and replaced by its
 SHA-256 digest in lowercase hex; consumers of the output can still join on it.
 A caller-chosen subset of the other columns is kept, and the email column
 always comes last.

 ## Core Concepts

- **Job:** the whole batch process, made of one or more `Step`s run in order.
- **Step:** reads items, processes them and writes them, one chunk at a time.
- **ItemReader:** retrieves input one item at a time (`CsvItemReader` yields `Row`s).
- **ItemProcessor:** turns an input item into an output item, or decides to skip it
  (`EmailHashProcessor`).
- **ItemWriter:** writes the processed items (`CsvItemWriter`).

 ## Skipped rows

 A row without the email column is not an error: it is left out of the output
 and a warning with the row's contents is logged. Every other failure (file
 not found, undecodable input, unwritable output) stops the job.

 ## Getting Started

```no_run
use csv_email_hash::{config::HashJobConfig, hash_job::run_hash_job, BatchError};

fn main() -> Result<(), BatchError> {
    let config = HashJobConfig::new(
        "attendees.csv",
        "attendees_hashed.csv",
        "email",
        "start date,end date",
    )?;

    let execution = run_hash_job(&config)?;
    println!("{} rows written", execution.steps[0].write_count);

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
*/

/// Core module for batch operations
pub mod core;

/// Error types for batch operations
pub mod error;

/// Validated job configuration
pub mod config;

/// Set of items readers / writers / processors
pub mod item;

/// Wiring of the email hash job
pub mod hash_job;

#[doc(inline)]
pub use error::*;
