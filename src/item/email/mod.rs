//! Email pseudonymization.
//!
//! The raw value of the email column is normalized (trimmed, lowercased) and
//! replaced by its SHA-256 digest in lowercase hex. Two addresses that differ
//! only by case or surrounding whitespace therefore get the same identifier,
//! which is what lets consumers of the output join on it.
//!
//! # Example
//!
//! ```
//! use csv_email_hash::core::item::{ItemProcessor, ProcessorOutcome};
//! use csv_email_hash::item::email::email_processor::EmailHashProcessor;
//! use csv_email_hash::item::row::Row;
//!
//! let keep = vec!["email".to_string(), "city".to_string()];
//! let processor = EmailHashProcessor::new("email", &keep);
//!
//! let row: Row = [("name", "Alice"), ("email", "A@Test.COM "), ("city", "NYC")]
//!     .into_iter()
//!     .collect();
//!
//! match processor.process(&row).unwrap() {
//!     ProcessorOutcome::Retain(projected) => {
//!         assert_eq!(projected.get(0), Some("NYC"));
//!         assert_eq!(projected.get(1).map(str::len), Some(64));
//!     }
//!     ProcessorOutcome::Skip(reason) => panic!("{}", reason),
//! }
//! ```

/// Normalization and hashing of a single email value.
pub mod email_hasher;

/// The row processor hashing the email column and projecting the kept columns.
pub mod email_processor;
