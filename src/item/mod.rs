/// This module provides the row types exchanged between readers, processors and writers.
pub mod row;

/// This module provides a CSV item reader and writer working on header-keyed rows.
pub mod csv;

/// This module provides the email normalizer, hasher and row processor.
pub mod email;
