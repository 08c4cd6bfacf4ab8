#![allow(dead_code)]

pub mod mocks;

use std::{env::temp_dir, fs, path::PathBuf};

use rand::distr::{Alphanumeric, SampleString};

/// A path in the temp directory that no other test uses.
pub fn temp_csv_path(prefix: &str) -> PathBuf {
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    temp_dir().join(format!("{}_{}.csv", prefix, file_name))
}

/// Writes `content` to a fresh temp file and returns its path.
pub fn write_input(content: &str) -> PathBuf {
    let path = temp_csv_path("input");
    fs::write(&path, content).expect("Failed to write CSV file");
    path
}

pub fn cleanup(paths: &[&PathBuf]) {
    for path in paths {
        fs::remove_file(path).ok();
    }
}
