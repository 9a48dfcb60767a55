//! Integration test crate for reelcut.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! Plans are built against a real temporary filesystem and executed with a
//! recording runner in place of the FFmpeg binaries.



#[cfg(test)]
mod execution;
