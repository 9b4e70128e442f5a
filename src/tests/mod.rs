//! # Behaviour Tests
//!
//! Drive the library the way the binary does: frame rotation, clock redraws
//! and whole station passes, all against a recording surface with explicit
//! instants so no test waits on the real clock.

mod clock_tests;
mod scheduler_tests;
