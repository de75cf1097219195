//! E2E test scenarios.
//!
//! - `crud`: posts created, read, listed, updated and deleted through the API
//! - `seeded`: posts inserted directly into storage, read through the API
//! - `cleanup`: registry behavior against the live table

mod cleanup;
mod crud;
mod seeded;
