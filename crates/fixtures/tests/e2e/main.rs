//! Live end-to-end scenarios for the posts API and its backing table.
//!
//! Each scenario drives the REST API and cross-checks the result with a
//! direct read of the posts table. Every scenario runs inside a
//! `TestScope`, so posts it creates are removed afterwards whatever the
//! outcome.
//!
//! # Test Structure
//!
//! - `helpers/` -- configuration, scope construction and assertions
//! - `scenarios/` -- one file per group of scenarios
//!
//! # Running
//!
//! The scenarios need a reachable WordPress instance and its MySQL
//! database, configured through the variables in `postcheck.env.example`:
//!
//! ```bash
//! cargo test -p postcheck-fixtures --test e2e -- --ignored --test-threads=1
//! ```

mod scenarios;
