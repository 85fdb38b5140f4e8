//! Integration tests for sopline
//!
//! These drive `commands::run::execute` end to end against temporary
//! analysis directories. Direct-mode tests put fake toolkit programs on
//! `PATH`, so they run serially.

mod emit;
mod helpers;
mod scenarios;
