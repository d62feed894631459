//! Library-level tests over whole patches.

mod scenarios;
