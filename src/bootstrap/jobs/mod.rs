//! Application jobs launchers.
//!
//! The main application setup has only two main stages:
//!
//! 1. Setup the domain layer: the core monitor.
//! 2. Launch the background jobs.
//!
//! Every job holds a weak reference to the monitor and stops when the process
//! receives `Ctrl-C` or the monitor is dropped.
pub mod ip_conflict_audit;
pub mod submission_worker;
pub mod tracker_checker;
