//! Monitor application bootstrapping.
//!
//! This module includes all the functions to build the application, its dependencies, and run the jobs.
//!
//! Jobs are tasks executed concurrently: the submission worker, the tracker
//! checker and the IP conflict auditor.
pub mod app;
pub mod config;
pub mod jobs;
pub mod logging;
