// src/lib.rs

//! grad-radar: entry-level job posting aggregator library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod services;
pub mod storage;
pub mod utils;
