#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod net;
pub mod storage;
pub mod telemetry;
pub mod types;
