#![allow(dead_code)]

pub mod fake_cluster;
pub mod fixtures;
