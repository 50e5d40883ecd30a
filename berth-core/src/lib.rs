//! Berth Core
//!
//! Core types and abstractions for the Berth backup-storage binding system.
//!
//! This crate contains:
//! - Domain types: Core business entities (Claim, Repository, StorageConfig)
//! - DTOs: Data transfer objects for the requester-facing surface

pub mod domain;
pub mod dto;
