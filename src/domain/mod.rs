//! Domain layer - Core types with no transport dependencies
//! 
//! This layer contains:
//! - Entities: Commands, callback tokens, messages, ranges, choice sets
//! - Traits: Abstractions for messaging transports (Bot)

pub mod entities;
pub mod traits;
