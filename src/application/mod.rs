//! Application layer - Dispatch and delivery
//! 
//! This layer contains:
//! - Services: Delivery of outbound actions through a transport
//! - Errors: Transport and configuration errors
//! - Messaging: Message parsing, input normalization, dispatching

pub mod errors;
pub mod services;
pub mod messaging;
