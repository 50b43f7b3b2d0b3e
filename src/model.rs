//! Request and response models for every vendor action.
//!
//! Responses decode into explicit schema structs; fields the service may omit are
//! optional or defaulted, so a missing attribute never aborts decoding.

pub mod envelope;
pub mod list;
pub mod queue;
pub mod subscription;
pub mod topic;

pub use envelope::*;
pub use list::*;
pub use queue::*;
pub use subscription::*;
pub use topic::*;
