//! Types shared between the gallery controller and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
