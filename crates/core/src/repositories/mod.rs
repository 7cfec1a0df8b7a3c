//! Repository management modules.
//!
//! Services that run whole-store operations over an injected [`PatientStore`](crate::PatientStore).

pub mod patients;
