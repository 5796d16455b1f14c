//! Services composing the external collaborators.

pub mod moderation;
