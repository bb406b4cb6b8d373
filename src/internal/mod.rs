//! Internal helper functions and utilities.
//!
//! This module contains shared implementation details that are not part
//! of the public API.

mod derive;
mod helpers;

pub(crate) use derive::*;
pub(crate) use helpers::*;
