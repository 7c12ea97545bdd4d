//! Core of the ECMAScript style checker

pub mod checking;
pub mod formats;
pub mod lexing;
pub mod navigation;
pub mod structure;
pub mod testing;
pub mod token;
pub mod tracking;
