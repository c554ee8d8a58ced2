#![doc = include_str!("../README.md")]

mod list;
pub use list::*;

mod failure;
pub use failure::*;

mod collector;
pub use collector::*;

pub mod extract;
