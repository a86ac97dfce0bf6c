#[macro_use]
extern crate log;

#[macro_use]
pub mod core;
pub mod city;
