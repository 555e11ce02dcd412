//! Hardware initialisation and GPIO input drivers.

pub mod hw_init;
