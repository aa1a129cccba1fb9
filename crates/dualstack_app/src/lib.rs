// Command-line front end for the dualstack account mapper

pub mod cli;
pub mod commands;
