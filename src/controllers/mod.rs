pub mod cli;
pub mod convert;
