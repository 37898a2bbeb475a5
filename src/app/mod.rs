// Application layer: ready-made scenarios driven by the CLI.

pub mod demo;
pub mod summary;
