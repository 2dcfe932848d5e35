mod analysis;
mod cli;
