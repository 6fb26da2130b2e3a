mod config;
mod lock;
#[cfg(test)]
mod tests;

pub use config::*;
pub use lock::*;
