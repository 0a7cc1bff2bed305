//! Koa library exports for testing

pub mod backend;
pub mod core;
pub mod tui;
pub mod voice;

#[cfg(test)]
pub mod test_support;
