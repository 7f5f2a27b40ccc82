pub mod config;
pub mod sheet;
pub mod units;

#[cfg(target_arch = "wasm32")]
pub mod wasm;
