pub mod traits;

// Catalog source implementations
#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod http;
