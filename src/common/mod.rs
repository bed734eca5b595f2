// Shared infrastructure: logging, constants and small helpers.
// Logger must come first so its macros are visible to the other modules.
#[macro_use]
pub mod logger;

pub mod constants;
pub mod utils;
