pub mod config;
pub mod policy;
pub mod prompt;
pub mod types;
pub mod verdict;

// Keep the public surface small and intentional.
pub use config::*;
pub use policy::*;
pub use prompt::*;
pub use types::*;
pub use verdict::*;
