// Service modules

pub mod console;
pub mod markdown;
pub mod release_api;

pub use console::{ConsoleArg, ConsoleInterceptor};
pub use release_api::ReleaseError;
