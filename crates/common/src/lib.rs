mod env;
mod log;
mod test_logger;
mod tokio;
pub mod types;

pub use env::*;
pub use log::*;
pub use test_logger::*;
pub use tokio::*;
