pub mod console;
pub mod driver;
pub mod fixture;

pub use console::{ConsoleEvent, ConsolePresentation};
pub use driver::{default_config_path, load_core_config, CliCommand, Driver};
pub use fixture::Fixture;
