//! Subcommand implementations

pub mod init_env;
pub mod migrate;
pub mod serve;

pub use init_env::run_init_env;
pub use migrate::run_migrate;
pub use serve::run_serve;
