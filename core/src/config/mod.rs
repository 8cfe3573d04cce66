mod install;
pub mod load;
mod types;

pub use install::{first_existing_dir, read_package_version, Installation};
pub use load::{expand_path, load_default, load_from, DEFAULT_CONFIG_FILE};
pub use types::{encode_args, BenchConfig, CommandSpec};
