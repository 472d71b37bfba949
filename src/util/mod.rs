mod index;
mod names;
pub mod paths;

pub use index::{wrap_index, zero_filled};
pub use names::sanitize_snapshot_name;
pub use paths::{config_path, data_dir, database_path, init_data_dir, snapshots_dir};
