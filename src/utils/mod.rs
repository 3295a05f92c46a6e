pub mod environment;
pub mod terminal;
pub mod url;

pub use environment::{default_config_path, default_log_path, host_from_env};
pub use terminal::sanitize_for_terminal;
pub use url::{encode_index_name, search_path, status_path};
