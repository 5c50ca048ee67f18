pub mod dict;
pub mod init;
pub mod ping;

pub use dict::{run_dict_add, run_dict_list};
pub use init::run_init;
pub use ping::run_ping;
