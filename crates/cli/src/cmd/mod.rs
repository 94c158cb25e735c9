mod build;
mod clean;
mod configure;
mod print_dirs;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use configure::cmd_configure;
pub use print_dirs::cmd_print_build_dirs;
