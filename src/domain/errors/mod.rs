mod command_error;
mod platform_error;

pub use command_error::CommandError;
pub use platform_error::PlatformError;
