use std::process;

use error::ScanError;

#[cfg(not(target_os = "linux"))]
std::compile_error!("linux is the only target os that was tested");

pub mod config;
pub mod error;
pub mod interface;
pub mod logger;
pub mod probe;
pub mod range;
pub mod report;
pub mod sweep;

pub fn abort(error: ScanError) -> ! {
    eprintln!("Error: {}", error);
    process::exit(1);
}
