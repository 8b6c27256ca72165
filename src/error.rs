use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that ends a run early.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not open log file {}", _0.display())]
    LogFile(#[error(not(source))] PathBuf),
    #[display("could not install the log subscriber")]
    Logging,
    #[display("could not open the library database")]
    Database,
    #[display("could not access the device storage")]
    Storage,
    #[display("could not fix the library database")]
    Fix,
}
