/// Error type shared by the bot crates.
///
/// The tally itself never fails; these cover configuration, startup and the
/// transport. Adapter crates map their own errors into `External`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
