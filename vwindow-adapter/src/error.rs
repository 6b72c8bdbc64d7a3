use std::fmt;
use std::io;

/// Fatal conditions surfaced to the host.
///
/// Normal inputs never produce an error: bad measurements are dropped and out-of-range
/// navigation is clamped. These variants cover lifecycle misuse and worker failures.
#[derive(Debug)]
pub enum Error {
    /// `attach` was called on a controller that is already observing a host.
    AlreadyAttached,
    /// The controller was disposed; it cannot be attached again.
    Disposed,
    /// The worker thread could not be spawned.
    WorkerSpawn(io::Error),
    /// The worker stopped accepting requests.
    WorkerGone,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAttached => f.write_str("controller is already attached to a host"),
            Self::Disposed => f.write_str("controller has been disposed"),
            Self::WorkerSpawn(err) => write!(f, "failed to spawn window worker: {err}"),
            Self::WorkerGone => f.write_str("window worker is no longer running"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WorkerSpawn(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
