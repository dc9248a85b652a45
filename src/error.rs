use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Unable to grab bot account: {0}")]
    Transport(#[source] teloxide::RequestError),
}

#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("Daemon already running (pid {pid} from {pid_file})")]
    AlreadyRunning { pid: i32, pid_file: String },

    #[error("Daemon not running (no live pid found in {0})")]
    NotRunning(String),

    #[error("Cannot access pid file: {0}")]
    PidFile(#[source] std::io::Error),

    #[error("Failed to daemonize: {0}")]
    Daemonize(#[source] std::io::Error),

    #[error("Failed to signal daemon: {0}")]
    Signal(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
