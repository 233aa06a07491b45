//! Unified error type.

/// The error type returned by mytrip's fallible operations.
///
/// Client mistakes (malformed bodies, missing fields) are expressed as
/// response envelopes, not as `Error`s. This type surfaces infrastructure
/// failures: configuration, the database driver and the trip-data service.
/// Handlers that return one are answered with a generic server-error
/// envelope at the dispatch boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("database needs to be opened first")]
    NotConnected,

    #[error("no active transaction, call begin() first")]
    NoActiveTransaction,

    #[error("a transaction is already open on this connection")]
    TransactionAlreadyOpen,

    #[error("database: {0}")]
    Driver(#[from] sqlx::Error),

    #[error("driver did not report a last insert id")]
    MissingInsertId,

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http: {0}")]
    Http(#[from] http::Error),

    #[error("invalid uri `{uri}`: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("trip service request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("trip service body: {0}")]
    UpstreamBody(#[from] hyper::Error),

    #[error("trip service answered {0}")]
    UpstreamStatus(u16),
}
