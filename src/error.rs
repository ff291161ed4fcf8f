//! Infrastructure error type.

/// The error type returned by the server's fallible operations.
///
/// Application-level failures (bad payloads, unknown items, storage trouble
/// during a request) are expressed as [`ApiError`](crate::ApiError) values and
/// become HTTP responses. This type surfaces what happens outside a request:
/// binding to a port or accepting a connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
