//! HTTP status codes as a typed enum.
//!
//! Only the codes this service actually emits are named. Use [`Status`]
//! anywhere a status code is accepted: `Response::json()`,
//! `Response::builder().status()`, or as a bare handler return value.

/// The status codes the item service answers with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    Created,             // 201
    BadRequest,          // 400
    NotFound,            // 404
    InternalServerError, // 500
    ServiceUnavailable,  // 503
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::Created              => 201,
            Status::BadRequest           => 400,
            Status::NotFound             => 404,
            Status::InternalServerError  => 500,
            Status::ServiceUnavailable   => 503,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        // Every variant above is a registered code.
        http::StatusCode::from_u16(s.into()).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_http_status_code() {
        assert_eq!(http::StatusCode::from(Status::Created), http::StatusCode::CREATED);
        assert_eq!(http::StatusCode::from(Status::NotFound), http::StatusCode::NOT_FOUND);
        assert_eq!(u16::from(Status::InternalServerError), 500);
    }
}
