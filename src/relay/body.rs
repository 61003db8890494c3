//! Backend body construction.

use crate::backend::BackendBody;
use crate::relay::request::RelayRequest;

/// Build the backend body from the optional request fields.
///
/// Absent or whitespace-only fields are left out entirely; present values are
/// sent as given.
pub fn build_body(request: &RelayRequest) -> BackendBody {
    let mut body = BackendBody::new();

    let fields = [
        ("queryDate", &request.query_date),
        ("startDate", &request.start_date),
        ("endDate", &request.end_date),
        ("bizSeq", &request.biz_seq),
    ];

    for (name, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            body.insert(name, value);
        }
    }

    body
}
