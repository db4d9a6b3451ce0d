//! Trace header propagation.
//!
//! Downstream calls carry a fixed allow-list of trace/correlation headers
//! from the inbound request so that mesh sidecars (Istio and friends) can
//! stitch the hops into one trace. Values pass through untouched.

use axum::http::{HeaderMap, HeaderName};

/// Headers propagated to backend calls, for B3, W3C, and Cloud Trace.
pub const FORWARDED_HEADERS: [&str; 10] = [
    "x-request-id",
    "x-b3-traceid",
    "x-b3-spanid",
    "x-b3-parentspanid",
    "x-b3-sampled",
    "x-b3-flags",
    "x-ot-span-context",
    "x-cloud-trace-context",
    "traceparent",
    "grpc-trace-bin",
];

/// Extract the forwarded header set from an inbound request.
///
/// Pure: only allow-listed headers that are actually present are included,
/// with their original values. Lookups are case-insensitive.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();

    for name in FORWARDED_HEADERS {
        if let Some(value) = inbound.get(name) {
            forwarded.insert(HeaderName::from_static(name), value.clone());
        }
    }

    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn unlisted_headers_are_excluded() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-b3-traceid", HeaderValue::from_static("80f1"));
        inbound.insert("cookie", HeaderValue::from_static("session=abc"));
        inbound.insert("authorization", HeaderValue::from_static("Bearer t"));

        let forwarded = forwarded_headers(&inbound);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(
            forwarded.get("x-b3-traceid").unwrap(),
            &HeaderValue::from_static("80f1")
        );
    }

    #[test]
    fn all_allow_listed_headers_pass_with_original_values() {
        let mut inbound = HeaderMap::new();
        for (i, name) in FORWARDED_HEADERS.iter().enumerate() {
            inbound.insert(
                HeaderName::from_static(name),
                HeaderValue::from_str(&format!("value-{i}")).unwrap(),
            );
        }

        let forwarded = forwarded_headers(&inbound);
        assert_eq!(forwarded.len(), FORWARDED_HEADERS.len());
        for (i, name) in FORWARDED_HEADERS.iter().enumerate() {
            assert_eq!(
                forwarded.get(*name).and_then(|v| v.to_str().ok()),
                Some(format!("value-{i}").as_str())
            );
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        // Header names normalize to lowercase on insertion, so a request
        // sent with X-Request-Id still matches the allow-list.
        let mut inbound = HeaderMap::new();
        let name: HeaderName = "X-Request-Id".parse().unwrap();
        inbound.insert(name, HeaderValue::from_static("req-1"));

        let forwarded = forwarded_headers(&inbound);
        assert_eq!(forwarded.get("x-request-id").unwrap(), "req-1");
    }

    #[test]
    fn empty_inbound_yields_empty_set() {
        assert!(forwarded_headers(&HeaderMap::new()).is_empty());
    }
}
