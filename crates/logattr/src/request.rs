//! HTTP request formatting for attribute maps.

use std::collections::BTreeMap;

use http::header::HOST;
use http::{HeaderMap, Request};
use url::form_urlencoded;

use crate::map::{AttrMap, MapValue};

/// Describe a request as `{host, method, url: {...}, headers?}`.
///
/// Multi-valued query parameters and headers are joined with commas. Header
/// names appear in the lowercase form `http` stores them in. `url.fragment`
/// is always empty because fragments never reach a request target.
#[must_use]
pub fn format_request<B>(req: &Request<B>, ignore_headers: bool) -> AttrMap {
    let uri = req.uri();
    let authority = uri.authority().map(|a| a.as_str()).unwrap_or_default();
    let host = req
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(authority);
    let raw_query = uri.query().unwrap_or_default();

    let url = AttrMap::from([
        ("url".to_owned(), MapValue::String(uri.to_string())),
        (
            "scheme".to_owned(),
            MapValue::from(uri.scheme_str().unwrap_or_default()),
        ),
        ("host".to_owned(), MapValue::from(authority)),
        ("path".to_owned(), MapValue::from(uri.path())),
        ("raw_query".to_owned(), MapValue::from(raw_query)),
        ("fragment".to_owned(), MapValue::String(String::new())),
        ("query".to_owned(), MapValue::Map(join_query(raw_query))),
    ]);

    let mut output = AttrMap::from([
        ("host".to_owned(), MapValue::from(host)),
        ("method".to_owned(), MapValue::from(req.method().as_str())),
        ("url".to_owned(), MapValue::Map(url)),
    ]);

    if !ignore_headers {
        output.insert("headers".to_owned(), MapValue::Map(join_headers(req.headers())));
    }

    output
}

fn join_query(raw_query: &str) -> AttrMap {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
        grouped
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    grouped
        .into_iter()
        .map(|(key, values)| (key, MapValue::String(values.join(","))))
        .collect()
}

fn join_headers(headers: &HeaderMap) -> AttrMap {
    headers
        .keys()
        .map(|name| {
            let values: Vec<String> = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect();
            (name.as_str().to_owned(), MapValue::String(values.join(",")))
        })
        .collect()
}
