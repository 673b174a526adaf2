//! HTTP span helpers.

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

/// Sub-paths of `/orders` that are routes rather than order ids.
const ORDERS_ACTIONS: [&str; 1] = ["refresh"];

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace order ids with `{order}` so spans and metrics group by route.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if previous == "orders" && !segment.is_empty() && !ORDERS_ACTIONS.contains(&segment) {
            normalised.push_str("{order}");
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}
