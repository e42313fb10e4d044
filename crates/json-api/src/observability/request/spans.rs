//! HTTP span helpers.

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Replace caller-controlled path segments with their route placeholders so
/// span names and metric labels stay low-cardinality.
fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let template = match segments.as_slice() {
        ["carts", "items", _, _] => "/carts/items/{slug}/{size}",
        ["carts", "toggle", "items", _, _] => "/carts/toggle/items/{slug}/{size}",
        ["payments", "notifications"] => "/payments/notifications",
        ["payments", _, "charge"] => "/payments/{method}/charge",
        ["payments", _, "status"] => "/payments/{order_id}/status",
        ["payments", _, "cancel"] => "/payments/{order_id}/cancel",
        [] => "/",
        _ => return format!("/{}", segments.join("/")),
    };

    template.to_owned()
}
