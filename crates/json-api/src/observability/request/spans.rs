//! HTTP span and metric route naming.

use uuid::Uuid;

const TRACK_PREFIX: &str = "/orders/track/";

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    /// Path with identifiers replaced by placeholders.
    pub(super) route: String,
    pub(super) span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_for_path(path);
    let span_name = format!("{method} {route}");

    RequestSpanName { route, span_name }
}

/// Collapses identifiers so spans and metric labels stay low-cardinality.
fn route_for_path(path: &str) -> String {
    if path.starts_with(TRACK_PREFIX) {
        return format!("{TRACK_PREFIX}{{order_number}}");
    }

    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_become_placeholders() {
        let names = request_span_name(
            "PUT",
            "/orders/0190a1b2-0000-7000-8000-000000000000",
        );

        assert_eq!(names.route, "/orders/{uuid}");
        assert_eq!(names.span_name, "PUT /orders/{uuid}");
    }

    #[test]
    fn tracked_order_numbers_are_collapsed() {
        assert_eq!(
            route_for_path("/orders/track/MFABCDEFGHJKLM"),
            "/orders/track/{order_number}"
        );
    }

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(route_for_path("/"), "/");
        assert_eq!(route_for_path("/products"), "/products");
        assert_eq!(route_for_path("/admin/stats"), "/admin/stats");
    }
}
