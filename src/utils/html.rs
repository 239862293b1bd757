use actix_web::HttpResponse;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Every page, success or failure, goes out as 200 text/html.
pub fn page(body: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(HTML_CONTENT_TYPE)
        .body(body.into())
}

/// Escapes user-supplied text before it is embedded in a page
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
