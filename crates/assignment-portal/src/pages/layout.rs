const STYLESHEET: &str = "\
body{margin:0;font-family:system-ui,sans-serif;color:#111827}\
main{min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:1rem}\
.page-form{background:#f3f4f6}.page-done{background:#f0fdf4}.page-error{background:#fee2e2;color:#b91c1c}\
.card{width:100%;max-width:36rem;background:#fff;border-radius:.75rem;box-shadow:0 10px 15px rgba(0,0,0,.1);padding:2rem}\
.field{margin-bottom:1.25rem}label{display:block;font-weight:500}\
input,select,textarea{width:100%;box-sizing:border-box;padding:.5rem .75rem;border:1px solid #d1d5db;border-radius:.25rem}\
textarea{height:6rem;resize:none}.invalid{border-color:#ef4444}\
.field-error{color:#dc2626;margin:.25rem 0 0}\
.banner{background:#fee2e2;color:#b91c1c;padding:.5rem 1rem;border-radius:.25rem;margin-bottom:1.25rem}\
button,.button{display:inline-block;padding:.5rem 1rem;border:0;border-radius:.25rem;color:#fff;background:#2563eb;font-weight:500;text-decoration:none;cursor:pointer}\
button[disabled]{background:#60a5fa;cursor:not-allowed}.submit{width:100%}\
.page-done .button{background:#16a34a}.page-error .button{background:#b91c1c}";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps a rendered `<main>` element in the shared document shell.
pub fn document(title: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{STYLESHEET}</style></head><body>{main}</body></html>",
        escape_html(title)
    )
}
