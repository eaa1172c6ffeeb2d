use axum::response::Html;

const USAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>corsgate</title>
</head>
<body>
  <h1>corsgate</h1>
  <p>
    Forwarding proxy that replays requests against an arbitrary target URL,
    forces permissive CORS headers on the response, and rewrites embedded
    resource references so follow-on requests flow back through the proxy.
  </p>
  <h2>Usage</h2>
  <p>Append the target URL (percent-encoded or bare) to the proxy prefix:</p>
  <pre>GET /cors/https%3A%2F%2Fexample.com%2Fdata.json
GET /cors/example.com/data.json</pre>
  <p>
    A target without a scheme defaults to <code>http://</code>. Any HTTP
    method is forwarded; request bodies are passed through for methods other
    than GET and HEAD.
  </p>
  <h2>Examples</h2>
  <pre>curl 'http://localhost:3000/cors/https%3A%2F%2Fapi.github.com%2Fusers%2Foctocat'
fetch("http://localhost:3000/cors/" + encodeURIComponent("https://example.com/feed"))</pre>
</body>
</html>
"#;

pub async fn usage_page() -> Html<&'static str> {
    Html(USAGE)
}
