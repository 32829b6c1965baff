use axum::response::Html;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>beacon signaling relay</title>
</head>
<body>
  <h1>beacon signaling relay</h1>
  <p>Producers and consumers connect to <code>/ws</code> and exchange
  <code>register</code>, <code>request-stream</code>, <code>offer</code>,
  <code>answer</code> and <code>ice-candidate</code> events.</p>
  <pre id="status">loading...</pre>
  <script>
    fetch("/status")
      .then((r) => r.json())
      .then((s) => { document.getElementById("status").textContent = JSON.stringify(s, null, 2); });
  </script>
</body>
</html>
"#;

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
