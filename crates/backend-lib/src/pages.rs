// ============================
// crates/backend-lib/src/pages.rs
// ============================
//! HTML shells served by the HTTP layer.
//!
//! The chat page carries the polling loop: an inline script that asks the
//! JSON endpoint for everything newer than its watermark, then advances the
//! watermark to the `now` the server reported for that poll. Liveness lives
//! entirely in the client; the server never holds a connection open.

const ROOM_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="color-scheme" content="dark light">
<title>{room_html} - roomfeed</title>
</head>
<body>
<h1>{room_html}</h1>
<p><a href="/rooms">all rooms</a></p>
<ul id="messages" style="list-style: none; padding: 0;"></ul>
<form id="post-form" style="display: flex; flex-direction: column; gap: 5px; max-width: 40em;">
  <input type="text" name="userName" placeholder="Name (optional)" maxlength="64">
  <textarea name="text" required autofocus placeholder="Message text" maxlength="{max_text_len}" style="resize: vertical;"></textarea>
  <button type="submit">Send</button>
</form>
<script>
const room = {room_json};
const pollIntervalMs = {poll_interval_ms};
const list = document.getElementById("messages");
let since = null;

function render(message) {
  const item = document.createElement("li");
  const when = new Date(message.timestamp).toLocaleTimeString();
  item.textContent = "[" + when + "] " + (message.userName ?? "Anonymous") + ": " + message.text;
  list.appendChild(item);
}

async function poll() {
  const base = "/rooms/" + encodeURIComponent(room) + "/messages";
  const url = since === null ? base : base + "?since=" + encodeURIComponent(since);
  const response = await fetch(url);
  if (!response.ok) return;
  const batch = await response.json();
  // advance the watermark to the time this poll was issued, never to the
  // timestamp of the last message received
  since = batch.now;
  batch.messages.forEach(render);
}

document.getElementById("post-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  await fetch("/rooms/" + encodeURIComponent(room) + "/messages", {
    method: "POST",
    headers: { "Content-Type": "application/x-www-form-urlencoded" },
    body: new URLSearchParams(form),
  });
  event.target.querySelector("textarea").value = "";
});

poll();
setInterval(poll, pollIntervalMs);
</script>
</body>
</html>
"#;

const INDEX_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="color-scheme" content="dark light">
<title>roomfeed</title>
</head>
<body>
<h1>Rooms</h1>
<ul>
{room_items}</ul>
<form onsubmit="event.preventDefault(); location.href = '/rooms/' + encodeURIComponent(this.room.value);">
  <input type="text" name="room" placeholder="Room name" required>
  <button type="submit">Open</button>
</form>
</body>
</html>
"#;

/// Render the chat page for one room.
pub fn room_page(room_id: &str, poll_interval_ms: u64, max_text_len: usize) -> String {
    ROOM_PAGE
        .replace("{room_html}", &escape_html(room_id))
        .replace("{room_json}", &escape_json_for_script(room_id))
        .replace("{poll_interval_ms}", &poll_interval_ms.to_string())
        .replace("{max_text_len}", &max_text_len.to_string())
}

/// Render the room index page.
pub fn room_index(room_ids: &[String]) -> String {
    let mut items = String::new();
    for room_id in room_ids {
        items.push_str(&format!(
            "<li><a href=\"/rooms/{0}\">{1}</a></li>\n",
            urlencode(room_id),
            escape_html(room_id)
        ));
    }
    INDEX_PAGE.replace("{room_items}", &items)
}

/// JSON-encode a value for embedding inside an inline `<script>` element.
///
/// JSON string escaping leaves `<` alone, so a value containing
/// `</script>` would otherwise terminate the script element and inject
/// markup. Escaping `<` as `<` keeps the string identical to the
/// script while making it inert in HTML.
fn escape_json_for_script(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
}

/// Minimal HTML entity escaping for interpolated values.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Percent-encode a path segment.
fn urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
