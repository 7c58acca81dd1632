/*!
 * Server-rendered pages.
 *
 * The pages are deliberately plain: embedded HTML with a small amount of
 * inline JavaScript. The translate page drives the capture loop (camera
 * frame -> analyze endpoint -> speech synthesis) against the JSON API.
 */

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;

use crate::errors::AppError;

use super::{caller, AppState, USER_HEADER};

/// Escape user-supplied text for embedding in HTML
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wrap page content in the shared layout
fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - SignBridge</title>
<style>
  body {{ font-family: sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #222; }}
  nav a {{ margin-right: 1rem; }}
  .stats {{ display: flex; gap: 2rem; }}
  .stat {{ background: #f4f4f8; padding: 1rem 1.5rem; border-radius: 8px; }}
  .stat b {{ font-size: 1.6rem; display: block; }}
  video, canvas {{ max-width: 100%; border-radius: 8px; background: #000; }}
  button {{ padding: 0.5rem 1rem; margin-right: 0.5rem; }}
  #result {{ font-size: 1.4rem; min-height: 2rem; margin: 1rem 0; }}
  .record {{ border-bottom: 1px solid #ddd; padding: 0.4rem 0; }}
  .session {{ margin-bottom: 1.5rem; }}
  .muted {{ color: #777; font-size: 0.9rem; }}
</style>
</head>
<body>
<nav>
  <a href="/">Home</a>
  <a href="/translate">Translate</a>
  <a href="/history">History</a>
  <a href="/about">About</a>
</nav>
{body}
</body>
</html>"#
    )
}

/// GET / — landing page with store totals
pub async fn landing(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let stats = state
        .controller
        .repository()
        .stats()
        .map_err(|e| AppError::Database(e.to_string()))?;

    let mode = if state.controller.analyzer().is_demo_mode() {
        "demo"
    } else {
        "live"
    };

    let body = format!(
        r#"<h1>SignBridge</h1>
<p>Sign language to speech, straight from your camera.</p>
<div class="stats">
  <div class="stat"><b>{sessions}</b>sessions</div>
  <div class="stat"><b>{records}</b>translations</div>
  <div class="stat"><b>{languages}</b>languages</div>
</div>
<p class="muted">Recognition mode: {mode}</p>
<p><a href="/translate">Start translating</a></p>"#,
        sessions = stats.session_count,
        records = stats.record_count,
        languages = stats.language_count,
    );

    Ok(Html(page_shell("Home", &body)))
}

/// GET /translate — camera capture and speech synthesis loop
pub async fn translate(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let languages = state
        .controller
        .repository()
        .list_active_languages()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let options: String = languages
        .iter()
        .map(|l| {
            format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(&l.code),
                escape_html(&l.name)
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Translate</h1>
<p>
  <label>Sign language:
    <select id="language">{options}</select>
  </label>
</p>
<video id="camera" autoplay playsinline muted></video>
<canvas id="frame" hidden></canvas>
<div id="result" aria-live="polite"></div>
<p>
  <button id="start">Start</button>
  <button id="stop" disabled>Stop</button>
</p>
<p class="muted" id="status"></p>
<script>
const video = document.getElementById('camera');
const canvas = document.getElementById('frame');
const result = document.getElementById('result');
const status = document.getElementById('status');
let sessionId = null;
let timer = null;
let lastSpoken = '';

async function captureAndAnalyze() {{
  canvas.width = video.videoWidth;
  canvas.height = video.videoHeight;
  canvas.getContext('2d').drawImage(video, 0, 0);
  const frame = canvas.toDataURL('image/jpeg', 0.8);

  const response = await fetch('/api/analyze-frame/', {{
    method: 'POST',
    headers: {{ 'Content-Type': 'application/json' }},
    body: JSON.stringify({{
      session_id: sessionId,
      language_code: document.getElementById('language').value,
      frame_base64: frame,
    }}),
  }});
  if (!response.ok) {{
    const err = await response.json();
    status.textContent = err.error || 'Request failed';
    return;
  }}

  const data = await response.json();
  sessionId = data.session_id;
  if (data.translated_text && data.detected_sign !== 'None') {{
    result.textContent = data.translated_text +
      ' (' + Math.round(data.confidence_score * 100) + '%)';
    if (data.translated_text !== lastSpoken) {{
      lastSpoken = data.translated_text;
      speechSynthesis.speak(new SpeechSynthesisUtterance(data.translated_text));
    }}
  }} else {{
    result.textContent = 'No sign detected';
  }}
  status.textContent = 'Session ' + sessionId.slice(0, 8) + ' (' + data.source + ')';
}}

document.getElementById('start').addEventListener('click', async () => {{
  const stream = await navigator.mediaDevices.getUserMedia({{ video: true }});
  video.srcObject = stream;
  timer = setInterval(captureAndAnalyze, 3000);
  document.getElementById('start').disabled = true;
  document.getElementById('stop').disabled = false;
}});

document.getElementById('stop').addEventListener('click', async () => {{
  clearInterval(timer);
  if (video.srcObject) {{
    video.srcObject.getTracks().forEach(t => t.stop());
  }}
  if (sessionId) {{
    await fetch('/api/end-session/', {{
      method: 'POST',
      headers: {{ 'Content-Type': 'application/json' }},
      body: JSON.stringify({{ session_id: sessionId }}),
    }});
    status.textContent = 'Session ended';
    sessionId = null;
    lastSpoken = '';
  }}
  document.getElementById('start').disabled = false;
  document.getElementById('stop').disabled = true;
}});
</script>"#
    );

    Ok(Html(page_shell("Translate", &body)))
}

/// GET /history — the caller's sessions and records
///
/// Requires the user header to name a known profile; anonymous sessions
/// have no owner and never appear here.
pub async fn history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let username = caller(&headers)
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", USER_HEADER)))?;

    if state
        .controller
        .repository()
        .get_user(&username)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .is_none()
    {
        return Err(AppError::Unauthorized(format!(
            "Unknown user: {}",
            username
        )));
    }

    let history = state.controller.session_history(&username).await?;

    let mut sections = String::new();
    for entry in &history {
        let mut rows = String::new();
        for record in &entry.records {
            rows.push_str(&format!(
                r#"<div class="record">{sign} &rarr; {text} <span class="muted">{confidence:.0}% · {source}</span></div>"#,
                sign = escape_html(&record.detected_sign),
                text = escape_html(&record.translated_text),
                confidence = record.confidence_score * 100.0,
                source = record.source,
            ));
        }

        sections.push_str(&format!(
            r#"<div class="session">
<h3>{started} <span class="muted">({status}, {count} translations)</span></h3>
{rows}
</div>"#,
            started = escape_html(&entry.session.started_at),
            status = entry.session.status,
            count = entry.record_count(),
        ));
    }

    if sections.is_empty() {
        sections = "<p class=\"muted\">No sessions yet.</p>".to_string();
    }

    let body = format!(
        "<h1>History for {}</h1>\n{}",
        escape_html(&username),
        sections
    );

    Ok(Html(page_shell("History", &body)))
}

/// GET /about — static information page
pub async fn about() -> Html<String> {
    let body = r#"<h1>About SignBridge</h1>
<p>SignBridge turns sign language into spoken words. The browser captures
camera frames and sends them to the server, a vision model recognizes the
sign, and the translated text is read aloud by your browser.</p>
<p>Without an API key configured the server runs in demo mode and returns
canned recognitions, so the full capture loop can be tried without any
cloud account.</p>"#;

    Html(page_shell("About", body))
}
