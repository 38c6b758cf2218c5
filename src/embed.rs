//! Self-contained HTML page hosting the globe.
//!
//! The page carries the serialized series and city list as inert JSON
//! blocks, the side panel and controls, and a module script that loads the
//! wasm engine, drives the frame loop and the playback timer, and shows any
//! start-up failure inside the frame.

use std::fmt::Write;

use crate::animation::Speed;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::panel::{ElementIds, PLAY_LABEL};
use crate::session::RenderSession;

/// Page-level settings for [`render_document`]
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedOptions {
    /// URL of the wasm-bindgen JS glue module
    pub module_url: String,
    pub title: String,
    pub render_height: u32,
    /// Height the host must reserve for the frame
    pub frame_height: u32,
    pub initial_speed: Speed,
    pub tick_interval_ms: u32,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            module_url: "./pkg/pandemic_globe.js".to_string(),
            title: "Pandemic Timeline Globe".to_string(),
            render_height: 700,
            frame_height: 720,
            initial_speed: Speed::Normal,
            tick_interval_ms: 30,
        }
    }
}

impl EmbedOptions {
    pub fn from_config(config: &SessionConfig, module_url: &str) -> Result<Self> {
        Ok(Self {
            module_url: module_url.to_string(),
            render_height: config.display.render_height,
            frame_height: config.display.frame_height,
            initial_speed: config.initial_speed()?,
            tick_interval_ms: config.playback.tick_interval_ms,
            ..Default::default()
        })
    }
}

const STYLE: &str = r#"
body {margin:0;padding:0;background:#0f172a;overflow:hidden;font-family:'Segoe UI','Helvetica Neue',Arial,sans-serif}
#container {width:100%;position:relative;background:linear-gradient(135deg,#1e293b 0%,#0f172a 100%);border-radius:15px;overflow:hidden}
canvas {display:block;width:100%}
.info-sidebar {position:absolute;left:20px;top:20px;background:rgba(15,23,42,0.95);padding:20px;border-radius:12px;width:200px;backdrop-filter:blur(10px);border:1px solid #334155}
.stat-card {background:#1e293b;padding:15px;border-radius:10px;margin-bottom:12px;border:1px solid #334155}
.stat-card.cases {background:linear-gradient(135deg,#ef4444 0%,#dc2626 100%)}
.stat-card.cases .stat-label {color:rgba(255,255,255,0.9)}
.stat-card.cases .stat-value {color:white}
.stat-label {color:#94a3b8;font-size:13px;margin-bottom:5px}
.stat-value {color:#60a5fa;font-size:22px;font-weight:700}
.controls {position:absolute;bottom:20px;left:50%;transform:translateX(-50%);background:rgba(15,23,42,0.95);padding:20px;border-radius:15px;width:80%;backdrop-filter:blur(10px);border:1px solid #334155}
.timeline-header {display:flex;justify-content:space-between;align-items:center;margin-bottom:15px}
.date-display {color:#60a5fa;font-size:20px;font-weight:600}
.btn-group {display:flex;gap:10px;align-items:center}
.btn {background:linear-gradient(135deg,#667eea 0%,#764ba2 100%);color:white;border:none;padding:12px 24px;border-radius:8px;cursor:pointer;font-size:14px;font-weight:600;transition:transform 0.2s}
.btn:hover {transform:scale(1.05)}
.speed-btn {background:#1e293b;color:#cbd5e1;border:1px solid #334155;padding:8px 15px;border-radius:8px;cursor:pointer;font-size:13px;transition:all 0.2s}
.speed-btn.active {background:#60a5fa;color:white;border-color:#60a5fa}
.slider {width:100%;height:8px;border-radius:5px;background:#1e293b;outline:none;-webkit-appearance:none;cursor:pointer}
.slider::-webkit-slider-thumb {-webkit-appearance:none;width:20px;height:20px;border-radius:50%;background:#60a5fa;cursor:pointer;box-shadow:0 0 15px rgba(96,165,250,0.6)}
.globe-error {position:absolute;inset:0;display:flex;align-items:center;justify-content:center;padding:40px;color:#fca5a5;background:rgba(15,23,42,0.97);font-size:16px;text-align:center}
.globe-error[hidden] {display:none}
"#;

/// Make a JSON payload safe to sit inside a `<script>` element
fn escape_script_json(json: &str) -> String {
    // `<` only occurs inside JSON strings, where `\u003c` decodes to the same text
    json.replace('<', "\\u003c")
}

/// Escape text for an HTML text node or a double-quoted attribute
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the complete page for `session`
pub fn render_document(session: &RenderSession, options: &EmbedOptions) -> Result<String> {
    let ids = ElementIds::default();
    let panel = session.panel();
    let last_index = session.timeline().last_index();

    let mut html = String::with_capacity(session.timeline().len() * 64 + 16384);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{style}#container {{height:{frame}px}}
</style>
</head>
<body>
<div id="container">
<canvas id="globe" height="{render}" style="height:{render}px"></canvas>
"#,
        title = escape_html(&options.title),
        style = STYLE,
        frame = options.frame_height,
        render = options.render_height,
    );

    // Side panel, pre-filled with day 0 so the page reads correctly before wasm loads
    let _ = write!(
        html,
        r#"<div class="info-sidebar">
<div class="stat-card"><div class="stat-label">Date</div><div class="stat-value" id="{info_date}" style="font-size:16px">{date}</div></div>
<div class="stat-card"><div class="stat-label">Days elapsed</div><div class="stat-value" id="{info_day}">{day}</div></div>
<div class="stat-card cases"><div class="stat-label">Cumulative cases</div><div class="stat-value" id="{info_cases}">{cases}</div></div>
<div class="stat-card"><div class="stat-label">Cumulative deaths</div><div class="stat-value" id="{info_deaths}">{deaths}</div></div>
"#,
        info_date = ids.info_date,
        info_day = ids.info_day,
        info_cases = ids.info_cases,
        info_deaths = ids.info_deaths,
        date = panel.date,
        day = panel.day_text(),
        cases = panel.cases_text(),
        deaths = panel.deaths_text(),
    );
    if let Some(affected) = panel.affected_text() {
        let _ = write!(
            html,
            r#"<div class="stat-card"><div class="stat-label">Cities reached</div><div class="stat-value" id="{id}">{affected}</div></div>
"#,
            id = ids.info_affected,
        );
    }
    html.push_str("</div>\n");

    // Controls
    let _ = write!(
        html,
        r#"<div class="controls">
<div class="timeline-header">
<div class="date-display" id="{current_date}">{date}</div>
<div class="btn-group">
"#,
        current_date = ids.current_date,
        date = panel.date,
    );
    for speed in Speed::ALL {
        let _ = writeln!(
            html,
            r#"<button class="speed-btn{active}" id="{prefix}{index}" data-speed="{multiplier}">{label}</button>"#,
            active = if speed == options.initial_speed { " active" } else { "" },
            prefix = ids.speed_button_prefix,
            index = speed.control_index(),
            multiplier = speed.multiplier(),
            label = speed.label(),
        );
    }
    let _ = write!(
        html,
        r#"<button class="btn" id="{play}">{play_label}</button>
</div>
</div>
<input type="range" class="slider" id="{slider}" min="0" max="{max}" value="0">
</div>
<div class="globe-error" id="{error}" hidden></div>
</div>
"#,
        play = ids.play_button,
        play_label = PLAY_LABEL,
        slider = ids.slider,
        max = last_index,
        error = ids.error,
    );

    // Data
    let _ = write!(
        html,
        r#"<script type="application/json" id="series-data">{series}</script>
<script type="application/json" id="cities-data">{cities}</script>
<script type="application/json" id="origin-data">{origin}</script>
"#,
        series = escape_script_json(session.series_json()?),
        cities = escape_script_json(&session.cities_json()?),
        origin = escape_script_json(&serde_json::to_string(&session.origin())?),
    );

    let module_url = escape_script_json(&serde_json::to_string(&options.module_url)?);

    let _ = write!(
        html,
        r#"<script type="module">
const showError = (err) => {{
  const el = document.getElementById("{error}");
  el.textContent = "The globe could not be started: " + err;
  el.hidden = false;
}};
try {{
  const {{ default: init, PandemicGlobe }} = await import({module_url});
  await init();
  const canvas = document.getElementById("globe");
  canvas.width = canvas.clientWidth;
  const globe = new PandemicGlobe(
    canvas,
    document.getElementById("series-data").textContent,
    document.getElementById("cities-data").textContent,
    JSON.parse(document.getElementById("origin-data").textContent) ?? undefined,
  );
  globe.set_speed({initial_speed});
  let timer = null;
  const stopTimer = () => {{ if (timer !== null) {{ clearInterval(timer); timer = null; }} }};
  const startTimer = (token) => {{
    stopTimer();
    timer = setInterval(() => globe.tick(token), {tick_interval});
  }};
  const playButton = document.getElementById("{play}");
  playButton.addEventListener("click", () => {{
    const token = globe.toggle_play();
    if (token === undefined) {{ stopTimer(); }} else {{ startTimer(token); }}
  }});
  document.getElementById("{slider}").addEventListener("input", (e) => globe.scrub(Number(e.target.value)));
  document.querySelectorAll(".speed-btn").forEach((btn) => {{
    btn.addEventListener("click", () => globe.set_speed(Number(btn.dataset.speed)));
  }});
  canvas.addEventListener("pointerdown", (e) => globe.pointer_down(e.offsetX, e.offsetY));
  canvas.addEventListener("pointermove", (e) => {{
    globe.pointer_move(e.offsetX, e.offsetY);
    const city = globe.on_mouse_move(e.offsetX, e.offsetY);
    canvas.title = city ?? "";
  }});
  window.addEventListener("pointerup", () => globe.pointer_up());
  window.addEventListener("resize", () => {{
    canvas.width = canvas.clientWidth;
    globe.resize(canvas.width, {render});
  }});
  const frame = () => {{
    globe.render(Date.now());
    requestAnimationFrame(frame);
  }};
  requestAnimationFrame(frame);
}} catch (err) {{
  showError(err);
}}
</script>
</body>
</html>
"#,
        error = ids.error,
        module_url = module_url,
        initial_speed = options.initial_speed.multiplier(),
        tick_interval = options.tick_interval_ms,
        play = ids.play_button,
        slider = ids.slider,
        render = options.render_height,
    );

    Ok(html)
}
