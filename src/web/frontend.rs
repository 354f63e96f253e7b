//! Embedded HTML/CSS/JS frontend for the launchdash web dashboard.
//!
//! The entire page is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies. Charts are drawn
//! as inline SVG from the chart-ready series returned by the API.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>launchdash</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app {
  max-width: 1100px;
  margin: 0 auto;
  padding: 24px;
}

header {
  text-align: center;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}

header h1 { font-size: 32px; font-weight: 600; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 20px;
}

.card h2 {
  font-size: 16px;
  font-weight: 600;
  margin-bottom: 12px;
}

select, input[type=number] {
  width: 100%;
  background: var(--bg);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 8px 10px;
  font-size: 14px;
}

.range-row {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 16px;
}

.range-row label { color: var(--text-muted); font-size: 12px; }
.range-row input[type=range] { width: 100%; accent-color: var(--accent); }
.range-value { font-family: var(--mono); }

.chart { width: 100%; height: auto; }
.chart text { fill: var(--text-muted); font-size: 11px; font-family: var(--font); }
.chart .title { fill: var(--text); font-size: 14px; font-weight: 600; }
.chart .axis { stroke: var(--border); }

.legend {
  display: flex;
  flex-wrap: wrap;
  gap: 12px;
  margin-top: 8px;
  font-size: 12px;
  color: var(--text-muted);
}
.legend .swatch {
  display: inline-block;
  width: 10px;
  height: 10px;
  border-radius: 2px;
  margin-right: 4px;
}

.toast {
  position: fixed;
  bottom: 24px;
  right: 24px;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 10px 16px;
  opacity: 0;
  transition: opacity 0.2s;
}
.toast.show { opacity: 1; }
.toast.error { border-color: var(--red); color: var(--red); }
</style>
</head>
<body>
<div class="app">

  <header>
    <h1 id="page-title">Launch Records Dashboard</h1>
    <div class="subtitle" id="subtitle"></div>
  </header>

  <div class="card">
    <h2>Launch Site</h2>
    <select id="site-select"></select>
  </div>

  <div class="card">
    <svg class="chart" id="pie-chart" viewBox="0 0 640 340"></svg>
    <div class="legend" id="pie-legend"></div>
  </div>

  <div class="card">
    <h2>Payload range (Kg)</h2>
    <div class="range-row">
      <div>
        <label for="range-low">Low: <span class="range-value" id="range-low-value"></span></label>
        <input type="range" id="range-low">
      </div>
      <div>
        <label for="range-high">High: <span class="range-value" id="range-high-value"></span></label>
        <input type="range" id="range-high">
      </div>
    </div>
  </div>

  <div class="card">
    <svg class="chart" id="scatter-chart" viewBox="0 0 640 360"></svg>
    <div class="legend" id="scatter-legend"></div>
  </div>

</div>

<div class="toast" id="toast"></div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let meta = null;
let sessionId = null;
let state = null;

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  const data = await res.json();
  if (!res.ok) throw new Error(data.error || res.statusText);
  return data;
}

function toast(msg, isError) {
  const el = document.getElementById('toast');
  el.textContent = msg;
  el.className = 'toast show' + (isError ? ' error' : '');
  setTimeout(() => el.className = 'toast', 3000);
}

function fmt(n) {
  if (n === undefined || n === null) return '-';
  return n.toLocaleString();
}

function esc(s) {
  return String(s).replace(/[&<>"']/g, c => ({
    '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
  })[c]);
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------
async function init() {
  try {
    meta = await api('GET', '/api/meta');
    document.getElementById('page-title').textContent = meta.title;
    document.title = meta.title;
    document.getElementById('subtitle').textContent =
      fmt(meta.all_sites.records) + ' launches from ' + meta.sites.length + ' sites';
    buildControls();
    apply(await api('POST', '/api/sessions'));
  } catch (e) {
    toast('Failed to start dashboard: ' + e.message, true);
  }
}

function buildControls() {
  const select = document.getElementById('site-select');
  const options = [meta.all_sites].concat(meta.sites);
  select.innerHTML = options.map(s =>
    `<option value="${esc(s.id)}">${esc(s.label)} (${s.records})</option>`
  ).join('');
  select.addEventListener('change', () => send('site', { site: select.value }));

  const b = meta.payload_bounds;
  for (const id of ['range-low', 'range-high']) {
    const el = document.getElementById(id);
    el.min = b.min;
    el.max = b.max;
    el.step = 'any';
    el.addEventListener('input', showRange);
    el.addEventListener('change', () => send('range', {
      low: Number(document.getElementById('range-low').value),
      high: Number(document.getElementById('range-high').value),
    }));
  }
  // Slider marks follow the configured step
  const marks = document.createElement('datalist');
  marks.id = 'payload-marks';
  const step = meta.slider_step_kg > 0 ? meta.slider_step_kg : (b.max - b.min) || 1;
  for (let v = b.min; v <= b.max; v += step) {
    marks.appendChild(new Option('', v));
  }
  document.body.appendChild(marks);
  document.getElementById('range-low').setAttribute('list', 'payload-marks');
  document.getElementById('range-high').setAttribute('list', 'payload-marks');
}

// ---------------------------------------------------------------------------
// Filter events
// ---------------------------------------------------------------------------
async function send(kind, body) {
  try {
    apply(await api('PUT', `/api/sessions/${sessionId}/${kind}`, body));
  } catch (e) {
    toast(e.message, true);
    // Rejected: restore the controls to the last accepted selection
    if (state) syncControls(state.filter);
  }
}

function apply(data) {
  sessionId = data.session_id;
  state = data;
  syncControls(data.filter);
  renderPie(data.views.breakdown);
  renderScatter(data.views.correlation);
}

function syncControls(filter) {
  document.getElementById('site-select').value = filter.site;
  document.getElementById('range-low').value = filter.payload_range.low;
  document.getElementById('range-high').value = filter.payload_range.high;
  showRange();
}

function showRange() {
  document.getElementById('range-low-value').textContent =
    fmt(Number(document.getElementById('range-low').value));
  document.getElementById('range-high-value').textContent =
    fmt(Number(document.getElementById('range-high').value));
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------
function renderPie(view) {
  const svg = document.getElementById('pie-chart');
  const legend = document.getElementById('pie-legend');
  let out = `<text class="title" x="320" y="24" text-anchor="middle">${esc(view.title)}</text>`;

  if (view.categories.length === 0) {
    out += '<text x="320" y="180" text-anchor="middle">No data for this selection</text>';
    svg.innerHTML = out;
    legend.innerHTML = '';
    return;
  }

  const cx = 320, cy = 185, r = 130;
  let angle = -Math.PI / 2;
  for (const c of view.categories) {
    const frac = c.value / view.total;
    const pct = (frac * 100).toFixed(1) + '%';
    if (frac >= 1) {
      out += `<circle cx="${cx}" cy="${cy}" r="${r}" fill="${c.color}"><title>${esc(c.label)}: ${c.value}</title></circle>`;
    } else {
      const end = angle + frac * 2 * Math.PI;
      const x1 = cx + r * Math.cos(angle), y1 = cy + r * Math.sin(angle);
      const x2 = cx + r * Math.cos(end), y2 = cy + r * Math.sin(end);
      const large = frac > 0.5 ? 1 : 0;
      out += `<path d="M${cx},${cy} L${x1},${y1} A${r},${r} 0 ${large} 1 ${x2},${y2} Z" fill="${c.color}" stroke="#0d1117"><title>${esc(c.label)}: ${c.value}</title></path>`;
      const mid = angle + frac * Math.PI;
      out += `<text x="${cx + r * 0.65 * Math.cos(mid)}" y="${cy + r * 0.65 * Math.sin(mid)}" text-anchor="middle" style="fill:#0d1117">${pct}</text>`;
      angle = end;
    }
  }
  svg.innerHTML = out;
  legend.innerHTML = view.categories.map(c =>
    `<span><span class="swatch" style="background:${c.color}"></span>${esc(c.label)} (${c.value})</span>`
  ).join('');
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------
function renderScatter(view) {
  const svg = document.getElementById('scatter-chart');
  const legend = document.getElementById('scatter-legend');
  const left = 60, right = 620, top = 50, bottom = 310;
  let out = `<text class="title" x="320" y="24" text-anchor="middle">${esc(view.title)}</text>`;

  // Axes
  out += `<line class="axis" x1="${left}" y1="${bottom}" x2="${right}" y2="${bottom}"/>`;
  out += `<line class="axis" x1="${left}" y1="${top}" x2="${left}" y2="${bottom}"/>`;
  out += `<text x="${(left + right) / 2}" y="${bottom + 40}" text-anchor="middle">${esc(view.x_axis_label)}</text>`;
  out += `<text x="16" y="${(top + bottom) / 2}" text-anchor="middle" transform="rotate(-90 16 ${(top + bottom) / 2})">${esc(view.y_axis_label)}</text>`;

  const lo = view.x_domain.low, hi = view.x_domain.high;
  const span = hi > lo ? hi - lo : 1;
  const xOf = v => left + ((v - lo) / span) * (right - left);
  const yOf = c => c === 1 ? top + 30 : bottom - 30;

  out += `<text x="${left - 8}" y="${yOf(1) + 4}" text-anchor="end">1</text>`;
  out += `<text x="${left - 8}" y="${yOf(0) + 4}" text-anchor="end">0</text>`;
  out += `<text x="${left}" y="${bottom + 18}" text-anchor="start">${fmt(lo)}</text>`;
  out += `<text x="${right}" y="${bottom + 18}" text-anchor="end">${fmt(hi)}</text>`;

  if (view.points.length === 0) {
    out += `<text x="${(left + right) / 2}" y="${(top + bottom) / 2}" text-anchor="middle">No launches in this payload range</text>`;
  }

  const colors = {};
  for (const g of view.groups) colors[g.name] = g.color;
  for (const p of view.points) {
    out += `<circle cx="${xOf(p.x)}" cy="${yOf(p.y)}" r="6" fill="${colors[p.group]}" fill-opacity="0.8"><title>${esc(p.group)}: ${fmt(p.x)} kg, class ${p.y}</title></circle>`;
  }

  svg.innerHTML = out;
  legend.innerHTML = (view.groups.length ? `<strong>${esc(view.group_label)}</strong>` : '') +
    view.groups.map(g =>
      `<span><span class="swatch" style="background:${g.color}"></span>${esc(g.name)} (${g.count})</span>`
    ).join('');
}

init();
</script>
</body>
</html>
"##;
