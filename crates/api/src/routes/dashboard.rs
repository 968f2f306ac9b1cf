//! Dashboard page handler.
//!
//! Renders a static HTML summary with embedded polling scripts; the scripts
//! call the recent-rows endpoint on a fixed interval and redraw the charts
//! client-side. Chart handles are owned per canvas id rather than hung off
//! ambient globals.

use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::{Duration, Utc};
use persistence::repositories::{AirReadingRepository, FlameEventRepository};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::dashboard::{AirBand, DashboardSummary, LatestAir, FLAME_ALERT_WINDOW_MINUTES};

/// Poll interval for the embedded refresh script, in milliseconds.
const REFRESH_INTERVAL_MS: u32 = 10_000;

/// Query parameters for the dashboard page.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardQuery {
    /// Which page tab is active: "air" (default) or "flame".
    pub page: Option<String>,
}

/// Render the dashboard summary page.
///
/// GET /?page=air|flame
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let summary = load_summary(&state).await?;
    let page = match query.page.as_deref() {
        Some("flame") => "flame",
        _ => "air",
    };

    Ok(Html(render_page(&summary, page)))
}

/// Loads the data backing the rendered page: the single latest air reading
/// and whether any fire event landed inside the alert window.
async fn load_summary(state: &AppState) -> Result<DashboardSummary, ApiError> {
    let air_repo = AirReadingRepository::new(state.pool.clone());
    let latest_air = air_repo.find_latest().await?.map(|e| {
        let reading: domain::models::AirReading = e.into();
        LatestAir {
            value: reading.value.to_string(),
            recorded_at: shared::timestamp::format_recorded_at(reading.recorded_at),
            band: AirBand::for_value(reading.value),
        }
    });

    let cutoff = Utc::now().naive_utc() - Duration::minutes(FLAME_ALERT_WINDOW_MINUTES);
    let flame_repo = FlameEventRepository::new(state.pool.clone());
    let flame_recent = flame_repo.fire_detected_since(cutoff).await?;

    Ok(DashboardSummary {
        latest_air,
        flame_recent,
    })
}

fn render_page(summary: &DashboardSummary, page: &str) -> String {
    let flame_alert = if summary.flame_recent {
        r#"<div class="alert alert-danger" role="alert">
      Flame detected in the last 30 minutes - check the flame events page for details.
    </div>"#
    } else {
        ""
    };

    let latest_card = match &summary.latest_air {
        Some(latest) => {
            let band_note = match latest.band {
                AirBand::High => format!(
                    r#"<div class="alert alert-warning">High pollution detected (value = {}). Raise alarm / ventilation.</div>"#,
                    latest.value
                ),
                AirBand::Moderate => format!(
                    r#"<div class="alert alert-info">Moderate pollution (value = {}). Monitor closely.</div>"#,
                    latest.value
                ),
                AirBand::Normal => String::new(),
            };
            format!(
                r#"<div class="value-card">{}</div>
      <div class="small text-muted">at {}</div>
      {}"#,
                html_escape(&latest.value),
                html_escape(&latest.recorded_at),
                band_note
            )
        }
        None => r#"<div class="text-muted">No data yet</div>"#.to_string(),
    };

    let chart = if page == "flame" {
        r#"<canvas id="flameChart" height="120"></canvas>"#
    } else {
        r#"<canvas id="aqChart" height="120"></canvas>"#
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>IoT Monitor - Air &amp; Flame</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js"></script>
  <style>body {{ padding-top: 1rem; }} .value-card {{ font-size: 2.25rem; font-weight: 700; }}</style>
</head>
<body>
  <div class="container">
    <nav class="nav nav-pills mb-3">
      <a class="nav-link{air_active}" href="?page=air">Air Quality</a>
      <a class="nav-link{flame_active}" href="?page=flame">Flame Events</a>
    </nav>
    {flame_alert}
    <div class="row">
      <div class="col-md-8">
        <div class="card"><div class="card-body">{chart}</div></div>
      </div>
      <div class="col-md-4">
        <div class="card"><div class="card-body">
          <h6 class="card-title">Latest Air Value</h6>
          {latest_card}
        </div></div>
      </div>
    </div>
  </div>
  <script>
    const REFRESH_INTERVAL = {refresh_ms};
    // Chart handles owned per canvas id, not window globals
    const charts = new Map();

    async function fetchRows(stream) {{
      try {{
        const res = await fetch('/api/v1/recent?stream=' + stream);
        const rows = await res.json();
        return Array.isArray(rows) ? rows : [];
      }} catch (err) {{
        console.error('Error fetching ' + stream + ':', err);
        return [];
      }}
    }}

    function drawChart(canvasId, label, color, labels, data) {{
      const canvas = document.getElementById(canvasId);
      if (!canvas) return;
      const existing = charts.get(canvasId);
      if (existing) existing.destroy();
      charts.set(canvasId, new Chart(canvas.getContext('2d'), {{
        type: 'line',
        data: {{ labels: labels, datasets: [{{ label: label, data: data, borderColor: color, tension: 0.3, pointRadius: 2 }}] }},
        options: {{ responsive: true, scales: {{ y: {{ beginAtZero: true }} }} }}
      }}));
    }}

    async function refresh() {{
      if (document.getElementById('aqChart')) {{
        const rows = await fetchRows('air');
        drawChart('aqChart', 'Air Quality Value', 'rgba(54, 162, 235, 1)',
          rows.map(r => r.recorded_at), rows.map(r => Number(r.value)));
      }}
      if (document.getElementById('flameChart')) {{
        const rows = await fetchRows('flame');
        drawChart('flameChart', 'Flame Detection (1 = Fire)', 'rgba(255, 99, 132, 1)',
          rows.map(r => r.recorded_at), rows.map(r => Number(r.status)));
      }}
    }}

    refresh();
    setInterval(refresh, REFRESH_INTERVAL);
  </script>
</body>
</html>
"#,
        air_active = if page == "air" { " active" } else { "" },
        flame_active = if page == "flame" { " active" } else { "" },
        flame_alert = flame_alert,
        chart = chart,
        latest_card = latest_card,
        refresh_ms = REFRESH_INTERVAL_MS,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
