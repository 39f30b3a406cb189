//! The heatmap page.

use anyhow::Result;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Activity heatmap</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
  <style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
  <div id="map"></div>
  <script>
    const map = L.map("map").setView(@CENTER@, @ZOOM@);
    L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
      maxZoom: 18,
      attribution: "&copy; OpenStreetMap contributors",
    }).addTo(map);
    L.heatLayer(@POINTS@).addTo(map);
  </script>
</body>
</html>
"#;

/// Initial zoom of the page, showing a city and its surroundings.
const ZOOM: u8 = 12;

/// Render a self-contained page plotting `[latitude, longitude]` pairs as a
/// heatmap, centred on their mean.
pub fn heatmap(points: &[[f64; 2]]) -> Result<String> {
    let n = points.len().max(1) as f64;
    let (lat, long) = points
        .iter()
        .fold((0.0, 0.0), |(lat, long), [x, y]| (lat + x, long + y));

    let center = serde_json::to_string(&[lat / n, long / n])?;
    let points = serde_json::to_string(points)?;

    Ok(PAGE
        .replace("@CENTER@", &center)
        .replace("@ZOOM@", &ZOOM.to_string())
        .replace("@POINTS@", &points))
}
