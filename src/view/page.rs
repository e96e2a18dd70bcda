// src/view/page.rs
//! The static UI tree. Rendered once at startup; the figures are fetched by
//! the page from the JSON endpoints and drawn with plotly.js.

pub const TITLE: &str = "Sustain-Our-Soil-for-Our-Food";

/// Key under which the page keeps the dropdown value in `sessionStorage`.
pub const SELECTION_STORAGE_KEY: &str = "reporter_country_dropdown";

pub const SEARCH_TERMS: &str = r#""soil health" OR "soil carbon" OR "soil organic carbon" OR "regenerative agriculture" OR "regenerative grazing""#;

/// Minimal HTML text/attribute escaping for values coming from the data files.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `<option>` list for the trade partner dropdown, preceded by the empty
/// placeholder entry that stands for "no selection".
pub fn country_options(countries: &[String]) -> String {
    let mut html = String::from("<option value=\"\">Trade Partner</option>\n");
    for c in countries {
        let c = escape_html(c);
        html.push_str(&format!("          <option value=\"{c}\">{c}</option>\n"));
    }
    html
}

pub fn render_page(countries: &[String]) -> String {
    PAGE_TEMPLATE
        .replace("%TITLE%", TITLE)
        .replace("%STORAGE_KEY%", SELECTION_STORAGE_KEY)
        .replace("%SEARCH_TERMS%", &escape_html(SEARCH_TERMS))
        .replace("%CITATION%", SHANGGUAN_CITATION)
        .replace("%COUNTRY_OPTIONS%", &country_options(countries))
}

const SHANGGUAN_CITATION: &str = r#"Data source: Shangguan, W., Dai, Y., Duan, Q., Liu, B. and Yuan, H., 2014. A Global Soil Data Set for Earth System Modeling. Journal of Advances in Modeling Earth Systems, <a href="https://agupubs.onlinelibrary.wiley.com/doi/full/10.1002/2013MS000293" target="_blank">6: 249-263.</a>"#;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.2, minimum-scale=0.5">
  <title>%TITLE%</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/morph/bootstrap.min.css">
  <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
  <style>
    .navbar-brown { background-color: #483628; }
    .dbc p { text-align: left; }
    #map-socd { min-height: 450px; }
  </style>
</head>
<body class="dbc">
<div class="container-fluid">
  <nav class="navbar navbar-expand navbar-dark navbar-brown fixed-top">
    <div class="container">
      <a class="navbar-brand" href="#">Sustain Our Soil for Our Food</a>
      <ul class="navbar-nav ms-auto">
        <li class="nav-item dropdown">
          <a class="nav-link dropdown-toggle" href="#" data-bs-toggle="dropdown">Contact</a>
          <ul class="dropdown-menu dropdown-menu-end">
            <li><a class="dropdown-item" target="_blank" href="mailto:kathryn@dadeda.design?subject=Sustain our Soil for our Food">Email</a></li>
            <li><a class="dropdown-item" target="_blank" href="https://github.com/khurchla/sustain-our-soil-for-our-food/issues/new/choose">Submit issues or Ideas</a></li>
            <li><a class="dropdown-item" target="_blank" href="https://github.com/khurchla/sustain-our-soil-for-our-food">View source code</a></li>
          </ul>
        </li>
        <li class="nav-item dropdown">
          <a class="nav-link dropdown-toggle" href="#" data-bs-toggle="dropdown">Share</a>
          <ul class="dropdown-menu dropdown-menu-end">
            <li><a class="dropdown-item" href="#">Tweet</a></li>
            <li><a class="dropdown-item" href="#">Weibo</a></li>
          </ul>
        </li>
      </ul>
    </div>
  </nav>

  <div class="row" style="padding-top: 95px; padding-bottom: 0">
    <div class="col-auto offset-md-1 offset-xxl-2">
      <div class="container"><h5>Organic carbon occurs naturally in soil, but whether it presents a threat or a service to humans depends on YOU.</h5></div>
    </div>
  </div>

  <div class="row justify-content-center" style="padding-top: 10px; padding-bottom: 25px">
    <div class="col-11">
      <div class="card card-body">
        <p class="lead">Explore how much of the soil where your food comes from is made up of organic carbon.</p>
        <div class="card-group card border-primary bg-light mb-2">
          <div class="card-body">
            <label class="form-label" for="reporter_country_dropdown">Choose a trade partner.</label>
            <div class="input-group" style="width: 75%">
              <input id="reporter_country_search" class="form-control" type="search" placeholder="Search" aria-label="Search trade partners" autocomplete="off">
              <select id="reporter_country_dropdown" class="form-select">
          %COUNTRY_OPTIONS%
              </select>
              <button id="reporter_country_clear" class="btn btn-outline-secondary" type="button" title="Clear value">&times;</button>
            </div>
          </div>
          <div class="card-footer">
            <button id="info-toolbar-tooltip" class="btn btn-primary btn-sm" type="button"
              data-bs-toggle="tooltip" data-bs-placement="left"
              title="Use the in toolbar in the upper right corner of the map to zoom, move around, or reset your view.">info</button>
          </div>
        </div>
        <div id="map-socd"></div>
        <br>
        <p>Dots on the map vary in size by the location's soil organic carbon density (SOCD), which can be understood as how much of the soil is made up of organic carbon, from the ground surface down to 4.5 centimeters deep. These density estimates are by global leading scientists from the available worldwide soil data, collected and mathematically modelled, and are expressed in metric tonnes per hectare (t ha-1), which are equal to about 1,000 kilograms or aproximately 2,205 pounds.</p>
        <p>Read more about carbon's importance in soil below.</p>
        <p>%CITATION%</p>
      </div>
    </div>
  </div>

  <div class="row" style="padding-top: 10px; padding-bottom: 10px">
    <div class="col-9 offset-2 col-md-5 offset-md-6">
      <button id="learn-more-button" class="btn btn-link" type="button">Learn more about soil health, and how you can help.</button>
      <div id="modal" class="modal fade" tabindex="-1" data-bs-backdrop="static" data-bs-keyboard="false" style="color: #483628">
        <div class="modal-dialog modal-lg modal-dialog-centered">
          <div class="modal-content">
            <div class="modal-header"><h5 class="modal-title">Take Your Curiosity a Step Further.</h5></div>
            <div class="modal-body">
              Copy these suggested key terms by clicking the paper icon beside them or by selecting and copying them directly from within the text area below, and then paste them into your preferred search engine. There are many excellent resources to learn more on your journey as a soil stakeholder.
              <br><br>
              <textarea id="search_terms_textarea_id" style="height: 100%; width: 300px; overflow: auto">%SEARCH_TERMS%</textarea>
              <button id="search_terms_copy" type="button" class="btn btn-link" title="copy" style="display: inline-block; font-size: 20px; color: #483628; vertical-align: top">&#128203;</button>
            </div>
            <div class="modal-footer">
              <button id="learn-more-close" class="btn btn-primary ms-auto" type="button">Close</button>
            </div>
          </div>
        </div>
      </div>
    </div>
  </div>

  <div class="row"><div class="col-12"><br></div></div>

  <div class="row justify-content-center">
    <div class="col-11">
      <div class="container">
        <ul class="nav nav-tabs" role="tablist">
          <li class="nav-item"><button class="nav-link active" data-bs-toggle="tab" data-bs-target="#tab-density" type="button">Density Ranges</button></li>
          <li class="nav-item"><button class="nav-link" data-bs-toggle="tab" data-bs-target="#tab-risk" type="button">At Risk Foods</button></li>
          <li class="nav-item"><button class="nav-link" data-bs-toggle="tab" data-bs-target="#tab-why" type="button">Why Carbon?</button></li>
        </ul>
        <div class="tab-content">
          <div class="tab-pane fade show active" id="tab-density">
            <div class="card card-body">
              <h5>Range of Average Soil Organic Carbon Density (SOCD) Worldwide</h5>
              <div id="SOCD-bar-chart"></div>
              <br>
              <p>Bars show the range of soil organic carbon density on land as a mean average within each country in metric tonnes per hectare (t ha-1), which are equal to about 1,000 kilograms or aproximately 2,205 pounds. Hover over any bar to view details for specific countries.</p>
              <p>%CITATION%</p>
            </div>
          </div>
          <div class="tab-pane fade" id="tab-risk">
            <div class="card card-body">
              <h5>Food Security Risk Analysis by Volume &amp; Diversity of Food Trade Reliance</h5>
              <div id="food-quadrant-chart"></div>
              <br>
              <p>Points show where each country falls in relation to these two major trade metrics as indicators of risk for a country's ability to feed its population. Countries in the upper right corner can generally be understood to be most at risk if food trade lines are affected by decreased production.</p>
              <p>All food products traded between countries are included in the total summary of items imported, in 2019, as measured in metric tonnes (vertical axis showing range with M representing millions of tonnes). While soil organic carbon content is a major factor determining agricultural productivity, those levels are not directly shown in this graph and there are many factors that can lead to trade volatility</p>
              <p>Food and Agriculture Organization of the United Nations. (2020). FAOSTAT Detailed trade matrix: All Data Normalized. <a href="https://www.fao.org/faostat/en/#data/TM" target="_blank">https://www.fao.org/faostat/en/#data/TM</a></p>
            </div>
          </div>
          <div class="tab-pane fade" id="tab-why">
            <div class="card card-body bg-light mb-3">
              <h5>Carbon has a superpower.</h5>
              <p>Often called the element or giver of life, carbon is critical to life supporting processes because it can bond to many other elements essentially as a building block of large and complex compounds that make up living things, including soil, and the plants and animals in the food chain. Soil organic carbon is left in the soil by the processes collectively called the Carbon Cycle, which includes both the growth and death of plants, animals, and other organisms.</p>
              <p>Soil organic carbon (SOC) indicates soil's ability to hold water and nutrients that sustain plants in natural and farming settings. As an indicator of soil's overall organic matter, it also builds soil structure that reduces erosion leading to improved water quality and greater resilience from storms.</p>
              <p>Including its mineral inorganic carbon parts, our soil holds the largest amount of carbon in Earth's ecosystem, and its release through mismanagement from a lack of knowledge and the removal of forests and wetlands is a great risk to increasing carbon dioxide in the atmosphere and speeding up climate change.</p>
              <p>Whether your food comes from across the globe or your own garden, you have an opportunity to restore and ensure soil health to fill bellies all over the world with nutritious foods for years to come. By learning more, you can have an impact on soil health, and together we may even save the world one plate at a time.</p>
            </div>
          </div>
        </div>
      </div>
    </div>
  </div>

  <div class="row">
    <div>
      <br><br>
      <footer class="text-muted">
        <a href="http://kathrynhurchla.com" target="_blank" style="width: 100%; display: flex; align-items: center; justify-content: center">&copy; Kathryn Hurchla 2021</a>
      </footer>
    </div>
  </div>
</div>

<script>
(function () {
  const graphConfig = { displayModeBar: true, scrollZoom: true };
  const storageKey = "%STORAGE_KEY%";

  async function draw(id, url) {
    const res = await fetch(url);
    const fig = await res.json();
    return Plotly.react(id, fig.data, fig.layout, graphConfig);
  }

  // dropdown -> map
  const dropdown = document.getElementById("reporter_country_dropdown");
  function selectCountry(value) {
    if (value) {
      sessionStorage.setItem(storageKey, value);
    } else {
      sessionStorage.removeItem(storageKey);
    }
    draw("map-socd", "/api/map?country=" + encodeURIComponent(value || ""));
  }
  dropdown.addEventListener("change", () => selectCountry(dropdown.value));
  // searchable: hide options that do not contain the typed text
  const search = document.getElementById("reporter_country_search");
  function filterOptions() {
    const needle = search.value.trim().toLowerCase();
    Array.from(dropdown.options).forEach((o) => {
      o.hidden = o.value !== "" && needle !== "" && !o.value.toLowerCase().includes(needle);
    });
    const first = Array.from(dropdown.options).find((o) => o.value !== "" && !o.hidden);
    if (needle && first && first.value !== dropdown.value && dropdown.selectedOptions[0].hidden) {
      dropdown.value = first.value;
      selectCountry(first.value);
    }
  }
  search.addEventListener("input", filterOptions);
  document.getElementById("reporter_country_clear").addEventListener("click", () => {
    search.value = "";
    filterOptions();
    dropdown.value = "";
    selectCountry("");
  });
  const saved = sessionStorage.getItem(storageKey);
  if (saved && Array.from(dropdown.options).some((o) => o.value === saved)) {
    dropdown.value = saved;
  }
  selectCountry(dropdown.value);

  // static charts
  draw("SOCD-bar-chart", "/api/figures/density");
  draw("food-quadrant-chart", "/api/figures/risk");
  document.querySelectorAll('button[data-bs-toggle="tab"]').forEach((tab) => {
    tab.addEventListener("shown.bs.tab", () => {
      ["SOCD-bar-chart", "food-quadrant-chart"].forEach((id) => Plotly.Plots.resize(id));
    });
  });

  // learn-more modal; the server decides visibility
  const modalEl = document.getElementById("modal");
  const modal = bootstrap.Modal.getOrCreateInstance(modalEl);
  const modalState = { open_clicks: 0, close_clicks: 0, is_open: false };
  async function toggle(counter) {
    modalState[counter] += 1;
    const res = await fetch("/api/modal", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(modalState),
    });
    const out = await res.json();
    modalState.is_open = out.is_open;
    if (out.is_open) { modal.show(); } else { modal.hide(); }
  }
  document.getElementById("learn-more-button").addEventListener("click", () => toggle("open_clicks"));
  document.getElementById("learn-more-close").addEventListener("click", () => toggle("close_clicks"));

  document.getElementById("search_terms_copy").addEventListener("click", () => {
    navigator.clipboard.writeText(document.getElementById("search_terms_textarea_id").value);
  });
  document.querySelectorAll('[data-bs-toggle="tooltip"]').forEach((el) => new bootstrap.Tooltip(el));
})();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<Côte d'Ivoire & "X">"#),
            "&lt;Côte d&#39;Ivoire &amp; &quot;X&quot;&gt;"
        );
    }

    #[test]
    fn options_start_with_placeholder_and_keep_order() {
        let html = country_options(&["Brazil".into(), "Kenya".into()]);
        let placeholder = html.find("Trade Partner").unwrap();
        let brazil = html.find("value=\"Brazil\"").unwrap();
        let kenya = html.find("value=\"Kenya\"").unwrap();
        assert!(placeholder < brazil && brazil < kenya);
    }

    #[test]
    fn page_has_controls_and_no_placeholders_left() {
        let html = render_page(&["Kenya".into()]);
        assert!(html.contains("<title>Sustain-Our-Soil-for-Our-Food</title>"));
        assert!(html.contains("id=\"reporter_country_dropdown\""));
        assert!(html.contains("id=\"reporter_country_search\""));
        assert!(html.contains("addEventListener(\"input\", filterOptions)"));
        assert!(html.contains("id=\"learn-more-button\""));
        assert!(html.contains("Why Carbon?"));
        assert!(html.contains("&quot;soil health&quot;"));
        for marker in ["%TITLE%", "%STORAGE_KEY%", "%SEARCH_TERMS%", "%CITATION%", "%COUNTRY_OPTIONS%"] {
            assert!(!html.contains(marker), "{} left in page", marker);
        }
        assert_eq!(html.matches("Journal of Advances in Modeling Earth Systems").count(), 2);
    }
}
