//! Renders the declarative page layout to a single HTML document.

use std::fmt::Write as _;

use dashboard::layout::{Component, Dropdown, PageLayout, RangeSlider, Style};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub fn render_page(layout: &PageLayout) -> String {
    let mut body = String::new();
    render_component(&mut body, &layout.root);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
<style>
body {{ font-family: sans-serif; margin: 0 auto; max-width: 1200px; }}
.range-slider {{ position: relative; padding: 8px 0 24px; }}
.range-slider input[type=range] {{ width: 100%; }}
.range-readout {{ display: block; text-align: center; }}
</style>
</head>
<body>
{body}
<script>
{CLIENT_SCRIPT}
</script>
</body>
</html>
"#,
        title = escape_html(&layout.title),
    )
}

fn render_component(out: &mut String, component: &Component) {
    match component {
        Component::Div { children } => {
            out.push_str("<div>");
            for child in children {
                render_component(out, child);
            }
            out.push_str("</div>\n");
        }
        Component::H1 { text, style } => {
            let _ = writeln!(
                out,
                r#"<h1 style="{}">{}</h1>"#,
                render_style(style),
                escape_html(text)
            );
        }
        Component::Label { text, style } => {
            let _ = writeln!(
                out,
                r#"<label for="site-dropdown" style="{}">{}</label>"#,
                render_style(style),
                escape_html(text)
            );
        }
        Component::P { text } => {
            let _ = writeln!(out, "<p>{}</p>", escape_html(text));
        }
        Component::Br => out.push_str("<br>\n"),
        Component::Dropdown(dropdown) => render_dropdown(out, dropdown),
        Component::RangeSlider(slider) => render_slider(out, slider),
        Component::Graph { id } => {
            let _ = writeln!(out, r#"<div id="{}" class="graph"></div>"#, id.as_str());
        }
    }
}

fn render_dropdown(out: &mut String, dropdown: &Dropdown) {
    let id = dropdown.id.as_str();
    let _ = writeln!(
        out,
        r#"<select id="{id}" data-control="{id}" title="{}" data-searchable="{}" style="{}">"#,
        escape_html(&dropdown.placeholder),
        dropdown.searchable,
        render_style(&dropdown.style),
    );
    for option in &dropdown.options {
        let selected = if option.value == dropdown.value {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            r#"<option value="{}"{selected}>{}</option>"#,
            escape_html(option.value.as_str()),
            escape_html(&option.label),
        );
    }
    out.push_str("</select>\n");
}

fn render_slider(out: &mut String, slider: &RangeSlider) {
    let id = slider.id.as_str();
    let (min, max, step) = (slider.min, slider.max, slider.step);
    // Inputs take any value so the dataset bounds render exactly; the client
    // script snaps a moved handle to `data-step`.
    let _ = writeln!(
        out,
        r#"<div class="range-slider" id="{id}" data-control="{id}" data-step="{step}">"#
    );
    for (class, value) in [("range-low", slider.value.low()), ("range-high", slider.value.high())] {
        let _ = writeln!(
            out,
            r#"<input type="range" class="{class}" min="{min}" max="{max}" step="any" value="{value}" list="{id}-marks">"#
        );
    }
    let _ = writeln!(out, r#"<datalist id="{id}-marks">"#);
    for mark in &slider.marks {
        let _ = writeln!(
            out,
            r#"<option value="{}" label="{}"></option>"#,
            mark.value,
            escape_html(&mark.label)
        );
    }
    out.push_str("</datalist>\n");
    let _ = writeln!(
        out,
        r#"<span class="range-readout">{} - {}</span>"#,
        slider.value.low(),
        slider.value.high()
    );
    out.push_str("</div>\n");
}

// React-style keys such as `textAlign` become CSS properties.
fn render_style(style: &Style) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{}: {}", css_property(key), escape_html(value)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn css_property(key: &str) -> String {
    let mut property = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            property.push('-');
            property.push(ch.to_ascii_lowercase());
        } else {
            property.push(ch);
        }
    }
    property
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const CLIENT_SCRIPT: &str = r#"
(function () {
  const scheme = location.protocol === "https:" ? "wss" : "ws";
  const socket = new WebSocket(`${scheme}://${location.host}/ws`);

  function send(control, value) {
    if (socket.readyState !== WebSocket.OPEN) return;
    socket.send(JSON.stringify({ type: "control_changed", payload: { control, value } }));
  }

  socket.addEventListener("message", (event) => {
    const message = JSON.parse(event.data);
    if (message.type === "figure_updated") {
      const { target, figure } = message.payload;
      Plotly.react(target, figure.data, figure.layout);
    } else if (message.type === "error") {
      console.warn("dashboard error", message.payload);
    }
  });

  const dropdown = document.getElementById("site-dropdown");
  dropdown.addEventListener("change", () => send("site-dropdown", dropdown.value));

  const slider = document.getElementById("payload-slider");
  const low = slider.querySelector(".range-low");
  const high = slider.querySelector(".range-high");
  const readout = slider.querySelector(".range-readout");
  const step = Number(slider.dataset.step);
  function snap(input) {
    const min = Number(input.min);
    const max = Number(input.max);
    const snapped = Math.round((Number(input.value) - min) / step) * step + min;
    input.value = Math.min(max, Math.max(min, snapped));
  }
  function sliderChanged(moved) {
    snap(moved);
    let a = Number(low.value);
    let b = Number(high.value);
    if (a > b) {
      if (moved === low) { b = a; high.value = b; } else { a = b; low.value = a; }
    }
    readout.textContent = `${a} - ${b}`;
    send("payload-slider", [a, b]);
  }
  low.addEventListener("change", () => sliderChanged(low));
  high.addEventListener("change", () => sliderChanged(high));
})();
"#;

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
