//! HTML rendering for the daily and library pages

use crate::types::ConceptEntry;

const STYLE: &str = r#"
  *, *::before, *::after { box-sizing: border-box; }
  :root { --bg: #f9fafb; --text: #1f2937; --card: #ffffff; --accent: #2563eb; }
  body.dark { --bg: #111827; --text: #f3f4f6; --card: #1f2937; --accent: #3b82f6; }
  body { margin: 0; background: var(--bg); color: var(--text); font-family: system-ui, sans-serif;
         display: flex; flex-direction: column; align-items: center; min-height: 100vh; }
  .topbar { width: 100%; max-width: 800px; padding: 1rem 2rem; display: flex; justify-content: space-between; }
  .topbar a { color: var(--accent); margin-right: 1.5rem; text-decoration: none; }
  .dark-toggle { cursor: pointer; border: 1px solid var(--accent); border-radius: 6px;
                 background: transparent; color: var(--accent); padding: 0.4rem 0.9rem; }
  .container { background: var(--card); padding: 2rem 2.5rem; margin-top: 2rem; border-radius: 16px;
               box-shadow: 0 8px 24px rgba(0,0,0,0.1); max-width: 800px; width: 100%; }
  h1 { text-align: center; }
  .concept { font-size: 1.4rem; color: var(--accent); font-weight: 600; text-align: center; }
  .definition { line-height: 1.6; display: none; }
  .definition.visible, .definition.static { display: block; }
  .library-item { margin-bottom: 1.5rem; cursor: pointer; }
  .library-item h3 { color: var(--accent); margin-bottom: 0.3rem; }
  .search-box input { width: 100%; padding: 0.6rem 1rem; font-size: 1rem; border-radius: 8px; border: 1px solid #ccc; }
  footer { margin: 2rem 0; opacity: 0.6; font-size: 0.9rem; }
"#;

const SCRIPT: &str = r#"
  function toggleDarkMode() {
    document.body.classList.toggle("dark");
    localStorage.setItem("darkMode", document.body.classList.contains("dark"));
  }
  function toggleDefinition(id) {
    document.getElementById(id).classList.toggle("visible");
  }
  function filterConcepts() {
    const needle = document.getElementById("searchInput").value.toLowerCase();
    for (const item of document.getElementsByClassName("library-item")) {
      const title = item.querySelector("h3").innerText.toLowerCase();
      item.style.display = title.includes(needle) ? "block" : "none";
    }
  }
  window.onload = () => {
    if (localStorage.getItem("darkMode") === "true") document.body.classList.add("dark");
  };
"#;

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, heading: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
<script>{SCRIPT}</script>
</head>
<body>
<div class="topbar">
  <div><a href="/">Daily</a><a href="/library">Library</a></div>
  <button class="dark-toggle" onclick="toggleDarkMode()">Toggle Dark Mode</button>
</div>
<div class="container">
<h1>{heading}</h1>
{body}
</div>
<footer>Product Management Glossary</footer>
</body>
</html>
"#
    )
}

/// Daily page for a single concept
pub fn render_daily(entry: &ConceptEntry) -> String {
    let body = format!(
        "<div class=\"concept\">{}</div>\n<div class=\"definition static\">{}</div>",
        escape_html(&entry.concept),
        escape_html(&entry.definition)
    );
    layout("Daily Product Concept", "Daily Product Concept", &body)
}

/// Library page listing every concept with a collapsible definition
pub fn render_library(entries: &[ConceptEntry]) -> String {
    let mut body = String::from(
        "<div class=\"search-box\"><input type=\"text\" id=\"searchInput\" \
         oninput=\"filterConcepts()\" placeholder=\"Search concepts...\"></div>\n<div class=\"library-list\">\n",
    );
    for (i, entry) in entries.iter().enumerate() {
        body.push_str(&format!(
            "<div class=\"library-item\" onclick=\"toggleDefinition('concept-{i}')\">\
             <h3>{}</h3><div id=\"concept-{i}\" class=\"definition\">{}</div></div>\n",
            escape_html(&entry.concept),
            escape_html(&entry.definition)
        ));
    }
    body.push_str("</div>");
    layout("Glossary Library", "Click a Concept to View the Definition", &body)
}

/// Generic failure page; details stay in the logs
pub fn render_error() -> String {
    layout(
        "Something went wrong",
        "Something went wrong",
        "<p>The concept of the day is unavailable right now. Please try again later.</p>",
    )
}
