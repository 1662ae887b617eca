//! HTML rendering for the dashboard page

use std::fmt::Write;

use crate::charts::RenderedChart;
use crate::dashboard::{DashboardForm, DashboardPage, LiveReport};
use crate::error::AirAwareError;

const TITLE: &str = "Air Aware";
const INTRO: &str =
    "This tool provides AQI and weather details, as well as health recommendations based on AQI.";
const SIMULATED_NOTE: &str = "Charts use simulated data. The weather and AQI below are live.";

const STYLE: &str = "body{font-family:sans-serif;max-width:1040px;margin:2rem auto;padding:0 1rem}\
form{display:grid;gap:.75rem;margin-bottom:2rem}\
label{display:grid;gap:.25rem}\
input{padding:.4rem;font-size:1rem}\
button{width:max-content;padding:.5rem 1.5rem}\
figure{margin:0 0 1.5rem}\
figure svg{max-width:100%;height:auto}\
figcaption{text-align:center;color:#555}\
.note{color:#555;font-style:italic}\
.error{color:#b00020}\
.advisory{white-space:pre-wrap}";

/// What goes below the form
pub enum PageBody<'a> {
    /// Awaiting input
    Empty,
    Results(&'a DashboardPage),
    Error(&'a AirAwareError),
}

/// Full HTML document for the dashboard
#[must_use]
pub fn render(form: &DashboardForm, body: PageBody<'_>) -> String {
    let mut html = String::with_capacity(64 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{TITLE}</h1>\n<p>{INTRO}</p>\n"
    );
    render_form(&mut html, form);

    match body {
        PageBody::Empty => {}
        PageBody::Results(page) => {
            render_charts(&mut html, &page.charts);
            render_report(&mut html, &page.report);
        }
        PageBody::Error(err) => {
            let _ = writeln!(
                html,
                "<p class=\"error\">{}</p>",
                escape(&err.user_message())
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, form: &DashboardForm) {
    let _ = write!(
        html,
        "<form method=\"get\" action=\"/dashboard\">\n\
         <label>City<input type=\"text\" name=\"city\" value=\"{}\" placeholder=\"Enter the name of the city\"></label>\n\
         <label>Area<input type=\"text\" name=\"area\" value=\"{}\" placeholder=\"Enter the area within the city\"></label>\n\
         <label>Disease (e.g., asthma, bronchitis)<input type=\"text\" name=\"disease\" value=\"{}\" placeholder=\"Enter any disease\"></label>\n\
         <button type=\"submit\">Get AQI and precautions</button>\n</form>\n",
        escape(&form.city),
        escape(&form.area),
        escape(&form.disease)
    );
}

fn render_charts(html: &mut String, charts: &[RenderedChart]) {
    let _ = writeln!(html, "<p class=\"note\">{SIMULATED_NOTE}</p>");
    for chart in charts {
        // SVG comes from our own renderer and is inlined as-is
        let _ = writeln!(
            html,
            "<figure>\n{}\n<figcaption>{}</figcaption>\n</figure>",
            chart.svg,
            escape(chart.kind.caption())
        );
    }
}

fn render_report(html: &mut String, report: &LiveReport) {
    match report {
        LiveReport::Ready { snapshot, advisory } => {
            let _ = write!(
                html,
                "<h2>Weather &amp; AQI Information</h2>\n<p>{}</p>\n<p>{}</p>\n\
                 <h3>Precautionary Measures:</h3>\n",
                escape(&snapshot.format_weather()),
                escape(&snapshot.format_aqi())
            );
            let _ = match advisory {
                Ok(text) => writeln!(html, "<div class=\"advisory\">{}</div>", escape(text)),
                Err(err) => writeln!(html, "<p class=\"error\">{}</p>", escape(&err.user_message())),
            };
        }
        LiveReport::Failed(err) => {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape(&err.to_string()));
        }
    }
}

/// Escape text for HTML element content and quoted attribute values
#[must_use]
pub fn escape(text: &str) -> String {
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
