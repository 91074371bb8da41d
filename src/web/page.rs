// src/web/page.rs
//! Server-rendered dashboard page.

use std::fmt::Write;

use super::types::{SalaryRange, View};
use crate::types::RankedJob;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}table{border-collapse:collapse}\
td,th{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}article{margin-bottom:1.5rem}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
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

fn ratio_cell(job: &RankedJob) -> String {
    job.task_to_salary_ratio()
        .map(|ratio| format!("{:.8}", ratio))
        .unwrap_or_else(|| "undefined".to_string())
}

fn link_html(link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        format!(r#"<a href="{}">View offer</a>"#, escape(link))
    } else {
        escape(link)
    }
}

fn filter_form(view: View, range: SalaryRange) -> String {
    let value = |bound: Option<f64>| bound.map(|v| v.to_string()).unwrap_or_default();
    let view_value = match view {
        View::Table => "table",
        View::Details => "details",
    };
    format!(
        r#"<form method="get">
<label>Min salary <input name="min_salary" type="number" value="{}"></label>
<label>Max salary <input name="max_salary" type="number" value="{}"></label>
<input type="hidden" name="view" value="{}">
<button type="submit">Filter</button>
<a href="?view=table">Table</a> | <a href="?view=details">Details</a>
</form>"#,
        value(range.min),
        value(range.max),
        view_value
    )
}

fn render_table(jobs: &[RankedJob]) -> String {
    let mut html = String::from(
        "<table><thead><tr><th>Title</th><th>Company</th><th>Keywords</th><th>Complexity</th>\
<th>Estimated salary</th><th>Ratio</th><th>Link</th></tr></thead><tbody>",
    );
    for job in jobs {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.0}</td><td>{}</td><td>{}</td></tr>",
            escape(&job.record.title),
            escape(&job.record.company),
            escape(&job.matched_keywords().join(", ")),
            job.technical_complexity(),
            job.estimated_annual_salary(),
            ratio_cell(job),
            link_html(&job.record.link),
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn render_details(jobs: &[RankedJob]) -> String {
    let mut html = String::new();
    for job in jobs {
        let _ = write!(
            html,
            "<article><h3>{} <small>{}</small></h3><p>Keywords: {}</p>\
<p>Complexity: {} | Estimated salary: {:.0}</p><p>Ratio (tasks/salary): {}</p><p>{}</p></article><hr>",
            escape(&job.record.title),
            escape(&job.record.company),
            escape(&job.matched_keywords().join(", ")),
            job.technical_complexity(),
            job.estimated_annual_salary(),
            ratio_cell(job),
            link_html(&job.record.link),
        );
    }
    html
}

pub fn render_dashboard(jobs: &[RankedJob], view: View, range: SalaryRange) -> String {
    let body = if jobs.is_empty() {
        "<p>No offers in this salary range.</p>".to_string()
    } else {
        match view {
            View::Table => render_table(jobs),
            View::Details => render_details(jobs),
        }
    };

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Job KPI</title><style>{}</style></head>\
<body><h1>Top offers by tasks / salary</h1>{}{}</body></html>",
        STYLE,
        filter_form(view, range),
        body
    )
}

pub fn render_error(message: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Job KPI</title></head>\
<body><h1>Dashboard unavailable</h1><p>{}</p></body></html>",
        escape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobRecord;

    fn job() -> RankedJob {
        let record = JobRecord {
            title: "Data <Analyst>".to_string(),
            company: "A&B".to_string(),
            link: "https://example.com/1".to_string(),
            ..JobRecord::default()
        };
        RankedJob::new(record, vec!["sql".to_string()], 45_000.0)
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_table_view_escapes_fields() {
        let html = render_dashboard(&[job()], View::Table, SalaryRange::default());
        assert!(html.contains("Data &lt;Analyst&gt;"));
        assert!(html.contains("A&amp;B"));
        assert!(html.contains("0.00002222"));
        assert!(html.contains(r#"<a href="https://example.com/1">"#));
    }

    #[test]
    fn test_details_view_and_undefined_ratio() {
        let unpaid = RankedJob::new(JobRecord::default(), vec![], 0.0);
        let html = render_dashboard(&[unpaid], View::Details, SalaryRange::default());
        assert!(html.contains("<article>"));
        assert!(html.contains("undefined"));
        assert!(html.contains("not found"));
    }
}
