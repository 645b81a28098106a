use std::io::{self, IsTerminal, Write};

use chrono_tz::Tz;
use performa_core::binder::{BoundView, RowView, TableView};
use performa_core::config::StatusIssue;
use performa_core::deadline::NextTaskPanel;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, out, bound))]
    pub fn write_view<W: Write>(&self, mut out: W, bound: &BoundView) -> anyhow::Result<()> {
        writeln!(out, "{} - {}", bound.header.name, bound.header.subtitle)?;
        writeln!(out, "{}", bound.last_updated)?;

        if let Some(alert) = bound.alert
            && alert.visible()
        {
            let text = format!("⚠ {} مهام متأخرة", alert.count);
            writeln!(out, "{}", self.paint(&text, "31"))?;
        }

        if !bound.kpis.is_empty() {
            writeln!(out)?;
            let rows = bound
                .kpis
                .iter()
                .map(|kpi| {
                    let change = if kpi.change.class.ends_with("negative") {
                        self.paint(&kpi.change.text, "31")
                    } else {
                        self.paint(&kpi.change.text, "32")
                    };
                    vec![
                        kpi.label.clone(),
                        kpi.value_text.clone(),
                        change,
                        kpi.progress_width.clone(),
                    ]
                })
                .collect();
            write_table(&mut out, &["المؤشر", "القيمة", "التغير", "التقدم"], rows)?;
        }

        for table in &bound.tables {
            writeln!(out)?;
            self.write_rows(&mut out, table)?;
        }

        if !bound.updates.is_empty() {
            writeln!(out)?;
            let rows = bound
                .updates
                .iter()
                .map(|item| vec![item.task.clone(), item.badge.label.clone(), item.date.clone()])
                .collect();
            write_table(&mut out, &["آخر التحديثات", "الحالة", "التاريخ"], rows)?;
        }

        if let Some(perf) = &bound.performance {
            writeln!(out)?;
            writeln!(out, "الجودة: {}", perf.quality_text)?;
            writeln!(
                out,
                "إعادة العمل: {}  زمن الاعتماد: {}  صحيح من أول مرة: {}",
                perf.metrics.rework, perf.metrics.approval_time, perf.metrics.first_time_ok
            )?;
            let mut headers = vec![""];
            headers.extend(perf.heatmap_days.iter().map(String::as_str));
            let rows = perf
                .heatmap
                .iter()
                .map(|row| {
                    let mut cells = vec![row.department.clone()];
                    cells.extend(row.cells.iter().map(|cell| cell.tooltip.clone()));
                    cells
                })
                .collect();
            write_table(&mut out, &headers, rows)?;
        }

        if !bound.charts.is_empty() {
            writeln!(out)?;
            for chart in &bound.charts {
                let series = chart
                    .data
                    .datasets
                    .iter()
                    .map(|set| set.label.clone().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "chart {} ({} points): {series}", chart.canvas_id, chart.data.labels.len())?;
            }
        }

        Ok(())
    }

    fn write_rows<W: Write>(&self, out: &mut W, table: &TableView) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} ({}/{})",
            table.id.title(),
            table.visible_count(),
            table.rows.len()
        )?;
        let rows = table.visible_rows().map(|row| self.row_cells(row)).collect();
        write_table(out, &["الاسم", "السياق", "المسؤول", "الحالة", "التقدم", "الموعد"], rows)
    }

    fn row_cells(&self, row: &RowView) -> Vec<String> {
        let due = row
            .due_label
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let due = if row.due_label.as_ref().is_some_and(|label| label.is_overdue()) {
            self.paint(&due, "31")
        } else {
            due
        };
        let status = if row.overdue {
            self.paint(&row.badge.label, "31")
        } else {
            row.badge.label.clone()
        };

        vec![
            row.name.clone(),
            row.context.clone(),
            row.owner.clone(),
            status,
            row.progress_width(),
            due,
        ]
    }

    pub fn write_next<W: Write>(&self, mut out: W, panel: &NextTaskPanel, tz: Tz) -> anyhow::Result<()> {
        writeln!(out, "{}", panel.title())?;
        writeln!(out, "{}", panel.description())?;
        writeln!(out, "{}", panel.status_text())?;
        if let Some(deadline) = panel.deadline() {
            writeln!(out, "{}", deadline.due.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"))?;
        }
        let [days, hours, minutes, seconds] = panel.parts().padded();
        let counter = format!("{days} يوم {hours}:{minutes}:{seconds}");
        writeln!(out, "{}", self.paint(&counter, "36"))?;
        Ok(())
    }

    pub fn write_issues<W: Write>(&self, mut out: W, issues: &[StatusIssue]) -> anyhow::Result<()> {
        if issues.is_empty() {
            writeln!(out, "{}", self.paint("ok: all record statuses are defined", "32"))?;
            return Ok(());
        }

        let rows = issues
            .iter()
            .map(|issue| {
                vec![
                    issue.section.to_string(),
                    issue.index.to_string(),
                    issue.name.clone(),
                    self.paint(&issue.status, "33"),
                ]
            })
            .collect();
        write_table(&mut out, &["section", "index", "name", "status"], rows)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_table<W: Write>(mut writer: W, headers: &[&str], rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(*header));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (idx, header) in headers.iter().enumerate() {
        write!(writer, "{:width$} ", header, width = widths[idx])?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, width) in widths.iter().enumerate() {
            let cell = row.get(idx).map(String::as_str).unwrap_or_default();
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
