use bookshelf::commands::{CmdData, CmdResult};
use bookshelf::model::BookRecord;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 40;
const AUTHOR_WIDTH: usize = 28;
const COLUMN_GAP: &str = "  ";

pub(crate) fn print_result(result: &CmdResult) {
    if !result.success {
        print_error(&result.message);
        return;
    }

    println!("{}", result.message.green());

    match &result.data {
        Some(CmdData::Books(records)) if !records.is_empty() => {
            println!();
            print_table(records);
        }
        Some(CmdData::Book(record)) => {
            println!();
            print_fields(record);
        }
        _ => {}
    }
}

pub(crate) fn print_error(message: &str) {
    eprintln!("{}", format!("Error: {}", message).red());
}

fn print_table(records: &[BookRecord]) {
    let formatter = Formatter::new();
    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|r| {
            [
                r.id.clone(),
                truncate_to_width(&r.title, TITLE_WIDTH),
                truncate_to_width(&r.author, AUTHOR_WIDTH),
                r.year.to_string(),
                r.status.clone(),
                time_ago(&formatter, &r.updated_at),
            ]
        })
        .collect();

    let headers = ["ID", "Title", "Author", "Year", "Status", "Updated"];
    let mut widths = headers.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w))
        .collect();
    println!("{}", header_line.join(COLUMN_GAP).bold().magenta());

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, *w);
                if i == 4 {
                    status_colored(cell, &padded).to_string()
                } else {
                    padded
                }
            })
            .collect();
        println!("{}", cells.join(COLUMN_GAP).trim_end());
    }
}

fn print_fields(record: &BookRecord) {
    let fields = [
        ("Id", record.id.clone()),
        ("Title", record.title.clone()),
        ("Author", record.author.clone()),
        ("Year", record.year.to_string()),
        ("Status", record.status.clone()),
        ("Created At", format_timestamp(&record.created_at)),
        ("Updated At", format_timestamp(&record.updated_at)),
    ];
    let label_width = fields.iter().map(|(label, _)| label.width()).max().unwrap_or(0);

    for (label, value) in &fields {
        let value = if *label == "Status" {
            status_colored(value, value)
        } else {
            value.normal()
        };
        println!("{}{}{}", pad(label, label_width).bold().blue(), COLUMN_GAP, value);
    }
}

fn status_colored(status: &str, text: &str) -> ColoredString {
    if status == "available" {
        text.green()
    } else {
        text.yellow()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn time_ago(formatter: &Formatter, raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => {
            let elapsed = Utc::now().signed_duration_since(ts);
            formatter.convert(elapsed.to_std().unwrap_or_default())
        }
        None => raw.to_string(),
    }
}

fn pad(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
