use std::fmt::Write as _;

use dropzone_core::{
    AppViewModel, ListSection, Phase, RenderBlock, Severity, TableDescriptor, UploadStage,
};

/// Projects a view onto terminal text. Progress, success and error lines are
/// mutually exclusive; result blocks follow a success line.
pub fn render_view(view: &AppViewModel) -> String {
    let mut out = String::new();
    match view.phase {
        Phase::Idle => {}
        Phase::Uploading => {
            if let Some(line) = progress_line(view) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        Phase::Succeeded => {
            if let Some(message) = &view.success_message {
                let _ = writeln!(out, "[success] {message}");
            }
        }
        Phase::Failed => {
            if let Some(message) = &view.error_message {
                let _ = writeln!(out, "[error] {message}");
            }
        }
    }
    if !view.blocks.is_empty() {
        out.push('\n');
        out.push_str(&render_blocks(&view.blocks));
    }
    out
}

pub fn progress_line(view: &AppViewModel) -> Option<String> {
    let progress = view.progress.as_ref()?;
    let line = match (progress.stage, progress.bytes) {
        (Some(stage), Some(bytes)) => format!(
            "{} {} ({}, {bytes} bytes)",
            progress.label,
            progress.file_name,
            stage_label(stage)
        ),
        (Some(stage), None) => format!(
            "{} {} ({})",
            progress.label,
            progress.file_name,
            stage_label(stage)
        ),
        (None, _) => format!("{} {}", progress.label, progress.file_name),
    };
    Some(line)
}

pub fn render_blocks(blocks: &[RenderBlock]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &RenderBlock) -> String {
    match block {
        RenderBlock::Heading { text } => format!("## {text}\n"),
        RenderBlock::Table(table) => render_table(table),
        RenderBlock::ListGroup { title, sections } => render_list_group(title, sections),
        RenderBlock::Notice { severity, text } => {
            format!("[{}] {text}\n", severity_label(*severity))
        }
    }
}

fn render_table(table: &TableDescriptor) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .map(|column| row.get(column).map(|v| v.to_string()).unwrap_or_default())
                .map(|text| sanitize_cell(&text))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            cells
                .iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
                .max(3)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = table.columns.iter().map(|c| sanitize_cell(c)).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        let _ = write!(out, " {cell}{} |", " ".repeat(pad));
    }
    out.push('\n');
}

fn sanitize_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn render_list_group(title: &str, sections: &[ListSection]) -> String {
    let mut out = format!("## {title}\n");
    for section in sections {
        let _ = writeln!(out, "### {}", section.label);
        for item in &section.items {
            let _ = writeln!(out, "- {item}");
        }
    }
    out
}

fn stage_label(stage: UploadStage) -> &'static str {
    match stage {
        UploadStage::Reading => "reading",
        UploadStage::Sending => "sending",
        UploadStage::Receiving => "receiving",
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warning",
    }
}
