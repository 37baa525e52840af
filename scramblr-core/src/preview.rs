use crate::plan::RenamePlan;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::{Color as AnsiColor, Style};
use std::fmt::Write;
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

pub fn render_plan(plan: &RenamePlan, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);
    match format {
        Preview::Table => render_table(plan, use_color),
        Preview::Summary => render_summary(plan, use_color),
        Preview::None => String::new(),
    }
}

/// One row per file, in final index order.
pub fn render_table(plan: &RenamePlan, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Current").fg(Color::Cyan),
            Cell::new("New").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Current", "New"]);
    }

    for rename in plan.in_final_order() {
        table.add_row(vec![
            Cell::new(rename.index),
            Cell::new(&rename.original_name),
            Cell::new(&rename.final_name),
        ]);
    }

    let mut output = table.to_string();
    write!(
        output,
        "\n{} image files in {}",
        plan.len(),
        plan.directory.display()
    )
    .unwrap();
    output
}

/// Plain `current -> new` lines.
pub fn render_summary(plan: &RenamePlan, use_color: bool) -> String {
    let mut output = String::new();

    writeln!(output, "[PLAN]").unwrap();
    writeln!(output, "Directory: {}", plan.directory.display()).unwrap();
    writeln!(output, "Prefix: {}", plan.prefix).unwrap();
    writeln!(output, "Files: {}", plan.len()).unwrap();

    for rename in plan.in_final_order() {
        if use_color {
            writeln!(
                output,
                "{} -> {}",
                AnsiColor::Red.paint(rename.original_name.as_str()),
                Style::new().bold().fg(AnsiColor::Green).paint(rename.final_name.as_str())
            )
            .unwrap();
        } else {
            writeln!(output, "{} -> {}", rename.original_name, rename.final_name).unwrap();
        }
    }

    output
}
