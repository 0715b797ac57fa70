//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::Term;
use keg_ops::{InstallReport, OperationResult};
use keg_types::ColorChoice;
use std::io;
use std::time::Duration;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_table(result)
        }
    }

    /// Check if color output is supported
    pub fn colors_enabled(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }

    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    fn render_table(&self, result: &OperationResult) -> io::Result<()> {
        match result {
            OperationResult::InstallReport(report) => self.render_install_report(report),
        }
    }

    fn render_install_report(&self, report: &InstallReport) -> io::Result<()> {
        // Already-attempted formulae are deliberately absent from the summary
        if report.installed.is_empty() && report.failed.is_empty() {
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Formula").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Details").add_attribute(Attribute::Bold),
        ]);

        for name in &report.installed {
            table.add_row(vec![
                Cell::new(name),
                self.status_cell("Installed", Color::Green),
                Cell::new("-"),
            ]);
        }
        for failure in &report.failed {
            table.add_row(vec![
                Cell::new(&failure.name),
                self.status_cell("Failed", Color::Red),
                Cell::new(&failure.message),
            ]);
        }

        println!();
        println!("{table}");
        println!(
            "{} installed, {} failed in {:.2}s",
            report.installed.len(),
            report.failed.len(),
            Duration::from_millis(report.duration_ms).as_secs_f64()
        );
        Ok(())
    }

    fn status_cell(&self, label: &str, color: Color) -> Cell {
        if self.colors_enabled() {
            Cell::new(label).fg(color)
        } else {
            Cell::new(label)
        }
    }
}
