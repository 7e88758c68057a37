//! Console output formatter for catalogs and tool results

use crate::output::formatter::OutputFormatter;
use atlas_domain::tool::{entities::ToolDescriptor, value_objects::ToolResult};
use colored::Colorize;
use std::collections::BTreeMap;

/// Formats gateway output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the tool catalog as a table
    pub fn format_catalog(tools: &[ToolDescriptor]) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Tool Catalog"));
        output.push('\n');

        if tools.is_empty() {
            output.push_str(&format!("\n{}\n", "No tools registered".dimmed()));
            output.push_str(&Self::footer());
            return output;
        }

        let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for tool in tools {
            output.push_str(&format!(
                "\n{}  {}\n",
                format!("{:<width$}", tool.name).yellow().bold(),
                tool.description
            ));

            for (name, property) in &tool.input_schema.properties {
                let marker = if tool.input_schema.is_required(name) {
                    "*".red().to_string()
                } else {
                    " ".to_string()
                };
                output.push_str(&format!(
                    "{:width$}  {}{} {} {}\n",
                    "",
                    marker,
                    name.cyan(),
                    format!("<{}>", property.schema_type.as_str()).dimmed(),
                    property.description,
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// One-line summary: totals and tools per provider
    pub fn format_summary(total_tools: usize, tools_per_provider: &BTreeMap<String, usize>) -> String {
        let breakdown = tools_per_provider
            .iter()
            .map(|(id, count)| format!("{}: {}", id, count))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} {} tools from {} providers ({})",
            "Summary:".cyan().bold(),
            total_tools,
            tools_per_provider.len(),
            breakdown
        )
    }

    /// One configuration source line for `show-config`
    pub fn format_source(label: &str, location: &str, found: bool) -> String {
        if found {
            format!("  {} {:<8} {}", "[FOUND]".green(), label, location)
        } else {
            format!("  {} {:<8} {}", "[     ]".dimmed(), label, location)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, name: &str, result: &ToolResult) -> String {
        let status = if result.is_error {
            format!("✗ {}", name).red().bold()
        } else {
            format!("✓ {}", name).green().bold()
        };
        format!("{}\n{}", status, Self::indent(&result.to_message_text(), "  "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_domain::tool::schema::{InputSchema, SchemaType};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_catalog_lists_tools_and_arguments() {
        plain();
        let tools = vec![
            ToolDescriptor::new("places_search", "[places] Find places").with_schema(
                InputSchema::object()
                    .required_property("query", SchemaType::String, "What to find")
                    .property("limit", SchemaType::Integer, "Max results"),
            ),
            ToolDescriptor::new("favorites_list", "[favorites] List saved places"),
        ];

        let output = ConsoleFormatter::format_catalog(&tools);
        assert!(output.contains("places_search"));
        assert!(output.contains("*query <string> What to find"));
        assert!(output.contains(" limit <integer> Max results"));
        assert!(output.contains("favorites_list"));
    }

    #[test]
    fn test_empty_catalog() {
        plain();
        assert!(ConsoleFormatter::format_catalog(&[]).contains("No tools registered"));
    }

    #[test]
    fn test_result_status() {
        plain();
        let ok = ConsoleFormatter.format_result("places_search", &ToolResult::text("line 1\nline 2"));
        assert_eq!(ok, "✓ places_search\n  line 1\n  line 2");

        let err = ConsoleFormatter.format_result("favorites_add", &ToolResult::error("full"));
        assert!(err.starts_with("✗ favorites_add"));
    }

    #[test]
    fn test_summary() {
        plain();
        let mut per_provider = BTreeMap::new();
        per_provider.insert("favorites".to_string(), 3);
        per_provider.insert("places".to_string(), 1);

        let summary = ConsoleFormatter::format_summary(4, &per_provider);
        assert!(summary.ends_with("4 tools from 2 providers (favorites: 3, places: 1)"));
    }
}
