use std::fmt::Write;

use prebundle_core::PackageDescriptor;
use prebundle_operations::{ChangeDirection, DiffResult, RebuildPlan};

use super::CheckFormatter;

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn section(output: &mut String, title: &str, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let _ = writeln!(output, "{title} ({}):", lines.len());
        for line in lines {
            let _ = writeln!(output, "  {line}");
        }
    }

    fn describe(descriptor: &PackageDescriptor) -> String {
        format!(
            "{} {} [{}]",
            descriptor.name,
            descriptor.version().unwrap_or("?"),
            descriptor.bundle
        )
    }
}

impl CheckFormatter for PlainTextFormatter {
    fn format_plan(&self, plan: &RebuildPlan) -> String {
        if plan.is_empty() {
            return "All bundles are up to date.\n".to_string();
        }

        let mut output = String::new();
        let _ = writeln!(output, "Bundles needing rebuild: {}", plan.len());
        for bundle in &plan.bundles {
            let _ = writeln!(output, "  {}", bundle.name());
            for reason in &bundle.reasons {
                let _ = writeln!(output, "    - {reason}");
            }
        }
        output
    }

    fn format_diff(&self, diff: &DiffResult) -> String {
        let mut output = String::new();

        let current: Vec<_> = diff.current.iter().map(Self::describe).collect();
        Self::section(&mut output, "Current", &current);

        let changed: Vec<_> = diff
            .changed
            .iter()
            .map(|c| {
                let direction = match c.direction() {
                    ChangeDirection::Upgrade => " (upgrade)",
                    ChangeDirection::Downgrade => " (downgrade)",
                    ChangeDirection::Unknown => "",
                };
                format!(
                    "{} {} -> {} [{}]{direction}",
                    c.descriptor.name,
                    c.previous_version,
                    c.current_version(),
                    c.descriptor.bundle
                )
            })
            .collect();
        Self::section(&mut output, "Changed", &changed);

        let added: Vec<_> = diff.added.iter().map(Self::describe).collect();
        Self::section(&mut output, "Added", &added);

        let removed: Vec<_> = diff
            .removed
            .iter()
            .map(|r| format!("{} [{}]", r.name, r.bundle))
            .collect();
        Self::section(&mut output, "Removed", &removed);

        let errored: Vec<_> = diff
            .errored
            .iter()
            .map(|d| {
                let reason = d.error().map(ToString::to_string).unwrap_or_default();
                format!("{} [{}]: {reason}", d.name, d.bundle)
            })
            .collect();
        Self::section(&mut output, "Errored", &errored);

        if output.is_empty() {
            output.push_str("No packages configured.\n");
        }
        output
    }
}
