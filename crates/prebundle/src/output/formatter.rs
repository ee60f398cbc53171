use prebundle_operations::{DiffResult, RebuildPlan};

pub(crate) trait CheckFormatter {
    fn format_plan(&self, plan: &RebuildPlan) -> String;
    fn format_diff(&self, diff: &DiffResult) -> String;
}
