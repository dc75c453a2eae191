//! Pack command: bundles the plugin file and its build directory.

use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use plugzip_core::ArchiveTask;
use plugzip_core::create_archive_with_progress;

pub fn execute(formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let task = ArchiveTask::default();
    run(&task, formatter, show_progress)
}

fn run(task: &ArchiveTask, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let report = {
        let mut progress = CliProgress::new(formatter, show_progress);
        add_pack_context(create_archive_with_progress(task, &mut progress))?
    };

    formatter.format_pack_result(&report)
}
