//! `jenkee list-views` and `jenkee add-job-to-view`

use super::{ensure_success, line, run_checked};
use anyhow::Result;
use jenkee::executor::JenkinsCli;
use std::fmt::Write as _;

const LIST_VIEWS: &str = r"println jenkins.model.Jenkins.instance.views*.name.sort().join('\n')";

/// Lists view names, sorted
pub fn list_views(cli: &dyn JenkinsCli) -> Result<String> {
    let output = ensure_success(cli.run_groovy(LIST_VIEWS, &[])?, "Failed to list views")?;
    Ok(line(output.stdout.trim()))
}

/// Adds jobs to a view
pub fn add_job_to_view(cli: &dyn JenkinsCli, view: &str, jobs: &[String]) -> Result<String> {
    let mut args = vec![view];
    args.extend(jobs.iter().map(String::as_str));
    run_checked(
        cli,
        "add-job-to-view",
        &args,
        None,
        format_args!("Failed to add jobs to view '{view}'"),
    )?;

    let mut text = format!(
        "✓ Successfully added {} job(s) to view '{view}'\n",
        jobs.len()
    );
    for job in jobs {
        let _ = writeln!(text, "  - {job}");
    }
    Ok(text)
}
