//! Job commands: listing, configuration, status, diff and bulk toggles

use super::{ensure_success, line, run_checked};
use anyhow::{Result, bail};
use jenkee::executor::JenkinsCli;
use similar::TextDiff;
use std::fmt::Write as _;

/// Prints status, health, permalinks and trigger relations of `args[0]`
const JOB_STATUS: &str = r#"def job = jenkins.model.Jenkins.instance.getItemByFullName(args[0])
if (!job) {
    println "ERROR: Job not found"
    return
}

println "=== Job: " + job.fullName + " ==="
println ""
println "Status: " + (job.disabled ? "DISABLED" : "ENABLED")
println "Buildable: " + job.buildable
println ""

if (job.buildHealth && job.buildHealth.score != null) {
    def health = job.buildHealth
    println "=== Health ==="
    println "Score: " + health.score + "%"
    println "Description: " + health.description
    println ""
}

println "=== Last Builds ==="
[
    "Last Build": job.lastBuild,
    "Last Stable Build": job.lastStableBuild,
    "Last Successful Build": job.lastSuccessfulBuild,
    "Last Failed Build": job.lastFailedBuild,
    "Last Unsuccessful Build": job.lastUnsuccessfulBuild,
    "Last Completed Build": job.lastCompletedBuild
].each { label, build ->
    if (build) {
        println label + ": #" + build.number
    }
}
println ""

println "=== Downstream Projects ==="
if (job.downstreamProjects) {
    job.downstreamProjects.each { println "  - " + it.fullName }
} else {
    println "  (none)"
}
println ""

println "=== Upstream Projects ==="
if (job.upstreamProjects) {
    job.upstreamProjects.each { println "  - " + it.fullName }
} else {
    println "  (none)"
}
"#;

/// Lists the jobs of `view`, or every job when `view` is `None`
pub fn list_jobs(cli: &dyn JenkinsCli, view: Option<&str>) -> Result<String> {
    let args: Vec<&str> = view.into_iter().collect();
    let what = match view {
        Some(view) => format!("Failed to list jobs in view '{view}'"),
        None => "Failed to list jobs".to_string(),
    };
    let output = run_checked(cli, "list-jobs", &args, None, what)?;

    let jobs = output.stdout.trim();
    if !jobs.is_empty() {
        return Ok(line(jobs));
    }
    Ok(match view {
        Some(view) => format!("No jobs found in view '{view}'\n"),
        None => "No jobs found\n".to_string(),
    })
}

/// Fetches the XML configuration of a job
pub fn get_job(cli: &dyn JenkinsCli, job: &str) -> Result<String> {
    let output = run_checked(
        cli,
        "get-job",
        &[job],
        None,
        format_args!("Failed to get config for job '{job}'"),
    )?;
    Ok(line(&output.stdout))
}

/// Reports a job's status and trigger relations
pub fn job_status(cli: &dyn JenkinsCli, job: &str) -> Result<String> {
    let output = ensure_success(
        cli.run_groovy(JOB_STATUS, &[job])?,
        format_args!("Failed to get status for job '{job}'"),
    )?;

    let report = output.stdout.trim();
    if report.starts_with("ERROR:") {
        bail!("Job '{job}' not found");
    }
    if report.is_empty() {
        bail!("Failed to get status for job '{job}'");
    }
    Ok(line(report))
}

/// Unified diff between the configurations of two jobs
pub fn job_diff(cli: &dyn JenkinsCli, first: &str, second: &str) -> Result<String> {
    let left = run_checked(
        cli,
        "get-job",
        &[first],
        None,
        format_args!("Failed to get job '{first}'"),
    )?;
    let right = run_checked(
        cli,
        "get-job",
        &[second],
        None,
        format_args!("Failed to get job '{second}'"),
    )?;

    if left.stdout == right.stdout {
        return Ok(format!(
            "No differences found between '{first}' and '{second}'\n"
        ));
    }

    Ok(line(
        &TextDiff::from_lines(left.stdout.as_str(), right.stdout.as_str())
            .unified_diff()
            .context_radius(3)
            .header(first, second)
            .to_string(),
    ))
}

/// Copies a job under a new name
pub fn copy_job(cli: &dyn JenkinsCli, source: &str, destination: &str) -> Result<String> {
    run_checked(
        cli,
        "copy-job",
        &[source, destination],
        None,
        format_args!("Failed to copy job '{source}' to '{destination}'"),
    )?;
    Ok(format!(
        "✓ Successfully copied job '{source}' to '{destination}'\n"
    ))
}

/// Creates a job from an XML configuration
pub fn create_job(cli: &dyn JenkinsCli, job: &str, xml: &str) -> Result<String> {
    run_checked(
        cli,
        "create-job",
        &[job],
        Some(xml),
        format_args!("Failed to create job '{job}'"),
    )?;
    Ok(format!("✓ Successfully created job '{job}'\n"))
}

/// Replaces a job's XML configuration
pub fn update_job(cli: &dyn JenkinsCli, job: &str, xml: &str) -> Result<String> {
    run_checked(
        cli,
        "update-job",
        &[job],
        Some(xml),
        format_args!("Failed to update job '{job}'"),
    )?;
    Ok(format!("✓ Successfully updated job '{job}'\n"))
}

/// Per-job operations that may partially fail
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BulkAction {
    /// `delete-job`
    Delete,
    /// `enable-job`
    Enable,
    /// `disable-job`
    Disable,
}

impl BulkAction {
    fn command(self) -> &'static str {
        match self {
            Self::Delete => "delete-job",
            Self::Enable => "enable-job",
            Self::Disable => "disable-job",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Self::Delete => "deleted",
            Self::Enable => "enabled",
            Self::Disable => "disabled",
        }
    }
}

/// Runs `action` once per job; fails if any job failed
pub fn bulk(cli: &dyn JenkinsCli, action: BulkAction, jobs: &[String]) -> Result<String> {
    let mut failures = String::new();
    let mut failed = 0;

    for job in jobs {
        let output = cli.run(action.command(), &[job.as_str()], None)?;
        if output.is_success() {
            tracing::info!(job = %job, action = action.verb(), "Job updated");
            continue;
        }
        failed += 1;
        let _ = writeln!(failures, "Failed to {} job '{job}'", action.verb());
        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            let _ = writeln!(failures, "{stderr}");
        }
    }

    if failed > 0 {
        if failed < jobs.len() {
            let _ = writeln!(
                failures,
                "Warning: {} job(s) {}, {failed} failed",
                jobs.len() - failed,
                action.past()
            );
        }
        bail!("{}", failures.trim_end());
    }

    if let [job] = jobs {
        return Ok(format!("✓ Successfully {} job '{job}'\n", action.past()));
    }
    let mut text = format!("✓ Successfully {} {} job(s)\n", action.past(), jobs.len());
    for job in jobs {
        let _ = writeln!(text, "  - {job}");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jenkee::executor::{CliOutput, ScriptedCli};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_jobs_in_view() {
        let cli = ScriptedCli::new().respond("list-jobs", CliOutput::success("api\nweb\n"));
        assert_eq!(list_jobs(&cli, Some("Backend")).unwrap(), "api\nweb\n");
        assert_eq!(cli.calls()[0].args, vec!["Backend"]);
    }

    #[test]
    fn test_list_jobs_empty() {
        let cli = ScriptedCli::new().respond("list-jobs", CliOutput::success("\n"));
        assert_eq!(
            list_jobs(&cli, Some("Empty")).unwrap(),
            "No jobs found in view 'Empty'\n"
        );
        assert_eq!(list_jobs(&cli, None).unwrap(), "No jobs found\n");
        assert!(cli.calls()[1].args.is_empty());
    }

    #[test]
    fn test_job_status_passes_name_as_argument() {
        let cli = ScriptedCli::new().respond(
            "groovy",
            CliOutput::success("=== Job: it's ===\n\nStatus: ENABLED\n"),
        );
        let text = job_status(&cli, "it's").unwrap();
        assert!(text.starts_with("=== Job: it's ==="));

        let call = &cli.calls()[0];
        assert_eq!(call.args, vec!["=", "it's"]);
        assert!(!call.stdin.as_deref().unwrap().contains("it's"));
    }

    #[test]
    fn test_job_status_not_found() {
        let cli = ScriptedCli::new().respond("groovy", CliOutput::success("ERROR: Job not found\n"));
        let err = job_status(&cli, "ghost").unwrap_err();
        assert_eq!(err.to_string(), "Job 'ghost' not found");
    }

    #[test]
    fn test_job_diff_identical() {
        let cli = ScriptedCli::new().respond("get-job", CliOutput::success("<project/>\n"));
        assert_eq!(
            job_diff(&cli, "a", "b").unwrap(),
            "No differences found between 'a' and 'b'\n"
        );
    }

    #[test]
    fn test_job_diff_unified() {
        let cli = ScriptedCli::new()
            .respond("get-job", CliOutput::success("<project>\n  <disabled>false</disabled>\n</project>\n"))
            .respond("get-job", CliOutput::success("<project>\n  <disabled>true</disabled>\n</project>\n"));
        let diff = job_diff(&cli, "staging", "prod").unwrap();

        assert!(diff.starts_with("--- staging\n+++ prod\n"));
        assert!(diff.contains("-  <disabled>false</disabled>\n"));
        assert!(diff.contains("+  <disabled>true</disabled>\n"));
    }

    #[test]
    fn test_job_diff_reports_missing_job() {
        let cli = ScriptedCli::new().respond("get-job", CliOutput::failure(3, "No such job 'x'"));
        let err = job_diff(&cli, "x", "y").unwrap_err();
        assert_eq!(err.to_string(), "Failed to get job 'x'\nNo such job 'x'");
    }

    #[test]
    fn test_create_job_sends_xml_on_stdin() {
        let cli = ScriptedCli::new().respond("create-job", CliOutput::success(""));
        let text = create_job(&cli, "new", "<project/>").unwrap();
        assert_eq!(text, "✓ Successfully created job 'new'\n");
        assert_eq!(cli.calls()[0].stdin.as_deref(), Some("<project/>"));
    }

    #[test]
    fn test_bulk_all_succeed() {
        let cli = ScriptedCli::new().respond("disable-job", CliOutput::success(""));
        let one = bulk(&cli, BulkAction::Disable, &["api".to_string()]).unwrap();
        assert_eq!(one, "✓ Successfully disabled job 'api'\n");

        let many = bulk(&cli, BulkAction::Disable, &["api".to_string(), "web".to_string()]).unwrap();
        assert_eq!(many, "✓ Successfully disabled 2 job(s)\n  - api\n  - web\n");
        assert_eq!(cli.call_count("disable-job"), 3);
    }

    #[test]
    fn test_bulk_partial_failure() {
        let cli = ScriptedCli::new()
            .respond("delete-job", CliOutput::success(""))
            .respond("delete-job", CliOutput::failure(3, "No such job 'ghost'"));
        let err = bulk(&cli, BulkAction::Delete, &["api".to_string(), "ghost".to_string()])
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to delete job 'ghost'\nNo such job 'ghost'\nWarning: 1 job(s) deleted, 1 failed"
        );
        assert_eq!(cli.call_count("delete-job"), 2);
    }
}
