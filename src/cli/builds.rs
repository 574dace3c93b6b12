//! Build commands: history, console, trigger, stop and delete

use super::{ensure_success, line, run_checked};
use anyhow::{Result, bail};
use jenkee::executor::JenkinsCli;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;

/// Build number or inclusive range accepted by `delete-builds`
static BUILD_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(-\d+)?$").unwrap());

const LIST_BUILDS: &str = r#"def job = jenkins.model.Jenkins.instance.getItemByFullName(args[0])
if (job) {
    job.builds.each { println it.number }
} else {
    println "ERROR: Job not found"
}
"#;

/// Options forwarded to `jenkins-cli build`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// `KEY=VALUE` parameters
    pub params: Vec<String>,
    /// Wait for completion (`-s`)
    pub sync: bool,
    /// Follow progress (`-f`)
    pub follow: bool,
    /// Print console output (`-v`)
    pub verbose: bool,
}

impl BuildOptions {
    fn cli_args(&self) -> Vec<&str> {
        let mut args = Vec::new();
        for param in &self.params {
            args.push("-p");
            args.push(param.as_str());
        }
        if self.sync {
            args.push("-s");
        }
        if self.follow {
            args.push("-f");
        }
        if self.verbose {
            args.push("-v");
        }
        args
    }
}

/// Validates a `KEY=VALUE` build parameter
pub fn parse_param(value: &str) -> Result<String, String> {
    match value.split_once('=') {
        Some((key, _)) if !key.trim().is_empty() => Ok(value.to_string()),
        _ => Err(format!("invalid parameter '{value}', expected KEY=VALUE")),
    }
}

/// Validates a build number `N` or range `N-M`
pub fn parse_range(value: &str) -> Result<String, String> {
    if BUILD_RANGE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "invalid build range '{value}', expected a number (123) or a range (100-150)"
        ))
    }
}

/// Lists the build numbers of a job, newest first
pub fn list_builds(cli: &dyn JenkinsCli, job: &str) -> Result<String> {
    let output = ensure_success(
        cli.run_groovy(LIST_BUILDS, &[job])?,
        format_args!("Failed to list builds for job '{job}'"),
    )?;

    let builds = output.stdout.trim();
    if builds.starts_with("ERROR:") {
        bail!("Job '{job}' not found");
    }
    if builds.is_empty() {
        return Ok(format!("No builds found for job '{job}'\n"));
    }
    Ok(line(builds))
}

/// Console output of one build
pub fn console(cli: &dyn JenkinsCli, job: &str, build: &str) -> Result<String> {
    let output = run_checked(
        cli,
        "console",
        &[job, build],
        None,
        format_args!("Failed to get console output for job '{job}' build {build}"),
    )?;
    Ok(output.stdout)
}

/// Triggers a build
pub fn build(cli: &dyn JenkinsCli, job: &str, options: &BuildOptions) -> Result<String> {
    let mut args = vec![job];
    args.extend(options.cli_args());
    tracing::debug!(job, params = options.params.len(), "Triggering build");

    let output = run_checked(
        cli,
        "build",
        &args,
        None,
        format_args!("Failed to build job '{job}'"),
    )?;

    let text = output.stdout.trim();
    if text.is_empty() {
        Ok(format!("✓ Build triggered for job '{job}'\n"))
    } else {
        Ok(line(text))
    }
}

/// Aborts all running builds of the given jobs
pub fn stop_builds(cli: &dyn JenkinsCli, jobs: &[String]) -> Result<String> {
    let args: Vec<&str> = jobs.iter().map(String::as_str).collect();
    let what = match jobs {
        [job] => format!("Failed to stop builds for job '{job}'"),
        _ => "Failed to stop builds for job(s)".to_string(),
    };
    let output = run_checked(cli, "stop-builds", &args, None, what)?;

    let mut text = line(output.stdout.trim());
    if let [job] = jobs {
        let _ = writeln!(text, "✓ Stopped all running builds for job '{job}'");
    } else {
        let _ = writeln!(text, "✓ Stopped all running builds for {} job(s)", jobs.len());
        for job in jobs {
            let _ = writeln!(text, "  - {job}");
        }
    }
    Ok(text)
}

/// Deletes build records in `range`
pub fn delete_builds(cli: &dyn JenkinsCli, job: &str, range: &str) -> Result<String> {
    let range = parse_range(range).map_err(anyhow::Error::msg)?;
    let output = run_checked(
        cli,
        "delete-builds",
        &[job, range.as_str()],
        None,
        format_args!("Failed to delete build(s) {range} for job '{job}'"),
    )?;

    let text = output.stdout.trim();
    if text.is_empty() {
        Ok(format!(
            "✓ Successfully deleted build(s) {range} for job '{job}'\n"
        ))
    } else {
        Ok(line(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jenkee::executor::{CliOutput, ScriptedCli};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("ENV=prod").unwrap(), "ENV=prod");
        assert_eq!(parse_param("URL=a=b").unwrap(), "URL=a=b");
        assert_eq!(parse_param("EMPTY=").unwrap(), "EMPTY=");
        assert!(parse_param("ENV").is_err());
        assert!(parse_param("=prod").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert!(parse_range("7").is_ok());
        assert!(parse_range("100-150").is_ok());
        assert!(parse_range("100-").is_err());
        assert!(parse_range("-5").is_err());
        assert!(parse_range("1,2").is_err());
    }

    #[test]
    fn test_build_forwards_options() {
        let cli = ScriptedCli::new().respond("build", CliOutput::success(""));
        let options = BuildOptions {
            params: vec!["ENV=prod".to_string()],
            sync: true,
            follow: false,
            verbose: true,
        };
        assert_eq!(
            build(&cli, "deploy", &options).unwrap(),
            "✓ Build triggered for job 'deploy'\n"
        );
        assert_eq!(cli.calls()[0].args, vec!["deploy", "-p", "ENV=prod", "-s", "-v"]);
    }

    #[test]
    fn test_build_prints_cli_output() {
        let cli = ScriptedCli::new().respond(
            "build",
            CliOutput::success("Started deploy #12\nCompleted deploy #12 : SUCCESS\n"),
        );
        let options = BuildOptions {
            sync: true,
            ..BuildOptions::default()
        };
        assert_eq!(
            build(&cli, "deploy", &options).unwrap(),
            "Started deploy #12\nCompleted deploy #12 : SUCCESS\n"
        );
    }

    #[test]
    fn test_list_builds() {
        let cli = ScriptedCli::new().respond("groovy", CliOutput::success("12\n11\n10\n"));
        assert_eq!(list_builds(&cli, "app").unwrap(), "12\n11\n10\n");
        assert_eq!(cli.calls()[0].args, vec!["=", "app"]);

        let empty = ScriptedCli::new().respond("groovy", CliOutput::success(""));
        assert_eq!(
            list_builds(&empty, "app").unwrap(),
            "No builds found for job 'app'\n"
        );

        let missing = ScriptedCli::new().respond("groovy", CliOutput::success("ERROR: Job not found\n"));
        assert_eq!(
            list_builds(&missing, "ghost").unwrap_err().to_string(),
            "Job 'ghost' not found"
        );
    }

    #[test]
    fn test_console_passes_build() {
        let cli = ScriptedCli::new().respond("console", CliOutput::success("Started by user\n"));
        assert_eq!(console(&cli, "app", "lastBuild").unwrap(), "Started by user\n");
        assert_eq!(cli.calls()[0].args, vec!["app", "lastBuild"]);
    }

    #[test]
    fn test_stop_builds_summary() {
        let cli = ScriptedCli::new().respond("stop-builds", CliOutput::success(""));
        assert_eq!(
            stop_builds(&cli, &["app".to_string()]).unwrap(),
            "✓ Stopped all running builds for job 'app'\n"
        );
        assert_eq!(
            stop_builds(&cli, &["a".to_string(), "b".to_string()]).unwrap(),
            "✓ Stopped all running builds for 2 job(s)\n  - a\n  - b\n"
        );
    }

    #[test]
    fn test_delete_builds() {
        let cli = ScriptedCli::new().respond("delete-builds", CliOutput::success(""));
        assert_eq!(
            delete_builds(&cli, "app", "3-5").unwrap(),
            "✓ Successfully deleted build(s) 3-5 for job 'app'\n"
        );
        assert!(delete_builds(&cli, "app", "all").is_err());
        assert_eq!(cli.call_count("delete-builds"), 1);
    }
}
