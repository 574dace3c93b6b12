//! `jenkee groovy` - Execute a Groovy script on the server
//!
//! The script has full access to the Jenkins object model, so the agent
//! guide lists this command among those that need confirmation.

use super::ensure_success;
use anyhow::Result;
use jenkee::executor::JenkinsCli;

/// Runs `script` through the script console and returns its stdout
pub fn run_script(cli: &dyn JenkinsCli, script: &str) -> Result<String> {
    tracing::debug!(bytes = script.len(), "Running Groovy script");
    let output = ensure_success(cli.run_groovy(script, &[])?, "Failed to execute Groovy script")?;
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jenkee::executor::{CliOutput, ScriptedCli};

    #[test]
    fn test_script_goes_to_stdin() {
        let cli = ScriptedCli::new().respond("groovy", CliOutput::success("hi\n"));
        assert_eq!(run_script(&cli, "println 'hi'").unwrap(), "hi\n");

        let call = &cli.calls()[0];
        assert_eq!(call.args, vec!["="]);
        assert_eq!(call.stdin.as_deref(), Some("println 'hi'"));
    }

    #[test]
    fn test_script_failure() {
        let cli = ScriptedCli::new().respond(
            "groovy",
            CliOutput::failure(1, "groovy.lang.MissingPropertyException: No such property: x"),
        );
        let err = run_script(&cli, "println x").unwrap_err();
        assert!(err.to_string().starts_with("Failed to execute Groovy script\n"));
    }
}
