//! `jenkee prompt` - Usage guide for automated agents

const GUIDE: &str = r#"# Jenkins Inspector (jenkee) - Agent Guide

## About jenkee

jenkee is a command-line front end for jenkins-cli. It lets you:
- explore the views and jobs of a Jenkins server
- read job configuration, build history and console output
- inspect credential metadata
- compare the configuration of two jobs
- copy, create and update jobs

## Step 1: verify authentication

```bash
jenkee auth
```

On success it prints:
```
Verifying authentication...
✓ Authenticated as: user@example.com
Authorities:
  authenticated
```

## Step 2: configure credentials if needed

If you see "Jenkins credentials not configured":

```bash
mkdir -p ~/.jenkins-inspector
cat > ~/.jenkins-inspector/.env << EOF
JENKINS_URL=http://your-jenkins-server:8080/
JENKINS_USER_ID=your_email@example.com
JENKINS_API_TOKEN=your_api_token
EOF
jenkee auth
```

The API token is created under Jenkins > User > Configure > API Token.

## Commands

```
auth                              Verify Jenkins authentication
list-views                        List all views
list-jobs <view> | --all          List jobs in a view, or every job
get-job <job>                     Print job XML configuration
job-status <job>                  Job status, health and trigger relations
list-builds <job>                 Build history of a job
console <job> [build]             Console output (default: lastBuild)
job-diff <job1> <job2>            Unified diff of two job configurations
list-credentials [domain]         Credential metadata
describe-credentials <id>         Details of one credential
add-job-to-view <view> <job>...   Add jobs to a view
copy-job <source> <dest>          Copy a job
create-job <job>                  Create a job from XML on stdin
update-job <job>                  Replace job XML from stdin
build <job> [-p K=V]... [-s] [-f] [-v]
                                  Trigger a build
stop-builds <job>...              Abort running builds
```

Run `jenkee <command> --help` for the options of each command.

## Commands that need confirmation

Ask the user before running any of these:

```
delete-job <job>...               Delete jobs (IRREVERSIBLE)
delete-builds <job> <N|N-M>       Delete build records (IRREVERSIBLE)
disable-job <job>...              Disable jobs
enable-job <job>...               Enable jobs
groovy [file]                     Run an arbitrary script on the server
```

`describe-credentials --show-secret` prints secret values. Only use it when
the user explicitly asks for the secret.

## Typical workflows

Explore and debug builds:
```bash
jenkee list-views
jenkee list-jobs <view>
jenkee job-status <job>
jenkee list-builds <job>
jenkee console <job> [build]
```

Compare environments and check credentials:
```bash
jenkee job-diff <job-staging> <job-production>
jenkee list-credentials
jenkee describe-credentials <credential-id>
```

Manage jobs:
```bash
jenkee copy-job <source-job> <new-job>
jenkee get-job <job> > job.xml
jenkee update-job <job> < job.xml
jenkee add-job-to-view <view> <job>
```

## Tips

1. Job and view names are case-sensitive.
2. `list-credentials` and `describe-credentials` accept `--format json|yaml`.
3. `job-diff` prints a standard unified diff.
4. `console` without a build number shows the latest build.
"#;

/// The agent guide
pub fn guide() -> String {
    GUIDE.to_string()
}
