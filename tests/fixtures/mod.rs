use jenkee::prelude::*;

pub const STORE: &str = "system::system::jenkins";

pub const LISTING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<list-credentials-as-xml>
  <com.cloudbees.plugins.credentials.domains.DomainCredentials>
    <domain>
      <specifications/>
    </domain>
    <credentials>
      <org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl>
        <scope>GLOBAL</scope>
        <id>f1</id>
        <fileName>deploy.pem</fileName>
        <secretBytes>
          <secret-redacted/>
        </secretBytes>
      </org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl>
      <org.jenkinsci.plugins.plaincredentials.impl.StringCredentialsImpl>
        <scope>GLOBAL</scope>
        <id>slack-token</id>
        <description>Slack notifier</description>
        <secret>
          <secret-redacted/>
        </secret>
      </org.jenkinsci.plugins.plaincredentials.impl.StringCredentialsImpl>
      <com.browserstack.automate.ci.jenkins.BrowserStackCredentials>
        <scope>GLOBAL</scope>
        <id>bstack</id>
        <username>qa-team</username>
        <accesskey>
          <secret-redacted/>
        </accesskey>
      </com.browserstack.automate.ci.jenkins.BrowserStackCredentials>
    </credentials>
  </com.cloudbees.plugins.credentials.domains.DomainCredentials>
  <com.cloudbees.plugins.credentials.domains.DomainCredentials>
    <domain>
      <name>git</name>
      <description>SCM access</description>
    </domain>
    <credentials>
      <com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey>
        <scope>GLOBAL</scope>
        <id>git-ssh</id>
        <username>git</username>
        <privateKeySource class="com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey$DirectEntryPrivateKeySource">
          <privateKey>
            <secret-redacted/>
          </privateKey>
        </privateKeySource>
      </com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey>
      <com.google.jenkins.plugins.credentials.oauth.GoogleRobotPrivateKeyCredentials>
        <scope>GLOBAL</scope>
        <id>gcp-prod</id>
        <projectId>prod-123</projectId>
      </com.google.jenkins.plugins.credentials.oauth.GoogleRobotPrivateKeyCredentials>
    </credentials>
  </com.cloudbees.plugins.credentials.domains.DomainCredentials>
</list-credentials-as-xml>
"#;

pub fn scripted_cli() -> ScriptedCli {
    ScriptedCli::new().respond("list-credentials-as-xml", CliOutput::success(LISTING))
}
