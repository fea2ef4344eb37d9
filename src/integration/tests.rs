//! Tests for integration lookup and group path parsing

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn integrations() -> ScmIntegrations {
    ScmIntegrations::new(vec![
        GitLabIntegrationConfig::new("gitlab.example.com").with_token("abc"),
        GitLabIntegrationConfig::new("code.internal:8443")
            .with_base_url("https://code.internal:8443/gitlab")
            .with_api_base_url("https://code.internal:8443/gitlab/api/v4/"),
    ])
}

// ============================================================================
// Integration Config Tests
// ============================================================================

#[test]
fn test_default_urls() {
    let config = GitLabIntegrationConfig::new("gitlab.example.com");
    assert_eq!(config.api_base_url(), "https://gitlab.example.com/api/v4");
    assert_eq!(config.base_url(), "https://gitlab.example.com");
    assert!(!config.is_saas());
    assert!(GitLabIntegrationConfig::saas().is_saas());
}

#[test]
fn test_explicit_urls_are_trimmed() {
    let config = GitLabIntegrationConfig::new("h")
        .with_api_base_url("https://h/api/v4/")
        .with_base_url("https://h/");
    assert_eq!(config.api_base_url(), "https://h/api/v4");
    assert_eq!(config.base_url(), "https://h");
}

#[test]
fn test_request_options_carry_token() {
    let config = GitLabIntegrationConfig::new("h").with_token("secret");
    let options = config.request_options();
    assert_eq!(
        options.headers.get("PRIVATE-TOKEN"),
        Some(&"secret".to_string())
    );

    let anonymous = GitLabIntegrationConfig::new("h");
    assert!(anonymous.request_options().headers.is_empty());
}

#[test]
fn test_request_options_layer_token_over_configured_headers() {
    let config = GitLabIntegrationConfig::new("h")
        .with_header("X-Proxy-Auth", "proxy")
        .with_header("PRIVATE-TOKEN", "stale")
        .with_token("secret");
    let options = config.request_options();

    assert_eq!(options.headers.len(), 2);
    assert_eq!(options.headers["X-Proxy-Auth"], "proxy");
    assert_eq!(options.headers["PRIVATE-TOKEN"], "secret");
    assert!(options.timeout.is_none());

    // Without a token the configured headers go out unchanged
    let anonymous = GitLabIntegrationConfig::new("h").with_header("X-Proxy-Auth", "proxy");
    assert_eq!(anonymous.request_options().headers.len(), 1);
}

#[test]
fn test_headers_from_yaml() {
    let config: GitLabIntegrationConfig =
        serde_yaml::from_str("host: h\nheaders:\n  X-Proxy-Auth: proxy\n").unwrap();
    assert_eq!(config.headers["X-Proxy-Auth"], "proxy");
    // Header values may be credentials; only names are shown
    let rendered = format!("{config:?}");
    assert!(rendered.contains("X-Proxy-Auth"));
    assert!(!rendered.contains("\"proxy\""));
}

#[test]
fn test_token_from_env() {
    let var = "PAGEWALK_TEST_TOKEN_FROM_ENV";
    std::env::set_var(var, "from-env");

    let mut config = GitLabIntegrationConfig::new("h");
    config.token_env = Some(var.to_string());
    assert_eq!(config.token(), Some("from-env".to_string()));

    // Explicit token wins
    config.token = Some("explicit".to_string());
    assert_eq!(config.token(), Some("explicit".to_string()));

    std::env::remove_var(var);
}

#[test]
fn test_debug_redacts_token() {
    let config = GitLabIntegrationConfig::new("h").with_token("super-secret");
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("***"));
}

// ============================================================================
// Resolver Tests
// ============================================================================

#[test]
fn test_resolve_by_host() {
    let integrations = integrations();

    let found = integrations
        .resolve("https://gitlab.example.com/groups/team")
        .unwrap();
    assert_eq!(found.host, "gitlab.example.com");

    let found = integrations
        .resolve("https://code.internal:8443/gitlab/team")
        .unwrap();
    assert_eq!(found.api_base_url(), "https://code.internal:8443/gitlab/api/v4");
}

#[test]
fn test_resolve_unknown_host() {
    let integrations = integrations();
    assert!(integrations.resolve("https://github.com/org").is_none());
    assert!(integrations.resolve("not a url").is_none());
    assert!(integrations.resolve("https://gitlab.com/team").is_none());
}

#[test]
fn test_saas_default() {
    let integrations = integrations().with_saas_default();
    assert!(integrations.resolve("https://gitlab.com/team").is_some());
    assert_eq!(integrations.gitlab.len(), 3);

    // Not added twice
    assert_eq!(integrations.with_saas_default().gitlab.len(), 3);
}

// ============================================================================
// Group Path Tests
// ============================================================================

#[test_case("https://gitlab.com", None ; "instance root")]
#[test_case("https://gitlab.com/", None ; "instance root with slash")]
#[test_case("https://gitlab.com/t%C3%ABam/sub", Some("tëam/sub") ; "encoded segment")]
#[test_case("https://gitlab.com/groups/tëam", Some("tëam") ; "unicode segment")]
#[test_case("https://gitlab.com/groups/a%20b", Some("a b") ; "encoded space")]
#[test_case("https://gitlab.com/teamA", Some("teamA") ; "top level group")]
#[test_case("https://gitlab.com/groups/teamA", Some("teamA") ; "groups prefix")]
#[test_case("https://gitlab.com/groups/teamA/sub/", Some("teamA/sub") ; "subgroup with slash")]
#[test_case("https://gitlab.com/teamA/sub/deeper", Some("teamA/sub/deeper") ; "nested subgroup")]
fn test_parse_group_path(url: &str, expected: Option<&str>) {
    let parsed = parse_group_path(url, "https://gitlab.com").unwrap();
    assert_eq!(parsed.as_deref(), expected);
}

#[test]
fn test_parse_group_path_with_base_path() {
    let base = "https://code.internal:8443/gitlab";
    assert_eq!(
        parse_group_path("https://code.internal:8443/gitlab", base).unwrap(),
        None
    );
    assert_eq!(
        parse_group_path("https://code.internal:8443/gitlab/groups/infra", base)
            .unwrap()
            .as_deref(),
        Some("infra")
    );

    let err = parse_group_path("https://code.internal:8443/gitlabx/infra", base).unwrap_err();
    assert!(err.is_configuration());
}

#[test_case("https://other.com/teamA" ; "different host")]
#[test_case("http://gitlab.com/teamA" ; "different scheme")]
#[test_case("https://gitlab.com:444/teamA" ; "different port")]
#[test_case("https://gitlab.com/teamA/project/-/issues" ; "project resource")]
#[test_case("https://gitlab.com/groups" ; "groups prefix without group")]
#[test_case("https://gitlab.com/groups/" ; "groups prefix with slash")]
#[test_case("https://gitlab.com/%FF" ; "invalid utf8 segment")]
#[test_case("not a url" ; "unparsable")]
fn test_parse_group_path_rejects(url: &str) {
    let err = parse_group_path(url, "https://gitlab.com").unwrap_err();
    assert!(err.is_configuration());
}
