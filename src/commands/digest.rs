use crate::client::GitHubClient;
use crate::config::Config;
use crate::credentials;
use crate::error::Result;
use crate::output::{self, RenderOptions};
use crate::pipeline::{classify, listing, scope, viewer};
use crate::request::RequestDescriptor;
use crate::types::DetailedPullRequest;

/// Run a full digest and print it. Nothing is printed if any step fails.
pub async fn run(
    config: &Config,
    descriptor: &RequestDescriptor,
    render: &RenderOptions<'_>,
) -> Result<()> {
    let token = credentials::resolve_token(&descriptor.token_env_var)?;
    let client = GitHubClient::with_base_url(token, &config.api_base_url)?;

    let pull_requests = collect(&client, config, descriptor).await?;
    output::print_report(&pull_requests, render)
}

/// Quota guard, scope resolution, listing, then classification/enrichment.
pub async fn collect(
    client: &GitHubClient,
    config: &Config,
    descriptor: &RequestDescriptor,
) -> Result<Vec<DetailedPullRequest>> {
    let viewer = viewer::resolve_viewer(client, config.rate).await?;
    tracing::debug!(login = %viewer.login, rate = ?viewer.rate, "resolved viewer");

    let groups = scope::resolve_scope(client, descriptor, &viewer).await?;
    let targets = scope::flatten(&groups);

    let raw = listing::list_pull_requests(client, &targets, descriptor.state).await?;
    tracing::debug!(
        repositories = targets.len(),
        pull_requests = raw.len(),
        "listing complete"
    );

    classify::enrich(client, raw, &viewer).await
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::RateConfig;
    use crate::error::DigestError;
    use crate::request::StateFilter;
    use crate::types::RelationshipClass;

    fn config_for(server: &MockServer) -> Config {
        Config {
            api_base_url: server.uri(),
            ..Config::default()
        }
    }

    fn descriptor(repo: &str) -> RequestDescriptor {
        RequestDescriptor::from_args(repo, StateFilter::Open, false, None, "GITHUB_TOKEN")
            .unwrap()
    }

    async fn mount_user(server: &MockServer, remaining: &str) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "login": "octocat" }))
                    .insert_header("x-ratelimit-limit", "5000")
                    .insert_header("x-ratelimit-remaining", remaining),
            )
            .mount(server)
            .await;
    }

    fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::with_base_url("t".to_string(), &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_single_authored_pull_request_scenario() {
        let server = MockServer::start().await;
        mount_user(&server, "4999").await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "a", "owner": { "login": "octocat" } },
                { "name": "b", "owner": { "login": "octocat" } }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/a/pulls"))
            .and(query_param("state", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "number": 1,
                "title": "Add feature",
                "html_url": "https://github.com/octocat/a/pull/1",
                "state": "open",
                "user": { "login": "octocat" },
                "requested_reviewers": [],
                "base": { "repo": { "name": "a", "owner": { "login": "octocat" } } },
                "head": { "sha": "abc" }
            }, {
                "number": 2,
                "title": "Someone else's work",
                "state": "open",
                "user": { "login": "hubot" },
                "base": { "repo": { "name": "a", "owner": { "login": "octocat" } } },
                "head": { "sha": "def" }
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/b/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/a/commits/abc/status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "state": "success" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/a/commits/def/status"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let report = collect(&client(&server), &config_for(&server), &descriptor("all"))
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].number, 1);
        assert_eq!(report[0].condition, RelationshipClass::Author);
        assert_eq!(report[0].ci_cd_status, "success");

        let rendered = output::render_table(&report, config_for(&server).style, None);
        let footer = rendered.lines().find(|l| l.contains("Total")).unwrap();
        assert!(footer.contains(" 1 "));
    }

    #[tokio::test]
    async fn test_collaborator_repository_does_not_abort_report() {
        let server = MockServer::start().await;
        mount_user(&server, "4999").await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "a", "owner": { "login": "octocat" } },
                { "name": "theirs", "owner": { "login": "hubot" } }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/a/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "number": 4,
                "user": { "login": "octocat" }
            }])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/theirs/pulls"))
            .respond_with(ResponseTemplate::new(404))
            .expect(0)
            .mount(&server)
            .await;

        let report = collect(&client(&server), &config_for(&server), &descriptor("all"))
            .await
            .unwrap();

        let numbers: Vec<_> = report.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![4]);
    }

    #[tokio::test]
    async fn test_quota_exceeded_queries_no_repository() {
        let server = MockServer::start().await;
        mount_user(&server, "3").await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let config = Config {
            rate: RateConfig::Fixed(100),
            ..config_for(&server)
        };
        let err = collect(&client(&server), &config, &descriptor("all"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DigestError::QuotaExceeded {
                remaining: 3,
                threshold: 100,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_repository_fails_before_listing() {
        let server = MockServer::start().await;
        mount_user(&server, "4999").await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/myrepo"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/myrepo/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let err = collect(&client(&server), &config_for(&server), &descriptor("myrepo"))
            .await
            .unwrap_err();

        assert!(matches!(err, DigestError::RepositoryNotFound { .. }));
        assert!(err.to_string().contains("myrepo"));
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let server = MockServer::start().await;
        mount_user(&server, "4999").await;
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "name": "a", "owner": { "login": "octocat" } },
                { "name": "b", "owner": { "login": "octocat" } },
                { "name": "c", "owner": { "login": "octocat" } }
            ])))
            .mount(&server)
            .await;
        for (repo, number) in [("a", 1), ("b", 2), ("c", 3)] {
            Mock::given(method("GET"))
                .and(path(format!("/repos/octocat/{repo}/pulls")))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                    "number": number,
                    "assignee": { "login": "octocat" }
                }])))
                .mount(&server)
                .await;
        }

        let client = client(&server);
        let config = config_for(&server);
        let first = collect(&client, &config, &descriptor("all")).await.unwrap();
        let second = collect(&client, &config, &descriptor("all")).await.unwrap();

        assert_eq!(first, second);
        let numbers: Vec<_> = first.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(first
            .iter()
            .all(|pr| pr.condition == RelationshipClass::Assignee && pr.ci_cd_status == "N/A"));
    }

    #[tokio::test]
    async fn test_run_without_token_makes_no_request() {
        let server = MockServer::start().await;
        let descriptor = RequestDescriptor::from_args(
            "all",
            StateFilter::Open,
            false,
            None,
            "GH_DIGEST_TEST_UNSET_TOKEN",
        )
        .unwrap();
        let render = RenderOptions {
            style: Default::default(),
            title: None,
            json: false,
        };

        let err = run(&config_for(&server), &descriptor, &render)
            .await
            .unwrap_err();

        assert!(matches!(err, DigestError::TokenNotSet(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
