/*!
 * Integration tests for provider API interactions against a mock HTTP server
 */

use anyhow::Result;
use httpmock::Method::POST;
use httpmock::MockServer;
use std::time::Duration;

use humanizer::app_config::ProviderKind;
use humanizer::errors::ProviderError;
use humanizer::providers::Provider;
use humanizer::providers::cohere::Cohere;
use humanizer::providers::gemini::Gemini;
use humanizer::providers::mistral::Mistral;
use humanizer::rewrite::{ProviderRewriter, StyleProfile, TextRewriter};

use crate::common::{self, cohere_body, gemini_body, mistral_body};

const GEMINI_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn gemini_rewriter(endpoint: &str, key: &str) -> ProviderRewriter<Gemini> {
    ProviderRewriter::new(
        Gemini::new(key, endpoint, "gemini-test"),
        &StyleProfile::for_provider(ProviderKind::Gemini),
    )
}

fn cohere_rewriter(endpoint: &str) -> ProviderRewriter<Cohere> {
    ProviderRewriter::new(
        Cohere::new("cohere-secret", endpoint, "command-r-plus-08-2024"),
        &StyleProfile::for_provider(ProviderKind::Cohere),
    )
}

fn mistral_rewriter(endpoint: &str) -> ProviderRewriter<Mistral> {
    ProviderRewriter::new(
        Mistral::new("mistral-secret", endpoint, "mistral-medium-2508"),
        &StyleProfile::for_provider(ProviderKind::Mistral),
    )
}

#[tokio::test]
async fn test_gemini_rewrite_shouldSendKeyAsQueryAndReadFirstPart() -> Result<()> {
    common::init_test_logger();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GEMINI_PATH)
                .query_param("key", "gemini-secret")
                .header("content-type", "application/json")
                .body_contains("Original sentence (4 words): We checked the results.\"")
                .body_contains("Your Role: Turn AI content into natural, readable text");
            then.status(200).json_body(gemini_body("The results were checked."));
        })
        .await;
    let rewriter = gemini_rewriter(&server.base_url(), "gemini-secret");

    let result = rewriter.rewrite("We checked the results.").await;
    assert_eq!(result, "The results were checked.");
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_cohere_rewrite_shouldUseBearerAuthAndChatShape() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v2/chat")
                .header("authorization", "Bearer cohere-secret")
                .header("content-type", "application/json")
                .body_contains(r#""model":"command-r-plus-08-2024""#)
                .body_contains(r#""role":"user""#)
                .body_contains("Original sentence (4 words): We made plans early.\"");
            then.status(200).json_body(cohere_body("\"Plans were made early.\""));
        })
        .await;
    let rewriter = cohere_rewriter(&server.base_url());

    assert_eq!(rewriter.rewrite("We made plans early.").await, "Plans were made early.");
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_mistral_rewrite_shouldReplaceEmDashes() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer mistral-secret")
                .body_contains(r#""model":"mistral-medium-2508""#)
                .body_contains("within 3-4 words max");
            then.status(200).json_body(mistral_body("It worked\u{2014}mostly."));
        })
        .await;
    let rewriter = mistral_rewriter(&server.base_url());

    assert_eq!(rewriter.rewrite("It mostly worked.").await, "It worked-mostly.");
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_rewrite_withUnauthorizedStatus_shouldFallBackToOriginal() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/chat");
            then.status(401).body(r#"{"message":"invalid api token"}"#);
        })
        .await;
    let rewriter = cohere_rewriter(&server.base_url());

    assert!(matches!(
        rewriter.try_rewrite("Keep this one.").await,
        Err(ProviderError::AuthenticationError(_))
    ));
    assert_eq!(rewriter.rewrite("Keep this one.").await, "Keep this one.");
    mock.assert_hits_async(2).await;
    Ok(())
}

#[tokio::test]
async fn test_rewrite_withRateLimit_shouldFallBackToOriginal() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429).body(r#"{"message":"Requests rate limit exceeded"}"#);
        })
        .await;
    let rewriter = mistral_rewriter(&server.base_url());

    assert!(matches!(
        rewriter.try_rewrite("Keep this one.").await,
        Err(ProviderError::RateLimitExceeded(_))
    ));
    assert_eq!(rewriter.rewrite("Keep this one.").await, "Keep this one.");
    Ok(())
}

#[tokio::test]
async fn test_rewrite_withMalformedJson_shouldFallBackToOriginal() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(200).body("this is not json");
        })
        .await;
    let rewriter = gemini_rewriter(&server.base_url(), "gemini-secret");

    assert!(matches!(
        rewriter.try_rewrite("Keep this one.").await,
        Err(ProviderError::ParseError(_))
    ));
    assert_eq!(rewriter.rewrite("Keep this one.").await, "Keep this one.");
    Ok(())
}

#[tokio::test]
async fn test_rewrite_withMissingTextField_shouldFallBackToOriginal() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GEMINI_PATH);
            then.status(200).json_body(serde_json::json!({ "candidates": [] }));
        })
        .await;
    let rewriter = gemini_rewriter(&server.base_url(), "gemini-secret");

    assert!(matches!(
        rewriter.try_rewrite("Keep this one.").await,
        Err(ProviderError::EmptyResponse)
    ));
    assert_eq!(rewriter.rewrite("Keep this one.").await, "Keep this one.");
    Ok(())
}

#[tokio::test]
async fn test_rewrite_withoutApiKey_shouldNotContactServer() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(gemini_body("Should not be used."));
        })
        .await;
    let rewriter = gemini_rewriter(&server.base_url(), "");

    assert_eq!(rewriter.rewrite("Keep this one.").await, "Keep this one.");
    assert_eq!(mock.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_rewrite_withUnreachableEndpoint_shouldFallBackToOriginal() -> Result<()> {
    // Bind and drop a listener to get a port nothing is listening on
    let endpoint = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        format!("http://{}", listener.local_addr()?)
    };
    let rewriter = gemini_rewriter(&endpoint, "gemini-secret-123");

    let error = rewriter
        .try_rewrite("Keep this one.")
        .await
        .expect_err("nothing listens on the endpoint");
    assert!(matches!(error, ProviderError::ConnectionError(_)));
    assert!(!error.to_string().contains("gemini-secret-123"));
    assert_eq!(rewriter.rewrite("Keep this one.").await, "Keep this one.");
    Ok(())
}

#[tokio::test]
async fn test_gemini_rewrite_withTimeout_shouldKeepKeyOutOfError() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GEMINI_PATH)
                .query_param("key", "gemini-secret-123");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(gemini_body("Too late."));
        })
        .await;
    let rewriter = ProviderRewriter::new(
        Gemini::with_timeout(
            "gemini-secret-123",
            server.base_url(),
            "gemini-test",
            Duration::from_millis(200),
        ),
        &StyleProfile::for_provider(ProviderKind::Gemini),
    );

    let error = rewriter
        .try_rewrite("Keep this one.")
        .await
        .expect_err("the mock answers after the timeout");
    assert!(matches!(error, ProviderError::ConnectionError(_)));
    assert!(!error.to_string().contains("gemini-secret-123"));
    assert!(!format!("{:?}", error).contains("gemini-secret-123"));
    mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_check_shouldUseMinimalPrompt() -> Result<()> {
    let server = MockServer::start_async().await;
    let hello = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains(r#""content":"Hello""#);
            then.status(200).json_body(mistral_body("Hi."));
        })
        .await;
    let client = Mistral::new("mistral-secret", server.base_url(), "mistral-medium-2508");

    client.test_connection().await?;
    assert_eq!(hello.hits_async().await, 1);

    let rewriter = mistral_rewriter(&server.base_url());
    assert!(rewriter.check().await.is_ok());
    assert_eq!(hello.hits_async().await, 2);
    Ok(())
}
