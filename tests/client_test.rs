use postkeeper::{
    api::{self, ApiError, ApiResponse, API},
    fake::FakeAPI,
    Client,
};
use serde::Deserialize;

/// Has no `Default`, like most Bot API results.
#[derive(Debug, Deserialize, PartialEq)]
struct Pong {
    latency_ms: i64,
}

#[test]
fn parses_success_envelope() {
    let response = ApiResponse::<Pong>::parse(r#"{"ok":true,"result":{"latency_ms":12}}"#).unwrap();
    assert_eq!(response.into_result(), Ok(Pong { latency_ms: 12 }));
}

#[test]
fn parses_error_envelope() {
    let response = ApiResponse::<Pong>::parse(
        r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
    )
    .unwrap();

    assert_eq!(
        response.into_result(),
        Err(ApiError::Telegram {
            code: Some(400),
            description: "Bad Request: chat not found".into(),
        })
    );
}

#[test]
fn missing_result_is_an_error() {
    let response = ApiResponse::<Pong>::parse(r#"{"ok":true}"#).unwrap();
    assert_eq!(response.into_result(), Err(ApiError::MissingResult));
}

#[tokio::test]
async fn telegram_errors_reach_the_caller() {
    postkeeper::init_logger();
    let fake = FakeAPI::new();
    let api = API::new(Client::new("token").with_post_handler(fake.clone()));

    let err = api
        .get_file(&api::GetFileRequest::new("no_such_file"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Telegram { code: Some(400), .. })
    ));
}

#[tokio::test]
async fn get_me() {
    let fake = FakeAPI::new();
    let api = API::new(Client::new("token").with_post_handler(fake.clone()));

    let me = api.get_me().await.unwrap();
    assert!(me.is_bot);
    assert_eq!(me.username.as_deref(), Some("postkeeper"));
}
