use std::error::Error;

use scout::errors::BotError;

#[test]
fn bot_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = BotError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn bot_error_display() {
    let error = BotError::TelegramError("chat not found".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access Telegram API: chat not found"
    );

    let error = BotError::SearchError("quota exceeded".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access search service: quota exceeded"
    );

    let error = BotError::HttpError("connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: connection error"
    );
}

#[test]
fn bot_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let bot_err: BotError = err.into();
    match bot_err {
        BotError::TelegramError(msg) => assert!(msg.contains("test error")),
        other => panic!("unexpected error type: {other:?}"),
    }

    // Verify the reqwest conversion exists without constructing a
    // reqwest::Error by hand.
    #[allow(unused)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> BotError {
        BotError::from(err)
    }
}
