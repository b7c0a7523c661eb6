use super::*;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["cannon", "http://localhost"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost"),
            "Unexpected url",
        ),
        (args.concurrency.get() == 1, "Unexpected concurrency"),
        (args.cpu_multiplier.get() == 1, "Unexpected cpu_multiplier"),
        (args.time_limit().is_none(), "Expected no time limit"),
        (args.request_quota().is_none(), "Expected no quota"),
        (args.pacing_delay().is_none(), "Expected no pacing delay"),
        (
            args.method == reqwest::Method::GET,
            "Expected GET",
        ),
        (args.headers.is_empty(), "Expected empty headers"),
        (args.data.is_empty(), "Expected empty data"),
        (
            args.request_timeout == Duration::from_secs(1),
            "Unexpected request_timeout",
        ),
        (!args.insecure, "Expected insecure to be false"),
        (!args.multipart, "Expected multipart to be false"),
        (args.multipart_file.is_empty(), "Expected empty multipart file"),
        (args.config.is_none(), "Expected config to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_without_url_is_accepted() -> AppResult<()> {
    let args = parse_test_args(["cannon"])?;
    if args.url.is_some() {
        return Err(AppError::validation("Expected url to be None"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_concurrency() -> AppResult<()> {
    if parse_test_args(["cannon", "-c", "0", "http://localhost"]).is_ok() {
        return Err(AppError::validation("Expected error for -c 0"));
    }
    Ok(())
}
