// Environment-driven configuration: a missing credential fails before any
// network call is attempted.
//
// All scenarios share one test function because they mutate process
// environment variables.

#[path = "../helpers/mod.rs"]
mod helpers;

use paybridge::{Config, Environment, Error};
use std::env;
use std::time::Duration;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn config_loading_scenarios() -> anyhow::Result<()> {
    helpers::init_tracing();

    // a mock endpoint that must never be reached during config loading
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    env::set_var("ADYEN_BASE_URL", server.uri());
    env::set_var("SQUARE_BASE_URL", server.uri());
    env::set_var("ADYEN_MERCHANT_ACCOUNT", "TestMerchant");
    env::set_var("SQUARE_ACCESS_TOKEN", "square-token");

    // missing secret fails fast
    env::remove_var("ADYEN_API_KEY");
    let err = Config::from_env().expect_err("missing key must fail");
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("ADYEN_API_KEY"));

    // empty secret is treated as missing
    env::set_var("ADYEN_API_KEY", "   ");
    let err = Config::from_env().expect_err("blank key must fail");
    assert!(matches!(err, Error::Config(_)));

    // invalid environment selector is a config error
    env::set_var("ADYEN_API_KEY", "adyen-key");
    env::set_var("GATEWAY_ENV", "staging");
    let err = Config::from_env().expect_err("bad environment must fail");
    assert!(matches!(err, Error::Config(_)));

    // complete environment loads with defaults applied
    env::set_var("GATEWAY_ENV", "sandbox");
    env::remove_var("GATEWAY_TIMEOUT_SECS");
    let config = Config::from_env()?;
    assert_eq!(config.environment, Environment::Sandbox);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.adyen.merchant_account, "TestMerchant");
    assert_eq!(config.adyen.base_url, server.uri());

    // default endpoints apply when overrides are absent
    env::remove_var("ADYEN_BASE_URL");
    env::remove_var("SQUARE_BASE_URL");
    let config = Config::from_env()?;
    assert_eq!(config.adyen.base_url, "https://checkout-test.adyen.com");
    assert_eq!(
        config.square.base_url,
        "https://connect.squareupsandbox.com"
    );

    // zero outbound calls were made while loading configuration
    server.verify().await;
    Ok(())
}
