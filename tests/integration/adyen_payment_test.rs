// Adyen adapter against a wiremock server: request construction, response
// normalization, and transport failure mapping without live API access.

#[path = "../helpers/mod.rs"]
mod helpers;

use paybridge::config::AdyenConfig;
use paybridge::gateways::{AdyenGateway, PaymentGateway, PaymentStatus};
use paybridge::Error;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adyen_gateway(server: &MockServer, timeout: Duration) -> AdyenGateway {
    AdyenGateway::new(
        &AdyenConfig {
            api_key: "test-api-key".to_string(),
            merchant_account: "TestMerchant".to_string(),
            base_url: server.uri(),
        },
        timeout,
    )
    .expect("gateway build")
}

#[tokio::test]
async fn authorised_payment_normalizes_to_authorized() {
    helpers::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v71/payments"))
        .and(header("x-api-key", "test-api-key"))
        .and(body_partial_json(json!({
            "amount": {"currency": "EUR", "value": 1000},
            "reference": "order-42",
            "merchantAccount": "TestMerchant",
            "paymentMethod": {"type": "scheme", "storedPaymentMethodId": "tok_test_visa"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "Authorised",
            "pspReference": "881234567890123A",
            "amount": {"currency": "EUR", "value": 1000}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = adyen_gateway(&server, Duration::from_secs(5));
    let request = helpers::eur_request(1000, "order-42");

    let result = gateway.authorize(&request).await.expect("authorize");

    assert_eq!(result.status, PaymentStatus::Authorized);
    assert_eq!(result.gateway_reference, "881234567890123A");
    assert!(result.errors.is_empty());

    // the vendor echo of amount and currency survives normalization untouched
    assert_eq!(result.raw_response["amount"]["value"], 1000);
    assert_eq!(result.raw_response["amount"]["currency"], "EUR");
}

#[tokio::test]
async fn refused_payment_carries_refusal_reason() {
    helpers::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v71/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "Refused",
            "pspReference": "881234567890123B",
            "refusalReason": "Not enough balance",
            "refusalReasonCode": "2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = adyen_gateway(&server, Duration::from_secs(5));
    let result = gateway
        .authorize(&helpers::eur_request(2500, "order-43"))
        .await
        .expect("authorize");

    assert_eq!(result.status, PaymentStatus::Refused);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].detail, "Not enough balance");
}

#[tokio::test]
async fn api_error_envelope_normalizes_to_error_status() {
    helpers::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v71/payments"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": 403,
            "errorCode": "901",
            "message": "Invalid Merchant Account",
            "errorType": "security"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = adyen_gateway(&server, Duration::from_secs(5));
    let result = gateway
        .authorize(&helpers::eur_request(1000, "order-44"))
        .await
        .expect("authorize");

    assert_eq!(result.status, PaymentStatus::Error);
    assert_eq!(result.errors[0].code, "901");
    assert_eq!(result.errors[0].category, "security");
}

#[tokio::test]
async fn slow_gateway_maps_to_timeout_error() {
    helpers::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v71/payments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({"resultCode": "Authorised"})),
        )
        .mount(&server)
        .await;

    let gateway = adyen_gateway(&server, Duration::from_millis(200));
    let err = gateway
        .authorize(&helpers::eur_request(1000, "order-45"))
        .await
        .expect_err("must time out");

    // timeouts are distinct from gateway rejections
    assert!(err.is_timeout());
    assert!(matches!(err, Error::Timeout(_)));
}

#[tokio::test]
async fn non_json_body_normalizes_to_unmapped_response() {
    helpers::init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v71/payments"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = adyen_gateway(&server, Duration::from_secs(5));
    let result = gateway
        .authorize(&helpers::eur_request(1000, "order-46"))
        .await
        .expect("authorize");

    assert_eq!(result.status, PaymentStatus::Error);
    assert_eq!(result.errors[0].category, "unmapped_response");
}
