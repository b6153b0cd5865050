//! Signed REST connection tests against a mock HTX server.

use base64::{Engine as _, engine::general_purpose};
use chrono::NaiveDate;
use ed25519_dalek::{Signature, SigningKey, Verifier};
use htx_client::isolated_margin::{
    IsolatedMarginAccountRequest, IsolatedMarginApplyLoanRequest, IsolatedMarginLoanInfoRequest,
    IsolatedMarginLoanOrdersRequest, IsolatedMarginRepayLoanRequest, IsolatedMarginTransferRequest,
    LeveragePositionLimitRequest, LoanOrderState, MarginTransferDirection, QueryDirection,
};
use htx_client::{HtxOptions, IsolatedMarginService, SignatureMethod};
use htx_core::auth::hmac_sha256_base64;
use htx_core::error::{Error, ParseError};
use htx_core::signed_request::{HttpMethod, canonical_payload};
use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::BTreeMap;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ACCESS_KEY: &str = "test-access-key";
const SECRET_KEY: &str = "test-secret-key";

fn hmac_service(server: &MockServer) -> IsolatedMarginService {
    let options = HtxOptions::builder()
        .api_key(ACCESS_KEY)
        .secret_key(SECRET_KEY)
        .rest_host(server.uri())
        .build()
        .unwrap();
    IsolatedMarginService::new(options).unwrap()
}

fn host_of(server: &MockServer) -> String {
    let addr = server.address();
    format!("{}:{}", addr.ip(), addr.port())
}

fn query_map(request: &Request) -> BTreeMap<String, String> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Splits the received query into the signed parameters and the signature.
fn signed_parts(request: &Request) -> (BTreeMap<String, String>, String) {
    let mut params = query_map(request);
    let signature = params.remove("Signature").expect("Signature param");
    (params, signature)
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[tokio::test]
async fn test_get_carries_auth_params_and_valid_hmac_signature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/margin/accounts/balance"))
        .and(query_param("symbol", "btcusdt"))
        .and(query_param("AccessKeyId", ACCESS_KEY))
        .and(query_param("SignatureMethod", "HmacSHA256"))
        .and(query_param("SignatureVersion", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": [{
                "id": 18264,
                "type": "margin",
                "state": "working",
                "symbol": "btcusdt",
                "fl-price": "0",
                "fl-type": "safe",
                "risk-rate": "475.952571086994250554",
                "list": [
                    {"currency": "btc", "type": "trade", "balance": "1.00"},
                    {"currency": "btc", "type": "loan", "balance": "-0.5"}
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = hmac_service(&server)
        .get_loan_balance(&IsolatedMarginAccountRequest::new("btcusdt"))
        .await
        .unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].balances.len(), 2);
    assert_eq!(accounts[0].balances[1].balance, Some(dec!(-0.5)));

    let request = only_request(&server).await;
    let (params, signature) = signed_parts(&request);
    let timestamp = &params["Timestamp"];
    assert!(is_signature_timestamp(timestamp), "{timestamp}");

    let payload = canonical_payload(
        HttpMethod::Get,
        &host_of(&server),
        "/v1/margin/accounts/balance",
        &params,
    );
    assert_eq!(signature, hmac_sha256_base64(&payload, SECRET_KEY.as_bytes()).unwrap());
}

/// `yyyy-MM-ddTHH:mm:ss` without fraction or zone.
fn is_signature_timestamp(value: &str) -> bool {
    value.len() == 19 && chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
}

#[tokio::test]
async fn test_post_sends_json_body_and_only_auth_params_in_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/dw/transfer-in/margin"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"currency": "usdt", "symbol": "btcusdt", "amount": "10.5"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "data": 63884})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = hmac_service(&server)
        .transfer(&IsolatedMarginTransferRequest::new(
            MarginTransferDirection::SpotToMargin,
            "btcusdt",
            "usdt",
            dec!(10.5),
        ))
        .await
        .unwrap();
    assert_eq!(id, 63884);

    let request = only_request(&server).await;
    let (params, signature) = signed_parts(&request);
    let keys: Vec<&str> = params.keys().map(String::as_str).collect();
    assert_eq!(keys, ["AccessKeyId", "SignatureMethod", "SignatureVersion", "Timestamp"]);

    let payload = canonical_payload(
        HttpMethod::Post,
        &host_of(&server),
        "/v1/dw/transfer-in/margin",
        &params,
    );
    assert_eq!(signature, hmac_sha256_base64(&payload, SECRET_KEY.as_bytes()).unwrap());
}

#[tokio::test]
async fn test_transfer_out_targets_transfer_out_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/dw/transfer-out/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let id = hmac_service(&server)
        .transfer(&IsolatedMarginTransferRequest::new(
            MarginTransferDirection::MarginToSpot,
            "ethusdt",
            "eth",
            dec!(0.25),
        ))
        .await
        .unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn test_apply_and_repay_return_data_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/margin/orders"))
        .and(body_json(json!({"currency": "btc", "symbol": "btcusdt", "amount": "0.001"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": 12345})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/margin/orders/12345/repay"))
        .and(body_json(json!({"amount": "0.001"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": 12345})))
        .expect(1)
        .mount(&server)
        .await;

    let service = hmac_service(&server);
    let order_id = service
        .apply_loan(&IsolatedMarginApplyLoanRequest::new("btcusdt", "btc", dec!(0.001)))
        .await
        .unwrap();
    assert_eq!(order_id, 12345);

    let repaid = service
        .repay_loan(&IsolatedMarginRepayLoanRequest::new(order_id, dec!(0.001)))
        .await
        .unwrap();
    assert_eq!(repaid, 12345);
}

#[tokio::test]
async fn test_loan_orders_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/margin/loan-orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": [
                {"id": 1, "symbol": "btcusdt", "currency": "usdt", "loan-amount": "10", "state": "accrual"},
                {"id": 2, "symbol": "btcusdt", "currency": "btc", "loan-amount": 0.5, "state": "created"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = IsolatedMarginLoanOrdersRequest::new("btcusdt")
        .with_start_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        .with_end_date(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())
        .with_states([LoanOrderState::Created, LoanOrderState::Accrual])
        .with_from(100)
        .with_size(20)
        .with_direction(QueryDirection::Prev)
        .with_sub_uid(777);

    let orders = hmac_service(&server).get_loan_orders(&request).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].loan_amount, Some(dec!(0.5)));

    let params = query_map(&only_request(&server).await);
    assert_eq!(params["symbol"], "btcusdt");
    assert_eq!(params["start-date"], "2024-01-05");
    assert_eq!(params["end-date"], "2024-02-10");
    assert_eq!(params["states"], "created,accrual");
    assert_eq!(params["from"], "100");
    assert_eq!(params["size"], "20");
    assert_eq!(params["direct"], "prev");
    assert_eq!(params["sub-uid"], "777");
}

#[tokio::test]
async fn test_unset_optional_params_are_omitted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/margin/loan-orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let orders = hmac_service(&server)
        .get_loan_orders(&IsolatedMarginLoanOrdersRequest::new("btcusdt"))
        .await
        .unwrap();
    assert!(orders.is_empty());

    let params = query_map(&only_request(&server).await);
    let keys: Vec<&str> = params.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["AccessKeyId", "Signature", "SignatureMethod", "SignatureVersion", "Timestamp", "symbol"]
    );
}

#[tokio::test]
async fn test_v1_error_envelope_maps_to_authentication() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/margin/loan-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "err-code": "api-signature-not-valid",
            "err-msg": "Signature not valid: Verification failure",
            "data": null
        })))
        .mount(&server)
        .await;

    let err = hmac_service(&server)
        .get_loan_info(&Default::default())
        .await
        .unwrap_err();
    assert!(err.as_authentication().unwrap().contains("Verification failure"));
}

#[tokio::test]
async fn test_v2_error_envelope_maps_to_invalid_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/margin/limit"))
        .and(query_param("currency", "btc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 2002,
            "message": "invalid field value in `currency`",
            "data": null
        })))
        .mount(&server)
        .await;

    let err = hmac_service(&server)
        .get_leverage_position_limit(&LeveragePositionLimitRequest::new("btc"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_v2_success_envelope_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/margin/limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "success": "true",
            "data": [{"currency": "btc", "maxHoldings": "2.5"}]
        })))
        .mount(&server)
        .await;

    let limits = hmac_service(&server)
        .get_leverage_position_limit(&LeveragePositionLimitRequest::new("btc"))
        .await
        .unwrap();
    assert_eq!(limits.len(), 1);
    assert_eq!(limits[0].max_holdings, Some(dec!(2.5)));
}

#[tokio::test]
async fn test_non_json_success_body_is_reported_as_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/margin/loan-info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = hmac_service(&server)
        .get_loan_info(&Default::default())
        .await
        .unwrap_err();
    match err {
        Error::Parse(parse) => {
            assert!(
                matches!(*parse, ParseError::InvalidFormat { ref field, .. } if field == "body"),
                "{parse:?}"
            );
        }
        other => panic!("Expected Parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_status_errors_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/margin/loan-info"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = hmac_service(&server)
        .get_loan_info(&Default::default())
        .await
        .unwrap_err();
    assert!(err.as_rate_limit().is_some());
}

#[tokio::test]
async fn test_ed25519_signature_verifies_against_public_key() {
    let seed = [9u8; 32];
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/margin/loan-info"))
        .and(query_param("SignatureMethod", "Ed25519"))
        .and(query_param("symbols", "btcusdt,ethusdt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": [{"symbol": "btcusdt", "currencies": [{"currency": "btc", "interest-rate": "0.00098"}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = HtxOptions::builder()
        .api_key(ACCESS_KEY)
        .secret_key(general_purpose::STANDARD.encode(seed))
        .signature_method(SignatureMethod::Ed25519)
        .rest_host(server.uri())
        .build()
        .unwrap();
    let service = IsolatedMarginService::new(options).unwrap();

    let infos = service
        .get_loan_info(&IsolatedMarginLoanInfoRequest::from_symbols(&["btcusdt", "ethusdt"]))
        .await
        .unwrap();
    assert_eq!(infos[0].currencies[0].interest_rate, Some(dec!(0.00098)));

    let request = only_request(&server).await;
    let (params, signature) = signed_parts(&request);
    let payload = canonical_payload(
        HttpMethod::Get,
        &host_of(&server),
        "/v1/margin/loan-info",
        &params,
    );

    let raw = general_purpose::STANDARD.decode(signature).unwrap();
    let signature = Signature::from_slice(&raw).unwrap();
    let verifying_key = SigningKey::from_bytes(&seed).verifying_key();
    assert!(verifying_key.verify(payload.as_bytes(), &signature).is_ok());
}
