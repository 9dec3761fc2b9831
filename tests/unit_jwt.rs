use expense_tracker::expense_tracker_auth::{
    Claims, create_access_token, encode_claims, verify_token,
};
use expense_tracker::expense_tracker_config::JwtConfig;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_ttl_secs: 86_400,
    }
}

fn now() -> usize {
    chrono::Utc::now().timestamp() as usize
}

#[test]
fn test_token_has_three_segments() {
    let token = create_access_token(1, "test@example.com", &get_test_jwt_config()).unwrap();

    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_verify_token_round_trip() {
    let jwt_config = get_test_jwt_config();
    let claims = Claims::new(7, "test@example.com", now(), 600);

    let token = encode_claims(&claims, &jwt_config).unwrap();
    let decoded = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(decoded, claims);
}

#[test]
fn test_verify_token_wrong_secret() {
    let token = create_access_token(1, "test@example.com", &get_test_jwt_config()).unwrap();
    let other = JwtConfig {
        secret: "a_different_secret".to_string(),
        token_ttl_secs: 86_400,
    };

    let err = verify_token(&token, &other).unwrap_err();

    assert_eq!(err.status.as_u16(), 401);
    assert_eq!(err.error.to_string(), "Invalid token");
}

#[test]
fn test_verify_token_expired() {
    let jwt_config = get_test_jwt_config();
    let issued = now() - 7_200;
    let claims = Claims::new(1, "test@example.com", issued, 3_600);
    let token = encode_claims(&claims, &jwt_config).unwrap();

    assert!(verify_token(&token, &jwt_config).is_err());
}

#[test]
fn test_verify_token_garbage() {
    let jwt_config = get_test_jwt_config();

    for token in ["", "abc", "a.b.c", "Bearer token"] {
        assert!(verify_token(token, &jwt_config).is_err(), "{:?}", token);
    }
}
