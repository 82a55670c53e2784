use super::test_helpers::{FAR_FUTURE, make_token};
use super::*;
use serde_json::json;

const NOW: i64 = 1_700_000_000;

// =============================================================================
// decode_token: accepted tokens
// =============================================================================

#[test]
fn decodes_subject_and_roles() {
    let token = make_token(&json!({ "sub": "a@b.com", "roles": ["ADMIN", "DOCTOR"] }));
    let claims = decode_token(&token, NOW).unwrap();
    assert_eq!(claims.sub, "a@b.com");
    assert_eq!(claims.roles, Some(vec!["ADMIN".to_owned(), "DOCTOR".to_owned()]));
}

#[test]
fn ignores_unknown_claims() {
    let token = make_token(&json!({ "sub": "a@b.com", "iss": "user-service", "userId": 7 }));
    let claims = decode_token(&token, NOW).unwrap();
    assert_eq!(claims.sub, "a@b.com");
    assert_eq!(claims.roles, None);
}

#[test]
fn accepts_padded_payload() {
    let token = make_token(&json!({ "sub": "a@b.com" }));
    let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
    parts[1].push_str("==");
    let padded = parts.join(".");
    assert!(decode_token(&padded, NOW).is_ok());
}

#[test]
fn accepts_token_without_exp() {
    let token = make_token(&json!({ "sub": "a@b.com", "iat": 1 }));
    assert!(decode_token(&token, i64::MAX).is_ok());
}

#[test]
fn accepts_unexpired_token() {
    let token = make_token(&json!({ "sub": "a@b.com", "exp": FAR_FUTURE }));
    let claims = decode_token(&token, NOW).unwrap();
    assert_eq!(claims.exp, Some(4_102_444_800.0));
}

#[test]
fn accepts_fractional_numeric_dates() {
    let token = make_token(&json!({ "sub": "a@b.com", "exp": 4_102_444_800.5, "iat": 1_699_999_000.25 }));
    let claims = decode_token(&token, NOW).unwrap();
    assert_eq!(claims.exp, Some(4_102_444_800.5));
    assert_eq!(claims.iat, Some(1_699_999_000.25));
}

#[test]
fn trims_surrounding_whitespace() {
    let token = format!("  {}\n", make_token(&json!({ "sub": "a@b.com" })));
    assert!(decode_token(&token, NOW).is_ok());
}

// =============================================================================
// decode_token: rejected tokens
// =============================================================================

#[test]
fn rejects_wrong_segment_count() {
    assert!(matches!(decode_token("not-a-token", NOW), Err(TokenError::Segments(1))));
    assert!(matches!(decode_token("a.b", NOW), Err(TokenError::Segments(2))));
    assert!(matches!(decode_token("a.b.c.d", NOW), Err(TokenError::Segments(4))));
    assert!(matches!(decode_token("", NOW), Err(TokenError::Segments(1))));
}

#[test]
fn rejects_non_base64_payload() {
    assert!(matches!(decode_token("aaa.!!!.ccc", NOW), Err(TokenError::Base64(_))));
}

#[test]
fn rejects_non_json_payload() {
    let payload = URL_SAFE_NO_PAD.encode("hello");
    let token = format!("aaa.{payload}.ccc");
    assert!(matches!(decode_token(&token, NOW), Err(TokenError::Claims(_))));
}

#[test]
fn rejects_non_object_claims() {
    for payload in [json!(["a@b.com"]), json!("a@b.com"), json!(42), json!(null)] {
        let token = make_token(&payload);
        assert!(matches!(decode_token(&token, NOW), Err(TokenError::NotAnObject)), "{payload}");
    }
}

#[test]
fn rejects_roles_of_wrong_type() {
    let token = make_token(&json!({ "sub": "a@b.com", "roles": "ADMIN" }));
    assert!(matches!(decode_token(&token, NOW), Err(TokenError::Claims(_))));
}

#[test]
fn rejects_missing_or_blank_subject() {
    let missing = make_token(&json!({ "roles": ["ADMIN"] }));
    assert!(matches!(decode_token(&missing, NOW), Err(TokenError::MissingSubject)));
    let blank = make_token(&json!({ "sub": "  " }));
    assert!(matches!(decode_token(&blank, NOW), Err(TokenError::MissingSubject)));
}

#[test]
fn rejects_expired_token() {
    let token = make_token(&json!({ "sub": "a@b.com", "exp": NOW - 1 }));
    assert!(matches!(decode_token(&token, NOW), Err(TokenError::Expired { exp }) if exp == 1_699_999_999.0));
}

#[test]
fn fractional_exp_just_past_now_is_expired() {
    let token = make_token(&json!({ "sub": "a@b.com", "exp": 1_699_999_999.5 }));
    assert!(matches!(decode_token(&token, NOW), Err(TokenError::Expired { .. })));
    let fresh = make_token(&json!({ "sub": "a@b.com", "exp": 1_700_000_000.5 }));
    assert!(decode_token(&fresh, NOW).is_ok());
}

#[test]
fn expiry_boundary_counts_as_expired() {
    let token = make_token(&json!({ "sub": "a@b.com", "exp": NOW }));
    assert!(matches!(decode_token(&token, NOW), Err(TokenError::Expired { .. })));
}

// =============================================================================
// Claims::into_identity
// =============================================================================

#[test]
fn missing_roles_default_to_patient() {
    let token = make_token(&json!({ "sub": "a@b.com" }));
    let identity = decode_token(&token, NOW).unwrap().into_identity();
    assert_eq!(identity.subject_email, "a@b.com");
    assert_eq!(identity.roles.len(), 1);
    assert!(identity.has_role("PATIENT"));
}

#[test]
fn null_roles_default_to_patient() {
    let token = make_token(&json!({ "sub": "a@b.com", "roles": null }));
    let identity = decode_token(&token, NOW).unwrap().into_identity();
    assert!(identity.has_role("PATIENT"));
}

#[test]
fn explicit_empty_roles_stay_empty() {
    let token = make_token(&json!({ "sub": "a@b.com", "roles": [] }));
    let identity = decode_token(&token, NOW).unwrap().into_identity();
    assert!(identity.roles.is_empty());
}

#[test]
fn duplicate_roles_collapse() {
    let token = make_token(&json!({ "sub": "a@b.com", "roles": ["ADMIN", "ADMIN"] }));
    let identity = decode_token(&token, NOW).unwrap().into_identity();
    assert_eq!(identity.roles.len(), 1);
}
