use setplay::utils::{generate_state_token, seal, unseal};

const SECRET: &str = "test-signing-secret";

#[test]
fn test_generate_state_token() {
    let token = generate_state_token();

    // Should be exactly 32 characters
    assert_eq!(token.len(), 32);

    // Should contain only alphanumeric characters
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    let token2 = generate_state_token();
    assert_ne!(token, token2);
}

#[test]
fn test_seal_round_trip() {
    let sealed = seal("1700000000:some-state-value", SECRET);

    // Should unseal back to the original value
    assert_eq!(
        unseal(&sealed, SECRET).as_deref(),
        Some("1700000000:some-state-value")
    );

    // Should be deterministic - same input produces same output
    assert_eq!(sealed, seal("1700000000:some-state-value", SECRET));

    // Different values should produce different envelopes
    assert_ne!(sealed, seal("1700000000:other-state-value", SECRET));
}

#[test]
fn test_seal_envelope_format() {
    let sealed = seal("value", SECRET);

    // Should be payload and tag, separated by a single dot
    assert_eq!(sealed.split('.').count(), 2);

    // Both parts should be url-safe base64 without padding
    assert!(
        sealed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    );
}

#[test]
fn test_unseal_rejects_wrong_secret() {
    let sealed = seal("value", SECRET);

    assert_eq!(unseal(&sealed, "another-secret"), None);
}

#[test]
fn test_unseal_rejects_mixed_envelopes() {
    // A payload from one envelope combined with the tag of another must not
    // verify, even though both parts are individually well-formed
    let first = seal("value-a", SECRET);
    let second = seal("value-b", SECRET);

    let payload = first.split('.').next().unwrap();
    let tag = second.split('.').nth(1).unwrap();
    let mixed = format!("{payload}.{tag}");

    assert_eq!(unseal(&mixed, SECRET), None);
}

#[test]
fn test_unseal_rejects_garbage() {
    // No separator
    assert_eq!(unseal("not-an-envelope", SECRET), None);

    // Empty input
    assert_eq!(unseal("", SECRET), None);

    // Separator present but parts are not valid base64
    assert_eq!(unseal("???.!!!", SECRET), None);
}
