//! Tests for the colon-joined base64 envelope string format.
//!
//! The string layout is an interoperability contract: any producer or
//! consumer must agree on exactly three padded-base64 segments.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lockstash_crypto::{
    decrypt_from_string, encrypt_to_string, generate_random_key, CryptoError, Envelope,
    NONCE_SIZE, TAG_SIZE,
};

#[test]
fn string_form_has_exactly_three_segments() {
    let key = generate_random_key();
    let stored = encrypt_to_string(&key, b"Hello, World!").unwrap();

    assert_eq!(stored.matches(':').count(), 2);
    let segments: Vec<&str> = stored.split(':').collect();
    assert_eq!(segments.len(), 3);

    // Each segment is standard padded base64 of the expected field
    assert_eq!(STANDARD.decode(segments[0]).unwrap().len(), NONCE_SIZE);
    assert_eq!(STANDARD.decode(segments[1]).unwrap().len(), TAG_SIZE);
    assert_eq!(STANDARD.decode(segments[2]).unwrap().len(), "Hello, World!".len());
}

#[test]
fn string_round_trip() {
    let key = generate_random_key();
    let stored = encrypt_to_string(&key, b"Hello, World!").unwrap();
    assert_eq!(decrypt_from_string(&key, &stored).unwrap(), b"Hello, World!");
}

#[test]
fn string_round_trip_empty_plaintext() {
    let key = generate_random_key();
    let stored = encrypt_to_string(&key, b"").unwrap();
    assert!(stored.ends_with(':'));
    assert_eq!(decrypt_from_string(&key, &stored).unwrap(), b"");
}

#[test]
fn encode_decode_is_lossless() {
    let envelope = Envelope {
        nonce: [0x11; NONCE_SIZE],
        tag: [0x22; TAG_SIZE],
        ciphertext: vec![0x33, 0x44, 0x55],
    };

    let decoded = Envelope::decode(&envelope.encode()).unwrap();
    assert_eq!(decoded, envelope);
}

#[test]
fn known_layout_decodes() {
    // Fixed fields encoded by hand: any compatible implementation must
    // produce and accept this exact layout.
    let nonce = [7u8; NONCE_SIZE];
    let tag = [9u8; TAG_SIZE];
    let ciphertext = b"abc";
    let stored = format!(
        "{}:{}:{}",
        STANDARD.encode(nonce),
        STANDARD.encode(tag),
        STANDARD.encode(ciphertext),
    );

    let envelope = Envelope::decode(&stored).unwrap();
    assert_eq!(envelope.nonce, nonce);
    assert_eq!(envelope.tag, tag);
    assert_eq!(envelope.ciphertext, ciphertext);
}

// ── Malformed Inputs ──

#[test]
fn too_few_segments_rejected() {
    let err = Envelope::decode("AAAA:BBBB").unwrap_err();
    assert!(matches!(err, CryptoError::MalformedEnvelope(_)));
}

#[test]
fn too_many_segments_rejected() {
    let key = generate_random_key();
    let stored = encrypt_to_string(&key, b"data").unwrap();
    let err = Envelope::decode(&format!("{stored}:extra")).unwrap_err();
    assert!(matches!(err, CryptoError::MalformedEnvelope(_)));
}

#[test]
fn empty_string_rejected() {
    assert!(matches!(
        Envelope::decode(""),
        Err(CryptoError::MalformedEnvelope(_))
    ));
}

#[test]
fn invalid_base64_rejected() {
    let err = Envelope::decode("!!not-base64!!:AAAA:BBBB").unwrap_err();
    assert!(matches!(err, CryptoError::MalformedEnvelope(_)));
}

#[test]
fn wrong_nonce_length_rejected() {
    let stored = format!(
        "{}:{}:{}",
        STANDARD.encode([0u8; 8]), // 8-byte nonce is invalid
        STANDARD.encode([0u8; TAG_SIZE]),
        STANDARD.encode(b"ciphertext"),
    );
    let err = Envelope::decode(&stored).unwrap_err();
    assert!(matches!(err, CryptoError::MalformedEnvelope(_)));
}

#[test]
fn wrong_tag_length_rejected() {
    let stored = format!(
        "{}:{}:{}",
        STANDARD.encode([0u8; NONCE_SIZE]),
        STANDARD.encode([0u8; 12]), // truncated tag is invalid
        STANDARD.encode(b"ciphertext"),
    );
    let err = Envelope::decode(&stored).unwrap_err();
    assert!(matches!(err, CryptoError::MalformedEnvelope(_)));
}

// ── Tampering Through the String Form ──

#[test]
fn tampered_segment_fails_authentication() {
    let key = generate_random_key();
    let stored = encrypt_to_string(&key, b"field value").unwrap();

    // Re-encode the ciphertext segment with one bit flipped; the string
    // stays well-formed, so the failure must come from tag verification.
    let mut envelope = Envelope::decode(&stored).unwrap();
    envelope.ciphertext[0] ^= 0x01;
    let tampered = envelope.encode();

    let err = decrypt_from_string(&key, &tampered).unwrap_err();
    assert!(matches!(err, CryptoError::Authentication));
}

#[test]
fn wrong_key_fails_through_string_form() {
    let key_a = generate_random_key();
    let key_b = generate_random_key();

    let stored = encrypt_to_string(&key_a, b"field value").unwrap();
    let err = decrypt_from_string(&key_b, &stored).unwrap_err();
    assert!(matches!(err, CryptoError::Authentication));
}
