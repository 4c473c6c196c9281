use edupulse::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_produces_verifiable_hash() {
    let password = "correct horse battery staple";

    let hash = hash_password(password).unwrap();

    assert_ne!(hash, password);
    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_rejects_wrong_password() {
    let hash = hash_password("right-password").unwrap();

    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let password = "same-password";

    let hash1 = hash_password(password).unwrap();
    let hash2 = hash_password(password).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password(password, &hash1).unwrap());
    assert!(verify_password(password, &hash2).unwrap());
}
