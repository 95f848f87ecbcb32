use csrkit::csr::CertificateRequest;
use csrkit::csr::params::RequestParams;
use csrkit::error::Error;
use csrkit::key::KeyPair;

use der::Encode;

pub type Result<T> = std::result::Result<T, Error>;

/// Builds a request with only a common name and checks that every optional
/// subject field is absent rather than present-but-empty.
#[test]
fn minimal_subject_contains_only_common_name() -> Result<()> {
    let key = KeyPair::generate_ed25519();
    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .build();

    let request = CertificateRequest::build(&key, &params)?;
    let pem_text = request.to_pem()?;

    let block = pem::parse(&pem_text).expect("CSR PEM should parse");
    assert_eq!(block.tag(), "CERTIFICATE REQUEST");

    let parsed = CertificateRequest::from_pem(&pem_text)?;
    let subject = RequestParams::from_x509_name(&parsed.inner.info.subject);
    assert_eq!(subject.common_name, "test.com");
    assert_eq!(subject.organization, None);
    assert_eq!(subject.organizational_unit, None);
    assert_eq!(subject.country, None);
    assert_eq!(subject.state, None);
    assert_eq!(subject.locality, None);

    assert_eq!(parsed.inner.info.attributes.len(), 0);
    assert!(parsed.san_ip_octets()?.is_empty());
    Ok(())
}

/// Builds a fully populated request and checks that every subject field and
/// the SAN IP survive an encode/decode round trip.
#[test]
fn populated_subject_and_san_round_trip() -> Result<()> {
    let key = KeyPair::generate_rsa(2048)?;
    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .organization("Test Org".to_string())
        .organizational_unit("IT".to_string())
        .country("US".to_string())
        .state("California".to_string())
        .locality("San Francisco".to_string())
        .ip_address("192.168.1.1".to_string())
        .build();

    let request = CertificateRequest::build(&key, &params)?;
    let parsed = CertificateRequest::from_pem(&request.to_pem()?)?;

    let subject = RequestParams::from_x509_name(&parsed.inner.info.subject);
    assert_eq!(subject.common_name, "test.com");
    assert_eq!(subject.organization.as_deref(), Some("Test Org"));
    assert_eq!(subject.organizational_unit.as_deref(), Some("IT"));
    assert_eq!(subject.country.as_deref(), Some("US"));
    assert_eq!(subject.state.as_deref(), Some("California"));
    assert_eq!(subject.locality.as_deref(), Some("San Francisco"));

    let ips = parsed.san_ip_octets()?;
    assert_eq!(ips, vec![vec![192, 168, 1, 1]]);
    Ok(())
}

/// A subject value containing DN special characters must be accepted and
/// carried through the request verbatim.
#[test]
fn comma_bearing_organization_round_trips() -> Result<()> {
    let key = KeyPair::generate_ed25519();
    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .organization("Acme, Inc.".to_string())
        .build();

    let request = CertificateRequest::build(&key, &params)?;
    let parsed = CertificateRequest::from_pem(&request.to_pem()?)?;
    let subject = RequestParams::from_x509_name(&parsed.inner.info.subject);
    assert_eq!(subject.organization.as_deref(), Some("Acme, Inc."));
    Ok(())
}

#[test]
fn ipv6_address_is_carried_in_the_san() -> Result<()> {
    let key = KeyPair::generate_ed25519();
    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .ip_address("2001:db8::1".to_string())
        .build();

    let request = CertificateRequest::build(&key, &params)?;
    let ips = request.san_ip_octets()?;
    assert_eq!(ips.len(), 1);
    assert_eq!(ips[0].len(), 16);
    Ok(())
}

#[test]
fn invalid_ip_address_fails_before_signing() {
    let key = KeyPair::generate_ed25519();
    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .ip_address("not-an-ip".to_string())
        .build();

    let err = CertificateRequest::build(&key, &params)
        .err()
        .expect("invalid IP should fail");
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn empty_common_name_is_a_configuration_error() {
    let key = KeyPair::generate_ed25519();
    let params = RequestParams::default();

    let err = CertificateRequest::build(&key, &params)
        .err()
        .expect("empty common name should fail");
    assert!(matches!(err, Error::Configuration(_)));
}

/// The proof-of-possession signature must verify against the public half of
/// the generating Ed25519 key.
#[test]
fn ed25519_signature_verifies_against_generating_key() -> Result<()> {
    use ed25519_dalek::Verifier;

    let key = KeyPair::generate_ed25519();
    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .build();
    let request = CertificateRequest::build(&key, &params)?;

    let tbs = request.inner.info.to_der().expect("CertReqInfo encodes");
    let signature_bytes = request
        .inner
        .signature
        .as_bytes()
        .expect("signature is byte-aligned");
    let signature =
        ed25519_dalek::Signature::from_slice(signature_bytes).expect("signature parses");

    let KeyPair::Ed25519 { signing_key } = &key else {
        panic!("expected an Ed25519 key");
    };
    signing_key
        .verifying_key()
        .verify(&tbs, &signature)
        .expect("CSR signature should verify");
    Ok(())
}

/// The proof-of-possession signature must verify against the public half of
/// the generating RSA key.
#[test]
fn rsa_signature_verifies_against_generating_key() -> Result<()> {
    use rsa::pkcs1v15::{Signature, VerifyingKey};
    use rsa::signature::Verifier;
    use sha2::Sha256;

    let key = KeyPair::generate_rsa(2048)?;
    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .build();
    let request = CertificateRequest::build(&key, &params)?;

    let tbs = request.inner.info.to_der().expect("CertReqInfo encodes");
    let signature_bytes = request
        .inner
        .signature
        .as_bytes()
        .expect("signature is byte-aligned");
    let signature = Signature::try_from(signature_bytes).expect("signature parses");

    let KeyPair::Rsa { public, .. } = &key else {
        panic!("expected an RSA key");
    };
    VerifyingKey::<Sha256>::new(public.clone())
        .verify(&tbs, &signature)
        .expect("CSR signature should verify");
    Ok(())
}

/// A key parsed back from its PKCS#8 PEM signs a request that still verifies,
/// proving serialize/parse preserves the exact key.
#[test]
fn reparsed_key_produces_identical_request_signatures() -> Result<()> {
    let key = KeyPair::generate_ed25519();
    let document = key.to_pkcs8_pem(Some("secret"))?;
    let reparsed = KeyPair::from_pkcs8_pem(document.pem(), Some("secret"))?;

    let params = RequestParams::builder()
        .common_name("test.com".to_string())
        .build();

    // Ed25519 signing is deterministic, so the same key yields the same CSR.
    let first = CertificateRequest::build(&key, &params)?;
    let second = CertificateRequest::build(&reparsed, &params)?;
    assert_eq!(first.to_der()?, second.to_der()?);
    Ok(())
}
