pub mod params;

use crate::error::Error;
pub type Result<T> = std::result::Result<T, Error>;

use const_oid::AssociatedOid;
use der::asn1::OctetString;
use der::{Decode, DecodePem, Encode, EncodePem};
use x509_cert::attr::Attribute;
use x509_cert::ext::pkix::SubjectAltName;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::request::{CertReq, CertReqInfo, ExtensionReq, Version};

use crate::key::KeyPair;
use params::RequestParams;

/// Represents the supported signature algorithms for certificate requests.
///
/// The variant is derived from the key family, so a request is always signed
/// with an algorithm compatible with its key.
#[derive(Debug, Clone)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption (PKCS#1 v1.5).
    Sha256WithRSA,
    /// Pure Ed25519 (EdDSA).
    Ed25519,
}

impl SignatureAlgorithm {
    /// Selects the signature algorithm matching the key family.
    pub fn for_key(key: &KeyPair) -> Self {
        match key {
            KeyPair::Rsa { .. } => SignatureAlgorithm::Sha256WithRSA,
            KeyPair::Ed25519 { .. } => SignatureAlgorithm::Ed25519,
        }
    }
}

impl From<SignatureAlgorithm> for x509_cert::spki::AlgorithmIdentifierOwned {
    /// Converts a `SignatureAlgorithm` into an `AlgorithmIdentifierOwned`.
    ///
    /// # Returns
    /// An `AlgorithmIdentifierOwned` object containing the OID and parameters
    /// for the algorithm.
    fn from(value: SignatureAlgorithm) -> Self {
        match value {
            // RFC 5912 requires explicit NULL parameters for RSA signatures.
            SignatureAlgorithm::Sha256WithRSA => x509_cert::spki::AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
                parameters: Some(der::Any::null()),
            },
            SignatureAlgorithm::Ed25519 => x509_cert::spki::AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc8410::ID_ED_25519,
                parameters: None,
            },
        }
    }
}

/// Represents a signed PKCS#10 certificate request.
///
/// This struct provides methods to encode the request into DER or PEM
/// formats. Immutable once built.
pub struct CertificateRequest {
    /// The inner representation of the request.
    pub inner: CertReq,
}

impl CertificateRequest {
    /// Builds and signs a certificate request for the given subject
    /// parameters, using the key for the proof-of-possession signature.
    ///
    /// All parameter validation (including the IP address literal) happens
    /// before any signing.
    pub fn build(key: &KeyPair, params: &RequestParams) -> Result<Self> {
        let subject = params.as_x509_name()?;

        let mut attributes = x509_cert::attr::Attributes::default();
        if let Some(ip) = params.san_ip()? {
            let attr = san_extension_req(ip)?;
            attributes
                .insert(attr)
                .map_err(|e| Error::Encode(e.to_string()))?;
        }

        let info = CertReqInfo {
            version: Version::V1,
            subject,
            public_key: key.to_spki()?,
            attributes,
        };

        let tbs = info.to_der().map_err(|e| Error::Encode(e.to_string()))?;
        let signature = key.sign_data(&tbs)?;
        let signature = der::asn1::BitString::from_bytes(&signature)
            .map_err(|e| Error::Encode(e.to_string()))?;

        Ok(CertificateRequest {
            inner: CertReq {
                info,
                algorithm: SignatureAlgorithm::for_key(key).into(),
                signature,
            },
        })
    }

    /// Encodes the request into DER format.
    ///
    /// # Returns
    /// A byte vector containing the DER-encoded request.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| Error::Encode(e.to_string()))
    }

    /// Encodes the request into PEM format with the "CERTIFICATE REQUEST"
    /// label.
    pub fn to_pem(&self) -> Result<String> {
        let pem = self
            .inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| Error::Encode(e.to_string()))?;
        if pem.is_empty() {
            return Err(Error::Encode("PEM encoding produced no output".to_string()));
        }
        Ok(pem)
    }

    /// Decodes a request from DER bytes.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        Ok(CertificateRequest {
            inner: CertReq::from_der(der)?,
        })
    }

    /// Decodes a request from PEM text.
    pub fn from_pem(pem_text: &str) -> Result<Self> {
        Ok(CertificateRequest {
            inner: CertReq::from_pem(pem_text.as_bytes())?,
        })
    }

    /// The subject alternative name IP entries carried in the request's
    /// extensionRequest attribute, in octet form.
    pub fn san_ip_octets(&self) -> Result<Vec<Vec<u8>>> {
        let mut ips = Vec::new();
        for attr in self.inner.info.attributes.iter() {
            if attr.oid != ExtensionReq::OID {
                continue;
            }
            for value in attr.values.iter() {
                let extensions = value.decode_as::<Vec<x509_cert::ext::Extension>>()?;
                for ext in extensions {
                    if ext.extn_id != SubjectAltName::OID {
                        continue;
                    }
                    let san = SubjectAltName::from_der(ext.extn_value.as_bytes())?;
                    for name in san.0.iter() {
                        if let GeneralName::IpAddress(octets) = name {
                            ips.push(octets.as_bytes().to_vec());
                        }
                    }
                }
            }
        }
        Ok(ips)
    }
}

/// Builds the PKCS#10 extensionRequest attribute carrying a single-entry IP
/// subject alternative name.
fn san_extension_req(ip: std::net::IpAddr) -> Result<Attribute> {
    let octets = match ip {
        std::net::IpAddr::V4(v4) => v4.octets().to_vec(),
        std::net::IpAddr::V6(v6) => v6.octets().to_vec(),
    };

    let san = SubjectAltName(vec![GeneralName::IpAddress(
        OctetString::new(octets).map_err(|e| Error::Encode(e.to_string()))?,
    )]);

    let extension = x509_cert::ext::Extension {
        extn_id: SubjectAltName::OID,
        critical: false,
        extn_value: OctetString::new(san.to_der().map_err(|e| Error::Encode(e.to_string()))?)
            .map_err(|e| Error::Encode(e.to_string()))?,
    };

    Attribute::try_from(ExtensionReq(vec![extension])).map_err(|e| Error::Encode(e.to_string()))
}
