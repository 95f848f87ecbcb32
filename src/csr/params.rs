use std::net::IpAddr;

use bon::Builder;
use der::oid::ObjectIdentifier;
use x509_cert::name::RdnSequence;

use crate::error::Error;

use super::Result;

const OID_COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
const OID_COUNTRY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
const OID_LOCALITY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
const OID_STATE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
const OID_ORGANIZATION: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
const OID_ORGANIZATIONAL_UNIT: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");

/// Subject parameters for building a certificate request.
///
/// Only `common_name` is required. Optional fields that are `None` or empty
/// are omitted from the subject entirely rather than encoded as empty
/// strings.
///
/// # Fields
/// * `common_name` - The common name (CN); required, must be non-empty.
/// * `organization` - The organization (O).
/// * `organizational_unit` - The organizational unit (OU).
/// * `country` - The country (C).
/// * `state` - The state or province (ST).
/// * `locality` - The locality or city (L).
/// * `ip_address` - An IPv4 or IPv6 literal for the Subject Alternative Name.
#[derive(Clone, Debug, Builder, Default)]
pub struct RequestParams {
    pub common_name: String,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub ip_address: Option<String>,
}

impl RequestParams {
    /// Converts the populated subject fields to an X.509 name.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when `common_name` is empty and
    /// [`Error::InvalidParameter`] when a field cannot be expressed as an
    /// RFC 4514 attribute value.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::Name> {
        use core::str::FromStr;

        if self.common_name.is_empty() {
            return Err(Error::Configuration(
                "common_name is required and must not be empty".to_string(),
            ));
        }

        let mut parts = vec![format!("CN={}", escape_rdn_value(&self.common_name))];
        if let Some(ou) = non_empty(&self.organizational_unit) {
            parts.push(format!("OU={}", escape_rdn_value(ou)));
        }
        if let Some(o) = non_empty(&self.organization) {
            parts.push(format!("O={}", escape_rdn_value(o)));
        }
        if let Some(l) = non_empty(&self.locality) {
            parts.push(format!("L={}", escape_rdn_value(l)));
        }
        if let Some(st) = non_empty(&self.state) {
            parts.push(format!("ST={}", escape_rdn_value(st)));
        }
        if let Some(c) = non_empty(&self.country) {
            parts.push(format!("C={}", escape_rdn_value(c)));
        }

        RdnSequence::from_str(&parts.join(","))
            .map_err(|e| Error::InvalidParameter(format!("invalid subject name: {e}")))
    }

    /// Parses the configured IP address, if any.
    ///
    /// An empty string counts as absent. An unparseable literal is an
    /// [`Error::InvalidParameter`].
    pub fn san_ip(&self) -> Result<Option<IpAddr>> {
        match non_empty(&self.ip_address) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<IpAddr>()
                .map(Some)
                .map_err(|_| Error::InvalidParameter(format!("invalid IP address: {raw}"))),
        }
    }

    /// Extracts subject parameters from an X.509 name.
    pub fn from_x509_name(name: &x509_cert::name::Name) -> Self {
        let mut params = RequestParams::default();

        for rdn in name.0.iter() {
            for attr in rdn.0.iter() {
                let Some(value) = decode_attribute_value(&attr.value) else {
                    continue;
                };
                match attr.oid {
                    OID_COMMON_NAME => params.common_name = value,
                    OID_ORGANIZATION => params.organization = Some(value),
                    OID_ORGANIZATIONAL_UNIT => params.organizational_unit = Some(value),
                    OID_COUNTRY => params.country = Some(value),
                    OID_STATE => params.state = Some(value),
                    OID_LOCALITY => params.locality = Some(value),
                    _ => {}
                }
            }
        }

        params
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// Escapes the RFC 4514 special characters so arbitrary attribute values
/// survive the string form of the distinguished name.
fn escape_rdn_value(value: &str) -> String {
    let last = value.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        let escape = matches!(c, '"' | '+' | ',' | ';' | '<' | '>' | '\\')
            || (i == 0 && (c == ' ' || c == '#'))
            || (i == last && c == ' ');
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn decode_attribute_value(value: &der::Any) -> Option<String> {
    value
        .decode_as::<String>()
        .ok()
        .or_else(|| {
            value
                .decode_as::<der::asn1::PrintableStringRef<'_>>()
                .ok()
                .map(|s| s.to_string())
        })
}
