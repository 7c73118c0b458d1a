//! X.509 certificate decoding.

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use toolbox_model::{Result, ToolError};
use x509_parser::pem::parse_x509_pem;

const CONTEXT: &str = "Failed to decode certificate";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CertificateSummary {
    subject: String,
    issuer: String,
    not_before: String,
    not_after: String,
    serial_number: String,
    signature_algorithm: String,
    fingerprint: Fingerprints,
}

#[derive(Debug, Serialize)]
struct Fingerprints {
    sha1: String,
    sha256: String,
}

fn iso_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| timestamp.to_string())
}

/// Decode a PEM certificate: subject, issuer, validity, serial, signature
/// algorithm OID and DER fingerprints.
pub fn certificate(input: &str) -> Result<String> {
    let (_, pem) =
        parse_x509_pem(input.trim().as_bytes()).map_err(|e| ToolError::failed(CONTEXT, e))?;
    let certificate = pem.parse_x509().map_err(|e| ToolError::failed(CONTEXT, e))?;
    let validity = certificate.validity();

    let summary = CertificateSummary {
        subject: certificate.subject().to_string(),
        issuer: certificate.issuer().to_string(),
        not_before: iso_time(validity.not_before.timestamp()),
        not_after: iso_time(validity.not_after.timestamp()),
        serial_number: hex::encode(certificate.raw_serial()),
        signature_algorithm: certificate.signature_algorithm.algorithm.to_id_string(),
        fingerprint: Fingerprints {
            sha1: hex::encode(Sha1::digest(&pem.contents)),
            sha256: hex::encode(Sha256::digest(&pem.contents)),
        },
    };
    serde_json::to_string_pretty(&summary).map_err(|e| ToolError::failed(CONTEXT, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELF_SIGNED: &str = "\
        -----BEGIN CERTIFICATE-----\n\
        MIIBuTCCAV+gAwIBAgICEjQwCgYIKoZIzj0EAwIwOzELMAkGA1UEBhMCVVMxFTAT\n\
        BgNVBAoMDFRvb2xib3ggVGVzdDEVMBMGA1UEAwwMdG9vbGJveC50ZXN0MB4XDTI2\n\
        MTAxOTE1MzAyNVoXDTM2MTAxNjE1MzAyNVowOzELMAkGA1UEBhMCVVMxFTATBgNV\n\
        BAoMDFRvb2xib3ggVGVzdDEVMBMGA1UEAwwMdG9vbGJveC50ZXN0MFkwEwYHKoZI\n\
        zj0CAQYIKoZIzj0DAQcDQgAEkBG2lylMMQ+JU3lcC6/UfFSuLPdZogTPPmZ98JVz\n\
        EPUjYG8h8h1MjTO7XSHS+0zPPZlqHMRc+NgMwTT9rebFfKNTMFEwHQYDVR0OBBYE\n\
        FJX3JpO8YlDLoNh/QFfpnpuBydTVMB8GA1UdIwQYMBaAFJX3JpO8YlDLoNh/QFfp\n\
        npuBydTVMA8GA1UdEwEB/wQFMAMBAf8wCgYIKoZIzj0EAwIDSAAwRQIgCHej7NL4\n\
        KZqQQ9cYxTq270AwouXUYa4k50BkLu+Ik+8CIQD+gKOLWmDcMsVXSKMRceBzHdY4\n\
        rKK6p5/yCb7TuEwsHw==\n\
        -----END CERTIFICATE-----";

    #[test]
    fn decodes_self_signed_certificate() {
        let output = certificate(SELF_SIGNED).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["subject"], "C=US, O=Toolbox Test, CN=toolbox.test");
        assert_eq!(value["issuer"], value["subject"]);
        assert_eq!(value["notBefore"], "2026-10-19T15:30:25.000Z");
        assert_eq!(value["notAfter"], "2036-10-16T15:30:25.000Z");
        assert_eq!(value["serialNumber"], "1234");
        assert_eq!(value["signatureAlgorithm"], "1.2.840.10045.4.3.2");
        assert_eq!(
            value["fingerprint"]["sha256"],
            "eb374140fcd4fba7f381e0ce8ee7f66255feaddc68ea235fcd7cd8c2745478ee"
        );
    }

    #[test]
    fn garbage_is_rejected_with_context() {
        let error = certificate("-----BEGIN CERTIFICATE-----\nnope\n-----END CERTIFICATE-----")
            .unwrap_err();
        assert!(error.to_string().starts_with("Failed to decode certificate: "));
        assert!(certificate("").is_err());
    }

    #[test]
    fn iso_time_formats_utc() {
        assert_eq!(iso_time(1_640_995_200), "2022-01-01T00:00:00.000Z");
    }
}
