//! X.509 chain verification outcomes
//!
//! The reason table is indexed by the numeric verify code, following the
//! OpenSSL 1.1.1 `verify` return code names. It is constant data, built into
//! the binary and never recomputed.

use serde::Serialize;

/// Verify code for a chain that validated against the trust store
pub const VERIFY_OK: u32 = 0;
/// Verify code for a chain containing an expired certificate
pub const VERIFY_CERT_HAS_EXPIRED: u32 = 10;

/// `(symbolic name, text label)` for every verify code
pub static VERIFY_REASONS: [(&str, &str); 77] = [
    ("X509_V_OK", "ok"),
    ("X509_V_ERR_UNSPECIFIED", "unspecified certificate verification error"),
    ("X509_V_ERR_UNABLE_TO_GET_ISSUER_CERT", "unable to get issuer certificate"),
    ("X509_V_ERR_UNABLE_TO_GET_CRL", "unable to get certificate CRL"),
    ("X509_V_ERR_UNABLE_TO_DECRYPT_CERT_SIGNATURE", "unable to decrypt certificate's signature"),
    ("X509_V_ERR_UNABLE_TO_DECRYPT_CRL_SIGNATURE", "unable to decrypt CRL's signature"),
    ("X509_V_ERR_UNABLE_TO_DECODE_ISSUER_PUBLIC_KEY", "unable to decode issuer public key"),
    ("X509_V_ERR_CERT_SIGNATURE_FAILURE", "certificate signature failure"),
    ("X509_V_ERR_CRL_SIGNATURE_FAILURE", "CRL signature failure"),
    ("X509_V_ERR_CERT_NOT_YET_VALID", "certificate is not yet valid"),
    ("X509_V_ERR_CERT_HAS_EXPIRED", "certificate has expired"),
    ("X509_V_ERR_CRL_NOT_YET_VALID", "CRL is not yet valid"),
    ("X509_V_ERR_CRL_HAS_EXPIRED", "CRL has expired"),
    ("X509_V_ERR_ERROR_IN_CERT_NOT_BEFORE_FIELD", "format error in certificate's notBefore field"),
    ("X509_V_ERR_ERROR_IN_CERT_NOT_AFTER_FIELD", "format error in certificate's notAfter field"),
    ("X509_V_ERR_ERROR_IN_CRL_LAST_UPDATE_FIELD", "format error in CRL's lastUpdate field"),
    ("X509_V_ERR_ERROR_IN_CRL_NEXT_UPDATE_FIELD", "format error in CRL's nextUpdate field"),
    ("X509_V_ERR_OUT_OF_MEM", "out of memory"),
    ("X509_V_ERR_DEPTH_ZERO_SELF_SIGNED_CERT", "self signed certificate"),
    ("X509_V_ERR_SELF_SIGNED_CERT_IN_CHAIN", "self signed certificate in certificate chain"),
    ("X509_V_ERR_UNABLE_TO_GET_ISSUER_CERT_LOCALLY", "unable to get local issuer certificate"),
    ("X509_V_ERR_UNABLE_TO_VERIFY_LEAF_SIGNATURE", "unable to verify the first certificate"),
    ("X509_V_ERR_CERT_CHAIN_TOO_LONG", "certificate chain too long"),
    ("X509_V_ERR_CERT_REVOKED", "certificate revoked"),
    ("X509_V_ERR_INVALID_CA", "invalid CA certificate"),
    ("X509_V_ERR_PATH_LENGTH_EXCEEDED", "path length constraint exceeded"),
    ("X509_V_ERR_INVALID_PURPOSE", "unsupported certificate purpose"),
    ("X509_V_ERR_CERT_UNTRUSTED", "certificate not trusted"),
    ("X509_V_ERR_CERT_REJECTED", "certificate rejected"),
    ("X509_V_ERR_SUBJECT_ISSUER_MISMATCH", "subject issuer mismatch"),
    ("X509_V_ERR_AKID_SKID_MISMATCH", "authority and subject key identifier mismatch"),
    ("X509_V_ERR_AKID_ISSUER_SERIAL_MISMATCH", "authority and issuer serial number mismatch"),
    ("X509_V_ERR_KEYUSAGE_NO_CERTSIGN", "key usage does not include certificate signing"),
    ("X509_V_ERR_UNABLE_TO_GET_CRL_ISSUER", "unable to get CRL issuer certificate"),
    ("X509_V_ERR_UNHANDLED_CRITICAL_EXTENSION", "unhandled critical extension"),
    ("X509_V_ERR_KEYUSAGE_NO_CRL_SIGN", "key usage does not include CRL signing"),
    ("X509_V_ERR_UNHANDLED_CRITICAL_CRL_EXTENSION", "unhandled critical CRL extension"),
    ("X509_V_ERR_INVALID_NON_CA", "invalid non-CA certificate (has CA markings)"),
    ("X509_V_ERR_PROXY_PATH_LENGTH_EXCEEDED", "proxy path length constraint exceeded"),
    ("X509_V_ERR_PROXY_SUBJECT_INVALID", "proxy certificate subject is invalid"),
    ("X509_V_ERR_KEYUSAGE_NO_DIGITAL_SIGNATURE", "key usage does not include digital signature"),
    ("X509_V_ERR_PROXY_CERTIFICATES_NOT_ALLOWED", "proxy certificates not allowed"),
    ("X509_V_ERR_INVALID_EXTENSION", "invalid or inconsistent certificate extension"),
    ("X509_V_ERR_INVALID_POLICY_EXTENSION", "invalid or inconsistent certificate policy extension"),
    ("X509_V_ERR_NO_EXPLICIT_POLICY", "no explicit policy"),
    ("X509_V_ERR_DIFFERENT_CRL_SCOPE", "different CRL scope"),
    ("X509_V_ERR_UNSUPPORTED_EXTENSION_FEATURE", "unsupported extension feature"),
    ("X509_V_ERR_UNNESTED_RESOURCE", "RFC 3779 resource not subset of parent's resources"),
    ("X509_V_ERR_PERMITTED_VIOLATION", "permitted subtree violation"),
    ("X509_V_ERR_EXCLUDED_VIOLATION", "excluded subtree violation"),
    ("X509_V_ERR_SUBTREE_MINMAX", "name constraints minimum and maximum not supported"),
    ("X509_V_ERR_APPLICATION_VERIFICATION", "application verification failure"),
    ("X509_V_ERR_UNSUPPORTED_CONSTRAINT_TYPE", "unsupported name constraint type"),
    ("X509_V_ERR_UNSUPPORTED_CONSTRAINT_SYNTAX", "unsupported or invalid name constraint syntax"),
    ("X509_V_ERR_UNSUPPORTED_NAME_SYNTAX", "unsupported or invalid name syntax"),
    ("X509_V_ERR_CRL_PATH_VALIDATION_ERROR", "CRL path validation error"),
    ("X509_V_ERR_PATH_LOOP", "path loop"),
    ("X509_V_ERR_SUITE_B_INVALID_VERSION", "Suite B: certificate version invalid"),
    ("X509_V_ERR_SUITE_B_INVALID_ALGORITHM", "Suite B: invalid public key algorithm"),
    ("X509_V_ERR_SUITE_B_INVALID_CURVE", "Suite B: invalid ECC curve"),
    ("X509_V_ERR_SUITE_B_INVALID_SIGNATURE_ALGORITHM", "Suite B: invalid signature algorithm"),
    ("X509_V_ERR_SUITE_B_LOS_NOT_ALLOWED", "Suite B: curve not allowed for this LOS"),
    ("X509_V_ERR_SUITE_B_CANNOT_SIGN_P_384_WITH_P_256", "Suite B: cannot sign P-384 with P-256"),
    ("X509_V_ERR_HOSTNAME_MISMATCH", "hostname mismatch"),
    ("X509_V_ERR_EMAIL_MISMATCH", "email address mismatch"),
    ("X509_V_ERR_IP_ADDRESS_MISMATCH", "IP address mismatch"),
    ("X509_V_ERR_DANE_NO_MATCH", "no matching DANE TLSA records"),
    ("X509_V_ERR_EE_KEY_TOO_SMALL", "EE certificate key too weak"),
    ("X509_ERR_CA_KEY_TOO_SMALL", "CA certificate key too weak"),
    ("X509_ERR_CA_MD_TOO_WEAK", "CA signature digest algorithm too weak"),
    ("X509_V_ERR_INVALID_CALL", "invalid certificate verification context"),
    ("X509_V_ERR_STORE_LOOKUP", "issuer certificate lookup error"),
    ("X509_V_ERR_NO_VALID_SCTS", "certificate transparency required, but no valid SCTs found"),
    ("X509_V_ERR_PROXY_SUBJECT_NAME_VIOLATION", "proxy subject name violation"),
    ("X509_V_ERR_OCSP_VERIFY_NEEDED", "OCSP verification needed"),
    ("X509_V_ERR_OCSP_VERIFY_FAILED", "OCSP verification failed"),
    ("X509_V_ERR_OCSP_CERT_UNKNOWN", "OCSP unknown cert"),
];

/// Named verify codes produced by the chain retriever
pub mod codes {
    pub const UNSPECIFIED: u32 = 1;
    pub const UNABLE_TO_GET_CRL: u32 = 3;
    pub const CERT_SIGNATURE_FAILURE: u32 = 7;
    pub const CERT_NOT_YET_VALID: u32 = 9;
    pub const CERT_HAS_EXPIRED: u32 = super::VERIFY_CERT_HAS_EXPIRED;
    pub const CRL_HAS_EXPIRED: u32 = 12;
    pub const DEPTH_ZERO_SELF_SIGNED_CERT: u32 = 18;
    pub const SELF_SIGNED_CERT_IN_CHAIN: u32 = 19;
    pub const UNABLE_TO_GET_ISSUER_CERT_LOCALLY: u32 = 20;
    pub const CERT_REVOKED: u32 = 23;
    pub const INVALID_CA: u32 = 24;
    pub const INVALID_PURPOSE: u32 = 26;
    pub const UNHANDLED_CRITICAL_EXTENSION: u32 = 34;
    pub const APPLICATION_VERIFICATION: u32 = 51;
    pub const HOSTNAME_MISMATCH: u32 = 63;
}

/// Look up the `(name, text)` pair for a verify code
pub fn reason(code: u32) -> Option<(&'static str, &'static str)> {
    VERIFY_REASONS.get(code as usize).copied()
}

/// Chain verification result as reported by the TLS stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyOutcome {
    pub code: u32,
    pub text: String,
}

impl VerifyOutcome {
    pub fn ok() -> Self {
        Self::from_code(VERIFY_OK)
    }

    /// Build an outcome from a code, using the table's text label
    pub fn from_code(code: u32) -> Self {
        let text = reason(code)
            .map(|(_, text)| text.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self { code, text }
    }

    pub fn is_ok(&self) -> bool {
        self.code == VERIFY_OK
    }

    pub fn is_expired(&self) -> bool {
        self.code == VERIFY_CERT_HAS_EXPIRED
    }

    /// Symbolic `X509_V_...` name for this outcome
    pub fn name(&self) -> &'static str {
        reason(self.code)
            .map(|(name, _)| name)
            .unwrap_or("X509_V_ERR_UNKNOWN")
    }
}
