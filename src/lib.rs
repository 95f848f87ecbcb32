//! # CsrKit - Key and Certificate Request Provisioning
//!
//! CsrKit provisions a fresh asymmetric key pair and a matching PKCS#10
//! certificate signing request (CSR) from declarative configuration, then
//! persists both artifacts to disk. It is built entirely with rustcrypto
//! libraries and has no dependencies on ring or openssl.
//!
//! ## Supported Key Types
//!
//! - **RSA**: 2048 bits and up
//! - **Ed25519**: Edwards curve digital signature algorithm
//!
//! ## Key Features
//!
//! - **PKCS#8 serialization**: private keys are written as PKCS#8 PEM,
//!   optionally password-encrypted (PBES2) with the "ENCRYPTED PRIVATE KEY"
//!   label
//! - **Conditional subjects**: optional distinguished-name fields are
//!   omitted from the CSR entirely when unset, never encoded as empty
//!   strings
//! - **IP subject alternative names**: a configured IPv4/IPv6 literal is
//!   carried as the sole entry of the CSR's SAN extension
//! - **Stage-tagged pipeline**: a linear, single-pass orchestrator that
//!   reports exactly which stage failed and why
//! - **Injectable capabilities**: configuration source, key generator, and
//!   file sink are traits, so the pipeline is testable without entropy or a
//!   filesystem
//!
//! ## Quick Start
//!
//! ### Generating a key and CSR in memory
//!
//! ```rust,no_run
//! use csrkit::{csr::CertificateRequest, csr::params::RequestParams, key::KeyPair};
//!
//! # fn main() -> Result<(), csrkit::error::Error> {
//! let key = KeyPair::generate_ed25519();
//!
//! let params = RequestParams::builder()
//!     .common_name("host.example.com".to_string())
//!     .organization("Example Corp".to_string())
//!     .ip_address("192.168.1.1".to_string())
//!     .build();
//!
//! let request = CertificateRequest::build(&key, &params)?;
//! println!("{}", request.to_pem()?);
//!
//! // Serialize the private key, encrypted at rest.
//! let document = key.to_pkcs8_pem(Some("correct horse battery staple"))?;
//! println!("{}", document.pem());
//! # Ok(())
//! # }
//! ```
//!
//! ### Running the full pipeline
//!
//! ```rust,no_run
//! use csrkit::pipeline::Pipeline;
//!
//! fn main() {
//!     if let Err(err) = Pipeline::from_env().run() {
//!         eprintln!("csrkit: {err}");
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! with a `config.yaml` (or a file named by the `CONFIG_PATH` environment
//! variable) shaped like:
//!
//! ```yaml
//! key:
//!   type: rsa            # or ed25519
//!   bits: 4096           # RSA modulus size; ignored for ed25519
//!   output: private.key
//! csr:
//!   common_name: host.example.com
//!   organization: Example Corp
//!   ip_address: 192.168.1.1
//! certificate:
//!   output: certificate.pem
//! ```
//!
//! The private key file is written mode 0600, the CSR mode 0644. A failure
//! after the key was persisted leaves the key file on disk.
//!
//! ## Error Handling
//!
//! Failures carry a distinct kind per failure class:
//!
//! ```rust
//! use csrkit::{error::Error, key::KeyPair};
//!
//! match KeyPair::from_pkcs8_pem("invalid pem data", None) {
//!     Ok(_) => println!("key imported successfully"),
//!     Err(Error::Decode(msg)) => println!("failed to decode key: {msg}"),
//!     Err(Error::Authentication(msg)) => println!("wrong password: {msg}"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`key`]: Key generation and PKCS#8 import/export
//! - [`csr`]: Certificate request construction, signing, and encoding
//! - [`config`]: Configuration model, YAML loading, and validation
//! - [`pipeline`]: The provisioning pipeline and its capability traits
//! - [`error`]: Error types

pub mod config;
pub mod csr;
pub mod error;
pub mod key;
pub mod pipeline;
