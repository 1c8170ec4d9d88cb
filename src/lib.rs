//! Hexagon - encrypted credentials, notes and MFA seeds with secure sharing.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── crypt         # seal, open, digest, generate
//! │   ├── user          # Registration and password change
//! │   ├── record        # Record CRUD
//! │   ├── share         # Share create, accept, decline, revoke
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── cipher/       # Cryptographic primitives
//!     │   ├── kdf       # PBKDF2-HMAC-SHA256 key derivation
//!     │   ├── aead      # AES-256-GCM behind the Cipher trait
//!     │   └── envelope  # salt || iv || ciphertext sealed values
//!     ├── keys          # Key wrapping and password rotation
//!     ├── record        # Record fields sealed under a record key
//!     ├── share         # Share tokens and links
//!     ├── store/        # Persistence backends
//!     │   ├── mod       # Store trait
//!     │   ├── fs        # TOML file storage
//!     │   └── memory    # In-memory storage
//!     ├── vault/        # Users, records and the share lifecycle
//!     ├── config        # ~/.hexagon/config.toml management
//!     └── worker        # Off-thread derivation (feature "worker")
//! ```
//!
//! # Example
//!
//! ```no_run
//! use hexagon::core::cipher::{open, seal};
//!
//! let sealed = seal("hunter2", "correct-horse")?;
//! assert_eq!(open(&sealed, "correct-horse")?.as_str(), "hunter2");
//! # Ok::<(), hexagon::error::Error>(())
//! ```
//!
//! # Features
//!
//! - Password-derived envelopes with authenticated encryption
//! - Per-record keys wrapped under each owner's master key
//! - Single-use share tokens whose secret travels only in the link
//! - Atomic password change

pub mod cli;
pub mod core;
pub mod error;
