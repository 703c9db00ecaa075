//! Verification links for land records.
//!
//! Two-sided process:
//! 1. **Produce**: the holder of a confirmed record builds a [`LandClaim`],
//!    encodes it into a URL-safe token and shares `https://<host>/verify?data=<token>`
//!    as a link or QR code.
//! 2. **Confirm**: anyone (no wallet needed) decodes the token and asks the
//!    registry for the live record; the [`Confirmer`] compares the two and
//!    returns a [`VerificationVerdict`].
//!
//! The token is self-contained and carries no secrets. It proves nothing by
//! itself: only the confirmation against the registry does.

pub mod claim;
pub mod codec;
pub mod confirmer;
pub mod error;
pub mod link;
pub mod qr;
pub mod verdict;

pub use claim::{ClaimBuilder, ClaimKind, LandClaim};
pub use codec::{decode, encode};
pub use confirmer::{confirm, Confirmer};
pub use error::{DecodeError, EncodeError, LinkError, QrError, QueryError};
pub use verdict::{ClaimField, VerdictOutcome, VerificationVerdict};
