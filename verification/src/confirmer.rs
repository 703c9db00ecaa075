//! Confirmation of claims against the live registry.
//!
//! Each confirmation is one read-only registry query followed by a field
//! comparison. Nothing is cached or mutated, so confirmations of the same or
//! different claims can run concurrently without coordination.
//!
//! Owner addresses are compared in canonical form (case and zero-padding
//! insensitive); jurisdictions must match exactly.

use futures_util::future::join_all;

use veridia_registry::RegistryReader;
use veridia_types::address::same_account;
use veridia_types::LandRecord;

use crate::claim::LandClaim;
use crate::codec::decode;
use crate::error::{DecodeError, QueryError};
use crate::link::token_from_url;
use crate::verdict::{ClaimField, VerificationVerdict};

/// Confirm `claim` against the registry behind `reader`.
pub async fn confirm<R: RegistryReader + ?Sized>(
    reader: &R,
    claim: &LandClaim,
) -> VerificationVerdict {
    let land_id = claim.land_id;
    let contract = claim.contract_address.as_str();

    match reader.get_land(contract, land_id).await {
        Ok(Some(record)) => {
            let mismatches = compare(claim, &record);
            if mismatches.is_empty() {
                tracing::info!(%land_id, %contract, "claim verified against registry");
            } else {
                tracing::info!(%land_id, %contract, ?mismatches, "claim contradicts registry");
            }
            VerificationVerdict::compared(record, mismatches)
        }
        Ok(None) => {
            tracing::info!(%land_id, %contract, "claimed land not found in registry");
            VerificationVerdict::not_found()
        }
        Err(e) => {
            tracing::warn!(%land_id, %contract, error = %e, "registry query failed");
            VerificationVerdict::unverifiable(QueryError::from(e))
        }
    }
}

fn compare(claim: &LandClaim, record: &LandRecord) -> Vec<ClaimField> {
    let mut mismatches = Vec::new();
    if !same_account(&record.owner, &claim.owner) {
        mismatches.push(ClaimField::Owner);
    }
    if record.jurisdiction != claim.jurisdiction {
        mismatches.push(ClaimField::Jurisdiction);
    }
    mismatches
}

/// Confirms claims against an injected registry reader.
pub struct Confirmer<R> {
    reader: R,
}

impl<R: RegistryReader> Confirmer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub async fn confirm(&self, claim: &LandClaim) -> VerificationVerdict {
        confirm(&self.reader, claim).await
    }

    /// Decode `token` and confirm it. A bad token fails before any query.
    pub async fn verify_token(&self, token: &str) -> Result<VerificationVerdict, DecodeError> {
        let claim = decode(token)?;
        Ok(self.confirm(&claim).await)
    }

    /// Extract the token from a verification link and confirm it.
    pub async fn verify_link(&self, url: &str) -> Result<VerificationVerdict, DecodeError> {
        let token = token_from_url(url)?;
        self.verify_token(&token).await
    }

    /// Confirm many claims concurrently. Verdicts are in input order.
    pub async fn confirm_all(&self, claims: &[LandClaim]) -> Vec<VerificationVerdict> {
        join_all(claims.iter().map(|claim| self.confirm(claim))).await
    }
}
