//! Human-readable rendering of claims, records and verdicts.

use std::fmt::Write as _;
use std::process::ExitCode;

use veridia_types::time::{from_micros, to_iso8601};
use veridia_types::LandRecord;
use veridia_verification::link::explorer_account_url;
use veridia_verification::{ClaimField, LandClaim, VerdictOutcome, VerificationVerdict};

pub const EXIT_VERIFIED: u8 = 0;
/// The registry contradicts the claim or has no such parcel.
pub const EXIT_NOT_VERIFIED: u8 = 1;
/// The registry could not be asked, or anything else went wrong.
pub const EXIT_FAILURE: u8 = 2;
/// The token itself was unusable.
pub const EXIT_INVALID_DATA: u8 = 3;

/// Exit status of `veridia verify`.
pub fn verdict_exit_code(outcome: VerdictOutcome) -> u8 {
    match outcome {
        VerdictOutcome::Verified => EXIT_VERIFIED,
        VerdictOutcome::Mismatch | VerdictOutcome::NotFound => EXIT_NOT_VERIFIED,
        VerdictOutcome::Unverifiable => EXIT_FAILURE,
    }
}

pub fn exit(code: u8) -> ExitCode {
    ExitCode::from(code)
}

fn registered_at(record: &LandRecord) -> String {
    from_micros(record.registered_at_micros)
        .map(to_iso8601)
        .unwrap_or_else(|| format!("{} µs", record.registered_at_micros))
}

pub fn render_record(record: &LandRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "land id:        {}", record.id);
    let _ = writeln!(out, "owner:          {}", record.owner);
    let _ = writeln!(out, "jurisdiction:   {}", record.jurisdiction);
    let _ = writeln!(out, "metadata hash:  {}", record.metadata_hash);
    let _ = writeln!(out, "status:         {}", record.status);
    let _ = writeln!(out, "registered at:  {}", registered_at(record));
    out
}

pub fn render_verdict(claim: &LandClaim, verdict: &VerificationVerdict) -> String {
    let outcome = verdict.outcome();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: land {} on {}",
        outcome.as_str().to_uppercase(),
        claim.land_id,
        claim.network
    );

    match outcome {
        VerdictOutcome::Verified | VerdictOutcome::Mismatch => {
            if let Some(live) = &verdict.live_record {
                let flag = |field: ClaimField| {
                    if verdict.mismatches.contains(&field) {
                        "  <- differs"
                    } else {
                        ""
                    }
                };
                let _ = writeln!(
                    out,
                    "owner:          claimed {}, registry {}{}",
                    claim.owner,
                    live.owner,
                    flag(ClaimField::Owner)
                );
                let _ = writeln!(
                    out,
                    "jurisdiction:   claimed {}, registry {}{}",
                    claim.jurisdiction,
                    live.jurisdiction,
                    flag(ClaimField::Jurisdiction)
                );
                let _ = writeln!(out, "status:         {}", live.status);
                let _ = writeln!(out, "registered at:  {}", registered_at(live));
                let _ = writeln!(
                    out,
                    "owner account:  {}",
                    explorer_account_url(claim.network, &live.owner)
                );
            }
        }
        VerdictOutcome::NotFound => {
            let _ = writeln!(
                out,
                "the registry at {} has no land with this id",
                claim.contract_address
            );
        }
        VerdictOutcome::Unverifiable => {
            if let Some(error) = &verdict.error {
                let _ = writeln!(out, "{error}");
            }
        }
    }
    let _ = writeln!(out, "claimed at:     {}", claim.timestamp);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridia_nullables::NullRegistry;
    use veridia_registry::RegistryError;
    use veridia_types::{LandId, LandStatus, Network};
    use veridia_verification::{ClaimKind, Confirmer};

    fn claim(owner: &str) -> LandClaim {
        LandClaim {
            land_id: LandId::new(42).unwrap(),
            owner: owner.into(),
            jurisdiction: "Lagos, Nigeria".into(),
            metadata_hash: "bafymeta".into(),
            contract_address: "0xa11ce".into(),
            timestamp: "2024-05-01T12:00:00.000Z".into(),
            transaction_hash: None,
            network: Network::Devnet,
            kind: ClaimKind::LandRegistry,
        }
    }

    fn registry() -> NullRegistry {
        let registry = NullRegistry::new();
        registry.insert(
            "0xa11ce",
            LandRecord {
                id: LandId::new(42).unwrap(),
                owner: "0xdef".into(),
                jurisdiction: "Lagos, Nigeria".into(),
                metadata_hash: "bafymeta".into(),
                status: LandStatus::Frozen,
                registered_at_micros: 1_714_564_800_000_000,
            },
        );
        registry
    }

    #[test]
    fn exit_codes() {
        assert_eq!(verdict_exit_code(VerdictOutcome::Verified), 0);
        assert_eq!(verdict_exit_code(VerdictOutcome::Mismatch), 1);
        assert_eq!(verdict_exit_code(VerdictOutcome::NotFound), 1);
        assert_eq!(verdict_exit_code(VerdictOutcome::Unverifiable), 2);
        assert_eq!(verdict_exit_code(VerdictOutcome::NotFound), EXIT_NOT_VERIFIED);
        assert_eq!(EXIT_INVALID_DATA, 3);
    }

    #[tokio::test]
    async fn mismatch_marks_differing_field() {
        let confirmer = Confirmer::new(registry());
        let claim = claim("0xabc");
        let verdict = confirmer.confirm(&claim).await;
        let text = render_verdict(&claim, &verdict);
        assert!(text.starts_with("MISMATCH: land 42 on devnet"));
        assert!(text.contains("claimed 0xabc, registry 0xdef  <- differs"));
        assert!(text.contains("status:         frozen"));
        assert!(text.contains("registered at:  2024-05-01T12:00:00.000Z"));
    }

    #[tokio::test]
    async fn unverifiable_shows_error() {
        let registry = registry();
        registry.fail_with(RegistryError::Timeout("10s elapsed".into()));
        let confirmer = Confirmer::new(registry);
        let claim = claim("0xdef");
        let text = render_verdict(&claim, &confirmer.confirm(&claim).await);
        assert!(text.starts_with("COULD NOT VERIFY"));
        assert!(text.contains("10s elapsed"));
    }

    #[test]
    fn record_lists_every_field() {
        let record = LandRecord {
            id: LandId::new(3).unwrap(),
            owner: "0xabc".into(),
            jurisdiction: "Accra".into(),
            metadata_hash: "bafy".into(),
            status: LandStatus::Active,
            registered_at_micros: 0,
        };
        let text = render_record(&record);
        assert!(text.contains("land id:        3"));
        assert!(text.contains("status:         active"));
        assert!(text.contains("registered at:  1970-01-01T00:00:00.000Z"));
    }
}
