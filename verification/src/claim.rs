//! The claim carried by a verification token.

use serde::{Deserialize, Serialize};

use veridia_types::time::to_iso8601;
use veridia_types::{Clock, LandId, LandRecord, Network};

/// Assertions about a land record at the time a verification link was made.
///
/// Field order is the wire order: serialization follows declaration order,
/// which keeps tokens reproducible across implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandClaim {
    pub land_id: LandId,
    /// Owner at the time the claim was made.
    pub owner: String,
    pub jurisdiction: String,
    /// Content address of the off-chain document bundle.
    pub metadata_hash: String,
    /// Registry contract to confirm against.
    pub contract_address: String,
    /// ISO-8601 time the claim was made (not the registration time).
    pub timestamp: String,
    /// Transaction that produced the claimed state, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(with = "network_tag")]
    pub network: Network,
    #[serde(rename = "type")]
    pub kind: ClaimKind,
}

/// Discriminator marking a token as a land registry claim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimKind {
    #[default]
    #[serde(rename = "land_registry")]
    LandRegistry,
}

impl ClaimKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LandRegistry => "land_registry",
        }
    }
}

/// Serializes [`Network`] as its verification tag (`aptos-devnet`).
mod network_tag {
    use serde::{Deserialize, Deserializer, Serializer};
    use veridia_types::Network;

    pub fn serialize<S: Serializer>(network: &Network, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&network.tag())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Network, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Network::from_tag(&tag).map_err(serde::de::Error::custom)
    }
}

/// Builds claims for one registry contract.
#[derive(Clone, Debug)]
pub struct ClaimBuilder {
    contract_address: String,
    network: Network,
    transaction_hash: Option<String>,
}

impl ClaimBuilder {
    pub fn new(contract_address: impl Into<String>, network: Network) -> Self {
        Self {
            contract_address: contract_address.into(),
            network,
            transaction_hash: None,
        }
    }

    /// Reference the transaction that produced the claimed state.
    pub fn transaction_hash(mut self, hash: impl Into<String>) -> Self {
        let hash = hash.into();
        self.transaction_hash = (!hash.trim().is_empty()).then_some(hash);
        self
    }

    /// Claim the current state of `record`, stamped with the clock's time.
    pub fn for_record(&self, record: &LandRecord, clock: &dyn Clock) -> LandClaim {
        self.for_parts(
            record.id,
            &record.owner,
            &record.jurisdiction,
            &record.metadata_hash,
            clock,
        )
    }

    /// Claim arbitrary parcel fields, e.g. right after a registration whose
    /// record is not yet readable.
    pub fn for_parts(
        &self,
        land_id: LandId,
        owner: &str,
        jurisdiction: &str,
        metadata_hash: &str,
        clock: &dyn Clock,
    ) -> LandClaim {
        LandClaim {
            land_id,
            owner: owner.to_string(),
            jurisdiction: jurisdiction.to_string(),
            metadata_hash: metadata_hash.to_string(),
            contract_address: self.contract_address.clone(),
            timestamp: to_iso8601(clock.now()),
            transaction_hash: self.transaction_hash.clone(),
            network: self.network,
            kind: ClaimKind::LandRegistry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridia_nullables::NullClock;
    use veridia_types::LandStatus;

    fn record() -> LandRecord {
        LandRecord {
            id: LandId::new(42).unwrap(),
            owner: "0xabc".into(),
            jurisdiction: "Lagos, Nigeria".into(),
            metadata_hash: "bafymeta".into(),
            status: LandStatus::Active,
            registered_at_micros: 1_600_000_000_000_000,
        }
    }

    #[test]
    fn builder_stamps_claim_time() {
        let clock = NullClock::at_secs(1_714_564_800);
        let claim = ClaimBuilder::new("0xa11ce", Network::Devnet).for_record(&record(), &clock);
        assert_eq!(claim.land_id.get(), 42);
        assert_eq!(claim.owner, "0xabc");
        assert_eq!(claim.contract_address, "0xa11ce");
        assert_eq!(claim.timestamp, "2024-05-01T12:00:00.000Z");
        assert_eq!(claim.transaction_hash, None);
        assert_eq!(claim.kind, ClaimKind::LandRegistry);
    }

    #[test]
    fn builder_ignores_blank_transaction_hash() {
        let clock = NullClock::at_secs(0);
        let builder = ClaimBuilder::new("0x1", Network::Testnet).transaction_hash("  ");
        assert_eq!(builder.for_record(&record(), &clock).transaction_hash, None);
        let builder = builder.transaction_hash("0xfeed");
        assert_eq!(
            builder.for_record(&record(), &clock).transaction_hash.as_deref(),
            Some("0xfeed")
        );
    }

    #[test]
    fn wire_field_order_is_fixed() {
        let clock = NullClock::at_secs(0);
        let claim = ClaimBuilder::new("0x1", Network::Devnet)
            .transaction_hash("0xfeed")
            .for_record(&record(), &clock);
        let json = serde_json::to_string(&claim).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"landId":42,"owner":"0xabc","jurisdiction":"Lagos, Nigeria","#,
                r#""metadataHash":"bafymeta","contractAddress":"0x1","#,
                r#""timestamp":"1970-01-01T00:00:00.000Z","transactionHash":"0xfeed","#,
                r#""network":"aptos-devnet","type":"land_registry"}"#
            )
        );
    }
}
