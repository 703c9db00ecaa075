use proptest::prelude::*;

use veridia_types::address::{normalize, same_account};
use veridia_types::{LandId, Network};

proptest! {
    /// LandId accepts exactly the positive integers.
    #[test]
    fn land_id_new_accepts_positive(id in 0u64..u64::MAX) {
        let parsed = LandId::new(id);
        prop_assert_eq!(parsed.is_ok(), id > 0);
        if let Ok(land_id) = parsed {
            prop_assert_eq!(land_id.get(), id);
        }
    }

    /// LandId Display -> FromStr roundtrip.
    #[test]
    fn land_id_display_parse_roundtrip(id in 1u64..u64::MAX) {
        let land_id = LandId::new(id).unwrap();
        let parsed: LandId = land_id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, land_id);
    }

    /// Leading zeros and case never change the canonical address.
    #[test]
    fn normalize_ignores_zero_padding_and_case(
        digits in "[1-9a-f][0-9a-f]{0,40}",
        pad in 0usize..20,
    ) {
        let padded = format!("0x{}{}", "0".repeat(pad), digits.to_uppercase());
        prop_assert_eq!(normalize(&padded), format!("0x{digits}"));
        prop_assert!(same_account(&padded, &digits));
    }

    /// normalize is idempotent.
    #[test]
    fn normalize_idempotent(raw in "[ 0-9a-fA-Fx]{0,70}") {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once.clone());
    }
}

#[test]
fn network_parse_covers_all_variants() {
    for name in ["mainnet", "testnet", "devnet", "local"] {
        let network: Network = name.parse().unwrap();
        assert_eq!(network.as_str(), name);
    }
}
