use proptest::prelude::*;

use sirius_types::{
    dto_to_u128, dto_to_u64, u128_to_dto, u64_to_dto, Address, Mosaic, MosaicId, MosaicNonce,
    NetworkType, PublicKey, Recipient,
};

proptest! {
    /// u64 DTO split/recombine are inverses.
    #[test]
    fn u64_dto_roundtrip(v in any::<u64>()) {
        prop_assert_eq!(dto_to_u64(u64_to_dto(v)), v);
    }

    /// The DTO low word really is the low 32 bits.
    #[test]
    fn u64_dto_low_word(v in any::<u64>()) {
        prop_assert_eq!(u64_to_dto(v)[0], v as u32);
        prop_assert_eq!(u64_to_dto(v)[1], (v >> 32) as u32);
    }

    /// u128 DTO split/recombine are inverses.
    #[test]
    fn u128_dto_roundtrip(v in any::<u128>()) {
        prop_assert_eq!(dto_to_u128(u128_to_dto(v)), v);
    }

    /// Addresses derived from arbitrary keys always carry a valid checksum
    /// and the right network prefix, on every network.
    #[test]
    fn derived_addresses_are_valid(bytes in prop::array::uniform32(0u8..)) {
        let key = PublicKey(bytes);
        for net in [
            NetworkType::MainNet,
            NetworkType::TestNet,
            NetworkType::Mijin,
            NetworkType::MijinTest,
        ] {
            let addr = Address::create_from_public_key(&key, net);
            prop_assert!(addr.is_valid());
            prop_assert!(addr.plain().starts_with(net.prefix()));
        }
    }

    /// Raw-address parsing inverts plain().
    #[test]
    fn address_plain_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let key = PublicKey(bytes);
        let addr = Address::create_from_public_key(&key, NetworkType::MainNet);
        prop_assert_eq!(Address::create_from_raw_address(&addr.plain()).unwrap(), addr);
    }

    /// Flipping a single bit anywhere in the 25 bytes breaks the checksum.
    #[test]
    fn single_byte_corruption_detected(
        bytes in prop::array::uniform32(0u8..),
        index in 0usize..25,
        flip in 1u8..=255,
    ) {
        let key = PublicKey(bytes);
        let addr = Address::create_from_public_key(&key, NetworkType::TestNet);
        let mut raw = *addr.as_bytes();
        raw[index] ^= flip;
        if let Ok(corrupted) = Address::from_bytes(raw) {
            prop_assert!(!corrupted.is_valid());
        }
    }

    /// Mosaic id derivation clears the top bit and is a pure function.
    #[test]
    fn mosaic_id_high_bit_clear(nonce in any::<u32>(), owner in prop::array::uniform32(0u8..)) {
        let key = PublicKey(owner);
        let id = MosaicId::from_nonce_and_owner(MosaicNonce::new(nonce), &key);
        prop_assert_eq!(id.as_u64() >> 63, 0);
        prop_assert_eq!(id, MosaicId::from_nonce_and_owner(MosaicNonce::new(nonce), &key));
    }

    /// The recipient slot decodes back to what was encoded, for both forms.
    #[test]
    fn recipient_slot_roundtrip(owner in prop::array::uniform32(0u8..)) {
        let key = PublicKey(owner);
        let addr = Address::create_from_public_key(&key, NetworkType::TestNet);
        let recipient = Recipient::from(addr);
        let slot = recipient.to_catbuffer(NetworkType::TestNet);
        prop_assert_eq!(Recipient::from_catbuffer(&slot).unwrap(), recipient);
    }

    /// Mosaic value type keeps its fields.
    #[test]
    fn mosaic_fields(id in any::<u64>(), amount in any::<u64>()) {
        let mosaic = Mosaic::new(MosaicId::new(id), amount);
        prop_assert_eq!(mosaic.id.as_u64(), id);
        prop_assert_eq!(mosaic.amount, amount);
    }
}
