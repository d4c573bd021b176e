//! Wide-integer DTO codec.
//!
//! The REST wire format represents unsigned 64-bit integers as `[low, high]`
//! pairs of 32-bit words (JSON numbers are not wide enough), and 128-bit
//! integers as a pair of such pairs. The catbuffer form of the same values is
//! fixed-width little-endian, handled by the catbuffer writer/reader.

/// Split a u64 into its `[low32, high32]` DTO form.
pub fn u64_to_dto(value: u64) -> [u32; 2] {
    [value as u32, (value >> 32) as u32]
}

/// Recombine a `[low32, high32]` DTO pair into a u64.
pub fn dto_to_u64(dto: [u32; 2]) -> u64 {
    (dto[1] as u64) << 32 | dto[0] as u64
}

/// Split a u128 into its nested `[[low64], [high64]]` DTO form, each half a
/// `[low32, high32]` pair.
pub fn u128_to_dto(value: u128) -> [[u32; 2]; 2] {
    [u64_to_dto(value as u64), u64_to_dto((value >> 64) as u64)]
}

/// Recombine a nested 2x2 DTO array into a u128.
pub fn dto_to_u128(dto: [[u32; 2]; 2]) -> u128 {
    (dto_to_u64(dto[1]) as u128) << 64 | dto_to_u64(dto[0]) as u128
}
