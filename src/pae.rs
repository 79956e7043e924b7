//! Implements "Pre-Authentication Encoding". An encoding scheme unique to
//! paseto, used as the message that gets MACed (local) or signed (public).
//!
//! Every piece is prefixed with its length, and the whole list with its count,
//! so no two different lists of pieces can encode to the same bytes. See:
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/01-Protocol-Versions/Common.md#authentication-padding>

/// Performs little endian encoding of an unsigned 64 bit integer.
#[allow(clippy::cast_possible_truncation)]
pub fn le64(mut to_encode: u64) -> [u8; 8] {
	let mut encoded = [0_u8; 8];

	for byte in encoded.iter_mut() {
		*byte = (to_encode & 255) as u8;
		to_encode >>= 8;
	}

	encoded
}

/// Performs the actual pre authentication encoding for a list of binary
/// strings.
#[must_use]
pub fn pae(pieces: &[&[u8]]) -> Vec<u8> {
	let capacity = 8 + pieces.iter().map(|piece| 8 + piece.len()).sum::<usize>();
	let mut the_vec = Vec::with_capacity(capacity);
	the_vec.extend_from_slice(&le64(pieces.len() as u64));

	pieces.iter().fold(the_vec, |mut acc, piece| {
		acc.extend_from_slice(&le64(piece.len() as u64));
		acc.extend_from_slice(piece);
		acc
	})
}
