use core::cmp::Ordering;
use core::ops::{Div, Rem};
use primitive_types::{H160, H256, U256};
use sha3::{Digest, Keccak256};

/// Convert a word into its minimal big-endian byte representation. Zero
/// encodes as the empty byte string.
pub fn int_to_big_endian(value: U256) -> Vec<u8> {
	let mut buffer = [0u8; 32];
	value.to_big_endian(&mut buffer);
	let skip = buffer.iter().position(|byte| *byte != 0).unwrap_or(32);
	buffer[skip..].to_vec()
}

/// Interpret bytes as a big-endian unsigned integer. Inputs longer than 32
/// bytes reduce to their low 32 bytes.
pub fn big_endian_to_int(bytes: &[u8]) -> U256 {
	if bytes.len() > 32 {
		U256::from_big_endian(&bytes[bytes.len() - 32..])
	} else {
		U256::from_big_endian(bytes)
	}
}

/// Left-pad bytes with zeros up to `len`. Longer inputs are returned
/// unchanged.
pub fn zpad(bytes: &[u8], len: usize) -> Vec<u8> {
	let mut padded = vec![0u8; len.saturating_sub(bytes.len())];
	padded.extend_from_slice(bytes);
	padded
}

/// Serialize a word. The word type already confines values to
/// `[0, 2^256)`, so this cannot fail.
pub fn encode_int(value: U256) -> Vec<u8> {
	int_to_big_endian(value)
}

/// Keccak-256 digest.
pub fn sha3(data: &[u8]) -> H256 {
	H256::from_slice(Keccak256::digest(data).as_slice())
}

/// Derive a contract identifier from the creator's address and a seed: the
/// low 20 bytes of the digest over the lowercase-hex address followed by
/// the seed bytes.
pub fn derive_contract_id(sender: H160, seed: &[u8]) -> H160 {
	let mut hasher = Keccak256::new();
	hasher.update(hex::encode(sender.as_bytes()).as_bytes());
	hasher.update(seed);
	let digest = hasher.finalize();
	H160::from_slice(&digest[12..])
}

/// The 32-byte big-endian form of a word.
pub fn u256_to_h256(value: U256) -> H256 {
	let mut bytes = [0u8; 32];
	value.to_big_endian(&mut bytes);
	H256(bytes)
}

pub fn h256_to_u256(value: H256) -> U256 {
	U256::from_big_endian(&value[..])
}

/// Truncate a word to an address: the low 20 bytes of its 32-byte
/// big-endian form. The only word-to-address path in the crate.
pub fn word_to_address(value: U256) -> H160 {
	let bytes = u256_to_h256(value);
	H160::from_slice(&bytes[12..])
}

/// Zero-extend an address into a word.
pub fn address_to_word(address: H160) -> U256 {
	U256::from_big_endian(address.as_bytes())
}

/// Clamp a word into `usize`, saturating at the maximum.
pub fn saturating_usize(value: U256) -> usize {
	if value > U256::from(usize::MAX) {
		usize::MAX
	} else {
		value.as_usize()
	}
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Sign {
	Plus,
	Minus,
	Zero,
}

const SIGN_BIT_MASK: U256 = U256([
	0xffffffffffffffff,
	0xffffffffffffffff,
	0xffffffffffffffff,
	0x7fffffffffffffff,
]);

/// The signed view of a word: `w` if `w < 2^255`, else `w - 2^256`,
/// carried as sign and magnitude.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct I256(pub Sign, pub U256);

impl I256 {
	/// Zero value of I256.
	pub fn zero() -> I256 {
		I256(Sign::Zero, U256::zero())
	}

	/// Minimum value of I256.
	pub fn min_value() -> I256 {
		I256(Sign::Minus, (U256::MAX & SIGN_BIT_MASK) + U256::from(1u64))
	}
}

impl Ord for I256 {
	fn cmp(&self, other: &I256) -> Ordering {
		match (self.0, other.0) {
			(Sign::Zero, Sign::Zero) => Ordering::Equal,
			(Sign::Zero, Sign::Plus) => Ordering::Less,
			(Sign::Zero, Sign::Minus) => Ordering::Greater,
			(Sign::Minus, Sign::Zero) => Ordering::Less,
			(Sign::Minus, Sign::Plus) => Ordering::Less,
			(Sign::Minus, Sign::Minus) => self.1.cmp(&other.1).reverse(),
			(Sign::Plus, Sign::Minus) => Ordering::Greater,
			(Sign::Plus, Sign::Zero) => Ordering::Greater,
			(Sign::Plus, Sign::Plus) => self.1.cmp(&other.1),
		}
	}
}

impl PartialOrd for I256 {
	fn partial_cmp(&self, other: &I256) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl From<U256> for I256 {
	fn from(val: U256) -> I256 {
		if val == U256::zero() {
			I256::zero()
		} else if val & SIGN_BIT_MASK == val {
			I256(Sign::Plus, val)
		} else {
			I256(Sign::Minus, !val + U256::from(1u64))
		}
	}
}

impl From<I256> for U256 {
	fn from(value: I256) -> U256 {
		let sign = value.0;
		if sign == Sign::Zero {
			U256::zero()
		} else if sign == Sign::Plus {
			value.1
		} else {
			!value.1 + U256::from(1u64)
		}
	}
}

impl Div for I256 {
	type Output = I256;

	/// Floor division: the quotient rounds toward negative infinity, so a
	/// mixed-sign division with a remainder steps one further than the
	/// magnitude quotient. Division by zero is zero.
	fn div(self, other: I256) -> I256 {
		if self.0 == Sign::Zero || other.0 == Sign::Zero {
			return I256::zero();
		}

		let quotient = self.1 / other.1;
		let exact = self.1 % other.1 == U256::zero();

		if self.0 == other.0 {
			if quotient == U256::zero() {
				I256::zero()
			} else {
				I256(Sign::Plus, quotient)
			}
		} else if exact {
			I256(Sign::Minus, quotient)
		} else {
			I256(Sign::Minus, quotient + U256::from(1u64))
		}
	}
}

impl Rem for I256 {
	type Output = I256;

	/// Floored modulo: a non-zero result takes the divisor's sign, so
	/// that `(a / b) * b + (a % b)` reconstructs `a`. Modulo zero is
	/// zero.
	fn rem(self, other: I256) -> I256 {
		if self.0 == Sign::Zero || other.0 == Sign::Zero {
			return I256::zero();
		}

		let remainder = self.1 % other.1;
		if remainder == U256::zero() {
			return I256::zero();
		}

		if self.0 == other.0 {
			I256(other.0, remainder)
		} else {
			I256(other.0, other.1 - remainder)
		}
	}
}
