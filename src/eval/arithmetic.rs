use crate::codec::I256;
use primitive_types::{U256, U512};

pub fn add(op1: U256, op2: U256) -> U256 {
	op1.overflowing_add(op2).0
}

pub fn sub(op1: U256, op2: U256) -> U256 {
	op1.overflowing_sub(op2).0
}

pub fn mul(op1: U256, op2: U256) -> U256 {
	op1.overflowing_mul(op2).0
}

pub fn div(op1: U256, op2: U256) -> U256 {
	op1.checked_div(op2).unwrap_or_else(U256::zero)
}

pub fn rem(op1: U256, op2: U256) -> U256 {
	op1.checked_rem(op2).unwrap_or_else(U256::zero)
}

pub fn sdiv(op1: U256, op2: U256) -> U256 {
	U256::from(I256::from(op1) / I256::from(op2))
}

pub fn srem(op1: U256, op2: U256) -> U256 {
	U256::from(I256::from(op1) % I256::from(op2))
}

pub fn neg(op1: U256) -> U256 {
	U256::zero().overflowing_sub(op1).0
}

pub fn exp(op1: U256, op2: U256) -> U256 {
	let mut result = U256::one();
	let mut base = op1;
	let mut power = op2;
	while power != U256::zero() {
		if power & U256::one() != U256::zero() {
			result = result.overflowing_mul(base).0;
		}
		base = base.overflowing_mul(base).0;
		power = power >> 1;
	}
	result
}

fn low_u256(value: U512) -> U256 {
	let mut bytes = [0u8; 64];
	value.to_big_endian(&mut bytes);
	U256::from_big_endian(&bytes[32..])
}

pub fn addmod(op1: U256, op2: U256, op3: U256) -> U256 {
	if op3 == U256::zero() {
		return U256::zero();
	}
	low_u256((U512::from(op1) + U512::from(op2)) % U512::from(op3))
}

pub fn mulmod(op1: U256, op2: U256, op3: U256) -> U256 {
	if op3 == U256::zero() {
		return U256::zero();
	}
	low_u256(op1.full_mul(op2) % U512::from(op3))
}
