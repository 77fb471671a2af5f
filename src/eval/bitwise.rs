use crate::codec::{u256_to_h256, I256};
use primitive_types::U256;

fn bool_to_word(value: bool) -> U256 {
	if value {
		U256::one()
	} else {
		U256::zero()
	}
}

pub fn lt(op1: U256, op2: U256) -> U256 {
	bool_to_word(op1.lt(&op2))
}

pub fn gt(op1: U256, op2: U256) -> U256 {
	bool_to_word(op1.gt(&op2))
}

pub fn slt(op1: U256, op2: U256) -> U256 {
	bool_to_word(I256::from(op1) < I256::from(op2))
}

pub fn sgt(op1: U256, op2: U256) -> U256 {
	bool_to_word(I256::from(op1) > I256::from(op2))
}

pub fn eq(op1: U256, op2: U256) -> U256 {
	bool_to_word(op1 == op2)
}

/// Logical complement: 1 for zero, 0 for anything else.
pub fn not(op1: U256) -> U256 {
	bool_to_word(op1 == U256::zero())
}

pub fn and(op1: U256, op2: U256) -> U256 {
	op1 & op2
}

pub fn or(op1: U256, op2: U256) -> U256 {
	op1 | op2
}

pub fn xor(op1: U256, op2: U256) -> U256 {
	op1 ^ op2
}

/// Byte `op1` of `op2` in big-endian order; zero when the index is past
/// the word.
pub fn byte(op1: U256, op2: U256) -> U256 {
	if op1 >= U256::from(32) {
		U256::zero()
	} else {
		U256::from(u256_to_h256(op2)[op1.as_usize()])
	}
}
