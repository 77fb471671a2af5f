use super::Control;
use crate::codec::{big_endian_to_int, saturating_usize, u256_to_h256};
use crate::gas::Config;
use crate::machine::Compustate;
use core::cmp::min;
use primitive_types::U256;

pub fn pop(cs: &mut Compustate) -> Control {
	pop_u256!(cs, _any);
	Control::Continue
}

pub fn mload(cs: &mut Compustate, config: &Config) -> Control {
	pop_u256!(cs, offset);
	try_mem!(cs, config, offset, U256::from(32));
	let value = big_endian_to_int(&cs.memory.get(saturating_usize(offset), 32));
	push_u256!(cs, value);
	Control::Continue
}

pub fn mstore(cs: &mut Compustate, config: &Config) -> Control {
	pop_u256!(cs, offset, value);
	try_mem!(cs, config, offset, U256::from(32));
	cs.memory.set(saturating_usize(offset), &u256_to_h256(value)[..]);
	Control::Continue
}

pub fn mstore8(cs: &mut Compustate, config: &Config) -> Control {
	pop_u256!(cs, offset, value);
	try_mem!(cs, config, offset, U256::one());
	let byte = (value.low_u64() & 0xff) as u8;
	cs.memory.set(saturating_usize(offset), &[byte]);
	Control::Continue
}

/// Destination is an absolute byte index; anything past the code halts the
/// frame successfully at the next step.
pub fn jump(cs: &mut Compustate) -> Control {
	pop_u256!(cs, dest);
	cs.pc = saturating_usize(dest);
	Control::Continue
}

pub fn jumpi(cs: &mut Compustate) -> Control {
	pop_u256!(cs, dest, condition);
	if condition != U256::zero() {
		cs.pc = saturating_usize(dest);
	}
	Control::Continue
}

/// Pushes the already-advanced program counter.
pub fn pc(cs: &mut Compustate) -> Control {
	push_u256!(cs, U256::from(cs.pc));
	Control::Continue
}

pub fn msize(cs: &mut Compustate) -> Control {
	push_u256!(cs, U256::from(cs.memory.len()));
	Control::Continue
}

/// Pushes the gas remaining after this opcode's own base charge.
pub fn gas(cs: &mut Compustate) -> Control {
	push_u256!(cs, U256::from(cs.gas as u64));
	Control::Continue
}

/// Pushes the big-endian value of the next `n` code bytes; a push cut off
/// by the end of code takes the bytes that exist.
pub fn push(cs: &mut Compustate, code: &[u8], n: usize) -> Control {
	let start = min(cs.pc, code.len());
	let end = min(cs.pc.saturating_add(n), code.len());
	let value = big_endian_to_int(&code[start..end]);
	cs.pc = cs.pc.saturating_add(n);
	push_u256!(cs, value);
	Control::Continue
}

pub fn dup(cs: &mut Compustate, n: usize) -> Control {
	let value = match cs.stack.peek(n - 1) {
		Ok(value) => value,
		Err(_) => return Control::Halt(Vec::new()),
	};
	push_u256!(cs, value);
	Control::Continue
}

pub fn swap(cs: &mut Compustate, n: usize) -> Control {
	let top = match cs.stack.peek(0) {
		Ok(value) => value,
		Err(_) => return Control::Halt(Vec::new()),
	};
	let deep = match cs.stack.peek(n) {
		Ok(value) => value,
		Err(_) => return Control::Halt(Vec::new()),
	};
	if cs.stack.set(0, deep).is_err() || cs.stack.set(n, top).is_err() {
		return Control::Halt(Vec::new());
	}
	Control::Continue
}

/// 32 bytes of call data starting at the popped offset, right-zero-padded
/// where the data runs short; zero when the offset is past the data.
pub fn calldataload(cs: &mut Compustate, data: &[u8]) -> Control {
	pop_u256!(cs, index);
	if index >= U256::from(data.len()) {
		push_u256!(cs, U256::zero());
		return Control::Continue;
	}
	let offset = index.as_usize();
	let mut load = [0u8; 32];
	let have = min(32, data.len() - offset);
	load[..have].copy_from_slice(&data[offset..offset + have]);
	push_u256!(cs, U256::from_big_endian(&load));
	Control::Continue
}

pub fn calldatasize(cs: &mut Compustate, data: &[u8]) -> Control {
	push_u256!(cs, U256::from(data.len()));
	Control::Continue
}

pub fn calldatacopy(cs: &mut Compustate, config: &Config, data: &[u8]) -> Control {
	pop_u256!(cs, dst, src, len);
	try_mem!(cs, config, dst, len);
	cs.memory.copy_from(
		saturating_usize(dst),
		data,
		saturating_usize(src),
		saturating_usize(len),
	);
	Control::Continue
}

pub fn codesize(cs: &mut Compustate, code: &[u8]) -> Control {
	push_u256!(cs, U256::from(code.len()));
	Control::Continue
}

pub fn codecopy(cs: &mut Compustate, config: &Config, code: &[u8]) -> Control {
	pop_u256!(cs, dst, src, len);
	try_mem!(cs, config, dst, len);
	cs.memory.copy_from(
		saturating_usize(dst),
		code,
		saturating_usize(src),
		saturating_usize(len),
	);
	Control::Continue
}

/// Halts the frame returning the addressed memory slice.
pub fn ret(cs: &mut Compustate, config: &Config) -> Control {
	pop_u256!(cs, offset, len);
	try_mem!(cs, config, offset, len);
	let output = cs
		.memory
		.get(saturating_usize(offset), saturating_usize(len));
	Control::Halt(output)
}
