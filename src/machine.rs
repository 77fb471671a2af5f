use crate::gas::Config;
use crate::memory::{ceil32, Memory};
use crate::stack::Stack;
use core::convert::TryFrom;
use log::debug;
use primitive_types::U256;

/// Per-frame volatile state: program counter, word stack, byte memory and
/// the remaining gas. Gas may transiently go negative; a negative balance
/// is the out-of-gas condition.
#[derive(Clone, Debug)]
pub struct Compustate {
	/// Byte index into the frame's code.
	pub pc: usize,
	/// Word stack, top last.
	pub stack: Stack,
	/// Volatile memory, zero-extended in 32-byte words.
	pub memory: Memory,
	/// Remaining gas.
	pub gas: i64,
}

impl Compustate {
	pub fn new(gas: u64, config: &Config) -> Self {
		Self {
			pc: 0,
			stack: Stack::new(config.stack_limit),
			memory: Memory::new(),
			gas: gas.min(i64::MAX as u64) as i64,
		}
	}

	/// Charge a base fee. Refuses without deducting when the balance is
	/// short, leaving the observed gas unchanged.
	pub fn charge(&mut self, fee: u64) -> bool {
		if self.gas < fee as i64 {
			return false;
		}
		self.gas -= fee as i64;
		true
	}

	/// Reserve gas for a sub-message. Deducts and returns the reserved
	/// amount, or refuses when the balance is short.
	pub fn reserve(&mut self, gas: U256) -> Option<u64> {
		if U256::from(self.gas as u64) < gas {
			return None;
		}
		let reserved = gas.low_u64();
		self.gas -= reserved as i64;
		Some(reserved)
	}

	/// Extend memory to cover `[offset, offset + len)`, rounded up to a
	/// word boundary, charging per new word. The charge lands before the
	/// allocation; a charge that drives gas negative aborts without
	/// growing.
	pub fn charge_memory(&mut self, config: &Config, offset: U256, len: U256) -> bool {
		let end = match offset.checked_add(len) {
			Some(end) => end,
			None => {
				self.gas = self.gas.saturating_sub(i64::MAX);
				debug!("OUT OF GAS (memory range overflow)");
				return false;
			}
		};
		let current = self.memory.len() as u64;
		if end <= U256::from(current) {
			return true;
		}
		let limit = u64::try_from(config.memory_limit).unwrap_or(u64::MAX);
		if end > U256::from(limit) {
			self.gas = self.gas.saturating_sub(i64::MAX);
			debug!("OUT OF GAS (memory beyond limit)");
			return false;
		}
		let new_len = ceil32(end.low_u64());
		if new_len <= current {
			return true;
		}
		let words = (new_len - current) / 32;
		let fee = i64::try_from(words.saturating_mul(config.gas_memory)).unwrap_or(i64::MAX);
		self.gas -= fee;
		if self.gas < 0 {
			debug!(
				"OUT OF GAS (expense: mem_extend, needed: {}, available: {})",
				fee,
				self.gas + fee
			);
			return false;
		}
		self.memory.grow(new_len as usize);
		true
	}
}
