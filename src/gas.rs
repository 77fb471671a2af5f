/// Gas charged per 32-byte word of newly touched memory.
pub const GMEMORY: u64 = 1;
/// Gas charged per occupied storage cell transition.
pub const GSTORAGE: u64 = 100;
/// Gas charged per byte of transaction payload.
pub const GTXDATA: u64 = 5;
/// Flat gas charged to every transaction before execution.
pub const GTXCOST: u64 = 500;
/// Default per-opcode base fee.
pub const GDEFAULT: u64 = 1;

/// Runtime parameters of the machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
	/// Gas paid per 32-byte word of new memory.
	pub gas_memory: u64,
	/// Gas paid per storage-cell occupation.
	pub gas_storage: u64,
	/// Gas paid per payload byte.
	pub gas_txdata: u64,
	/// Flat gas paid per transaction.
	pub gas_txcost: u64,
	/// Stack limit.
	pub stack_limit: usize,
	/// Memory limit.
	pub memory_limit: usize,
}

impl Config {
	pub const fn ledger() -> Config {
		Config {
			gas_memory: GMEMORY,
			gas_storage: GSTORAGE,
			gas_txdata: GTXDATA,
			gas_txcost: GTXCOST,
			stack_limit: 1024,
			memory_limit: usize::MAX,
		}
	}
}

impl Default for Config {
	fn default() -> Config {
		Config::ledger()
	}
}

/// Fixed cost charged to a transaction before execution, covering its
/// payload bytes.
pub fn intrinsic_gas(config: &Config, payload: &[u8]) -> u64 {
	config
		.gas_txcost
		.saturating_add(config.gas_txdata.saturating_mul(payload.len() as u64))
}

/// Storage write pricing: a transition into occupancy pays double, a
/// plain update pays the flat rate, a deletion pays nothing.
pub fn sstore_cost(config: &Config, pre_occupied: bool, post_occupied: bool) -> u64 {
	let pre = if pre_occupied { config.gas_storage } else { 0 };
	let post = if post_occupied { config.gas_storage } else { 0 };
	config.gas_storage + post - pre
}
