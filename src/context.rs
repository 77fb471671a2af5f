use crate::gas::Config;
use primitive_types::{H160, H256, U256};

/// Identity of the transaction being applied, as recorded on the chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxInfo {
	/// Position of the transaction within the ledger.
	pub tx_index: u64,
	/// Hash of the carrying transaction.
	pub tx_hash: H256,
	/// Height of the confirming block.
	pub block_index: u64,
	/// The externally owned sender.
	pub source: H160,
}

/// Host-provided block record backing the environment opcodes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockContext {
	pub prevhash: H256,
	pub coinbase: H160,
	pub timestamp: u64,
	pub number: u64,
	pub difficulty: U256,
	pub gas_limit: u64,
}

/// Everything a frame can observe beyond its own message: the carrying
/// transaction, the confirming block and the machine parameters.
#[derive(Clone, Debug)]
pub struct Environment {
	pub tx: TxInfo,
	pub block: BlockContext,
	/// Price per unit of gas, fixed for the whole transaction.
	pub gasprice: u64,
	pub config: Config,
}

/// Execution context of a single frame.
#[derive(Clone, Debug)]
pub struct Context {
	/// The address whose storage and balance the frame runs against.
	pub address: H160,
	/// The immediate sender of the message.
	pub caller: H160,
	/// Value apparently transferred with the message.
	pub apparent_value: U256,
}

/// How a sub-message resolves its target code and state.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum CallScheme {
	/// Run the target's code against the target's state.
	Call,
	/// Run the target's code against the caller's own state.
	Stateless,
}

/// Which seed derives a fresh contract identifier.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum CreateSeed {
	/// The carrying transaction's hash; used for top-level creations.
	TxHash,
	/// The creator's nonce, incremented afterwards; used for sub-creates.
	SenderNonce,
}
