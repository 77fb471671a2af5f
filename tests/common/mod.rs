#![allow(dead_code)]

use ledgervm::{
	apply_msg, compose, parse, BlockContext, Config, Environment, ExecutionRow, MemoryStore,
	Message, MsgResult, Store, TxInfo,
};
use primitive_types::{H160, H256, U256};

pub fn addr(n: u64) -> H160 {
	H160::from_low_u64_be(n)
}

pub fn sender() -> H160 {
	addr(0xaa)
}

pub fn key(n: u64) -> H256 {
	word(U256::from(n))
}

pub fn word(value: U256) -> H256 {
	let mut bytes = [0u8; 32];
	value.to_big_endian(&mut bytes);
	H256(bytes)
}

pub fn tx_info() -> TxInfo {
	TxInfo {
		tx_index: 1,
		tx_hash: H256::from_low_u64_be(0x1234),
		block_index: 42,
		source: sender(),
	}
}

pub fn block() -> BlockContext {
	BlockContext {
		timestamp: 1_700_000_000,
		number: 42,
		gas_limit: 1_000_000,
		..Default::default()
	}
}

pub fn env() -> Environment {
	Environment {
		tx: tx_info(),
		block: block(),
		gasprice: 1,
		config: Config::ledger(),
	}
}

/// Compose an envelope for the target and parse it, returning the
/// recorded row.
pub fn run_tx(
	store: &mut MemoryStore,
	target: &str,
	gasprice: u64,
	startgas: u64,
	value: u64,
	payload_hex: &str,
) -> ExecutionRow {
	let config = Config::ledger();
	let envelope = compose(sender(), target, gasprice, startgas, value, payload_hex)
		.expect("test envelopes are well-formed");
	parse(store, &config, &tx_info(), &block(), &envelope)
}

/// Parse a hand-packed envelope, bypassing `compose`'s own checks.
pub fn run_raw(store: &mut MemoryStore, message: &[u8]) -> ExecutionRow {
	let config = Config::ledger();
	parse(store, &config, &tx_info(), &block(), message)
}

/// Run a single frame of the given code at `at`, with empty value.
pub fn run_code(
	store: &mut MemoryStore,
	at: H160,
	code: &[u8],
	data: &[u8],
	gas: u64,
) -> MsgResult {
	let message = Message {
		sender: sender(),
		to: Some(at),
		value: U256::zero(),
		gas,
		data: data.to_vec(),
	};
	apply_msg(store, &env(), &message, code)
}

/// Bytecode helper: PUSH20 of an address.
pub fn push20(address: H160) -> Vec<u8> {
	let mut code = vec![0x73];
	code.extend_from_slice(address.as_bytes());
	code
}

/// Bytecode helper: concatenate chunks.
pub fn cat(chunks: &[&[u8]]) -> Vec<u8> {
	let mut code = Vec::new();
	for chunk in chunks {
		code.extend_from_slice(chunk);
	}
	code
}

/// A funded sender and an installed contract, ready to execute.
pub fn store_with_contract(at: H160, code: &[u8], sender_balance: u128) -> MemoryStore {
	let mut store = MemoryStore::new();
	store.put_code(at, code.to_vec());
	store.set_balance(sender(), sender_balance);
	store
}
