use super::{Savepoint, Store};
use crate::envelope::ExecutionRow;
use crate::error::BalanceError;
use crate::executor::Message;
use log::debug;
use primitive_types::{H160, H256};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// The mutable ledger state, snapshotted wholesale per savepoint.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LedgerState {
	/// Contract code rows.
	pub codes: BTreeMap<H160, Vec<u8>>,
	/// Creation nonces.
	pub nonces: BTreeMap<H160, u64>,
	/// Native-asset balances.
	pub balances: BTreeMap<H160, u128>,
	/// Storage cells, key space disjoint per contract.
	pub storage: BTreeMap<H160, BTreeMap<H256, H256>>,
	/// Contracts marked for deletion in the current transaction.
	pub suicides: BTreeSet<H160>,
	/// Deferred messages of the current transaction, oldest first.
	pub postqueue: VecDeque<Message>,
}

/// In-memory [`Store`], holding all state in `BTreeMap`s. The
/// transactional scope is a stack of full state copies.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	state: LedgerState,
	savepoints: Vec<LedgerState>,
	executions: Vec<ExecutionRow>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// The current ledger state.
	pub fn state(&self) -> &LedgerState {
		&self.state
	}

	/// All execution rows recorded so far, oldest first.
	pub fn executions(&self) -> &[ExecutionRow] {
		&self.executions
	}

	/// Set an address balance directly; test and genesis setup only.
	pub fn set_balance(&mut self, address: H160, qty: u128) {
		self.state.balances.insert(address, qty);
	}
}

impl Store for MemoryStore {
	fn has_contract(&self, contract_id: H160) -> bool {
		self.state.codes.contains_key(&contract_id)
	}

	fn code(&self, contract_id: H160) -> Vec<u8> {
		self.state
			.codes
			.get(&contract_id)
			.cloned()
			.unwrap_or_default()
	}

	fn put_code(&mut self, contract_id: H160, code: Vec<u8>) {
		self.state.codes.insert(contract_id, code);
	}

	fn delete_contract(&mut self, contract_id: H160) {
		self.state.codes.remove(&contract_id);
		self.state.storage.remove(&contract_id);
	}

	fn balance(&self, address: H160) -> u128 {
		self.state.balances.get(&address).copied().unwrap_or(0)
	}

	fn debit(
		&mut self,
		address: H160,
		asset: &str,
		qty: u128,
		reason: &str,
		event: H256,
	) -> Result<(), BalanceError> {
		let have = self.balance(address);
		if have < qty {
			return Err(BalanceError { have, need: qty });
		}
		self.state.balances.insert(address, have - qty);
		debug!(
			"debit {:?} {} {} ({}, event {:?})",
			address, qty, asset, reason, event
		);
		Ok(())
	}

	fn credit(&mut self, address: H160, asset: &str, qty: u128, reason: &str, event: H256) {
		let have = self.balance(address);
		self.state
			.balances
			.insert(address, have.saturating_add(qty));
		debug!(
			"credit {:?} {} {} ({}, event {:?})",
			address, qty, asset, reason, event
		);
	}

	fn storage(&self, contract_id: H160, key: H256) -> H256 {
		self.state
			.storage
			.get(&contract_id)
			.and_then(|cells| cells.get(&key))
			.copied()
			.unwrap_or_else(H256::zero)
	}

	fn set_storage(&mut self, contract_id: H160, key: H256, value: H256) {
		self.state
			.storage
			.entry(contract_id)
			.or_insert_with(BTreeMap::new)
			.insert(key, value);
	}

	fn nonce(&self, contract_id: H160) -> u64 {
		self.state.nonces.get(&contract_id).copied().unwrap_or(0)
	}

	fn set_nonce(&mut self, contract_id: H160, nonce: u64) {
		self.state.nonces.insert(contract_id, nonce);
	}

	fn suicide(&mut self, contract_id: H160) {
		self.state.suicides.insert(contract_id);
	}

	fn suicides(&self) -> Vec<H160> {
		self.state.suicides.iter().copied().collect()
	}

	fn clear_suicides(&mut self) {
		self.state.suicides.clear();
	}

	fn post_push(&mut self, message: Message) {
		self.state.postqueue.push_back(message);
	}

	fn post_pop(&mut self) -> Option<Message> {
		self.state.postqueue.pop_front()
	}

	fn clear_postqueue(&mut self) {
		self.state.postqueue.clear();
	}

	fn insert_execution(&mut self, row: ExecutionRow) {
		self.executions.push(row);
	}

	fn snapshot(&mut self) -> Savepoint {
		self.savepoints.push(self.state.clone());
		Savepoint(self.savepoints.len() - 1)
	}

	fn commit(&mut self, savepoint: Savepoint) {
		self.savepoints.truncate(savepoint.0);
	}

	fn revert(&mut self, savepoint: Savepoint) {
		if savepoint.0 < self.savepoints.len() {
			self.state = self.savepoints[savepoint.0].clone();
		}
		self.savepoints.truncate(savepoint.0);
	}
}
