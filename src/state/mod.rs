//! Typed access to the persistent ledger state the machine runs against.

mod memory;

pub use self::memory::{LedgerState, MemoryStore};

use crate::envelope::ExecutionRow;
use crate::error::BalanceError;
use crate::executor::Message;
use primitive_types::{H160, H256};

/// A savepoint handle returned by [`Store::snapshot`]. Savepoints nest and
/// must be released in reverse order of creation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Savepoint(pub(crate) usize);

/// The balance-bearing asset gas and value transfers settle in. The
/// machine never moves any other asset.
pub const NATIVE_ASSET: &str = "native";

/// Host-provided persistent state accessor: contracts, storage cells,
/// balances of the native asset, nonces, the per-transaction suicide set
/// and post-queue, the executions table, and a transactional scope
/// primitive.
pub trait Store {
	/// Whether a contract row exists for the identifier.
	fn has_contract(&self, contract_id: H160) -> bool;
	/// A contract's code; empty when the contract is unknown.
	fn code(&self, contract_id: H160) -> Vec<u8>;
	/// Install or replace a contract's code.
	fn put_code(&mut self, contract_id: H160, code: Vec<u8>);
	/// Delete a contract row together with all its storage cells.
	fn delete_contract(&mut self, contract_id: H160);

	/// Native-asset balance of an address.
	fn balance(&self, address: H160) -> u128;
	/// Remove funds from an address. `asset` is always [`NATIVE_ASSET`]
	/// when the machine is the caller; `reason` and `event` tag the
	/// ledger movement for audit.
	fn debit(
		&mut self,
		address: H160,
		asset: &str,
		qty: u128,
		reason: &str,
		event: H256,
	) -> Result<(), BalanceError>;
	/// Add funds to an address.
	fn credit(&mut self, address: H160, asset: &str, qty: u128, reason: &str, event: H256);

	/// A storage cell; missing cells read as zero.
	fn storage(&self, contract_id: H160, key: H256) -> H256;
	/// Write a storage cell. Writing zero keeps the cell row with an
	/// empty value.
	fn set_storage(&mut self, contract_id: H160, key: H256, value: H256);

	/// A contract's creation nonce; zero when never set.
	fn nonce(&self, contract_id: H160) -> u64;
	fn set_nonce(&mut self, contract_id: H160, nonce: u64);

	/// Mark a contract for deletion at the end of the transaction.
	fn suicide(&mut self, contract_id: H160);
	/// Contracts currently marked for deletion.
	fn suicides(&self) -> Vec<H160>;
	fn clear_suicides(&mut self);

	/// Append a deferred message to the post-queue.
	fn post_push(&mut self, message: Message);
	/// Take the oldest deferred message, if any.
	fn post_pop(&mut self) -> Option<Message>;
	fn clear_postqueue(&mut self);

	/// Append one row to the executions table.
	fn insert_execution(&mut self, row: ExecutionRow);

	/// Open a transactional scope over everything above except the
	/// executions table.
	fn snapshot(&mut self) -> Savepoint;
	/// Release a savepoint, keeping the writes made since.
	fn commit(&mut self, savepoint: Savepoint);
	/// Release a savepoint, undoing every write made since.
	fn revert(&mut self, savepoint: Savepoint);
}
