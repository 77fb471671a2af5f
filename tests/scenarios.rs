//! End-to-end transactions driven through `compose`/`parse` against the
//! in-memory store.

mod common;

use common::*;
use ledgervm::{MemoryStore, Store};
use primitive_types::U256;

fn contract_hex(n: u64) -> String {
	hex::encode(addr(n).as_bytes())
}

#[test]
fn trivial_stop() {
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x00], 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");

	assert_eq!(row.status, "finished");
	assert_eq!(row.output, Some(Vec::new()));
	assert_eq!(row.gas_remaining, 500);
	assert_eq!(row.gas_cost, 500);
	assert_eq!(store.balance(sender()), 9_500);
}

#[test]
fn add_two_pushes() {
	// PUSH1 1, PUSH1 2, ADD, STOP: three 1-gas operations, STOP is free.
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x60, 0x01, 0x60, 0x02, 0x01, 0x00], 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");

	assert_eq!(row.status, "finished");
	assert_eq!(row.output, Some(Vec::new()));
	assert_eq!(row.gas_remaining, 497);
	assert_eq!(row.gas_cost, 503);
}

#[test]
fn out_of_gas_on_sstore() {
	// PUSH1 1, PUSH1 0, SSTORE. Occupying a fresh cell costs 200; with
	// startgas 701 the frame still holds 199 at the charge and dies.
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x60, 0x01, 0x60, 0x00, 0x57], 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 701, 0, "");

	assert_eq!(row.status, "out of gas");
	assert_eq!(store.storage(contract, key(0)), key(0));
	// The down payment stays spent and nothing is refunded.
	assert_eq!(row.gas_remaining, 0);
	assert_eq!(row.gas_cost, 701);
	assert_eq!(store.balance(sender()), 10_000 - 701);
}

#[test]
fn sstore_succeeds_with_exact_gas() {
	// Same program with one more unit of gas: 702 covers 500 + 1 + 1 + 200.
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x60, 0x01, 0x60, 0x00, 0x57], 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 702, 0, "");

	assert_eq!(row.status, "finished");
	assert_eq!(row.gas_remaining, 0);
	assert_eq!(store.storage(contract, key(0)), key(1));
}

#[test]
fn insufficient_start_gas() {
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x00], 10_000);

	// Intrinsic cost is 500 + 5 * 100 = 1000; offer one unit less.
	let row = run_tx(&mut store, &contract_hex(1), 1, 999, 0, &"00".repeat(100));

	assert_eq!(row.status, "invalid: insufficient start gas");
	assert_eq!(row.gas_cost, 0);
	assert_eq!(store.balance(sender()), 10_000);
}

#[test]
fn insufficient_balance() {
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x00], 100);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");

	assert_eq!(row.status, "invalid: insufficient balance");
	assert_eq!(store.balance(sender()), 100);
}

#[test]
fn no_such_contract() {
	// Composing against a missing contract succeeds; parsing is where the
	// target is resolved and refused.
	let mut store = MemoryStore::new();
	store.set_balance(sender(), 10_000);

	let row = run_tx(&mut store, &contract_hex(9), 1, 1000, 0, "");

	assert_eq!(row.status, "invalid: no such contract");
	assert_eq!(store.balance(sender()), 10_000);
}

#[test]
fn could_not_unpack() {
	let mut store = MemoryStore::new();
	store.set_balance(sender(), 10_000);

	let row = run_raw(&mut store, &[0u8; 12]);

	assert_eq!(row.status, "invalid: could not unpack");
	assert_eq!(row.contract_id, None);
	assert_eq!(row.startgas, None);
	assert_eq!(store.balance(sender()), 10_000);
}

#[test]
fn jump_skips_dead_code() {
	// PUSH1 0x08 JUMP PUSH1 0xFF STOP PUSH1 0x42 STOP: lands on the final
	// STOP, never touching the bytes in between.
	let contract = addr(1);
	let code = [0x60, 0x08, 0x58, 0x60, 0xff, 0x00, 0x60, 0x42, 0x00];
	let mut store = store_with_contract(contract, &code, 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");

	assert_eq!(row.status, "finished");
	assert_eq!(row.output, Some(Vec::new()));
	// PUSH1 and JUMP each cost 1, the landing STOP is free.
	assert_eq!(row.gas_remaining, 498);
}

#[test]
fn jump_out_of_range_halts_cleanly() {
	let contract = addr(1);
	// PUSH2 0xffff JUMP
	let mut store = store_with_contract(contract, &[0x61, 0xff, 0xff, 0x58], 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");

	assert_eq!(row.status, "finished");
	assert_eq!(row.output, Some(Vec::new()));
}

#[test]
fn calldataload_returns_padded_payload() {
	// PUSH1 0 CALLDATALOAD PUSH1 0 MSTORE PUSH1 32 PUSH1 0 RETURN
	let contract = addr(1);
	let code = [0x60, 0x00, 0x35, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let mut store = store_with_contract(contract, &code, 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "deadbeef");

	assert_eq!(row.status, "finished");
	let mut expected = vec![0u8; 32];
	expected[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
	assert_eq!(row.output, Some(expected));
}

#[test]
fn gas_cost_matches_price_times_usage() {
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x60, 0x01, 0x60, 0x02, 0x01, 0x00], 100_000);

	let row = run_tx(&mut store, &contract_hex(1), 7, 1000, 0, "");

	assert_eq!(row.status, "finished");
	let gasprice = row.gasprice.unwrap();
	let startgas = row.startgas.unwrap();
	assert_eq!(
		row.gas_cost,
		u128::from(gasprice) * u128::from(startgas)
			- u128::from(gasprice) * u128::from(row.gas_remaining)
	);
	// Down payment at price 7, refund at price 7.
	assert_eq!(store.balance(sender()), 100_000 - 7 * 503);
}

#[test]
fn rows_accumulate_in_the_executions_table() {
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x00], 10_000);

	run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");
	run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");

	assert_eq!(store.executions().len(), 2);
	assert!(store.executions().iter().all(|row| row.status == "finished"));
}

#[test]
fn value_moves_to_the_contract() {
	let contract = addr(1);
	let mut store = store_with_contract(contract, &[0x00], 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 250, "");

	assert_eq!(row.status, "finished");
	assert_eq!(store.balance(contract), 250);
	assert_eq!(store.balance(sender()), 10_000 - 500 - 250);
}

#[test]
fn create_transaction_installs_returned_code() {
	// Init code stores 0x2a at memory 31 and returns that single byte as
	// the contract body.
	let init = [0x60, 0x2a, 0x60, 0x1f, 0x55, 0x60, 0x01, 0x60, 0x1f, 0xf2];
	let mut store = MemoryStore::new();
	store.set_balance(sender(), 10_000);

	let row = run_tx(&mut store, "", 1, 1000, 0, &hex::encode(init));

	assert_eq!(row.status, "finished");
	let output = row.output.unwrap();
	assert_eq!(output.len(), 20);
	let contract_id = primitive_types::H160::from_slice(&output);
	assert_eq!(store.code(contract_id), vec![0x2a]);
	assert_eq!(
		contract_id,
		ledgervm::codec::derive_contract_id(
			sender(),
			hex::encode(tx_info().tx_hash.as_bytes()).as_bytes()
		)
	);
}

#[test]
fn arithmetic_result_lands_in_returned_word() {
	// PUSH1 5 PUSH1 7 MUL, stored and returned: 35.
	let contract = addr(1);
	let code = [0x60, 0x05, 0x60, 0x07, 0x02, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let mut store = store_with_contract(contract, &code, 10_000);

	let row = run_tx(&mut store, &contract_hex(1), 1, 1000, 0, "");

	assert_eq!(row.status, "finished");
	assert_eq!(row.output, Some(word(U256::from(35)).as_bytes().to_vec()));
}
