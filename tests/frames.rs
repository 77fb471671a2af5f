//! Single-frame semantics driven through `apply_msg` directly.

mod common;

use common::*;
use ledgervm::{MemoryStore, Store};
use primitive_types::U256;

fn returned_word(output: &[u8]) -> U256 {
	assert_eq!(output.len(), 32);
	U256::from_big_endian(output)
}

#[test]
fn gas_opcode_reports_balance_after_its_own_charge() {
	let mut store = MemoryStore::new();
	// GAS, stored and returned.
	let code = [0x5c, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let result = run_code(&mut store, addr(1), &code, &[], 100);

	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::from(99));
}

#[test]
fn pc_opcode_reports_the_advanced_counter() {
	let mut store = MemoryStore::new();
	// PC as the first opcode pushes 1, not 0.
	let code = [0x5a, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let result = run_code(&mut store, addr(1), &code, &[], 100);

	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::one());
}

#[test]
fn msize_tracks_word_aligned_growth() {
	let mut store = MemoryStore::new();
	// MSTORE8 at 40 grows memory to 64; MSIZE reports it.
	let code = [
		0x60, 0x01, 0x60, 0x28, 0x55, // MSTORE8 1 at 40
		0x5b, // MSIZE
		0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2,
	];
	let result = run_code(&mut store, addr(1), &code, &[], 100);

	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::from(64));
}

#[test]
fn stack_underflow_halts_with_empty_output() {
	let mut store = MemoryStore::new();
	// ADD on an empty stack.
	let result = run_code(&mut store, addr(1), &[0x01], &[], 100);

	assert!(result.success);
	assert!(result.output.is_empty());
	// The precondition fails before any gas moves.
	assert_eq!(result.gas, 100);
}

#[test]
fn unknown_byte_halts_with_empty_output() {
	let mut store = MemoryStore::new();
	let result = run_code(&mut store, addr(1), &[0x16, 0x60, 0x01], &[], 100);

	assert!(result.success);
	assert!(result.output.is_empty());
	assert_eq!(result.gas, 100);
}

#[test]
fn running_past_the_code_end_is_success() {
	let mut store = MemoryStore::new();
	let result = run_code(&mut store, addr(1), &[0x60, 0x01], &[], 100);

	assert!(result.success);
	assert!(result.output.is_empty());
	assert_eq!(result.gas, 99);
}

#[test]
fn push_cut_off_by_code_end_halts_cleanly() {
	let mut store = MemoryStore::new();
	// PUSH4 with only two immediate bytes: the counter lands past the
	// end and the frame halts as a success, one unit of gas spent.
	let code = [0x63, 0xab, 0xcd];
	let result = run_code(&mut store, addr(1), &code, &[], 100);

	assert!(result.success);
	assert!(result.output.is_empty());
	assert_eq!(result.gas, 99);
}

#[test]
fn dup_and_swap_operate_by_depth() {
	let mut store = MemoryStore::new();
	// PUSH1 1 PUSH1 2 PUSH1 3 DUP3 -> copies the 1; store and return it.
	let code = [
		0x60, 0x01, 0x60, 0x02, 0x60, 0x03, 0x82, // DUP3
		0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2,
	];
	let result = run_code(&mut store, addr(1), &code, &[], 100);
	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::one());

	// PUSH1 1 PUSH1 2 SWAP1 -> top becomes 1... store and return it.
	let code = [
		0x60, 0x01, 0x60, 0x02, 0x90, // SWAP1
		0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2,
	];
	let result = run_code(&mut store, addr(1), &code, &[], 100);
	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::one());
}

#[test]
fn extcodesize_and_extcodecopy_read_other_contracts() {
	let target = addr(9);
	let mut store = MemoryStore::new();
	store.put_code(target, vec![0x01, 0x02, 0x03]);

	let code = cat(&[
		&push20(target),
		&[0x3b], // EXTCODESIZE
		&[0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2],
	]);
	let result = run_code(&mut store, addr(1), &code, &[], 200);
	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::from(3));

	let code = cat(&[
		&[0x60, 0x03], // length
		&[0x60, 0x00], // code offset
		&[0x60, 0x00], // memory offset
		&push20(target),
		&[0x3c], // EXTCODECOPY
		&[0x60, 0x20, 0x60, 0x00, 0xf2],
	]);
	let result = run_code(&mut store, addr(1), &code, &[], 200);
	assert!(result.success);
	let mut expected = vec![0u8; 32];
	expected[..3].copy_from_slice(&[0x01, 0x02, 0x03]);
	assert_eq!(result.output, expected);
}

#[test]
fn environment_opcodes_read_the_block_record() {
	let mut store = MemoryStore::new();
	// TIMESTAMP, stored and returned.
	let code = [0x42, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let result = run_code(&mut store, addr(1), &code, &[], 100);
	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::from(1_700_000_000u64));

	// NUMBER
	let code = [0x43, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let result = run_code(&mut store, addr(1), &code, &[], 100);
	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::from(42));

	// GASLIMIT
	let code = [0x45, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let result = run_code(&mut store, addr(1), &code, &[], 100);
	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::from(1_000_000));
}

#[test]
fn address_caller_and_callvalue_come_from_the_context() {
	let mut store = MemoryStore::new();
	// ADDRESS
	let code = [0x30, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let result = run_code(&mut store, addr(5), &code, &[], 100);
	assert!(result.success);
	assert_eq!(
		returned_word(&result.output),
		U256::from_big_endian(addr(5).as_bytes())
	);

	// CALLER
	let code = [0x33, 0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2];
	let result = run_code(&mut store, addr(5), &code, &[], 100);
	assert!(result.success);
	assert_eq!(
		returned_word(&result.output),
		U256::from_big_endian(sender().as_bytes())
	);
}

#[test]
fn balance_opcode_reads_the_ledger() {
	let rich = addr(3);
	let mut store = MemoryStore::new();
	store.set_balance(rich, 777);

	let code = cat(&[
		&push20(rich),
		&[0x31], // BALANCE
		&[0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2],
	]);
	let result = run_code(&mut store, addr(1), &code, &[], 200);
	assert!(result.success);
	assert_eq!(returned_word(&result.output), U256::from(777));
}

#[test]
fn sha3_hashes_the_memory_slice() {
	let mut store = MemoryStore::new();
	// MSTORE8 0x61 at 0, SHA3 over one byte, store and return the word.
	let code = [
		0x60, 0x61, 0x60, 0x00, 0x55, // mem[0] = 'a'
		0x60, 0x01, 0x60, 0x00, 0x20, // SHA3(0, 1)
		0x60, 0x00, 0x54, 0x60, 0x20, 0x60, 0x00, 0xf2,
	];
	let result = run_code(&mut store, addr(1), &code, &[], 200);
	assert!(result.success);
	assert_eq!(
		result.output,
		ledgervm::codec::sha3(b"a").as_bytes().to_vec()
	);
}
