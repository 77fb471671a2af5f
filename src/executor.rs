//! Drives frames to completion and applies whole transactions: value
//! transfer, dispatch loop, rollback on gas exhaustion, post-queue
//! draining, gas refund and the suicide sweep.

use crate::codec::derive_contract_id;
use crate::context::{Context, CreateSeed, Environment};
use crate::error::ExecError;
use crate::eval::{apply_op, Control, Frame};
use crate::gas;
use crate::machine::Compustate;
use crate::state::{Store, NATIVE_ASSET};
use core::convert::TryFrom;
use log::debug;
use primitive_types::{H160, U256};

/// A single call frame's input. Immutable after construction; `to` of
/// `None` signals a creation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
	pub sender: H160,
	pub to: Option<H160>,
	pub value: U256,
	pub gas: u64,
	pub data: Vec<u8>,
}

/// Outcome of one frame: in-band success flag, the gas left in the frame
/// (negative after a failed deduction), and the returned bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MsgResult {
	pub success: bool,
	pub gas: i64,
	pub output: Vec<u8>,
}

fn clamp_gas(gas: u64) -> i64 {
	gas.min(i64::MAX as u64) as i64
}

/// Run one message to completion against the given code. Opens a
/// savepoint covering the value transfer and every write of the frame;
/// gas exhaustion reverts it all. A failed value transfer is not an
/// execution failure: the frame succeeds untouched, with empty output.
pub fn apply_msg<S: Store>(
	store: &mut S,
	env: &Environment,
	msg: &Message,
	code: &[u8],
) -> MsgResult {
	let address = match msg.to {
		Some(address) => address,
		None => {
			return MsgResult {
				success: true,
				gas: clamp_gas(msg.gas),
				output: Vec::new(),
			}
		}
	};

	debug!(
		"BEGIN MESSAGE (sender: {:?}, to: {:?}, value: {}, gas: {}, data: {})",
		msg.sender,
		address,
		msg.value,
		msg.gas,
		hex::encode(&msg.data)
	);

	let savepoint = store.snapshot();

	// No balance can cover a value beyond the ledger's range.
	let transferred = if msg.value.bits() > 128 {
		debug!("value transfer failed: amount beyond the ledger range");
		false
	} else {
		let qty = msg.value.low_u128();
		match store.debit(
			msg.sender,
			NATIVE_ASSET,
			qty,
			"transfer value",
			env.tx.tx_hash,
		) {
			Ok(()) => {
				store.credit(address, NATIVE_ASSET, qty, "transfer value", env.tx.tx_hash);
				true
			}
			Err(error) => {
				debug!("value transfer failed: {}", error);
				false
			}
		}
	};
	if !transferred {
		store.commit(savepoint);
		return MsgResult {
			success: true,
			gas: clamp_gas(msg.gas),
			output: Vec::new(),
		};
	}

	let frame = Frame {
		context: Context {
			address,
			caller: msg.sender,
			apparent_value: msg.value,
		},
		data: &msg.data,
		code,
	};
	let mut cs = Compustate::new(msg.gas, &env.config);

	loop {
		match apply_op(store, env, &frame, &mut cs) {
			Control::Continue => (),
			Control::Halt(output) => {
				store.commit(savepoint);
				debug!(
					"END MESSAGE (result: {}, gas: {})",
					hex::encode(&output),
					cs.gas
				);
				return MsgResult {
					success: true,
					gas: cs.gas,
					output,
				};
			}
			Control::OutOfGas => {
				debug!("REVERTING");
				store.revert(savepoint);
				return MsgResult {
					success: false,
					gas: cs.gas,
					output: Vec::new(),
				};
			}
		}
	}
}

/// Create a contract: derive its identifier, run the message data as the
/// init frame, and persist the frame's output as the contract code. The
/// returned output is the new identifier; a failed init frame reports
/// in-band and persists nothing.
pub fn create_contract<S: Store>(
	store: &mut S,
	env: &Environment,
	msg: &Message,
	seed: CreateSeed,
) -> MsgResult {
	let contract_id = match seed {
		CreateSeed::TxHash => derive_contract_id(
			msg.sender,
			hex::encode(env.tx.tx_hash.as_bytes()).as_bytes(),
		),
		CreateSeed::SenderNonce => {
			let nonce = store.nonce(msg.sender);
			store.set_nonce(msg.sender, nonce.saturating_add(1));
			derive_contract_id(msg.sender, nonce.to_string().as_bytes())
		}
	};

	debug!(
		"CREATE CONTRACT (sender: {:?}, contract_id: {:?}, gas: {})",
		msg.sender, contract_id, msg.gas
	);

	let inner = Message {
		sender: msg.sender,
		to: Some(contract_id),
		value: msg.value,
		gas: msg.gas,
		data: msg.data.clone(),
	};
	let result = apply_msg(store, env, &inner, &msg.data);

	if result.success {
		store.put_code(contract_id, result.output);
		MsgResult {
			success: true,
			gas: result.gas,
			output: contract_id.as_bytes().to_vec(),
		}
	} else {
		result
	}
}

/// Apply one transaction: intrinsic-gas check, balance check, gas down
/// payment, post-queue draining, refund of the unused gas and the suicide
/// sweep. Returns the remaining gas and the primary message's output.
pub fn apply_transaction<S: Store>(
	store: &mut S,
	env: &Environment,
	to: Option<H160>,
	startgas: u64,
	value: u64,
	payload: &[u8],
) -> Result<(u64, Vec<u8>), ExecError> {
	let intrinsic = gas::intrinsic_gas(&env.config, payload);
	if startgas < intrinsic {
		return Err(ExecError::InsufficientStartGas {
			have: startgas,
			need: intrinsic,
		});
	}

	if let Some(target) = to {
		if !store.has_contract(target) {
			return Err(ExecError::NoSuchContract);
		}
	}

	let down_payment = u128::from(env.gasprice) * u128::from(startgas);
	let need = down_payment + u128::from(value);
	let have = store.balance(env.tx.source);
	if have < need {
		return Err(ExecError::InsufficientBalance { have, need });
	}

	debug!(
		"TX NEW (sender: {:?}, to: {:?}, gasprice: {}, startgas: {}, value: {}, data: {})",
		env.tx.source,
		to,
		env.gasprice,
		startgas,
		value,
		hex::encode(payload)
	);

	store
		.debit(
			env.tx.source,
			NATIVE_ASSET,
			down_payment,
			"start execution",
			env.tx.tx_hash,
		)
		.map_err(|error| ExecError::InsufficientBalance {
			have: error.have,
			need: error.need,
		})?;

	store.clear_postqueue();
	store.post_push(Message {
		sender: env.tx.source,
		to,
		value: U256::from(value),
		gas: startgas - intrinsic,
		data: payload.to_vec(),
	});

	let mut primary: Option<MsgResult> = None;
	while let Some(message) = store.post_pop() {
		let result = match message.to {
			Some(target) => {
				let code = store.code(target);
				apply_msg(store, env, &message, &code)
			}
			None => create_contract(store, env, &message, CreateSeed::TxHash),
		};
		if primary.is_none() {
			primary = Some(result);
		}
	}

	let primary = primary.expect("the queue was seeded with the primary message; qed");
	if !primary.success {
		debug!(
			"TX OUT_OF_GAS (startgas: {}, gas_remaining: {})",
			startgas, primary.gas
		);
		return Err(ExecError::OutOfGas);
	}

	let gas_remaining = u64::try_from(primary.gas).unwrap_or(0);
	store.credit(
		env.tx.source,
		NATIVE_ASSET,
		u128::from(env.gasprice) * u128::from(gas_remaining),
		"gas remaining",
		env.tx.tx_hash,
	);

	for contract_id in store.suicides() {
		debug!("SUICIDING {:?}", contract_id);
		store.delete_contract(contract_id);
	}
	store.clear_suicides();

	debug!("TX SUCCESS (gas_remaining: {})", gas_remaining);
	Ok((gas_remaining, primary.output))
}
