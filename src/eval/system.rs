use super::Control;
use crate::codec::{
	address_to_word, h256_to_u256, saturating_usize, sha3 as keccak, u256_to_h256, word_to_address,
};
use crate::context::{CallScheme, Context, CreateSeed, Environment};
use crate::executor::{self, Message};
use crate::gas;
use crate::machine::Compustate;
use crate::state::{Store, NATIVE_ASSET};
use core::cmp::min;
use log::debug;
use primitive_types::{H160, H256, U256};

pub fn sha3(cs: &mut Compustate, env: &Environment) -> Control {
	pop_u256!(cs, offset, len);
	try_mem!(cs, &env.config, offset, len);
	let data = cs
		.memory
		.get(saturating_usize(offset), saturating_usize(len));
	push_u256!(cs, h256_to_u256(keccak(&data)));
	Control::Continue
}

pub fn address(cs: &mut Compustate, ctx: &Context) -> Control {
	push_u256!(cs, address_to_word(ctx.address));
	Control::Continue
}

pub fn balance<S: Store>(store: &S, cs: &mut Compustate) -> Control {
	pop_u256!(cs, address);
	push_u256!(cs, U256::from(store.balance(word_to_address(address))));
	Control::Continue
}

pub fn origin(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, address_to_word(env.tx.source));
	Control::Continue
}

pub fn caller(cs: &mut Compustate, ctx: &Context) -> Control {
	push_u256!(cs, address_to_word(ctx.caller));
	Control::Continue
}

pub fn callvalue(cs: &mut Compustate, ctx: &Context) -> Control {
	push_u256!(cs, ctx.apparent_value);
	Control::Continue
}

pub fn gasprice(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, U256::from(env.gasprice));
	Control::Continue
}

pub fn extcodesize<S: Store>(store: &S, cs: &mut Compustate) -> Control {
	pop_u256!(cs, address);
	push_u256!(cs, U256::from(store.code(word_to_address(address)).len()));
	Control::Continue
}

pub fn extcodecopy<S: Store>(store: &S, cs: &mut Compustate, env: &Environment) -> Control {
	pop_u256!(cs, address, dst, src, len);
	try_mem!(cs, &env.config, dst, len);
	let code = store.code(word_to_address(address));
	cs.memory.copy_from(
		saturating_usize(dst),
		&code,
		saturating_usize(src),
		saturating_usize(len),
	);
	Control::Continue
}

pub fn prevhash(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, h256_to_u256(env.block.prevhash));
	Control::Continue
}

pub fn coinbase(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, address_to_word(env.block.coinbase));
	Control::Continue
}

pub fn timestamp(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, U256::from(env.block.timestamp));
	Control::Continue
}

pub fn number(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, U256::from(env.block.number));
	Control::Continue
}

pub fn difficulty(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, env.block.difficulty);
	Control::Continue
}

pub fn gaslimit(cs: &mut Compustate, env: &Environment) -> Control {
	push_u256!(cs, U256::from(env.block.gas_limit));
	Control::Continue
}

pub fn sload<S: Store>(store: &S, ctx: &Context, cs: &mut Compustate) -> Control {
	pop_u256!(cs, key);
	push_u256!(cs, h256_to_u256(store.storage(ctx.address, u256_to_h256(key))));
	Control::Continue
}

/// Variable pricing: occupying a fresh cell pays double the flat rate,
/// updating pays it once, clearing pays nothing. Refuses the write when
/// the charge cannot be met.
pub fn sstore<S: Store>(
	store: &mut S,
	env: &Environment,
	ctx: &Context,
	cs: &mut Compustate,
) -> Control {
	pop_u256!(cs, key, value);
	let key = u256_to_h256(key);
	let pre_occupied = store.storage(ctx.address, key) != H256::zero();
	let post_occupied = value != U256::zero();
	let cost = gas::sstore_cost(&env.config, pre_occupied, post_occupied);
	if cs.gas < cost as i64 {
		debug!(
			"OUT OF GAS (expense: sstore occupation, needed: {}, available: {})",
			cost, cs.gas
		);
		return Control::OutOfGas;
	}
	cs.gas -= cost as i64;
	store.set_storage(ctx.address, key, u256_to_h256(value));
	Control::Continue
}

/// Builds a creation message carrying the frame's whole remaining gas; on
/// success the new address lands on the stack and the remaining gas flows
/// back, on failure 0 lands and the gas is gone.
pub fn create<S: Store>(
	store: &mut S,
	env: &Environment,
	ctx: &Context,
	cs: &mut Compustate,
) -> Control {
	pop_u256!(cs, value, offset, len);
	try_mem!(cs, &env.config, offset, len);
	let init = cs
		.memory
		.get(saturating_usize(offset), saturating_usize(len));
	debug!(
		"SUB CONTRACT NEW (sender: {:?}, value: {}, data: {})",
		ctx.address,
		value,
		hex::encode(&init)
	);
	let message = Message {
		sender: ctx.address,
		to: None,
		value,
		gas: cs.gas as u64,
		data: init,
	};
	let result = executor::create_contract(store, env, &message, CreateSeed::SenderNonce);
	if result.success && result.output.len() == 20 {
		debug!("SUB CONTRACT OUT (address: {})", hex::encode(&result.output));
		push_u256!(cs, address_to_word(H160::from_slice(&result.output)));
		cs.gas = result.gas;
	} else {
		debug!("SUB CONTRACT OUT (failed)");
		push_u256!(cs, U256::zero());
		cs.gas = 0;
	}
	Control::Continue
}

/// CALL and CALL_STATELESS. Both load code from the nominal target; the
/// stateless variant executes it at the caller's own address, so the
/// caller's storage and balance are the ones touched.
pub fn call<S: Store>(
	store: &mut S,
	env: &Environment,
	ctx: &Context,
	cs: &mut Compustate,
	scheme: CallScheme,
) -> Control {
	pop_u256!(cs, gas, to, value, in_offset, in_len, out_offset, out_len);
	try_mem!(cs, &env.config, in_offset, in_len);
	try_mem!(cs, &env.config, out_offset, out_len);
	let reserved = match cs.reserve(gas) {
		Some(reserved) => reserved,
		None => {
			debug!(
				"OUT OF GAS (expense: subcall gas, needed: {}, available: {})",
				gas, cs.gas
			);
			return Control::OutOfGas;
		}
	};
	let target = word_to_address(to);
	let execute_at = match scheme {
		CallScheme::Call => target,
		CallScheme::Stateless => ctx.address,
	};
	let input = cs
		.memory
		.get(saturating_usize(in_offset), saturating_usize(in_len));
	debug!(
		"SUB CALL NEW (sender: {:?}, to: {:?}, value: {}, gas: {}, data: {})",
		ctx.address,
		target,
		value,
		reserved,
		hex::encode(&input)
	);
	let message = Message {
		sender: ctx.address,
		to: Some(execute_at),
		value,
		gas: reserved,
		data: input,
	};
	let code = store.code(target);
	let result = executor::apply_msg(store, env, &message, &code);
	debug!(
		"SUB CALL OUT (result: {}, length: {}, expected: {})",
		result.success,
		result.output.len(),
		out_len
	);
	if result.success {
		push_u256!(cs, U256::one());
		cs.gas += result.gas;
		let out_len = saturating_usize(out_len);
		let n = min(result.output.len(), out_len);
		cs.memory.set(saturating_usize(out_offset), &result.output[..n]);
	} else {
		push_u256!(cs, U256::zero());
	}
	Control::Continue
}

/// Queues a message for execution after the current frame chain; the
/// reserved gas travels with it and nothing is pushed.
pub fn post<S: Store>(
	store: &mut S,
	env: &Environment,
	ctx: &Context,
	cs: &mut Compustate,
) -> Control {
	pop_u256!(cs, gas, to, value, in_offset, in_len);
	try_mem!(cs, &env.config, in_offset, in_len);
	let reserved = match cs.reserve(gas) {
		Some(reserved) => reserved,
		None => {
			debug!(
				"OUT OF GAS (expense: subcall gas, needed: {}, available: {})",
				gas, cs.gas
			);
			return Control::OutOfGas;
		}
	};
	let target = word_to_address(to);
	let input = cs
		.memory
		.get(saturating_usize(in_offset), saturating_usize(in_len));
	debug!(
		"POST NEW (sender: {:?}, to: {:?}, value: {}, gas: {}, data: {})",
		ctx.address,
		target,
		value,
		reserved,
		hex::encode(&input)
	);
	store.post_push(Message {
		sender: ctx.address,
		to: Some(target),
		value,
		gas: reserved,
		data: input,
	});
	Control::Continue
}

/// Moves the whole balance to the target, marks the contract for deletion
/// at the end of the transaction, and halts with empty output.
pub fn suicide<S: Store>(
	store: &mut S,
	env: &Environment,
	ctx: &Context,
	cs: &mut Compustate,
) -> Control {
	pop_u256!(cs, to);
	let target = word_to_address(to);
	let balance = store.balance(ctx.address);
	if store
		.debit(ctx.address, NATIVE_ASSET, balance, "suicide", env.tx.tx_hash)
		.is_ok()
	{
		store.credit(target, NATIVE_ASSET, balance, "suicide", env.tx.tx_hash);
	}
	store.suicide(ctx.address);
	Control::Halt(Vec::new())
}
