//! One step of execution: argument pop, gas charge, memory extension,
//! effect, result push.

#[macro_use]
mod macros;
pub mod arithmetic;
pub mod bitwise;
mod misc;
mod system;

use crate::context::{CallScheme, Context, Environment};
use crate::machine::Compustate;
use crate::opcode::Opcode;
use crate::state::Store;
use log::{debug, trace};

/// Outcome of a single [`apply_op`] step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Control {
	/// The frame continues with the next opcode.
	Continue,
	/// The frame halts, returning these bytes. Running past the end of
	/// code, a stack misuse, STOP, INVALID, RETURN and SUICIDE all land
	/// here; all of them count as success.
	Halt(Vec<u8>),
	/// The frame halts by gas exhaustion; the caller reverts its writes.
	OutOfGas,
}

/// The inputs of one frame that stay fixed while it runs.
pub struct Frame<'a> {
	pub context: Context,
	/// The message payload, read by the CALLDATA family.
	pub data: &'a [u8],
	/// The executing code.
	pub code: &'a [u8],
}

/// Execute the opcode under the program counter. Preconditions before any
/// gas moves: a counter past the end of code and a stack shorter than the
/// opcode's arity both halt the frame with empty output. The base fee is
/// refused without deduction; memory and storage surcharges inside the
/// effect may drive gas negative.
pub fn apply_op<S: Store>(
	store: &mut S,
	env: &Environment,
	frame: &Frame,
	cs: &mut Compustate,
) -> Control {
	let opcode = match frame.code.get(cs.pc) {
		Some(byte) => Opcode(*byte),
		None => return Control::Halt(Vec::new()),
	};
	let info = opcode.info();

	if cs.stack.len() < info.inputs {
		debug!(
			"INSUFFICIENT STACK (op: {}, needed: {}, available: {})",
			info.mnemonic,
			info.inputs,
			cs.stack.len()
		);
		return Control::Halt(Vec::new());
	}

	if !cs.charge(info.base_gas) {
		debug!(
			"OUT OF GAS (expense: base fee, needed: {}, available: {}, op: {})",
			info.base_gas, cs.gas, info.mnemonic
		);
		return Control::OutOfGas;
	}

	trace!(
		"OP pc: {:03} gas: {} op: {} stack: {:?}",
		cs.pc,
		cs.gas,
		info.mnemonic,
		cs.stack.slots()
	);

	cs.pc += 1;

	if let Some(n) = opcode.is_push() {
		return misc::push(cs, frame.code, n);
	}
	if let Some(n) = opcode.is_dup() {
		return misc::dup(cs, n);
	}
	if let Some(n) = opcode.is_swap() {
		return misc::swap(cs, n);
	}

	match opcode {
		Opcode::STOP => Control::Halt(Vec::new()),
		Opcode::ADD => op2!(cs, arithmetic::add),
		Opcode::MUL => op2!(cs, arithmetic::mul),
		Opcode::SUB => op2!(cs, arithmetic::sub),
		Opcode::DIV => op2!(cs, arithmetic::div),
		Opcode::SDIV => op2!(cs, arithmetic::sdiv),
		Opcode::MOD => op2!(cs, arithmetic::rem),
		Opcode::SMOD => op2!(cs, arithmetic::srem),
		Opcode::EXP => op2!(cs, arithmetic::exp),
		Opcode::NEG => op1!(cs, arithmetic::neg),
		Opcode::LT => op2!(cs, bitwise::lt),
		Opcode::GT => op2!(cs, bitwise::gt),
		Opcode::SLT => op2!(cs, bitwise::slt),
		Opcode::SGT => op2!(cs, bitwise::sgt),
		Opcode::EQ => op2!(cs, bitwise::eq),
		Opcode::NOT => op1!(cs, bitwise::not),
		Opcode::AND => op2!(cs, bitwise::and),
		Opcode::OR => op2!(cs, bitwise::or),
		Opcode::XOR => op2!(cs, bitwise::xor),
		Opcode::BYTE => op2!(cs, bitwise::byte),
		Opcode::ADDMOD => op3!(cs, arithmetic::addmod),
		Opcode::MULMOD => op3!(cs, arithmetic::mulmod),
		Opcode::SHA3 => system::sha3(cs, env),
		Opcode::ADDRESS => system::address(cs, &frame.context),
		Opcode::BALANCE => system::balance(store, cs),
		Opcode::ORIGIN => system::origin(cs, env),
		Opcode::CALLER => system::caller(cs, &frame.context),
		Opcode::CALLVALUE => system::callvalue(cs, &frame.context),
		Opcode::CALLDATALOAD => misc::calldataload(cs, frame.data),
		Opcode::CALLDATASIZE => misc::calldatasize(cs, frame.data),
		Opcode::CALLDATACOPY => misc::calldatacopy(cs, &env.config, frame.data),
		Opcode::CODESIZE => misc::codesize(cs, frame.code),
		Opcode::CODECOPY => misc::codecopy(cs, &env.config, frame.code),
		Opcode::GASPRICE => system::gasprice(cs, env),
		Opcode::EXTCODESIZE => system::extcodesize(store, cs),
		Opcode::EXTCODECOPY => system::extcodecopy(store, cs, env),
		Opcode::PREVHASH => system::prevhash(cs, env),
		Opcode::COINBASE => system::coinbase(cs, env),
		Opcode::TIMESTAMP => system::timestamp(cs, env),
		Opcode::NUMBER => system::number(cs, env),
		Opcode::DIFFICULTY => system::difficulty(cs, env),
		Opcode::GASLIMIT => system::gaslimit(cs, env),
		Opcode::POP => misc::pop(cs),
		Opcode::MLOAD => misc::mload(cs, &env.config),
		Opcode::MSTORE => misc::mstore(cs, &env.config),
		Opcode::MSTORE8 => misc::mstore8(cs, &env.config),
		Opcode::SLOAD => system::sload(store, &frame.context, cs),
		Opcode::SSTORE => system::sstore(store, env, &frame.context, cs),
		Opcode::JUMP => misc::jump(cs),
		Opcode::JUMPI => misc::jumpi(cs),
		Opcode::PC => misc::pc(cs),
		Opcode::MSIZE => misc::msize(cs),
		Opcode::GAS => misc::gas(cs),
		Opcode::CREATE => system::create(store, env, &frame.context, cs),
		Opcode::CALL => system::call(store, env, &frame.context, cs, CallScheme::Call),
		Opcode::RETURN => misc::ret(cs, &env.config),
		Opcode::POST => system::post(store, env, &frame.context, cs),
		Opcode::CALL_STATELESS => {
			system::call(store, env, &frame.context, cs, CallScheme::Stateless)
		}
		Opcode::SUICIDE => system::suicide(store, env, &frame.context, cs),
		_ => Control::Halt(Vec::new()),
	}
}
