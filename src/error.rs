use core::fmt;

/// Stack manipulation failure inside a frame. Either kind halts the frame
/// with empty output rather than failing the transaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StackError {
	Underflow,
	Overflow,
}

impl fmt::Display for StackError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			StackError::Underflow => write!(f, "stack underflow"),
			StackError::Overflow => write!(f, "stack overflow"),
		}
	}
}

/// Insufficient funds on a ledger debit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BalanceError {
	pub have: u128,
	pub need: u128,
}

impl fmt::Display for BalanceError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "insufficient balance: have {} and need {}", self.have, self.need)
	}
}

/// Transaction-level failure. Each variant maps to exactly one status
/// string persisted with the execution row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecError {
	/// The envelope could not be unpacked.
	Unpack,
	/// The targeted contract does not exist.
	NoSuchContract,
	/// The supplied start gas does not cover the intrinsic cost.
	InsufficientStartGas { have: u64, need: u64 },
	/// The sender cannot cover value plus the gas down payment.
	InsufficientBalance { have: u128, need: u128 },
	/// The primary message ran out of gas.
	OutOfGas,
}

impl ExecError {
	pub fn status(&self) -> &'static str {
		match self {
			ExecError::Unpack => "invalid: could not unpack",
			ExecError::NoSuchContract => "invalid: no such contract",
			ExecError::InsufficientStartGas { .. } => "invalid: insufficient start gas",
			ExecError::InsufficientBalance { .. } => "invalid: insufficient balance",
			ExecError::OutOfGas => "out of gas",
		}
	}
}

impl fmt::Display for ExecError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			ExecError::InsufficientStartGas { have, need } => {
				write!(f, "insufficient start gas: have {} and need {}", have, need)
			}
			ExecError::InsufficientBalance { have, need } => {
				write!(f, "insufficient balance: have {} and need {}", have, need)
			}
			_ => write!(f, "{}", self.status()),
		}
	}
}

/// Status of a transaction that executed to completion.
pub const STATUS_FINISHED: &str = "finished";
/// Status of a row before any terminal path rewrites it.
pub const STATUS_VALID: &str = "valid";
