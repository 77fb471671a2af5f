//! A deterministic stack-based virtual machine executing smart-contract
//! bytecode as a side-effect of applying ledger transactions.
//!
//! A confirmed transaction carries an [`envelope`]: target contract,
//! gas parameters and payload. Applying it debits the sender for gas up
//! front, drives the contract's code through the [`eval`] dispatch loop
//! against transactional persistent [`state`], drains any messages the
//! code deferred through the post-queue, and credits the unused gas back.
//! Execution is single-threaded and deterministic; gas is the sole
//! resource meter, and a frame that exhausts it has every write rolled
//! back.

pub mod codec;
pub mod context;
pub mod envelope;
pub mod error;
pub mod eval;
pub mod executor;
pub mod gas;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod stack;
pub mod state;

pub use crate::context::{BlockContext, CallScheme, Context, CreateSeed, Environment, TxInfo};
pub use crate::envelope::{compose, parse, ExecutionRow, HEADER_LENGTH, MESSAGE_TYPE_ID};
pub use crate::error::{BalanceError, ExecError, StackError, STATUS_FINISHED, STATUS_VALID};
pub use crate::eval::{apply_op, Control, Frame};
pub use crate::executor::{apply_msg, apply_transaction, create_contract, Message, MsgResult};
pub use crate::gas::Config;
pub use crate::machine::Compustate;
pub use crate::memory::Memory;
pub use crate::opcode::{OpInfo, Opcode};
pub use crate::stack::Stack;
pub use crate::state::{LedgerState, MemoryStore, Savepoint, Store, NATIVE_ASSET};
